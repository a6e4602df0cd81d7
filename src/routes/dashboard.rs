// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dashboard route.

use axum::{extract::State, routing::get, Extension, Json, Router};
use std::sync::Arc;

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::stats::{build_dashboard_summary, DashboardSummary};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/dashboard", get(get_dashboard))
}

/// Get the all-time / this-week / last-week dashboard summary.
///
/// The summary is recomputed from the user's activity history on every
/// request; nothing is cached or incrementally maintained, so a freshly
/// logged activity shows up immediately.
async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<DashboardSummary>> {
    let activities = state.db.get_all_activities_for_user(&user.user_id).await?;

    tracing::debug!(
        user_id = %user.user_id,
        activity_count = activities.len(),
        "Building dashboard summary"
    );

    Ok(Json(build_dashboard_summary(
        &activities,
        chrono::Utc::now(),
    )))
}
