// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile routes.

use axum::{extract::State, routing::get, Extension, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::Profile;
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/profile", get(get_profile).put(update_profile))
}

/// Profile response; `profile` is null until the user saves one.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ProfileResponse {
    pub profile: Option<Profile>,
    pub name: Option<String>,
}

/// Get the current user's profile and display name.
async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ProfileResponse>> {
    let user_record = state
        .db
        .get_user(&user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user.user_id)))?;

    let profile = state.db.get_profile(&user.user_id).await?;

    Ok(Json(ProfileResponse {
        profile,
        name: user_record.name,
    }))
}

/// Body for updating the profile. Omitted fields clear the stored value,
/// matching upsert semantics: the document is replaced, not patched.
#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    weight_kg: Option<f64>,
    height_cm: Option<f64>,
    name: Option<String>,
}

const MAX_NAME_LENGTH: usize = 100;

/// Create or update the current user's profile.
///
/// The profile document is created lazily on the first write; there is
/// never more than one per user. Changing the weight here does not touch
/// any previously logged activity's calories.
async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>> {
    if let Some(weight) = body.weight_kg {
        if !weight.is_finite() || weight <= 0.0 {
            return Err(AppError::BadRequest(
                "Weight must be a positive number of kilograms".to_string(),
            ));
        }
    }
    if let Some(height) = body.height_cm {
        if !height.is_finite() || height <= 0.0 {
            return Err(AppError::BadRequest(
                "Height must be a positive number of centimeters".to_string(),
            ));
        }
    }
    if let Some(name) = &body.name {
        if name.trim().is_empty() || name.len() > MAX_NAME_LENGTH {
            return Err(AppError::BadRequest("Invalid display name".to_string()));
        }
    }

    let mut user_record = state
        .db
        .get_user(&user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user.user_id)))?;

    if let Some(name) = body.name {
        user_record.name = Some(name.trim().to_string());
        state.db.upsert_user(&user_record).await?;
    }

    let profile = Profile {
        user_id: user.user_id.clone(),
        weight_kg: body.weight_kg,
        height_cm: body.height_cm,
        updated_at: format_utc_rfc3339(chrono::Utc::now()),
    };
    state.db.upsert_profile(&profile).await?;

    tracing::info!(user_id = %user.user_id, "Profile updated");

    Ok(Json(ProfileResponse {
        profile: Some(profile),
        name: user_record.name,
    }))
}
