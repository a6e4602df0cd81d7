// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity logging and listing routes.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, NaiveDate, Utc};
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{Activity, ActivityType, EffortLevel};
use crate::stats::{estimate_calories, DEFAULT_WEIGHT_KG};
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/activities", get(list_activities).post(create_activity))
        .route("/api/activities/{id}", get(get_activity))
}

const MAX_NOTES_LENGTH: usize = 2000;
const MAX_DURATION_MINUTES: u32 = 24 * 60;

// ─── Create ──────────────────────────────────────────────────

/// Body for logging an activity. Unknown activity types and effort levels
/// fail deserialization before this handler runs.
#[derive(Deserialize)]
pub struct CreateActivityRequest {
    #[serde(rename = "type")]
    activity_type: ActivityType,
    effort: Option<EffortLevel>,
    /// Either a bare `YYYY-MM-DD` (taken as that day's midnight) or a full
    /// RFC3339 timestamp.
    date: String,
    duration_minutes: u32,
    distance_km: Option<f64>,
    notes: Option<String>,
}

/// Created/fetched activity response.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActivityResponse {
    pub activity: Activity,
}

/// Log a new activity.
///
/// Calories are estimated here, once, from the MET table and the profile
/// weight at this moment (70 kg when no weight is on record). The stored
/// value never changes afterwards, even if the user edits their weight.
async fn create_activity(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<CreateActivityRequest>,
) -> Result<Json<ActivityResponse>> {
    if body.duration_minutes == 0 {
        return Err(AppError::BadRequest(
            "Duration must be at least 1 minute".to_string(),
        ));
    }
    if body.duration_minutes > MAX_DURATION_MINUTES {
        return Err(AppError::BadRequest(
            "Duration cannot exceed 24 hours".to_string(),
        ));
    }
    if let Some(distance) = body.distance_km {
        if !distance.is_finite() || distance < 0.0 {
            return Err(AppError::BadRequest(
                "Distance must be a non-negative number".to_string(),
            ));
        }
    }
    if let Some(notes) = &body.notes {
        if notes.len() > MAX_NOTES_LENGTH {
            return Err(AppError::BadRequest(
                "Notes too long (max 2000 characters)".to_string(),
            ));
        }
    }

    let date = parse_activity_date(&body.date)?;

    let weight_kg = state
        .db
        .get_profile(&user.user_id)
        .await?
        .and_then(|p| p.weight_kg)
        .unwrap_or(DEFAULT_WEIGHT_KG);

    let calories = estimate_calories(
        body.activity_type,
        body.effort,
        body.duration_minutes,
        weight_kg,
    );

    let activity = Activity {
        activity_id: new_activity_id()?,
        user_id: user.user_id.clone(),
        activity_type: body.activity_type,
        effort: body.effort,
        date,
        duration_minutes: body.duration_minutes,
        distance_km: body.distance_km,
        notes: body.notes,
        calories,
        created_at: format_utc_rfc3339(Utc::now()),
    };

    state.db.set_activity(&activity).await?;

    tracing::info!(
        user_id = %user.user_id,
        activity_id = %activity.activity_id,
        activity_type = ?activity.activity_type,
        calories,
        "Activity logged"
    );

    Ok(Json(ActivityResponse { activity }))
}

// ─── List ────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ActivitiesQuery {
    /// Filter by start date (RFC3339)
    after: Option<String>,
    /// Pagination: items per page
    #[serde(default = "default_per_page")]
    per_page: u32,
}

fn default_per_page() -> u32 {
    50
}

const MAX_PER_PAGE: u32 = 100;

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActivitiesResponse {
    pub activities: Vec<Activity>,
    pub per_page: u32,
}

/// Get the caller's activities, date descending.
async fn list_activities(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<ActivitiesQuery>,
) -> Result<Json<ActivitiesResponse>> {
    tracing::debug!(
        user_id = %user.user_id,
        after = ?params.after,
        per_page = params.per_page,
        "Fetching activities"
    );

    let limit = params.per_page.min(MAX_PER_PAGE);
    let after_timestamp = parse_after_timestamp(params.after.as_deref())?;

    let activities = state
        .db
        .get_activities_for_user(&user.user_id, after_timestamp, limit)
        .await?;

    Ok(Json(ActivitiesResponse {
        activities,
        per_page: limit,
    }))
}

// ─── Get One ─────────────────────────────────────────────────

/// Get a single activity.
///
/// Responds 404 both when the ID does not exist and when it belongs to a
/// different user; callers cannot distinguish the two.
async fn get_activity(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<ActivityResponse>> {
    let activity = state
        .db
        .get_activity(&id)
        .await?
        .filter(|a| a.user_id == user.user_id)
        .ok_or_else(|| AppError::NotFound(format!("Activity {} not found", id)))?;

    Ok(Json(ActivityResponse { activity }))
}

// ─── Helpers ─────────────────────────────────────────────────

fn parse_after_timestamp(after: Option<&str>) -> Result<Option<DateTime<Utc>>> {
    after
        .map(|raw| {
            DateTime::parse_from_rfc3339(raw)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|_| {
                    AppError::BadRequest(
                        "Invalid 'after' parameter: must be RFC3339 datetime".to_string(),
                    )
                })
        })
        .transpose()
}

/// Parse the activity date field.
///
/// A bare calendar date means "that day", pinned to midnight so day
/// bucketing is exact; a full timestamp is kept as-is.
fn parse_activity_date(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        // Midnight always exists for a calendar date in UTC.
        return Ok(day.and_hms_opt(0, 0, 0).unwrap().and_utc());
    }

    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            AppError::BadRequest(
                "Invalid 'date': must be YYYY-MM-DD or RFC3339 datetime".to_string(),
            )
        })
}

/// Random 16-hex-char activity ID.
fn new_activity_id() -> Result<String> {
    let mut bytes = [0u8; 8];
    SystemRandom::new()
        .fill(&mut bytes)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("RNG failure")))?;
    Ok(hex::encode(bytes))
}
