// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Activity model for storage and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of exercise. The wire format is lowercase; anything outside this
/// enumeration is rejected at deserialization time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Walking,
    Running,
    Cycling,
    Swimming,
    Weightlifting,
    Aerobics,
    Yoga,
    Hiking,
    Dancing,
    Other,
}

/// Coarse intensity modifier. Absent means "use the type's default".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffortLevel {
    Easy,
    Moderate,
    Hard,
}

/// Stored activity record in Firestore.
///
/// `calories` is a frozen snapshot computed once at creation from the
/// activity and the profile weight at that time. Editing the profile later
/// never rewrites it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    /// Random hex ID (also used as document ID)
    pub activity_id: String,
    /// Owning user ID; every query is scoped by this field
    pub user_id: String,
    /// Kind of exercise
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    /// Intensity, if the user specified one
    pub effort: Option<EffortLevel>,
    /// When the session happened. Stored as a full UTC timestamp;
    /// bucketing normalizes to midnight.
    pub date: DateTime<Utc>,
    /// Session length in minutes
    pub duration_minutes: u32,
    /// Distance covered, if any (kilometers)
    pub distance_km: Option<f64>,
    /// Free-text notes
    pub notes: Option<String>,
    /// Estimated energy expenditure, frozen at creation
    pub calories: u32,
    /// When this record was created (ISO 8601)
    pub created_at: String,
}
