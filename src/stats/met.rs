// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Calorie estimation from MET (Metabolic Equivalent of Task) values.
//!
//! The estimate is computed once when an activity is logged and stored on
//! the record; it is never recomputed, so the table and formula here must
//! stay numerically stable across releases.

use crate::models::{ActivityType, EffortLevel};

/// Body weight assumed when the user has no profile weight on record (kg).
pub const DEFAULT_WEIGHT_KG: f64 = 70.0;

/// Look up the MET value for an activity type at a given effort level.
///
/// `None` effort selects the type's default MET.
pub fn met_for(activity_type: ActivityType, effort: Option<EffortLevel>) -> f64 {
    use ActivityType::*;
    use EffortLevel::*;

    // (easy, moderate, hard, default) per type
    let (easy, moderate, hard, default) = match activity_type {
        Walking => (2.5, 3.5, 4.5, 3.5),
        Running => (7.0, 9.0, 11.0, 9.0),
        Cycling => (4.0, 6.0, 8.0, 6.0),
        Swimming => (5.0, 7.0, 9.0, 7.0),
        Weightlifting => (3.0, 5.0, 6.0, 5.0),
        Aerobics => (4.0, 6.0, 8.0, 6.0),
        Yoga => (2.0, 3.0, 4.0, 3.0),
        Hiking => (5.0, 6.0, 7.0, 6.0),
        Dancing => (3.0, 5.0, 7.0, 5.0),
        Other => (3.0, 4.0, 5.0, 4.0),
    };

    match effort {
        Some(Easy) => easy,
        Some(Moderate) => moderate,
        Some(Hard) => hard,
        None => default,
    }
}

/// Estimate calories burned for a session.
///
/// `calories = round(duration * MET * weight / 200)`, rounded half away
/// from zero. The 200 divisor is the standard simplification of
/// `kcal/min = MET * weight_kg * 3.5 / 200` and must not change: stored
/// records were computed with it.
pub fn estimate_calories(
    activity_type: ActivityType,
    effort: Option<EffortLevel>,
    duration_minutes: u32,
    weight_kg: f64,
) -> u32 {
    let met = met_for(activity_type, effort);
    (f64::from(duration_minutes) * met * weight_kg / 200.0).round() as u32
}
