// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-day bucketing of activities within a week window.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::Activity;

/// One day's accumulated totals within a week window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DailyStat {
    /// Midnight UTC of the day this slot covers
    pub date: DateTime<Utc>,
    /// Summed duration (minutes)
    pub duration_minutes: u32,
    /// Summed calories
    pub calories: u32,
    /// Number of activities that day
    pub activity_count: u32,
}

impl DailyStat {
    fn empty(date: DateTime<Utc>) -> Self {
        Self {
            date,
            duration_minutes: 0,
            calories: 0,
            activity_count: 0,
        }
    }
}

/// Bucket activities into the 7 calendar-day slots of the week starting at
/// `week_start` (which must be a midnight instant).
///
/// Activity dates are normalized to midnight before indexing. Activities
/// whose normalized date falls outside the 7-day window are skipped, so an
/// over-fetching query cannot corrupt the sums. Slot 0 is `week_start`
/// itself (Sunday for the windows produced by [`WeekWindow`]).
///
/// [`WeekWindow`]: crate::stats::WeekWindow
pub fn bucket_by_day(activities: &[Activity], week_start: DateTime<Utc>) -> [DailyStat; 7] {
    let mut days: [DailyStat; 7] =
        std::array::from_fn(|i| DailyStat::empty(week_start + Duration::days(i as i64)));

    let start_day = week_start.date_naive();
    for activity in activities {
        let day_index = (activity.date.date_naive() - start_day).num_days();
        if (0..7).contains(&day_index) {
            let slot = &mut days[day_index as usize];
            slot.duration_minutes += activity.duration_minutes;
            slot.calories += activity.calories;
            slot.activity_count += 1;
        }
    }

    days
}
