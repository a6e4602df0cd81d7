// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dashboard summary: all-time, this-week and last-week aggregates.
//!
//! The summary is recomputed on every read from the raw activity list;
//! nothing here is maintained incrementally, so there is no aggregate state
//! to race on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::Activity;
use crate::stats::daily::{bucket_by_day, DailyStat};
use crate::stats::week::WeekWindow;

/// Totals over a set of activities.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActivityTotals {
    pub total_activities: u32,
    pub total_duration_minutes: u32,
    pub total_calories: u32,
    pub total_distance_km: f64,
}

impl ActivityTotals {
    fn accumulate(activities: &[Activity]) -> Self {
        let mut totals = Self::default();
        for activity in activities {
            totals.total_activities += 1;
            totals.total_duration_minutes += activity.duration_minutes;
            totals.total_calories += activity.calories;
            totals.total_distance_km += activity.distance_km.unwrap_or(0.0);
        }
        totals
    }
}

/// One week's aggregates plus its per-day breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WeekSummary {
    pub totals: ActivityTotals,
    /// `round(total_calories / 7)` over the full week
    pub avg_daily_calories: u32,
    /// Number of days with nonzero logged duration
    pub days_with_activity: u32,
    /// Seven slots starting at the week's Sunday
    pub daily: [DailyStat; 7],
}

impl WeekSummary {
    fn build(activities: &[Activity], week_start: DateTime<Utc>) -> Self {
        let totals = ActivityTotals::accumulate(activities);
        let daily = bucket_by_day(activities, week_start);
        let days_with_activity = daily.iter().filter(|d| d.duration_minutes > 0).count() as u32;
        let avg_daily_calories = (f64::from(totals.total_calories) / 7.0).round() as u32;

        Self {
            totals,
            avg_daily_calories,
            days_with_activity,
            daily,
        }
    }
}

/// The complete dashboard payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DashboardSummary {
    pub all_time: ActivityTotals,
    pub this_week: WeekSummary,
    pub last_week: WeekSummary,
}

/// Build the dashboard summary for a user's activities as of `now`.
///
/// `activities` is the user's full history, in any order; week filtering
/// happens here using the half-open Sunday-aligned windows from
/// [`WeekWindow`]. An empty slice produces an all-zero summary. Pure: the
/// same inputs always produce the same output.
pub fn build_dashboard_summary(activities: &[Activity], now: DateTime<Utc>) -> DashboardSummary {
    let window = WeekWindow::containing(now);

    let this_week: Vec<Activity> = activities
        .iter()
        .filter(|a| window.contains(a.date))
        .cloned()
        .collect();
    let last_week: Vec<Activity> = activities
        .iter()
        .filter(|a| window.contains_last_week(a.date))
        .cloned()
        .collect();

    DashboardSummary {
        all_time: ActivityTotals::accumulate(activities),
        this_week: WeekSummary::build(&this_week, window.start_of_week),
        last_week: WeekSummary::build(&last_week, window.start_of_last_week),
    }
}
