// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Sunday-aligned week window used for all dashboard aggregations.

use chrono::{DateTime, Datelike, Duration, Utc};

/// Boundaries of "this week" and "last week" relative to a reference
/// instant. A week starts on Sunday at midnight UTC.
///
/// "This week" is the half-open interval
/// `[start_of_week, start_of_week + 7 days)`; that full-week upper bound is
/// used uniformly by every caller (queries and aggregation alike).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekWindow {
    /// Most recent Sunday at or before the reference, midnight UTC
    pub start_of_week: DateTime<Utc>,
    /// Exactly 7 days before `start_of_week`
    pub start_of_last_week: DateTime<Utc>,
}

impl WeekWindow {
    /// Compute the window containing `reference`.
    pub fn containing(reference: DateTime<Utc>) -> Self {
        let days_from_sunday = i64::from(reference.weekday().num_days_from_sunday());
        let sunday = reference.date_naive() - Duration::days(days_from_sunday);
        // Midnight always exists for a calendar date in UTC.
        let start_of_week = sunday.and_hms_opt(0, 0, 0).unwrap().and_utc();

        Self {
            start_of_week,
            start_of_last_week: start_of_week - Duration::days(7),
        }
    }

    /// Exclusive upper bound of the current week.
    pub fn end_of_week(&self) -> DateTime<Utc> {
        self.start_of_week + Duration::days(7)
    }

    /// Whether `date` falls inside the current week window.
    pub fn contains(&self, date: DateTime<Utc>) -> bool {
        date >= self.start_of_week && date < self.end_of_week()
    }

    /// Whether `date` falls inside last week's window.
    pub fn contains_last_week(&self, date: DateTime<Utc>) -> bool {
        date >= self.start_of_last_week && date < self.start_of_week
    }
}
