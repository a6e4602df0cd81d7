// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity statistics and calorie estimation.
//!
//! Everything in this tree is a pure, synchronous function over in-memory
//! data. The persistence and HTTP layers feed activities in and serialize
//! the results out; no I/O happens here.

pub mod daily;
pub mod dashboard;
pub mod met;
pub mod week;

pub use daily::{bucket_by_day, DailyStat};
pub use dashboard::{build_dashboard_summary, ActivityTotals, DashboardSummary, WeekSummary};
pub use met::{estimate_calories, met_for, DEFAULT_WEIGHT_KG};
pub use week::WeekWindow;
