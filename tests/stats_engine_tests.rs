// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! End-to-end tests of the statistics engine over realistic activity
//! histories: estimator → bucketing → dashboard summary.

use chrono::{DateTime, Duration, TimeZone, Utc};

use fitlog::models::{Activity, ActivityType, EffortLevel};
use fitlog::stats::{
    bucket_by_day, build_dashboard_summary, estimate_calories, WeekWindow, DEFAULT_WEIGHT_KG,
};

/// Wednesday 2024-01-17; the week runs Sunday 2024-01-14 .. Saturday 2024-01-20.
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 17, 9, 30, 0).unwrap()
}

fn log_activity(
    id: u32,
    activity_type: ActivityType,
    effort: Option<EffortLevel>,
    date: DateTime<Utc>,
    duration: u32,
    distance: Option<f64>,
    weight: f64,
) -> Activity {
    Activity {
        activity_id: format!("{:016x}", id),
        user_id: "user-1".to_string(),
        activity_type,
        effort,
        date,
        duration_minutes: duration,
        distance_km: distance,
        notes: None,
        calories: estimate_calories(activity_type, effort, duration, weight),
        created_at: "2024-01-17T10:00:00Z".to_string(),
    }
}

/// Three weeks of training for one user at 80 kg.
fn training_history(week_start: DateTime<Utc>) -> Vec<Activity> {
    let w = 80.0;
    vec![
        // This week: Sunday run, Tuesday ride, Tuesday yoga, Wednesday swim
        log_activity(1, ActivityType::Running, Some(EffortLevel::Moderate), week_start + Duration::hours(8), 40, Some(7.2), w),
        log_activity(2, ActivityType::Cycling, Some(EffortLevel::Hard), week_start + Duration::days(2) + Duration::hours(18), 60, Some(25.0), w),
        log_activity(3, ActivityType::Yoga, None, week_start + Duration::days(2) + Duration::hours(20), 30, None, w),
        log_activity(4, ActivityType::Swimming, Some(EffortLevel::Easy), week_start + Duration::days(3) + Duration::hours(7), 45, Some(1.5), w),
        // Last week: Monday walk, Saturday hike
        log_activity(5, ActivityType::Walking, None, week_start - Duration::days(6) + Duration::hours(12), 50, Some(4.0), w),
        log_activity(6, ActivityType::Hiking, Some(EffortLevel::Hard), week_start - Duration::days(1) + Duration::hours(9), 180, Some(14.0), w),
        // Two weeks ago: one big ride, all-time only
        log_activity(7, ActivityType::Cycling, Some(EffortLevel::Moderate), week_start - Duration::days(9) + Duration::hours(10), 120, Some(48.0), w),
    ]
}

#[test]
fn test_full_history_summary() {
    let window = WeekWindow::containing(now());
    let activities = training_history(window.start_of_week);
    let summary = build_dashboard_summary(&activities, now());

    // All-time covers all seven sessions.
    assert_eq!(summary.all_time.total_activities, 7);
    assert_eq!(
        summary.all_time.total_duration_minutes,
        40 + 60 + 30 + 45 + 50 + 180 + 120
    );
    assert!((summary.all_time.total_distance_km - 99.7).abs() < 1e-9);

    // This week: the first four sessions.
    assert_eq!(summary.this_week.totals.total_activities, 4);
    assert_eq!(summary.this_week.totals.total_duration_minutes, 175);

    // Last week: walk + hike.
    assert_eq!(summary.last_week.totals.total_activities, 2);
    assert_eq!(summary.last_week.totals.total_duration_minutes, 230);

    // Daily slots: Sunday(0) run, Tuesday(2) ride+yoga, Wednesday(3) swim.
    assert_eq!(summary.this_week.daily[0].activity_count, 1);
    assert_eq!(summary.this_week.daily[2].activity_count, 2);
    assert_eq!(summary.this_week.daily[2].duration_minutes, 90);
    assert_eq!(summary.this_week.daily[3].activity_count, 1);
    assert_eq!(summary.this_week.days_with_activity, 3);

    // Calorie cross-checks against the estimator table at 80 kg.
    let run = estimate_calories(ActivityType::Running, Some(EffortLevel::Moderate), 40, 80.0);
    let ride = estimate_calories(ActivityType::Cycling, Some(EffortLevel::Hard), 60, 80.0);
    let yoga = estimate_calories(ActivityType::Yoga, None, 30, 80.0);
    let swim = estimate_calories(ActivityType::Swimming, Some(EffortLevel::Easy), 45, 80.0);
    let week_calories = run + ride + yoga + swim;
    assert_eq!(summary.this_week.totals.total_calories, week_calories);
    assert_eq!(
        summary.this_week.avg_daily_calories,
        (f64::from(week_calories) / 7.0).round() as u32
    );
}

#[test]
fn test_bucketing_partitions_the_week_query() {
    // Whatever a (possibly over-fetching) week query returns, the bucket
    // sums must equal the sums over the activities inside the window.
    let window = WeekWindow::containing(now());
    let activities = training_history(window.start_of_week);

    let buckets = bucket_by_day(&activities, window.start_of_week);
    let bucketed: u32 = buckets.iter().map(|d| d.duration_minutes).sum();
    let expected: u32 = activities
        .iter()
        .filter(|a| window.contains(a.date))
        .map(|a| a.duration_minutes)
        .sum();

    assert_eq!(bucketed, expected);
    assert_eq!(
        buckets.iter().map(|d| d.activity_count).sum::<u32>(),
        4
    );
}

#[test]
fn test_last_week_buckets_align_with_last_week_window() {
    let window = WeekWindow::containing(now());
    let activities = training_history(window.start_of_week);

    let buckets = bucket_by_day(&activities, window.start_of_last_week);
    // Monday of last week (slot 1) held the walk; Saturday (slot 6) the hike.
    assert_eq!(buckets[1].activity_count, 1);
    assert_eq!(buckets[1].duration_minutes, 50);
    assert_eq!(buckets[6].activity_count, 1);
    assert_eq!(buckets[6].duration_minutes, 180);
    assert_eq!(buckets.iter().map(|d| d.activity_count).sum::<u32>(), 2);
}

#[test]
fn test_estimator_agrees_with_documented_examples() {
    assert_eq!(
        estimate_calories(ActivityType::Running, Some(EffortLevel::Hard), 60, 70.0),
        231
    );
    assert_eq!(
        estimate_calories(ActivityType::Walking, None, 30, DEFAULT_WEIGHT_KG),
        37
    );
    assert_eq!(
        estimate_calories(ActivityType::Cycling, Some(EffortLevel::Moderate), 45, 80.0),
        108
    );
}

#[test]
fn test_summary_is_stable_under_input_order() {
    // Aggregation is order-independent: shuffling the fetch order must not
    // change any number.
    let window = WeekWindow::containing(now());
    let mut activities = training_history(window.start_of_week);

    let forward = build_dashboard_summary(&activities, now());
    activities.reverse();
    let reversed = build_dashboard_summary(&activities, now());

    assert_eq!(forward, reversed);
}

#[test]
fn test_summary_at_week_rollover() {
    // At Sunday midnight every activity from the old week moves to
    // "last week" and this week starts empty.
    let window = WeekWindow::containing(now());
    let activities = training_history(window.start_of_week);
    let next_sunday = window.end_of_week();

    let summary = build_dashboard_summary(&activities, next_sunday);

    assert_eq!(summary.this_week.totals.total_activities, 0);
    assert_eq!(summary.this_week.days_with_activity, 0);
    assert_eq!(summary.last_week.totals.total_activities, 4);
    assert_eq!(summary.all_time.total_activities, 7);
}
