//! Weekly commit activity aggregation
//!
//! Merges per-repository weekly series into one calendar of the most recent
//! [`WINDOW_WEEKS`] weeks, and derives the scaling inputs a calendar view
//! needs.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Duration, Utc};

use crate::types::WeeklyActivity;

/// Number of weeks kept in an aggregated calendar
pub const WINDOW_WEEKS: usize = 52;

/// Number of shading levels above "no activity"
const INTENSITY_LEVELS: u64 = 4;

/// Merge weekly series keyed by week start
///
/// Totals and day counts of weeks sharing a start are summed elementwise.
/// The result is ascending by week and keeps only the last [`WINDOW_WEEKS`]
/// entries; shorter histories are returned as-is, without padding.
pub fn merge(series: &[Vec<WeeklyActivity>]) -> Vec<WeeklyActivity> {
    let mut merged: BTreeMap<i64, WeeklyActivity> = BTreeMap::new();

    for week in series.iter().flatten() {
        let acc = merged.entry(week.week).or_insert_with(|| WeeklyActivity {
            week: week.week,
            ..Default::default()
        });
        acc.total = acc.total.saturating_add(week.total);
        for (slot, count) in acc.days.iter_mut().zip(week.days) {
            *slot = slot.saturating_add(count);
        }
    }

    window(merged.into_values().collect())
}

/// Largest single-day count across all weeks, never less than 1
pub fn max_daily_count(series: &[WeeklyActivity]) -> u64 {
    series
        .iter()
        .flat_map(|w| w.days)
        .max()
        .unwrap_or(0)
        .max(1)
}

/// Shading bucket (0-4) for a day count relative to the calendar maximum
pub fn intensity_level(count: u64, max: u64) -> u8 {
    if count == 0 {
        return 0;
    }
    let max = u128::from(max.max(1));
    // ceil(count / max * 4), widened so any u64 count fits
    let level = (u128::from(count) * u128::from(INTENSITY_LEVELS)).div_ceil(max);
    level.min(u128::from(INTENSITY_LEVELS)) as u8
}

/// Bucket individual commit timestamps into Sunday-started UTC weeks
///
/// Used when GitHub has no precomputed statistics for a repository.
pub fn bucket_commits(commits: &[DateTime<Utc>]) -> Vec<WeeklyActivity> {
    let mut weeks: BTreeMap<i64, WeeklyActivity> = BTreeMap::new();

    for commit in commits {
        let weekday = commit.weekday().num_days_from_sunday() as usize;
        let day_start = commit.date_naive().and_hms_opt(0, 0, 0).map(|d| d.and_utc());
        let Some(day_start) = day_start else {
            continue;
        };
        let week_start = (day_start - Duration::days(weekday as i64)).timestamp();

        let entry = weeks.entry(week_start).or_insert_with(|| WeeklyActivity {
            week: week_start,
            ..Default::default()
        });
        entry.total += 1;
        entry.days[weekday] += 1;
    }

    window(weeks.into_values().collect())
}

fn window(mut weeks: Vec<WeeklyActivity>) -> Vec<WeeklyActivity> {
    if weeks.len() > WINDOW_WEEKS {
        weeks.drain(..weeks.len() - WINDOW_WEEKS);
    }
    weeks
}
