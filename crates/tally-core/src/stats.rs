//! The habit statistics engine.
//!
//! Pure computation: given a habit's daily target, the multiset of days its
//! completions were logged on, and a reference "today", derive the
//! date-relative view (today's progress, completion flag, current streak,
//! trailing-week consistency). The engine never touches storage; callers
//! aggregate the ledger once and hand it over, and "today" is always an
//! explicit parameter so results are reproducible.

use std::collections::HashMap;

use serde::Serialize;

use crate::day::DayKey;

/// Days in the consistency window.
pub const WEEK_WINDOW: u32 = 7;

/// Error type for statistics computation.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StatsError {
    /// A target below 1 would make every day trivially successful and the
    /// backward streak walk unbounded. Rejected outright, never coerced.
    #[error("daily target must be at least 1 (got {0})")]
    InvalidTarget(u32),
}

/// Derived, date-relative statistics for one habit. Computed on demand,
/// never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HabitStats {
    /// Completion events logged on the reference day.
    pub today_progress: u32,

    /// Whether the reference day's target is met.
    pub completed_today: bool,

    /// Consecutive successful days ending at (or just before) today.
    pub streak: u32,

    /// Percent (0-100) of the trailing 7 days, today inclusive, that were
    /// successful.
    pub weekly_consistency: u8,
}

/// Per-day completion counts for one habit.
///
/// The ledger hands over raw events in any order; the tally is the single
/// date-indexed aggregation every walk below reads, so no step ever goes
/// back to storage.
#[derive(Debug, Clone, Default)]
pub struct DayTally {
    counts: HashMap<DayKey, u32>,
}

impl DayTally {
    /// Creates an empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregates a sequence of completion days, order irrelevant.
    pub fn from_days(days: impl IntoIterator<Item = DayKey>) -> Self {
        let mut tally = Self::new();
        for day in days {
            tally.add(day);
        }
        tally
    }

    /// Counts one completion on `day`.
    pub fn add(&mut self, day: DayKey) {
        *self.counts.entry(day).or_insert(0) += 1;
    }

    /// Completion count for `day`; missing days count as 0.
    pub fn count(&self, day: DayKey) -> u32 {
        self.counts.get(&day).copied().unwrap_or(0)
    }

    /// Whether `day` meets `target`.
    pub fn is_met(&self, day: DayKey, target: u32) -> bool {
        self.count(day) >= target
    }

    /// Number of distinct days with at least one completion.
    pub fn distinct_days(&self) -> usize {
        self.counts.len()
    }
}

/// Computes statistics from raw completion days.
///
/// Convenience wrapper that aggregates into a [`DayTally`] first; see
/// [`compute_stats_from_tally`] for the algorithm and error contract.
pub fn compute_stats(
    daily_target: u32,
    days: impl IntoIterator<Item = DayKey>,
    today: DayKey,
) -> Result<HabitStats, StatsError> {
    compute_stats_from_tally(daily_target, &DayTally::from_days(days), today)
}

/// Computes statistics from an already-aggregated tally.
///
/// # Errors
///
/// Returns [`StatsError::InvalidTarget`] when `daily_target` is 0. A
/// non-positive target is a configuration-contract violation; it is never
/// treated as satisfied by zero events.
pub fn compute_stats_from_tally(
    daily_target: u32,
    tally: &DayTally,
    today: DayKey,
) -> Result<HabitStats, StatsError> {
    if daily_target == 0 {
        return Err(StatsError::InvalidTarget(daily_target));
    }

    let today_progress = tally.count(today);
    let completed_today = today_progress >= daily_target;

    // Walk backward from today, or from yesterday while today is still
    // short of its target. Each successful step lands on a distinct logged
    // day, so the walk is bounded by the tally size.
    let mut streak = 0u32;
    let mut cursor = if completed_today { today } else { today.pred() };
    while tally.is_met(cursor, daily_target) {
        streak += 1;
        cursor = cursor.pred();
    }

    let successful = today
        .trailing_window(WEEK_WINDOW)
        .into_iter()
        .filter(|day| tally.is_met(*day, daily_target))
        .count() as u32;
    // Integer round-to-nearest of 100 * successful / 7.
    let weekly_consistency = (successful * 100 + WEEK_WINDOW / 2) / WEEK_WINDOW;

    Ok(HabitStats {
        today_progress,
        completed_today,
        streak,
        weekly_consistency: weekly_consistency as u8,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn day(s: &str) -> DayKey {
        DayKey::parse(s).unwrap()
    }

    const TODAY: &str = "2025-03-09";

    /// `counts[i]` completions on the day `i` days before today.
    fn days_ago_counts(counts: &[u32]) -> Vec<DayKey> {
        let mut days = Vec::new();
        let mut cursor = day(TODAY);
        for &count in counts {
            for _ in 0..count {
                days.push(cursor);
            }
            cursor = cursor.pred();
        }
        days
    }

    #[test]
    fn empty_ledger_yields_zeroes() {
        for target in [1, 2, 5] {
            let stats = compute_stats(target, [], day(TODAY)).unwrap();
            assert_eq!(stats.today_progress, 0);
            assert!(!stats.completed_today);
            assert_eq!(stats.streak, 0);
            assert_eq!(stats.weekly_consistency, 0);
        }
    }

    #[test]
    fn zero_target_is_rejected() {
        let err = compute_stats(0, [day(TODAY)], day(TODAY)).unwrap_err();
        assert_eq!(err, StatsError::InvalidTarget(0));
    }

    #[test]
    fn today_and_yesterday_make_streak_of_two() {
        // Target 1, events today and yesterday only.
        let stats = compute_stats(1, days_ago_counts(&[1, 1]), day(TODAY)).unwrap();
        assert_eq!(stats.today_progress, 1);
        assert!(stats.completed_today);
        assert_eq!(stats.streak, 2);
    }

    #[test]
    fn shortfall_today_starts_streak_at_yesterday() {
        // Target 2: one event today, two yesterday, two the day before.
        let stats = compute_stats(2, days_ago_counts(&[1, 2, 2]), day(TODAY)).unwrap();
        assert_eq!(stats.today_progress, 1);
        assert!(!stats.completed_today);
        // Today's shortfall does not break the run built before it.
        assert_eq!(stats.streak, 2);
    }

    #[test]
    fn gap_at_yesterday_stops_the_walk() {
        // Target 1: events today, 2 days ago, and 3 days ago.
        let stats = compute_stats(1, days_ago_counts(&[1, 0, 1, 1]), day(TODAY)).unwrap();
        assert!(stats.completed_today);
        assert_eq!(stats.streak, 1);
    }

    #[test]
    fn streak_counts_full_consecutive_run() {
        // k+1 consecutive successful days ending today.
        let stats = compute_stats(1, days_ago_counts(&[1, 1, 1, 1, 1]), day(TODAY)).unwrap();
        assert_eq!(stats.streak, 5);
    }

    #[test]
    fn streak_can_exceed_the_weekly_window() {
        let days = days_ago_counts(&[1; 30]);
        let stats = compute_stats(1, days, day(TODAY)).unwrap();
        assert_eq!(stats.streak, 30);
        assert_eq!(stats.weekly_consistency, 100);
    }

    #[test]
    fn four_of_seven_rounds_to_57() {
        // Successes today and on 3 of the 6 preceding days.
        let stats = compute_stats(1, days_ago_counts(&[1, 1, 0, 1, 0, 1, 0]), day(TODAY)).unwrap();
        assert_eq!(stats.weekly_consistency, 57);
    }

    #[test]
    fn consistency_hits_every_rounded_step() {
        // n successes in the window -> round(100n/7).
        let expected = [0u8, 14, 29, 43, 57, 71, 86, 100];
        for n in 0..=7usize {
            let mut week = [0u32; 7];
            for slot in week.iter_mut().take(n) {
                *slot = 1;
            }
            let stats = compute_stats(1, days_ago_counts(&week), day(TODAY)).unwrap();
            assert_eq!(stats.weekly_consistency, expected[n], "n = {n}");
        }
    }

    #[test]
    fn consistency_ignores_days_outside_the_window() {
        // A success 8 days ago contributes nothing.
        let stats = compute_stats(1, days_ago_counts(&[0, 0, 0, 0, 0, 0, 0, 1]), day(TODAY))
            .unwrap();
        assert_eq!(stats.weekly_consistency, 0);
        assert_eq!(stats.streak, 0);
    }

    #[test]
    fn under_target_days_are_not_successful() {
        // Target 3, only 2 events today.
        let stats = compute_stats(3, days_ago_counts(&[2]), day(TODAY)).unwrap();
        assert_eq!(stats.today_progress, 2);
        assert!(!stats.completed_today);
        assert_eq!(stats.streak, 0);
        assert_eq!(stats.weekly_consistency, 0);
    }

    #[test]
    fn identical_inputs_yield_identical_outputs() {
        let days = days_ago_counts(&[2, 1, 2, 0, 2]);
        let a = compute_stats(2, days.clone(), day(TODAY)).unwrap();
        let b = compute_stats(2, days, day(TODAY)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn results_are_date_relative() {
        // The same ledger read one day later loses today's completion.
        let days = days_ago_counts(&[1, 1]);
        let later = compute_stats(1, days, day(TODAY).succ()).unwrap();
        assert_eq!(later.today_progress, 0);
        assert!(!later.completed_today);
        // The run ending yesterday is still intact.
        assert_eq!(later.streak, 2);
    }

    #[test]
    fn tally_aggregates_counts() {
        let tally = DayTally::from_days(days_ago_counts(&[3, 1]));
        assert_eq!(tally.count(day(TODAY)), 3);
        assert_eq!(tally.count(day(TODAY).pred()), 1);
        assert_eq!(tally.count(day("2001-01-01")), 0);
        assert_eq!(tally.distinct_days(), 2);
    }
}
