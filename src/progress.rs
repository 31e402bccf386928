use chrono::NaiveDate;

use crate::records::{ActiveDay, PerformanceRecord};

/// Length of the unbroken run of active days ending at `today` or
/// yesterday. Days with a zero count do not count as active; duplicate
/// dates are ignored. `today` is injected so callers stay deterministic.
pub fn current_streak(days: &[ActiveDay], today: NaiveDate) -> u32 {
    let mut dates: Vec<NaiveDate> = days
        .iter()
        .filter(|d| d.count > 0)
        .map(|d| d.date)
        .collect();
    dates.sort_unstable_by(|a, b| b.cmp(a));
    dates.dedup();

    let most_recent = match dates.first() {
        Some(&date) => date,
        None => return 0,
    };

    // A streak survives overnight: broken only once the latest active
    // day is older than yesterday.
    if (today - most_recent).num_days() > 1 {
        return 0;
    }

    let mut streak = 1;
    let mut cursor = most_recent;
    for &date in &dates[1..] {
        if (cursor - date).num_days() == 1 {
            streak += 1;
            cursor = date;
        } else {
            break;
        }
    }
    streak
}

/// Longest run of consecutive active days anywhere in the snapshot,
/// independent of the current date.
pub fn longest_streak(days: &[ActiveDay]) -> u32 {
    let mut dates: Vec<NaiveDate> = days
        .iter()
        .filter(|d| d.count > 0)
        .map(|d| d.date)
        .collect();
    dates.sort_unstable();
    dates.dedup();

    if dates.is_empty() {
        return 0;
    }

    let mut best = 1;
    let mut run = 1;
    for pair in dates.windows(2) {
        if (pair[1] - pair[0]).num_days() == 1 {
            run += 1;
            best = best.max(run);
        } else {
            run = 1;
        }
    }
    best
}

/// Total sessions across the snapshot. Duplicate dates both contribute.
pub fn total_activity(days: &[ActiveDay]) -> i64 {
    days.iter().map(|d| d.count as i64).sum()
}

/// Distinct calendar days with at least one session.
pub fn active_day_count(days: &[ActiveDay]) -> usize {
    let mut dates: Vec<NaiveDate> = days
        .iter()
        .filter(|d| d.count > 0)
        .map(|d| d.date)
        .collect();
    dates.sort_unstable();
    dates.dedup();
    dates.len()
}

/// The record with the maximum score. Ties resolve to the first maximal
/// record in input order, so output is deterministic for a fixed input.
pub fn best_performance(records: &[PerformanceRecord]) -> Option<&PerformanceRecord> {
    let mut best: Option<&PerformanceRecord> = None;
    for record in records {
        match best {
            Some(current) if record.score <= current.score => {}
            _ => best = Some(record),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(date: &str, count: u32) -> ActiveDay {
        ActiveDay {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            count,
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn empty_snapshot_has_no_streak() {
        assert_eq!(current_streak(&[], date("2025-06-02")), 0);
    }

    #[test]
    fn activity_today_starts_a_streak_of_one() {
        let days = vec![day("2025-06-02", 1)];
        assert_eq!(current_streak(&days, date("2025-06-02")), 1);
    }

    #[test]
    fn consecutive_days_extend_the_streak() {
        let days = vec![
            day("2025-06-02", 1),
            day("2025-06-01", 4),
            day("2025-05-31", 2),
        ];
        assert_eq!(current_streak(&days, date("2025-06-02")), 3);
    }

    #[test]
    fn streak_survives_one_idle_day() {
        let days = vec![day("2025-06-01", 1)];
        assert_eq!(current_streak(&days, date("2025-06-02")), 1);
    }

    #[test]
    fn stale_activity_means_broken_streak() {
        let days = vec![
            day("2025-05-28", 3),
            day("2025-05-27", 2),
            day("2025-05-26", 2),
        ];
        assert_eq!(current_streak(&days, date("2025-06-02")), 0);
    }

    #[test]
    fn gaps_stop_the_backward_walk() {
        let days = vec![
            day("2025-06-02", 1),
            day("2025-06-01", 1),
            day("2025-05-30", 5),
        ];
        assert_eq!(current_streak(&days, date("2025-06-02")), 2);
    }

    #[test]
    fn zero_count_days_are_not_active() {
        let days = vec![day("2025-06-02", 0), day("2025-06-01", 2)];
        assert_eq!(current_streak(&days, date("2025-06-02")), 1);
    }

    #[test]
    fn duplicate_dates_do_not_change_the_streak() {
        let deduped = vec![day("2025-06-02", 1), day("2025-06-01", 1)];
        let duplicated = vec![
            day("2025-06-02", 1),
            day("2025-06-02", 3),
            day("2025-06-01", 1),
        ];
        let today = date("2025-06-02");
        assert_eq!(
            current_streak(&duplicated, today),
            current_streak(&deduped, today)
        );
    }

    #[test]
    fn sparse_june_week_streak_and_total() {
        let days = vec![
            day("2025-06-01", 2),
            day("2025-06-02", 1),
            day("2025-06-04", 3),
        ];
        assert_eq!(current_streak(&days, date("2025-06-02")), 2);
        assert_eq!(total_activity(&days), 6);
    }

    #[test]
    fn longest_streak_looks_past_gaps() {
        let days = vec![
            day("2025-03-10", 1),
            day("2025-03-11", 1),
            day("2025-03-12", 1),
            day("2025-03-13", 1),
            day("2025-06-01", 2),
            day("2025-06-02", 1),
        ];
        assert_eq!(longest_streak(&days), 4);
        // Unlike the current streak, this ignores how old the run is.
        assert_eq!(current_streak(&days, date("2025-09-01")), 0);
    }

    #[test]
    fn longest_streak_of_empty_snapshot_is_zero() {
        assert_eq!(longest_streak(&[]), 0);
    }

    #[test]
    fn totals_sum_every_row() {
        assert_eq!(total_activity(&[]), 0);
        let days = vec![day("2025-06-01", 2), day("2025-06-01", 3)];
        assert_eq!(total_activity(&days), 5);
    }

    #[test]
    fn active_day_count_dedupes_dates() {
        let days = vec![
            day("2025-06-01", 2),
            day("2025-06-01", 3),
            day("2025-06-02", 0),
            day("2025-06-03", 1),
        ];
        assert_eq!(active_day_count(&days), 2);
    }

    #[test]
    fn best_performance_prefers_first_of_tied_maxima() {
        let records = vec![
            PerformanceRecord {
                label: "A".to_string(),
                score: 50.0,
            },
            PerformanceRecord {
                label: "B".to_string(),
                score: 90.0,
            },
            PerformanceRecord {
                label: "C".to_string(),
                score: 90.0,
            },
        ];
        let best = best_performance(&records).unwrap();
        assert_eq!(best.label, "B");
        assert_eq!(best.score, 90.0);
    }

    #[test]
    fn best_performance_of_empty_input_is_none() {
        assert!(best_performance(&[]).is_none());
    }
}
