use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of activity as delivered by the backend: an ISO "YYYY-MM-DD"
/// date string and how many sessions of one kind happened that day.
/// Days with no activity are simply absent from the snapshot.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DailyActivityRecord {
    pub date: String,
    pub count: i64,
}

/// One aggregated scoring point in a chronological series, e.g. the
/// average exam score for a month bucket. Order is caller-supplied and
/// preserved everywhere downstream.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PerformanceRecord {
    pub label: String,
    pub score: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Practice,
    Exam,
}

impl ActivityKind {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "practice" => Some(ActivityKind::Practice),
            "exam" => Some(ActivityKind::Exam),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Practice => "practice",
            ActivityKind::Exam => "exam",
        }
    }
}

/// A sanitized activity day with the date parsed. Duplicates are kept
/// as-is; streak computations de-duplicate on their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveDay {
    pub date: NaiveDate,
    pub count: u32,
}

impl ActiveDay {
    pub fn to_record(&self) -> DailyActivityRecord {
        DailyActivityRecord {
            date: self.date.format("%Y-%m-%d").to_string(),
            count: self.count as i64,
        }
    }
}

pub fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Best-effort sanitization: rows with unparsable dates or negative
/// counts are dropped, never fatal. Returns the kept rows in input
/// order plus how many were dropped.
pub fn sanitize_activity(records: &[DailyActivityRecord]) -> (Vec<ActiveDay>, usize) {
    let mut kept = Vec::with_capacity(records.len());
    for record in records {
        match parse_iso_date(&record.date) {
            Some(date) if record.count >= 0 => kept.push(ActiveDay {
                date,
                count: record.count as u32,
            }),
            _ => {}
        }
    }
    let dropped = records.len() - kept.len();
    (kept, dropped)
}

/// Drops records whose score is NaN or outside the 0..=100 percentage
/// range, preserving the order of everything kept.
pub fn sanitize_performance(records: &[PerformanceRecord]) -> (Vec<PerformanceRecord>, usize) {
    let kept: Vec<PerformanceRecord> = records
        .iter()
        .filter(|r| r.score.is_finite() && (0.0..=100.0).contains(&r.score))
        .cloned()
        .collect();
    let dropped = records.len() - kept.len();
    (kept, dropped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_dates_are_dropped() {
        let records = vec![
            DailyActivityRecord {
                date: "2025-06-01".to_string(),
                count: 2,
            },
            DailyActivityRecord {
                date: "not-a-date".to_string(),
                count: 5,
            },
            DailyActivityRecord {
                date: "2025-13-40".to_string(),
                count: 1,
            },
        ];
        let (kept, dropped) = sanitize_activity(&records);
        assert_eq!(kept.len(), 1);
        assert_eq!(dropped, 2);
        assert_eq!(kept[0].count, 2);
    }

    #[test]
    fn negative_counts_are_dropped() {
        let records = vec![
            DailyActivityRecord {
                date: "2025-06-01".to_string(),
                count: -3,
            },
            DailyActivityRecord {
                date: "2025-06-02".to_string(),
                count: 0,
            },
        ];
        let (kept, dropped) = sanitize_activity(&records);
        assert_eq!(kept.len(), 1);
        assert_eq!(dropped, 1);
        assert_eq!(kept[0].count, 0);
    }

    #[test]
    fn out_of_range_scores_are_dropped() {
        let records = vec![
            PerformanceRecord {
                label: "June".to_string(),
                score: 88.5,
            },
            PerformanceRecord {
                label: "July".to_string(),
                score: 140.0,
            },
            PerformanceRecord {
                label: "August".to_string(),
                score: f64::NAN,
            },
            PerformanceRecord {
                label: "September".to_string(),
                score: 0.0,
            },
        ];
        let (kept, dropped) = sanitize_performance(&records);
        assert_eq!(dropped, 2);
        assert_eq!(kept[0].label, "June");
        assert_eq!(kept[1].label, "September");
    }

    #[test]
    fn activity_kind_round_trips_path_segments() {
        assert_eq!(ActivityKind::from_str("practice"), Some(ActivityKind::Practice));
        assert_eq!(ActivityKind::from_str("exam"), Some(ActivityKind::Exam));
        assert_eq!(ActivityKind::from_str("quiz"), None);
        assert_eq!(ActivityKind::Exam.as_str(), "exam");
    }
}
