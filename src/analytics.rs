use serde::{Deserialize, Serialize};

use crate::records::PerformanceRecord;

/// Parallel label/score vectors ready for the dashboard chart, in the
/// same chronological order the records arrived in.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PerformanceChart {
    pub labels: Vec<String>,
    pub scores: Vec<f64>,
}

pub fn chart_series(records: &[PerformanceRecord]) -> PerformanceChart {
    let labels: Vec<String> = records.iter().map(|r| r.label.clone()).collect();
    let scores: Vec<f64> = records.iter().map(|r| r.score).collect();
    PerformanceChart { labels, scores }
}

// Dead band of five score points so ordinary noise reads as "Stable".
const TREND_BAND: f64 = 5.0;

pub fn determine_trend(records: &[PerformanceRecord]) -> String {
    if records.len() < 2 {
        return "Stable".to_string();
    }
    let first = records[0].score;
    let last = records[records.len() - 1].score;
    if last > first + TREND_BAND {
        "Improving".to_string()
    } else if last < first - TREND_BAND {
        "Declining".to_string()
    } else {
        "Stable".to_string()
    }
}
