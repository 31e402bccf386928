use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use chrono::Datelike;
use csv::Reader;
use tracing::{info, warn};

use crate::records::{parse_iso_date, ActiveDay, ActivityKind, PerformanceRecord};
use crate::store::{Classroom, SnapshotStore};

/// Roster served until a real classroom backend is wired in.
pub fn demo_classrooms() -> Vec<Classroom> {
    vec![
        Classroom {
            id: "algebra-1".to_string(),
            name: "Algebra I".to_string(),
            subject: "Mathematics".to_string(),
        },
        Classroom {
            id: "biology-2".to_string(),
            name: "Biology II".to_string(),
            subject: "Science".to_string(),
        },
        Classroom {
            id: "world-history".to_string(),
            name: "World History".to_string(),
            subject: "History".to_string(),
        },
    ]
}

fn parse_activity_row(record: &csv::StringRecord) -> Option<(String, ActiveDay)> {
    let classroom = record.get(0)?.trim();
    let date = parse_iso_date(record.get(1)?.trim())?;
    let count: i64 = record.get(2)?.trim().parse().ok()?;
    if classroom.is_empty() || count < 0 {
        return None;
    }
    Some((
        classroom.to_string(),
        ActiveDay {
            date,
            count: count as u32,
        },
    ))
}

fn parse_performance_row(record: &csv::StringRecord) -> Option<(String, i32, PerformanceRecord)> {
    let classroom = record.get(0)?.trim();
    let year: i32 = record.get(1)?.trim().parse().ok()?;
    let label = record.get(2)?.trim();
    let score: f64 = record.get(3)?.trim().parse().ok()?;
    if classroom.is_empty() || label.is_empty() || !(0.0..=100.0).contains(&score) {
        return None;
    }
    Some((
        classroom.to_string(),
        year,
        PerformanceRecord {
            label: label.to_string(),
            score,
        },
    ))
}

/// Reads `classroom,date,count` rows and groups them into per-year
/// snapshots. Rows that fail to parse are skipped, not fatal.
pub fn load_activity(path: &Path) -> anyhow::Result<HashMap<(String, i32), Vec<ActiveDay>>> {
    let mut rdr = Reader::from_path(path)
        .with_context(|| format!("failed to open activity log {}", path.display()))?;

    let mut snapshots: HashMap<(String, i32), Vec<ActiveDay>> = HashMap::new();
    let mut skipped = 0;
    for result in rdr.records() {
        let record = result.with_context(|| format!("bad CSV in {}", path.display()))?;
        match parse_activity_row(&record) {
            Some((classroom, day)) => snapshots
                .entry((classroom, day.date.year()))
                .or_default()
                .push(day),
            None => skipped += 1,
        }
    }
    if skipped > 0 {
        warn!(skipped, path = %path.display(), "skipped unparsable activity rows");
    }
    Ok(snapshots)
}

/// Reads `classroom,year,label,score` rows, preserving file order
/// within each snapshot so the chart series stays chronological.
pub fn load_performance(
    path: &Path,
) -> anyhow::Result<HashMap<(String, i32), Vec<PerformanceRecord>>> {
    let mut rdr = Reader::from_path(path)
        .with_context(|| format!("failed to open score log {}", path.display()))?;

    let mut snapshots: HashMap<(String, i32), Vec<PerformanceRecord>> = HashMap::new();
    let mut skipped = 0;
    for result in rdr.records() {
        let record = result.with_context(|| format!("bad CSV in {}", path.display()))?;
        match parse_performance_row(&record) {
            Some((classroom, year, performance)) => snapshots
                .entry((classroom, year))
                .or_default()
                .push(performance),
            None => skipped += 1,
        }
    }
    if skipped > 0 {
        warn!(skipped, path = %path.display(), "skipped unparsable score rows");
    }
    Ok(snapshots)
}

/// Seeds the store with the demo roster and whatever CSV logs are
/// shipped next to the binary. Missing files just mean an empty start.
pub fn seed_store(store: &SnapshotStore) -> anyhow::Result<()> {
    for classroom in demo_classrooms() {
        store.register_classroom(classroom);
    }

    seed_activity(store, Path::new("data/practice_log.csv"), ActivityKind::Practice)?;
    seed_activity(store, Path::new("data/exam_log.csv"), ActivityKind::Exam)?;
    seed_performance(store, Path::new("data/exam_scores.csv"))?;
    Ok(())
}

fn seed_activity(store: &SnapshotStore, path: &Path, kind: ActivityKind) -> anyhow::Result<()> {
    if !path.exists() {
        info!(path = %path.display(), "no seed file, skipping");
        return Ok(());
    }
    let snapshots = load_activity(path)?;
    for ((classroom, year), days) in snapshots {
        if !store.has_classroom(&classroom) {
            warn!(%classroom, "activity rows for unknown classroom, dropped");
            continue;
        }
        info!(%classroom, year, kind = kind.as_str(), rows = days.len(), "seeded activity snapshot");
        store.replace_activity(&classroom, year, kind, days);
    }
    Ok(())
}

fn seed_performance(store: &SnapshotStore, path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        info!(path = %path.display(), "no seed file, skipping");
        return Ok(());
    }
    let snapshots = load_performance(path)?;
    for ((classroom, year), records) in snapshots {
        if !store.has_classroom(&classroom) {
            warn!(%classroom, "score rows for unknown classroom, dropped");
            continue;
        }
        info!(%classroom, year, rows = records.len(), "seeded performance snapshot");
        store.replace_performance(&classroom, year, records);
    }
    Ok(())
}
