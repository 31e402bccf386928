use std::collections::HashMap;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::records::{ActiveDay, ActivityKind, PerformanceRecord};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Classroom {
    pub id: String,
    pub name: String,
    pub subject: String,
}

/// In-memory snapshot store. Snapshots are read-only once written: a
/// new fetch for the same (classroom, year) replaces the old one whole,
/// it never patches it in place.
#[derive(Default)]
pub struct SnapshotStore {
    classrooms: RwLock<Vec<Classroom>>,
    activity: RwLock<HashMap<(String, i32, ActivityKind), Vec<ActiveDay>>>,
    performance: RwLock<HashMap<(String, i32), Vec<PerformanceRecord>>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_classroom(&self, classroom: Classroom) {
        let mut classrooms = self.classrooms.write().expect("classroom lock poisoned");
        if !classrooms.iter().any(|c| c.id == classroom.id) {
            classrooms.push(classroom);
        }
    }

    pub fn classrooms(&self) -> Vec<Classroom> {
        self.classrooms
            .read()
            .expect("classroom lock poisoned")
            .clone()
    }

    pub fn has_classroom(&self, id: &str) -> bool {
        self.classrooms
            .read()
            .expect("classroom lock poisoned")
            .iter()
            .any(|c| c.id == id)
    }

    pub fn replace_activity(
        &self,
        classroom: &str,
        year: i32,
        kind: ActivityKind,
        days: Vec<ActiveDay>,
    ) {
        self.activity
            .write()
            .expect("activity lock poisoned")
            .insert((classroom.to_string(), year, kind), days);
    }

    pub fn activity(&self, classroom: &str, year: i32, kind: ActivityKind) -> Vec<ActiveDay> {
        self.activity
            .read()
            .expect("activity lock poisoned")
            .get(&(classroom.to_string(), year, kind))
            .cloned()
            .unwrap_or_default()
    }

    pub fn replace_performance(&self, classroom: &str, year: i32, records: Vec<PerformanceRecord>) {
        self.performance
            .write()
            .expect("performance lock poisoned")
            .insert((classroom.to_string(), year), records);
    }

    pub fn performance(&self, classroom: &str, year: i32) -> Vec<PerformanceRecord> {
        self.performance
            .read()
            .expect("performance lock poisoned")
            .get(&(classroom.to_string(), year))
            .cloned()
            .unwrap_or_default()
    }
}
