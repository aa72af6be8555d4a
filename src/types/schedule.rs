use super::{CourseId, SlotId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One scheduled session: a course meeting in a slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub course: CourseId,
    pub slot: SlotId,
}

/// Metadata about a generated schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleMetadata {
    pub generated_at: String,
    pub solver_version: String,
    /// Name of the last phase that produced this schedule
    pub last_phase: String,
    pub solve_time_ms: u64,
}

impl Default for ScheduleMetadata {
    fn default() -> Self {
        Self {
            generated_at: String::new(),
            solver_version: String::new(),
            last_phase: String::new(),
            solve_time_ms: 0,
        }
    }
}

/// The finalized weekly timetable.
///
/// A course appears once per weekly session, so the multiplicity of a
/// course equals its classes-per-week demand.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schedule {
    pub assignments: Vec<Assignment>,
    pub metadata: ScheduleMetadata,
}

impl Schedule {
    /// An empty schedule, used as the failure-side output
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Slots assigned to one course, in assignment order
    pub fn slots_for_course(&self, course: &CourseId) -> Vec<&SlotId> {
        self.assignments
            .iter()
            .filter(|a| &a.course == course)
            .map(|a| &a.slot)
            .collect()
    }

    /// Group assignments by course
    pub fn by_course(&self) -> BTreeMap<&CourseId, Vec<&SlotId>> {
        let mut map: BTreeMap<&CourseId, Vec<&SlotId>> = BTreeMap::new();
        for a in &self.assignments {
            map.entry(&a.course).or_default().push(&a.slot);
        }
        map
    }

    /// Courses scheduled in a given slot
    pub fn courses_in_slot(&self, slot: &SlotId) -> Vec<&CourseId> {
        self.assignments
            .iter()
            .filter(|a| &a.slot == slot)
            .map(|a| &a.course)
            .collect()
    }
}
