use super::{CourseId, CourseType, InstructorId, SlotId, StudentId};
use crate::error::{Result, SchedulerError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Candidate slots for one course, partitioned by assigned instructor.
///
/// Slot lists are pre-filtered: the instructor's busy slots are already
/// removed before the bundle is built.
pub type CourseOfferings = BTreeMap<InstructorId, Vec<SlotId>>;

/// Solver knobs and constraint toggles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Instructor exclusivity constraints (phase 2)
    #[serde(default = "default_true")]
    pub instructor_exclusivity: bool,
    /// Per-slot class capacity (phase 3)
    #[serde(default = "default_true")]
    pub slot_capacity: bool,
    /// Soft student clash penalties (phase 4)
    #[serde(default = "default_true")]
    pub student_conflicts: bool,
    /// Hard no-same-day constraint for multi-session courses (phase 5)
    #[serde(default = "default_true")]
    pub no_same_day: bool,
    /// Soft consecutive-day penalty (phase 6, opt-in)
    #[serde(default)]
    pub no_consecutive_days: bool,
    #[serde(default = "default_max_classes_per_slot")]
    pub max_classes_per_slot: u32,
    /// Wall-clock budget per phase, in seconds
    #[serde(default = "default_time_limit_secs")]
    pub time_limit_secs: u64,
    /// Fixed seed so repeated runs reproduce the same schedule
    #[serde(default = "default_random_seed")]
    pub random_seed: i32,
}

fn default_true() -> bool {
    true
}

fn default_max_classes_per_slot() -> u32 {
    24
}

fn default_time_limit_secs() -> u64 {
    60
}

fn default_random_seed() -> i32 {
    42
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            instructor_exclusivity: true,
            slot_capacity: true,
            student_conflicts: true,
            no_same_day: true,
            no_consecutive_days: false,
            max_classes_per_slot: default_max_classes_per_slot(),
            time_limit_secs: default_time_limit_secs(),
            random_seed: default_random_seed(),
        }
    }
}

/// All scheduling input bundled together.
///
/// Instructor lists are normalized at ingestion: a course may carry zero,
/// one, or many instructors, always as a `Vec`.
#[derive(Debug, Clone, Default)]
pub struct SchedulerInput {
    pub offerings: BTreeMap<CourseId, CourseOfferings>,
    pub enrollments: BTreeMap<StudentId, Vec<CourseId>>,
    pub instructors: BTreeMap<CourseId, Vec<InstructorId>>,
    pub classes_per_week: BTreeMap<CourseId, u32>,
    pub course_types: BTreeMap<CourseId, CourseType>,
    pub non_preferred_slots: BTreeSet<SlotId>,
    /// Explicit busy slots per instructor, used by the conflict analyzer
    pub busy_slots: BTreeMap<InstructorId, BTreeSet<SlotId>>,
    pub config: SolverConfig,
}

impl SchedulerInput {
    /// Candidate slot set of a course: the ordered union across its
    /// instructors, first occurrence wins.
    pub fn candidate_slots(&self, course: &CourseId) -> Vec<SlotId> {
        let mut seen = BTreeSet::new();
        let mut slots = Vec::new();
        if let Some(offerings) = self.offerings.get(course) {
            for instructor_slots in offerings.values() {
                for slot in instructor_slots {
                    if seen.insert(slot) {
                        slots.push(slot.clone());
                    }
                }
            }
        }
        slots
    }

    /// Every distinct slot appearing in any course's candidate set
    pub fn all_slots(&self) -> BTreeSet<SlotId> {
        self.offerings
            .values()
            .flat_map(|offerings| offerings.values())
            .flatten()
            .cloned()
            .collect()
    }

    /// Weekly session demand for a course. Explicit by contract: a missing
    /// entry is an error, not a silent default.
    pub fn demand(&self, course: &CourseId) -> Result<u32> {
        self.classes_per_week.get(course).copied().ok_or_else(|| {
            SchedulerError::MissingClassesPerWeek {
                course_id: course.to_string(),
            }
            .into()
        })
    }

    /// Demand as recorded, treating a missing entry as zero. Diagnostics
    /// report over whatever data is present rather than failing.
    pub fn demand_or_zero(&self, course: &CourseId) -> u32 {
        self.classes_per_week.get(course).copied().unwrap_or(0)
    }

    pub fn course_type(&self, course: &CourseId) -> CourseType {
        self.course_types.get(course).copied().unwrap_or_default()
    }

    /// Instructors assigned to a course; empty means unassigned
    pub fn instructors_for(&self, course: &CourseId) -> &[InstructorId] {
        self.instructors.get(course).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Invert the course -> instructors map
    pub fn courses_by_instructor(&self) -> BTreeMap<&InstructorId, Vec<&CourseId>> {
        let mut map: BTreeMap<&InstructorId, Vec<&CourseId>> = BTreeMap::new();
        for (course, instructors) in &self.instructors {
            for instructor in instructors {
                map.entry(instructor).or_default().push(course);
            }
        }
        map
    }

    /// Union of an instructor's candidate slots across all their assigned
    /// courses
    pub fn instructor_slot_union(&self, instructor: &InstructorId) -> BTreeSet<SlotId> {
        let mut slots = BTreeSet::new();
        for (course, assigned) in &self.instructors {
            if !assigned.contains(instructor) {
                continue;
            }
            if let Some(offerings) = self.offerings.get(course) {
                if let Some(instructor_slots) = offerings.get(instructor) {
                    slots.extend(instructor_slots.iter().cloned());
                }
            }
        }
        slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(id: &str) -> CourseId {
        CourseId(id.to_string())
    }

    fn slot(label: &str) -> SlotId {
        SlotId(label.to_string())
    }

    #[test]
    fn candidate_slots_union_preserves_order() {
        let mut input = SchedulerInput::default();
        let mut offerings = CourseOfferings::new();
        offerings.insert(
            InstructorId("a".into()),
            vec![slot("Monday 9am-10am"), slot("Tuesday 9am-10am")],
        );
        offerings.insert(
            InstructorId("b".into()),
            vec![slot("Tuesday 9am-10am"), slot("Wednesday 9am-10am")],
        );
        input.offerings.insert(course("algo"), offerings);

        let candidates = input.candidate_slots(&course("algo"));
        assert_eq!(
            candidates,
            vec![
                slot("Monday 9am-10am"),
                slot("Tuesday 9am-10am"),
                slot("Wednesday 9am-10am"),
            ]
        );
    }

    #[test]
    fn demand_requires_explicit_entry() {
        let mut input = SchedulerInput::default();
        input.classes_per_week.insert(course("algo"), 3);

        assert_eq!(input.demand(&course("algo")).unwrap(), 3);
        assert!(input.demand(&course("db")).is_err());
        assert_eq!(input.demand_or_zero(&course("db")), 0);
    }

    #[test]
    fn instructor_slot_union_spans_courses() {
        let mut input = SchedulerInput::default();
        let p = InstructorId("p".into());

        let mut algo = CourseOfferings::new();
        algo.insert(p.clone(), vec![slot("Monday 9am-10am")]);
        input.offerings.insert(course("algo"), algo);

        let mut db = CourseOfferings::new();
        db.insert(p.clone(), vec![slot("Tuesday 9am-10am")]);
        input.offerings.insert(course("db"), db);

        input.instructors.insert(course("algo"), vec![p.clone()]);
        input.instructors.insert(course("db"), vec![p.clone()]);

        let union = input.instructor_slot_union(&p);
        assert_eq!(union.len(), 2);
    }
}
