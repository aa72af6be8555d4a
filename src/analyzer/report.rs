use crate::types::{CourseId, CourseType, SlotId, StudentId};
use serde::Serialize;

/// A course clashing with the queried one for a particular student
#[derive(Debug, Clone, Serialize)]
pub struct ConflictingCourse {
    pub course: CourseId,
    pub course_type: CourseType,
}

/// One double-booked student and the courses responsible
#[derive(Debug, Clone, Serialize)]
pub struct ConflictDetail {
    pub student: StudentId,
    pub conflicting_courses: Vec<ConflictingCourse>,
}

/// Conflict analysis of one slot the course currently occupies
#[derive(Debug, Clone, Serialize)]
pub struct SlotAnalysis {
    pub slot: SlotId,
    pub conflicts: Vec<ConflictDetail>,
    pub instructor_available: bool,
}

impl SlotAnalysis {
    pub fn is_conflict_free(&self) -> bool {
        self.conflicts.is_empty()
    }
}

/// What would happen if the course moved into a slot it does not occupy.
///
/// Slots where the instructor is unavailable are retained with an
/// `excluded_reason` so a UI can show them distinctly.
#[derive(Debug, Clone, Serialize)]
pub struct AlternativeSlot {
    pub slot: SlotId,
    pub would_conflict: Vec<ConflictDetail>,
    pub instructor_available: bool,
    pub excluded_reason: Option<String>,
}

impl AlternativeSlot {
    pub fn clash_count(&self) -> usize {
        self.would_conflict.len()
    }

    pub fn would_be_conflict_free(&self) -> bool {
        self.would_conflict.is_empty() && self.instructor_available
    }
}

/// Full analysis of one matched course
#[derive(Debug, Clone, Serialize)]
pub struct CourseReport {
    pub course: CourseId,
    pub scheduled_slots: Vec<SlotId>,
    pub enrolled_students: Vec<StudentId>,
    pub conflicted_students: Vec<StudentId>,
    pub current_slots: Vec<SlotAnalysis>,
    /// Sorted by ascending clash count; ties keep slot order
    pub alternatives: Vec<AlternativeSlot>,
}

impl CourseReport {
    /// Share of enrolled students with at least one clash, as a percentage.
    /// A course nobody takes has no conflicts, not a division error.
    pub fn conflict_rate(&self) -> f64 {
        if self.enrolled_students.is_empty() {
            0.0
        } else {
            self.conflicted_students.len() as f64 / self.enrolled_students.len() as f64 * 100.0
        }
    }

    pub fn has_conflicts(&self) -> bool {
        !self.conflicted_students.is_empty()
    }
}

/// Result of a course search query
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub found: bool,
    pub query: String,
    pub total_matches: usize,
    pub courses: Vec<CourseReport>,
    /// Up to five similarly-named courses, only populated on a miss
    pub suggestions: Vec<CourseId>,
}

/// One row of the all-courses summary table
#[derive(Debug, Clone, Serialize)]
pub struct SummaryRow {
    pub course: CourseId,
    pub scheduled_slots: Vec<SlotId>,
    pub enrolled: usize,
    pub conflicted: usize,
    pub conflict_rate: f64,
    pub has_conflicts: bool,
}
