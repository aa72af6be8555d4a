mod hard_constraints;
mod soft_constraints;

pub use hard_constraints::*;
pub use soft_constraints::*;

use crate::types::{Schedule, SchedulerInput};

/// A hard-constraint violation found in a finished schedule
#[derive(Debug, Clone)]
pub struct Violation {
    pub constraint: String,
    pub message: String,
}

/// Residual soft-constraint quantities, the same ones the objective prices
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SoftCounts {
    pub student_clashes: usize,
    pub required_clashes: usize,
    pub non_preferred_uses: usize,
    pub consecutive_day_pairs: usize,
}

impl SoftCounts {
    /// The objective value these counts correspond to
    pub fn weighted_penalty(&self) -> f64 {
        use crate::scheduler::{
            CONSEC_CONFLICT_WEIGHT, NON_PREFERRED_WEIGHT, REQUIRED_CONFLICT_WEIGHT,
            STUDENT_CONFLICT_WEIGHT,
        };
        STUDENT_CONFLICT_WEIGHT * self.student_clashes as f64
            + REQUIRED_CONFLICT_WEIGHT * self.required_clashes as f64
            + NON_PREFERRED_WEIGHT * self.non_preferred_uses as f64
            + CONSEC_CONFLICT_WEIGHT * self.consecutive_day_pairs as f64
    }
}

/// Headline numbers for the CLI summary
#[derive(Debug, Clone)]
pub struct ScheduleStatistics {
    pub total_courses: usize,
    pub total_assignments: usize,
    pub total_students: usize,
    pub unique_slots: usize,
}

/// Result of schedule validation
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub hard_violations: Vec<Violation>,
    pub soft_counts: SoftCounts,
    pub statistics: ScheduleStatistics,
}

/// Validate a complete schedule against the inputs that produced it
pub fn validate_schedule(schedule: &Schedule, input: &SchedulerInput) -> ValidationReport {
    let mut hard_violations = Vec::new();
    hard_violations.extend(check_demand(schedule, input));
    hard_violations.extend(check_instructor_exclusivity(schedule, input));
    hard_violations.extend(check_slot_capacity(schedule, input));
    hard_violations.extend(check_same_day(schedule, input));

    let soft_counts = count_soft_violations(schedule, input);

    let statistics = ScheduleStatistics {
        total_courses: schedule.by_course().len(),
        total_assignments: schedule.len(),
        total_students: input.enrollments.len(),
        unique_slots: schedule
            .assignments
            .iter()
            .map(|a| &a.slot)
            .collect::<std::collections::BTreeSet<_>>()
            .len(),
    };

    ValidationReport {
        is_valid: hard_violations.is_empty(),
        hard_violations,
        soft_counts,
        statistics,
    }
}
