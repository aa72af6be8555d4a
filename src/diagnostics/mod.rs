//! Infeasibility diagnostics, one analyzer per phase.
//!
//! Every analyzer works from the scheduling inputs alone, never from solver
//! internals, so a report can always be produced after a failed solve.

mod days;
mod demand;
mod instructors;

pub use days::*;
pub use demand::*;
pub use instructors::*;

use crate::scheduler::Phase;
use crate::types::SchedulerInput;
use itertools::Itertools;

/// Produce the diagnostic report matching a failed phase
pub fn diagnose(phase: Phase, input: &SchedulerInput) -> String {
    match phase {
        Phase::Demand => diagnose_demand(input),
        Phase::InstructorExclusivity => diagnose_instructor_conflicts(input),
        Phase::SlotCapacity => diagnose_capacity(input),
        Phase::StudentConflicts => diagnose_student_conflicts(input),
        Phase::SameDay => diagnose_same_day(input),
        Phase::ConsecutiveDays => diagnose_consecutive_days(input),
    }
}

/// Fatal pre-phase report: not a single candidate slot exists
pub fn no_slots_report() -> String {
    [
        "CRITICAL ERROR: No time slots available across all courses!",
        "",
        "This usually means:",
        "- No time slots were loaded into the input bundle",
        "- All time slots are blocked by instructor busy slots",
        "- Time slot data was not ingested properly",
        "",
        "Please check the time slot configuration and try again.",
    ]
    .join("\n")
}

/// Phase 3: total demand against total slot capacity
fn diagnose_capacity(input: &SchedulerInput) -> String {
    let total_classes: u32 = input.classes_per_week.values().sum();
    let slot_count = input.all_slots().len();
    let max_per_slot = input.config.max_classes_per_slot;
    let total_capacity = slot_count as i64 * max_per_slot as i64;
    let deficit = total_classes as i64 - total_capacity;

    let mut lines = vec![
        "PHASE 3 FAILED: Time slot capacity limit exceeded".to_string(),
        String::new(),
        "DETAILED CAPACITY ANALYSIS:".to_string(),
        "=".repeat(50),
        format!("Total classes needed: {total_classes}"),
        format!("Available time slots: {slot_count}"),
        format!("Max classes per slot: {max_per_slot}"),
        format!("Total capacity: {total_capacity}"),
        format!("Capacity deficit: {deficit}"),
        String::new(),
        "COURSES REQUIRING CLASSES:".to_string(),
        "-".repeat(30),
    ];

    for (course, classes) in &input.classes_per_week {
        lines.push(format!("{course}: {classes} classes"));
    }

    lines.extend([
        String::new(),
        "RECOMMENDED SOLUTIONS:".to_string(),
        format!("1. Increase max classes per slot from {max_per_slot}"),
        "2. Add more time slots to the schedule".to_string(),
        "3. Reduce classes per week for some courses".to_string(),
        "4. Split large courses into multiple sections".to_string(),
    ]);

    lines.join("\n")
}

/// Phase 4: student clash penalties are soft, so infeasibility here points
/// at a structural problem. List the assignments so an operator can spot it.
fn diagnose_student_conflicts(input: &SchedulerInput) -> String {
    let mut lines = vec![
        "PHASE 4 FAILED: Student conflict constraints causing infeasibility".to_string(),
        String::new(),
        "ANALYSIS:".to_string(),
        "=".repeat(50),
        String::new(),
        "This is unusual since student conflict constraints are designed to be soft.".to_string(),
        "The failure suggests a deeper scheduling problem or unusual enrollment patterns.".to_string(),
        String::new(),
        "POSSIBLE CAUSES:".to_string(),
        "- Very high course overlap in student enrollments".to_string(),
        "- Limited time slot availability after instructor constraints".to_string(),
        "- Complex interaction between multiple constraint types".to_string(),
        String::new(),
        "COURSE-INSTRUCTOR ASSIGNMENTS:".to_string(),
        "-".repeat(35),
    ];

    for course in input.offerings.keys() {
        let assigned = input.instructors_for(course);
        let names = if assigned.is_empty() {
            "No instructor assigned".to_string()
        } else {
            assigned.iter().map(|p| p.to_string()).join(", ")
        };
        lines.push(format!("{course}: {names}"));
    }

    lines.extend([
        String::new(),
        "RECOMMENDED ACTIONS:".to_string(),
        "1. Review student enrollment patterns for unusual overlaps".to_string(),
        "2. Try disabling some constraint options temporarily".to_string(),
        "3. Check if instructor availability is too restrictive".to_string(),
        "4. Consider splitting high-enrollment courses".to_string(),
    ]);

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CourseId, CourseOfferings, InstructorId, SchedulerInput, SlotId};

    fn input_with_one_course() -> SchedulerInput {
        let mut input = SchedulerInput::default();
        let mut offerings = CourseOfferings::new();
        offerings.insert(
            InstructorId("p".into()),
            vec![SlotId("Monday 9am-10am".into())],
        );
        input.offerings.insert(CourseId("algo".into()), offerings);
        input
            .instructors
            .insert(CourseId("algo".into()), vec![InstructorId("p".into())]);
        input.classes_per_week.insert(CourseId("algo".into()), 3);
        input
    }

    #[test]
    fn capacity_report_carries_exact_deficit() {
        let mut input = input_with_one_course();
        input.config.max_classes_per_slot = 2;

        let report = diagnose_capacity(&input);
        assert!(report.contains("Total classes needed: 3"));
        assert!(report.contains("Total capacity: 2"));
        assert!(report.contains("Capacity deficit: 1"));
        assert!(report.contains("algo: 3 classes"));
    }

    #[test]
    fn student_conflict_report_lists_assignments() {
        let input = input_with_one_course();
        let report = diagnose_student_conflicts(&input);
        assert!(report.contains("PHASE 4 FAILED"));
        assert!(report.contains("algo: p"));
    }
}
