use crate::types::{CourseId, SchedulerInput};
use std::fmt;

/// Why a course cannot meet its weekly demand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortfallCause {
    /// The course has no availability data at all
    MissingAvailability,
    /// Fewer candidate slots than sessions demanded
    InsufficientSlots,
}

impl fmt::Display for ShortfallCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ShortfallCause::MissingAvailability => "Course not found in availability data",
            ShortfallCause::InsufficientSlots => "Insufficient time slots",
        };
        write!(f, "{s}")
    }
}

/// A course whose demand exceeds its candidate slot count
#[derive(Debug, Clone)]
pub struct DemandShortfall {
    pub course: CourseId,
    pub needed: u32,
    pub available: usize,
    pub cause: ShortfallCause,
}

/// Every course that can never satisfy the phase-1 demand constraint
pub fn demand_shortfalls(input: &SchedulerInput) -> Vec<DemandShortfall> {
    let mut shortfalls = Vec::new();

    for (course, &needed) in &input.classes_per_week {
        if !input.offerings.contains_key(course) {
            shortfalls.push(DemandShortfall {
                course: course.clone(),
                needed,
                available: 0,
                cause: ShortfallCause::MissingAvailability,
            });
            continue;
        }

        let available = input.candidate_slots(course).len();
        if needed as usize > available {
            shortfalls.push(DemandShortfall {
                course: course.clone(),
                needed,
                available,
                cause: ShortfallCause::InsufficientSlots,
            });
        }
    }

    shortfalls
}

/// Phase 1 diagnostic
pub fn diagnose_demand(input: &SchedulerInput) -> String {
    report(
        "PHASE 1 FAILED: Basic 'classes per week' constraints cannot be satisfied",
        input,
    )
}

/// Pre-solve variant of the phase 1 diagnostic, emitted before the solver
/// is ever invoked
pub fn precheck_report(input: &SchedulerInput) -> String {
    report(
        "PHASE 1 PRE-CHECK FAILED: 'classes per week' demand exceeds candidate slots",
        input,
    )
}

fn report(header: &str, input: &SchedulerInput) -> String {
    let shortfalls = demand_shortfalls(input);

    let mut lines = vec![
        header.to_string(),
        String::new(),
        "DETAILED ANALYSIS:".to_string(),
        "=".repeat(50),
    ];

    if shortfalls.is_empty() {
        lines.push(
            "No obvious course-level issues found. This may be a complex constraint interaction."
                .to_string(),
        );
    } else {
        lines.push("PROBLEM COURSES:".to_string());
        lines.push("-".repeat(20));

        for shortfall in &shortfalls {
            lines.extend([
                format!("Course: {}", shortfall.course),
                format!("  Classes needed per week: {}", shortfall.needed),
                format!("  Maximum available slots: {}", shortfall.available),
                format!("  Issue: {}", shortfall.cause),
                String::new(),
            ]);
        }

        lines.extend([
            "RECOMMENDED SOLUTIONS:".to_string(),
            "1. Add more time slots to the weekly schedule".to_string(),
            "2. Reduce classes per week for problematic courses".to_string(),
            "3. Check instructor busy slots - they may be too restrictive".to_string(),
            "4. Verify course requirements are realistic for available time".to_string(),
        ]);
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CourseOfferings, InstructorId, SlotId};

    #[test]
    fn finds_shortfall_and_missing_availability() {
        let mut input = SchedulerInput::default();
        let mut offerings = CourseOfferings::new();
        offerings.insert(
            InstructorId("p".into()),
            vec![SlotId("Monday 9am-10am".into())],
        );
        input.offerings.insert(CourseId("algo".into()), offerings);
        input.classes_per_week.insert(CourseId("algo".into()), 2);
        input.classes_per_week.insert(CourseId("ghost".into()), 1);

        let shortfalls = demand_shortfalls(&input);
        assert_eq!(shortfalls.len(), 2);

        let algo = shortfalls.iter().find(|s| s.course.0 == "algo").unwrap();
        assert_eq!(algo.needed, 2);
        assert_eq!(algo.available, 1);
        assert_eq!(algo.cause, ShortfallCause::InsufficientSlots);

        let ghost = shortfalls.iter().find(|s| s.course.0 == "ghost").unwrap();
        assert_eq!(ghost.cause, ShortfallCause::MissingAvailability);

        let text = diagnose_demand(&input);
        assert!(text.contains("Course: algo"));
        assert!(text.contains("Course: ghost"));
        assert!(text.contains("RECOMMENDED SOLUTIONS"));
    }

    #[test]
    fn satisfiable_demand_yields_no_shortfalls() {
        let mut input = SchedulerInput::default();
        let mut offerings = CourseOfferings::new();
        offerings.insert(
            InstructorId("p".into()),
            vec![
                SlotId("Monday 9am-10am".into()),
                SlotId("Tuesday 9am-10am".into()),
            ],
        );
        input.offerings.insert(CourseId("algo".into()), offerings);
        input.classes_per_week.insert(CourseId("algo".into()), 2);

        assert!(demand_shortfalls(&input).is_empty());
    }
}
