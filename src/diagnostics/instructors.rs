use crate::types::{CourseId, InstructorId, SchedulerInput};
use itertools::Itertools;
use std::fmt;

/// How tightly an instructor's demand fits their availability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSeverity {
    Ok,
    /// Demand exactly equals availability: feasible but brittle
    Warning,
    /// Demand exceeds availability: guaranteed infeasible
    Critical,
}

impl fmt::Display for LoadSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LoadSeverity::Ok => "OK",
            LoadSeverity::Warning => "WARNING",
            LoadSeverity::Critical => "CRITICAL",
        };
        write!(f, "{s}")
    }
}

/// Demand-vs-availability summary for one instructor
#[derive(Debug, Clone)]
pub struct InstructorLoad {
    pub instructor: InstructorId,
    pub courses: Vec<CourseId>,
    pub classes_needed: u32,
    pub available_slots: usize,
    pub severity: LoadSeverity,
}

/// Compute the load of every instructor with at least one assigned course.
///
/// Availability is the union of the instructor's candidate slots across all
/// of their courses, so an instructor teaching in disjoint slot pools is
/// credited with the whole pool.
pub fn instructor_loads(input: &SchedulerInput) -> Vec<InstructorLoad> {
    let mut loads = Vec::new();

    for (instructor, courses) in input.courses_by_instructor() {
        if courses.is_empty() {
            continue;
        }

        let classes_needed: u32 = courses.iter().map(|c| input.demand_or_zero(c)).sum();
        let available_slots = input.instructor_slot_union(instructor).len();

        let severity = if classes_needed as usize > available_slots {
            LoadSeverity::Critical
        } else if classes_needed as usize == available_slots {
            LoadSeverity::Warning
        } else {
            LoadSeverity::Ok
        };

        loads.push(InstructorLoad {
            instructor: instructor.clone(),
            courses: courses.iter().map(|c| (*c).clone()).collect(),
            classes_needed,
            available_slots,
            severity,
        });
    }

    loads
}

/// Phase 2 diagnostic
pub fn diagnose_instructor_conflicts(input: &SchedulerInput) -> String {
    let loads = instructor_loads(input);

    let mut lines = vec![
        "PHASE 2 FAILED: Instructor scheduling conflicts detected".to_string(),
        String::new(),
        "DETAILED CONFLICT ANALYSIS:".to_string(),
        "=".repeat(50),
    ];

    for load in &loads {
        lines.extend([
            format!("Instructor: {}", load.instructor),
            format!(
                "  Assigned Courses: {}",
                load.courses.iter().map(|c| c.to_string()).join(", ")
            ),
            format!("  Total Classes Needed: {}", load.classes_needed),
            format!("  Available Time Slots: {}", load.available_slots),
            format!("  Status: {}", load.severity),
            String::new(),
        ]);
    }

    let critical: Vec<&InstructorLoad> = loads
        .iter()
        .filter(|l| l.severity == LoadSeverity::Critical)
        .collect();

    if !critical.is_empty() {
        lines.push("CRITICAL ISSUES FOUND:".to_string());
        lines.push("-".repeat(25));
        for load in &critical {
            lines.push(format!("Redistribute courses from: {}", load.instructor));
        }
        lines.extend([
            String::new(),
            "RECOMMENDED ACTIONS:".to_string(),
            "1. Remove busy slots for overloaded instructors".to_string(),
            "2. Reassign some courses to other instructors".to_string(),
            "3. Add more time slots to the schedule".to_string(),
            "4. Reduce classes per week for some courses".to_string(),
        ]);
    }

    let unassigned: Vec<&CourseId> = input
        .offerings
        .keys()
        .filter(|c| input.instructors_for(c).is_empty())
        .collect();

    if !unassigned.is_empty() {
        lines.push(String::new());
        lines.push("COURSES WITHOUT ASSIGNED INSTRUCTORS:".to_string());
        lines.push("-".repeat(35));
        for course in unassigned {
            lines.push(course.to_string());
        }
        lines.push(String::new());
        lines.push("Action Required: Assign instructors to these courses".to_string());
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CourseOfferings, SlotId};

    fn slot(label: &str) -> SlotId {
        SlotId(label.to_string())
    }

    fn add_course(input: &mut SchedulerInput, id: &str, instructor: &str, slots: &[&str], demand: u32) {
        let mut offerings = CourseOfferings::new();
        offerings.insert(
            InstructorId(instructor.to_string()),
            slots.iter().map(|s| slot(s)).collect(),
        );
        input.offerings.insert(CourseId(id.to_string()), offerings);
        input.instructors.insert(
            CourseId(id.to_string()),
            vec![InstructorId(instructor.to_string())],
        );
        input.classes_per_week.insert(CourseId(id.to_string()), demand);
    }

    #[test]
    fn overloaded_instructor_is_critical() {
        let mut input = SchedulerInput::default();
        add_course(&mut input, "a", "p", &["Monday 9am-10am"], 1);
        add_course(&mut input, "b", "p", &["Monday 9am-10am"], 1);

        let loads = instructor_loads(&input);
        assert_eq!(loads.len(), 1);
        assert_eq!(loads[0].classes_needed, 2);
        assert_eq!(loads[0].available_slots, 1);
        assert_eq!(loads[0].severity, LoadSeverity::Critical);

        let report = diagnose_instructor_conflicts(&input);
        assert!(report.contains("Status: CRITICAL"));
        assert!(report.contains("Redistribute courses from: p"));
    }

    #[test]
    fn availability_unions_across_courses() {
        // The instructor's two courses see different slots; the union is
        // what they can actually use
        let mut input = SchedulerInput::default();
        add_course(&mut input, "a", "p", &["Monday 9am-10am"], 1);
        add_course(&mut input, "b", "p", &["Tuesday 9am-10am"], 1);

        let loads = instructor_loads(&input);
        assert_eq!(loads[0].available_slots, 2);
        assert_eq!(loads[0].severity, LoadSeverity::Warning);
    }

    #[test]
    fn lists_courses_without_instructors() {
        let mut input = SchedulerInput::default();
        let mut offerings = CourseOfferings::new();
        offerings.insert(InstructorId("p".into()), vec![slot("Monday 9am-10am")]);
        input.offerings.insert(CourseId("orphan".into()), offerings);
        input.classes_per_week.insert(CourseId("orphan".into()), 1);

        let report = diagnose_instructor_conflicts(&input);
        assert!(report.contains("COURSES WITHOUT ASSIGNED INSTRUCTORS"));
        assert!(report.contains("orphan"));
    }
}
