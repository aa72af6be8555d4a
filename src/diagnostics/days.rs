use crate::types::{Day, SchedulerInput};
use itertools::Itertools;
use std::collections::BTreeSet;

/// Phase 5 diagnostic: a multi-session course needs at least as many
/// distinct days as sessions once no-same-day is in force
pub fn diagnose_same_day(input: &SchedulerInput) -> String {
    let mut lines = vec![
        "PHASE 5 FAILED: 'No same course twice on the same day' constraint".to_string(),
        String::new(),
        "ANALYSIS:".to_string(),
        "=".repeat(50),
    ];

    let multi_session: Vec<_> = input
        .classes_per_week
        .iter()
        .filter(|(_, &classes)| classes > 1)
        .collect();

    if !multi_session.is_empty() {
        lines.push("COURSES NEEDING MULTIPLE CLASSES PER WEEK:".to_string());
        lines.push("-".repeat(45));

        for (course, &classes) in multi_session {
            let available_days: BTreeSet<Day> = input
                .candidate_slots(course)
                .iter()
                .filter_map(|s| s.day())
                .collect();

            let status = if classes as usize <= available_days.len() {
                "OK"
            } else {
                "PROBLEM"
            };

            lines.extend([
                format!("Course: {course}"),
                format!("  Classes needed: {classes}"),
                format!(
                    "  Available days: {} ({})",
                    available_days.len(),
                    available_days.iter().map(|d| d.name()).join(", ")
                ),
                format!("  Status: {status}"),
                String::new(),
            ]);
        }
    }

    lines.extend([
        "RECOMMENDED SOLUTIONS:".to_string(),
        "1. Add time slots on different days of the week".to_string(),
        "2. Review instructor busy slots - some may block entire days".to_string(),
        "3. Reduce classes per week for problematic courses".to_string(),
        "4. Consider disabling the 'same day' constraint if flexible scheduling is acceptable"
            .to_string(),
    ]);

    lines.join("\n")
}

/// Phase 6 diagnostic: lay out which days exist and which adjacent pairs
/// force a multi-session course onto consecutive days
pub fn diagnose_consecutive_days(input: &SchedulerInput) -> String {
    let available_days: BTreeSet<Day> = input
        .all_slots()
        .iter()
        .filter_map(|s| s.day())
        .collect();

    let multi_session_count = input
        .classes_per_week
        .values()
        .filter(|&&classes| classes > 1)
        .count();

    let mut lines = vec![
        "PHASE 6 FAILED: 'No consecutive days' constraint".to_string(),
        String::new(),
        "ANALYSIS:".to_string(),
        "=".repeat(50),
        format!(
            "Available days in schedule: {}",
            available_days.iter().map(|d| d.name()).join(", ")
        ),
        format!("Total courses needing multiple classes: {multi_session_count}"),
        String::new(),
        "CONSECUTIVE DAY ANALYSIS:".to_string(),
        "-".repeat(30),
    ];

    let consecutive: Vec<(Day, Day)> = Day::consecutive_pairs()
        .filter(|(d1, d2)| available_days.contains(d1) && available_days.contains(d2))
        .collect();

    if consecutive.is_empty() {
        lines.push("No consecutive days available - this may not be the issue".to_string());
    } else {
        lines.push("Consecutive day pairs available:".to_string());
        for (d1, d2) in consecutive {
            lines.push(format!("  {d1} -> {d2}"));
        }
    }

    lines.extend([
        String::new(),
        "RECOMMENDED SOLUTIONS:".to_string(),
        "1. Add time slots on non-consecutive days (e.g., Monday, Wednesday, Friday)".to_string(),
        "2. Consider disabling the 'consecutive days' constraint".to_string(),
        "3. Review instructor availability across different days".to_string(),
        "4. Reduce classes per week requirements where possible".to_string(),
    ]);

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CourseId, CourseOfferings, InstructorId, SlotId};

    fn one_day_course() -> SchedulerInput {
        let mut input = SchedulerInput::default();
        let mut offerings = CourseOfferings::new();
        offerings.insert(
            InstructorId("p".into()),
            vec![
                SlotId("Monday 9am-10am".into()),
                SlotId("Monday 10am-11am".into()),
            ],
        );
        input.offerings.insert(CourseId("algo".into()), offerings);
        input.classes_per_week.insert(CourseId("algo".into()), 2);
        input
    }

    #[test]
    fn flags_course_with_too_few_days() {
        let report = diagnose_same_day(&one_day_course());
        assert!(report.contains("Course: algo"));
        assert!(report.contains("Available days: 1 (Monday)"));
        assert!(report.contains("Status: PROBLEM"));
    }

    #[test]
    fn consecutive_report_lists_adjacent_pairs() {
        let mut input = one_day_course();
        let mut offerings = CourseOfferings::new();
        offerings.insert(
            InstructorId("q".into()),
            vec![SlotId("Tuesday 9am-10am".into())],
        );
        input.offerings.insert(CourseId("db".into()), offerings);
        input.classes_per_week.insert(CourseId("db".into()), 1);

        let report = diagnose_consecutive_days(&input);
        assert!(report.contains("Available days in schedule: Monday, Tuesday"));
        assert!(report.contains("Monday -> Tuesday"));
    }

    #[test]
    fn consecutive_report_without_adjacent_days() {
        let mut input = SchedulerInput::default();
        let mut offerings = CourseOfferings::new();
        offerings.insert(
            InstructorId("p".into()),
            vec![
                SlotId("Monday 9am-10am".into()),
                SlotId("Wednesday 9am-10am".into()),
            ],
        );
        input.offerings.insert(CourseId("algo".into()), offerings);
        input.classes_per_week.insert(CourseId("algo".into()), 2);

        let report = diagnose_consecutive_days(&input);
        assert!(report.contains("No consecutive days available"));
    }
}
