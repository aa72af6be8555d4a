use crate::types::{Day, Schedule, SchedulerInput, SlotId};
use crate::validator::Violation;
use std::collections::BTreeMap;

/// Every course must meet exactly its classes-per-week demand
pub fn check_demand(schedule: &Schedule, input: &SchedulerInput) -> Vec<Violation> {
    let mut violations = Vec::new();
    let by_course = schedule.by_course();

    for (course, &needed) in &input.classes_per_week {
        let scheduled = by_course.get(course).map(|slots| slots.len()).unwrap_or(0);
        if scheduled != needed as usize {
            violations.push(Violation {
                constraint: "ClassesPerWeek".to_string(),
                message: format!(
                    "Course '{course}' scheduled {scheduled} times, needs {needed}"
                ),
            });
        }
    }

    violations
}

/// No instructor teaches two courses in the same slot
pub fn check_instructor_exclusivity(
    schedule: &Schedule,
    input: &SchedulerInput,
) -> Vec<Violation> {
    let mut violations = Vec::new();
    if !input.config.instructor_exclusivity {
        return violations;
    }

    let mut seen: BTreeMap<(&str, &SlotId), &str> = BTreeMap::new();
    for assignment in &schedule.assignments {
        for instructor in input.instructors_for(&assignment.course) {
            let key = (instructor.0.as_str(), &assignment.slot);
            if let Some(other) = seen.insert(key, assignment.course.0.as_str()) {
                violations.push(Violation {
                    constraint: "InstructorExclusivity".to_string(),
                    message: format!(
                        "Instructor '{instructor}' double-booked at '{}': '{other}' and '{}'",
                        assignment.slot, assignment.course
                    ),
                });
            }
        }
    }

    violations
}

/// No slot holds more classes than the configured capacity
pub fn check_slot_capacity(schedule: &Schedule, input: &SchedulerInput) -> Vec<Violation> {
    let mut violations = Vec::new();
    if !input.config.slot_capacity {
        return violations;
    }

    let mut counts: BTreeMap<&SlotId, usize> = BTreeMap::new();
    for assignment in &schedule.assignments {
        *counts.entry(&assignment.slot).or_default() += 1;
    }

    let max = input.config.max_classes_per_slot as usize;
    for (slot, count) in counts {
        if count > max {
            violations.push(Violation {
                constraint: "SlotCapacity".to_string(),
                message: format!("Slot '{slot}' holds {count} classes, capacity is {max}"),
            });
        }
    }

    violations
}

/// No course meets twice on the same day, when that constraint is on
pub fn check_same_day(schedule: &Schedule, input: &SchedulerInput) -> Vec<Violation> {
    let mut violations = Vec::new();
    if !input.config.no_same_day {
        return violations;
    }

    for (course, slots) in schedule.by_course() {
        let mut per_day: BTreeMap<Day, usize> = BTreeMap::new();
        for slot in slots {
            if let Some(day) = slot.day() {
                *per_day.entry(day).or_default() += 1;
            }
        }
        for (day, count) in per_day {
            if count > 1 {
                violations.push(Violation {
                    constraint: "NoSameDay".to_string(),
                    message: format!("Course '{course}' meets {count} times on {day}"),
                });
            }
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Assignment, CourseId, InstructorId};

    fn assignment(course: &str, slot: &str) -> Assignment {
        Assignment {
            course: CourseId(course.to_string()),
            slot: SlotId(slot.to_string()),
        }
    }

    #[test]
    fn detects_demand_mismatch() {
        let schedule = Schedule {
            assignments: vec![assignment("algo", "Monday 9am-10am")],
            metadata: Default::default(),
        };
        let mut input = SchedulerInput::default();
        input.classes_per_week.insert(CourseId("algo".into()), 2);

        let violations = check_demand(&schedule, &input);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("scheduled 1 times, needs 2"));
    }

    #[test]
    fn detects_instructor_double_booking() {
        let schedule = Schedule {
            assignments: vec![
                assignment("algo", "Monday 9am-10am"),
                assignment("db", "Monday 9am-10am"),
            ],
            metadata: Default::default(),
        };
        let mut input = SchedulerInput::default();
        input
            .instructors
            .insert(CourseId("algo".into()), vec![InstructorId("p".into())]);
        input
            .instructors
            .insert(CourseId("db".into()), vec![InstructorId("p".into())]);

        let violations = check_instructor_exclusivity(&schedule, &input);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("double-booked"));
    }

    #[test]
    fn detects_same_day_repeat() {
        let schedule = Schedule {
            assignments: vec![
                assignment("algo", "Monday 9am-10am"),
                assignment("algo", "Monday 10am-11am"),
            ],
            metadata: Default::default(),
        };
        let input = SchedulerInput::default();

        let violations = check_same_day(&schedule, &input);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("Monday"));
    }

    #[test]
    fn capacity_check_respects_limit() {
        let schedule = Schedule {
            assignments: vec![
                assignment("a", "Monday 9am-10am"),
                assignment("b", "Monday 9am-10am"),
            ],
            metadata: Default::default(),
        };
        let mut input = SchedulerInput::default();
        input.config.max_classes_per_slot = 1;

        let violations = check_slot_capacity(&schedule, &input);
        assert_eq!(violations.len(), 1);

        input.config.max_classes_per_slot = 2;
        assert!(check_slot_capacity(&schedule, &input).is_empty());
    }
}
