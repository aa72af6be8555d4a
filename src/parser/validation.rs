use crate::error::{Result, SchedulerError};
use crate::types::{CourseId, SchedulerInput, SlotId};
use std::collections::BTreeSet;

/// Validation result with collected errors and warnings
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }
}

/// Validate the input bundle before it reaches the solver.
///
/// Malformed input is a caller-side problem: anything that would make the
/// core misbehave is an error here, softer data oddities are warnings.
pub fn validate_input(input: &SchedulerInput) -> Result<ValidationResult> {
    let mut result = ValidationResult::default();

    let known_slots = input.all_slots();
    let offered: BTreeSet<&CourseId> = input.offerings.keys().collect();

    // Every slot label must carry a parseable day prefix
    for slot in &known_slots {
        check_slot_label(slot, &mut result);
    }
    for slot in &input.non_preferred_slots {
        check_slot_label(slot, &mut result);
        if !known_slots.contains(slot) {
            result.add_warning(format!(
                "Non-preferred slot '{slot}' does not appear in any course's candidates"
            ));
        }
    }
    for (instructor, slots) in &input.busy_slots {
        for slot in slots {
            if !known_slots.contains(slot) {
                result.add_warning(format!(
                    "Busy slot '{slot}' of instructor '{instructor}' is unknown to the schedule"
                ));
            }
        }
    }

    // Classes-per-week must be explicit and positive
    for course in &offered {
        match input.classes_per_week.get(*course).copied() {
            None => result.add_error(
                SchedulerError::MissingClassesPerWeek {
                    course_id: course.to_string(),
                }
                .to_string(),
            ),
            Some(0) => result.add_error(
                SchedulerError::InvalidClassesPerWeek {
                    course_id: course.to_string(),
                    value: 0,
                }
                .to_string(),
            ),
            Some(_) => {}
        }
    }

    // Students referencing unknown courses are skipped by the model; flag
    // them so the omission is visible
    for (student, courses) in &input.enrollments {
        for course in courses {
            if !offered.contains(course) {
                result.add_warning(
                    SchedulerError::UnknownCourse {
                        student_id: student.to_string(),
                        course_id: course.to_string(),
                    }
                    .to_string(),
                );
            }
        }
    }

    // Instructor assignments for courses that are never offered
    for course in input.instructors.keys() {
        if !offered.contains(course) {
            result.add_warning(format!(
                "Instructor assignment references unknown course '{course}'"
            ));
        }
    }

    // Courses with no candidate slots fail the phase-1 pre-check later;
    // surface them early
    for course in &offered {
        if input.candidate_slots(course).is_empty() {
            result.add_warning(format!("Course '{course}' has no candidate slots"));
        }
    }

    if !result.is_valid() {
        return Err(anyhow::anyhow!(
            "Validation failed with {} errors:\n{}",
            result.errors.len(),
            result.errors.join("\n")
        ));
    }

    Ok(result)
}

fn check_slot_label(slot: &SlotId, result: &mut ValidationResult) {
    if slot.day().is_none() {
        result.add_error(
            SchedulerError::MalformedSlotLabel {
                label: slot.to_string(),
            }
            .to_string(),
        );
    }
}
