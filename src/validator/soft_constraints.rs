use crate::types::{CourseType, Day, Schedule, SchedulerInput, SlotId};
use crate::validator::SoftCounts;
use std::collections::{BTreeMap, BTreeSet};

/// Count the residual soft violations of a finished schedule.
///
/// These are the quantities the solver's objective prices; a second run on
/// the analyzer side must find exactly the clashes the solver could not
/// eliminate.
pub fn count_soft_violations(schedule: &Schedule, input: &SchedulerInput) -> SoftCounts {
    let by_course = schedule.by_course();

    let mut student_clashes = 0;
    let mut required_clashes = 0;

    for enrolled in input.enrollments.values() {
        let mut per_slot: BTreeMap<&SlotId, usize> = BTreeMap::new();
        let mut required_per_slot: BTreeMap<&SlotId, usize> = BTreeMap::new();

        for course in enrolled {
            let required = input.course_type(course) == CourseType::Required;
            if let Some(slots) = by_course.get(course) {
                for slot in slots {
                    *per_slot.entry(*slot).or_default() += 1;
                    if required {
                        *required_per_slot.entry(*slot).or_default() += 1;
                    }
                }
            }
        }

        student_clashes += per_slot.values().filter(|&&n| n >= 2).count();
        required_clashes += required_per_slot.values().filter(|&&n| n >= 2).count();
    }

    let non_preferred_uses = schedule
        .assignments
        .iter()
        .filter(|a| input.non_preferred_slots.contains(&a.slot))
        .count();

    let mut consecutive_day_pairs = 0;
    for slots in by_course.values() {
        let days: BTreeSet<Day> = slots.iter().filter_map(|s| s.day()).collect();
        consecutive_day_pairs += Day::consecutive_pairs()
            .filter(|(d1, d2)| days.contains(d1) && days.contains(d2))
            .count();
    }

    SoftCounts {
        student_clashes,
        required_clashes,
        non_preferred_uses,
        consecutive_day_pairs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Assignment, CourseId, StudentId};

    fn assignment(course: &str, slot: &str) -> Assignment {
        Assignment {
            course: CourseId(course.to_string()),
            slot: SlotId(slot.to_string()),
        }
    }

    #[test]
    fn counts_each_soft_family() {
        let schedule = Schedule {
            assignments: vec![
                assignment("algo", "Monday 9am-10am"),
                assignment("db", "Monday 9am-10am"),
                assignment("algo", "Tuesday 9am-10am"),
            ],
            metadata: Default::default(),
        };

        let mut input = SchedulerInput::default();
        input.enrollments.insert(
            StudentId("s1".into()),
            vec![CourseId("algo".into()), CourseId("db".into())],
        );
        input
            .course_types
            .insert(CourseId("algo".into()), CourseType::Required);
        input
            .course_types
            .insert(CourseId("db".into()), CourseType::Required);
        input
            .non_preferred_slots
            .insert(SlotId("Tuesday 9am-10am".into()));

        let counts = count_soft_violations(&schedule, &input);
        assert_eq!(counts.student_clashes, 1);
        assert_eq!(counts.required_clashes, 1);
        assert_eq!(counts.non_preferred_uses, 1);
        // algo meets Monday and Tuesday
        assert_eq!(counts.consecutive_day_pairs, 1);

        let expected = 10_000.0 + 10.0 + 50.0 + 100.0;
        assert!((counts.weighted_penalty() - expected).abs() < f64::EPSILON);
    }

    #[test]
    fn clean_schedule_counts_nothing() {
        let schedule = Schedule {
            assignments: vec![
                assignment("algo", "Monday 9am-10am"),
                assignment("db", "Wednesday 9am-10am"),
            ],
            metadata: Default::default(),
        };
        let mut input = SchedulerInput::default();
        input.enrollments.insert(
            StudentId("s1".into()),
            vec![CourseId("algo".into()), CourseId("db".into())],
        );

        assert_eq!(count_soft_violations(&schedule, &input), SoftCounts::default());
    }
}
