//! Read-side conflict analysis over a finalized schedule.
//!
//! The analyzer is a snapshot: it never mutates the schedule, and the two
//! ignore toggles affect only the instructor availability check.

mod report;

pub use report::*;

use crate::types::{
    CourseId, CourseType, InstructorId, Schedule, SchedulerInput, SlotId, StudentId,
};
use std::collections::{BTreeMap, BTreeSet};

pub struct ConflictAnalyzer {
    /// course -> slots it currently occupies
    schedule: BTreeMap<CourseId, Vec<SlotId>>,
    enrollments: BTreeMap<StudentId, Vec<CourseId>>,
    instructors: BTreeMap<CourseId, Vec<InstructorId>>,
    busy_slots: BTreeMap<InstructorId, BTreeSet<SlotId>>,
    course_types: BTreeMap<CourseId, CourseType>,
    /// student -> slot -> scheduled courses the student takes in that slot
    student_slots: BTreeMap<StudentId, BTreeMap<SlotId, Vec<CourseId>>>,
    ignore_busy_slots: bool,
    ignore_teaching_conflicts: bool,
}

impl ConflictAnalyzer {
    pub fn new(schedule: &Schedule, input: &SchedulerInput) -> Self {
        let by_course: BTreeMap<CourseId, Vec<SlotId>> = schedule
            .by_course()
            .into_iter()
            .map(|(c, slots)| (c.clone(), slots.into_iter().cloned().collect()))
            .collect();

        let mut student_slots: BTreeMap<StudentId, BTreeMap<SlotId, Vec<CourseId>>> =
            BTreeMap::new();
        for (student, courses) in &input.enrollments {
            let slots = student_slots.entry(student.clone()).or_default();
            for course in courses {
                if let Some(scheduled) = by_course.get(course) {
                    for slot in scheduled {
                        slots.entry(slot.clone()).or_default().push(course.clone());
                    }
                }
            }
        }

        Self {
            schedule: by_course,
            enrollments: input.enrollments.clone(),
            instructors: input.instructors.clone(),
            busy_slots: input.busy_slots.clone(),
            course_types: input.course_types.clone(),
            student_slots,
            ignore_busy_slots: false,
            ignore_teaching_conflicts: false,
        }
    }

    pub fn set_ignore_busy_slots(&mut self, ignore: bool) {
        self.ignore_busy_slots = ignore;
    }

    pub fn set_ignore_teaching_conflicts(&mut self, ignore: bool) {
        self.ignore_teaching_conflicts = ignore;
    }

    pub fn ignore_busy_slots(&self) -> bool {
        self.ignore_busy_slots
    }

    pub fn ignore_teaching_conflicts(&self) -> bool {
        self.ignore_teaching_conflicts
    }

    /// Case-insensitive substring search over scheduled course ids.
    ///
    /// An empty query matches every course. On a miss, up to five courses
    /// sharing a query token are suggested.
    pub fn search(&self, query: &str) -> SearchResult {
        let needle = query.to_lowercase();
        let matches: Vec<&CourseId> = self
            .schedule
            .keys()
            .filter(|c| c.0.to_lowercase().contains(&needle))
            .collect();

        if matches.is_empty() {
            return SearchResult {
                found: false,
                query: query.to_string(),
                total_matches: 0,
                courses: Vec::new(),
                suggestions: self.suggestions(query),
            };
        }

        let courses: Vec<CourseReport> = matches
            .iter()
            .filter_map(|c| self.course_report(c))
            .collect();

        SearchResult {
            found: true,
            query: query.to_string(),
            total_matches: courses.len(),
            courses,
            suggestions: Vec::new(),
        }
    }

    /// Full conflict report for a scheduled course
    pub fn course_report(&self, course: &CourseId) -> Option<CourseReport> {
        let scheduled_slots = self.schedule.get(course)?.clone();

        let enrolled_students: Vec<StudentId> = self
            .enrollments
            .iter()
            .filter(|(_, courses)| courses.contains(course))
            .map(|(student, _)| student.clone())
            .collect();

        let current_slots: Vec<SlotAnalysis> = scheduled_slots
            .iter()
            .map(|slot| self.analyze_current_slot(course, slot, &enrolled_students))
            .collect();

        let mut conflicted: BTreeSet<StudentId> = BTreeSet::new();
        for analysis in &current_slots {
            conflicted.extend(analysis.conflicts.iter().map(|c| c.student.clone()));
        }

        let mut alternatives: Vec<AlternativeSlot> = self
            .all_slots()
            .into_iter()
            .filter(|slot| !scheduled_slots.contains(slot))
            .map(|slot| self.analyze_alternative_slot(course, slot, &enrolled_students))
            .collect();
        alternatives.sort_by_key(AlternativeSlot::clash_count);

        Some(CourseReport {
            course: course.clone(),
            scheduled_slots,
            enrolled_students,
            conflicted_students: conflicted.into_iter().collect(),
            current_slots,
            alternatives,
        })
    }

    /// One row per scheduled course, worst conflicts first
    pub fn summary(&self) -> Vec<SummaryRow> {
        let mut rows: Vec<SummaryRow> = self
            .schedule
            .keys()
            .filter_map(|course| self.course_report(course))
            .map(|report| SummaryRow {
                course: report.course.clone(),
                scheduled_slots: report.scheduled_slots.clone(),
                enrolled: report.enrolled_students.len(),
                conflicted: report.conflicted_students.len(),
                conflict_rate: report.conflict_rate(),
                has_conflicts: report.has_conflicts(),
            })
            .collect();
        rows.sort_by(|a, b| b.conflicted.cmp(&a.conflicted));
        rows
    }

    /// Whether every assigned instructor of a course is free in a slot.
    ///
    /// Checks the explicit busy set and the instructor's own teaching
    /// schedule; each check has an independent ignore toggle.
    pub fn instructor_available(&self, course: &CourseId, slot: &SlotId) -> bool {
        if self.instructors.is_empty() {
            return true;
        }
        let assigned = match self.instructors.get(course) {
            Some(assigned) if !assigned.is_empty() => assigned,
            _ => return true,
        };

        for instructor in assigned {
            if !self.ignore_busy_slots {
                if let Some(busy) = self.busy_slots.get(instructor) {
                    if busy.contains(slot) {
                        return false;
                    }
                }
            }

            if !self.ignore_teaching_conflicts {
                for (other_course, other_assigned) in &self.instructors {
                    if other_course == course || !other_assigned.contains(instructor) {
                        continue;
                    }
                    if let Some(slots) = self.schedule.get(other_course) {
                        if slots.contains(slot) {
                            return false;
                        }
                    }
                }
            }
        }

        true
    }

    fn analyze_current_slot(
        &self,
        course: &CourseId,
        slot: &SlotId,
        enrolled: &[StudentId],
    ) -> SlotAnalysis {
        let mut conflicts = Vec::new();

        for student in enrolled {
            let slot_courses = self
                .student_slots
                .get(student)
                .and_then(|slots| slots.get(slot));
            if let Some(slot_courses) = slot_courses {
                let others: Vec<ConflictingCourse> = slot_courses
                    .iter()
                    .filter(|c| *c != course)
                    .map(|c| self.conflicting_course(c))
                    .collect();
                if !others.is_empty() {
                    conflicts.push(ConflictDetail {
                        student: student.clone(),
                        conflicting_courses: others,
                    });
                }
            }
        }

        SlotAnalysis {
            slot: slot.clone(),
            conflicts,
            instructor_available: self.instructor_available(course, slot),
        }
    }

    fn analyze_alternative_slot(
        &self,
        course: &CourseId,
        slot: SlotId,
        enrolled: &[StudentId],
    ) -> AlternativeSlot {
        let mut would_conflict = Vec::new();

        for student in enrolled {
            let existing = self
                .student_slots
                .get(student)
                .and_then(|slots| slots.get(&slot));
            if let Some(existing) = existing {
                if !existing.is_empty() {
                    would_conflict.push(ConflictDetail {
                        student: student.clone(),
                        conflicting_courses: existing
                            .iter()
                            .map(|c| self.conflicting_course(c))
                            .collect(),
                    });
                }
            }
        }

        let instructor_available = self.instructor_available(course, &slot);
        AlternativeSlot {
            slot,
            would_conflict,
            instructor_available,
            excluded_reason: (!instructor_available).then(|| "Professor unavailable".to_string()),
        }
    }

    fn conflicting_course(&self, course: &CourseId) -> ConflictingCourse {
        ConflictingCourse {
            course: course.clone(),
            course_type: self
                .course_types
                .get(course)
                .copied()
                .unwrap_or(CourseType::Unknown),
        }
    }

    /// Every slot in use anywhere in the schedule, sorted
    fn all_slots(&self) -> Vec<SlotId> {
        let set: BTreeSet<SlotId> = self.schedule.values().flatten().cloned().collect();
        set.into_iter().collect()
    }

    fn suggestions(&self, query: &str) -> Vec<CourseId> {
        let tokens: Vec<String> = query
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect();

        self.schedule
            .keys()
            .filter(|course| {
                let lower = course.0.to_lowercase();
                tokens.iter().any(|t| lower.contains(t))
            })
            .take(5)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Assignment, Schedule};
    use proptest::prelude::*;

    fn course(id: &str) -> CourseId {
        CourseId(id.to_string())
    }

    fn slot(label: &str) -> SlotId {
        SlotId(label.to_string())
    }

    fn schedule_of(entries: &[(&str, &str)]) -> Schedule {
        Schedule {
            assignments: entries
                .iter()
                .map(|(c, s)| Assignment {
                    course: course(c),
                    slot: slot(s),
                })
                .collect(),
            metadata: Default::default(),
        }
    }

    fn enrollment_input(entries: &[(&str, &[&str])]) -> SchedulerInput {
        let mut input = SchedulerInput::default();
        for (student, courses) in entries {
            input.enrollments.insert(
                StudentId(student.to_string()),
                courses.iter().map(|c| course(c)).collect(),
            );
        }
        input
    }

    #[test]
    fn finds_clash_in_shared_slot() {
        let schedule = schedule_of(&[("Algo", "Monday 9am-10am"), ("DB", "Monday 9am-10am")]);
        let input = enrollment_input(&[("s1", &["Algo", "DB"]), ("s2", &["Algo"])]);
        let analyzer = ConflictAnalyzer::new(&schedule, &input);

        let result = analyzer.search("algo");
        assert!(result.found);
        assert_eq!(result.total_matches, 1);

        let report = &result.courses[0];
        assert_eq!(report.course, course("Algo"));
        assert_eq!(report.enrolled_students.len(), 2);
        assert_eq!(report.conflicted_students, vec![StudentId("s1".into())]);
        assert!((report.conflict_rate() - 50.0).abs() < f64::EPSILON);

        let current = &report.current_slots[0];
        assert_eq!(current.conflicts.len(), 1);
        assert_eq!(current.conflicts[0].student, StudentId("s1".into()));
        assert_eq!(
            current.conflicts[0].conflicting_courses[0].course,
            course("DB")
        );
        assert_eq!(
            current.conflicts[0].conflicting_courses[0].course_type,
            CourseType::Unknown
        );
    }

    #[test]
    fn teaching_conflict_excludes_alternative_slot() {
        let schedule = schedule_of(&[("Algo", "Monday 9am-10am"), ("DB", "Monday 10am-11am")]);
        let mut input = enrollment_input(&[]);
        input
            .instructors
            .insert(course("Algo"), vec![InstructorId("p".into())]);
        input
            .instructors
            .insert(course("DB"), vec![InstructorId("p".into())]);

        let mut analyzer = ConflictAnalyzer::new(&schedule, &input);

        let report = analyzer.course_report(&course("Algo")).unwrap();
        let alt = report
            .alternatives
            .iter()
            .find(|a| a.slot == slot("Monday 10am-11am"))
            .unwrap();
        assert!(!alt.instructor_available);
        assert_eq!(alt.excluded_reason.as_deref(), Some("Professor unavailable"));

        analyzer.set_ignore_teaching_conflicts(true);
        let report = analyzer.course_report(&course("Algo")).unwrap();
        let alt = report
            .alternatives
            .iter()
            .find(|a| a.slot == slot("Monday 10am-11am"))
            .unwrap();
        assert!(alt.instructor_available);
        assert!(alt.excluded_reason.is_none());
    }

    #[test]
    fn busy_slot_respects_its_ignore_toggle() {
        let schedule = schedule_of(&[("Algo", "Monday 9am-10am"), ("DB", "Monday 10am-11am")]);
        let mut input = enrollment_input(&[]);
        input
            .instructors
            .insert(course("Algo"), vec![InstructorId("p".into())]);
        input.busy_slots.insert(
            InstructorId("p".into()),
            [slot("Monday 10am-11am")].into_iter().collect(),
        );

        let mut analyzer = ConflictAnalyzer::new(&schedule, &input);
        assert!(!analyzer.instructor_available(&course("Algo"), &slot("Monday 10am-11am")));

        analyzer.set_ignore_busy_slots(true);
        assert!(analyzer.instructor_available(&course("Algo"), &slot("Monday 10am-11am")));
    }

    #[test]
    fn both_toggles_make_everything_available() {
        let schedule = schedule_of(&[("Algo", "Monday 9am-10am"), ("DB", "Monday 9am-10am")]);
        let mut input = enrollment_input(&[]);
        input
            .instructors
            .insert(course("Algo"), vec![InstructorId("p".into())]);
        input
            .instructors
            .insert(course("DB"), vec![InstructorId("p".into())]);
        input.busy_slots.insert(
            InstructorId("p".into()),
            [slot("Monday 9am-10am")].into_iter().collect(),
        );

        let mut analyzer = ConflictAnalyzer::new(&schedule, &input);
        analyzer.set_ignore_busy_slots(true);
        analyzer.set_ignore_teaching_conflicts(true);
        assert!(analyzer.ignore_busy_slots());
        assert!(analyzer.ignore_teaching_conflicts());
        assert!(analyzer.instructor_available(&course("Algo"), &slot("Monday 9am-10am")));
    }

    #[test]
    fn unassigned_course_is_always_available() {
        let schedule = schedule_of(&[("Algo", "Monday 9am-10am"), ("DB", "Monday 10am-11am")]);
        let mut input = enrollment_input(&[]);
        input
            .instructors
            .insert(course("DB"), vec![InstructorId("p".into())]);

        let analyzer = ConflictAnalyzer::new(&schedule, &input);
        assert!(analyzer.instructor_available(&course("Algo"), &slot("Monday 10am-11am")));
    }

    #[test]
    fn empty_query_matches_every_course() {
        let schedule = schedule_of(&[("Algo", "Monday 9am-10am"), ("DB", "Tuesday 9am-10am")]);
        let input = enrollment_input(&[]);
        let analyzer = ConflictAnalyzer::new(&schedule, &input);

        let result = analyzer.search("");
        assert!(result.found);
        assert_eq!(result.total_matches, 2);
    }

    #[test]
    fn miss_produces_token_suggestions() {
        let schedule = schedule_of(&[
            ("Advanced Algorithms", "Monday 9am-10am"),
            ("Databases", "Tuesday 9am-10am"),
        ]);
        let input = enrollment_input(&[]);
        let analyzer = ConflictAnalyzer::new(&schedule, &input);

        let result = analyzer.search("intro algorithms");
        assert!(!result.found);
        assert_eq!(result.suggestions, vec![course("Advanced Algorithms")]);
    }

    #[test]
    fn zero_enrollment_course_has_zero_conflict_rate() {
        let schedule = schedule_of(&[("Algo", "Monday 9am-10am")]);
        let input = enrollment_input(&[]);
        let analyzer = ConflictAnalyzer::new(&schedule, &input);

        let report = analyzer.course_report(&course("Algo")).unwrap();
        assert_eq!(report.conflict_rate(), 0.0);
        assert!(!report.has_conflicts());
    }

    #[test]
    fn alternatives_sorted_by_ascending_clashes() {
        // Moving Algo to Tuesday clashes for both students; Wednesday is free
        let schedule = schedule_of(&[
            ("Algo", "Monday 9am-10am"),
            ("DB", "Tuesday 9am-10am"),
            ("OS", "Wednesday 9am-10am"),
        ]);
        let input = enrollment_input(&[("s1", &["Algo", "DB"]), ("s2", &["Algo", "DB"])]);
        let analyzer = ConflictAnalyzer::new(&schedule, &input);

        let report = analyzer.course_report(&course("Algo")).unwrap();
        assert_eq!(report.alternatives.len(), 2);
        assert_eq!(report.alternatives[0].slot, slot("Wednesday 9am-10am"));
        assert_eq!(report.alternatives[0].clash_count(), 0);
        assert!(report.alternatives[0].would_be_conflict_free());
        assert_eq!(report.alternatives[1].slot, slot("Tuesday 9am-10am"));
        assert_eq!(report.alternatives[1].clash_count(), 2);
    }

    #[test]
    fn summary_ranks_worst_courses_first() {
        let schedule = schedule_of(&[
            ("Algo", "Monday 9am-10am"),
            ("DB", "Monday 9am-10am"),
            ("OS", "Tuesday 9am-10am"),
        ]);
        let input = enrollment_input(&[("s1", &["Algo", "DB"]), ("s2", &["OS"])]);
        let analyzer = ConflictAnalyzer::new(&schedule, &input);

        let rows = analyzer.summary();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].conflicted, 1);
        assert_eq!(rows[2].course, course("OS"));
        assert_eq!(rows[2].conflicted, 0);
    }

    proptest! {
        #[test]
        fn conflict_rate_is_bounded(students in 0usize..8) {
            static COURSES: [&str; 2] = ["Algo", "DB"];
            let schedule = schedule_of(&[("Algo", "Monday 9am-10am"), ("DB", "Monday 9am-10am")]);
            let names: Vec<String> = (0..students).map(|i| format!("s{i}")).collect();
            let entries: Vec<(&str, &[&str])> = names
                .iter()
                .map(|n| (n.as_str(), &COURSES[..]))
                .collect();
            let input = enrollment_input(&entries);
            let analyzer = ConflictAnalyzer::new(&schedule, &input);

            let report = analyzer.course_report(&course("Algo")).unwrap();
            let rate = report.conflict_rate();
            prop_assert!((0.0..=100.0).contains(&rate));
        }
    }
}
