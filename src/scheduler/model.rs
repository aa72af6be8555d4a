use crate::error::{Result, SchedulerError};
use crate::scheduler::Phase;
use crate::types::{Assignment, CourseId, CourseType, Day, SchedulerInput, SlotId};
use good_lp::{constraint, variable, variables, Constraint, Expression, Solution, SolverModel, Variable};
use log::{debug, info, warn};
use std::collections::BTreeMap;

/// Objective weights. Chosen so the soft families rank
/// student-clash >> consecutive-day >> non-preferred >> required-pair.
pub const STUDENT_CONFLICT_WEIGHT: f64 = 10_000.0;
pub const CONSEC_CONFLICT_WEIGHT: f64 = 100.0;
pub const NON_PREFERRED_WEIGHT: f64 = 50.0;
pub const REQUIRED_CONFLICT_WEIGHT: f64 = 10.0;

/// Result of solving one phase
pub enum PhaseOutcome {
    Feasible(Vec<Assignment>),
    Infeasible,
}

/// Build and solve the 0/1 model for a single phase level.
///
/// Each level monotonically adds one constraint family on top of all prior
/// ones; a family is skipped when its toggle is off. Non-preferred slot
/// penalties apply at every level.
pub fn solve_phase(input: &SchedulerInput, phase: Phase) -> Result<PhaseOutcome> {
    let cfg = &input.config;
    let level = phase.level();

    // Candidate sets and slot days, computed up front
    let candidates: BTreeMap<&CourseId, Vec<SlotId>> = input
        .offerings
        .keys()
        .map(|c| (c, input.candidate_slots(c)))
        .collect();

    let mut slot_days: BTreeMap<&SlotId, Day> = BTreeMap::new();
    for slots in candidates.values() {
        for slot in slots {
            if !slot_days.contains_key(slot) {
                let day = slot.day().ok_or_else(|| SchedulerError::MalformedSlotLabel {
                    label: slot.to_string(),
                })?;
                slot_days.insert(slot, day);
            }
        }
    }

    let mut vars = variables!();
    let mut constraints: Vec<Constraint> = Vec::new();
    let mut objective = Expression::default();

    // x[c,s] = 1 if course c meets in slot s
    // BTreeMaps keep variable creation deterministic across runs
    let mut course_slot_vars: BTreeMap<&CourseId, BTreeMap<&SlotId, Variable>> = BTreeMap::new();
    let mut slot_vars: BTreeMap<&SlotId, Vec<Variable>> = BTreeMap::new();

    for (course, slots) in &candidates {
        let mut slot_map = BTreeMap::new();
        for slot in slots {
            let var = vars.add(variable().binary());
            slot_map.insert(slot, var);
            slot_vars.entry(slot).or_default().push(var);
        }
        course_slot_vars.insert(*course, slot_map);
    }

    info!(
        "{phase}: model with {} decision variables over {} courses and {} slots",
        course_slot_vars.values().map(BTreeMap::len).sum::<usize>(),
        course_slot_vars.len(),
        slot_vars.len()
    );

    // Level 1: each course meets exactly classes-per-week times
    for (course, slot_map) in &course_slot_vars {
        let needed = input.demand(course)?;
        let total: Expression = slot_map.values().copied().map(Expression::from).sum();
        constraints.push(constraint!(total == needed as f64));
    }

    // Level 2: an instructor teaches at most one course per slot. A course
    // with several instructors contributes its variable to each of them.
    if level >= 2 && cfg.instructor_exclusivity {
        for (_, courses) in input.courses_by_instructor() {
            let mut per_slot: BTreeMap<&SlotId, Vec<Variable>> = BTreeMap::new();
            for course in courses {
                if let Some(slot_map) = course_slot_vars.get(course) {
                    for (slot, var) in slot_map {
                        per_slot.entry(*slot).or_default().push(*var);
                    }
                }
            }
            for group in per_slot.values().filter(|g| g.len() > 1) {
                let total: Expression = group.iter().copied().map(Expression::from).sum();
                constraints.push(constraint!(total <= 1.0));
            }
        }
    }

    // Level 3: per-slot class capacity
    if level >= 3 && cfg.slot_capacity {
        for group in slot_vars.values() {
            let total: Expression = group.iter().copied().map(Expression::from).sum();
            constraints.push(constraint!(total <= cfg.max_classes_per_slot as f64));
        }
    }

    // Level 4: soft student clash indicators. clash = 1 exactly when two or
    // more of the student's courses land in the slot; minimization keeps it
    // at zero otherwise.
    let mut clash_vars: Vec<Variable> = Vec::new();
    let mut required_clash_vars: Vec<Variable> = Vec::new();
    if level >= 4 && cfg.student_conflicts {
        for enrolled in input.enrollments.values() {
            for (_, group) in student_slot_groups(enrolled, &course_slot_vars) {
                if group.len() > 1 {
                    let clash = vars.add(variable().binary());
                    let total: Expression = group.iter().copied().map(Expression::from).sum();
                    let lhs = total - (group.len() as f64 - 1.0) * clash;
                    constraints.push(constraint!(lhs <= 1.0));
                    clash_vars.push(clash);
                }
            }

            // Required-pair clashes carry their own (very soft) indicator so
            // resolving one is rewarded beyond the general penalty
            let required: Vec<CourseId> = enrolled
                .iter()
                .filter(|c| input.course_type(c) == CourseType::Required)
                .cloned()
                .collect();
            for (_, group) in student_slot_groups(&required, &course_slot_vars) {
                if group.len() > 1 {
                    let clash = vars.add(variable().binary());
                    let total: Expression = group.iter().copied().map(Expression::from).sum();
                    let lhs = total - (group.len() as f64 - 1.0) * clash;
                    constraints.push(constraint!(lhs <= 1.0));
                    required_clash_vars.push(clash);
                }
            }
        }
    }

    // Level 5: no course meets twice on the same day (hard)
    if level >= 5 && cfg.no_same_day {
        for slot_map in course_slot_vars.values() {
            let mut per_day: BTreeMap<Day, Vec<Variable>> = BTreeMap::new();
            for (slot, var) in slot_map {
                per_day.entry(slot_days[slot]).or_default().push(*var);
            }
            for group in per_day.values().filter(|g| g.len() > 1) {
                let total: Expression = group.iter().copied().map(Expression::from).sum();
                constraints.push(constraint!(total <= 1.0));
            }
        }
    }

    // Level 6: soft penalty when a course meets on two adjacent calendar
    // days. on[c,d] is forced up by any session on day d; consec is forced
    // up when both day indicators are.
    let mut consec_vars: Vec<Variable> = Vec::new();
    if level >= 6 && cfg.no_consecutive_days {
        for slot_map in course_slot_vars.values() {
            let mut per_day: BTreeMap<Day, Vec<Variable>> = BTreeMap::new();
            for (slot, var) in slot_map {
                per_day.entry(slot_days[slot]).or_default().push(*var);
            }

            let pairs: Vec<(Day, Day)> = Day::consecutive_pairs()
                .filter(|(d1, d2)| per_day.contains_key(d1) && per_day.contains_key(d2))
                .collect();
            if pairs.is_empty() {
                continue;
            }

            let mut day_on: BTreeMap<Day, Variable> = BTreeMap::new();
            for day in pairs.iter().flat_map(|(d1, d2)| [*d1, *d2]) {
                if day_on.contains_key(&day) {
                    continue;
                }
                let on = vars.add(variable().binary());
                for var in &per_day[&day] {
                    constraints.push(constraint!(*var - on <= 0.0));
                }
                day_on.insert(day, on);
            }

            for (d1, d2) in pairs {
                let consec = vars.add(variable().binary());
                constraints.push(constraint!(day_on[&d1] + day_on[&d2] - consec <= 1.0));
                consec_vars.push(consec);
            }
        }
    }

    // Non-preferred slots are penalized at every level
    let mut non_preferred_vars: Vec<Variable> = Vec::new();
    for slot_map in course_slot_vars.values() {
        for (slot, var) in slot_map {
            if input.non_preferred_slots.contains(*slot) {
                non_preferred_vars.push(*var);
            }
        }
    }

    for &v in &clash_vars {
        objective += STUDENT_CONFLICT_WEIGHT * v;
    }
    for &v in &required_clash_vars {
        objective += REQUIRED_CONFLICT_WEIGHT * v;
    }
    for &v in &non_preferred_vars {
        objective += NON_PREFERRED_WEIGHT * v;
    }
    for &v in &consec_vars {
        objective += CONSEC_CONFLICT_WEIGHT * v;
    }

    let mut problem = vars
        .minimise(objective)
        .using(good_lp::solvers::highs::highs)
        .set_option("threads", 1)
        .set_option("random_seed", cfg.random_seed)
        .set_option("presolve", "on")
        .set_option("time_limit", cfg.time_limit_secs as f64)
        .set_option("log_to_console", "false");

    for c in constraints {
        problem = problem.with(c);
    }

    let solution = match problem.solve() {
        Ok(solution) => solution,
        Err(good_lp::ResolutionError::Infeasible) => return Ok(PhaseOutcome::Infeasible),
        Err(good_lp::ResolutionError::Other(msg)) => {
            // A time-limit exhaustion with no incumbent carries no usable
            // assignment either way; route it through the diagnostic path.
            warn!("{phase}: solver stopped without a solution: {msg}");
            return Ok(PhaseOutcome::Infeasible);
        }
        Err(e) => return Err(SchedulerError::SolverFailed(e.to_string()).into()),
    };

    let count_on = |group: &[Variable]| group.iter().filter(|&&v| solution.value(v) > 0.5).count();
    debug!(
        "{phase}: student={}, required={}, nonpref={}, consec={}",
        count_on(&clash_vars),
        count_on(&required_clash_vars),
        count_on(&non_preferred_vars),
        count_on(&consec_vars),
    );

    let mut assignments = Vec::new();
    for (course, slot_map) in &course_slot_vars {
        for (slot, var) in slot_map {
            if solution.value(*var) > 0.5 {
                assignments.push(Assignment {
                    course: (*course).clone(),
                    slot: (*slot).clone(),
                });
            }
        }
    }

    Ok(PhaseOutcome::Feasible(assignments))
}

/// Group a student's candidate variables by slot
fn student_slot_groups<'a>(
    enrolled: &[CourseId],
    course_slot_vars: &BTreeMap<&CourseId, BTreeMap<&'a SlotId, Variable>>,
) -> BTreeMap<&'a SlotId, Vec<Variable>> {
    let mut per_slot: BTreeMap<&SlotId, Vec<Variable>> = BTreeMap::new();
    for course in enrolled {
        if let Some(slot_map) = course_slot_vars.get(course) {
            for (slot, var) in slot_map {
                per_slot.entry(*slot).or_default().push(*var);
            }
        }
    }
    per_slot
}
