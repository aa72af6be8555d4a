mod model;

pub use model::*;

use crate::diagnostics;
use crate::error::Result;
use crate::types::{Schedule, ScheduleMetadata, SchedulerInput};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use std::fmt;
use std::time::Instant;

/// One constraint level of the incremental pipeline.
///
/// Level L includes every constraint family from levels below it, so the
/// first infeasible level names the family that broke feasibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    Demand,
    InstructorExclusivity,
    SlotCapacity,
    StudentConflicts,
    SameDay,
    ConsecutiveDays,
}

impl Phase {
    pub fn level(self) -> u8 {
        match self {
            Phase::Demand => 1,
            Phase::InstructorExclusivity => 2,
            Phase::SlotCapacity => 3,
            Phase::StudentConflicts => 4,
            Phase::SameDay => 5,
            Phase::ConsecutiveDays => 6,
        }
    }

    /// Phases every run executes, in order
    pub fn mandatory() -> [Phase; 5] {
        [
            Phase::Demand,
            Phase::InstructorExclusivity,
            Phase::SlotCapacity,
            Phase::StudentConflicts,
            Phase::SameDay,
        ]
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PHASE {}", self.level())
    }
}

/// Result of a scheduling run: either a populated schedule with a success
/// message, or an empty schedule with a diagnostic report.
#[derive(Debug, Clone)]
pub struct SchedulingOutcome {
    pub schedule: Schedule,
    pub message: String,
}

impl SchedulingOutcome {
    pub fn is_feasible(&self) -> bool {
        !self.schedule.is_empty()
    }

    fn infeasible(message: String) -> Self {
        Self {
            schedule: Schedule::empty(),
            message,
        }
    }
}

/// Main entry point for schedule generation.
///
/// Runs phases 1..5 in order, plus phase 6 when consecutive-day avoidance
/// is enabled. The first infeasible phase aborts the run and its diagnostic
/// becomes the outcome message.
pub fn generate_schedule(input: &SchedulerInput, quiet: bool) -> Result<SchedulingOutcome> {
    let start_time = Instant::now();

    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(100);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}% {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );
        pb
    };

    let all_slots = input.all_slots();
    if all_slots.is_empty() {
        progress.finish_and_clear();
        return Ok(SchedulingOutcome::infeasible(diagnostics::no_slots_report()));
    }
    info!("{} unique time slots available for scheduling", all_slots.len());

    // Classes-per-week must be explicit for every offered course
    for course in input.offerings.keys() {
        input.demand(course)?;
    }

    // Quick pre-check: a course demanding more sessions than it has
    // candidate slots can never satisfy phase 1
    progress.set_message("Pre-checking demand...");
    progress.set_position(5);
    if !diagnostics::demand_shortfalls(input).is_empty() {
        progress.finish_and_clear();
        return Ok(SchedulingOutcome::infeasible(diagnostics::precheck_report(input)));
    }

    let mut phases: Vec<Phase> = Phase::mandatory().to_vec();
    if input.config.no_consecutive_days {
        phases.push(Phase::ConsecutiveDays);
    }

    let mut assignments = Vec::new();
    let mut last_phase = Phase::Demand;

    for (i, phase) in phases.iter().enumerate() {
        progress.set_message(format!("Solving {phase}..."));
        progress.set_position((10 + i * 90 / phases.len()) as u64);

        match solve_phase(input, *phase)? {
            PhaseOutcome::Feasible(found) => {
                assignments = found;
                last_phase = *phase;
            }
            PhaseOutcome::Infeasible => {
                progress.finish_and_clear();
                info!("{phase} infeasible, generating diagnostic report");
                return Ok(SchedulingOutcome::infeasible(diagnostics::diagnose(*phase, input)));
            }
        }
    }

    progress.set_position(100);
    progress.finish_with_message("Schedule generated");

    let elapsed = start_time.elapsed();
    let schedule = Schedule {
        assignments,
        metadata: ScheduleMetadata {
            generated_at: chrono::Utc::now().to_rfc3339(),
            solver_version: env!("CARGO_PKG_VERSION").to_string(),
            last_phase: last_phase.to_string(),
            solve_time_ms: elapsed.as_millis() as u64,
        },
    };

    Ok(SchedulingOutcome {
        schedule,
        message: format!("Schedule found through {last_phase} constraints."),
    })
}
