//! Course Timetabler - Constraint-based weekly course timetable solver
//!
//! This library computes course-to-timeslot assignments with Integer Linear
//! Programming (ILP), explains infeasible inputs, and answers what-if
//! queries on a finished timetable.
//!
//! # Algorithm Overview
//!
//! The solver adds constraint families in six incremental phases:
//! 1. **Demand**: each course meets its classes-per-week count
//! 2. **Instructor Exclusivity**: no instructor teaches two classes at once
//! 3. **Slot Capacity**: bounded classes per time slot
//! 4. **Student Conflicts**: soft clash penalties, required pairs weighted
//! 5. **No Same Day**: a course meets at most once per day
//! 6. **No Consecutive Days**: soft spread across non-adjacent days (opt-in)
//!
//! The first infeasible phase aborts the run, and a phase-specific
//! diagnostic explains which inputs are responsible.
//!
//! # Example
//!
//! ```no_run
//! use course_timetabler::parser::{load_input_from_dir, validate_input};
//! use course_timetabler::scheduler::generate_schedule;
//! use course_timetabler::analyzer::ConflictAnalyzer;
//! use std::path::Path;
//!
//! let input = load_input_from_dir(Path::new("./data/demo")).unwrap();
//! validate_input(&input).unwrap();
//! let outcome = generate_schedule(&input, false).unwrap();
//! if outcome.is_feasible() {
//!     let analyzer = ConflictAnalyzer::new(&outcome.schedule, &input);
//!     let result = analyzer.search("algorithms");
//!     println!("{} matches", result.total_matches);
//! } else {
//!     println!("{}", outcome.message);
//! }
//! ```

pub mod analyzer;
pub mod diagnostics;
pub mod error;
pub mod parser;
pub mod reporter;
pub mod scheduler;
pub mod types;
pub mod validator;

pub use error::{Result, SchedulerError};
