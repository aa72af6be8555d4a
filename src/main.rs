use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use course_timetabler::analyzer::ConflictAnalyzer;
use course_timetabler::parser::{load_input_from_dir, load_schedule, validate_input};
use course_timetabler::reporter::{
    format_search_results, format_summary_table, print_outcome_summary, write_outputs,
};
use course_timetabler::scheduler::generate_schedule;
use course_timetabler::validator::validate_schedule;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "course-timetabler")]
#[command(about = "Constraint-based weekly course timetable solver")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a timetable from input data
    Schedule {
        /// Directory containing input JSON files
        #[arg(short, long)]
        data: PathBuf,

        /// Output directory for schedule files
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,

        /// Suppress progress output, print the outcome message only
        #[arg(short, long)]
        quiet: bool,
    },

    /// Validate input data without solving
    Check {
        /// Directory containing input JSON files
        #[arg(short, long)]
        data: PathBuf,
    },

    /// Search a generated schedule for course conflicts
    Search {
        /// Directory containing input JSON files
        #[arg(short, long)]
        data: PathBuf,

        /// Path to schedule.json file
        #[arg(short, long)]
        schedule: PathBuf,

        /// Course name fragment to look up
        query: String,

        /// Ignore instructors' explicit busy slots
        #[arg(long)]
        ignore_busy_slots: bool,

        /// Ignore conflicts with instructors' own teaching schedules
        #[arg(long)]
        ignore_teaching_conflicts: bool,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Per-course conflict summary of a generated schedule
    Summary {
        /// Directory containing input JSON files
        #[arg(short, long)]
        data: PathBuf,

        /// Path to schedule.json file
        #[arg(short, long)]
        schedule: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Schedule {
            data,
            output,
            quiet,
        } => run_schedule(&data, &output, quiet),
        Commands::Check { data } => run_check(&data),
        Commands::Search {
            data,
            schedule,
            query,
            ignore_busy_slots,
            ignore_teaching_conflicts,
            json,
        } => run_search(
            &data,
            &schedule,
            &query,
            ignore_busy_slots,
            ignore_teaching_conflicts,
            json,
        ),
        Commands::Summary { data, schedule } => run_summary(&data, &schedule),
    }
}

fn run_schedule(data: &Path, output: &Path, quiet: bool) -> Result<()> {
    let input = load_input_from_dir(data).context("Failed to load input data")?;

    let validation_result = validate_input(&input)?;
    if !quiet {
        for warning in &validation_result.warnings {
            println!("{} {}", "Warning:".yellow(), warning);
        }
        println!(
            "Loaded {} courses, {} students, {} time slots",
            input.offerings.len(),
            input.enrollments.len(),
            input.all_slots().len()
        );
        println!("\nGenerating timetable...\n");
    }

    let outcome = generate_schedule(&input, quiet)?;
    write_outputs(&outcome, output)?;

    if outcome.is_feasible() {
        let validation = validate_schedule(&outcome.schedule, &input);
        if quiet {
            println!("{}", outcome.message);
        } else {
            print_outcome_summary(&outcome, &validation);
            println!(
                "Reports written to: {}",
                output.display().to_string().green()
            );
        }
    } else {
        println!("{}", outcome.message);
        if !quiet {
            println!();
            println!("{}", "Scheduling infeasible - see report above".red().bold());
        }
    }

    Ok(())
}

fn run_check(data: &Path) -> Result<()> {
    let input = load_input_from_dir(data).context("Failed to load input data")?;

    match validate_input(&input) {
        Ok(result) => {
            for warning in &result.warnings {
                println!("{} {}", "Warning:".yellow(), warning);
            }
            println!("{}", "✓ Input is valid".green().bold());
            Ok(())
        }
        Err(e) => {
            println!("{}", "✗ Input validation failed".red().bold());
            Err(e)
        }
    }
}

fn run_search(
    data: &Path,
    schedule_path: &Path,
    query: &str,
    ignore_busy_slots: bool,
    ignore_teaching_conflicts: bool,
    json: bool,
) -> Result<()> {
    let input = load_input_from_dir(data).context("Failed to load input data")?;
    let schedule = load_schedule(schedule_path).context("Failed to load schedule")?;

    let mut analyzer = ConflictAnalyzer::new(&schedule, &input);
    analyzer.set_ignore_busy_slots(ignore_busy_slots);
    analyzer.set_ignore_teaching_conflicts(ignore_teaching_conflicts);

    let result = analyzer.search(query);
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", format_search_results(&result));
    }

    Ok(())
}

fn run_summary(data: &Path, schedule_path: &Path) -> Result<()> {
    let input = load_input_from_dir(data).context("Failed to load input data")?;
    let schedule = load_schedule(schedule_path).context("Failed to load schedule")?;

    let analyzer = ConflictAnalyzer::new(&schedule, &input);
    println!("{}", format_summary_table(&analyzer.summary()));

    Ok(())
}
