use crate::analyzer::{SearchResult, SummaryRow};
use crate::scheduler::SchedulingOutcome;
use crate::validator::ValidationReport;
use colored::Colorize;
use itertools::Itertools;

/// Print a quick summary of a feasible run to stdout
pub fn print_outcome_summary(outcome: &SchedulingOutcome, validation: &ValidationReport) {
    println!();
    if validation.is_valid {
        println!("{}", "✓ Schedule generated successfully".green().bold());
    } else {
        println!("{}", "✗ Schedule has validation errors".red().bold());
        for v in &validation.hard_violations {
            println!("  ! {}: {}", v.constraint.red(), v.message);
        }
    }
    println!();
    println!("  Courses:      {}", validation.statistics.total_courses);
    println!("  Sessions:     {}", validation.statistics.total_assignments);
    println!("  Slots used:   {}", validation.statistics.unique_slots);
    println!(
        "  Clashes:      {} student, {} required-pair",
        validation.soft_counts.student_clashes, validation.soft_counts.required_clashes
    );
    println!(
        "  Non-preferred: {}, consecutive-day: {}",
        validation.soft_counts.non_preferred_uses, validation.soft_counts.consecutive_day_pairs
    );
    println!("  Penalty:      {:.0}", validation.soft_counts.weighted_penalty());
    println!("  Time:         {}ms", outcome.schedule.metadata.solve_time_ms);
    println!();
}

/// Render a search result as plain text
pub fn format_search_results(result: &SearchResult) -> String {
    let mut lines = Vec::new();

    if !result.found {
        lines.push(format!(
            "Course '{}' not found in the schedule.",
            result.query
        ));
        if !result.suggestions.is_empty() {
            lines.push(String::new());
            lines.push("Did you mean one of these courses?".to_string());
            for suggestion in &result.suggestions {
                lines.push(format!("   - {suggestion}"));
            }
        }
        return lines.join("\n");
    }

    lines.push(format!("Found {} matching course(s):", result.total_matches));

    for report in &result.courses {
        lines.push(String::new());
        lines.push(format!("COURSE: {}", report.course));
        lines.push("=".repeat(50));

        lines.push(format!(
            "Scheduled Time Slots: {}",
            report.scheduled_slots.len()
        ));
        for (i, analysis) in report.current_slots.iter().enumerate() {
            let status = if analysis.is_conflict_free() {
                "no conflicts".to_string()
            } else {
                format!("{} conflict(s)", analysis.conflicts.len())
            };
            lines.push(format!("   {}. {} - {}", i + 1, analysis.slot, status));
        }

        lines.push(String::new());
        lines.push("Student Enrollment:".to_string());
        lines.push(format!(
            "   Total Enrolled: {}",
            report.enrolled_students.len()
        ));
        lines.push(format!(
            "   With Conflicts: {}",
            report.conflicted_students.len()
        ));
        lines.push(format!("   Conflict Rate: {:.1}%", report.conflict_rate()));

        if report.has_conflicts() {
            lines.push(String::new());
            lines.push("CURRENT SCHEDULE CONFLICTS:".to_string());
            for analysis in report.current_slots.iter().filter(|a| !a.is_conflict_free()) {
                lines.push(format!("   Time Slot: {}", analysis.slot));
                for conflict in &analysis.conflicts {
                    let courses = conflict
                        .conflicting_courses
                        .iter()
                        .map(|c| format!("{} ({})", c.course, c.course_type))
                        .join(", ");
                    lines.push(format!(
                        "      - Student {}: conflicts with {}",
                        conflict.student, courses
                    ));
                }
            }
        } else {
            lines.push(String::new());
            lines.push("No scheduling conflicts found for this course.".to_string());
        }

        if !report.alternatives.is_empty() {
            lines.push(String::new());
            lines.push("ALTERNATIVE TIME SLOT ANALYSIS:".to_string());
            for alt in report.alternatives.iter().take(5) {
                let status = if let Some(reason) = &alt.excluded_reason {
                    format!("{} conflict(s) - {reason}", alt.clash_count())
                } else if alt.would_be_conflict_free() {
                    "CONFLICT-FREE".to_string()
                } else {
                    format!("{} conflict(s)", alt.clash_count())
                };
                lines.push(format!("   {}: {}", alt.slot, status));
            }
        }

        lines.push(String::new());
        lines.push("=".repeat(50));
    }

    lines.join("\n")
}

/// Render the per-course summary as a fixed-width table
pub fn format_summary_table(rows: &[SummaryRow]) -> String {
    let mut lines = vec![
        format!(
            "{:<28} {:>5} {:>9} {:>11} {:>8}  {}",
            "Course", "Slots", "Enrolled", "Conflicted", "Rate", "Conflicts"
        ),
        "-".repeat(76),
    ];

    for row in rows {
        lines.push(format!(
            "{:<28} {:>5} {:>9} {:>11} {:>7.1}%  {}",
            row.course.to_string(),
            row.scheduled_slots.len(),
            row.enrolled,
            row.conflicted,
            row.conflict_rate,
            if row.has_conflicts { "Yes" } else { "No" }
        ));
    }

    lines.join("\n")
}
