mod text;

pub use text::*;

use crate::error::Result;
use crate::scheduler::SchedulingOutcome;
use std::fs;
use std::path::Path;

/// Persist a scheduling outcome: the schedule as JSON plus the outcome
/// message (success line or diagnostic report) as text
pub fn write_outputs(outcome: &SchedulingOutcome, output_dir: &Path) -> Result<()> {
    fs::create_dir_all(output_dir)?;

    let json = serde_json::to_string_pretty(&outcome.schedule)?;
    fs::write(output_dir.join("schedule.json"), json)?;
    fs::write(output_dir.join("report.txt"), &outcome.message)?;

    Ok(())
}
