use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use owo_colors::OwoColorize;
use vaxtrack_core::Child;
use vaxtrack_core::ics::ics_file_name;
use vaxtrack_core::tracker::Tracker;

pub fn run(
    tracker: &Tracker,
    child: &Child,
    milestone: Option<&str>,
    output: Option<PathBuf>,
) -> Result<()> {
    let ics = tracker.calendar(child, milestone, Utc::now())?;

    let path = output.unwrap_or_else(|| PathBuf::from(ics_file_name(&child.name)));
    std::fs::write(&path, ics)
        .with_context(|| format!("Could not write calendar to {}", path.display()))?;

    println!(
        "{} Calendar for {} written to {}",
        "✓".green(),
        child.name.bold(),
        path.display()
    );
    println!(
        "{}",
        "Import it into Google Calendar, Apple Calendar or Outlook.".dimmed()
    );

    Ok(())
}
