use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use vaxtrack_core::tracker::Tracker;

use crate::render::pluralize;

pub fn export(tracker: &Tracker, output: Option<PathBuf>) -> Result<()> {
    let json = tracker.export_data()?;

    match output {
        None => println!("{}", json),
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("Could not write backup to {}", path.display()))?;
            eprintln!("{} Exported data to {}", "✓".green(), path.display());
        }
    }

    Ok(())
}

pub fn import(tracker: &mut Tracker, file: &Path) -> Result<()> {
    let json = std::fs::read_to_string(file)
        .with_context(|| format!("Could not read {}", file.display()))?;

    let summary = tracker
        .import_data(&json)
        .context("Error importing data. Please check the file format.")?;

    println!(
        "{} Imported {} {} and {} vaccination {}",
        "✓".green(),
        summary.children,
        pluralize("child", summary.children),
        summary.vaccination_records,
        pluralize("record", summary.vaccination_records)
    );

    Ok(())
}
