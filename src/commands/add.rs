use anyhow::Result;
use chrono::NaiveDate;
use owo_colors::OwoColorize;
use vaxtrack_core::tracker::Tracker;

use crate::commands::{save_error, show};

pub fn run(tracker: &mut Tracker, name: &str, dob: &str, today: NaiveDate) -> Result<()> {
    let child = tracker.add_child(name, dob, today).map_err(save_error)?;

    println!("{} Added {}", "✓".green(), child.name.bold());
    println!();

    show::run(tracker, &child, today)
}
