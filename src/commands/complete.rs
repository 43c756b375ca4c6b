use anyhow::Result;
use chrono::NaiveDate;
use owo_colors::OwoColorize;
use vaxtrack_core::Child;
use vaxtrack_core::tracker::Tracker;

use crate::commands::save_error;
use crate::commands::show::print_status_line;
use crate::render::pluralize;

pub fn run(
    tracker: &mut Tracker,
    child: &Child,
    age_label: &str,
    vaccines: &[String],
    date: &str,
    today: NaiveDate,
) -> Result<()> {
    let outcome = tracker
        .complete_milestone(child, age_label, vaccines, date, today)
        .map_err(save_error)?;

    println!(
        "{} {} {}: {} {} given on {}",
        "✓".green(),
        child.name.bold(),
        outcome.milestone.age_label,
        outcome.vaccines.len(),
        pluralize("vaccine", outcome.vaccines.len()),
        outcome.date.format(&tracker.config().date_format)
    );
    for vaccine in &outcome.vaccines {
        println!("   {}", vaccine.dimmed());
    }
    print_status_line(tracker, child, today);

    Ok(())
}
