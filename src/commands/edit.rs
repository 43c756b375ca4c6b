use anyhow::Result;
use chrono::NaiveDate;
use owo_colors::OwoColorize;
use vaxtrack_core::Child;
use vaxtrack_core::tracker::Tracker;

use crate::commands::save_error;
use crate::commands::show::print_status_line;

pub fn run(
    tracker: &mut Tracker,
    child: &Child,
    name: Option<&str>,
    dob: Option<&str>,
    today: NaiveDate,
) -> Result<()> {
    if name.is_none() && dob.is_none() {
        anyhow::bail!("Nothing to change. Pass --name and/or --dob.");
    }

    let updated = tracker.update_child(child, name, dob, today).map_err(save_error)?;

    println!("{} Updated {}", "✓".green(), updated.name.bold());
    if updated.dob != child.dob {
        println!(
            "   Date of birth: {} → {}",
            child.dob.format(&tracker.config().date_format).dimmed(),
            updated.dob.format(&tracker.config().date_format)
        );
    }
    print_status_line(tracker, &updated, today);

    Ok(())
}
