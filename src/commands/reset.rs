use anyhow::Result;
use dialoguer::Confirm;
use owo_colors::OwoColorize;
use vaxtrack_core::tracker::Tracker;

use crate::commands::save_error;
use crate::render::pluralize;

pub fn run(tracker: &mut Tracker, force: bool) -> Result<()> {
    let count = tracker.children().len();

    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete {} {} and all vaccination records? This cannot be undone.",
                count,
                pluralize("child", count)
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            return Ok(());
        }
    }

    tracker.clear_all_data().map_err(save_error)?;

    println!("{} All data cleared", "✓".green());

    Ok(())
}
