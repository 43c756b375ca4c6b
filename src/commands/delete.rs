use anyhow::Result;
use dialoguer::Confirm;
use owo_colors::OwoColorize;
use vaxtrack_core::Child;
use vaxtrack_core::store::DeleteOptions;
use vaxtrack_core::tracker::Tracker;

use crate::commands::save_error;

pub fn run(tracker: &mut Tracker, child: &Child, keep_data: bool, force: bool) -> Result<()> {
    if !force {
        let prompt = if keep_data {
            format!("Delete {}? Vaccination records are kept.", child.name)
        } else {
            format!("Delete {} and all their vaccination records?", child.name)
        };

        let confirmed = Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()?;

        if !confirmed {
            return Ok(());
        }
    }

    tracker
        .delete_child(
            child,
            DeleteOptions {
                include_vaccination_data: !keep_data,
            },
        )
        .map_err(save_error)?;

    println!("{} Deleted {}", "✓".green(), child.name.bold());

    Ok(())
}
