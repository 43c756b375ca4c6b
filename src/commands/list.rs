use anyhow::Result;
use chrono::NaiveDate;
use owo_colors::OwoColorize;
use vaxtrack_core::tracker::Tracker;

use crate::render::{Render, RenderDated};

pub fn run(tracker: &Tracker, today: NaiveDate, json: bool) -> Result<()> {
    let (summaries, totals) = tracker.dashboard(today);

    if json {
        let dashboard = serde_json::json!({
            "children": summaries,
            "totals": totals,
        });
        println!("{}", serde_json::to_string_pretty(&dashboard)?);
        return Ok(());
    }

    if summaries.is_empty() {
        println!("{}", "No children added yet.".dimmed());
        println!("Add your first child with: vaxtrack add <name> --dob YYYY-MM-DD");
        return Ok(());
    }

    for (i, summary) in summaries.iter().enumerate() {
        println!("{}", summary.render(&tracker.config().date_format));

        if i < summaries.len() - 1 {
            println!();
        }
    }

    println!();
    println!("{}", totals.render());

    Ok(())
}
