use anyhow::Result;
use chrono::NaiveDate;
use owo_colors::OwoColorize;
use vaxtrack_core::Child;
use vaxtrack_core::tracker::Tracker;

use crate::render::RenderDated;

pub fn run(tracker: &Tracker, child: &Child, today: NaiveDate) -> Result<()> {
    let date_format = &tracker.config().date_format;
    let summary = tracker.summary(child, today);

    println!("{}", summary.render(date_format));
    println!();

    for progress in tracker.schedule(child, today) {
        println!("{}", progress.render(date_format));
    }

    let overdue = summary.stats.overdue_count;
    if overdue > 0 {
        println!();
        println!(
            "{}",
            format!(
                "Mark given vaccines with: vaxtrack complete \"<age>\" --child \"{}\"",
                child.name
            )
            .dimmed()
        );
    }

    Ok(())
}

/// Print a single status line, used after changes.
pub fn print_status_line(tracker: &Tracker, child: &Child, today: NaiveDate) {
    let summary = tracker.summary(child, today);
    let stats = &summary.stats;
    println!(
        "   {}/{} complete • {} • next due: {}",
        stats.milestones_completed,
        stats.total_milestones,
        stats_overdue(stats.overdue_count),
        stats.next_due_label
    );
}

fn stats_overdue(count: usize) -> String {
    if count == 0 {
        "nothing overdue".green().to_string()
    } else {
        format!("{} overdue", count).red().to_string()
    }
}
