//! Terminal rendering for vaxtrack-core types.
//!
//! Extension traits that add colored output with owo_colors.

use chrono::NaiveDate;
use owo_colors::OwoColorize;
use vaxtrack_core::stats::{ChildSummary, DashboardTotals, MilestoneProgress, MilestoneStatus};

pub trait Render {
    fn render(&self) -> String;
}

/// Rendering that needs the configured date format.
pub trait RenderDated {
    fn render(&self, date_format: &str) -> String;
}

impl Render for MilestoneStatus {
    fn render(&self) -> String {
        match self {
            MilestoneStatus::Completed => format!("✓ {}", self.label()).green().to_string(),
            MilestoneStatus::Overdue => format!("! {}", self.label()).red().to_string(),
            MilestoneStatus::Upcoming => format!("• {}", self.label()).dimmed().to_string(),
        }
    }
}

fn format_date(date: NaiveDate, date_format: &str) -> String {
    date.format(date_format).to_string()
}

impl RenderDated for MilestoneProgress {
    fn render(&self, date_format: &str) -> String {
        let status = if self.is_due_soon() {
            format!("• {}", "Due soon").yellow().to_string()
        } else {
            self.status.render()
        };

        let when = match (self.status, self.completed_on) {
            (MilestoneStatus::Completed, Some(on)) => {
                format!("Completed: {}", format_date(on, date_format))
            }
            _ => format!("Due: {}", format_date(self.due_date, date_format)),
        };

        let total = self.milestone.vaccines.len();
        let partial = if self.status != MilestoneStatus::Completed && self.vaccines_completed > 0 {
            format!(" ({}/{} given)", self.vaccines_completed, total)
                .yellow()
                .to_string()
        } else {
            String::new()
        };

        format!(
            "{:<16} {}  {}{}\n   {}",
            self.milestone.age_label.bold(),
            status,
            when,
            partial,
            self.milestone.vaccines.join(", ").dimmed()
        )
    }
}

impl RenderDated for ChildSummary {
    fn render(&self, date_format: &str) -> String {
        let stats = &self.stats;

        let overdue = format!("{} Overdue", stats.overdue_count);
        let overdue = if stats.overdue_count > 0 {
            overdue.red().to_string()
        } else {
            overdue.dimmed().to_string()
        };

        let due_soon = format!("{} Due Soon", stats.due_soon_count);
        let due_soon = if stats.due_soon_count > 0 {
            due_soon.yellow().to_string()
        } else {
            due_soon.dimmed().to_string()
        };

        let complete = format!(
            "{}/{} Complete",
            stats.milestones_completed, stats.total_milestones
        );

        format!(
            "👶 {}  {}\n   Born {} • {}\n   {}  {}  {}\n   Next due: {}",
            self.child.name.bold(),
            self.child.id.dimmed(),
            format_date(self.child.dob, date_format),
            self.age,
            overdue,
            due_soon,
            complete.green(),
            stats.next_due_label
        )
    }
}

impl Render for DashboardTotals {
    fn render(&self) -> String {
        format!(
            "{} {} • {} completed • {} overdue • {} upcoming",
            self.children,
            pluralize("child", self.children),
            self.completed,
            self.overdue,
            self.upcoming
        )
        .dimmed()
        .to_string()
    }
}

pub fn pluralize(word: &str, count: usize) -> &str {
    if count == 1 {
        word
    } else {
        match word {
            "child" => "children",
            "vaccine" => "vaccines",
            "record" => "records",
            _ => word,
        }
    }
}
