//! Schedule status evaluation and dashboard statistics.

use chrono::NaiveDate;
use serde::Serialize;

use crate::age::format_age_string;
use crate::child::{
    Child, CompletionRecord, completed_vaccine_count, first_completion_date,
    is_milestone_complete,
};
use crate::due_date::resolve_due_date;
use crate::schedule::{Milestone, SCHEDULE};

/// Upcoming milestones due within this many days count as "due soon".
pub const DUE_SOON_DAYS: i64 = 30;

/// Label used when nothing is left to schedule.
pub const ALL_CAUGHT_UP: &str = "All caught up";

/// Display format for due dates embedded in labels (d/m/yyyy).
pub const LABEL_DATE_FORMAT: &str = "%-d/%-m/%Y";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MilestoneStatus {
    Completed,
    Overdue,
    Upcoming,
}

impl MilestoneStatus {
    pub fn label(&self) -> &'static str {
        match self {
            MilestoneStatus::Completed => "Completed",
            MilestoneStatus::Overdue => "Due / Overdue",
            MilestoneStatus::Upcoming => "Upcoming",
        }
    }
}

/// Status of a single milestone for a given child and day.
#[derive(Debug, Clone, Serialize)]
pub struct MilestoneProgress {
    pub milestone: &'static Milestone,
    pub due_date: NaiveDate,
    pub status: MilestoneStatus,
    /// Days from today until the due date (negative when overdue).
    pub days_until: i64,
    pub vaccines_completed: usize,
    /// Earliest recorded completion date, for completed milestones.
    pub completed_on: Option<NaiveDate>,
}

impl MilestoneProgress {
    pub fn is_due_soon(&self) -> bool {
        self.status == MilestoneStatus::Upcoming && self.days_until <= DUE_SOON_DAYS
    }
}

/// Summary statistics for one child's schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleStats {
    pub milestones_completed: usize,
    pub total_milestones: usize,
    pub overdue_count: usize,
    pub due_soon_count: usize,
    pub upcoming_count: usize,
    pub next_due_date: Option<NaiveDate>,
    pub next_due_label: String,
}

/// Evaluate every milestone in schedule order.
pub fn evaluate_schedule(
    dob: NaiveDate,
    completions: &CompletionRecord,
    today: NaiveDate,
) -> Vec<MilestoneProgress> {
    SCHEDULE
        .iter()
        .map(|milestone| {
            let due_date = resolve_due_date(dob, milestone.age_label);
            let days_until = (due_date - today).num_days();
            let completed = is_milestone_complete(completions, milestone);

            let status = if completed {
                MilestoneStatus::Completed
            } else if due_date < today {
                MilestoneStatus::Overdue
            } else {
                MilestoneStatus::Upcoming
            };

            MilestoneProgress {
                milestone,
                due_date,
                status,
                days_until,
                vaccines_completed: completed_vaccine_count(completions, milestone),
                completed_on: completed
                    .then(|| first_completion_date(completions, milestone))
                    .flatten(),
            }
        })
        .collect()
}

/// Aggregate completed / overdue / due-soon / upcoming counts and the next due milestone.
pub fn compute_stats(
    dob: NaiveDate,
    completions: &CompletionRecord,
    today: NaiveDate,
) -> ScheduleStats {
    let progress = evaluate_schedule(dob, completions, today);

    let mut stats = ScheduleStats {
        milestones_completed: 0,
        total_milestones: SCHEDULE.len(),
        overdue_count: 0,
        due_soon_count: 0,
        upcoming_count: 0,
        next_due_date: None,
        next_due_label: ALL_CAUGHT_UP.to_string(),
    };

    for entry in &progress {
        match entry.status {
            MilestoneStatus::Completed => stats.milestones_completed += 1,
            MilestoneStatus::Overdue => stats.overdue_count += 1,
            MilestoneStatus::Upcoming => {
                stats.upcoming_count += 1;
                if entry.is_due_soon() {
                    stats.due_soon_count += 1;
                }

                // Strictly earlier wins, so ties keep schedule order.
                if stats.next_due_date.is_none_or(|next| entry.due_date < next) {
                    stats.next_due_date = Some(entry.due_date);
                    stats.next_due_label = format!(
                        "{} - {}",
                        entry.milestone.lead_vaccine(),
                        entry.due_date.format(LABEL_DATE_FORMAT)
                    );
                }
            }
        }
    }

    stats
}

/// A dashboard row: one child with its age and schedule statistics.
#[derive(Debug, Clone, Serialize)]
pub struct ChildSummary {
    pub child: Child,
    pub age: String,
    pub stats: ScheduleStats,
}

impl ChildSummary {
    pub fn new(child: Child, completions: &CompletionRecord, today: NaiveDate) -> Self {
        let stats = compute_stats(child.dob, completions, today);
        let age = format_age_string(child.dob, today);
        ChildSummary { child, age, stats }
    }
}

/// Milestone counts summed over every child on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardTotals {
    pub children: usize,
    pub completed: usize,
    pub overdue: usize,
    pub upcoming: usize,
}

impl DashboardTotals {
    pub fn from_summaries(summaries: &[ChildSummary]) -> Self {
        summaries
            .iter()
            .fold(DashboardTotals::default(), |mut totals, summary| {
                totals.children += 1;
                totals.completed += summary.stats.milestones_completed;
                totals.overdue += summary.stats.overdue_count;
                totals.upcoming += summary.stats.upcoming_count;
                totals
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::child::VaccinationData;
    use crate::schedule::find_milestone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn status_of(progress: &[MilestoneProgress], age_label: &str) -> MilestoneStatus {
        progress
            .iter()
            .find(|p| p.milestone.age_label == age_label)
            .map(|p| p.status)
            .unwrap()
    }

    fn complete_milestone(data: &mut VaccinationData, age_label: &str, on: &str) {
        let milestone = find_milestone(age_label).unwrap();
        for vaccine in milestone.vaccines {
            data.record(milestone.age_label, vaccine, on);
        }
    }

    #[test]
    fn test_overdue_and_due_soon_scenario() {
        let dob = date(2023, 1, 1);
        let today = date(2023, 3, 1);
        let progress = evaluate_schedule(dob, &CompletionRecord::new(), today);

        assert_eq!(status_of(&progress, "6 Weeks"), MilestoneStatus::Overdue);
        assert_eq!(status_of(&progress, "10 Weeks"), MilestoneStatus::Upcoming);

        let ten_weeks = progress
            .iter()
            .find(|p| p.milestone.age_label == "10 Weeks")
            .unwrap();
        assert_eq!(ten_weeks.days_until, 11);
        assert!(ten_weeks.is_due_soon());

        let stats = compute_stats(dob, &CompletionRecord::new(), today);
        // Birth and 6 Weeks are overdue.
        assert_eq!(stats.overdue_count, 2);
        assert!(stats.due_soon_count >= 1);
        assert_eq!(stats.next_due_date, Some(date(2023, 3, 12)));
        assert_eq!(stats.next_due_label, "DTWP/DTaP-2 - 12/3/2023");
    }

    #[test]
    fn test_completed_birth_excluded_from_other_buckets() {
        let dob = date(2023, 1, 1);
        let today = date(2023, 3, 1);
        let mut data = VaccinationData::default();
        complete_milestone(&mut data, "Birth", "2023-01-01");

        let stats = compute_stats(dob, &data.completions, today);
        assert!(stats.milestones_completed >= 1);
        assert_eq!(stats.overdue_count, 1, "Only 6 Weeks should be overdue");

        let progress = evaluate_schedule(dob, &data.completions, today);
        assert_eq!(status_of(&progress, "Birth"), MilestoneStatus::Completed);
        assert_eq!(progress[0].completed_on, Some(date(2023, 1, 1)));
    }

    #[test]
    fn test_buckets_partition_schedule() {
        let dob = date(2022, 6, 15);
        let mut data = VaccinationData::default();
        let cases = [
            date(2022, 6, 1),
            date(2022, 6, 15),
            date(2023, 1, 1),
            date(2024, 2, 29),
            date(2040, 1, 1),
        ];

        for (i, today) in cases.into_iter().enumerate() {
            if i == 2 {
                complete_milestone(&mut data, "Birth", "2022-06-15");
                data.record("6 Weeks", "IPV-1", "2022-08-01");
            }
            let stats = compute_stats(dob, &data.completions, today);

            assert_eq!(
                stats.milestones_completed + stats.overdue_count + stats.upcoming_count,
                stats.total_milestones,
                "Buckets don't add up on {}: {:?}",
                today,
                stats
            );
            assert!(stats.due_soon_count <= stats.upcoming_count, "{:?}", stats);
            assert_eq!(stats.total_milestones, SCHEDULE.len());
        }
    }

    #[test]
    fn test_due_today_is_upcoming_and_due_soon() {
        let dob = date(2023, 1, 1);
        let stats = compute_stats(dob, &CompletionRecord::new(), dob);

        assert_eq!(stats.overdue_count, 0);
        assert_eq!(stats.upcoming_count, SCHEDULE.len());
        assert_eq!(stats.next_due_date, Some(dob));
        assert_eq!(stats.next_due_label, "BCG - 1/1/2023");
    }

    #[test]
    fn test_due_soon_window_boundary() {
        // 6 Weeks is due 2023-02-12; exactly 30 days before is due soon, 31 is not.
        let dob = date(2023, 1, 1);
        let mut data = VaccinationData::default();
        complete_milestone(&mut data, "Birth", "2023-01-01");

        let at_30 = evaluate_schedule(dob, &data.completions, date(2023, 1, 13));
        assert!(at_30[1].is_due_soon(), "{:?}", at_30[1]);

        let at_31 = evaluate_schedule(dob, &data.completions, date(2023, 1, 12));
        assert!(!at_31[1].is_due_soon(), "{:?}", at_31[1]);
    }

    #[test]
    fn test_next_due_tie_keeps_schedule_order() {
        // "6 Months" and "6-9 Months" resolve to the same date.
        let dob = date(2023, 1, 1);
        let mut data = VaccinationData::default();
        for label in ["Birth", "6 Weeks", "10 Weeks", "14 Weeks"] {
            complete_milestone(&mut data, label, "2023-05-01");
        }

        let stats = compute_stats(dob, &data.completions, date(2023, 6, 1));
        assert_eq!(stats.next_due_date, Some(date(2023, 7, 1)));
        assert!(
            stats.next_due_label.starts_with("Influenza (IIV)-1"),
            "Got {}",
            stats.next_due_label
        );
    }

    #[test]
    fn test_all_caught_up() {
        let dob = date(2023, 1, 1);
        let mut data = VaccinationData::default();
        for milestone in SCHEDULE {
            complete_milestone(&mut data, milestone.age_label, "2023-02-01");
        }

        let stats = compute_stats(dob, &data.completions, date(2024, 1, 1));
        assert_eq!(stats.milestones_completed, SCHEDULE.len());
        assert_eq!(stats.next_due_date, None);
        assert_eq!(stats.next_due_label, ALL_CAUGHT_UP);
    }

    #[test]
    fn test_dashboard_totals_sum_children() {
        let today = date(2023, 3, 1);
        let older = Child::new("Asha", date(2022, 1, 1));
        let newborn = Child::new("Ravi", date(2023, 3, 1));

        let mut data = VaccinationData::default();
        complete_milestone(&mut data, "Birth", "2022-01-01");

        let summaries = vec![
            ChildSummary::new(older, &data.completions, today),
            ChildSummary::new(newborn, &CompletionRecord::new(), today),
        ];
        let totals = DashboardTotals::from_summaries(&summaries);

        assert_eq!(totals.children, 2);
        assert_eq!(totals.completed, 1);
        assert_eq!(
            totals.completed + totals.overdue + totals.upcoming,
            2 * SCHEDULE.len()
        );
        assert_eq!(summaries[0].age, "1y 2m old");
        assert_eq!(summaries[1].age, "0 months old");
    }
}
