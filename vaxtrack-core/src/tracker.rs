//! The tracker service: config, store and validation wired together.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::info;

use crate::child::Child;
use crate::config::TrackerConfig;
use crate::error::{TrackerError, TrackerResult};
use crate::ics::{generate_milestone_ics, generate_schedule_ics};
use crate::schedule::{Milestone, find_milestone};
use crate::stats::{ChildSummary, DashboardTotals, MilestoneProgress, evaluate_schedule};
use crate::store::{DeleteOptions, FileStore, ImportSummary, ProfileStore};
use crate::validate::Validator;

/// Result of recording a milestone completion.
#[derive(Debug, Clone)]
pub struct CompletionOutcome {
    pub milestone: &'static Milestone,
    pub date: NaiveDate,
    pub vaccines: Vec<String>,
}

pub struct Tracker {
    config: TrackerConfig,
    store: Box<dyn ProfileStore>,
}

impl Tracker {
    /// Load the global config and open the file store it points at.
    pub fn load() -> TrackerResult<Self> {
        let config = TrackerConfig::load()?;
        let store = FileStore::new(config.data_path());
        Ok(Tracker::new(config, Box::new(store)))
    }

    pub fn new(config: TrackerConfig, store: Box<dyn ProfileStore>) -> Self {
        Tracker { config, store }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn store(&self) -> &dyn ProfileStore {
        self.store.as_ref()
    }

    // CHILDREN:

    pub fn children(&self) -> Vec<Child> {
        self.store.all_children()
    }

    /// Find a child by exact id, then by case-insensitive name.
    pub fn resolve_child(&self, query: &str) -> TrackerResult<Child> {
        let children = self.children();
        let query = query.trim();

        if let Some(child) = children.iter().find(|c| c.id == query) {
            return Ok(child.clone());
        }

        if let Some(child) = children
            .iter()
            .find(|c| c.name.to_lowercase() == query.to_lowercase())
        {
            return Ok(child.clone());
        }

        let available: Vec<_> = children.iter().map(|c| c.name.as_str()).collect();
        let hint = if available.is_empty() {
            "no children added yet".to_string()
        } else {
            format!("available: {}", available.join(", "))
        };

        Err(TrackerError::ChildNotFound(format!("'{}' ({})", query, hint)))
    }

    /// The configured default child, or else the most recently added one.
    pub fn default_child(&self) -> Option<Child> {
        self.config
            .default_child
            .as_deref()
            .and_then(|query| self.resolve_child(query).ok())
            .or_else(|| self.children().pop())
    }

    pub fn add_child(&mut self, name: &str, dob: &str, today: NaiveDate) -> TrackerResult<Child> {
        let mut validator = Validator::new(today);
        let Some(dob) = validator.child_data(name, dob) else {
            return Err(TrackerError::Validation(validator.into_errors()));
        };

        let child = Child::new(name, dob);
        self.store.save_child(&child)?;

        info!(id = %child.id, "Added child");
        Ok(child)
    }

    /// Re-save a child with a new name and/or date of birth, keeping its id.
    pub fn update_child(
        &mut self,
        child: &Child,
        name: Option<&str>,
        dob: Option<&str>,
        today: NaiveDate,
    ) -> TrackerResult<Child> {
        let mut validator = Validator::new(today);

        let name_ok = name.is_none_or(|n| validator.name(n));
        let new_dob = dob.map(|d| validator.date_of_birth(d));

        if !name_ok || matches!(new_dob, Some(None)) {
            return Err(TrackerError::Validation(validator.into_errors()));
        }

        let updated = Child {
            name: name.map(|n| n.trim().to_string()).unwrap_or_else(|| child.name.clone()),
            dob: new_dob.flatten().unwrap_or(child.dob),
            ..child.clone()
        };
        self.store.save_child(&updated)?;

        info!(id = %updated.id, "Updated child");
        Ok(updated)
    }

    pub fn delete_child(&mut self, child: &Child, options: DeleteOptions) -> TrackerResult<()> {
        self.store.delete_child(&child.id, options)?;
        info!(
            id = %child.id,
            with_data = options.include_vaccination_data,
            "Deleted child"
        );
        Ok(())
    }

    // COMPLETIONS:

    /// Record `date` for the given vaccines of a milestone (all of them when empty).
    pub fn complete_milestone(
        &mut self,
        child: &Child,
        age_label: &str,
        vaccines: &[String],
        date: &str,
        today: NaiveDate,
    ) -> TrackerResult<CompletionOutcome> {
        let milestone = find_milestone(age_label)
            .ok_or_else(|| TrackerError::MilestoneNotFound(age_label.to_string()))?;

        let mut validator = Validator::new(today);
        let Some(date) = validator.completion_date(date, child.dob) else {
            return Err(TrackerError::Validation(validator.into_errors()));
        };

        let vaccines: Vec<String> = if vaccines.is_empty() {
            milestone.vaccines.iter().map(|v| v.to_string()).collect()
        } else {
            vaccines
                .iter()
                .map(|v| canonical_vaccine(milestone, v))
                .collect::<TrackerResult<_>>()?
        };

        let date_str = date.format("%Y-%m-%d").to_string();
        for vaccine in &vaccines {
            self.store
                .save_vaccination_completion(&child.id, milestone.age_label, vaccine, &date_str)?;
        }

        info!(
            id = %child.id,
            milestone = milestone.age_label,
            count = vaccines.len(),
            "Recorded completion"
        );

        Ok(CompletionOutcome {
            milestone,
            date,
            vaccines,
        })
    }

    // DERIVED VIEWS:

    pub fn schedule(&self, child: &Child, today: NaiveDate) -> Vec<MilestoneProgress> {
        let data = self.store.vaccination_data(&child.id);
        evaluate_schedule(child.dob, &data.completions, today)
    }

    pub fn summary(&self, child: &Child, today: NaiveDate) -> ChildSummary {
        let data = self.store.vaccination_data(&child.id);
        ChildSummary::new(child.clone(), &data.completions, today)
    }

    /// One summary per child plus totals across all of them.
    pub fn dashboard(&self, today: NaiveDate) -> (Vec<ChildSummary>, DashboardTotals) {
        let summaries: Vec<ChildSummary> = self
            .children()
            .iter()
            .map(|child| self.summary(child, today))
            .collect();
        let totals = DashboardTotals::from_summaries(&summaries);
        (summaries, totals)
    }

    /// ICS text for the whole schedule, or for one milestone when `age_label` is given.
    pub fn calendar(
        &self,
        child: &Child,
        age_label: Option<&str>,
        now: DateTime<Utc>,
    ) -> TrackerResult<String> {
        match age_label {
            None => Ok(generate_schedule_ics(&child.name, child.dob, now)),
            Some(label) => {
                let milestone = find_milestone(label)
                    .ok_or_else(|| TrackerError::MilestoneNotFound(label.to_string()))?;
                Ok(generate_milestone_ics(&child.name, child.dob, milestone, now))
            }
        }
    }

    // BACKUP:

    pub fn export_data(&self) -> TrackerResult<String> {
        Ok(self.store.export_data()?)
    }

    pub fn import_data(&mut self, json: &str) -> TrackerResult<ImportSummary> {
        Ok(self.store.import_data(json)?)
    }

    pub fn clear_all_data(&mut self) -> TrackerResult<()> {
        self.store.clear_all_data()?;
        info!("Cleared all data");
        Ok(())
    }
}

/// Match a user-typed vaccine name against the milestone, ignoring case.
fn canonical_vaccine(milestone: &Milestone, vaccine: &str) -> TrackerResult<String> {
    milestone
        .vaccines
        .iter()
        .find(|v| v.eq_ignore_ascii_case(vaccine.trim()))
        .map(|v| v.to_string())
        .ok_or_else(|| TrackerError::VaccineNotInMilestone {
            age_label: milestone.age_label.to_string(),
            vaccine: vaccine.to_string(),
        })
}
