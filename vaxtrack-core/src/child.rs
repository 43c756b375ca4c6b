//! Child profiles and their completion records.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::schedule::Milestone;

/// A tracked child.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Child {
    pub id: String,
    pub name: String,
    pub dob: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Child {
    pub fn new(name: &str, dob: NaiveDate) -> Self {
        Child {
            id: generate_id(),
            name: name.trim().to_string(),
            dob,
            created_at: Utc::now(),
        }
    }
}

impl fmt::Display for Child {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

fn generate_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// age label -> vaccine name -> completion date (`YYYY-MM-DD`)
pub type CompletionRecord = BTreeMap<String, BTreeMap<String, String>>;

/// Everything stored per child besides the profile itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VaccinationData {
    #[serde(default)]
    pub completions: CompletionRecord,
}

impl VaccinationData {
    pub fn record(&mut self, age_label: &str, vaccine: &str, date: &str) {
        self.completions
            .entry(age_label.to_string())
            .or_default()
            .insert(vaccine.to_string(), date.to_string());
    }
}

/// Completion dates recorded for a milestone, if any.
pub fn completed_for<'a>(
    completions: &'a CompletionRecord,
    milestone: &Milestone,
) -> Option<&'a BTreeMap<String, String>> {
    completions.get(milestone.age_label)
}

/// A milestone counts as complete only when every vaccine has a non-empty date.
pub fn is_milestone_complete(completions: &CompletionRecord, milestone: &Milestone) -> bool {
    let Some(done) = completed_for(completions, milestone) else {
        return false;
    };

    milestone
        .vaccines
        .iter()
        .all(|v| done.get(*v).is_some_and(|d| !d.trim().is_empty()))
}

/// Number of vaccines in `milestone` that have a non-empty completion date.
pub fn completed_vaccine_count(completions: &CompletionRecord, milestone: &Milestone) -> usize {
    let Some(done) = completed_for(completions, milestone) else {
        return 0;
    };

    milestone
        .vaccines
        .iter()
        .filter(|v| done.get(**v).is_some_and(|d| !d.trim().is_empty()))
        .count()
}

/// Earliest parseable completion date recorded for a milestone.
pub fn first_completion_date(
    completions: &CompletionRecord,
    milestone: &Milestone,
) -> Option<NaiveDate> {
    completed_for(completions, milestone)?
        .values()
        .filter_map(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok())
        .min()
}
