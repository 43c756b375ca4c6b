//! Persistence of child profiles and completion records.
//!
//! A store holds two key spaces: the ordered list of children, and one
//! [`VaccinationData`] blob per child id. Implementations only provide the
//! raw reads and writes; upserts, cascading deletes and backups are shared.

mod backup;
mod file;
mod memory;

pub use backup::ImportSummary;
pub use file::FileStore;
pub use memory::MemoryStore;

use crate::child::{Child, VaccinationData};
use crate::error::{StoreError, StoreResult};

/// What to remove alongside a child profile.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeleteOptions {
    pub include_vaccination_data: bool,
}

/// Child ids double as storage keys, so they are restricted to a safe charset.
pub fn validate_child_id(id: &str) -> StoreResult<()> {
    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidChildId(id.to_string()))
    }
}

pub trait ProfileStore {
    /// All children in insertion order. Unreadable data reads as no children.
    fn all_children(&self) -> Vec<Child>;

    fn replace_children(&mut self, children: &[Child]) -> StoreResult<()>;

    /// Completion data for a child. Missing or unreadable data reads as empty.
    fn vaccination_data(&self, child_id: &str) -> VaccinationData;

    fn replace_vaccination_data(&mut self, child_id: &str, data: &VaccinationData)
    -> StoreResult<()>;

    fn remove_vaccination_data(&mut self, child_id: &str) -> StoreResult<()>;

    /// Remove every child and every completion record.
    fn clear_all_data(&mut self) -> StoreResult<()>;

    fn child(&self, child_id: &str) -> Option<Child> {
        self.all_children().into_iter().find(|c| c.id == child_id)
    }

    /// Insert a new child or overwrite the one with the same id in place.
    fn save_child(&mut self, child: &Child) -> StoreResult<()> {
        validate_child_id(&child.id)?;

        let mut children = self.all_children();
        match children.iter_mut().find(|c| c.id == child.id) {
            Some(existing) => *existing = child.clone(),
            None => children.push(child.clone()),
        }

        self.replace_children(&children)
    }

    fn delete_child(&mut self, child_id: &str, options: DeleteOptions) -> StoreResult<()> {
        let children: Vec<Child> = self
            .all_children()
            .into_iter()
            .filter(|c| c.id != child_id)
            .collect();
        self.replace_children(&children)?;

        if options.include_vaccination_data {
            self.remove_vaccination_data(child_id)?;
        }

        Ok(())
    }

    fn save_vaccination_completion(
        &mut self,
        child_id: &str,
        age_label: &str,
        vaccine: &str,
        completion_date: &str,
    ) -> StoreResult<()> {
        let mut data = self.vaccination_data(child_id);
        data.record(age_label, vaccine, completion_date);
        self.replace_vaccination_data(child_id, &data)
    }

    /// Serialize every child and its completion data as pretty JSON.
    fn export_data(&self) -> StoreResult<String> {
        backup::export(self)
    }

    /// Load a JSON backup produced by [`export_data`](Self::export_data).
    fn import_data(&mut self, json: &str) -> StoreResult<ImportSummary> {
        backup::import(self, json)
    }
}
