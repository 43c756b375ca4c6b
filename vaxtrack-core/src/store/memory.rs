//! In-memory store, used in tests and for throwaway sessions.

use std::collections::BTreeMap;

use super::ProfileStore;
use crate::child::{Child, VaccinationData};
use crate::error::StoreResult;

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    children: Vec<Child>,
    vaccinations: BTreeMap<String, VaccinationData>,
}

impl ProfileStore for MemoryStore {
    fn all_children(&self) -> Vec<Child> {
        self.children.clone()
    }

    fn replace_children(&mut self, children: &[Child]) -> StoreResult<()> {
        self.children = children.to_vec();
        Ok(())
    }

    fn vaccination_data(&self, child_id: &str) -> VaccinationData {
        self.vaccinations.get(child_id).cloned().unwrap_or_default()
    }

    fn replace_vaccination_data(
        &mut self,
        child_id: &str,
        data: &VaccinationData,
    ) -> StoreResult<()> {
        self.vaccinations.insert(child_id.to_string(), data.clone());
        Ok(())
    }

    fn remove_vaccination_data(&mut self, child_id: &str) -> StoreResult<()> {
        self.vaccinations.remove(child_id);
        Ok(())
    }

    fn clear_all_data(&mut self) -> StoreResult<()> {
        self.children.clear();
        self.vaccinations.clear();
        Ok(())
    }
}
