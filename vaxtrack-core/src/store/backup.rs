//! JSON backup export and import.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{ProfileStore, validate_child_id};
use crate::child::{Child, VaccinationData};
use crate::error::{StoreError, StoreResult};

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Backup {
    #[serde(default)]
    children: Option<Vec<Child>>,
    #[serde(default)]
    vaccination_data: Option<BTreeMap<String, VaccinationData>>,
}

/// Counts of what an import wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub children: usize,
    pub vaccination_records: usize,
}

pub(super) fn export<S: ProfileStore + ?Sized>(store: &S) -> StoreResult<String> {
    let children = store.all_children();
    let vaccination_data = children
        .iter()
        .map(|child| (child.id.clone(), store.vaccination_data(&child.id)))
        .collect();

    let backup = Backup {
        children: Some(children),
        vaccination_data: Some(vaccination_data),
    };

    Ok(serde_json::to_string_pretty(&backup)?)
}

/// Parse the whole document before writing anything, so a malformed
/// backup leaves the store untouched. Absent or empty sections are skipped.
pub(super) fn import<S: ProfileStore + ?Sized>(
    store: &mut S,
    json: &str,
) -> StoreResult<ImportSummary> {
    let backup: Backup =
        serde_json::from_str(json).map_err(|e| StoreError::Import(e.to_string()))?;

    let children = backup.children.unwrap_or_default();
    let vaccination_data = backup.vaccination_data.unwrap_or_default();

    for id in children
        .iter()
        .map(|c| c.id.as_str())
        .chain(vaccination_data.keys().map(String::as_str))
    {
        validate_child_id(id)?;
    }

    let mut summary = ImportSummary::default();

    if children.is_empty() {
        debug!("Backup has no children, keeping existing profiles");
    } else {
        store.replace_children(&children)?;
        summary.children = children.len();
    }

    for (child_id, data) in &vaccination_data {
        store.replace_vaccination_data(child_id, data)?;
        summary.vaccination_records += 1;
    }

    info!(
        children = summary.children,
        vaccination_records = summary.vaccination_records,
        "Imported backup"
    );

    Ok(summary)
}
