//! JSON-file backed store.
//!
//! Layout under the data directory:
//!
//! ```text
//! children.json
//! vaccinations/<child-id>.json
//! ```

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::{ProfileStore, validate_child_id};
use crate::child::{Child, VaccinationData};
use crate::error::StoreResult;

const CHILDREN_FILE: &str = "children.json";
const VACCINATIONS_DIR: &str = "vaccinations";

#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FileStore { root: root.into() }
    }

    fn children_path(&self) -> PathBuf {
        self.root.join(CHILDREN_FILE)
    }

    fn vaccinations_dir(&self) -> PathBuf {
        self.root.join(VACCINATIONS_DIR)
    }

    fn vaccination_path(&self, child_id: &str) -> StoreResult<PathBuf> {
        validate_child_id(child_id)?;
        Ok(self.vaccinations_dir().join(format!("{}.json", child_id)))
    }
}

/// Read and parse a JSON file. A missing, unreadable or corrupt file is
/// treated as absent.
fn read_json<T: DeserializeOwned>(path: &Path) -> Option<T> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return None,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Could not read data file, ignoring it");
            return None;
        }
    };

    match serde_json::from_str(&content) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Corrupt data file, ignoring it");
            None
        }
    }
}

/// Write via a temp file and rename so readers never see a half-written file.
fn write_json_atomic<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> StoreResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let content = serde_json::to_string_pretty(value)?;
    let temp = path.with_extension("json.tmp");

    std::fs::write(&temp, content)?;
    std::fs::rename(&temp, path)?;

    debug!(path = %path.display(), "Wrote data file");
    Ok(())
}

fn remove_if_exists(path: &Path) -> StoreResult<()> {
    match std::fs::remove_file(path) {
        Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
        _ => Ok(()),
    }
}

impl ProfileStore for FileStore {
    fn all_children(&self) -> Vec<Child> {
        read_json(&self.children_path()).unwrap_or_default()
    }

    fn replace_children(&mut self, children: &[Child]) -> StoreResult<()> {
        write_json_atomic(&self.children_path(), children)
    }

    fn vaccination_data(&self, child_id: &str) -> VaccinationData {
        match self.vaccination_path(child_id) {
            Ok(path) => read_json(&path).unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "Skipping vaccination data lookup");
                VaccinationData::default()
            }
        }
    }

    fn replace_vaccination_data(
        &mut self,
        child_id: &str,
        data: &VaccinationData,
    ) -> StoreResult<()> {
        write_json_atomic(&self.vaccination_path(child_id)?, data)
    }

    fn remove_vaccination_data(&mut self, child_id: &str) -> StoreResult<()> {
        remove_if_exists(&self.vaccination_path(child_id)?)
    }

    fn clear_all_data(&mut self) -> StoreResult<()> {
        remove_if_exists(&self.children_path())?;

        match std::fs::remove_dir_all(self.vaccinations_dir()) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::DeleteOptions;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn child(id: &str) -> Child {
        Child {
            id: id.to_string(),
            name: "Asha".to_string(),
            dob: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            created_at: "2023-01-01T00:00:00Z".parse().unwrap(),
        }
    }

    #[test]
    fn test_empty_directory_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("missing"));

        assert!(store.all_children().is_empty());
        assert!(store.vaccination_data("a1").completions.is_empty());
    }

    #[test]
    fn test_children_persist_across_instances() {
        let dir = TempDir::new().unwrap();
        FileStore::new(dir.path()).save_child(&child("a1")).unwrap();

        let reopened = FileStore::new(dir.path());
        assert_eq!(reopened.all_children(), vec![child("a1")]);
        assert!(dir.path().join("children.json").exists());
        assert!(
            !dir.path().join("children.json.tmp").exists(),
            "Temp file should be renamed away"
        );
    }

    #[test]
    fn test_completions_written_per_child() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path());
        store
            .save_vaccination_completion("a1", "Birth", "BCG", "2023-01-01")
            .unwrap();

        let path = dir.path().join("vaccinations/a1.json");
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"completions\""), "Got {}", content);
        assert_eq!(
            store.vaccination_data("a1").completions["Birth"]["BCG"],
            "2023-01-01"
        );
    }

    #[test]
    fn test_corrupt_files_read_as_absent() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("children.json"), "{not json").unwrap();
        std::fs::create_dir_all(dir.path().join("vaccinations")).unwrap();
        std::fs::write(dir.path().join("vaccinations/a1.json"), "[1, 2").unwrap();

        let store = FileStore::new(dir.path());
        assert!(store.all_children().is_empty());
        assert!(store.vaccination_data("a1").completions.is_empty());
    }

    #[test]
    fn test_corrupt_children_file_is_replaced_on_save() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("children.json"), "garbage").unwrap();

        let mut store = FileStore::new(dir.path());
        store.save_child(&child("a1")).unwrap();
        assert_eq!(store.all_children().len(), 1);
    }

    #[test]
    fn test_delete_with_data_removes_file() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path());
        store.save_child(&child("a1")).unwrap();
        store
            .save_vaccination_completion("a1", "Birth", "BCG", "2023-01-01")
            .unwrap();

        store
            .delete_child(
                "a1",
                DeleteOptions {
                    include_vaccination_data: true,
                },
            )
            .unwrap();

        assert!(store.all_children().is_empty());
        assert!(!dir.path().join("vaccinations/a1.json").exists());
    }

    #[test]
    fn test_clear_all_data() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path());
        store.save_child(&child("a1")).unwrap();
        store
            .save_vaccination_completion("a1", "Birth", "BCG", "2023-01-01")
            .unwrap();

        store.clear_all_data().unwrap();
        assert!(store.all_children().is_empty());
        assert!(!dir.path().join("vaccinations").exists());

        // Clearing twice is fine.
        store.clear_all_data().unwrap();
    }

    #[test]
    fn test_invalid_id_never_touches_disk() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path());

        assert!(
            store
                .replace_vaccination_data("../escape", &VaccinationData::default())
                .is_err()
        );
        assert!(!dir.path().join("escape.json").exists());
    }
}
