pub mod add;
pub mod backup;
pub mod complete;
pub mod config;
pub mod delete;
pub mod edit;
pub mod ics;
pub mod list;
pub mod reset;
pub mod show;

use vaxtrack_core::TrackerError;

/// Wrap storage failures so the user sees what didn't happen.
pub fn save_error(err: TrackerError) -> anyhow::Error {
    match err {
        TrackerError::Store(_) => anyhow::Error::new(err).context("Could not save data"),
        other => other.into(),
    }
}
