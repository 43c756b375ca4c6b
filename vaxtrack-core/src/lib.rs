//! Core library for vaxtrack.
//!
//! - `schedule`: the fixed milestone table
//! - `due_date`: age label to due date resolution
//! - `stats`: per-milestone status and dashboard aggregation
//! - `store`: persistence of children and completion records
//! - `ics`: calendar export
//! - `tracker`: service object tying config, store and validation together

pub mod age;
pub mod child;
pub mod config;
pub mod due_date;
pub mod error;
pub mod ics;
pub mod schedule;
pub mod stats;
pub mod store;
pub mod tracker;
pub mod validate;

pub use child::{Child, CompletionRecord, VaccinationData};
pub use error::{StoreError, TrackerError, TrackerResult};
pub use tracker::Tracker;
