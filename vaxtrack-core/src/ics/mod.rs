//! iCalendar export of vaccination schedules.
//!
//! Every vaccine becomes its own all-day VEVENT on the milestone's due date,
//! so calendar apps show one reminder per shot.

mod generate;

pub use generate::{
    ICS_PRODID, generate_milestone_ics, generate_schedule_ics, ics_file_name,
};
