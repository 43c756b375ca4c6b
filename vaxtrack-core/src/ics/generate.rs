//! ICS file generation.

use chrono::{DateTime, Days, NaiveDate, Utc};
use icalendar::{Calendar, Component, Property, ValueType};

use crate::due_date::resolve_due_date;
use crate::schedule::{Milestone, SCHEDULE};

pub const ICS_PRODID: &str = "-//VaccinationTracker//NONSGML v1.0//EN";

/// Generate a calendar with one all-day event per vaccine in the whole schedule.
pub fn generate_schedule_ics(child_name: &str, dob: NaiveDate, now: DateTime<Utc>) -> String {
    build_calendar(child_name, dob, SCHEDULE, now)
}

/// Generate a calendar for a single milestone.
pub fn generate_milestone_ics(
    child_name: &str,
    dob: NaiveDate,
    milestone: &Milestone,
    now: DateTime<Utc>,
) -> String {
    build_calendar(child_name, dob, std::slice::from_ref(milestone), now)
}

/// File name for a child's calendar export, e.g. `Mary-Jane-vaccination-schedule.ics`.
pub fn ics_file_name(child_name: &str) -> String {
    let dashed = child_name.split_whitespace().collect::<Vec<_>>().join("-");
    format!("{}-vaccination-schedule.ics", dashed)
}

fn build_calendar(
    child_name: &str,
    dob: NaiveDate,
    milestones: &[Milestone],
    now: DateTime<Utc>,
) -> String {
    let mut cal = Calendar::new();
    let stamp = now.format("%Y%m%dT%H%M%S").to_string();

    for milestone in milestones {
        let due = resolve_due_date(dob, milestone.age_label);
        // `due` is never the last representable day for real birth dates
        let end = due.checked_add_days(Days::new(1)).unwrap_or(due);

        for vaccine in milestone.vaccines {
            cal.push(vaccine_event(child_name, vaccine, milestone, due, end, &stamp));
        }
    }

    let cal = cal.done();
    normalize_header(&cal.to_string())
}

fn vaccine_event(
    child_name: &str,
    vaccine: &str,
    milestone: &Milestone,
    due: NaiveDate,
    end: NaiveDate,
    stamp: &str,
) -> icalendar::Event {
    let mut event = icalendar::Event::new();

    event.uid(&format!("{}-{}", stamp, random_suffix()));
    event.add_property("DTSTAMP", format!("{}Z", stamp));
    add_date_property(&mut event, "DTSTART", due);
    add_date_property(&mut event, "DTEND", end);
    event.summary(&format!("{} - {}", child_name, vaccine));
    event.description(&format!(
        "Vaccination for {}. This is due around the {} milestone.",
        child_name, milestone.age_label
    ));

    event.done()
}

fn add_date_property(event: &mut icalendar::Event, name: &str, date: NaiveDate) {
    let mut prop = Property::new(name, date.format("%Y%m%d").to_string());
    prop.append_parameter(ValueType::Date);
    event.append_property(prop);
}

fn random_suffix() -> String {
    let mut id = uuid::Uuid::new_v4().simple().to_string();
    id.truncate(7);
    id
}

/// Rewrite the calendar header written by the icalendar crate:
/// our PRODID, followed by an explicit CALSCALE:GREGORIAN.
fn normalize_header(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:");
            result.push_str(ICS_PRODID);
            result.push_str("\r\nCALSCALE:GREGORIAN\r\n");
            continue;
        }

        if line.starts_with("CALSCALE:") {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}
