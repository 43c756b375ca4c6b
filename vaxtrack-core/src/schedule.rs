//! The fixed vaccination milestone table.

use std::fmt;

use serde::Serialize;

/// One scheduled checkpoint: an age label and the vaccines due at that age.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Milestone {
    pub age_label: &'static str,
    pub vaccines: &'static [&'static str],
}

impl Milestone {
    pub fn contains(&self, vaccine: &str) -> bool {
        self.vaccines.contains(&vaccine)
    }

    /// First vaccine of the milestone, used for "next due" labels.
    pub fn lead_vaccine(&self) -> &'static str {
        self.vaccines.first().copied().unwrap_or(self.age_label)
    }
}

impl fmt::Display for Milestone {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.age_label)
    }
}

/// Ordered milestone table. Order is meaningful and never re-sorted.
pub static SCHEDULE: &[Milestone] = &[
    Milestone {
        age_label: "Birth",
        vaccines: &["BCG", "OPV 0", "Hep B-1"],
    },
    Milestone {
        age_label: "6 Weeks",
        vaccines: &["DTWP/DTaP-1", "IPV-1", "Hib-1", "Rotavirus-1", "PCV-1"],
    },
    Milestone {
        age_label: "10 Weeks",
        vaccines: &["DTWP/DTaP-2", "IPV-2", "Hib-2", "Rotavirus-2", "PCV-2"],
    },
    Milestone {
        age_label: "14 Weeks",
        vaccines: &["DTWP/DTaP-3", "IPV-3", "Hib-3", "Rotavirus-3", "PCV-3"],
    },
    Milestone {
        age_label: "6 Months",
        vaccines: &["Influenza (IIV)-1"],
    },
    Milestone {
        age_label: "7 Months",
        vaccines: &["Influenza (IIV)-2"],
    },
    Milestone {
        age_label: "6-9 Months",
        vaccines: &["Typhoid Conjugate Vaccine"],
    },
    Milestone {
        age_label: "9 Months",
        vaccines: &["MMR-1", "Meningococcal-1"],
    },
    Milestone {
        age_label: "12 Months",
        vaccines: &[
            "Hepatitis A",
            "Meningococcal-2",
            "Japanese Encephalitis-1",
            "Cholera-1",
        ],
    },
    Milestone {
        age_label: "13 Months",
        vaccines: &["Japanese Encephalitis-2", "Cholera-2"],
    },
    Milestone {
        age_label: "15 Months",
        vaccines: &["MMR-2", "Varicella-1", "PCV Booster"],
    },
    Milestone {
        age_label: "16-18 Months",
        vaccines: &["DTWP/DTaP-B1", "Hib-B1", "IPV-B1"],
    },
    Milestone {
        age_label: "18-19 Months",
        vaccines: &["Hep A-2", "Varicella-2"],
    },
    Milestone {
        age_label: "4-6 Years",
        vaccines: &["DTWP/DTaP-B2", "IPV-B2", "MMR-3"],
    },
    Milestone {
        age_label: "10-12 Years",
        vaccines: &["Tdap", "HPV"],
    },
];

/// Find a milestone by its age label, ignoring case and surrounding whitespace.
pub fn find_milestone(age_label: &str) -> Option<&'static Milestone> {
    let wanted = age_label.trim();
    SCHEDULE
        .iter()
        .find(|m| m.age_label.eq_ignore_ascii_case(wanted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_schedule_starts_at_birth_with_three_vaccines() {
        let birth = &SCHEDULE[0];
        assert_eq!(birth.age_label, "Birth");
        assert_eq!(birth.vaccines.len(), 3);
    }

    #[test]
    fn test_vaccine_names_unique_within_milestone() {
        for milestone in SCHEDULE {
            let unique: HashSet<_> = milestone.vaccines.iter().collect();
            assert_eq!(
                unique.len(),
                milestone.vaccines.len(),
                "Duplicate vaccine in {}",
                milestone
            );
        }
    }

    #[test]
    fn test_age_labels_unique() {
        let labels: HashSet<_> = SCHEDULE.iter().map(|m| m.age_label).collect();
        assert_eq!(labels.len(), SCHEDULE.len());
    }

    #[test]
    fn test_find_milestone_is_case_insensitive() {
        let found = find_milestone("  6-9 months ").expect("milestone should be found");
        assert_eq!(found.age_label, "6-9 Months");
        assert!(find_milestone("11 Weeks").is_none());
    }

    #[test]
    fn test_lead_vaccine() {
        let m = find_milestone("9 Months").unwrap();
        assert_eq!(m.lead_vaccine(), "MMR-1");
        assert!(m.contains("Meningococcal-1"));
        assert!(!m.contains("BCG"));
    }
}
