//! Input validation for child profiles and completion dates.

use chrono::NaiveDate;
use thiserror::Error;

pub const MIN_NAME_LEN: usize = 2;
pub const MAX_NAME_LEN: usize = 50;
pub const MAX_AGE_YEARS: f64 = 18.0;

const DAYS_PER_YEAR: f64 = 365.25;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Child name is required")]
    NameRequired,

    #[error("Child name must be at least 2 characters long")]
    NameTooShort,

    #[error("Child name must be less than 50 characters")]
    NameTooLong,

    #[error("Child name can only contain letters, spaces, hyphens, apostrophes, and dots")]
    NameInvalidCharacters,

    #[error("Date of birth is required")]
    DobRequired,

    #[error("Please enter a valid date of birth")]
    DobInvalid,

    #[error("Date of birth cannot be in the future")]
    DobInFuture,

    #[error("This tracker is designed for children under 18 years")]
    DobTooOld,

    #[error("Completion date is required")]
    CompletionDateRequired,

    #[error("Please enter a valid completion date")]
    CompletionDateInvalid,

    #[error("Completion date cannot be before date of birth")]
    CompletionBeforeBirth,

    #[error("Completion date cannot be in the future")]
    CompletionInFuture,
}

/// Parse a `YYYY-MM-DD` date as entered by a user.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c.is_whitespace() || matches!(c, '-' | '\'' | '.')
}

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    let name = name.trim();
    let len = name.chars().count();

    if len == 0 {
        return Err(ValidationError::NameRequired);
    }
    if len < MIN_NAME_LEN {
        return Err(ValidationError::NameTooShort);
    }
    if len > MAX_NAME_LEN {
        return Err(ValidationError::NameTooLong);
    }
    if !name.chars().all(is_name_char) {
        return Err(ValidationError::NameInvalidCharacters);
    }

    Ok(())
}

pub fn validate_date_of_birth(dob: &str, today: NaiveDate) -> Result<NaiveDate, ValidationError> {
    if dob.trim().is_empty() {
        return Err(ValidationError::DobRequired);
    }

    let dob = parse_date(dob).ok_or(ValidationError::DobInvalid)?;

    if dob > today {
        return Err(ValidationError::DobInFuture);
    }

    let age_in_years = (today - dob).num_days() as f64 / DAYS_PER_YEAR;
    if age_in_years > MAX_AGE_YEARS {
        return Err(ValidationError::DobTooOld);
    }

    Ok(dob)
}

pub fn validate_completion_date(
    completion_date: &str,
    dob: NaiveDate,
    today: NaiveDate,
) -> Result<NaiveDate, ValidationError> {
    if completion_date.trim().is_empty() {
        return Err(ValidationError::CompletionDateRequired);
    }

    let date = parse_date(completion_date).ok_or(ValidationError::CompletionDateInvalid)?;

    if date < dob {
        return Err(ValidationError::CompletionBeforeBirth);
    }
    if date > today {
        return Err(ValidationError::CompletionInFuture);
    }

    Ok(date)
}

/// Join validation errors into a single user-facing message.
pub fn format_error_message(errors: &[ValidationError]) -> String {
    match errors {
        [] => String::new(),
        [only] => only.to_string(),
        _ => {
            let lines: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            format!("Please fix the following errors:\n{}", lines.join("\n"))
        }
    }
}

/// Collects every error from a multi-field check.
#[derive(Debug, Clone)]
pub struct Validator {
    today: NaiveDate,
    errors: Vec<ValidationError>,
}

impl Validator {
    pub fn new(today: NaiveDate) -> Self {
        Validator {
            today,
            errors: Vec::new(),
        }
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }

    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }

    fn check<T>(&mut self, result: Result<T, ValidationError>) -> Option<T> {
        result.map_err(|e| self.errors.push(e)).ok()
    }

    pub fn name(&mut self, name: &str) -> bool {
        self.check(validate_name(name)).is_some()
    }

    pub fn date_of_birth(&mut self, dob: &str) -> Option<NaiveDate> {
        self.check(validate_date_of_birth(dob, self.today))
    }

    pub fn completion_date(&mut self, completion_date: &str, dob: NaiveDate) -> Option<NaiveDate> {
        self.check(validate_completion_date(completion_date, dob, self.today))
    }

    /// Validate name and date of birth together, starting from a clean slate.
    pub fn child_data(&mut self, name: &str, dob: &str) -> Option<NaiveDate> {
        self.clear_errors();
        let name_ok = self.name(name);
        let dob = self.date_of_birth(dob);
        dob.filter(|_| name_ok)
    }

    pub fn format_error_message(&self) -> String {
        format_error_message(&self.errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn test_valid_names() {
        for name in ["John", "Mary Jane", "O'Connor", "Jean-Pierre", "Ab", "J. R. Smith"] {
            assert_eq!(validate_name(name), Ok(()), "{} should be valid", name);
        }
    }

    #[test]
    fn test_name_required() {
        assert_eq!(validate_name(""), Err(ValidationError::NameRequired));
        assert_eq!(validate_name("   "), Err(ValidationError::NameRequired));
    }

    #[test]
    fn test_name_length_limits() {
        assert_eq!(validate_name("A"), Err(ValidationError::NameTooShort));
        assert_eq!(validate_name(&"A".repeat(50)), Ok(()));
        assert_eq!(validate_name(&"A".repeat(51)), Err(ValidationError::NameTooLong));
    }

    #[test]
    fn test_name_invalid_characters() {
        for name in ["John123", "Mary@Jane", "Test#Name", "Child$Name", "Name%Test"] {
            let err = validate_name(name).unwrap_err();
            assert_eq!(err, ValidationError::NameInvalidCharacters, "{}", name);
            assert_eq!(
                err.to_string(),
                "Child name can only contain letters, spaces, hyphens, apostrophes, and dots"
            );
        }
    }

    #[test]
    fn test_date_of_birth_rules() {
        assert!(validate_date_of_birth("2023-01-01", today()).is_ok());
        assert!(validate_date_of_birth("2006-03-20", today()).is_ok());
        assert!(validate_date_of_birth("2024-01-01", today()).is_ok(), "Today is allowed");

        assert_eq!(validate_date_of_birth("", today()), Err(ValidationError::DobRequired));
        for bad in ["invalid-date", "2023-13-01", "2023-00-01", "2023-01-32"] {
            assert_eq!(
                validate_date_of_birth(bad, today()),
                Err(ValidationError::DobInvalid),
                "{}",
                bad
            );
        }
        assert_eq!(
            validate_date_of_birth("2024-01-02", today()),
            Err(ValidationError::DobInFuture)
        );
        assert_eq!(
            validate_date_of_birth("2005-01-01", today()),
            Err(ValidationError::DobTooOld)
        );
    }

    #[test]
    fn test_completion_date_rules() {
        let dob = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();

        assert!(validate_completion_date("2023-01-01", dob, today()).is_ok());
        assert_eq!(
            validate_completion_date("", dob, today()),
            Err(ValidationError::CompletionDateRequired)
        );
        assert_eq!(
            validate_completion_date("someday", dob, today()),
            Err(ValidationError::CompletionDateInvalid)
        );
        assert_eq!(
            validate_completion_date("2022-12-31", dob, today()),
            Err(ValidationError::CompletionBeforeBirth)
        );
        assert_eq!(
            validate_completion_date("2024-01-02", dob, today()),
            Err(ValidationError::CompletionInFuture)
        );
    }

    #[test]
    fn test_validator_collects_all_child_errors() {
        let mut validator = Validator::new(today());
        assert_eq!(validator.child_data("X", "2030-01-01"), None);
        assert_eq!(
            validator.errors(),
            &[ValidationError::NameTooShort, ValidationError::DobInFuture]
        );
        assert_eq!(
            validator.format_error_message(),
            "Please fix the following errors:\n\
             Child name must be at least 2 characters long\n\
             Date of birth cannot be in the future"
        );

        assert!(validator.child_data("Asha", "2023-06-01").is_some());
        assert!(validator.errors().is_empty(), "child_data starts fresh");
        assert_eq!(validator.format_error_message(), "");
    }

    #[test]
    fn test_single_error_message_is_unwrapped() {
        let mut validator = Validator::new(today());
        validator.name("");
        assert_eq!(validator.format_error_message(), "Child name is required");
    }
}
