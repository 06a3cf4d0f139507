//! Input validation for new graph entries.
//!
//! # Responsibility
//! - Check the name and value inputs against the static entry rules.
//! - Check name uniqueness against the current list.
//! - Report every violation so the caller can raise one notification each.
//!
//! # Invariants
//! - Both fields are checked exactly once per run; at most one violation per
//!   field (first matching rule wins).
//! - The uniqueness check only runs when both fields passed their own rules.
//! - Numeric and range rules apply to the value field only.

use crate::model::graph::{GraphInput, GraphRecord, InputField};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Highest accepted percentage.
pub const MAX_VALUE: u64 = 100;

static SPECIAL_CHARACTERS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[!@#$%^&*()\[\]\-_=+|\\`~'";:,<.>/?]"#).expect("valid special character regex")
});
// ASCII only; `\D` would accept non-ASCII digits.
static NON_DIGIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^0-9]").expect("valid non-digit regex"));

/// Rule broken by a candidate entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationError {
    EmptyField,
    SpecialCharacters,
    NonNumericValue,
    OutOfRange,
    DuplicateName,
}

impl ValidationError {
    /// Short code shown in notification text as `[{code}Exception]`.
    pub fn code(self) -> &'static str {
        match self {
            Self::EmptyField => "ZeroField",
            Self::SpecialCharacters => "SpecialCharacters",
            Self::NonNumericValue => "Numeric",
            Self::OutOfRange => "NumberOutOfRange",
            Self::DuplicateName => "Duplicate",
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField => write!(f, "field is empty"),
            Self::SpecialCharacters => write!(f, "field contains special characters"),
            Self::NonNumericValue => write!(f, "value contains non-digit characters"),
            Self::OutOfRange => write!(f, "value is greater than {MAX_VALUE}"),
            Self::DuplicateName => write!(f, "name already exists"),
        }
    }
}

impl Error for ValidationError {}

/// One failed rule on one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Violation {
    pub field: InputField,
    pub error: ValidationError,
}

/// Outcome of one validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Violations in detection order (name, value, then duplicate).
    pub violations: Vec<Violation>,
    /// Field that should receive input focus, if any rule failed.
    pub focus: Option<InputField>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn errors(&self) -> impl Iterator<Item = ValidationError> + '_ {
        self.violations.iter().map(|violation| violation.error)
    }

    fn push(&mut self, field: InputField, error: ValidationError) {
        self.violations.push(Violation { field, error });
        self.focus = Some(field);
    }
}

/// Validates `input` against the entry rules and the current `graphs`.
pub fn validate_input(input: &GraphInput, graphs: &[GraphRecord]) -> ValidationReport {
    let mut report = ValidationReport::default();

    for field in InputField::ALL {
        if let Some(error) = check_field(field, input.field(field)) {
            report.push(field, error);
        }
    }

    if !report.is_valid() {
        return report;
    }

    if graphs.iter().any(|graph| graph.name == input.name) {
        report.push(InputField::Name, ValidationError::DuplicateName);
    }

    report
}

fn check_field(field: InputField, text: &str) -> Option<ValidationError> {
    if text.is_empty() {
        return Some(ValidationError::EmptyField);
    }
    if SPECIAL_CHARACTERS_RE.is_match(text) {
        return Some(ValidationError::SpecialCharacters);
    }
    if field != InputField::Value {
        return None;
    }
    if NON_DIGIT_RE.is_match(text) {
        return Some(ValidationError::NonNumericValue);
    }
    match text.parse::<u64>() {
        Ok(value) if value <= MAX_VALUE => None,
        // Digit-only text that overflows u64 is far past the range.
        _ => Some(ValidationError::OutOfRange),
    }
}

#[cfg(test)]
mod tests {
    use super::{validate_input, ValidationError, Violation};
    use crate::model::graph::{GraphInput, GraphRecord, InputField};

    fn errors_for(name: &str, value: &str) -> Vec<ValidationError> {
        validate_input(&GraphInput::new(name, value), &[])
            .errors()
            .collect()
    }

    #[test]
    fn accepts_boundary_values() {
        assert!(errors_for("cpu", "0").is_empty());
        assert!(errors_for("cpu", "100").is_empty());
        assert!(errors_for("cpu", "007").is_empty());
    }

    #[test]
    fn rule_precedence_is_empty_then_special_then_numeric_then_range() {
        assert_eq!(errors_for("cpu", ""), vec![ValidationError::EmptyField]);
        assert_eq!(
            errors_for("cpu", "5%"),
            vec![ValidationError::SpecialCharacters]
        );
        assert_eq!(
            errors_for("cpu", "5a"),
            vec![ValidationError::NonNumericValue]
        );
        assert_eq!(errors_for("cpu", "101"), vec![ValidationError::OutOfRange]);
        assert_eq!(
            errors_for("cpu", "123456789012345678901234567890"),
            vec![ValidationError::OutOfRange]
        );
    }

    #[test]
    fn name_field_skips_numeric_rules() {
        assert!(errors_for("abc 200", "1").is_empty());
    }

    #[test]
    fn both_fields_are_reported_and_last_failure_takes_focus() {
        let report = validate_input(&GraphInput::new("", "x"), &[]);
        assert_eq!(
            report.violations,
            vec![
                Violation {
                    field: InputField::Name,
                    error: ValidationError::EmptyField,
                },
                Violation {
                    field: InputField::Value,
                    error: ValidationError::NonNumericValue,
                },
            ]
        );
        assert_eq!(report.focus, Some(InputField::Value));
    }

    #[test]
    fn every_reserved_character_is_rejected() {
        for ch in "!@#$%^&*()[]-_=+|\\`~'\";:,<.>/?".chars() {
            assert_eq!(
                errors_for(&format!("a{ch}b"), "1"),
                vec![ValidationError::SpecialCharacters],
                "character {ch:?} should be reserved"
            );
        }
    }

    #[test]
    fn non_ascii_digits_are_not_numeric() {
        assert_eq!(
            errors_for("cpu", "\u{0665}"),
            vec![ValidationError::NonNumericValue]
        );
    }

    #[test]
    fn duplicate_check_is_exact_and_runs_last() {
        let graphs = vec![GraphRecord::new("cpu", "50")];

        let duplicate = validate_input(&GraphInput::new("cpu", "10"), &graphs);
        assert_eq!(
            duplicate.errors().collect::<Vec<_>>(),
            vec![ValidationError::DuplicateName]
        );
        assert_eq!(duplicate.focus, Some(InputField::Name));

        assert!(validate_input(&GraphInput::new("CPU", "10"), &graphs).is_valid());

        let invalid_value = validate_input(&GraphInput::new("cpu", "150"), &graphs);
        assert_eq!(
            invalid_value.errors().collect::<Vec<_>>(),
            vec![ValidationError::OutOfRange]
        );
    }
}
