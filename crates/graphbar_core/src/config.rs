//! Widget configuration.
//!
//! # Responsibility
//! - Hold every externally supplied literal: storage key, element ids, field
//!   labels, error messages and notification timings.
//! - Parse host-provided JSON with per-field defaults.
//!
//! # Invariants
//! - `WidgetConfig::default()` always passes `validate()`.
//! - Missing JSON fields fall back to their defaults; unknown fields are rejected.

use crate::model::graph::InputField;
use crate::notify::NotificationTiming;
use crate::repo::graph_repo::{MalformedPolicy, DEFAULT_GRAPH_LIST_KEY};
use crate::validation::ValidationError;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    EmptyValue(&'static str),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid widget config: {err}"),
            Self::EmptyValue(field) => write!(f, "widget config `{field}` cannot be empty"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::EmptyValue(_) => None,
        }
    }
}

/// Complete widget configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WidgetConfig {
    /// Key holding the serialized graph list.
    pub storage_key: String,
    /// What to do when the stored list cannot be parsed.
    pub malformed_storage: MalformedPolicy,
    pub elements: ElementIds,
    pub labels: FieldLabels,
    pub messages: ErrorMessages,
    pub notifications: NotificationTiming,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_GRAPH_LIST_KEY.to_string(),
            malformed_storage: MalformedPolicy::Fail,
            elements: ElementIds::default(),
            labels: FieldLabels::default(),
            messages: ErrorMessages::default(),
            notifications: NotificationTiming::default(),
        }
    }
}

impl WidgetConfig {
    /// Parses and validates a JSON config document.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.storage_key, "storage_key")?;
        self.elements.validate()
    }
}

/// DOM element ids the widget binds to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ElementIds {
    pub list: String,
    pub form: String,
    pub name_input: String,
    pub value_input: String,
    pub submit: String,
    pub read_only_toggle: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            list: "grp-wrap".to_string(),
            form: "grp-input".to_string(),
            name_input: "column".to_string(),
            value_input: "value".to_string(),
            submit: "btn".to_string(),
            read_only_toggle: "readonly".to_string(),
        }
    }
}

impl ElementIds {
    fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.list, "elements.list")?;
        require_non_empty(&self.form, "elements.form")?;
        require_non_empty(&self.name_input, "elements.name_input")?;
        require_non_empty(&self.value_input, "elements.value_input")?;
        require_non_empty(&self.submit, "elements.submit")?;
        require_non_empty(&self.read_only_toggle, "elements.read_only_toggle")
    }
}

/// Field labels shown in notifications.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldLabels {
    pub name: String,
    pub value: String,
}

impl Default for FieldLabels {
    fn default() -> Self {
        Self {
            name: "column".to_string(),
            value: "value".to_string(),
        }
    }
}

impl FieldLabels {
    pub fn label(&self, field: InputField) -> &str {
        match field {
            InputField::Name => &self.name,
            InputField::Value => &self.value,
        }
    }
}

/// User-facing message per validation error.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ErrorMessages {
    pub empty_field: String,
    pub special_characters: String,
    pub non_numeric: String,
    pub out_of_range: String,
    pub duplicate_name: String,
}

impl Default for ErrorMessages {
    fn default() -> Self {
        Self {
            empty_field: "Please enter at least one character.".to_string(),
            special_characters: "Special characters are not allowed.".to_string(),
            non_numeric: "Only numbers can be entered.".to_string(),
            out_of_range: "Please enter a number between 0 and 100.".to_string(),
            duplicate_name: "An entry with the same name already exists.".to_string(),
        }
    }
}

impl ErrorMessages {
    pub fn message(&self, error: ValidationError) -> &str {
        match error {
            ValidationError::EmptyField => &self.empty_field,
            ValidationError::SpecialCharacters => &self.special_characters,
            ValidationError::NonNumericValue => &self.non_numeric,
            ValidationError::OutOfRange => &self.out_of_range,
            ValidationError::DuplicateName => &self.duplicate_name,
        }
    }
}

fn require_non_empty(value: &str, field: &'static str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::EmptyValue(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, WidgetConfig};
    use crate::repo::graph_repo::MalformedPolicy;

    #[test]
    fn empty_object_yields_defaults() {
        let config = WidgetConfig::from_json("{}").unwrap();
        assert_eq!(config, WidgetConfig::default());
        assert_eq!(config.storage_key, "graphList");
        assert_eq!(config.notifications.hide_after_ms, 3_000);
        assert_eq!(config.notifications.remove_after_ms, 1_000);
    }

    #[test]
    fn partial_overrides_keep_other_defaults() {
        let config = WidgetConfig::from_json(
            r#"{
                "malformed_storage": "treat_as_empty",
                "elements": { "list": "bars" },
                "messages": { "duplicate_name": "taken" },
                "notifications": { "hide_after_ms": 500 }
            }"#,
        )
        .unwrap();

        assert_eq!(config.malformed_storage, MalformedPolicy::TreatAsEmpty);
        assert_eq!(config.elements.list, "bars");
        assert_eq!(config.elements.submit, "btn");
        assert_eq!(config.messages.duplicate_name, "taken");
        assert_eq!(config.notifications.hide_after_ms, 500);
        assert_eq!(config.notifications.remove_after_ms, 1_000);
    }

    #[test]
    fn rejects_empty_ids_and_unknown_fields() {
        let err = WidgetConfig::from_json(r#"{ "storage_key": " " }"#).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyValue("storage_key")));

        let err = WidgetConfig::from_json(r#"{ "elements": { "submit": "" } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyValue("elements.submit")));

        let err = WidgetConfig::from_json(r#"{ "colour": "red" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
