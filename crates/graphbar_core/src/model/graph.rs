//! Graph record model.
//!
//! # Responsibility
//! - Define the canonical `{ name, value }` record and its persisted shape.
//! - Derive the display fill width used by the bar renderer.
//!
//! # Invariants
//! - Creation-time rules (non-empty, digits only, `0..=100`, unique name) are
//!   enforced by `validation`, not by this type. Stored records are accepted
//!   as-is when loaded.
//! - Serialized as `{"column": .., "value": ..}` for compatibility with
//!   previously stored lists.

use serde::{Deserialize, Serialize};

/// Upper bound for the rendered bar width, in percent.
pub const MAX_FILL_PERCENT: u32 = 100;

/// One labeled percentage bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphRecord {
    /// Display name. Serialized as `column` to match the stored layout.
    #[serde(rename = "column")]
    pub name: String,
    /// Percentage kept as the raw string the user entered.
    pub value: String,
}

/// Raw values read from the two input fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphInput {
    pub name: String,
    pub value: String,
}

impl GraphInput {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn field(&self, field: InputField) -> &str {
        match field {
            InputField::Name => &self.name,
            InputField::Value => &self.value,
        }
    }

    pub fn into_record(self) -> GraphRecord {
        GraphRecord {
            name: self.name,
            value: self.value,
        }
    }
}

/// The two editable inputs of the widget, in validation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputField {
    Name,
    Value,
}

impl InputField {
    pub const ALL: [InputField; 2] = [InputField::Name, InputField::Value];
}

impl GraphRecord {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Bar fill width in percent, clamped to `MAX_FILL_PERCENT`.
    ///
    /// Uses the leading decimal digits of `value`; a value without leading
    /// digits renders an empty bar. The label keeps showing the raw value.
    pub fn fill_percent(&self) -> u32 {
        let digits: &str = {
            let trimmed = self.value.trim_start();
            let end = trimmed
                .find(|ch: char| !ch.is_ascii_digit())
                .unwrap_or(trimmed.len());
            &trimmed[..end]
        };

        if digits.is_empty() {
            return 0;
        }

        match digits.parse::<u64>() {
            Ok(value) => value.min(u64::from(MAX_FILL_PERCENT)) as u32,
            // Only overflow is possible here; anything that large is past the cap.
            Err(_) => MAX_FILL_PERCENT,
        }
    }
}
