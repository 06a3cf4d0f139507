//! Rendering of the graph list onto a host surface.
//!
//! # Responsibility
//! - Turn the graph list into rows and row markup.
//! - Clear inputs and apply the read-only visual state.
//! - Define `Surface`, the DOM contract the widget writes to.
//!
//! # Invariants
//! - `GraphView` holds no record state; every call is a function of its input.
//! - `render` replaces the whole list region; there is no incremental diffing.
//! - All text placed in markup is HTML-escaped.

mod memory;

pub use memory::{MemorySurface, ShownNotification};

use crate::model::graph::{GraphRecord, InputField};
use crate::notify::{Notification, NotificationId};
use std::fmt::Write as _;

/// Controls that the read-only flag disables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    NameInput,
    ValueInput,
    Submit,
}

impl Control {
    pub const READ_ONLY_GATED: [Control; 3] =
        [Control::NameInput, Control::ValueInput, Control::Submit];
}

/// One rendered bar row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphRow {
    /// Record name; also the row's stable identifier for deletion.
    pub name: String,
    /// Bar width in percent, `0..=100`.
    pub fill_percent: u32,
    /// Label drawn over the bar, e.g. `150%`.
    pub label: String,
}

impl From<&GraphRecord> for GraphRow {
    fn from(record: &GraphRecord) -> Self {
        Self {
            name: record.name.clone(),
            fill_percent: record.fill_percent(),
            label: format!("{}%", record.value),
        }
    }
}

/// Host-side elements the widget reads from and writes to.
///
/// The browser crate implements this over the DOM; `MemorySurface` is the
/// headless implementation.
pub trait Surface {
    fn input_value(&self, field: InputField) -> String;
    fn set_input_value(&mut self, field: InputField, value: &str);
    fn focus_input(&mut self, field: InputField);
    fn set_control_disabled(&mut self, control: Control, disabled: bool);
    /// Toggles the `readonly` marker on the list container.
    fn set_list_read_only(&mut self, read_only: bool);
    /// Toggles the `was-validate` marker on the input form.
    fn set_form_validated(&mut self, validated: bool);
    fn replace_list(&mut self, rows: &[GraphRow], markup: &str);
    /// Mounts a notification at the top of the notification stack.
    fn show_notification(&mut self, notification: &Notification);
    fn hide_notification(&mut self, id: NotificationId);
    fn remove_notification(&mut self, id: NotificationId);
}

/// Stateless renderer for the graph list.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphView;

impl GraphView {
    pub fn new() -> Self {
        Self
    }

    pub fn rows(&self, graphs: &[GraphRecord]) -> Vec<GraphRow> {
        graphs.iter().map(GraphRow::from).collect()
    }

    /// Row markup for the list container, in list order.
    pub fn markup(&self, rows: &[GraphRow]) -> String {
        let mut html = String::new();
        for row in rows {
            let name = escape_html(&row.name);
            // Writing into a String cannot fail.
            let _ = write!(
                html,
                concat!(
                    r#"<div class="d-flex flex-wrap grp-set" data-name="{name}">"#,
                    r#"<div class="column">{name}</div>"#,
                    r#"<div class="value"><div class="bar-parent">"#,
                    r#"<div class="bar-child" style="width: {fill}%;">{label}</div>"#,
                    r#"</div></div>"#,
                    r#"<div class="d-flex align-items-center">"#,
                    r#"<span class="del-btn" data-name="{name}">&times;</span>"#,
                    r#"</div></div>"#,
                ),
                name = name,
                fill = row.fill_percent,
                label = escape_html(&row.label),
            );
        }
        html
    }

    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S, graphs: &[GraphRecord]) {
        let rows = self.rows(graphs);
        let markup = self.markup(&rows);
        surface.replace_list(&rows, &markup);
    }

    pub fn clear_inputs<S: Surface + ?Sized>(&self, surface: &mut S) {
        for field in InputField::ALL {
            surface.set_input_value(field, "");
        }
        surface.set_form_validated(false);
    }

    pub fn set_read_only<S: Surface + ?Sized>(&self, surface: &mut S, read_only: bool) {
        for control in Control::READ_ONLY_GATED {
            surface.set_control_disabled(control, read_only);
        }
        surface.set_list_read_only(read_only);
    }

    /// Marks the form as validated and moves focus to the failing field.
    pub fn mark_validated<S: Surface + ?Sized>(&self, surface: &mut S, focus: Option<InputField>) {
        if let Some(field) = focus {
            surface.focus_input(field);
        }
        surface.set_form_validated(true);
    }
}

/// Escapes text for use in element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
