//! Headless surface that records what the widget drew.

use super::{Control, GraphRow, Surface};
use crate::model::graph::InputField;
use crate::notify::{Notification, NotificationId};

/// Notification as currently mounted on a `MemorySurface`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShownNotification {
    pub id: NotificationId,
    pub text: String,
    pub hiding: bool,
}

/// In-memory `Surface` used by tests and the CLI.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    name_input: String,
    value_input: String,
    name_disabled: bool,
    value_disabled: bool,
    submit_disabled: bool,
    list_read_only: bool,
    form_validated: bool,
    focused: Option<InputField>,
    rows: Vec<GraphRow>,
    markup: String,
    render_count: usize,
    notifications: Vec<ShownNotification>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates the user typing into an input.
    pub fn type_input(&mut self, field: InputField, value: &str) {
        self.set_input_value(field, value);
    }

    pub fn input_value_of(&self, field: InputField) -> &str {
        match field {
            InputField::Name => &self.name_input,
            InputField::Value => &self.value_input,
        }
    }

    pub fn is_disabled(&self, control: Control) -> bool {
        match control {
            Control::NameInput => self.name_disabled,
            Control::ValueInput => self.value_disabled,
            Control::Submit => self.submit_disabled,
        }
    }

    pub fn list_read_only(&self) -> bool {
        self.list_read_only
    }

    pub fn form_validated(&self) -> bool {
        self.form_validated
    }

    pub fn focused(&self) -> Option<InputField> {
        self.focused
    }

    pub fn rows(&self) -> &[GraphRow] {
        &self.rows
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn render_count(&self) -> usize {
        self.render_count
    }

    /// Mounted notifications, most recent first.
    pub fn notifications(&self) -> &[ShownNotification] {
        &self.notifications
    }
}

impl Surface for MemorySurface {
    fn input_value(&self, field: InputField) -> String {
        self.input_value_of(field).to_string()
    }

    fn set_input_value(&mut self, field: InputField, value: &str) {
        match field {
            InputField::Name => self.name_input = value.to_string(),
            InputField::Value => self.value_input = value.to_string(),
        }
    }

    fn focus_input(&mut self, field: InputField) {
        self.focused = Some(field);
    }

    fn set_control_disabled(&mut self, control: Control, disabled: bool) {
        match control {
            Control::NameInput => self.name_disabled = disabled,
            Control::ValueInput => self.value_disabled = disabled,
            Control::Submit => self.submit_disabled = disabled,
        }
    }

    fn set_list_read_only(&mut self, read_only: bool) {
        self.list_read_only = read_only;
    }

    fn set_form_validated(&mut self, validated: bool) {
        self.form_validated = validated;
    }

    fn replace_list(&mut self, rows: &[GraphRow], markup: &str) {
        self.rows = rows.to_vec();
        self.markup = markup.to_string();
        self.render_count += 1;
    }

    fn show_notification(&mut self, notification: &Notification) {
        self.notifications.insert(
            0,
            ShownNotification {
                id: notification.id,
                text: notification.text(),
                hiding: false,
            },
        );
    }

    fn hide_notification(&mut self, id: NotificationId) {
        if let Some(shown) = self.notifications.iter_mut().find(|shown| shown.id == id) {
            shown.hiding = true;
        }
    }

    fn remove_notification(&mut self, id: NotificationId) {
        self.notifications.retain(|shown| shown.id != id);
    }
}
