//! DOM implementation of the widget surface.
//!
//! # Invariants
//! - All element lookups happen in `bind`; later calls never query by id.
//! - The notification container exists only while a bound surface does: it is
//!   appended after every lookup succeeds and removed when the surface drops.
//! - Notification text is set via `textContent`, never parsed as HTML.
//! - DOM exceptions inside `Surface` calls are logged and swallowed.

use crate::storage::js_error_text;
use graphbar_core::{Control, ElementIds, GraphRow, InputField, Notification, NotificationId, Surface};
use log::warn;
use std::collections::HashMap;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, EventTarget, HtmlElement, HtmlInputElement};

const NOTIFICATION_WRAP_CLASS: &str = "exceptionWrap";
const NOTIFICATION_CLASS: &str = "invalid";
const NOTIFICATION_HIDING_CLASS: &str = "hide";
const LIST_READ_ONLY_CLASS: &str = "readonly";
const FORM_VALIDATED_CLASS: &str = "was-validate";

/// Elements the controller listens on.
pub(crate) struct EventTargets {
    pub submit: EventTarget,
    pub list: EventTarget,
    pub read_only_toggle: EventTarget,
}

pub(crate) struct DomSurface {
    document: Document,
    list: HtmlElement,
    form: HtmlElement,
    name_input: HtmlInputElement,
    value_input: HtmlInputElement,
    submit: HtmlElement,
    read_only_toggle: HtmlElement,
    notification_wrap: Element,
    mounted: HashMap<NotificationId, Element>,
}

impl DomSurface {
    /// Looks up every widget element, then mounts the notification
    /// container at the end of `<body>`.
    pub(crate) fn bind(document: &Document, ids: &ElementIds) -> Result<Self, JsValue> {
        let list = element_by_id(document, &ids.list)?;
        let form = element_by_id(document, &ids.form)?;
        let name_input = element_by_id(document, &ids.name_input)?;
        let value_input = element_by_id(document, &ids.value_input)?;
        let submit = element_by_id(document, &ids.submit)?;
        let read_only_toggle = element_by_id(document, &ids.read_only_toggle)?;
        let body = document
            .body()
            .ok_or_else(|| JsValue::from_str("document has no <body>"))?;

        let notification_wrap = document.create_element("div")?;
        notification_wrap.set_class_name(NOTIFICATION_WRAP_CLASS);
        body.append_child(&notification_wrap)?;

        Ok(Self {
            document: document.clone(),
            list,
            form,
            name_input,
            value_input,
            submit,
            read_only_toggle,
            notification_wrap,
            mounted: HashMap::new(),
        })
    }

    pub(crate) fn event_targets(&self) -> EventTargets {
        EventTargets {
            submit: self.submit.clone().into(),
            list: self.list.clone().into(),
            read_only_toggle: self.read_only_toggle.clone().into(),
        }
    }

    fn input(&self, field: InputField) -> &HtmlInputElement {
        match field {
            InputField::Name => &self.name_input,
            InputField::Value => &self.value_input,
        }
    }
}

impl Surface for DomSurface {
    fn input_value(&self, field: InputField) -> String {
        self.input(field).value()
    }

    fn set_input_value(&mut self, field: InputField, value: &str) {
        self.input(field).set_value(value);
    }

    fn focus_input(&mut self, field: InputField) {
        report("focus_input", self.input(field).focus());
    }

    fn set_control_disabled(&mut self, control: Control, disabled: bool) {
        match control {
            Control::NameInput => self.name_input.set_disabled(disabled),
            Control::ValueInput => self.value_input.set_disabled(disabled),
            Control::Submit => report(
                "set_submit_disabled",
                self.submit.toggle_attribute_with_force("disabled", disabled),
            ),
        }
    }

    fn set_list_read_only(&mut self, read_only: bool) {
        report(
            "set_list_read_only",
            self.list
                .class_list()
                .toggle_with_force(LIST_READ_ONLY_CLASS, read_only),
        );
    }

    fn set_form_validated(&mut self, validated: bool) {
        report(
            "set_form_validated",
            self.form
                .class_list()
                .toggle_with_force(FORM_VALIDATED_CLASS, validated),
        );
    }

    fn replace_list(&mut self, _rows: &[GraphRow], markup: &str) {
        self.list.set_inner_html(markup);
    }

    fn show_notification(&mut self, notification: &Notification) {
        let element = match self.document.create_element("div") {
            Ok(element) => element,
            Err(err) => {
                report::<()>("show_notification", Err(err));
                return;
            }
        };
        element.set_class_name(NOTIFICATION_CLASS);
        element.set_text_content(Some(&notification.text()));
        report(
            "show_notification",
            self.notification_wrap.prepend_with_node_1(&element),
        );
        self.mounted.insert(notification.id, element);
    }

    fn hide_notification(&mut self, id: NotificationId) {
        if let Some(element) = self.mounted.get(&id) {
            report(
                "hide_notification",
                element.class_list().add_1(NOTIFICATION_HIDING_CLASS),
            );
        }
    }

    fn remove_notification(&mut self, id: NotificationId) {
        if let Some(element) = self.mounted.remove(&id) {
            element.remove();
        }
    }
}

impl Drop for DomSurface {
    fn drop(&mut self) {
        self.notification_wrap.remove();
    }
}

fn element_by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing element #{id}")))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("element #{id} has an unexpected type")))
}

pub(crate) fn report<T>(operation: &str, result: Result<T, JsValue>) {
    if let Err(err) = result {
        warn!(
            "event=dom_update module=web status=error operation={operation} error={}",
            js_error_text(&err)
        );
    }
}
