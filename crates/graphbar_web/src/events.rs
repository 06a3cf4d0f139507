//! Host-independent pieces of the browser binding.
//!
//! Kept free of `web-sys` types so they run under the native test harness.

use graphbar_core::{ListClickTarget, WidgetConfig};

/// Tag name of the delete affordance, as reported by `Element.tagName`.
pub const DELETE_BUTTON_TAG: &str = "SPAN";
/// Exact `className` of the delete affordance.
pub const DELETE_BUTTON_CLASS: &str = "del-btn";
/// Attribute carrying the row's graph name.
pub const ROW_NAME_ATTRIBUTE: &str = "data-name";

/// Classifies a click inside the list container.
///
/// Only an element that is exactly the delete affordance and carries a row
/// name deletes; clicks on rows, bars or labels do nothing.
pub fn resolve_list_click(
    tag_name: &str,
    class_name: &str,
    row_name: Option<String>,
) -> ListClickTarget {
    if tag_name != DELETE_BUTTON_TAG || class_name != DELETE_BUTTON_CLASS {
        return ListClickTarget::Other;
    }
    match row_name {
        Some(row_name) => ListClickTarget::DeleteButton { row_name },
        None => ListClickTarget::Other,
    }
}

/// Parses the optional JSON config passed to `GraphWidget.mount`.
pub fn parse_widget_config(raw: Option<&str>) -> Result<WidgetConfig, String> {
    match raw.map(str::trim) {
        None | Some("") => Ok(WidgetConfig::default()),
        Some(raw) => WidgetConfig::from_json(raw).map_err(|err| err.to_string()),
    }
}

/// `setTimeout` delay for a deadline, clamped to the browser's range.
pub fn timer_delay_ms(deadline_ms: u64, now_ms: u64) -> i32 {
    i32::try_from(deadline_ms.saturating_sub(now_ms)).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::{parse_widget_config, resolve_list_click, timer_delay_ms};
    use graphbar_core::ListClickTarget;

    #[test]
    fn only_exact_delete_button_resolves_to_delete() {
        assert_eq!(
            resolve_list_click("SPAN", "del-btn", Some("cpu".to_string())),
            ListClickTarget::DeleteButton {
                row_name: "cpu".to_string()
            }
        );
        assert_eq!(
            resolve_list_click("DIV", "del-btn", Some("cpu".to_string())),
            ListClickTarget::Other
        );
        assert_eq!(
            resolve_list_click("SPAN", "del-btn extra", Some("cpu".to_string())),
            ListClickTarget::Other
        );
        assert_eq!(
            resolve_list_click("SPAN", "del-btn", None),
            ListClickTarget::Other
        );
    }

    #[test]
    fn missing_or_blank_config_uses_defaults() {
        let config = parse_widget_config(None).unwrap();
        assert_eq!(config.elements.list, "grp-wrap");
        assert_eq!(parse_widget_config(Some("  ")).unwrap(), config);
    }

    #[test]
    fn invalid_config_reports_message() {
        let err = parse_widget_config(Some(r#"{ "storage_key": "" }"#)).unwrap_err();
        assert!(err.contains("storage_key"));
    }

    #[test]
    fn timer_delay_never_negative_or_overflowing() {
        assert_eq!(timer_delay_ms(4_000, 1_000), 3_000);
        assert_eq!(timer_delay_ms(1_000, 4_000), 0);
        assert_eq!(timer_delay_ms(u64::MAX, 0), i32::MAX);
    }
}
