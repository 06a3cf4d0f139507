//! Text shaping for log events that may carry user input.
//!
//! # Invariants
//! - Output is a single line capped at the requested number of characters.
//! - Host-independent; both the native and browser panic hooks use it.

use std::any::Any;

/// Character cap for panic payloads in log events.
pub const MAX_PANIC_PAYLOAD_CHARS: usize = 160;

/// Flattens line breaks and truncates to `max_chars`, marking the cut with `...`.
pub fn sanitize_message(value: &str, max_chars: usize) -> String {
    let normalized = value.replace(['\n', '\r'], " ");
    let mut truncated = normalized.chars().take(max_chars).collect::<String>();
    if normalized.chars().count() > max_chars {
        truncated.push_str("...");
    }
    truncated
}

/// Sanitized text of a panic payload (`&str` or `String`), capped at
/// `MAX_PANIC_PAYLOAD_CHARS`.
pub fn panic_payload_text(payload: &(dyn Any + Send)) -> String {
    let raw = payload
        .downcast_ref::<&str>()
        .map(|message| (*message).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_string());
    sanitize_message(&raw, MAX_PANIC_PAYLOAD_CHARS)
}

#[cfg(test)]
mod tests {
    use super::{panic_payload_text, sanitize_message, MAX_PANIC_PAYLOAD_CHARS};

    #[test]
    fn sanitize_message_removes_newlines_and_truncates() {
        let sanitized = sanitize_message("line1\nline2\rline3", 8);
        assert!(!sanitized.contains('\n'));
        assert!(!sanitized.contains('\r'));
        assert_eq!(sanitized, "line1 li...");
    }

    #[test]
    fn short_messages_pass_through() {
        assert_eq!(sanitize_message("duplicate cpu", 80), "duplicate cpu");
    }

    #[test]
    fn panic_payload_text_handles_both_string_kinds() {
        let static_payload: Box<dyn std::any::Any + Send> = Box::new("bad\nname");
        assert_eq!(panic_payload_text(static_payload.as_ref()), "bad name");

        let long = "x".repeat(MAX_PANIC_PAYLOAD_CHARS + 5);
        let owned_payload: Box<dyn std::any::Any + Send> = Box::new(long);
        let text = panic_payload_text(owned_payload.as_ref());
        assert_eq!(text.chars().count(), MAX_PANIC_PAYLOAD_CHARS + 3);
        assert!(text.ends_with("..."));

        let other_payload: Box<dyn std::any::Any + Send> = Box::new(7_u32);
        assert_eq!(
            panic_payload_text(other_payload.as_ref()),
            "non-string panic payload"
        );
    }
}
