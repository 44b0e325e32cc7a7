use std::borrow::Cow;

// `&` goes first so the entities produced below are not escaped again.
#[must_use]
pub fn html_escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Decodes a request body for display, substituting U+FFFD for invalid UTF-8.
#[must_use]
pub fn body_text(body: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(body)
}
