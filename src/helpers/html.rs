//! HTML helper functions

/// Escape HTML special characters
///
/// Used as the template engine's escape function; `/` is deliberately left
/// as-is so paths and URLs stay readable in the output.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
