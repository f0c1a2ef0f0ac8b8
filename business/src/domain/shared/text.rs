use once_cell::sync::Lazy;
use regex::Regex;

pub const MAX_TEXT_FIELD_LENGTH: usize = 200;

static UNSAFE_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[<>"'%;()&+]"#).expect("static pattern is valid"));

/// Trims a free-text field, drops markup/query characters and caps its length.
pub fn sanitize_text(raw: &str) -> String {
    let cleaned = UNSAFE_CHARS.replace_all(raw.trim(), "");
    cleaned
        .trim()
        .chars()
        .take(MAX_TEXT_FIELD_LENGTH)
        .collect()
}
