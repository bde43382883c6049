//! Character classification shared by detection, analysis and validation.

use std::sync::LazyLock;

use regex::Regex;

/// Accented letters that are not counted as encoding defects.
pub const ALLOWED_ACCENTED: &str = "áéíóúñüÁÉÍÓÚÑÜ";

/// Named or decimal numeric HTML entity.
pub const HTML_ENTITY_PATTERN: &str = r"&[a-zA-Z]+;|&#[0-9]+;";

static HTML_ENTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(HTML_ENTITY_PATTERN).expect("valid entity pattern"));

pub fn html_entity_regex() -> &'static Regex {
    &HTML_ENTITY_RE
}

/// Non-ASCII character outside the accented-letter allow-list.
pub fn is_problematic_char(ch: char) -> bool {
    !ch.is_ascii() && !ALLOWED_ACCENTED.contains(ch)
}

pub fn has_problematic_char(text: &str) -> bool {
    text.chars().any(is_problematic_char)
}

/// Heuristic used by the quality scan: both `&` and `;` occur in the field.
pub fn looks_like_html_entity(field: &str) -> bool {
    field.contains('&') && field.contains(';')
}
