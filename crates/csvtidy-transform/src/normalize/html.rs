//! HTML repair: entity decoding and tag stripping.

use std::sync::LazyLock;

use csvtidy_model::NormalizationCounts;
use regex::Regex;

/// Numeric references that survive a first decoding pass, typically from
/// double-encoded input, mapped to ASCII.
pub const ENTITY_REPAIRS: [(&str, &str); 5] = [
    ("&#269;", "c"),
    ("&#305;", "i"),
    ("&#345;", "r"),
    ("&#8217;", "'"),
    ("&#8230;", "..."),
];

static BREAK_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("valid break tag pattern"));

static ANY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid tag pattern"));

/// Decodes entities, applies [`ENTITY_REPAIRS`], then strips markup.
///
/// `<br>` variants become a space; every other tag is removed.
pub fn repair_html(field: &str, counts: &mut NormalizationCounts) -> String {
    let decoded = html_escape::decode_html_entities(field);
    if decoded != field {
        counts.html_entities_fixed += 1;
    }

    let mut text = decoded.into_owned();
    for (entity, replacement) in ENTITY_REPAIRS {
        if text.contains(entity) {
            text = text.replace(entity, replacement);
            counts.html_entities_fixed += 1;
        }
    }

    let text = BREAK_TAG.replace_all(&text, " ");
    ANY_TAG.replace_all(&text, "").into_owned()
}
