//! Unicode folding: decomposition, typographic substitutions, recomposition.

use csvtidy_model::NormalizationCounts;
use unicode_normalization::UnicodeNormalization;

/// Typographic characters and their ASCII stand-ins.
pub const SUBSTITUTIONS: [(char, &str); 11] = [
    ('\u{201c}', "\""),
    ('\u{201d}', "\""),
    ('\u{2018}', "'"),
    ('\u{2019}', "'"),
    ('\u{2013}', "-"),
    ('\u{2014}', "-"),
    ('\u{00a0}', " "),
    ('\u{2026}', "..."),
    ('\u{00ae}', "(R)"),
    ('\u{00a9}', "(C)"),
    ('\u{2122}', "(TM)"),
];

/// Applies the substitution table to the canonical decomposition of `field`.
///
/// Each table entry that matches counts once as a character replacement,
/// however many occurrences it rewrites. The result is recomposed so that
/// accented letters come back as single code points.
pub fn fold_unicode(field: &str, counts: &mut NormalizationCounts) -> String {
    let mut text: String = field.nfd().collect();
    for (from, to) in SUBSTITUTIONS {
        if text.contains(from) {
            text = text.replace(from, to);
            counts.character_replacements += 1;
        }
    }
    text.nfc().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_typographic_marks() {
        let mut counts = NormalizationCounts::default();
        let folded = fold_unicode("\u{201c}Hi\u{201d} \u{2014} Acme\u{2122}\u{2026}", &mut counts);
        assert_eq!(folded, "\"Hi\" - Acme(TM)...");
        assert_eq!(counts.character_replacements, 5);
    }

    #[test]
    fn repeated_character_counts_once() {
        let mut counts = NormalizationCounts::default();
        assert_eq!(fold_unicode("a\u{2013}b\u{2013}c", &mut counts), "a-b-c");
        assert_eq!(counts.character_replacements, 1);
    }

    #[test]
    fn decomposed_input_is_recomposed() {
        let mut counts = NormalizationCounts::default();
        assert_eq!(fold_unicode("Jose\u{301}", &mut counts), "José");
        assert_eq!(counts.character_replacements, 0);
    }
}
