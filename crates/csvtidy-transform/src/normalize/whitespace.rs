use csvtidy_model::NormalizationCounts;

/// Collapses whitespace runs to one space and trims both ends.
///
/// Every call counts, changed or not.
pub fn collapse_whitespace(field: &str, counts: &mut NormalizationCounts) -> String {
    counts.whitespace_normalized += 1;
    field.split_whitespace().collect::<Vec<_>>().join(" ")
}
