use std::fmt;

use serde::Serialize;

/// Kinds of data-quality defects tallied by the detector's quality scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Row field count differs from the header field count.
    SeparatorInconsistencies,
    /// Whitespace-only field occurrences.
    EmptyFields,
    /// Rows with a field containing both `&` and `;`.
    HtmlEntities,
    /// Rows with a character outside ASCII and the accented-letter allow-list.
    SpecialChars,
}

impl IssueKind {
    pub const ALL: [IssueKind; 4] = [
        IssueKind::SeparatorInconsistencies,
        IssueKind::EmptyFields,
        IssueKind::HtmlEntities,
        IssueKind::SpecialChars,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            IssueKind::SeparatorInconsistencies => "separator_inconsistencies",
            IssueKind::EmptyFields => "empty_fields",
            IssueKind::HtmlEntities => "html_entities",
            IssueKind::SpecialChars => "special_chars",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Issue tally keyed by [`IssueKind`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QualityIssues {
    separator_inconsistencies: usize,
    empty_fields: usize,
    html_entities: usize,
    special_chars: usize,
}

impl QualityIssues {
    pub fn record(&mut self, kind: IssueKind, count: usize) {
        *self.slot_mut(kind) += count;
    }

    pub fn get(&self, kind: IssueKind) -> usize {
        match kind {
            IssueKind::SeparatorInconsistencies => self.separator_inconsistencies,
            IssueKind::EmptyFields => self.empty_fields,
            IssueKind::HtmlEntities => self.html_entities,
            IssueKind::SpecialChars => self.special_chars,
        }
    }

    pub fn total(&self) -> usize {
        IssueKind::ALL.iter().map(|kind| self.get(*kind)).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (IssueKind, usize)> + '_ {
        IssueKind::ALL.into_iter().map(|kind| (kind, self.get(kind)))
    }

    fn slot_mut(&mut self, kind: IssueKind) -> &mut usize {
        match kind {
            IssueKind::SeparatorInconsistencies => &mut self.separator_inconsistencies,
            IssueKind::EmptyFields => &mut self.empty_fields,
            IssueKind::HtmlEntities => &mut self.html_entities,
            IssueKind::SpecialChars => &mut self.special_chars,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_sum_every_kind() {
        let mut issues = QualityIssues::default();
        issues.record(IssueKind::SeparatorInconsistencies, 2);
        issues.record(IssueKind::EmptyFields, 3);
        issues.record(IssueKind::EmptyFields, 1);
        assert_eq!(issues.get(IssueKind::EmptyFields), 4);
        assert_eq!(issues.total(), 6);
        let kinds: Vec<_> = issues.iter().map(|(kind, _)| kind).collect();
        assert_eq!(kinds, IssueKind::ALL.to_vec());
    }
}
