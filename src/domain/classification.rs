use std::fmt;

/// Sensitivity label assigned to a recalled memory query.
///
/// The set is closed: model output that does not match one of the four
/// literal labels is rejected rather than passed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    TopSecret,
    Secret,
    ForOfficialUseOnly,
    Unclassified,
}

impl Classification {
    pub const ALL: [Classification; 4] = [
        Classification::TopSecret,
        Classification::Secret,
        Classification::ForOfficialUseOnly,
        Classification::Unclassified,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::TopSecret => "Top Secret",
            Classification::Secret => "Secret",
            Classification::ForOfficialUseOnly => "For Official Use Only",
            Classification::Unclassified => "Unclassified",
        }
    }

    /// Parses a label from model output.
    ///
    /// Tolerates surrounding whitespace, trailing punctuation, and casing,
    /// but nothing beyond the four literal labels.
    pub fn parse(raw: &str) -> Option<Self> {
        let cleaned = raw
            .trim()
            .trim_end_matches(['.', '!', '"', '\''])
            .trim_start_matches(['"', '\''])
            .trim();

        Self::ALL
            .into_iter()
            .find(|label| label.as_str().eq_ignore_ascii_case(cleaned))
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
