use serde::{Deserialize, Serialize};

use super::domain::{MatchLevel, ScreeningSummary};

/// Match-quality selector applied alongside the free-text search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum MatchBucket {
    #[default]
    All,
    High,
    Medium,
    Low,
}

impl MatchBucket {
    /// Unrecognized selectors widen to [`MatchBucket::All`].
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "high" => Self::High,
            "medium" => Self::Medium,
            "low" => Self::Low,
            _ => Self::All,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    pub fn accepts(self, percentage: u32) -> bool {
        let level = MatchLevel::from_percentage(percentage);
        match self {
            Self::All => true,
            Self::High => level == MatchLevel::High,
            Self::Medium => level == MatchLevel::Medium,
            Self::Low => level == MatchLevel::Low,
        }
    }
}

impl From<String> for MatchBucket {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<&str> for MatchBucket {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

/// True when `term` occurs, ignoring case, in the candidate name, email or job title.
pub fn matches_search(summary: &ScreeningSummary, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }

    let needle = term.to_lowercase();
    summary
        .searchable_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Narrow `records` by search term and match bucket. The input is left untouched
/// and the relative order of survivors is preserved.
pub fn filter_screenings(
    records: &[ScreeningSummary],
    search: &str,
    bucket: MatchBucket,
) -> Vec<ScreeningSummary> {
    records
        .iter()
        .filter(|summary| matches_search(summary, search))
        .filter(|summary| bucket.accepts(summary.match_percentage()))
        .cloned()
        .collect()
}
