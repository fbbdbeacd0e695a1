use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::domain::ScreeningSummary;

/// Ordering selected for the pending-screenings list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum SortKey {
    #[default]
    DateDesc,
    DateAsc,
    MatchDesc,
    MatchAsc,
    ExperienceDesc,
    ExperienceAsc,
    /// Keeps the fetched order. Unknown keys land here.
    Unsorted,
}

impl SortKey {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "date-desc" => Self::DateDesc,
            "date-asc" => Self::DateAsc,
            "match-desc" => Self::MatchDesc,
            "match-asc" => Self::MatchAsc,
            "experience-desc" => Self::ExperienceDesc,
            "experience-asc" => Self::ExperienceAsc,
            _ => Self::Unsorted,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DateDesc => "date-desc",
            Self::DateAsc => "date-asc",
            Self::MatchDesc => "match-desc",
            Self::MatchAsc => "match-asc",
            Self::ExperienceDesc => "experience-desc",
            Self::ExperienceAsc => "experience-asc",
            Self::Unsorted => "unsorted",
        }
    }

    fn compare(self, a: &ScreeningSummary, b: &ScreeningSummary) -> Ordering {
        match self {
            Self::DateDesc => b.applied_at.cmp(&a.applied_at),
            Self::DateAsc => a.applied_at.cmp(&b.applied_at),
            Self::MatchDesc => b.match_ratio().total_cmp(&a.match_ratio()),
            Self::MatchAsc => a.match_ratio().total_cmp(&b.match_ratio()),
            Self::ExperienceDesc => b.total_experience.total_cmp(&a.total_experience),
            Self::ExperienceAsc => a.total_experience.total_cmp(&b.total_experience),
            Self::Unsorted => Ordering::Equal,
        }
    }
}

impl From<String> for SortKey {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<&str> for SortKey {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

/// Order `records` by `key`. The sort is stable: records with equal keys keep
/// their fetched order.
pub fn sort_screenings(mut records: Vec<ScreeningSummary>, key: SortKey) -> Vec<ScreeningSummary> {
    if key != SortKey::Unsorted {
        records.sort_by(|a, b| key.compare(a, b));
    }
    records
}
