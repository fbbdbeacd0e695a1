use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of the application under screening.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

impl ApplicationId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fully-populated screening summary produced by normalization at ingestion.
///
/// Every optional wire field has already been defaulted, so downstream stages
/// never branch on missing data except for the genuinely optional company and
/// résumé link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningSummary {
    pub application_id: ApplicationId,
    pub candidate_name: String,
    pub candidate_email: String,
    pub job_title: String,
    pub applied_at: DateTime<Utc>,
    pub total_experience: f64,
    pub matching_skills: u32,
    pub required_skills: u32,
    pub current_company: Option<String>,
    pub resume_url: Option<String>,
    pub previously_screened: bool,
}

impl ScreeningSummary {
    pub fn match_percentage(&self) -> u32 {
        match_percentage(self.matching_skills, self.required_skills)
    }

    pub fn match_ratio(&self) -> f64 {
        match_ratio(self.matching_skills, self.required_skills)
    }

    pub fn match_level(&self) -> MatchLevel {
        MatchLevel::from_percentage(self.match_percentage())
    }

    /// Fields the free-text search looks at.
    pub fn searchable_fields(&self) -> [&str; 3] {
        [
            self.candidate_name.as_str(),
            self.candidate_email.as_str(),
            self.job_title.as_str(),
        ]
    }
}

/// Skill overlap as a plain ratio; zero required skills yields 0.
pub fn match_ratio(matching: u32, required: u32) -> f64 {
    if required == 0 {
        return 0.0;
    }
    f64::from(matching) / f64::from(required)
}

/// Rounded skill overlap percentage. Matching counts above the required count
/// produce values over 100 rather than an error.
pub fn match_percentage(matching: u32, required: u32) -> u32 {
    (match_ratio(matching, required) * 100.0).round() as u32
}

/// Discrete match quality derived from the percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchLevel {
    High,
    Medium,
    Low,
}

impl MatchLevel {
    pub const HIGH_THRESHOLD: u32 = 80;
    pub const MEDIUM_THRESHOLD: u32 = 50;

    pub const fn from_percentage(percentage: u32) -> Self {
        if percentage >= Self::HIGH_THRESHOLD {
            Self::High
        } else if percentage >= Self::MEDIUM_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High match",
            Self::Medium => "Medium match",
            Self::Low => "Low match",
        }
    }
}
