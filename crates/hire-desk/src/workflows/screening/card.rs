use chrono::NaiveDate;
use serde::Serialize;

use super::domain::{ApplicationId, MatchLevel, ScreeningSummary};

/// Capability that takes the reviewer to an application's screening page.
pub trait ReviewNavigator {
    fn open_review(&self, application_id: &ApplicationId);
}

/// Capability that opens an external link such as a résumé.
pub trait LinkOpener {
    fn open_external(&self, url: &str);
}

/// Display-ready summary card for one pending screening.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreeningCard {
    pub application_id: ApplicationId,
    pub candidate_name: String,
    pub candidate_email: String,
    pub job_title: String,
    pub applied_on: NaiveDate,
    pub experience_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_company: Option<String>,
    pub skills_label: String,
    pub match_percentage: u32,
    pub match_level: MatchLevel,
    pub match_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_url: Option<String>,
    pub previously_screened: bool,
}

impl ScreeningCard {
    pub fn from_summary(summary: &ScreeningSummary) -> Self {
        let level = summary.match_level();
        Self {
            application_id: summary.application_id.clone(),
            candidate_name: summary.candidate_name.clone(),
            candidate_email: summary.candidate_email.clone(),
            job_title: summary.job_title.clone(),
            applied_on: summary.applied_at.date_naive(),
            experience_label: experience_label(summary.total_experience),
            current_company: summary.current_company.clone(),
            skills_label: format!(
                "{}/{} skills",
                summary.matching_skills, summary.required_skills
            ),
            match_percentage: summary.match_percentage(),
            match_level: level,
            match_label: level.label(),
            resume_url: summary.resume_url.clone(),
            previously_screened: summary.previously_screened,
        }
    }

    pub fn request_review(&self, navigator: &dyn ReviewNavigator) {
        navigator.open_review(&self.application_id);
    }

    /// Returns whether a résumé link existed and was handed to `opener`.
    pub fn open_resume(&self, opener: &dyn LinkOpener) -> bool {
        match self.resume_url.as_deref() {
            Some(url) => {
                opener.open_external(url);
                true
            }
            None => false,
        }
    }
}

fn experience_label(years: f64) -> String {
    let rounded = (years * 10.0).round() / 10.0;
    if rounded <= 0.0 {
        return "Not specified".to_string();
    }

    if rounded.fract() == 0.0 {
        format!("{rounded:.0} yrs")
    } else {
        format!("{rounded:.1} yrs")
    }
}
