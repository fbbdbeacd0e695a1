use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use axum::http::StatusCode;
use axum::response::Response;
use chrono::{TimeZone, Utc};
use reqwest::Url;
use serde_json::Value;

use crate::client::{ClientContext, ClientError, Credential, ScreeningSource};
use crate::workflows::screening::card::{LinkOpener, ReviewNavigator};
use crate::workflows::screening::domain::{ApplicationId, ScreeningSummary};

pub(super) fn summary(id: &str, matching: u32, required: u32) -> ScreeningSummary {
    ScreeningSummary {
        application_id: ApplicationId(id.to_string()),
        candidate_name: format!("Candidate {id}"),
        candidate_email: format!("{id}@example.com"),
        job_title: "Backend Engineer".to_string(),
        applied_at: Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
        total_experience: 0.0,
        matching_skills: matching,
        required_skills: required,
        current_company: None,
        resume_url: None,
        previously_screened: false,
    }
}

pub(super) fn applied_on(
    mut summary: ScreeningSummary,
    y: i32,
    m: u32,
    d: u32,
) -> ScreeningSummary {
    summary.applied_at = Utc.with_ymd_and_hms(y, m, d, 9, 0, 0).unwrap();
    summary
}

pub(super) fn with_experience(mut summary: ScreeningSummary, years: f64) -> ScreeningSummary {
    summary.total_experience = years;
    summary
}

/// One record per percentage, each with 100 required skills.
pub(super) fn with_percentages(percentages: &[u32]) -> Vec<ScreeningSummary> {
    percentages
        .iter()
        .enumerate()
        .map(|(index, pct)| summary(&format!("app-{index}"), *pct, 100))
        .collect()
}

pub(super) fn roster() -> Vec<ScreeningSummary> {
    let mut ada = summary("app-ada", 9, 10);
    ada.candidate_name = "Ada Lovelace".to_string();
    ada.candidate_email = "ada@analytical.io".to_string();
    ada.job_title = "Staff Engineer".to_string();
    ada.total_experience = 12.0;
    ada.resume_url = Some("https://files.example.com/ada.pdf".to_string());
    let ada = applied_on(ada, 2024, 2, 10);

    let mut grace = summary("app-grace", 3, 5);
    grace.candidate_name = "Grace Hopper".to_string();
    grace.candidate_email = "grace@navy.mil".to_string();
    grace.job_title = "Compiler Engineer".to_string();
    grace.total_experience = 8.5;
    grace.previously_screened = true;
    let grace = applied_on(grace, 2024, 3, 1);

    let mut linus = summary("app-linus", 1, 4);
    linus.candidate_name = "Linus Field".to_string();
    linus.candidate_email = "linus@kernel.example".to_string();
    linus.job_title = "Site Reliability Engineer".to_string();
    let linus = applied_on(linus, 2024, 1, 15);

    let mut blank = summary("app-blank", 0, 0);
    blank.candidate_name = String::new();
    blank.candidate_email = String::new();
    blank.job_title = String::new();
    let blank = applied_on(blank, 2023, 12, 24);

    vec![ada, grace, linus, blank]
}

pub(super) fn ids(records: &[ScreeningSummary]) -> Vec<&str> {
    records
        .iter()
        .map(|summary| summary.application_id.as_str())
        .collect()
}

pub(super) fn context() -> ClientContext {
    ClientContext::new(Url::parse("http://ats.test/api/").expect("valid url"))
        .with_credential(Credential::new("reviewer-token"))
}

/// Source that records every call and returns canned results.
pub(super) struct FakeSource {
    records: Vec<ScreeningSummary>,
    failure: Option<(StatusCode, Option<String>)>,
    delay: Duration,
    calls: AtomicUsize,
    tokens: Mutex<Vec<String>>,
}

impl FakeSource {
    pub(super) fn with_records(records: Vec<ScreeningSummary>) -> Self {
        Self {
            records,
            failure: None,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            tokens: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn failing(status: StatusCode, message: Option<&str>) -> Self {
        let mut source = Self::with_records(Vec::new());
        source.failure = Some((status, message.map(str::to_string)));
        source
    }

    pub(super) fn slow(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(super) fn tokens(&self) -> Vec<String> {
        self.tokens.lock().expect("token mutex poisoned").clone()
    }
}

impl ScreeningSource for FakeSource {
    async fn fetch_pending(
        &self,
        context: &ClientContext,
    ) -> Result<Vec<ScreeningSummary>, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let token = context.bearer_token_at(Utc::now())?.to_string();
        self.tokens.lock().expect("token mutex poisoned").push(token);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        match &self.failure {
            Some((status, message)) => Err(ClientError::Api {
                status: *status,
                message: message.clone(),
            }),
            None => Ok(self.records.clone()),
        }
    }
}

#[derive(Default)]
pub(super) struct RecordingNavigator {
    visits: Mutex<Vec<ApplicationId>>,
}

impl RecordingNavigator {
    pub(super) fn visits(&self) -> Vec<ApplicationId> {
        self.visits.lock().expect("navigator mutex poisoned").clone()
    }
}

impl ReviewNavigator for RecordingNavigator {
    fn open_review(&self, application_id: &ApplicationId) {
        self.visits
            .lock()
            .expect("navigator mutex poisoned")
            .push(application_id.clone());
    }
}

#[derive(Default)]
pub(super) struct RecordingOpener {
    opened: Mutex<Vec<String>>,
}

impl RecordingOpener {
    pub(super) fn opened(&self) -> Vec<String> {
        self.opened.lock().expect("opener mutex poisoned").clone()
    }
}

impl LinkOpener for RecordingOpener {
    fn open_external(&self, url: &str) {
        self.opened
            .lock()
            .expect("opener mutex poisoned")
            .push(url.to_string());
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
