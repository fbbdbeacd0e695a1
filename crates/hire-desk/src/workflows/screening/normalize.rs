//! Ingestion boundary for the pending-screenings payload.
//!
//! The upstream API is treated as untrusted: field names drift between
//! camelCase, legacy names and nested `candidate`/`job` objects, and values
//! arrive as numbers, strings or arrays. Everything is coerced here, once, into
//! a fully-populated [`ScreeningSummary`].

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Map, Value};
use tracing::warn;

use super::domain::{ApplicationId, ScreeningSummary};

/// Failure to recognise the overall payload shape. Individual records never fail.
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("expected a JSON array of screenings, found {found}")]
    UnexpectedShape { found: &'static str },
}

const ENVELOPE_KEYS: [&str; 2] = ["data", "screenings"];

/// Unpack the response body into normalized summaries, skipping entries that
/// are not JSON objects.
pub fn parse_pending_payload(payload: Value) -> Result<Vec<ScreeningSummary>, PayloadError> {
    let items = match payload {
        Value::Array(items) => items,
        Value::Object(mut envelope) => ENVELOPE_KEYS
            .iter()
            .find_map(|key| match envelope.remove(*key) {
                Some(Value::Array(items)) => Some(items),
                _ => None,
            })
            .ok_or(PayloadError::UnexpectedShape {
                found: "an object without a screenings array",
            })?,
        other => {
            return Err(PayloadError::UnexpectedShape {
                found: json_kind(&other),
            })
        }
    };

    let mut screenings = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match item {
            Value::Object(record) => screenings.push(normalize_screening(&record)),
            other => warn!(
                index,
                kind = json_kind(&other),
                "skipping pending screening entry that is not an object"
            ),
        }
    }

    Ok(screenings)
}

/// Coerce a single wire record into the internal summary.
pub fn normalize_screening(record: &Map<String, Value>) -> ScreeningSummary {
    let raw = RawScreening(record);

    ScreeningSummary {
        application_id: ApplicationId(
            raw.text(&["applicationId", "_id", "id"]).unwrap_or_default(),
        ),
        candidate_name: raw
            .text(&["candidateName", "name", "candidate.name", "candidate.fullName"])
            .unwrap_or_default(),
        candidate_email: raw
            .text(&["candidateEmail", "email", "candidate.email"])
            .unwrap_or_default(),
        job_title: raw
            .text(&["jobTitle", "position", "job.title"])
            .unwrap_or_default(),
        applied_at: raw
            .get(&["appliedAt", "applicationDate", "appliedDate", "createdAt"])
            .and_then(parse_timestamp)
            .unwrap_or_default(),
        total_experience: raw
            .get(&["totalExperience", "experience", "candidate.totalExperience"])
            .map(coerce_experience)
            .unwrap_or(0.0),
        matching_skills: raw.get(&["matchingSkills"]).map(coerce_count).unwrap_or(0),
        required_skills: raw.get(&["requiredSkills"]).map(coerce_count).unwrap_or(0),
        current_company: raw
            .text(&["currentCompany", "candidate.currentCompany"])
            .filter(|value| !value.trim().is_empty()),
        resume_url: raw
            .text(&["resumeUrl", "resume", "candidate.resumeUrl"])
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty()),
        previously_screened: raw
            .get(&["previouslyScreened", "isScreened", "screened"])
            .map(coerce_flag)
            .unwrap_or(false),
    }
}

struct RawScreening<'a>(&'a Map<String, Value>);

impl<'a> RawScreening<'a> {
    /// First non-null value among `keys`; dotted keys descend one object level.
    fn get(&self, keys: &[&str]) -> Option<&'a Value> {
        let record: &'a Map<String, Value> = self.0;
        keys.iter()
            .filter_map(|key| match key.split_once('.') {
                Some((parent, child)) => record.get(parent)?.as_object()?.get(child),
                None => record.get(*key),
            })
            .find(|value| !value.is_null())
    }

    fn text(&self, keys: &[&str]) -> Option<String> {
        self.get(keys).and_then(|value| match value {
            Value::String(text) => Some(text.clone()),
            Value::Number(number) => Some(number.to_string()),
            _ => None,
        })
    }
}

fn coerce_count(value: &Value) -> u32 {
    match value {
        Value::Array(items) => u32::try_from(items.len()).unwrap_or(u32::MAX),
        Value::Number(number) => clamp_count(number.as_f64().unwrap_or(0.0)),
        Value::String(text) => text.trim().parse::<f64>().map(clamp_count).unwrap_or(0),
        _ => 0,
    }
}

fn clamp_count(value: f64) -> u32 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    value.floor().min(f64::from(u32::MAX)) as u32
}

fn coerce_experience(value: &Value) -> f64 {
    let years = match value {
        Value::Number(number) => number.as_f64().unwrap_or(0.0),
        Value::String(text) => text.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };

    if years.is_finite() && years > 0.0 {
        years
    } else {
        0.0
    }
}

fn coerce_flag(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => matches!(
            text.trim().to_ascii_lowercase().as_str(),
            "true" | "yes" | "1"
        ),
        _ => false,
    }
}

fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|millis| millis as i64))
            .and_then(DateTime::from_timestamp_millis),
        Value::String(text) => parse_timestamp_text(text),
        _ => None,
    }
}

fn parse_timestamp_text(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
