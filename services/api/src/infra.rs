use chrono::{DateTime, Utc};
use hire_desk::client::{ClientContext, Credential};
use hire_desk::config::ApiConfig;
use hire_desk::workflows::screening::{ApplicationId, MatchBucket, SortKey};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Context for CLI calls: an explicit `--token` wins over `APP_API_TOKEN`.
pub(crate) fn client_context(api: &ApiConfig, token_override: Option<String>) -> ClientContext {
    let context = ClientContext::new(api.base_url.clone());
    match token_override.or_else(|| api.token.clone()) {
        Some(token) => context.with_credential(Credential::new(token)),
        None => context,
    }
}

/// Warning to show before a CLI call when the credential needs refreshing.
pub(crate) fn credential_notice(context: &ClientContext, now: DateTime<Utc>) -> Option<String> {
    if !context.needs_refresh_at(now) {
        return None;
    }

    match context.credential().and_then(|credential| credential.expires_at()) {
        Some(expires_at) if expires_at <= now => Some(format!(
            "API token expired at {expires_at}; pass a fresh --token or update APP_API_TOKEN"
        )),
        Some(expires_at) => Some(format!(
            "API token expires at {expires_at}; refresh it before the next call"
        )),
        None => Some("no API token configured; pass --token or set APP_API_TOKEN".to_string()),
    }
}

pub(crate) fn review_location(
    review_base_url: Option<&str>,
    application_id: &ApplicationId,
) -> String {
    let base = review_base_url.unwrap_or_default();
    format!("{base}/applications/{application_id}/screening")
}

pub(crate) fn parse_bucket(raw: &str) -> Result<MatchBucket, String> {
    Ok(MatchBucket::parse(raw))
}

pub(crate) fn parse_sort(raw: &str) -> Result<SortKey, String> {
    Ok(SortKey::parse(raw))
}
