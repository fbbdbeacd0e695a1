use std::future::Future;
use std::time::Duration;

use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::context::ClientContext;
use super::error::ClientError;
use crate::workflows::screening::{parse_pending_payload, ScreeningSummary};

pub const PENDING_SCREENINGS_PATH: &str = "pending-screenings";

/// Fetch adapter abstraction so the feed and router can run against fakes.
pub trait ScreeningSource: Send + Sync {
    fn fetch_pending(
        &self,
        context: &ClientContext,
    ) -> impl Future<Output = Result<Vec<ScreeningSummary>, ClientError>> + Send;
}

/// `reqwest`-backed source calling `GET {base}/pending-screenings`.
#[derive(Debug, Clone)]
pub struct HttpScreeningSource {
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
}

impl HttpScreeningSource {
    pub fn new(timeout: Duration) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl ScreeningSource for HttpScreeningSource {
    async fn fetch_pending(
        &self,
        context: &ClientContext,
    ) -> Result<Vec<ScreeningSummary>, ClientError> {
        let url = context.endpoint(PENDING_SCREENINGS_PATH)?;
        let token = context.bearer_token_at(Utc::now())?;

        debug!(%url, "requesting pending screenings");
        let response = self.client.get(url).bearer_auth(token).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ApiErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message)
                .filter(|message| !message.trim().is_empty());
            warn!(%status, server_message = ?message, "pending screenings request rejected");
            return Err(ClientError::Api { status, message });
        }

        let payload: Value = response.json().await?;
        let screenings = parse_pending_payload(payload)?;
        info!(count = screenings.len(), "pending screenings loaded");

        Ok(screenings)
    }
}
