use axum::http::StatusCode;
use chrono::{DateTime, Utc};

use crate::workflows::screening::PayloadError;

/// Message shown when the server did not supply one.
pub const GENERIC_FETCH_FAILURE: &str = "Unable to load pending screenings";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("no API credential is available")]
    MissingCredential,
    #[error("API credential expired at {expired_at}")]
    ExpiredCredential { expired_at: DateTime<Utc> },
    #[error("invalid API endpoint '{0}'")]
    InvalidEndpoint(String),
    #[error("request to the applicant-tracking API failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("applicant-tracking API responded with {status}")]
    Api {
        status: StatusCode,
        message: Option<String>,
    },
    #[error(transparent)]
    Payload(#[from] PayloadError),
}

impl ClientError {
    /// User-facing text: the server's message when it sent one, otherwise a
    /// generic fallback.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Api {
                message: Some(message),
                ..
            } => message.clone(),
            _ => GENERIC_FETCH_FAILURE.to_string(),
        }
    }

    /// Status a facade should answer with when relaying this failure.
    pub fn status_hint(&self) -> StatusCode {
        match self {
            ClientError::MissingCredential | ClientError::ExpiredCredential { .. } => {
                StatusCode::UNAUTHORIZED
            }
            ClientError::Api { status, .. } => *status,
            ClientError::InvalidEndpoint(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ClientError::Transport(_) | ClientError::Payload(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_server_message() {
        let err = ClientError::Api {
            status: StatusCode::FORBIDDEN,
            message: Some("Reviewer role required".to_string()),
        };
        assert_eq!(err.user_message(), "Reviewer role required");
        assert_eq!(err.status_hint(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn falls_back_to_generic_message() {
        let err = ClientError::Api {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: None,
        };
        assert_eq!(err.user_message(), GENERIC_FETCH_FAILURE);
        assert_eq!(
            ClientError::MissingCredential.status_hint(),
            StatusCode::UNAUTHORIZED
        );
    }
}
