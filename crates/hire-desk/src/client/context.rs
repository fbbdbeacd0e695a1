use std::fmt;

use chrono::{DateTime, Duration, Utc};
use reqwest::Url;

use super::error::ClientError;

/// Bearer credential for the remote API.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    token: String,
    expires_at: Option<DateTime<Utc>>,
}

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            expires_at: None,
        }
    }

    pub fn expiring_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expiry| expiry <= now)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Explicit context handed to every collaborator call: where the API lives and
/// which credential to present.
///
/// Refresh contract: callers check [`ClientContext::needs_refresh_at`] and swap
/// in a new credential with [`ClientContext::refresh_credential`]. An expired
/// credential is never sent; requests fail with
/// [`ClientError::ExpiredCredential`] instead.
#[derive(Debug, Clone)]
pub struct ClientContext {
    base_url: Url,
    credential: Option<Credential>,
}

impl ClientContext {
    pub const REFRESH_LEEWAY_SECS: i64 = 60;

    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            credential: None,
        }
    }

    pub fn with_credential(mut self, credential: Credential) -> Self {
        self.credential = Some(credential);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    pub fn refresh_credential(&mut self, credential: Credential) {
        self.credential = Some(credential);
    }

    pub fn clear_credential(&mut self) {
        self.credential = None;
    }

    /// True when there is no credential or it expires within the leeway window.
    pub fn needs_refresh_at(&self, now: DateTime<Utc>) -> bool {
        match &self.credential {
            None => true,
            Some(credential) => {
                credential.is_expired_at(now + Duration::seconds(Self::REFRESH_LEEWAY_SECS))
            }
        }
    }

    pub fn bearer_token_at(&self, now: DateTime<Utc>) -> Result<&str, ClientError> {
        let credential = self
            .credential
            .as_ref()
            .ok_or(ClientError::MissingCredential)?;

        if credential.is_expired_at(now) {
            return Err(ClientError::ExpiredCredential {
                expired_at: credential.expires_at.unwrap_or(now),
            });
        }

        Ok(credential.token())
    }

    pub fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|_| ClientError::InvalidEndpoint(path.to_string()))
    }
}
