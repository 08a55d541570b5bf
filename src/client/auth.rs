//! Bearer credential handling.
//!
//! The client carries a single static credential. Whether it is attached to a
//! request is decided by the configured [`AuthPolicy`]; the public demo service
//! receives no `Authorization` header under the default policy.

use reqwest::header::HeaderValue;

use crate::client::config::{AuthPolicy, ClientConfig};
use crate::client::error::{Result, TodoError};

/// Static bearer token plus the policy deciding when to send it.
#[derive(Debug, Clone)]
pub struct BearerAuth {
    credential: String,
    enabled: bool,
}

impl BearerAuth {
    pub fn new(credential: impl Into<String>, policy: AuthPolicy, base_address: &str) -> Self {
        Self {
            credential: credential.into(),
            enabled: policy.requires_auth(base_address),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.credential(), config.auth_policy(), config.base_address())
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// First characters of the credential, safe to log.
    pub fn token_preview(&self) -> String {
        let end = self
            .credential
            .char_indices()
            .nth(10)
            .map(|(idx, _)| idx)
            .unwrap_or(self.credential.len());
        format!("{}...", &self.credential[..end])
    }

    /// `Authorization` header value, or `None` when the policy skips auth.
    pub fn header_value(&self) -> Result<Option<HeaderValue>> {
        if !self.enabled {
            return Ok(None);
        }

        tracing::debug!("Using bearer token: {}", self.token_preview());

        let mut value = HeaderValue::from_str(&format!("Bearer {}", self.credential))
            .map_err(|e| {
                tracing::error!("Credential cannot be sent as a header: {}", e);
                TodoError::network(format!("invalid credential: {}", e), None)
            })?;
        value.set_sensitive(true);
        Ok(Some(value))
    }
}
