//! Client configuration.
//!
//! [`ClientOptions`] is what callers pass in; every field is optional and unset or
//! zero values fall back to the defaults below. [`ClientConfig`] is the resolved,
//! immutable result owned by a [`TodoClient`](crate::TodoClient).

use std::time::Duration;

use serde::Deserialize;

use crate::client::types::Id;

/// Public JSON mock service the client targets by default.
pub const DEFAULT_BASE_ADDRESS: &str = "https://jsonplaceholder.typicode.com";
/// Placeholder credential used when none is supplied.
pub const DEFAULT_CREDENTIAL: &str = "test";
pub const DEFAULT_TIMEOUT_MILLIS: u64 = 5000;
pub const DEFAULT_USER_ID: i64 = 1;

/// Host marker of the public demo service, which needs no token.
const DEMO_SERVICE_MARKER: &str = "jsonplaceholder";

/// Decides whether requests carry `Authorization: Bearer <credential>`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthPolicy {
    /// Send the bearer token unless the base address is the public demo service.
    #[default]
    Auto,
    Always,
    Never,
}

impl AuthPolicy {
    pub fn requires_auth(&self, base_address: &str) -> bool {
        match self {
            AuthPolicy::Auto => !base_address.contains(DEMO_SERVICE_MARKER),
            AuthPolicy::Always => true,
            AuthPolicy::Never => false,
        }
    }
}

/// Caller-supplied configuration. Unset fields take their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientOptions {
    #[serde(default)]
    pub base_address: Option<String>,
    #[serde(default)]
    pub timeout_millis: Option<u64>,
    #[serde(default)]
    pub default_user_id: Option<Id>,
    #[serde(default)]
    pub auth_policy: Option<AuthPolicy>,
}

impl ClientOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_address(mut self, base_address: impl Into<String>) -> Self {
        self.base_address = Some(base_address.into());
        self
    }

    pub fn with_timeout_millis(mut self, timeout_millis: u64) -> Self {
        self.timeout_millis = Some(timeout_millis);
        self
    }

    pub fn with_default_user_id(mut self, user_id: impl Into<Id>) -> Self {
        self.default_user_id = Some(user_id.into());
        self
    }

    pub fn with_auth_policy(mut self, policy: AuthPolicy) -> Self {
        self.auth_policy = Some(policy);
        self
    }
}

/// Resolved configuration, fixed for the lifetime of the client.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    base_address: String,
    timeout_millis: u64,
    default_user_id: Id,
    credential: String,
    auth_policy: AuthPolicy,
}

impl ClientConfig {
    /// Resolves options against the defaults. Empty strings and zero values count as unset.
    pub fn resolve(credential: Option<String>, options: ClientOptions) -> Self {
        let base_address = options
            .base_address
            .filter(|address| !address.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_ADDRESS.to_string());

        let timeout_millis = options
            .timeout_millis
            .filter(|millis| *millis > 0)
            .unwrap_or(DEFAULT_TIMEOUT_MILLIS);

        let default_user_id = options
            .default_user_id
            .filter(Id::is_present)
            .unwrap_or(Id::Number(DEFAULT_USER_ID));

        Self {
            base_address,
            timeout_millis,
            default_user_id,
            credential: credential.unwrap_or_else(|| DEFAULT_CREDENTIAL.to_string()),
            auth_policy: options.auth_policy.unwrap_or_default(),
        }
    }

    pub fn base_address(&self) -> &str {
        &self.base_address
    }

    pub fn timeout_millis(&self) -> u64 {
        self.timeout_millis
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_millis)
    }

    pub fn default_user_id(&self) -> &Id {
        &self.default_user_id
    }

    pub fn credential(&self) -> &str {
        &self.credential
    }

    pub fn auth_policy(&self) -> AuthPolicy {
        self.auth_policy
    }

    pub fn requires_auth(&self) -> bool {
        self.auth_policy.requires_auth(&self.base_address)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::resolve(None, ClientOptions::default())
    }
}
