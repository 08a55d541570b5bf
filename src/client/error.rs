//! Error taxonomy for the todo client.
//!
//! Every operation fails with a [`TodoError`], which callers discriminate through
//! [`TodoError::kind`]:
//!
//! - [`ErrorKind::Validation`] - input rejected locally, before any request was sent
//! - [`ErrorKind::Api`] - the service answered, but with a non-2xx status or a body
//!   that could not be interpreted
//! - [`ErrorKind::Transport`] - the exchange never completed (DNS, refused, reset, timeout)

use serde_json::Value;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TodoError>;

/// Coarse classification used by callers to choose a recovery strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Api,
    Transport,
}

/// Input rejected before reaching the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Todo ID is required")]
    MissingTodoId,
    #[error("Todo title is required")]
    MissingTitle,
    #[error("Update data is required")]
    MissingUpdateData,
    #[error("User ID is required")]
    MissingUserId,
}

#[derive(Debug, Error)]
pub enum TodoError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The service responded with a non-2xx status or an unusable body.
    #[error("{message}")]
    Api {
        /// HTTP status code of the response
        status: u16,
        /// Service-provided `message`, or a generic description
        message: String,
        /// Parsed response body, when it was valid JSON
        body: Option<Value>,
    },

    /// The exchange could not complete.
    #[error("{message}")]
    Transport {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },
}

impl TodoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TodoError::Validation(_) => ErrorKind::Validation,
            TodoError::Api { .. } => ErrorKind::Api,
            TodoError::Transport { .. } => ErrorKind::Transport,
        }
    }

    /// Status code for [`ErrorKind::Api`] errors.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            TodoError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Parsed error body for [`ErrorKind::Api`] errors.
    pub fn response_body(&self) -> Option<&Value> {
        match self {
            TodoError::Api { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    pub(crate) fn api(status: u16, message: impl Into<String>, body: Option<Value>) -> Self {
        TodoError::Api {
            status,
            message: message.into(),
            body,
        }
    }

    pub(crate) fn timeout() -> Self {
        TodoError::Transport {
            message: "Request timeout".to_string(),
            source: None,
        }
    }

    pub(crate) fn network(detail: impl std::fmt::Display, source: Option<reqwest::Error>) -> Self {
        TodoError::Transport {
            message: format!("Network error: {}", detail),
            source,
        }
    }
}

impl From<reqwest::Error> for TodoError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return TodoError::timeout();
        }
        TodoError::network(err.to_string(), Some(err))
    }
}
