//! Type definitions for the todo API.
//!
//! This module contains the data structures exchanged with the remote todo service,
//! the caller-facing option types, and the transient [`RequestSpec`] every operation
//! builds before handing it to the request primitive.
//!
//! ## Key Types
//!
//! - [`Todo`] - Typed view of a todo returned by the service
//! - [`NewTodo`] - Payload for creating a todo
//! - [`TodoUpdate`] - Caller-supplied fields for `PUT`/`PATCH`
//! - [`ListOptions`] - Filters and pagination for listing todos
//! - [`RequestSpec`] - Method, path, query and body for one HTTP exchange
//!
//! ## Presence Checks
//!
//! Identifiers and pagination values follow "present and truthy" semantics:
//! a numeric `0` or an empty string counts as absent. See [`Id::is_present`].

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identifier of a todo or a user.
///
/// The service assigns numeric ids, but string ids are accepted and passed through
/// verbatim so the client also works against services with opaque identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    Number(i64),
    Text(String),
}

impl Id {
    /// Returns `false` for `0` and `""`, which are treated as missing identifiers.
    pub fn is_present(&self) -> bool {
        match self {
            Id::Number(n) => *n != 0,
            Id::Text(s) => !s.is_empty(),
        }
    }

    fn to_json(&self) -> Value {
        match self {
            Id::Number(n) => Value::from(*n),
            Id::Text(s) => Value::from(s.as_str()),
        }
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::Number(n) => write!(f, "{}", n),
            Id::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Id {
    fn from(value: i64) -> Self {
        Id::Number(value)
    }
}

impl From<i32> for Id {
    fn from(value: i32) -> Self {
        Id::Number(value as i64)
    }
}

impl From<u32> for Id {
    fn from(value: u32) -> Self {
        Id::Number(value as i64)
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Id::Text(value.to_string())
    }
}

impl From<String> for Id {
    fn from(value: String) -> Self {
        Id::Text(value)
    }
}

/// A todo item as stored by the remote service.
///
/// Client operations resolve with the service's JSON unchanged; decode into
/// this type with `serde_json::from_value` when the body is a full todo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    /// Identifier assigned by the service
    pub id: Id,
    /// Todo title
    #[serde(default)]
    pub title: String,
    /// Completion flag
    #[serde(default)]
    pub completed: bool,
    /// Owning user
    #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Id>,
}

/// Payload for creating a todo.
///
/// `title` is required; the client rejects a missing or empty title before
/// any request is made. `completed` defaults to `false` and `user_id` to the
/// client's configured default user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewTodo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
    #[serde(rename = "userId", default)]
    pub user_id: Option<Id>,
}

impl NewTodo {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    pub fn with_user_id(mut self, user_id: impl Into<Id>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }
}

/// Fields supplied by the caller for an update.
///
/// A key being present means the caller set it, including explicit `false`,
/// `0` and `null`. Keys other than `title`, `completed` and `userId` are
/// accepted (they make the update non-empty) but are never sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoUpdate {
    fields: Map<String, Value>,
}

impl TodoUpdate {
    /// Keys the service accepts on `PUT`/`PATCH`.
    pub const WRITABLE_FIELDS: [&'static str; 3] = ["title", "completed", "userId"];

    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(self, title: impl Into<String>) -> Self {
        self.field("title", Value::String(title.into()))
    }

    pub fn completed(self, completed: bool) -> Self {
        self.field("completed", Value::Bool(completed))
    }

    pub fn user_id(self, user_id: impl Into<Id>) -> Self {
        let user_id = user_id.into();
        self.field("userId", user_id.to_json())
    }

    /// Sets an arbitrary key.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// The subset of fields forwarded to the service, values copied as-is.
    pub fn writable_fields(&self) -> Map<String, Value> {
        Self::WRITABLE_FIELDS
            .iter()
            .filter_map(|key| {
                self.fields
                    .get(*key)
                    .map(|value| (key.to_string(), value.clone()))
            })
            .collect()
    }
}

impl From<Map<String, Value>> for TodoUpdate {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

impl From<Value> for TodoUpdate {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self { fields },
            _ => Self::default(),
        }
    }
}

/// Filters and pagination for listing todos.
///
/// `limit`/`_limit` and `start`/`_start` are synonyms; when both are set the
/// plain name wins. Zero values count as unset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListOptions {
    #[serde(rename = "userId", default)]
    pub user_id: Option<Id>,
    #[serde(default)]
    pub completed: Option<bool>,
    #[serde(default)]
    pub limit: Option<u64>,
    #[serde(rename = "_limit", default)]
    pub raw_limit: Option<u64>,
    #[serde(default)]
    pub start: Option<u64>,
    #[serde(rename = "_start", default)]
    pub raw_start: Option<u64>,
}

impl ListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user_id(mut self, user_id: impl Into<Id>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_start(mut self, start: u64) -> Self {
        self.start = Some(start);
        self
    }

    /// Query pairs in wire order: `userId`, `completed`, `_limit`, `_start`.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if let Some(user_id) = self.user_id.as_ref().filter(|id| id.is_present()) {
            pairs.push(("userId", user_id.to_string()));
        }
        if let Some(completed) = self.completed {
            pairs.push(("completed", completed.to_string()));
        }
        if let Some(limit) = first_nonzero(self.limit, self.raw_limit) {
            pairs.push(("_limit", limit.to_string()));
        }
        if let Some(start) = first_nonzero(self.start, self.raw_start) {
            pairs.push(("_start", start.to_string()));
        }

        pairs
    }
}

fn first_nonzero(preferred: Option<u64>, fallback: Option<u64>) -> Option<u64> {
    preferred
        .filter(|v| *v != 0)
        .or_else(|| fallback.filter(|v| *v != 0))
}

/// HTTP verbs used by the todo API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// One HTTP exchange, described as plain data.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    pub method: HttpMethod,
    pub path: String,
    pub query: Vec<(&'static str, String)>,
    pub body: Option<Value>,
}

impl RequestSpec {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn with_query(mut self, query: Vec<(&'static str, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Path plus percent-encoded query string, ready to resolve against the base address.
    pub fn target(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }

        let query = self
            .query
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}?{}", self.path, query)
    }
}

/// Path of a single todo, with the identifier percent-encoded.
pub(crate) fn todo_path(id: &Id) -> String {
    format!("/todos/{}", urlencoding::encode(&id.to_string()))
}
