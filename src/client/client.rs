use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE, USER_AGENT},
    Client, StatusCode, Url,
};
use serde_json::{json, Map, Value};

use crate::client::{
    auth::BearerAuth,
    config::{ClientConfig, ClientOptions},
    error::{Result, TodoError, ValidationError},
    types::*,
};

/// `User-Agent` sent with every request.
pub const USER_AGENT_VALUE: &str = concat!("todo-sdk/", env!("CARGO_PKG_VERSION"));

pub struct TodoClient {
    config: ClientConfig,
    client: Client,
    auth: BearerAuth,
}

impl TodoClient {
    pub fn new(credential: Option<String>, options: Option<ClientOptions>) -> Self {
        Self::from_config(ClientConfig::resolve(credential, options.unwrap_or_default()))
    }

    pub fn from_config(config: ClientConfig) -> Self {
        Self {
            client: Client::new(),
            auth: BearerAuth::from_config(&config),
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Performs one exchange and returns the parsed JSON body.
    ///
    /// `path` is resolved against the base address and may carry its own query string.
    pub async fn execute(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value> {
        let mut spec = RequestSpec::new(method, path);
        if let Some(body) = body {
            spec = spec.with_body(body);
        }
        self.send(&spec).await
    }

    /// Every todo operation funnels through here.
    pub async fn send(&self, spec: &RequestSpec) -> Result<Value> {
        self.dispatch(spec).await
    }

    async fn dispatch(&self, spec: &RequestSpec) -> Result<Value> {
        let url = self.resolve_url(&spec.target())?;
        let target = url.to_string();

        let payload = spec
            .body
            .as_ref()
            .map(serde_json::to_vec)
            .transpose()
            .map_err(|e| {
                TodoError::network(format!("failed to encode request body: {}", e), None)
            })?;
        let headers = self.build_headers(payload.as_ref().map(Vec::len))?;

        tracing::debug!(
            "Making {} request to: {} ({})",
            spec.method,
            target,
            if url.scheme() == "https" { "tls" } else { "plain" }
        );

        let mut request = self
            .client
            .request(spec.method.into(), url)
            .headers(headers);
        if let Some(payload) = payload {
            request = request.body(payload);
        }

        let exchange = async {
            let response = request.send().await?;
            let status = response.status();
            let bytes = response.bytes().await?;
            Ok::<_, reqwest::Error>((status, bytes))
        };

        // Dropping the exchange future on timeout tears down the connection.
        let (status, bytes) = match tokio::time::timeout(self.config.timeout(), exchange).await {
            Ok(Ok(done)) => done,
            Ok(Err(e)) => {
                tracing::error!("Network error calling {}: {}", target, e);
                return Err(TodoError::from(e));
            }
            Err(_) => {
                tracing::error!(
                    "Request to {} timed out after {}ms",
                    target,
                    self.config.timeout_millis()
                );
                return Err(TodoError::timeout());
            }
        };

        tracing::debug!("Response status from {}: {}", target, status);
        classify(status, &bytes)
    }

    fn resolve_url(&self, target: &str) -> Result<Url> {
        let base_address = self.config.base_address();
        let url = Url::parse(base_address)
            .and_then(|base| base.join(target))
            .map_err(|e| {
                tracing::error!("Cannot resolve {} against {}: {}", target, base_address, e);
                TodoError::network(format!("invalid URL {}{}: {}", base_address, target, e), None)
            })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(TodoError::network(
                format!("unsupported URL scheme: {}", scheme),
                None,
            )),
        }
    }

    fn build_headers(&self, content_length: Option<usize>) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        if let Some(value) = self.auth.header_value()? {
            headers.insert(AUTHORIZATION, value);
        }
        if let Some(len) = content_length {
            headers.insert(CONTENT_LENGTH, HeaderValue::from(len));
        }

        Ok(headers)
    }

    // Todo operations
    //
    // Results are the service's JSON as-is; decode with `serde_json::from_value::<Todo>`
    // (or `Vec<Todo>`) when the service is known to return full todos.
    pub async fn list(&self, options: ListOptions) -> Result<Value> {
        let spec = RequestSpec::new(HttpMethod::Get, "/todos").with_query(options.query_pairs());
        self.send(&spec).await
    }

    pub async fn get(&self, id: impl Into<Id>) -> Result<Value> {
        let id = require_todo_id(id.into())?;
        self.send(&RequestSpec::new(HttpMethod::Get, todo_path(&id)))
            .await
    }

    pub async fn create(&self, data: NewTodo) -> Result<Value> {
        let title = data
            .title
            .filter(|title| !title.is_empty())
            .ok_or(ValidationError::MissingTitle)?;
        let user_id = data
            .user_id
            .filter(Id::is_present)
            .unwrap_or_else(|| self.config.default_user_id().clone());

        let body = json!({
            "title": title,
            "completed": data.completed.unwrap_or(false),
            "userId": user_id,
        });

        self.send(&RequestSpec::new(HttpMethod::Post, "/todos").with_body(body))
            .await
    }

    /// Replaces a todo (`PUT`), forwarding only `title`, `completed` and `userId`.
    pub async fn update(&self, id: impl Into<Id>, data: impl Into<TodoUpdate>) -> Result<Value> {
        let spec = write_spec(HttpMethod::Put, id.into(), data.into())?;
        self.send(&spec).await
    }

    /// Partially updates a todo (`PATCH`) with the same field filter as [`update`](Self::update).
    pub async fn patch(&self, id: impl Into<Id>, data: impl Into<TodoUpdate>) -> Result<Value> {
        let spec = write_spec(HttpMethod::Patch, id.into(), data.into())?;
        self.send(&spec).await
    }

    pub async fn delete(&self, id: impl Into<Id>) -> Result<Value> {
        let id = require_todo_id(id.into())?;
        self.send(&RequestSpec::new(HttpMethod::Delete, todo_path(&id)))
            .await
    }

    pub async fn complete(&self, id: impl Into<Id>) -> Result<Value> {
        self.patch(id, TodoUpdate::new().completed(true)).await
    }

    pub async fn list_by_user(&self, user_id: impl Into<Id>) -> Result<Value> {
        let user_id = user_id.into();
        if !user_id.is_present() {
            return Err(ValidationError::MissingUserId.into());
        }
        self.list(ListOptions::new().with_user_id(user_id)).await
    }

    pub async fn list_completed(&self, options: ListOptions) -> Result<Value> {
        self.list(ListOptions {
            completed: Some(true),
            ..options
        })
        .await
    }

    pub async fn list_pending(&self, options: ListOptions) -> Result<Value> {
        self.list(ListOptions {
            completed: Some(false),
            ..options
        })
        .await
    }
}

impl Default for TodoClient {
    fn default() -> Self {
        Self::from_config(ClientConfig::default())
    }
}

fn require_todo_id(id: Id) -> Result<Id> {
    if id.is_present() {
        Ok(id)
    } else {
        Err(ValidationError::MissingTodoId.into())
    }
}

fn write_spec(method: HttpMethod, id: Id, data: TodoUpdate) -> Result<RequestSpec> {
    let id = require_todo_id(id)?;
    if data.is_empty() {
        return Err(ValidationError::MissingUpdateData.into());
    }
    Ok(RequestSpec::new(method, todo_path(&id)).with_body(Value::Object(data.writable_fields())))
}

/// Parses the buffered body and maps non-2xx statuses to [`TodoError::Api`].
fn classify(status: StatusCode, bytes: &[u8]) -> Result<Value> {
    let body = if bytes.is_empty() {
        Value::Object(Map::new())
    } else {
        serde_json::from_slice(bytes).map_err(|e| {
            tracing::error!("Failed to parse response with status {}: {}", status, e);
            TodoError::api(status.as_u16(), "Invalid JSON response", None)
        })?
    };

    if status.is_success() {
        return Ok(body);
    }

    // An error body of `null` carries no readable fields at all.
    if body.is_null() {
        tracing::error!("Request failed with status {} and a null body", status);
        return Err(TodoError::api(status.as_u16(), "Invalid JSON response", None));
    }

    let message = error_message(&body);
    tracing::error!("Request failed with status {}: {}", status, message);
    Err(TodoError::api(status.as_u16(), message, Some(body)))
}

fn error_message(body: &Value) -> String {
    match body.get("message").cloned() {
        Some(Value::String(text)) if !text.is_empty() => text,
        Some(Value::Bool(true)) => "true".to_string(),
        Some(Value::Number(n)) if n.as_f64() != Some(0.0) => n.to_string(),
        Some(other @ (Value::Array(_) | Value::Object(_))) => other.to_string(),
        _ => "API Error".to_string(),
    }
}
