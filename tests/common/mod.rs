use serde_json::{json, Value};
use todo_sdk::{ClientOptions, TodoClient};
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub const TEST_CREDENTIAL: &str = "test-api-key";

/// A client wired to a fresh local mock service.
pub struct MockEnvironment {
    pub server: MockServer,
    pub client: TodoClient,
}

impl MockEnvironment {
    pub async fn new() -> Self {
        Self::with_options(ClientOptions::new()).await
    }

    pub async fn with_options(options: ClientOptions) -> Self {
        let server = MockServer::start().await;
        let client = TodoClient::new(
            Some(TEST_CREDENTIAL.to_string()),
            Some(options.with_base_address(server.uri())),
        );
        Self { server, client }
    }

    /// Fails the test on drop if any request reaches the server.
    pub async fn expect_no_requests(&self) {
        Mock::given(any())
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&self.server)
            .await;
    }

    pub async fn requests(&self) -> Vec<Request> {
        self.server.received_requests().await.unwrap_or_default()
    }

    pub async fn single_request(&self) -> Request {
        let mut requests = self.requests().await;
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.remove(0)
    }
}

pub fn todo_json(id: i64, title: &str, completed: bool, user_id: i64) -> Value {
    json!({
        "id": id,
        "title": title,
        "completed": completed,
        "userId": user_id,
    })
}

pub fn decode<T: serde::de::DeserializeOwned>(value: Value) -> T {
    serde_json::from_value(value).expect("response should decode")
}

pub fn body_of(request: &Request) -> Value {
    serde_json::from_slice(&request.body).expect("request body should be JSON")
}

pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("todo_sdk=debug"))
        .with_test_writer()
        .try_init();
}
