mod common;

use common::{body_of, decode, todo_json, MockEnvironment};
use pretty_assertions::assert_eq;
use serde_json::json;
use todo_sdk::{ClientOptions, HttpMethod, Id, ListOptions, NewTodo, Todo, TodoUpdate};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

async fn mount_list(env: &MockEnvironment) {
    Mock::given(method("GET"))
        .and(path("/todos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            todo_json(1, "first", false, 1),
            todo_json(2, "second", true, 1),
        ])))
        .mount(&env.server)
        .await;
}

async fn query_of_single_request(env: &MockEnvironment) -> Option<String> {
    env.single_request().await.url.query().map(str::to_string)
}

#[tokio::test]
async fn test_list_without_options() {
    common::init_test_logging();
    let env = MockEnvironment::new().await;
    mount_list(&env).await;

    let body = env
        .client
        .list(ListOptions::new())
        .await
        .expect("list should succeed");
    let todos: Vec<Todo> = decode(body);

    assert_eq!(todos.len(), 2);
    assert_eq!(todos[1].title, "second");
    assert!(todos[1].completed);
    assert_eq!(query_of_single_request(&env).await, None);
}

#[tokio::test]
async fn test_list_limit_synonyms() {
    common::init_test_logging();

    let both = ListOptions {
        limit: Some(5),
        raw_limit: Some(9),
        ..ListOptions::default()
    };
    let underscore_only = ListOptions {
        raw_limit: Some(5),
        ..ListOptions::default()
    };

    for options in [ListOptions::new().with_limit(5), underscore_only, both] {
        let env = MockEnvironment::new().await;
        mount_list(&env).await;

        env.client.list(options).await.expect("list should succeed");
        assert_eq!(
            query_of_single_request(&env).await.as_deref(),
            Some("_limit=5")
        );
    }
}

#[tokio::test]
async fn test_list_query_order() {
    common::init_test_logging();
    let env = MockEnvironment::new().await;
    mount_list(&env).await;

    let options = ListOptions {
        raw_start: Some(10),
        limit: Some(3),
        completed: Some(false),
        user_id: Some(Id::from(2)),
        ..ListOptions::default()
    };
    env.client.list(options).await.expect("list should succeed");

    assert_eq!(
        query_of_single_request(&env).await.as_deref(),
        Some("userId=2&completed=false&_limit=3&_start=10")
    );
}

#[tokio::test]
async fn test_list_by_user() {
    common::init_test_logging();
    let env = MockEnvironment::new().await;

    Mock::given(method("GET"))
        .and(path("/todos"))
        .and(query_param("userId", "1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([todo_json(1, "mine", false, 1)])),
        )
        .expect(1)
        .mount(&env.server)
        .await;

    let body = env.client.list_by_user(1).await.expect("list should succeed");
    let todos: Vec<Todo> = decode(body);

    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].user_id, Some(Id::Number(1)));
}

#[tokio::test]
async fn test_list_completed_and_pending() {
    common::init_test_logging();

    let env = MockEnvironment::new().await;
    mount_list(&env).await;
    let options = ListOptions {
        raw_limit: Some(3),
        completed: Some(false),
        ..ListOptions::default()
    };
    env.client
        .list_completed(options)
        .await
        .expect("list should succeed");
    assert_eq!(
        query_of_single_request(&env).await.as_deref(),
        Some("completed=true&_limit=3")
    );

    let env = MockEnvironment::new().await;
    mount_list(&env).await;
    env.client
        .list_pending(ListOptions::new().with_user_id(4))
        .await
        .expect("list should succeed");
    assert_eq!(
        query_of_single_request(&env).await.as_deref(),
        Some("userId=4&completed=false")
    );
}

#[tokio::test]
async fn test_get_by_id() {
    common::init_test_logging();
    let env = MockEnvironment::new().await;

    Mock::given(method("GET"))
        .and(path("/todos/1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(todo_json(1, "delectus aut autem", false, 1)),
        )
        .expect(1)
        .mount(&env.server)
        .await;

    let todo: Todo = decode(env.client.get(1).await.expect("get should succeed"));
    assert_eq!(todo.id, Id::Number(1));
    assert_eq!(todo.title, "delectus aut autem");
}

#[tokio::test]
async fn test_create_fills_defaults() {
    common::init_test_logging();
    let options = ClientOptions::new().with_default_user_id(5);
    let env = MockEnvironment::with_options(options).await;

    Mock::given(method("POST"))
        .and(path("/todos"))
        .and(body_json(json!({"title": "Buy milk", "completed": false, "userId": 5})))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(todo_json(201, "Buy milk", false, 5)),
        )
        .expect(1)
        .mount(&env.server)
        .await;

    let created: Todo = decode(
        env.client
            .create(NewTodo::titled("Buy milk"))
            .await
            .expect("create should succeed"),
    );

    assert_eq!(created.id, Id::Number(201));
    assert_eq!(created.user_id, Some(Id::Number(5)));

    let request = env.single_request().await;
    let content_length = request
        .headers
        .get("content-length")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<usize>().ok());
    assert_eq!(content_length, Some(request.body.len()));
}

#[tokio::test]
async fn test_create_keeps_explicit_values() {
    common::init_test_logging();
    let env = MockEnvironment::new().await;

    Mock::given(method("POST"))
        .and(path("/todos"))
        .respond_with(ResponseTemplate::new(201).set_body_json(todo_json(201, "T", true, 3)))
        .mount(&env.server)
        .await;

    env.client
        .create(NewTodo::titled("T").with_completed(true).with_user_id(3))
        .await
        .expect("create should succeed");

    let request = env.single_request().await;
    assert_eq!(
        body_of(&request),
        json!({"title": "T", "completed": true, "userId": 3})
    );
}

#[tokio::test]
async fn test_update_sends_only_writable_fields() {
    common::init_test_logging();
    let env = MockEnvironment::new().await;

    Mock::given(method("PUT"))
        .and(path("/todos/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(todo_json(1, "x", false, 1)))
        .expect(1)
        .mount(&env.server)
        .await;

    let updated = env
        .client
        .update(1, json!({"title": "x", "extra": 1}))
        .await
        .expect("update should succeed");
    assert_eq!(updated["title"], "x");

    let request = env.single_request().await;
    assert_eq!(body_of(&request), json!({"title": "x"}));
}

#[tokio::test]
async fn test_update_keeps_falsy_values() {
    common::init_test_logging();
    let env = MockEnvironment::new().await;

    Mock::given(method("PUT"))
        .and(path("/todos/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(todo_json(2, "", false, 0)))
        .mount(&env.server)
        .await;

    env.client
        .update(2, TodoUpdate::new().completed(false).user_id(0).title(""))
        .await
        .expect("update should succeed");

    let request = env.single_request().await;
    assert_eq!(
        body_of(&request),
        json!({"title": "", "completed": false, "userId": 0})
    );
}

#[tokio::test]
async fn test_update_with_only_unknown_keys_sends_empty_object() {
    common::init_test_logging();
    let env = MockEnvironment::new().await;

    Mock::given(method("PATCH"))
        .and(path("/todos/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(todo_json(3, "kept", false, 1)))
        .mount(&env.server)
        .await;

    env.client
        .patch(3, TodoUpdate::new().field("priority", "high"))
        .await
        .expect("patch should succeed");

    let request = env.single_request().await;
    assert_eq!(body_of(&request), json!({}));
}

#[tokio::test]
async fn test_write_operations_resolve_with_sparse_bodies() {
    common::init_test_logging();
    let env = MockEnvironment::new().await;

    Mock::given(method("PATCH"))
        .and(path("/todos/5"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&env.server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/todos/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&env.server)
        .await;

    let patched = env
        .client
        .patch(5, TodoUpdate::new().completed(true))
        .await
        .expect("204 should resolve");
    assert_eq!(patched, json!({}));

    let completed = env.client.complete(5).await.expect("204 should resolve");
    assert_eq!(completed, json!({}));

    let updated = env
        .client
        .update(5, TodoUpdate::new().title("t"))
        .await
        .expect("empty object should resolve");
    assert_eq!(updated, json!({}));
}

#[tokio::test]
async fn test_list_resolves_with_whatever_json_the_service_sends() {
    common::init_test_logging();
    let env = MockEnvironment::new().await;

    Mock::given(method("GET"))
        .and(path("/todos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .mount(&env.server)
        .await;

    let body = env
        .client
        .list(ListOptions::new())
        .await
        .expect("parsed 2xx body should resolve");
    assert_eq!(body, json!({"items": []}));
}

#[tokio::test]
async fn test_complete_matches_patch() {
    common::init_test_logging();
    let env = MockEnvironment::new().await;

    Mock::given(method("PATCH"))
        .and(path("/todos/2"))
        .and(body_json(json!({"completed": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(todo_json(2, "done", true, 1)))
        .expect(2)
        .mount(&env.server)
        .await;

    let completed = env.client.complete(2).await.expect("complete should succeed");
    let patched = env
        .client
        .patch(2, TodoUpdate::new().completed(true))
        .await
        .expect("patch should succeed");

    assert_eq!(completed, patched);

    let requests = env.requests().await;
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].method, requests[1].method);
    assert_eq!(requests[0].url.path(), requests[1].url.path());
    assert_eq!(requests[0].body, requests[1].body);
}

#[tokio::test]
async fn test_delete_returns_raw_body() {
    common::init_test_logging();
    let env = MockEnvironment::new().await;

    Mock::given(method("DELETE"))
        .and(path("/todos/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&env.server)
        .await;

    let body = env.client.delete(1).await.expect("delete should succeed");
    assert_eq!(body, json!({}));
    assert!(env.single_request().await.body.is_empty());
}

#[tokio::test]
async fn test_string_ids_are_path_encoded() {
    common::init_test_logging();
    let env = MockEnvironment::new().await;

    Mock::given(method("GET"))
        .and(path("/todos/a%20b"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "a b", "title": "t"})))
        .expect(1)
        .mount(&env.server)
        .await;

    let todo: Todo = decode(env.client.get("a b").await.expect("get should succeed"));
    assert_eq!(todo.id, Id::Text("a b".to_string()));
    assert!(!todo.completed);
    assert_eq!(todo.user_id, None);
}

#[tokio::test]
async fn test_execute_passes_path_and_query_through() {
    common::init_test_logging();
    let env = MockEnvironment::new().await;

    Mock::given(method("GET"))
        .and(path("/todos"))
        .and(query_param("_limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}])))
        .expect(1)
        .mount(&env.server)
        .await;

    let body = env
        .client
        .execute(HttpMethod::Get, "/todos?_limit=1", None)
        .await
        .expect("execute should succeed");
    assert_eq!(body, json!([{"id": 1}]));
}
