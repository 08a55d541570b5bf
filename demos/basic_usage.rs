use todo_sdk::{ClientOptions, ErrorKind, ListOptions, NewTodo, Todo, TodoClient, TodoUpdate};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".to_string().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let client = TodoClient::new(
        Some("test".to_string()),
        Some(ClientOptions::new().with_timeout_millis(10000).with_default_user_id(1)),
    );

    if let Err(e) = walkthrough(&client).await {
        match e.kind() {
            ErrorKind::Api => tracing::error!("API error: {} (status {:?})", e, e.status_code()),
            ErrorKind::Transport => tracing::error!("Network error: {}", e),
            ErrorKind::Validation => tracing::error!("Invalid input: {}", e),
        }
        return Err(e.into());
    }

    Ok(())
}

async fn walkthrough(client: &TodoClient) -> todo_sdk::Result<()> {
    tracing::info!("Creating a new todo...");
    let created = client
        .create(NewTodo::titled("Learn Rust SDK development").with_user_id(1))
        .await?;
    tracing::info!("Created todo: {}", created);

    tracing::info!("Fetching todos...");
    let todos = client.list(ListOptions::new().with_limit(5)).await?;
    tracing::info!("Fetched todos: {}", todos);

    tracing::info!("Fetching todos for user 1...");
    let user_todos: Vec<Todo> =
        serde_json::from_value(client.list_by_user(1).await?).unwrap_or_default();
    for todo in user_todos.iter().take(3) {
        tracing::info!("  #{} {}", todo.id, todo.title);
    }

    tracing::info!("Fetching completed todos...");
    let completed = client.list_completed(ListOptions::new().with_limit(3)).await?;
    tracing::info!("Completed todos: {}", completed);

    let todo = client.get(1).await?;
    tracing::info!("Specific todo: {}", todo);

    // The demo service simulates writes; nothing below persists.
    let updated = client
        .update(1, TodoUpdate::new().title("Updated title").completed(true))
        .await?;
    tracing::info!("Updated todo: {}", updated);

    let done = client.complete(2).await?;
    tracing::info!("Completed todo: {}", done);

    client.delete(1).await?;
    tracing::info!("Deleted todo 1");

    Ok(())
}
