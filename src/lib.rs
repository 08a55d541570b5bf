//! # Todo SDK
//!
//! An async client library for a remote "todo" REST resource. It turns method
//! calls into HTTP requests against `/todos` and `/todos/{id}`, and turns the
//! JSON responses into typed results or a classified [`TodoError`].
//!
//! By default the client targets the public JSONPlaceholder demo service, which
//! simulates writes without persisting them.
//!
//! ## Error Handling
//!
//! Callers branch on [`TodoError::kind`]:
//!
//! ```no_run
//! use todo_sdk::{ErrorKind, TodoClient};
//!
//! # async fn example() {
//! let client = TodoClient::default();
//! match client.get(1).await {
//!     Ok(todo) => println!("{}", todo["title"]),
//!     Err(e) => match e.kind() {
//!         ErrorKind::Validation => eprintln!("bad input: {}", e),
//!         ErrorKind::Api => eprintln!("service said {:?}: {}", e.status_code(), e),
//!         ErrorKind::Transport => eprintln!("connectivity problem: {}", e),
//!     },
//! }
//! # }
//! ```

pub mod client;

pub use client::{
    AuthPolicy, ClientConfig, ClientOptions, ErrorKind, HttpMethod, Id, ListOptions, NewTodo,
    RequestSpec, Result, Todo, TodoClient, TodoError, TodoUpdate, ValidationError,
};
