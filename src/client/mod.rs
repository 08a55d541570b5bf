//! # Todo HTTP Client
//!
//! This module provides an async HTTP client for a REST "todo" service. Every
//! operation shapes its inputs into a [`RequestSpec`] and routes it through one
//! request primitive that applies headers, timeout and error classification.
//!
//! ## Modules
//!
//! - [`auth`] - Static bearer credential and when to send it
//! - [`client`] - Request primitive and todo operations
//! - [`config`] - Caller options and the resolved client configuration
//! - [`error`] - Validation / API / transport error taxonomy
//! - [`types`] - Todo, request option and request description types
//!
//! ## Quick Start
//!
//! ```no_run
//! use todo_sdk::client::{ListOptions, NewTodo, TodoClient};
//!
//! # async fn example() -> todo_sdk::client::Result<()> {
//! let client = TodoClient::default();
//!
//! let created = client.create(NewTodo::titled("Write docs").with_user_id(1)).await?;
//! println!("Created todo {}", created["id"]);
//!
//! let todos = client.list(ListOptions::new().with_limit(5)).await?;
//! println!("Fetched {} todos", todos.as_array().map_or(0, Vec::len));
//! # Ok(())
//! # }
//! ```

pub mod auth;
#[allow(clippy::module_inception)]
pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::TodoClient;
pub use config::{AuthPolicy, ClientConfig, ClientOptions};
pub use error::{ErrorKind, Result, TodoError, ValidationError};
pub use types::*;
