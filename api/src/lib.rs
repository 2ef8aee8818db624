//! # Todos Collection API Client
//!
//! Client for the remote todos collection: list a user's tasks, create a
//! task, delete a task. This is the only surface through which the
//! application touches the network.
//!
//! ## Example
//!
//! ```no_run
//! use reflow_api::{HttpTodoApi, TodoApi, types::NewTodo};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create client from TODO_API_URL environment variable
//!     let api = HttpTodoApi::from_env()?;
//!
//!     let todos = api.list(7).await?;
//!     println!("{} todos", todos.len());
//!
//!     let created = api
//!         .create(NewTodo {
//!             owner_id: 7,
//!             title: "Buy milk".to_string(),
//!             completed: false,
//!         })
//!         .await?;
//!
//!     api.delete(created.id).await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod types;

use futures::future::BoxFuture;

// Re-export main types for convenience
pub use client::HttpTodoApi;
pub use error::ApiError;
pub use types::{NewTodo, Todo};

/// Remote store interface consumed by the mutation coordinator
///
/// All three operations are terminal: a failure is surfaced once as an
/// [`ApiError`] and never retried by the implementation. The trait is
/// object-safe so environments can hold an `Arc<dyn TodoApi>` and tests
/// can substitute an in-memory implementation.
pub trait TodoApi: Send + Sync {
    /// Fetch all task records belonging to `owner_id`
    fn list(&self, owner_id: i64) -> BoxFuture<'_, Result<Vec<Todo>, ApiError>>;

    /// Persist a new task record; the server assigns the id
    fn create(&self, new_todo: NewTodo) -> BoxFuture<'_, Result<Todo, ApiError>>;

    /// Delete the task record with the given id
    fn delete(&self, id: i64) -> BoxFuture<'_, Result<(), ApiError>>;
}
