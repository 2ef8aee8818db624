//! Optimistic todo-list feature built on the Reflow architecture.
//!
//! This crate holds the reproducible core of the todo application:
//!
//! - Todo list model: ordered records plus derived views (visible subset,
//!   active count)
//! - Optimistic mutation coordinator: create/delete/clear-completed flows
//!   with a creation placeholder and a pending-delete id set, reconciled
//!   on settlement
//! - Filter controller: `All` / `Active` / `Completed` view selector
//! - Notification channel: one transient message with token-guarded
//!   auto-dismissal
//!
//! The view layer renders `TodoState` snapshots and forwards user intents
//! as [`TodoAction`]s; all remote I/O runs as effects against a
//! [`reflow_api::TodoApi`] implementation.
//!
//! # Quick Start
//!
//! ```no_run
//! use reflow_api::HttpTodoApi;
//! use reflow_runtime::Store;
//! use reflow_todo::{TodoAction, TodoEnvironment, TodoReducer, TodoState};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let api = HttpTodoApi::from_env()?;
//! let env = TodoEnvironment::new(Arc::new(api), 7);
//! let store = Store::new(TodoState::new(), TodoReducer::new(), env);
//!
//! // Initial load
//! let mut handle = store.send(TodoAction::Load).await?;
//! handle.wait().await;
//!
//! // Create a todo
//! store.send(TodoAction::TitleChanged("Buy milk".to_string())).await?;
//! let mut handle = store.send(TodoAction::Submit).await?;
//! handle.wait().await;
//!
//! // Read state
//! let active = store.state(|s| s.active_count()).await;
//! println!("{active} items left");
//! # Ok(())
//! # }
//! ```

pub mod reducer;
pub mod types;

// Re-export commonly used types
pub use reducer::{
    DeleteOutcome, NOTICE_TIMEOUT, TodoAction, TodoEnvironment, TodoReducer, messages,
};
pub use types::{Filter, Notice, TodoState};
