//! # Reflow Testing
//!
//! Testing utilities and helpers for the Reflow architecture.
//!
//! This crate provides:
//! - [`ReducerTest`]: fluent Given-When-Then harness for pure reducer tests
//! - Assertion helpers for effects
//! - [`InMemoryTodoApi`]: scriptable in-memory implementation of the
//!   remote todos collection, with failure injection and call recording
//!
//! ## Example
//!
//! ```ignore
//! use reflow_testing::{InMemoryTodoApi, ReducerTest};
//! use reflow_runtime::Store;
//!
//! #[tokio::test]
//! async fn test_load_flow() {
//!     let api = InMemoryTodoApi::new();
//!     let env = TodoEnvironment::new(Arc::new(api.clone()), 7);
//!     let store = Store::new(TodoState::default(), TodoReducer::new(), env);
//!
//!     let mut handle = store.send(TodoAction::Load).await.unwrap();
//!     handle.wait().await;
//!
//!     let count = store.state(|s| s.todos.len()).await;
//!     assert_eq!(count, 0);
//! }
//! ```

pub mod api_mocks;

pub use api_mocks::{InMemoryTodoApi, RecordedCall};
pub use reducer_test::{ReducerTest, assertions};
