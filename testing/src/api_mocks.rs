//! In-memory todos API for fast, deterministic testing
//!
//! Provides a scriptable implementation of [`TodoApi`]:
//! - [`InMemoryTodoApi`]: seeded records, server-assigned ids,
//!   per-operation failure injection (including per-id delete failures),
//!   optional artificial latency, and call recording

#![allow(clippy::unwrap_used)] // Test infrastructure uses unwrap for simplicity
#![allow(clippy::missing_panics_doc)] // Test utilities document panics where critical

use futures::future::BoxFuture;
use reflow_api::{ApiError, NewTodo, Todo, TodoApi};
use std::collections::HashSet;
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// A call that reached the in-memory API
///
/// Useful for asserting that an operation did (or did not) hit the
/// "network" - e.g. that an empty-title submit performs no create call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordedCall {
    /// A list call for the given owner
    List {
        /// Owner whose records were requested
        owner_id: i64,
    },
    /// A create call
    Create {
        /// Owner of the new record
        owner_id: i64,
        /// Title of the new record
        title: String,
    },
    /// A delete call
    Delete {
        /// Id of the record to delete
        id: i64,
    },
}

#[derive(Debug)]
struct Inner {
    todos: Vec<Todo>,
    next_id: i64,
    fail_list: bool,
    fail_create: bool,
    failing_deletes: HashSet<i64>,
    calls: Vec<RecordedCall>,
}

impl Default for Inner {
    fn default() -> Self {
        Self {
            todos: Vec::new(),
            next_id: 1,
            fail_list: false,
            fail_create: false,
            failing_deletes: HashSet::new(),
            calls: Vec::new(),
        }
    }
}

/// Scriptable in-memory implementation of the remote todos collection
///
/// Clones share the same underlying collection, so a test can keep one
/// clone for scripting/inspection and hand another to the environment.
///
/// # Example
///
/// ```
/// use reflow_testing::InMemoryTodoApi;
/// use reflow_api::{Todo, TodoApi};
///
/// # async fn example() {
/// let api = InMemoryTodoApi::new();
/// api.seed(Todo { id: 1, owner_id: 7, title: "Buy milk".into(), completed: false });
/// api.fail_delete(1);
///
/// let result = api.delete(1).await;
/// assert!(result.is_err());
/// assert!(api.contains(1)); // failed delete leaves the record
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct InMemoryTodoApi {
    inner: Arc<RwLock<Inner>>,
    latency: Duration,
}

impl InMemoryTodoApi {
    /// Create a new empty in-memory API
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add artificial latency before each response settles
    ///
    /// Useful for observing in-flight state (placeholder, pending-delete
    /// markers) deterministically in integration tests.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Insert a record directly, bypassing the create operation
    pub fn seed(&self, todo: Todo) {
        let mut inner = self.inner.write().unwrap();
        inner.next_id = inner.next_id.max(todo.id + 1);
        inner.todos.push(todo);
    }

    /// Insert several records directly
    pub fn seed_all(&self, todos: impl IntoIterator<Item = Todo>) {
        for todo in todos {
            self.seed(todo);
        }
    }

    /// Make subsequent list calls fail
    pub fn fail_list(&self, fail: bool) {
        self.inner.write().unwrap().fail_list = fail;
    }

    /// Make subsequent create calls fail
    pub fn fail_create(&self, fail: bool) {
        self.inner.write().unwrap().fail_create = fail;
    }

    /// Make subsequent delete calls for `id` fail
    pub fn fail_delete(&self, id: i64) {
        self.inner.write().unwrap().failing_deletes.insert(id);
    }

    /// Current records (for assertions)
    #[must_use]
    pub fn todos(&self) -> Vec<Todo> {
        self.inner.read().unwrap().todos.clone()
    }

    /// Number of stored records
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().unwrap().todos.len()
    }

    /// Check if the collection is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().unwrap().todos.is_empty()
    }

    /// Check if a record with the given id exists
    #[must_use]
    pub fn contains(&self, id: i64) -> bool {
        self.inner.read().unwrap().todos.iter().any(|t| t.id == id)
    }

    /// Calls recorded so far, in arrival order
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.inner.read().unwrap().calls.clone()
    }

    /// Forget recorded calls (for test phases)
    pub fn clear_calls(&self) {
        self.inner.write().unwrap().calls.clear();
    }

    fn respond<T: Send + 'static>(
        &self,
        result: Result<T, ApiError>,
    ) -> BoxFuture<'_, Result<T, ApiError>> {
        let latency = self.latency;
        Box::pin(async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            result
        })
    }
}

fn simulated_failure() -> ApiError {
    ApiError::RequestFailed("simulated transport failure".to_string())
}

impl TodoApi for InMemoryTodoApi {
    fn list(&self, owner_id: i64) -> BoxFuture<'_, Result<Vec<Todo>, ApiError>> {
        let result = {
            let mut inner = self.inner.write().unwrap();
            inner.calls.push(RecordedCall::List { owner_id });

            if inner.fail_list {
                Err(simulated_failure())
            } else {
                Ok(inner
                    .todos
                    .iter()
                    .filter(|t| t.owner_id == owner_id)
                    .cloned()
                    .collect())
            }
        };

        self.respond(result)
    }

    fn create(&self, new_todo: NewTodo) -> BoxFuture<'_, Result<Todo, ApiError>> {
        let result = {
            let mut inner = self.inner.write().unwrap();
            inner.calls.push(RecordedCall::Create {
                owner_id: new_todo.owner_id,
                title: new_todo.title.clone(),
            });

            if inner.fail_create {
                Err(simulated_failure())
            } else {
                let todo = Todo {
                    id: inner.next_id,
                    owner_id: new_todo.owner_id,
                    title: new_todo.title,
                    completed: new_todo.completed,
                };
                inner.next_id += 1;
                inner.todos.push(todo.clone());
                Ok(todo)
            }
        };

        self.respond(result)
    }

    fn delete(&self, id: i64) -> BoxFuture<'_, Result<(), ApiError>> {
        let result = {
            let mut inner = self.inner.write().unwrap();
            inner.calls.push(RecordedCall::Delete { id });

            if inner.failing_deletes.contains(&id) {
                Err(simulated_failure())
            } else if inner.todos.iter().any(|t| t.id == id) {
                inner.todos.retain(|t| t.id != id);
                Ok(())
            } else {
                Err(ApiError::NotFound)
            }
        };

        self.respond(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, owner_id: i64, title: &str, completed: bool) -> Todo {
        Todo {
            id,
            owner_id,
            title: title.to_string(),
            completed,
        }
    }

    #[tokio::test]
    async fn list_filters_by_owner() {
        let api = InMemoryTodoApi::new();
        api.seed_all([
            record(1, 7, "Buy milk", false),
            record(2, 9, "Other user", false),
        ]);

        let todos = api.list(7).await.unwrap();

        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].id, 1);
    }

    #[tokio::test]
    async fn create_assigns_increasing_ids() {
        let api = InMemoryTodoApi::new();
        api.seed(record(10, 7, "Seeded", false));

        let first = api
            .create(NewTodo {
                owner_id: 7,
                title: "One".to_string(),
                completed: false,
            })
            .await
            .unwrap();
        let second = api
            .create(NewTodo {
                owner_id: 7,
                title: "Two".to_string(),
                completed: false,
            })
            .await
            .unwrap();

        assert_eq!(first.id, 11);
        assert_eq!(second.id, 12);
        assert_eq!(api.len(), 3);
    }

    #[tokio::test]
    async fn delete_missing_record_is_not_found() {
        let api = InMemoryTodoApi::new();

        let result = api.delete(999).await;

        assert!(matches!(result, Err(ApiError::NotFound)));
    }

    #[tokio::test]
    async fn injected_delete_failure_keeps_record() {
        let api = InMemoryTodoApi::new();
        api.seed(record(1, 7, "Buy milk", false));
        api.fail_delete(1);

        let result = api.delete(1).await;

        assert!(result.is_err());
        assert!(api.contains(1));
    }

    #[tokio::test]
    async fn calls_are_recorded_in_order() {
        let api = InMemoryTodoApi::new();
        api.seed(record(1, 7, "Buy milk", false));

        let _ = api.list(7).await;
        let _ = api.delete(1).await;

        assert_eq!(
            api.calls(),
            vec![
                RecordedCall::List { owner_id: 7 },
                RecordedCall::Delete { id: 1 },
            ]
        );
    }
}
