//! Reducer logic for the todo feature.
//!
//! Validates intents, applies optimistic markers (creation placeholder,
//! pending-delete set), dispatches remote calls as effects, and reconciles
//! the settlements those effects feed back.

use crate::types::{Filter, Notice, TodoState};
use reflow_api::{NewTodo, Todo, TodoApi};
use reflow_core::{SmallVec, async_effect, delay, effect::Effect, reducer::Reducer, smallvec};
use std::sync::Arc;
use std::time::Duration;

/// How long a notice stays up before auto-dismissal
pub const NOTICE_TIMEOUT: Duration = Duration::from_secs(3);

/// Fixed user-facing messages, one per operation kind
pub mod messages {
    /// Raised when the initial load fails
    pub const LOAD_FAILED: &str = "Can't load todos!";
    /// Raised when submitting an empty title
    pub const EMPTY_TITLE: &str = "Title can't be empty";
    /// Raised when a create call fails
    pub const ADD_FAILED: &str = "Unable to add a todo";
    /// Raised when a delete call fails
    pub const DELETE_FAILED: &str = "Unable to delete a todo";
}

/// Outcome of a settled delete call
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The server confirmed the deletion
    Deleted,
    /// The call failed; the record stays
    Failed,
}

/// Actions for the todo feature
///
/// Intents come from the view layer; settlements are fed back by effects
/// when a remote call or timer finishes.
#[derive(Clone, Debug)]
pub enum TodoAction {
    // ========== Intents ==========
    /// Fetch the owner's records from the remote collection
    Load,
    /// Update the draft title
    TitleChanged(String),
    /// Submit the draft title as a new todo
    Submit,
    /// Delete a single record
    Delete {
        /// Id of the record to delete
        id: i64,
    },
    /// Delete every currently-completed record
    ClearCompleted,
    /// Switch the view filter
    SetFilter(Filter),
    /// Dismiss the current notice
    DismissNotice,

    // ========== Settlements ==========
    /// Load finished with the owner's records
    Loaded {
        /// Records returned by the server
        todos: Vec<Todo>,
    },
    /// Load failed
    LoadFailed,
    /// Create finished with the server-assigned record
    Created {
        /// The persisted record
        todo: Todo,
    },
    /// Create failed
    CreateFailed,
    /// A delete call settled
    DeleteSettled {
        /// Id the call was issued for
        id: i64,
        /// Whether the server confirmed the deletion
        outcome: DeleteOutcome,
    },
    /// A notice auto-dismiss timer fired
    NoticeExpired {
        /// Token of the notice the timer was scheduled for
        token: u64,
    },
}

/// Environment dependencies for the todo reducer
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Remote collection client
    pub api: Arc<dyn TodoApi>,
    /// Owner whose records this session manages
    pub owner_id: i64,
    /// Notice auto-dismiss delay
    pub notice_timeout: Duration,
}

impl TodoEnvironment {
    /// Creates an environment with the default notice timeout
    #[must_use]
    pub fn new(api: Arc<dyn TodoApi>, owner_id: i64) -> Self {
        Self {
            api,
            owner_id,
            notice_timeout: NOTICE_TIMEOUT,
        }
    }

    /// Override the notice auto-dismiss delay (short timeouts for tests)
    #[must_use]
    pub fn with_notice_timeout(mut self, timeout: Duration) -> Self {
        self.notice_timeout = timeout;
        self
    }
}

/// Reducer for the todo feature
#[derive(Clone, Debug, Default)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Raise a notice and schedule its auto-dismissal
    ///
    /// The returned `Delay` effect carries the new notice's token, so a
    /// timer that fires after a newer notice replaced this one clears
    /// nothing.
    fn raise(state: &mut TodoState, env: &TodoEnvironment, message: &str) -> Effect<TodoAction> {
        let token = state.next_notice_token();
        state.notice = Some(Notice {
            message: message.to_string(),
            token,
        });

        delay! {
            duration: env.notice_timeout,
            action: TodoAction::NoticeExpired { token }
        }
    }

    /// Effect issuing a remote delete for one id
    ///
    /// Settles into a single `DeleteSettled` regardless of outcome, so the
    /// pending-delete marker always comes off.
    fn delete_effect(env: &TodoEnvironment, id: i64) -> Effect<TodoAction> {
        let api = Arc::clone(&env.api);

        async_effect! {
            let outcome = match api.delete(id).await {
                Ok(()) => DeleteOutcome::Deleted,
                Err(error) => {
                    tracing::warn!(id, %error, "Delete failed");
                    DeleteOutcome::Failed
                },
            };
            Some(TodoAction::DeleteSettled { id, outcome })
        }
    }
}

impl Reducer for TodoReducer {
    type State = TodoState;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Intents ==========
            TodoAction::Load => {
                let api = Arc::clone(&env.api);
                let owner_id = env.owner_id;

                smallvec![async_effect! {
                    match api.list(owner_id).await {
                        Ok(todos) => Some(TodoAction::Loaded { todos }),
                        Err(error) => {
                            tracing::warn!(owner_id, %error, "Load failed");
                            Some(TodoAction::LoadFailed)
                        },
                    }
                }]
            },

            TodoAction::TitleChanged(title) => {
                state.title_draft = title;
                SmallVec::new()
            },

            TodoAction::Submit => {
                // The placeholder's presence is the sole gate: no queueing
                // of concurrent creates.
                if state.is_submitting() {
                    return SmallVec::new();
                }

                let title = state.title_draft.trim().to_string();
                if title.is_empty() {
                    return smallvec![Self::raise(state, env, messages::EMPTY_TITLE)];
                }

                state.placeholder = Some(Todo::unsaved(env.owner_id, title.clone()));

                let api = Arc::clone(&env.api);
                let owner_id = env.owner_id;

                smallvec![async_effect! {
                    let new_todo = NewTodo {
                        owner_id,
                        title,
                        completed: false,
                    };
                    match api.create(new_todo).await {
                        Ok(todo) => Some(TodoAction::Created { todo }),
                        Err(error) => {
                            tracing::warn!(owner_id, %error, "Create failed");
                            Some(TodoAction::CreateFailed)
                        },
                    }
                }]
            },

            TodoAction::Delete { id } => {
                state.deleting.insert(id);
                smallvec![Self::delete_effect(env, id)]
            },

            TodoAction::ClearCompleted => {
                // Snapshot: ids completed after this point are not included
                let ids: Vec<i64> = state
                    .todos
                    .iter()
                    .filter(|t| t.completed)
                    .map(|t| t.id)
                    .collect();

                if ids.is_empty() {
                    return SmallVec::new();
                }

                state.deleting.extend(ids.iter().copied());

                // One delete per id, concurrently; each settles on its own
                // so a single failure neither blocks confirmed deletions
                // nor strands ids in the pending-delete set.
                let deletes = ids.iter().map(|&id| Self::delete_effect(env, id)).collect();
                smallvec![Effect::merge(deletes)]
            },

            TodoAction::SetFilter(filter) => {
                if state.filter != filter {
                    state.filter = filter;
                }
                SmallVec::new()
            },

            TodoAction::DismissNotice => {
                state.notice = None;
                SmallVec::new()
            },

            // ========== Settlements ==========
            TodoAction::Loaded { todos } => {
                state.replace_all(todos);
                SmallVec::new()
            },

            TodoAction::LoadFailed => {
                smallvec![Self::raise(state, env, messages::LOAD_FAILED)]
            },

            TodoAction::Created { todo } => {
                state.append(todo);
                state.placeholder = None;
                state.title_draft.clear();
                SmallVec::new()
            },

            TodoAction::CreateFailed => {
                // The placeholder is always cleared on settlement; a failed
                // create must not leave it stuck.
                state.placeholder = None;
                state.title_draft.clear();
                smallvec![Self::raise(state, env, messages::ADD_FAILED)]
            },

            TodoAction::DeleteSettled { id, outcome } => {
                // Unconditional: no id stays stuck as "deleting"
                state.deleting.remove(&id);

                match outcome {
                    DeleteOutcome::Deleted => {
                        state.remove(id);
                        SmallVec::new()
                    },
                    DeleteOutcome::Failed => {
                        smallvec![Self::raise(state, env, messages::DELETE_FAILED)]
                    },
                }
            },

            TodoAction::NoticeExpired { token } => {
                // Only the notice this timer was scheduled for is cleared;
                // a newer notice keeps its own timer.
                if state.notice.as_ref().is_some_and(|n| n.token == token) {
                    state.notice = None;
                }
                SmallVec::new()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code can use unwrap

    use super::*;
    use reflow_testing::{InMemoryTodoApi, ReducerTest, assertions};

    const OWNER: i64 = 7;

    fn test_env() -> TodoEnvironment {
        TodoEnvironment::new(Arc::new(InMemoryTodoApi::new()), OWNER)
    }

    fn record(id: i64, completed: bool) -> Todo {
        Todo {
            id,
            owner_id: OWNER,
            title: format!("todo {id}"),
            completed,
        }
    }

    fn state_with(todos: Vec<Todo>) -> TodoState {
        let mut state = TodoState::new();
        state.replace_all(todos);
        state
    }

    #[test]
    fn load_returns_a_single_list_effect() {
        ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(TodoState::new())
            .when_action(TodoAction::Load)
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_future_effect(effects);
            })
            .run();
    }

    #[test]
    fn loaded_replaces_the_collection() {
        ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(state_with(vec![record(99, false)]))
            .when_action(TodoAction::Loaded {
                todos: vec![record(1, false), record(2, true)],
            })
            .then_state(|state| {
                let ids: Vec<i64> = state.todos.iter().map(|t| t.id).collect();
                assert_eq!(ids, vec![1, 2]);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn submit_sets_placeholder_and_dispatches_create() {
        let mut state = TodoState::new();
        state.title_draft = "Buy milk".to_string();

        ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(state)
            .when_action(TodoAction::Submit)
            .then_state(|state| {
                let placeholder = state.placeholder.as_ref().unwrap();
                assert_eq!(placeholder.id, Todo::UNPERSISTED_ID);
                assert_eq!(placeholder.owner_id, OWNER);
                assert_eq!(placeholder.title, "Buy milk");
                assert!(!placeholder.completed);
                assert!(state.is_submitting());
            })
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_future_effect(effects);
            })
            .run();
    }

    #[test]
    fn submit_trims_the_title() {
        let mut state = TodoState::new();
        state.title_draft = "  Buy milk  ".to_string();

        ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(state)
            .when_action(TodoAction::Submit)
            .then_state(|state| {
                assert_eq!(state.placeholder.as_ref().unwrap().title, "Buy milk");
            })
            .run();
    }

    #[test]
    fn submit_with_blank_title_raises_validation_notice() {
        let mut state = TodoState::new();
        state.title_draft = "   ".to_string();

        ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(state)
            .when_action(TodoAction::Submit)
            .then_state(|state| {
                assert!(state.placeholder.is_none());
                assert_eq!(state.notice.as_ref().unwrap().message, messages::EMPTY_TITLE);
            })
            .then_effects(|effects| {
                // Only the auto-dismiss timer; nothing reaches the network
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_delay_effect(effects);
            })
            .run();
    }

    #[test]
    fn submit_while_submitting_is_rejected() {
        let mut state = TodoState::new();
        state.placeholder = Some(Todo::unsaved(OWNER, "In flight".to_string()));
        state.title_draft = "Another".to_string();

        ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(state)
            .when_action(TodoAction::Submit)
            .then_state(|state| {
                assert_eq!(state.placeholder.as_ref().unwrap().title, "In flight");
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn created_appends_and_clears_placeholder_and_draft() {
        let mut state = TodoState::new();
        state.placeholder = Some(Todo::unsaved(OWNER, "Buy milk".to_string()));
        state.title_draft = "Buy milk".to_string();

        ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(state)
            .when_action(TodoAction::Created {
                todo: record(42, false),
            })
            .then_state(|state| {
                assert_eq!(state.todos.len(), 1);
                assert_eq!(state.todos[0].id, 42);
                assert!(state.placeholder.is_none());
                assert!(state.title_draft.is_empty());
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn create_failed_clears_placeholder_and_raises() {
        let mut state = TodoState::new();
        state.placeholder = Some(Todo::unsaved(OWNER, "Buy milk".to_string()));
        state.title_draft = "Buy milk".to_string();

        ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(state)
            .when_action(TodoAction::CreateFailed)
            .then_state(|state| {
                assert!(state.todos.is_empty());
                assert!(state.placeholder.is_none());
                assert!(state.title_draft.is_empty());
                assert_eq!(state.notice.as_ref().unwrap().message, messages::ADD_FAILED);
            })
            .then_effects(|effects| {
                assertions::assert_has_delay_effect(effects);
            })
            .run();
    }

    #[test]
    fn delete_marks_id_as_pending() {
        ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(state_with(vec![record(1, false)]))
            .when_action(TodoAction::Delete { id: 1 })
            .then_state(|state| {
                assert!(state.is_deleting(1));
                // Optimistic marker only; the record stays until confirmation
                assert_eq!(state.todos.len(), 1);
            })
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_future_effect(effects);
            })
            .run();
    }

    #[test]
    fn delete_settled_success_removes_record_and_marker() {
        let mut state = state_with(vec![record(1, false), record(2, true)]);
        state.deleting.insert(2);

        ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(state)
            .when_action(TodoAction::DeleteSettled {
                id: 2,
                outcome: DeleteOutcome::Deleted,
            })
            .then_state(|state| {
                let ids: Vec<i64> = state.todos.iter().map(|t| t.id).collect();
                assert_eq!(ids, vec![1]);
                assert!(!state.is_deleting(2));
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn delete_settled_failure_keeps_record_clears_marker_and_raises() {
        let mut state = state_with(vec![record(1, false)]);
        state.deleting.insert(1);

        ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(state)
            .when_action(TodoAction::DeleteSettled {
                id: 1,
                outcome: DeleteOutcome::Failed,
            })
            .then_state(|state| {
                assert_eq!(state.todos.len(), 1);
                assert!(!state.is_deleting(1));
                assert_eq!(
                    state.notice.as_ref().unwrap().message,
                    messages::DELETE_FAILED
                );
            })
            .then_effects(|effects| {
                assertions::assert_has_delay_effect(effects);
            })
            .run();
    }

    #[test]
    fn clear_completed_snapshots_completed_ids() {
        ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(state_with(vec![
                record(1, false),
                record(2, true),
                record(3, true),
            ]))
            .when_action(TodoAction::ClearCompleted)
            .then_state(|state| {
                assert!(state.is_deleting(2));
                assert!(state.is_deleting(3));
                assert!(!state.is_deleting(1));
                // Records stay until each delete is confirmed
                assert_eq!(state.todos.len(), 3);
            })
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assert!(
                    matches!(&effects[0], Effect::Parallel(inner) if inner.len() == 2),
                    "expected one parallel batch of two deletes"
                );
            })
            .run();
    }

    #[test]
    fn clear_completed_with_nothing_completed_is_a_noop() {
        ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(state_with(vec![record(1, false)]))
            .when_action(TodoAction::ClearCompleted)
            .then_state(|state| {
                assert!(state.deleting.is_empty());
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn set_filter_switches_and_repeat_is_noop() {
        let (state, effects) = ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(TodoState::new())
            .when_action(TodoAction::SetFilter(Filter::Active))
            .then_state(|state| {
                assert_eq!(state.filter, Filter::Active);
            })
            .run_returning();
        assert!(effects.is_empty());

        ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(state)
            .when_action(TodoAction::SetFilter(Filter::Active))
            .then_state(|state| {
                assert_eq!(state.filter, Filter::Active);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn dismiss_clears_the_notice_immediately() {
        let mut state = TodoState::new();
        let token = state.next_notice_token();
        state.notice = Some(Notice {
            message: messages::LOAD_FAILED.to_string(),
            token,
        });

        ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(state)
            .when_action(TodoAction::DismissNotice)
            .then_state(|state| {
                assert!(state.notice.is_none());
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn stale_timer_does_not_clear_a_newer_notice() {
        // First failure raises notice A
        let (state, _) = ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(TodoState::new())
            .when_action(TodoAction::LoadFailed)
            .run_returning();
        let token_a = state.notice.as_ref().unwrap().token;

        // Second failure replaces it with notice B
        let (state, _) = ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(state)
            .when_action(TodoAction::DeleteSettled {
                id: 1,
                outcome: DeleteOutcome::Failed,
            })
            .run_returning();
        let token_b = state.notice.as_ref().unwrap().token;
        assert_ne!(token_a, token_b);

        // A's timer fires late: B must survive
        let (state, _) = ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(state)
            .when_action(TodoAction::NoticeExpired { token: token_a })
            .run_returning();
        assert_eq!(
            state.notice.as_ref().unwrap().message,
            messages::DELETE_FAILED
        );

        // B's own timer clears it
        let (state, _) = ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(state)
            .when_action(TodoAction::NoticeExpired { token: token_b })
            .run_returning();
        assert!(state.notice.is_none());
    }

    #[test]
    fn notice_expiry_on_empty_state_is_a_noop() {
        ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(TodoState::new())
            .when_action(TodoAction::NoticeExpired { token: 1 })
            .then_state(|state| {
                assert!(state.notice.is_none());
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }
}
