//! Wire types for the todos collection API.

use serde::{Deserialize, Serialize};

/// A single task record as stored by the remote collection
///
/// Serialized camelCase on the wire (`ownerId`). The id is assigned by the
/// server; id `0` is reserved for records not yet persisted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Server-assigned identifier (0 = not yet persisted)
    pub id: i64,
    /// Identifier of the owning user
    pub owner_id: i64,
    /// Title of the task
    pub title: String,
    /// Whether the task is completed
    pub completed: bool,
}

impl Todo {
    /// Id value reserved for records not yet persisted by the server
    pub const UNPERSISTED_ID: i64 = 0;

    /// Creates a local, not-yet-persisted record (a creation placeholder)
    #[must_use]
    pub const fn unsaved(owner_id: i64, title: String) -> Self {
        Self {
            id: Self::UNPERSISTED_ID,
            owner_id,
            title,
            completed: false,
        }
    }

    /// Whether this record has been persisted by the server
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        self.id != Self::UNPERSISTED_ID
    }
}

/// Payload for creating a task record
///
/// The server assigns the id and echoes the full [`Todo`] back.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTodo {
    /// Identifier of the owning user
    pub owner_id: i64,
    /// Title of the task
    pub title: String,
    /// Initial completion flag
    pub completed: bool,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code can use unwrap

    use super::*;

    #[test]
    fn todo_serializes_camel_case() {
        let todo = Todo {
            id: 42,
            owner_id: 7,
            title: "Buy milk".to_string(),
            completed: false,
        };

        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["ownerId"], 7);
        assert_eq!(json["title"], "Buy milk");
    }

    #[test]
    fn todo_deserializes_camel_case() {
        let json = r#"{"id":42,"ownerId":7,"title":"Buy milk","completed":true}"#;
        let todo: Todo = serde_json::from_str(json).unwrap();

        assert_eq!(todo.id, 42);
        assert_eq!(todo.owner_id, 7);
        assert!(todo.completed);
    }

    #[test]
    fn unsaved_todo_is_not_persisted() {
        let todo = Todo::unsaved(7, "Buy milk".to_string());

        assert_eq!(todo.id, Todo::UNPERSISTED_ID);
        assert!(!todo.is_persisted());
        assert!(!todo.completed);
    }
}
