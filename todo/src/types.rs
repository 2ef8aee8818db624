//! Domain types for the todo feature.
//!
//! The model is an ordered collection of task records plus the transient
//! markers the view needs: the creation placeholder, the pending-delete
//! set, the active filter, and the current notice.

use reflow_api::Todo;
use std::collections::HashSet;

/// Which subset of the collection the view shows
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Filter {
    /// Every record
    #[default]
    All,
    /// Records not yet completed
    Active,
    /// Completed records
    Completed,
}

impl Filter {
    /// All filter options, in display order
    pub const OPTIONS: [Self; 3] = [Self::All, Self::Active, Self::Completed];

    /// Whether a record is visible under this filter
    #[must_use]
    pub const fn admits(self, todo: &Todo) -> bool {
        match self {
            Self::All => true,
            Self::Active => !todo.completed,
            Self::Completed => todo.completed,
        }
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "All"),
            Self::Active => write!(f, "Active"),
            Self::Completed => write!(f, "Completed"),
        }
    }
}

/// A transient user-facing error message
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    /// Human-readable message
    pub message: String,
    /// Generation token; a scheduled auto-dismiss only clears the notice
    /// whose token it carries
    pub token: u64,
}

/// State of the todo feature
///
/// The store is the single writer; the view reads snapshots through the
/// derived queries below, which are recomputed on every read.
#[derive(Clone, Debug, Default)]
pub struct TodoState {
    /// Persisted records, in display order
    pub todos: Vec<Todo>,
    /// Draft of the next todo title
    pub title_draft: String,
    /// In-flight creation placeholder (at most one)
    pub placeholder: Option<Todo>,
    /// Ids currently undergoing server-side deletion
    pub deleting: HashSet<i64>,
    /// Active view filter
    pub filter: Filter,
    /// Current transient error message
    pub notice: Option<Notice>,
    /// Notice tokens handed out so far
    pub(crate) notice_generation: u64,
}

impl TodoState {
    /// Creates a new empty state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Model operations ==========
    //
    // No business-rule validation here; that is the reducer's job.

    /// Replace the whole collection (initial load)
    pub fn replace_all(&mut self, records: Vec<Todo>) {
        self.todos = records;
    }

    /// Append a record at the end of the display order
    pub fn append(&mut self, record: Todo) {
        self.todos.push(record);
    }

    /// Remove the record with the given id, if present
    pub fn remove(&mut self, id: i64) {
        self.todos.retain(|t| t.id != id);
    }

    /// Remove exactly the given ids that exist in the collection
    ///
    /// Duplicate or missing ids in the input are tolerated; every other
    /// record is left untouched.
    pub fn remove_many(&mut self, ids: &[i64]) {
        let ids: HashSet<i64> = ids.iter().copied().collect();
        self.todos.retain(|t| !ids.contains(&t.id));
    }

    // ========== Derived queries ==========

    /// Records visible under the active filter, in display order
    #[must_use]
    pub fn visible_todos(&self) -> Vec<&Todo> {
        self.todos.iter().filter(|t| self.filter.admits(t)).collect()
    }

    /// Number of records not yet completed
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.todos.iter().filter(|t| !t.completed).count()
    }

    /// Whether any record is completed (gates the Clear-completed control)
    #[must_use]
    pub fn has_completed(&self) -> bool {
        self.todos.iter().any(|t| t.completed)
    }

    /// Whether a creation is in flight (gates new submissions)
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.placeholder.is_some()
    }

    /// Whether the record with the given id is undergoing deletion
    #[must_use]
    pub fn is_deleting(&self, id: i64) -> bool {
        self.deleting.contains(&id)
    }

    /// Next notice token; each raised notice gets its own
    pub(crate) const fn next_notice_token(&mut self) -> u64 {
        self.notice_generation += 1;
        self.notice_generation
    }
}
