//! Core data types for the to-do list.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single to-do item, as stored in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Unique identifier, assigned by the store on insert.
    pub id: i64,
    /// Free-text description of the task.
    pub task: String,
    /// Numeric priority. The store orders ascending, so lower values sort
    /// first within a day.
    pub priority: i64,
    /// Calendar due date. Any time-of-day component in stored data is
    /// truncated on read, so two todos due the same day always compare equal
    /// here.
    pub due_date: NaiveDate,
    /// Whether the task has been marked done.
    pub completed: bool,
}

/// An ephemeral view: all todos sharing one calendar due date.
///
/// Rebuilt on every aggregation pass, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodoGroup {
    /// The shared due date.
    pub date: NaiveDate,
    /// Todos due on that date, in store order.
    pub todos: Vec<Todo>,
}

/// Direction for date ordering, applied both to the store's `ORDER BY` and
/// to the sequence of groups on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateOrder {
    /// Oldest due date first.
    Asc,
    /// Newest due date first (default).
    #[default]
    Desc,
}

impl DateOrder {
    /// The SQL direction keyword for this ordering.
    #[must_use]
    pub const fn sql_keyword(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl std::fmt::Display for DateOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}
