//! Todo store trait and `SQLite` implementation.

use crate::error::Result;
use crate::model::{DateOrder, Todo};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};

/// Trait for todo storage operations.
///
/// All methods return a `Result` and may fail with database errors.
#[allow(clippy::missing_errors_doc)]
pub trait TodoStore {
    /// Insert a new todo with `completed = false`, returning its assigned id.
    fn insert(&self, task: &str, priority: i64, due_date: NaiveDate) -> Result<i64>;

    /// Set the `completed` flag for the todo with the given id.
    ///
    /// Succeeds silently when no row matches `id`; callers relying on the
    /// original wire behavior expect no "not found" distinction here.
    fn set_completed(&self, id: i64, completed: bool) -> Result<()>;

    /// List every todo, ordered by due date in the given direction, then by
    /// priority ascending, then by completion state ascending.
    fn list_all(&self, order: DateOrder) -> Result<Vec<Todo>>;
}

/// SQLite-based todo store.
#[derive(Debug, Clone)]
pub struct SqliteTodoStore {
    db_path: PathBuf,
}

impl SqliteTodoStore {
    /// Create a new `SQLite` todo store at the given database path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_path: impl AsRef<Path>) -> Result<Self> {
        let store = Self { db_path: db_path.as_ref().to_path_buf() };
        store.init_schema()?;
        Ok(store)
    }

    /// Get the database path.
    #[must_use]
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Open a connection to the database.
    fn open(&self) -> Result<Connection> {
        if let Some(parent) = self.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(&self.db_path)?;
        conn.execute_batch("PRAGMA journal_mode = WAL;")?;
        Ok(conn)
    }

    /// Initialize the database schema. Idempotent; runs on every construction.
    fn init_schema(&self) -> Result<()> {
        let conn = self.open()?;

        conn.execute_batch(
            r"
            CREATE TABLE IF NOT EXISTS todos (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                task TEXT NOT NULL,
                priority INTEGER NOT NULL DEFAULT 0,
                due_date TEXT NOT NULL,
                completed INTEGER NOT NULL DEFAULT 0
            );

            CREATE INDEX IF NOT EXISTS idx_todos_due_date ON todos(due_date);
            ",
        )?;

        Ok(())
    }

    /// Parse a todo from a row.
    fn parse_todo(row: &rusqlite::Row) -> rusqlite::Result<Todo> {
        let raw_date: String = row.get(3)?;
        let due_date = parse_stored_date(&raw_date).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                3,
                rusqlite::types::Type::Text,
                format!("unparseable due_date: {raw_date:?}").into(),
            )
        })?;

        Ok(Todo {
            id: row.get(0)?,
            task: row.get(1)?,
            priority: row.get(2)?,
            due_date,
            completed: row.get(4)?,
        })
    }
}

/// Parse a stored `due_date` cell, truncating any time-of-day component.
///
/// New rows are written as bare `YYYY-MM-DD`, but rows written by earlier
/// versions of this program carry a full datetime; both must read back as
/// the same calendar day.
fn parse_stored_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f%:z"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(datetime.date());
        }
    }
    None
}

impl TodoStore for SqliteTodoStore {
    fn insert(&self, task: &str, priority: i64, due_date: NaiveDate) -> Result<i64> {
        let conn = self.open()?;
        conn.execute(
            "INSERT INTO todos (task, priority, due_date) VALUES (?1, ?2, ?3)",
            params![task, priority, due_date.format("%Y-%m-%d").to_string()],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn set_completed(&self, id: i64, completed: bool) -> Result<()> {
        let conn = self.open()?;
        // No rows-affected check: updating a missing id is not an error.
        conn.execute("UPDATE todos SET completed = ?1 WHERE id = ?2", params![completed, id])?;
        Ok(())
    }

    fn list_all(&self, order: DateOrder) -> Result<Vec<Todo>> {
        let conn = self.open()?;
        let sql = format!(
            "SELECT id, task, priority, due_date, completed FROM todos
             ORDER BY due_date {}, priority ASC, completed ASC",
            order.sql_keyword()
        );
        let mut stmt = conn.prepare(&sql)?;
        let todos = stmt.query_map([], Self::parse_todo)?.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(todos)
    }
}
