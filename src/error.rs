//! Error types for `daylist`.

/// Errors that can occur while serving the to-do list.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A `SQLite` database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The configuration file could not be parsed.
    #[error("Config error: {0}")]
    Config(#[from] serde_yaml::Error),

    /// A template failed to load or render.
    #[error("Template error: {0}")]
    Template(String),

    /// A form field could not be parsed.
    #[error("invalid {field}: {value:?}")]
    InvalidInput {
        /// The form field that failed to parse.
        field: &'static str,
        /// The raw value that was submitted.
        value: String,
    },
}

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
