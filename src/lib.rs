//! # `daylist`
//!
//! A small server-rendered to-do list. Tasks live in a single `SQLite`
//! table, are grouped by calendar due date, and are served as HTML over
//! four routes, with a TTL cache in front of the grouped view.

pub mod cache;
pub mod config;
pub mod error;
pub mod group;
pub mod model;
pub mod server;
pub mod store;
pub mod templates;

pub use error::{Error, Result};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
