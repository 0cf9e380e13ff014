//! SQLite storage backend implementation.
//!
//! Implements the repository traits using `rusqlite` for synchronous
//! operations and `tokio-rusqlite` for async wrapping. Every write runs in
//! a single transaction.

mod conversions;
mod error;
mod repository;
mod schema;

pub use repository::SqliteRepository;
