//! Storage backend implementations.
//!
//! Concrete implementations of the repository traits defined in
//! `contactbook_core::storage`, selected at compile time via feature flags.
//!
//! # Feature Flags
//!
//! - `inmemory` (default): process-local tables, lost on restart
//! - `sqlite`: SQLite storage backend using `rusqlite` and `tokio-rusqlite`
//!
//! These features are mutually exclusive. The in-memory backend is always
//! compiled for tests.
//!
//! # Examples
//!
//! Build with SQLite:
//! ```bash
//! cargo build -p contactbook --no-default-features --features sqlite
//! ```

#[cfg(all(feature = "sqlite", feature = "inmemory"))]
compile_error!(
    "Features 'sqlite' and 'inmemory' are mutually exclusive. \
    Enable only one storage backend at a time."
);

#[cfg(not(any(feature = "sqlite", feature = "inmemory")))]
compile_error!(
    "No storage backend selected. Enable 'inmemory' or 'sqlite' feature. \
    Example: cargo build -p contactbook --no-default-features --features sqlite"
);

#[cfg(any(feature = "inmemory", test))]
pub mod inmemory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(any(feature = "inmemory", test))]
pub use inmemory::InMemoryRepository;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteRepository;
