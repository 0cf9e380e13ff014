//! In-memory storage backend.
//!
//! Keeps users, emails, phone numbers and the two association tables in a
//! single struct behind `Arc<RwLock<_>>`, so every repository call sees and
//! writes a consistent snapshot. Data is lost when the process exits.
//!
//! # Example
//!
//! ```rust,ignore
//! use contactbook::storage::inmemory::InMemoryRepository;
//!
//! let repo = InMemoryRepository::new();
//! // Use repo for testing...
//! ```

mod repository;

pub use repository::InMemoryRepository;
