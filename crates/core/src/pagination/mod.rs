//! Page-number pagination for list endpoints.
//!
//! Pure functions only: the handler resolves a [`PageWindow`] from the query
//! string and the total row count, asks storage for `offset`/`limit` rows, and
//! wraps them in a [`Page`] whose links are built by [`PageLinks`].

mod error;
mod links;
mod types;

pub use error::PaginationError;
pub use links::PageLinks;
pub use types::{Page, PageNumber, PageWindow, PaginationConfig, PaginationMeta};
