//! Functional core for contactbook.
//!
//! Pure data types, validation, response mapping, pagination math and the
//! repository contracts that the server's storage backends implement.

pub mod contact;
pub mod pagination;
pub mod serde;
pub mod storage;
