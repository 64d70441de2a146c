//! Domain primitives shared by the database and API crates.
//!
//! Nothing in this crate performs I/O.

pub mod error;
pub mod pagination;
pub mod roles;
pub mod types;
pub mod validation;
