//! Domain rules shared by the database and HTTP layers.
//!
//! Everything here is pure: no I/O, no async, no database types. The `db`
//! and `api` crates build on these modules.

pub mod error;
pub mod gender;
pub mod ordering;
pub mod pagination;
pub mod permissions;
pub mod query_value;
pub mod search;
pub mod throttle;
pub mod types;
pub mod validation;
