//! Games API server library.
//!
//! Exposes the building blocks (config, state, error handling, auth,
//! middleware, handlers, routes) so integration tests and the binary
//! entrypoint share the exact same application.

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod links;
pub mod middleware;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
