//! Request handlers.
//!
//! Each submodule provides async handler functions (list, create, get,
//! update, patch, delete) for a single resource. Handlers delegate to the
//! corresponding repository in `gamesapi_db` and map errors via
//! [`AppError`](crate::error::AppError).

pub mod auth;
pub mod game;
pub mod game_category;
pub mod player;
pub mod player_score;
pub mod root;
pub mod user;

use gamesapi_core::validation::FieldErrors;
use validator::Validate;

/// Message for a slug field naming a row that does not exist.
pub(crate) fn slug_missing(name: &str) -> String {
    format!("Object with name={name} does not exist.")
}

/// Trim surrounding whitespace from an optional text field.
pub(crate) fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string())
}

/// Run the payload's declarative rules, collecting failures per field.
pub(crate) fn field_errors<T: Validate>(payload: &T) -> FieldErrors {
    match payload.validate() {
        Ok(()) => FieldErrors::new(),
        Err(errors) => errors.into(),
    }
}
