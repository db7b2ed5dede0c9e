//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row (joined with the
//!   names of related rows where the API needs them)
//! - A create DTO for inserts
//! - An update DTO (all `Option` fields) for partial updates
//! - A `Deserialize` filter struct read straight from the query string

pub mod game;
pub mod game_category;
pub mod player;
pub mod player_score;
pub mod user;
