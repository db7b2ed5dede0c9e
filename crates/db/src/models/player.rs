//! Player entity model and DTOs.

use gamesapi_core::query_value::blank_as_none;
use gamesapi_core::types::{DbId, Timestamp};
use serde::Deserialize;
use sqlx::FromRow;

/// A row from the `players` table. `gender` holds a one-letter code.
#[derive(Debug, Clone, FromRow)]
pub struct Player {
    pub id: DbId,
    pub name: String,
    pub gender: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new player.
#[derive(Debug, Clone)]
pub struct CreatePlayer {
    pub name: String,
    pub gender: String,
}

/// DTO for updating a player. All fields are optional.
#[derive(Debug, Clone, Default)]
pub struct UpdatePlayer {
    pub name: Option<String>,
    pub gender: Option<String>,
}

/// Query-string filters for listing players.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlayerFilter {
    #[serde(deserialize_with = "blank_as_none")]
    pub name: Option<String>,
    #[serde(deserialize_with = "blank_as_none")]
    pub gender: Option<String>,
    /// Case-insensitive name prefix.
    #[serde(deserialize_with = "blank_as_none")]
    pub search: Option<String>,
    /// Comma-separated sort keys; only `name` is accepted.
    #[serde(deserialize_with = "blank_as_none")]
    pub ordering: Option<String>,
}
