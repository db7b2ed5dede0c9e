//! Game entity model and DTOs.

use chrono::NaiveDate;
use gamesapi_core::query_value::blank_as_none;
use gamesapi_core::types::{DbId, Timestamp};
use serde::Deserialize;
use sqlx::FromRow;

/// A `games` row joined with its owner's username and category name.
#[derive(Debug, Clone, FromRow)]
pub struct Game {
    pub id: DbId,
    pub name: String,
    pub release_date: NaiveDate,
    pub played: bool,
    pub owner_id: Option<DbId>,
    pub owner_username: Option<String>,
    pub game_category_id: DbId,
    pub game_category_name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Id and name of a game, plus the keys used to group it under a
/// category or an owner.
#[derive(Debug, Clone, FromRow)]
pub struct GameSummary {
    pub id: DbId,
    pub name: String,
    pub owner_id: Option<DbId>,
    pub game_category_id: DbId,
}

/// DTO for creating a new game.
#[derive(Debug, Clone)]
pub struct CreateGame {
    pub name: String,
    pub release_date: NaiveDate,
    pub played: bool,
    pub owner_id: Option<DbId>,
    pub game_category_id: DbId,
}

/// DTO for updating a game. The owner is not updatable.
#[derive(Debug, Clone, Default)]
pub struct UpdateGame {
    pub name: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub played: Option<bool>,
    pub game_category_id: Option<DbId>,
}

/// Query-string filters for listing games.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GameFilter {
    /// Owner user id.
    #[serde(deserialize_with = "blank_as_none")]
    pub owner: Option<DbId>,
    /// Category id.
    #[serde(deserialize_with = "blank_as_none")]
    pub game_category: Option<DbId>,
    #[serde(deserialize_with = "blank_as_none")]
    pub name: Option<String>,
    #[serde(deserialize_with = "blank_as_none")]
    pub release_date: Option<NaiveDate>,
    #[serde(deserialize_with = "blank_as_none")]
    pub played: Option<bool>,
    /// Case-insensitive name prefix.
    #[serde(deserialize_with = "blank_as_none")]
    pub search: Option<String>,
    /// Comma-separated sort keys from `name`, `release_date`.
    #[serde(deserialize_with = "blank_as_none")]
    pub ordering: Option<String>,
}
