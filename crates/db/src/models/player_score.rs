//! Player score entity model and DTOs.

use gamesapi_core::query_value::{blank_as_none, date_or_timestamp};
use gamesapi_core::types::{DbId, Timestamp};
use serde::Deserialize;
use sqlx::FromRow;

/// A `player_scores` row joined with the player and game names.
#[derive(Debug, Clone, FromRow)]
pub struct PlayerScore {
    pub id: DbId,
    pub score: i32,
    pub score_date: Timestamp,
    pub player_id: DbId,
    pub player_name: String,
    pub game_id: DbId,
    pub game_name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new score.
#[derive(Debug, Clone)]
pub struct CreatePlayerScore {
    pub score: i32,
    pub score_date: Timestamp,
    pub player_id: DbId,
    pub game_id: DbId,
}

/// DTO for updating a score. All fields are optional.
#[derive(Debug, Clone, Default)]
pub struct UpdatePlayerScore {
    pub score: Option<i32>,
    pub score_date: Option<Timestamp>,
    pub player_id: Option<DbId>,
    pub game_id: Option<DbId>,
}

/// Query-string filters for listing scores. Range bounds are inclusive.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlayerScoreFilter {
    #[serde(deserialize_with = "blank_as_none")]
    pub score: Option<i32>,
    #[serde(deserialize_with = "blank_as_none")]
    pub min_score: Option<i32>,
    #[serde(deserialize_with = "blank_as_none")]
    pub max_score: Option<i32>,
    #[serde(deserialize_with = "date_or_timestamp")]
    pub from_score_date: Option<Timestamp>,
    #[serde(deserialize_with = "date_or_timestamp")]
    pub to_score_date: Option<Timestamp>,
    /// Exact player name.
    #[serde(deserialize_with = "blank_as_none")]
    pub player_name: Option<String>,
    /// Exact game name.
    #[serde(deserialize_with = "blank_as_none")]
    pub game_name: Option<String>,
    /// Comma-separated sort keys from `score`, `score_date`.
    #[serde(deserialize_with = "blank_as_none")]
    pub ordering: Option<String>,
}
