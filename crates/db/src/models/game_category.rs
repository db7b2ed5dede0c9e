//! Game category entity model and DTOs.

use gamesapi_core::query_value::blank_as_none;
use gamesapi_core::types::{DbId, Timestamp};
use serde::Deserialize;
use sqlx::FromRow;

/// A row from the `game_categories` table.
#[derive(Debug, Clone, FromRow)]
pub struct GameCategory {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new category.
#[derive(Debug, Clone)]
pub struct CreateGameCategory {
    pub name: String,
}

/// DTO for updating a category. All fields are optional.
#[derive(Debug, Clone, Default)]
pub struct UpdateGameCategory {
    pub name: Option<String>,
}

/// Query-string filters for listing categories.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GameCategoryFilter {
    /// Exact name match.
    #[serde(deserialize_with = "blank_as_none")]
    pub name: Option<String>,
    /// Case-insensitive name prefix.
    #[serde(deserialize_with = "blank_as_none")]
    pub search: Option<String>,
    /// Comma-separated sort keys; only `name` is accepted.
    #[serde(deserialize_with = "blank_as_none")]
    pub ordering: Option<String>,
}
