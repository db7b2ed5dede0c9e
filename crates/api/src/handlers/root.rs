//! Handler for the API root.

use axum::Json;
use serde_json::{json, Value};

use crate::links::{Links, GAMES, GAME_CATEGORIES, PLAYERS, PLAYER_SCORES, USERS};

/// GET /
///
/// Map each resource name to its collection URL.
pub async fn api_root(links: Links) -> Json<Value> {
    Json(json!({
        "players": links.collection(PLAYERS),
        "game-categories": links.collection(GAME_CATEGORIES),
        "games": links.collection(GAMES),
        "scores": links.collection(PLAYER_SCORES),
        "users": links.collection(USERS),
    }))
}
