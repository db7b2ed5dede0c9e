use axum::routing::get;
use axum::Router;

use crate::handlers::player_score;
use crate::state::AppState;

/// ```text
/// GET    /player-scores/       -> list_player_scores
/// POST   /player-scores/       -> create_player_score
/// GET    /player-scores/{id}/  -> get_player_score
/// PUT    /player-scores/{id}/  -> update_player_score
/// PATCH  /player-scores/{id}/  -> patch_player_score
/// DELETE /player-scores/{id}/  -> delete_player_score
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/player-scores/",
            get(player_score::list_player_scores).post(player_score::create_player_score),
        )
        .route(
            "/player-scores/{id}/",
            get(player_score::get_player_score)
                .put(player_score::update_player_score)
                .patch(player_score::patch_player_score)
                .delete(player_score::delete_player_score),
        )
}
