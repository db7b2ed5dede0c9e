use axum::routing::get;
use axum::Router;

use crate::handlers::player;
use crate::state::AppState;

/// ```text
/// GET    /players/       -> list_players
/// POST   /players/       -> create_player
/// GET    /players/{id}/  -> get_player
/// PUT    /players/{id}/  -> update_player
/// PATCH  /players/{id}/  -> patch_player
/// DELETE /players/{id}/  -> delete_player
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/players/",
            get(player::list_players).post(player::create_player),
        )
        .route(
            "/players/{id}/",
            get(player::get_player)
                .put(player::update_player)
                .patch(player::patch_player)
                .delete(player::delete_player),
        )
}
