use axum::routing::get;
use axum::Router;

use crate::handlers::game;
use crate::state::AppState;

/// Writes need a bearer token; detail writes are reserved to the owner.
///
/// ```text
/// GET    /games/       -> list_games
/// POST   /games/       -> create_game
/// GET    /games/{id}/  -> get_game
/// PUT    /games/{id}/  -> update_game
/// PATCH  /games/{id}/  -> patch_game
/// DELETE /games/{id}/  -> delete_game
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/games/",
            get(game::list_games).post(game::create_game),
        )
        .route(
            "/games/{id}/",
            get(game::get_game)
                .put(game::update_game)
                .patch(game::patch_game)
                .delete(game::delete_game),
        )
}
