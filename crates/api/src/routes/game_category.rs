use axum::routing::get;
use axum::Router;

use crate::handlers::game_category;
use crate::state::AppState;

/// ```text
/// GET    /game-categories/       -> list_game_categories
/// POST   /game-categories/       -> create_game_category
/// GET    /game-categories/{id}/  -> get_game_category
/// PUT    /game-categories/{id}/  -> update_game_category
/// PATCH  /game-categories/{id}/  -> patch_game_category
/// DELETE /game-categories/{id}/  -> delete_game_category
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/game-categories/",
            get(game_category::list_game_categories).post(game_category::create_game_category),
        )
        .route(
            "/game-categories/{id}/",
            get(game_category::get_game_category)
                .put(game_category::update_game_category)
                .patch(game_category::patch_game_category)
                .delete(game_category::delete_game_category),
        )
}
