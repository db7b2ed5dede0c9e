pub mod auth;
pub mod game;
pub mod game_category;
pub mod health;
pub mod player;
pub mod player_score;
pub mod root;
pub mod user;

use axum::middleware::from_fn_with_state;
use axum::Router;

use crate::middleware::throttle;
use crate::state::AppState;

/// Build the resource route tree.
///
/// Route hierarchy:
///
/// ```text
/// /                                    API root (not throttled)
///
/// /auth/register                       register (not throttled)
/// /auth/login                          login (not throttled)
///
/// /game-categories/                    list, create    ("game-categories" scope)
/// /game-categories/{id}/               get, put, patch, delete
///
/// /games/                              list, create (auth)     (default scopes)
/// /games/{id}/                         get, put, patch, delete (owner)
/// /players/                            list, create
/// /players/{id}/                       get, put, patch, delete
/// /player-scores/                      list, create
/// /player-scores/{id}/                 get, put, patch, delete
/// /users/                              list
/// /users/{id}/                         get
/// ```
pub fn api_routes(state: &AppState) -> Router<AppState> {
    let categories = game_category::router().route_layer(from_fn_with_state(
        state.clone(),
        throttle::game_categories_scope,
    ));

    let resources = Router::new()
        .merge(game::router())
        .merge(player::router())
        .merge(player_score::router())
        .merge(user::router())
        .route_layer(from_fn_with_state(state.clone(), throttle::default_scope));

    Router::new()
        .merge(root::router())
        .merge(auth::router())
        .merge(categories)
        .merge(resources)
}
