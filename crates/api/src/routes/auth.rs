use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Public authentication routes.
///
/// ```text
/// POST /auth/register  -> register
/// POST /auth/login     -> login
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
}
