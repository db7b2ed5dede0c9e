use axum::routing::get;
use axum::Router;

use crate::handlers::root;
use crate::state::AppState;

/// ```text
/// GET /  -> api_root
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(root::api_root))
}
