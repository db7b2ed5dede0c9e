//! Absolute hyperlinks for resource representations.
//!
//! Links are rooted at the scheme and host the client used to reach the
//! server (`X-Forwarded-Proto` + `Host`), falling back to the configured
//! `PUBLIC_URL` when the request carries no `Host` header.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{header, HeaderMap, Uri};
use gamesapi_core::types::DbId;
use url::Url;

use crate::state::AppState;

/// Collection path segments, shared by routes and link building.
pub const GAME_CATEGORIES: &str = "game-categories";
pub const GAMES: &str = "games";
pub const PLAYERS: &str = "players";
pub const PLAYER_SCORES: &str = "player-scores";
pub const USERS: &str = "users";

/// Request-scoped link builder.
#[derive(Debug, Clone)]
pub struct Links {
    base: String,
    uri: Uri,
}

impl Links {
    pub fn new(base: &str, uri: Uri) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
            uri,
        }
    }

    /// `<base>/<collection>/`
    pub fn collection(&self, collection: &str) -> String {
        format!("{}/{collection}/", self.base)
    }

    /// `<base>/<collection>/<id>/`
    pub fn detail(&self, collection: &str, id: DbId) -> String {
        format!("{}/{collection}/{id}/", self.base)
    }

    /// Absolute URL of the current request, query string included.
    pub fn current(&self) -> Option<Url> {
        let path_and_query = self
            .uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");
        Url::parse(&format!("{}{path_and_query}", self.base)).ok()
    }
}

impl FromRequestParts<AppState> for Links {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let base = base_from_headers(&parts.headers, &state.config.public_url);
        Ok(Links::new(&base, parts.uri.clone()))
    }
}

/// Resolve `<scheme>://<host>` from request headers, or `fallback`.
pub fn base_from_headers(headers: &HeaderMap, fallback: &str) -> String {
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|h| !h.is_empty());

    let Some(host) = host else {
        return fallback.trim_end_matches('/').to_string();
    };

    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|p| *p == "http" || *p == "https")
        .unwrap_or("http");

    format!("{scheme}://{host}")
}
