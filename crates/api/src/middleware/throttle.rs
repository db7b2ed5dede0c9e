//! Sliding-window request throttling.
//!
//! Each `(scope, client)` pair keeps the instants of its recent requests.
//! A request is refused once the window already holds the scope's quota.

use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use gamesapi_core::throttle::{
    check_history, retry_after_secs, ThrottleRate, SCOPE_ANON, SCOPE_GAME_CATEGORIES, SCOPE_USER,
};
use crate::error::AppError;
use crate::middleware::auth::user_from_headers;
use crate::state::AppState;

/// Histories are swept for stale keys once the map grows past this.
const SWEEP_THRESHOLD: usize = 10_000;

struct History {
    period: Duration,
    hits: VecDeque<Instant>,
}

/// In-process throttle histories shared by every request.
#[derive(Default)]
pub struct Throttle {
    histories: Mutex<HashMap<String, History>>,
}

impl Throttle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a hit for `key`, or return how long until one is allowed.
    pub fn allow(
        &self,
        key: &str,
        rate: &ThrottleRate,
        now: Instant,
    ) -> Result<(), Duration> {
        // A panic mid-update leaves at worst one stale history.
        let mut histories = self
            .histories
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if histories.len() >= SWEEP_THRESHOLD && !histories.contains_key(key) {
            histories.retain(|_, h| {
                h.hits
                    .back()
                    .is_some_and(|last| now.saturating_duration_since(*last) < h.period)
            });
        }

        let history = histories.entry(key.to_string()).or_insert_with(|| History {
            period: rate.period,
            hits: VecDeque::new(),
        });
        history.period = rate.period;
        check_history(&mut history.hits, rate, now)
    }
}

/// Throttle under the `game-categories` scope only.
pub async fn game_categories_scope(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let ident = request_identity(&state, &req);
    throttle(&state, SCOPE_GAME_CATEGORIES, &ident.key, req, next).await
}

/// Throttle under the default `user` or `anon` scope.
pub async fn default_scope(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let ident = request_identity(&state, &req);
    let scope = if ident.authenticated {
        SCOPE_USER
    } else {
        SCOPE_ANON
    };
    throttle(&state, scope, &ident.key, req, next).await
}

async fn throttle(
    state: &AppState,
    scope: &str,
    ident: &str,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if let Some(rate) = state.config.throttle.rate_for_scope(scope) {
        let key = format!("throttle_{scope}_{ident}");
        if let Err(wait) = state.throttle.allow(&key, &rate, Instant::now()) {
            let retry_after_secs = retry_after_secs(wait);
            tracing::warn!(scope, ident, retry_after_secs, "Request throttled");
            return Err(AppError::Throttled { retry_after_secs });
        }
    }
    Ok(next.run(req).await)
}

struct Identity {
    key: String,
    authenticated: bool,
}

/// User id for authenticated requests, otherwise the client address.
fn request_identity(state: &AppState, req: &Request) -> Identity {
    if let Ok(Some(user)) = user_from_headers(req.headers(), &state.config.jwt) {
        return Identity {
            key: user.user_id.to_string(),
            authenticated: true,
        };
    }

    let forwarded = req
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string);

    let key = forwarded
        .or_else(|| {
            req.extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.ip().to_string())
        })
        .unwrap_or_else(|| "anonymous".to_string());

    Identity {
        key,
        authenticated: false,
    }
}
