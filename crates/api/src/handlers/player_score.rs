//! Handlers for the `/player-scores` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use gamesapi_core::error::CoreError;
use gamesapi_core::types::{DbId, Timestamp};
use gamesapi_core::validation::FieldErrors;
use gamesapi_db::models::player_score::{
    CreatePlayerScore, PlayerScore, PlayerScoreFilter, UpdatePlayerScore,
};
use gamesapi_db::repositories::{GameRepo, PlayerRepo, PlayerScoreRepo};
use gamesapi_db::DbPool;
use serde::{Deserialize, Serialize};

use super::slug_missing;
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppQuery};
use crate::links::{Links, PLAYER_SCORES};
use crate::query::PaginationParams;
use crate::response::Page;
use crate::state::AppState;

/// A score with its player and game referenced by name.
#[derive(Debug, Serialize)]
pub struct PlayerScoreResponse {
    pub url: String,
    pub pk: DbId,
    pub score: i32,
    pub score_date: Timestamp,
    pub player: String,
    pub game: String,
}

impl PlayerScoreResponse {
    fn new(row: PlayerScore, links: &Links) -> Self {
        Self {
            url: links.detail(PLAYER_SCORES, row.id),
            pk: row.id,
            score: row.score,
            score_date: row.score_date,
            player: row.player_name,
            game: row.game_name,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PlayerScorePayload {
    pub score: Option<i32>,
    pub score_date: Option<Timestamp>,
    /// Player name.
    pub player: Option<String>,
    /// Game name.
    pub game: Option<String>,
}

struct ResolvedScore {
    score: Option<i32>,
    score_date: Option<Timestamp>,
    player_id: Option<DbId>,
    game_id: Option<DbId>,
}

async fn ensure_score_exists(pool: &DbPool, id: DbId) -> AppResult<PlayerScore> {
    PlayerScoreRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "PlayerScore",
            id,
        }))
}

/// Validate `payload` and resolve player and game names to ids.
async fn resolve_payload(
    pool: &DbPool,
    payload: PlayerScorePayload,
    partial: bool,
) -> AppResult<ResolvedScore> {
    let mut errors = FieldErrors::new();
    if !partial {
        errors.require("score", &payload.score);
        errors.require("score_date", &payload.score_date);
        errors.require("player", &payload.player);
        errors.require("game", &payload.game);
    }

    let mut player_id = None;
    if let Some(player) = &payload.player {
        match PlayerRepo::find_by_name(pool, player).await? {
            Some(found) => player_id = Some(found.id),
            None => errors.add("player", slug_missing(player)),
        }
    }

    let mut game_id = None;
    if let Some(game) = &payload.game {
        match GameRepo::find_by_name(pool, game).await? {
            Some(found) => game_id = Some(found.id),
            None => errors.add("game", slug_missing(game)),
        }
    }

    errors.into_result()?;

    Ok(ResolvedScore {
        score: payload.score,
        score_date: payload.score_date,
        player_id,
        game_id,
    })
}

/// GET /player-scores/
///
/// Highest scores first unless `ordering` says otherwise.
pub async fn list_player_scores(
    State(state): State<AppState>,
    links: Links,
    AppQuery(filter): AppQuery<PlayerScoreFilter>,
    AppQuery(params): AppQuery<PaginationParams>,
) -> AppResult<Json<Page<PlayerScoreResponse>>> {
    let window = params.window(state.config.page_size);
    let rows = PlayerScoreRepo::list(&state.pool, &filter, window.limit, window.offset).await?;
    let count = PlayerScoreRepo::count(&state.pool, &filter).await?;
    let results = rows
        .into_iter()
        .map(|s| PlayerScoreResponse::new(s, &links))
        .collect();

    Ok(Json(Page::new(results, count, window, &links)))
}

/// POST /player-scores/
pub async fn create_player_score(
    State(state): State<AppState>,
    links: Links,
    AppJson(payload): AppJson<PlayerScorePayload>,
) -> AppResult<(StatusCode, Json<PlayerScoreResponse>)> {
    let resolved = resolve_payload(&state.pool, payload, false).await?;

    let (Some(score), Some(score_date), Some(player_id), Some(game_id)) = (
        resolved.score,
        resolved.score_date,
        resolved.player_id,
        resolved.game_id,
    ) else {
        return Err(AppError::InternalError(
            "Score payload passed validation without required fields".into(),
        ));
    };

    let input = CreatePlayerScore {
        score,
        score_date,
        player_id,
        game_id,
    };
    let row = PlayerScoreRepo::create(&state.pool, &input).await?;

    tracing::info!(score_id = row.id, player_id, game_id, "Player score created");

    Ok((StatusCode::CREATED, Json(PlayerScoreResponse::new(row, &links))))
}

/// GET /player-scores/{id}/
pub async fn get_player_score(
    State(state): State<AppState>,
    links: Links,
    Path(id): Path<DbId>,
) -> AppResult<Json<PlayerScoreResponse>> {
    let row = ensure_score_exists(&state.pool, id).await?;
    Ok(Json(PlayerScoreResponse::new(row, &links)))
}

/// PUT /player-scores/{id}/
pub async fn update_player_score(
    State(state): State<AppState>,
    links: Links,
    Path(id): Path<DbId>,
    AppJson(payload): AppJson<PlayerScorePayload>,
) -> AppResult<Json<PlayerScoreResponse>> {
    save(&state, &links, id, payload, false).await
}

/// PATCH /player-scores/{id}/
pub async fn patch_player_score(
    State(state): State<AppState>,
    links: Links,
    Path(id): Path<DbId>,
    AppJson(payload): AppJson<PlayerScorePayload>,
) -> AppResult<Json<PlayerScoreResponse>> {
    save(&state, &links, id, payload, true).await
}

async fn save(
    state: &AppState,
    links: &Links,
    id: DbId,
    payload: PlayerScorePayload,
    partial: bool,
) -> AppResult<Json<PlayerScoreResponse>> {
    ensure_score_exists(&state.pool, id).await?;
    let resolved = resolve_payload(&state.pool, payload, partial).await?;

    let input = UpdatePlayerScore {
        score: resolved.score,
        score_date: resolved.score_date,
        player_id: resolved.player_id,
        game_id: resolved.game_id,
    };
    let row = PlayerScoreRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "PlayerScore",
            id,
        }))?;

    tracing::info!(score_id = id, "Player score updated");

    Ok(Json(PlayerScoreResponse::new(row, links)))
}

/// DELETE /player-scores/{id}/
pub async fn delete_player_score(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = PlayerScoreRepo::delete(&state.pool, id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "PlayerScore",
            id,
        }));
    }

    tracing::info!(score_id = id, "Player score deleted");

    Ok(StatusCode::NO_CONTENT)
}
