//! Handlers for the `/players` resource.
//!
//! A player's representation embeds its scores, each with the full game.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use gamesapi_core::error::CoreError;
use gamesapi_core::gender::{invalid_choice_message, Gender};
use gamesapi_core::types::{DbId, Timestamp};
use gamesapi_core::validation::{not_blank, FieldErrors};
use gamesapi_db::models::player::{CreatePlayer, Player, PlayerFilter, UpdatePlayer};
use gamesapi_db::repositories::{GameRepo, PlayerRepo, PlayerScoreRepo};
use gamesapi_db::DbPool;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::game::GameResponse;
use super::{field_errors, trimmed};
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppQuery};
use crate::links::{Links, PLAYERS, PLAYER_SCORES};
use crate::query::PaginationParams;
use crate::response::Page;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PlayerResponse {
    pub url: String,
    pub pk: DbId,
    pub name: String,
    pub gender: String,
    pub gender_description: String,
    pub scores: Vec<PlayerScoreEntry>,
}

/// A score nested under its player.
#[derive(Debug, Serialize)]
pub struct PlayerScoreEntry {
    pub url: String,
    pub pk: DbId,
    pub score: i32,
    pub score_date: Timestamp,
    pub game: GameResponse,
}

#[derive(Debug, Deserialize, Validate)]
pub struct PlayerPayload {
    #[validate(
        custom(function = "not_blank"),
        length(max = 50, message = "Ensure this field has no more than 50 characters.")
    )]
    pub name: Option<String>,
    /// `"M"` or `"F"`.
    pub gender: Option<String>,
}

/// Build representations for `rows` with two extra queries (scores, games).
async fn represent(
    pool: &DbPool,
    rows: Vec<Player>,
    links: &Links,
) -> AppResult<Vec<PlayerResponse>> {
    let player_ids: Vec<DbId> = rows.iter().map(|p| p.id).collect();
    let scores = PlayerScoreRepo::list_by_players(pool, &player_ids).await?;

    let mut game_ids: Vec<DbId> = scores.iter().map(|s| s.game_id).collect();
    game_ids.sort_unstable();
    game_ids.dedup();
    let games: HashMap<DbId, _> = GameRepo::find_by_ids(pool, &game_ids)
        .await?
        .into_iter()
        .map(|g| (g.id, g))
        .collect();

    let mut by_player: HashMap<DbId, Vec<PlayerScoreEntry>> = HashMap::new();
    for score in scores {
        let Some(game) = games.get(&score.game_id) else {
            continue;
        };
        by_player
            .entry(score.player_id)
            .or_default()
            .push(PlayerScoreEntry {
                url: links.detail(PLAYER_SCORES, score.id),
                pk: score.id,
                score: score.score,
                score_date: score.score_date,
                game: GameResponse::new(game.clone(), links),
            });
    }

    Ok(rows
        .into_iter()
        .map(|p| {
            let description = Gender::from_code(&p.gender)
                .map(Gender::description)
                .unwrap_or_default();
            PlayerResponse {
                url: links.detail(PLAYERS, p.id),
                pk: p.id,
                scores: by_player.remove(&p.id).unwrap_or_default(),
                gender_description: description.to_string(),
                gender: p.gender,
                name: p.name,
            }
        })
        .collect())
}

async fn represent_one(pool: &DbPool, row: Player, links: &Links) -> AppResult<PlayerResponse> {
    represent(pool, vec![row], links)
        .await?
        .pop()
        .ok_or_else(|| AppError::InternalError("Player representation missing".into()))
}

async fn ensure_player_exists(pool: &DbPool, id: DbId) -> AppResult<Player> {
    PlayerRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Player",
            id,
        }))
}

async fn check_payload(
    pool: &DbPool,
    payload: &PlayerPayload,
    current_id: Option<DbId>,
    partial: bool,
) -> AppResult<()> {
    let mut errors = FieldErrors::new();
    if !partial {
        errors.require("name", &payload.name);
        errors.require("gender", &payload.gender);
    }
    errors.merge(field_errors(payload));

    if let Some(gender) = &payload.gender {
        if Gender::from_code(gender).is_none() {
            errors.add("gender", invalid_choice_message(gender));
        }
    }

    if let Some(name) = &payload.name {
        if !errors.contains("name") && PlayerRepo::name_taken(pool, name, current_id).await? {
            errors.add("name", "player with this name already exists.");
        }
    }

    Ok(errors.into_result()?)
}

/// GET /players/
pub async fn list_players(
    State(state): State<AppState>,
    links: Links,
    AppQuery(filter): AppQuery<PlayerFilter>,
    AppQuery(params): AppQuery<PaginationParams>,
) -> AppResult<Json<Page<PlayerResponse>>> {
    let window = params.window(state.config.page_size);
    let rows = PlayerRepo::list(&state.pool, &filter, window.limit, window.offset).await?;
    let count = PlayerRepo::count(&state.pool, &filter).await?;
    let results = represent(&state.pool, rows, &links).await?;

    Ok(Json(Page::new(results, count, window, &links)))
}

/// POST /players/
pub async fn create_player(
    State(state): State<AppState>,
    links: Links,
    AppJson(mut payload): AppJson<PlayerPayload>,
) -> AppResult<(StatusCode, Json<PlayerResponse>)> {
    payload.name = trimmed(payload.name);
    check_payload(&state.pool, &payload, None, false).await?;

    let input = CreatePlayer {
        name: payload.name.unwrap_or_default(),
        gender: payload.gender.unwrap_or_default(),
    };
    let player = PlayerRepo::create(&state.pool, &input).await?;

    tracing::info!(player_id = player.id, "Player created");

    let body = represent_one(&state.pool, player, &links).await?;
    Ok((StatusCode::CREATED, Json(body)))
}

/// GET /players/{id}/
pub async fn get_player(
    State(state): State<AppState>,
    links: Links,
    Path(id): Path<DbId>,
) -> AppResult<Json<PlayerResponse>> {
    let player = ensure_player_exists(&state.pool, id).await?;
    Ok(Json(represent_one(&state.pool, player, &links).await?))
}

/// PUT /players/{id}/
pub async fn update_player(
    State(state): State<AppState>,
    links: Links,
    Path(id): Path<DbId>,
    AppJson(payload): AppJson<PlayerPayload>,
) -> AppResult<Json<PlayerResponse>> {
    save(&state, &links, id, payload, false).await
}

/// PATCH /players/{id}/
pub async fn patch_player(
    State(state): State<AppState>,
    links: Links,
    Path(id): Path<DbId>,
    AppJson(payload): AppJson<PlayerPayload>,
) -> AppResult<Json<PlayerResponse>> {
    save(&state, &links, id, payload, true).await
}

async fn save(
    state: &AppState,
    links: &Links,
    id: DbId,
    mut payload: PlayerPayload,
    partial: bool,
) -> AppResult<Json<PlayerResponse>> {
    ensure_player_exists(&state.pool, id).await?;
    payload.name = trimmed(payload.name);
    check_payload(&state.pool, &payload, Some(id), partial).await?;

    let input = UpdatePlayer {
        name: payload.name,
        gender: payload.gender,
    };
    let player = PlayerRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Player",
            id,
        }))?;

    tracing::info!(player_id = id, "Player updated");

    Ok(Json(represent_one(&state.pool, player, links).await?))
}

/// DELETE /players/{id}/
pub async fn delete_player(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = PlayerRepo::delete(&state.pool, id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Player",
            id,
        }));
    }

    tracing::info!(player_id = id, "Player deleted");

    Ok(StatusCode::NO_CONTENT)
}
