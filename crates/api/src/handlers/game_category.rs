//! Handlers for the `/game-categories` resource.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use gamesapi_core::error::CoreError;
use gamesapi_core::types::DbId;
use gamesapi_core::validation::{not_blank, FieldErrors};
use gamesapi_db::models::game_category::{
    CreateGameCategory, GameCategory, GameCategoryFilter, UpdateGameCategory,
};
use gamesapi_db::repositories::{GameCategoryRepo, GameRepo};
use gamesapi_db::DbPool;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{field_errors, trimmed};
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppQuery};
use crate::links::{Links, GAMES, GAME_CATEGORIES};
use crate::query::PaginationParams;
use crate::response::Page;
use crate::state::AppState;

/// A category with links to its games.
#[derive(Debug, Serialize)]
pub struct GameCategoryResponse {
    pub url: String,
    pub pk: DbId,
    pub name: String,
    pub games: Vec<String>,
}

/// Writable fields. All optional so PATCH can send a subset.
#[derive(Debug, Deserialize, Validate)]
pub struct GameCategoryPayload {
    #[validate(
        custom(function = "not_blank"),
        length(max = 200, message = "Ensure this field has no more than 200 characters.")
    )]
    pub name: Option<String>,
}

/// Build representations for `rows`, loading game links in one query.
async fn represent(
    pool: &DbPool,
    rows: Vec<GameCategory>,
    links: &Links,
) -> AppResult<Vec<GameCategoryResponse>> {
    let ids: Vec<DbId> = rows.iter().map(|c| c.id).collect();
    let mut games: HashMap<DbId, Vec<String>> = HashMap::new();
    for game in GameRepo::list_summaries_by_categories(pool, &ids).await? {
        games
            .entry(game.game_category_id)
            .or_default()
            .push(links.detail(GAMES, game.id));
    }

    Ok(rows
        .into_iter()
        .map(|c| GameCategoryResponse {
            url: links.detail(GAME_CATEGORIES, c.id),
            pk: c.id,
            games: games.remove(&c.id).unwrap_or_default(),
            name: c.name,
        })
        .collect())
}

async fn represent_one(
    pool: &DbPool,
    row: GameCategory,
    links: &Links,
) -> AppResult<GameCategoryResponse> {
    represent(pool, vec![row], links)
        .await?
        .pop()
        .ok_or_else(|| AppError::InternalError("Category representation missing".into()))
}

async fn ensure_category_exists(pool: &DbPool, id: DbId) -> AppResult<GameCategory> {
    GameCategoryRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "GameCategory",
            id,
        }))
}

/// Validate `payload`; `partial` skips required-field checks.
async fn check_payload(
    pool: &DbPool,
    payload: &GameCategoryPayload,
    current_id: Option<DbId>,
    partial: bool,
) -> AppResult<()> {
    let mut errors = FieldErrors::new();
    if !partial {
        errors.require("name", &payload.name);
    }
    errors.merge(field_errors(payload));

    if let Some(name) = &payload.name {
        if !errors.contains("name") && GameCategoryRepo::name_taken(pool, name, current_id).await? {
            errors.add("name", "game category with this name already exists.");
        }
    }

    Ok(errors.into_result()?)
}

/// GET /game-categories/
pub async fn list_game_categories(
    State(state): State<AppState>,
    links: Links,
    AppQuery(filter): AppQuery<GameCategoryFilter>,
    AppQuery(params): AppQuery<PaginationParams>,
) -> AppResult<Json<Page<GameCategoryResponse>>> {
    let window = params.window(state.config.page_size);
    let rows = GameCategoryRepo::list(&state.pool, &filter, window.limit, window.offset).await?;
    let count = GameCategoryRepo::count(&state.pool, &filter).await?;
    let results = represent(&state.pool, rows, &links).await?;

    Ok(Json(Page::new(results, count, window, &links)))
}

/// POST /game-categories/
pub async fn create_game_category(
    State(state): State<AppState>,
    links: Links,
    AppJson(mut payload): AppJson<GameCategoryPayload>,
) -> AppResult<(StatusCode, Json<GameCategoryResponse>)> {
    payload.name = trimmed(payload.name);
    check_payload(&state.pool, &payload, None, false).await?;

    let input = CreateGameCategory {
        name: payload.name.unwrap_or_default(),
    };
    let category = GameCategoryRepo::create(&state.pool, &input).await?;

    tracing::info!(category_id = category.id, name = %category.name, "Game category created");

    let body = represent_one(&state.pool, category, &links).await?;
    Ok((StatusCode::CREATED, Json(body)))
}

/// GET /game-categories/{id}/
pub async fn get_game_category(
    State(state): State<AppState>,
    links: Links,
    Path(id): Path<DbId>,
) -> AppResult<Json<GameCategoryResponse>> {
    let category = ensure_category_exists(&state.pool, id).await?;
    Ok(Json(represent_one(&state.pool, category, &links).await?))
}

/// PUT /game-categories/{id}/
pub async fn update_game_category(
    State(state): State<AppState>,
    links: Links,
    Path(id): Path<DbId>,
    AppJson(payload): AppJson<GameCategoryPayload>,
) -> AppResult<Json<GameCategoryResponse>> {
    save(&state, &links, id, payload, false).await
}

/// PATCH /game-categories/{id}/
pub async fn patch_game_category(
    State(state): State<AppState>,
    links: Links,
    Path(id): Path<DbId>,
    AppJson(payload): AppJson<GameCategoryPayload>,
) -> AppResult<Json<GameCategoryResponse>> {
    save(&state, &links, id, payload, true).await
}

async fn save(
    state: &AppState,
    links: &Links,
    id: DbId,
    mut payload: GameCategoryPayload,
    partial: bool,
) -> AppResult<Json<GameCategoryResponse>> {
    ensure_category_exists(&state.pool, id).await?;
    payload.name = trimmed(payload.name);
    check_payload(&state.pool, &payload, Some(id), partial).await?;

    let input = UpdateGameCategory { name: payload.name };
    let category = GameCategoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "GameCategory",
            id,
        }))?;

    tracing::info!(category_id = id, "Game category updated");

    Ok(Json(represent_one(&state.pool, category, links).await?))
}

/// DELETE /game-categories/{id}/
///
/// Removes the category's games (and their scores) as well.
pub async fn delete_game_category(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = GameCategoryRepo::delete(&state.pool, id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "GameCategory",
            id,
        }));
    }

    tracing::info!(category_id = id, "Game category deleted");

    Ok(StatusCode::NO_CONTENT)
}
