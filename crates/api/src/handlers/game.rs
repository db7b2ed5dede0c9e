//! Handlers for the `/games` resource.
//!
//! Reads are public. Creating a game requires authentication and stamps the
//! caller as its owner; changing or deleting one is reserved to that owner.

use axum::extract::{Path, State};
use axum::http::{Method, StatusCode};
use axum::Json;
use chrono::NaiveDate;
use gamesapi_core::error::CoreError;
use gamesapi_core::types::{DbId, Timestamp};
use gamesapi_core::validation::{not_blank, FieldErrors};
use gamesapi_db::models::game::{CreateGame, Game, GameFilter, UpdateGame};
use gamesapi_db::repositories::{GameCategoryRepo, GameRepo};
use gamesapi_db::DbPool;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{field_errors, slug_missing, trimmed};
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppQuery};
use crate::links::{Links, GAMES};
use crate::middleware::auth::AuthUser;
use crate::middleware::permissions::check_object_permission;
use crate::query::PaginationParams;
use crate::response::Page;
use crate::state::AppState;

/// A game as returned to clients. The owner and category are named, not linked.
#[derive(Debug, Serialize)]
pub struct GameResponse {
    pub url: String,
    pub pk: DbId,
    pub owner: Option<String>,
    pub game_category: String,
    pub name: String,
    pub release_date: NaiveDate,
    pub played: bool,
    pub created: Timestamp,
}

impl GameResponse {
    pub fn new(game: Game, links: &Links) -> Self {
        Self {
            url: links.detail(GAMES, game.id),
            pk: game.id,
            owner: game.owner_username,
            game_category: game.game_category_name,
            name: game.name,
            release_date: game.release_date,
            played: game.played,
            created: game.created_at,
        }
    }
}

/// Writable fields. `owner` and `created` are read-only and ignored.
#[derive(Debug, Deserialize, Validate)]
pub struct GamePayload {
    #[validate(
        custom(function = "not_blank"),
        length(max = 200, message = "Ensure this field has no more than 200 characters.")
    )]
    pub name: Option<String>,
    pub release_date: Option<NaiveDate>,
    /// Category name.
    pub game_category: Option<String>,
    pub played: Option<bool>,
}

/// Payload with the category name resolved to its id.
struct ResolvedGame {
    name: Option<String>,
    release_date: Option<NaiveDate>,
    played: Option<bool>,
    game_category_id: Option<DbId>,
}

async fn ensure_game_exists(pool: &DbPool, id: DbId) -> AppResult<Game> {
    GameRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Game", id }))
}

/// Validate `payload` and resolve its category; `partial` skips required checks.
async fn resolve_payload(
    pool: &DbPool,
    mut payload: GamePayload,
    current_id: Option<DbId>,
    partial: bool,
) -> AppResult<ResolvedGame> {
    payload.name = trimmed(payload.name);

    let mut errors = FieldErrors::new();
    if !partial {
        errors.require("name", &payload.name);
        errors.require("release_date", &payload.release_date);
        errors.require("game_category", &payload.game_category);
    }
    errors.merge(field_errors(&payload));

    if let Some(name) = &payload.name {
        if !errors.contains("name") && GameRepo::name_taken(pool, name, current_id).await? {
            errors.add("name", "game with this name already exists.");
        }
    }

    let mut game_category_id = None;
    if let Some(category) = &payload.game_category {
        match GameCategoryRepo::find_by_name(pool, category).await? {
            Some(found) => game_category_id = Some(found.id),
            None => errors.add("game_category", slug_missing(category)),
        }
    }

    errors.into_result()?;

    Ok(ResolvedGame {
        name: payload.name,
        release_date: payload.release_date,
        played: payload.played,
        game_category_id,
    })
}

/// GET /games/
pub async fn list_games(
    State(state): State<AppState>,
    links: Links,
    AppQuery(filter): AppQuery<GameFilter>,
    AppQuery(params): AppQuery<PaginationParams>,
) -> AppResult<Json<Page<GameResponse>>> {
    let window = params.window(state.config.page_size);
    let rows = GameRepo::list(&state.pool, &filter, window.limit, window.offset).await?;
    let count = GameRepo::count(&state.pool, &filter).await?;
    let results = rows
        .into_iter()
        .map(|g| GameResponse::new(g, &links))
        .collect();

    Ok(Json(Page::new(results, count, window, &links)))
}

/// POST /games/
///
/// The authenticated caller becomes the owner, whatever the body says.
pub async fn create_game(
    auth: AuthUser,
    State(state): State<AppState>,
    links: Links,
    AppJson(payload): AppJson<GamePayload>,
) -> AppResult<(StatusCode, Json<GameResponse>)> {
    let resolved = resolve_payload(&state.pool, payload, None, false).await?;

    let (Some(name), Some(release_date), Some(game_category_id)) =
        (resolved.name, resolved.release_date, resolved.game_category_id)
    else {
        return Err(AppError::InternalError(
            "Game payload passed validation without required fields".into(),
        ));
    };

    let input = CreateGame {
        name,
        release_date,
        played: resolved.played.unwrap_or(false),
        owner_id: Some(auth.user_id),
        game_category_id,
    };
    let game = GameRepo::create(&state.pool, &input).await?;

    tracing::info!(game_id = game.id, user_id = auth.user_id, "Game created");

    Ok((StatusCode::CREATED, Json(GameResponse::new(game, &links))))
}

/// GET /games/{id}/
pub async fn get_game(
    State(state): State<AppState>,
    links: Links,
    Path(id): Path<DbId>,
) -> AppResult<Json<GameResponse>> {
    let game = ensure_game_exists(&state.pool, id).await?;
    Ok(Json(GameResponse::new(game, &links)))
}

/// PUT /games/{id}/
pub async fn update_game(
    auth: AuthUser,
    method: Method,
    State(state): State<AppState>,
    links: Links,
    Path(id): Path<DbId>,
    AppJson(payload): AppJson<GamePayload>,
) -> AppResult<Json<GameResponse>> {
    save(&state, &auth, &method, &links, id, payload, false).await
}

/// PATCH /games/{id}/
pub async fn patch_game(
    auth: AuthUser,
    method: Method,
    State(state): State<AppState>,
    links: Links,
    Path(id): Path<DbId>,
    AppJson(payload): AppJson<GamePayload>,
) -> AppResult<Json<GameResponse>> {
    save(&state, &auth, &method, &links, id, payload, true).await
}

async fn save(
    state: &AppState,
    auth: &AuthUser,
    method: &Method,
    links: &Links,
    id: DbId,
    payload: GamePayload,
    partial: bool,
) -> AppResult<Json<GameResponse>> {
    let existing = ensure_game_exists(&state.pool, id).await?;
    check_object_permission(method, Some(auth), existing.owner_id)?;

    let resolved = resolve_payload(&state.pool, payload, Some(id), partial).await?;
    let input = UpdateGame {
        name: resolved.name,
        release_date: resolved.release_date,
        played: resolved.played,
        game_category_id: resolved.game_category_id,
    };
    let game = GameRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Game", id }))?;

    tracing::info!(game_id = id, user_id = auth.user_id, "Game updated");

    Ok(Json(GameResponse::new(game, links)))
}

/// DELETE /games/{id}/
pub async fn delete_game(
    auth: AuthUser,
    method: Method,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let existing = ensure_game_exists(&state.pool, id).await?;
    check_object_permission(&method, Some(&auth), existing.owner_id)?;

    GameRepo::delete(&state.pool, id).await?;

    tracing::info!(game_id = id, user_id = auth.user_id, "Game deleted");

    Ok(StatusCode::NO_CONTENT)
}
