//! Read-only handlers for the `/users` resource.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::Json;
use gamesapi_core::error::CoreError;
use gamesapi_core::types::DbId;
use gamesapi_db::models::user::User;
use gamesapi_db::repositories::{GameRepo, UserRepo};
use gamesapi_db::DbPool;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extract::AppQuery;
use crate::links::{Links, GAMES, USERS};
use crate::query::PaginationParams;
use crate::response::Page;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub url: String,
    pub pk: DbId,
    pub username: String,
    pub games: Vec<UserGameLink>,
}

/// A game owned by the user.
#[derive(Debug, Serialize)]
pub struct UserGameLink {
    pub url: String,
    pub name: String,
}

/// Build representations for `rows`, loading owned games in one query.
pub(crate) async fn represent(
    pool: &DbPool,
    rows: Vec<User>,
    links: &Links,
) -> AppResult<Vec<UserResponse>> {
    let ids: Vec<DbId> = rows.iter().map(|u| u.id).collect();
    let mut games: HashMap<DbId, Vec<UserGameLink>> = HashMap::new();
    for game in GameRepo::list_summaries_by_owners(pool, &ids).await? {
        let Some(owner_id) = game.owner_id else {
            continue;
        };
        games.entry(owner_id).or_default().push(UserGameLink {
            url: links.detail(GAMES, game.id),
            name: game.name,
        });
    }

    Ok(rows
        .into_iter()
        .map(|u| UserResponse {
            url: links.detail(USERS, u.id),
            pk: u.id,
            games: games.remove(&u.id).unwrap_or_default(),
            username: u.username,
        })
        .collect())
}

/// GET /users/
pub async fn list_users(
    State(state): State<AppState>,
    links: Links,
    AppQuery(params): AppQuery<PaginationParams>,
) -> AppResult<Json<Page<UserResponse>>> {
    let window = params.window(state.config.page_size);
    let rows = UserRepo::list(&state.pool, window.limit, window.offset).await?;
    let count = UserRepo::count(&state.pool).await?;
    let results = represent(&state.pool, rows, &links).await?;

    Ok(Json(Page::new(results, count, window, &links)))
}

/// GET /users/{id}/
pub async fn get_user(
    State(state): State<AppState>,
    links: Links,
    Path(id): Path<DbId>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    represent(&state.pool, vec![user], &links)
        .await?
        .pop()
        .map(Json)
        .ok_or_else(|| AppError::InternalError("User representation missing".into()))
}
