//! Repository for the `games` table.
//!
//! Every read returns [`Game`] rows joined with the owner's username and the
//! category name, so handlers never need a second round-trip to render them.

use gamesapi_core::ordering::{resolve_ordering, OrderBy};
use gamesapi_core::types::DbId;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::game::{CreateGame, Game, GameFilter, GameSummary, UpdateGame};
use crate::query::{push_order_by, push_page, push_prefix_search};

/// Projection over `games g` joined as in [`JOINS`].
const COLUMNS: &str = "g.id, g.name, g.release_date, g.played, \
                       g.owner_id, u.username AS owner_username, \
                       g.game_category_id, c.name AS game_category_name, \
                       g.created_at, g.updated_at";

const JOINS: &str = "JOIN game_categories c ON c.id = g.game_category_id \
                     LEFT JOIN users u ON u.id = g.owner_id";

const SUMMARY_COLUMNS: &str = "id, name, owner_id, game_category_id";

/// Fields accepted by `?ordering=`.
pub const ORDERING_FIELDS: &[&str] = &["name", "release_date"];

const DEFAULT_ORDERING: &[OrderBy] = &[OrderBy::asc("name")];

fn column_for(field: &str) -> &'static str {
    match field {
        "release_date" => "g.release_date",
        _ => "g.name",
    }
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &GameFilter) {
    qb.push(" WHERE TRUE");
    if let Some(owner) = filter.owner {
        qb.push(" AND g.owner_id = ").push_bind(owner);
    }
    if let Some(category) = filter.game_category {
        qb.push(" AND g.game_category_id = ").push_bind(category);
    }
    if let Some(name) = &filter.name {
        qb.push(" AND g.name = ").push_bind(name.clone());
    }
    if let Some(release_date) = filter.release_date {
        qb.push(" AND g.release_date = ").push_bind(release_date);
    }
    if let Some(played) = filter.played {
        qb.push(" AND g.played = ").push_bind(played);
    }
    push_prefix_search(qb, "g.name", filter.search.as_deref());
}

/// Provides CRUD operations for games.
pub struct GameRepo;

impl GameRepo {
    /// Insert a new game, returning the created row with its joined names.
    pub async fn create(pool: &PgPool, input: &CreateGame) -> Result<Game, sqlx::Error> {
        let query = format!(
            "WITH g AS (
                INSERT INTO games (name, release_date, played, owner_id, game_category_id)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING *
             )
             SELECT {COLUMNS} FROM g {JOINS}"
        );
        sqlx::query_as::<_, Game>(&query)
            .bind(&input.name)
            .bind(input.release_date)
            .bind(input.played)
            .bind(input.owner_id)
            .bind(input.game_category_id)
            .fetch_one(pool)
            .await
    }

    /// Find a game by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Game>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM games g {JOINS} WHERE g.id = $1");
        sqlx::query_as::<_, Game>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a game by its unique name (case-sensitive).
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Game>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM games g {JOINS} WHERE g.name = $1");
        sqlx::query_as::<_, Game>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Fetch several games by ID, in no particular order.
    pub async fn find_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Game>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("SELECT {COLUMNS} FROM games g {JOINS} WHERE g.id = ANY($1)");
        sqlx::query_as::<_, Game>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Whether another game already uses `name`.
    pub async fn name_taken(
        pool: &PgPool,
        name: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS (
                SELECT 1 FROM games
                WHERE name = $1 AND ($2::BIGINT IS NULL OR id <> $2)
             )",
        )
        .bind(name)
        .bind(exclude_id)
        .fetch_one(pool)
        .await
    }

    /// List one page of games matching `filter`.
    pub async fn list(
        pool: &PgPool,
        filter: &GameFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Game>, sqlx::Error> {
        let ordering = resolve_ordering(
            filter.ordering.as_deref(),
            ORDERING_FIELDS,
            DEFAULT_ORDERING,
        );
        let mut qb =
            QueryBuilder::<Postgres>::new(format!("SELECT {COLUMNS} FROM games g {JOINS}"));
        push_filters(&mut qb, filter);
        push_order_by(&mut qb, &ordering, column_for, "g.id");
        push_page(&mut qb, limit, offset);
        qb.build_query_as::<Game>().fetch_all(pool).await
    }

    /// Count all games matching `filter`.
    pub async fn count(pool: &PgPool, filter: &GameFilter) -> Result<i64, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM games g");
        push_filters(&mut qb, filter);
        qb.build_query_scalar::<i64>().fetch_one(pool).await
    }

    /// Summaries of every game in the given categories, ordered by name.
    pub async fn list_summaries_by_categories(
        pool: &PgPool,
        category_ids: &[DbId],
    ) -> Result<Vec<GameSummary>, sqlx::Error> {
        if category_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM games
             WHERE game_category_id = ANY($1)
             ORDER BY name, id"
        );
        sqlx::query_as::<_, GameSummary>(&query)
            .bind(category_ids)
            .fetch_all(pool)
            .await
    }

    /// Summaries of every game owned by the given users, ordered by name.
    pub async fn list_summaries_by_owners(
        pool: &PgPool,
        owner_ids: &[DbId],
    ) -> Result<Vec<GameSummary>, sqlx::Error> {
        if owner_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM games
             WHERE owner_id = ANY($1)
             ORDER BY name, id"
        );
        sqlx::query_as::<_, GameSummary>(&query)
            .bind(owner_ids)
            .fetch_all(pool)
            .await
    }

    /// Update a game. Only non-`None` fields in `input` are applied.
    ///
    /// `owner_id` and `created_at` are never touched. Returns `None` if no
    /// row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateGame,
    ) -> Result<Option<Game>, sqlx::Error> {
        let query = format!(
            "WITH g AS (
                UPDATE games SET
                    name = COALESCE($2, name),
                    release_date = COALESCE($3, release_date),
                    played = COALESCE($4, played),
                    game_category_id = COALESCE($5, game_category_id)
                WHERE id = $1
                RETURNING *
             )
             SELECT {COLUMNS} FROM g {JOINS}"
        );
        sqlx::query_as::<_, Game>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.release_date)
            .bind(input.played)
            .bind(input.game_category_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a game and, through the FK cascade, its scores.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM games WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
