//! Repository for the `game_categories` table.

use gamesapi_core::ordering::{resolve_ordering, OrderBy};
use gamesapi_core::types::DbId;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::game_category::{
    CreateGameCategory, GameCategory, GameCategoryFilter, UpdateGameCategory,
};
use crate::query::{push_order_by, push_page, push_prefix_search};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, created_at, updated_at";

/// Fields accepted by `?ordering=`.
pub const ORDERING_FIELDS: &[&str] = &["name"];

const DEFAULT_ORDERING: &[OrderBy] = &[OrderBy::asc("name")];

fn column_for(_field: &str) -> &'static str {
    "name"
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &GameCategoryFilter) {
    qb.push(" WHERE TRUE");
    if let Some(name) = &filter.name {
        qb.push(" AND name = ").push_bind(name.clone());
    }
    push_prefix_search(qb, "name", filter.search.as_deref());
}

/// Provides CRUD operations for game categories.
pub struct GameCategoryRepo;

impl GameCategoryRepo {
    /// Insert a new category, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateGameCategory,
    ) -> Result<GameCategory, sqlx::Error> {
        let query = format!(
            "INSERT INTO game_categories (name) VALUES ($1)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GameCategory>(&query)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    /// Find a category by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<GameCategory>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM game_categories WHERE id = $1");
        sqlx::query_as::<_, GameCategory>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a category by its unique name (case-sensitive).
    pub async fn find_by_name(
        pool: &PgPool,
        name: &str,
    ) -> Result<Option<GameCategory>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM game_categories WHERE name = $1");
        sqlx::query_as::<_, GameCategory>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Whether another category already uses `name`.
    pub async fn name_taken(
        pool: &PgPool,
        name: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS (
                SELECT 1 FROM game_categories
                WHERE name = $1 AND ($2::BIGINT IS NULL OR id <> $2)
             )",
        )
        .bind(name)
        .bind(exclude_id)
        .fetch_one(pool)
        .await
    }

    /// List one page of categories matching `filter`.
    pub async fn list(
        pool: &PgPool,
        filter: &GameCategoryFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<GameCategory>, sqlx::Error> {
        let ordering = resolve_ordering(
            filter.ordering.as_deref(),
            ORDERING_FIELDS,
            DEFAULT_ORDERING,
        );
        let mut qb =
            QueryBuilder::<Postgres>::new(format!("SELECT {COLUMNS} FROM game_categories"));
        push_filters(&mut qb, filter);
        push_order_by(&mut qb, &ordering, column_for, "id");
        push_page(&mut qb, limit, offset);
        qb.build_query_as::<GameCategory>().fetch_all(pool).await
    }

    /// Count all categories matching `filter`.
    pub async fn count(pool: &PgPool, filter: &GameCategoryFilter) -> Result<i64, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM game_categories");
        push_filters(&mut qb, filter);
        qb.build_query_scalar::<i64>().fetch_one(pool).await
    }

    /// Update a category. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateGameCategory,
    ) -> Result<Option<GameCategory>, sqlx::Error> {
        let query = format!(
            "UPDATE game_categories SET
                name = COALESCE($2, name)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GameCategory>(&query)
            .bind(id)
            .bind(&input.name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a category and, through the FK cascade, its games.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM game_categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
