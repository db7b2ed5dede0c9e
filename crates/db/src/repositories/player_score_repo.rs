//! Repository for the `player_scores` table.

use gamesapi_core::ordering::{resolve_ordering, OrderBy};
use gamesapi_core::types::DbId;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::player_score::{
    CreatePlayerScore, PlayerScore, PlayerScoreFilter, UpdatePlayerScore,
};
use crate::query::{push_order_by, push_page};

/// Projection over `player_scores s` joined as in [`JOINS`].
const COLUMNS: &str = "s.id, s.score, s.score_date, \
                       s.player_id, p.name AS player_name, \
                       s.game_id, g.name AS game_name, \
                       s.created_at, s.updated_at";

const JOINS: &str = "JOIN players p ON p.id = s.player_id \
                     JOIN games g ON g.id = s.game_id";

/// Fields accepted by `?ordering=`.
pub const ORDERING_FIELDS: &[&str] = &["score", "score_date"];

/// Highest score first.
const DEFAULT_ORDERING: &[OrderBy] = &[OrderBy::desc("score")];

fn column_for(field: &str) -> &'static str {
    match field {
        "score_date" => "s.score_date",
        _ => "s.score",
    }
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &PlayerScoreFilter) {
    qb.push(" WHERE TRUE");
    if let Some(score) = filter.score {
        qb.push(" AND s.score = ").push_bind(score);
    }
    if let Some(min) = filter.min_score {
        qb.push(" AND s.score >= ").push_bind(min);
    }
    if let Some(max) = filter.max_score {
        qb.push(" AND s.score <= ").push_bind(max);
    }
    if let Some(from) = filter.from_score_date {
        qb.push(" AND s.score_date >= ").push_bind(from);
    }
    if let Some(to) = filter.to_score_date {
        qb.push(" AND s.score_date <= ").push_bind(to);
    }
    if let Some(player_name) = &filter.player_name {
        qb.push(" AND p.name = ").push_bind(player_name.clone());
    }
    if let Some(game_name) = &filter.game_name {
        qb.push(" AND g.name = ").push_bind(game_name.clone());
    }
}

/// Provides CRUD operations for player scores.
pub struct PlayerScoreRepo;

impl PlayerScoreRepo {
    /// Insert a new score, returning the created row with its joined names.
    pub async fn create(
        pool: &PgPool,
        input: &CreatePlayerScore,
    ) -> Result<PlayerScore, sqlx::Error> {
        let query = format!(
            "WITH s AS (
                INSERT INTO player_scores (score, score_date, player_id, game_id)
                VALUES ($1, $2, $3, $4)
                RETURNING *
             )
             SELECT {COLUMNS} FROM s {JOINS}"
        );
        sqlx::query_as::<_, PlayerScore>(&query)
            .bind(input.score)
            .bind(input.score_date)
            .bind(input.player_id)
            .bind(input.game_id)
            .fetch_one(pool)
            .await
    }

    /// Find a score by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<PlayerScore>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM player_scores s {JOINS} WHERE s.id = $1");
        sqlx::query_as::<_, PlayerScore>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List one page of scores matching `filter`.
    pub async fn list(
        pool: &PgPool,
        filter: &PlayerScoreFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PlayerScore>, sqlx::Error> {
        let ordering = resolve_ordering(
            filter.ordering.as_deref(),
            ORDERING_FIELDS,
            DEFAULT_ORDERING,
        );
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {COLUMNS} FROM player_scores s {JOINS}"
        ));
        push_filters(&mut qb, filter);
        push_order_by(&mut qb, &ordering, column_for, "s.id");
        push_page(&mut qb, limit, offset);
        qb.build_query_as::<PlayerScore>().fetch_all(pool).await
    }

    /// Count all scores matching `filter`.
    pub async fn count(pool: &PgPool, filter: &PlayerScoreFilter) -> Result<i64, sqlx::Error> {
        let mut qb =
            QueryBuilder::<Postgres>::new(format!("SELECT COUNT(*) FROM player_scores s {JOINS}"));
        push_filters(&mut qb, filter);
        qb.build_query_scalar::<i64>().fetch_one(pool).await
    }

    /// Every score of the given players, highest first.
    pub async fn list_by_players(
        pool: &PgPool,
        player_ids: &[DbId],
    ) -> Result<Vec<PlayerScore>, sqlx::Error> {
        if player_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {COLUMNS} FROM player_scores s {JOINS}
             WHERE s.player_id = ANY($1)
             ORDER BY s.score DESC, s.id"
        );
        sqlx::query_as::<_, PlayerScore>(&query)
            .bind(player_ids)
            .fetch_all(pool)
            .await
    }

    /// Update a score. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePlayerScore,
    ) -> Result<Option<PlayerScore>, sqlx::Error> {
        let query = format!(
            "WITH s AS (
                UPDATE player_scores SET
                    score = COALESCE($2, score),
                    score_date = COALESCE($3, score_date),
                    player_id = COALESCE($4, player_id),
                    game_id = COALESCE($5, game_id)
                WHERE id = $1
                RETURNING *
             )
             SELECT {COLUMNS} FROM s {JOINS}"
        );
        sqlx::query_as::<_, PlayerScore>(&query)
            .bind(id)
            .bind(input.score)
            .bind(input.score_date)
            .bind(input.player_id)
            .bind(input.game_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a score. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM player_scores WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
