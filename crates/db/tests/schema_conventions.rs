use sqlx::PgPool;

/// All `id` columns must be bigint.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_pks_are_correct_type(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name, data_type
         FROM information_schema.columns
         WHERE column_name = 'id'
           AND table_schema = 'public'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    for (table, data_type) in &rows {
        assert_eq!(data_type, "bigint", "Table {table}.id should be bigint");
    }
}

/// Every table (except _sqlx_migrations) must have created_at and updated_at as timestamptz.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_tables_have_timestamps(pool: PgPool) {
    let tables: Vec<(String,)> = sqlx::query_as(
        "SELECT table_name
         FROM information_schema.tables
         WHERE table_schema = 'public'
           AND table_type = 'BASE TABLE'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    for (table,) in &tables {
        for col in ["created_at", "updated_at"] {
            let result: Option<(String,)> = sqlx::query_as(&format!(
                "SELECT data_type
                 FROM information_schema.columns
                 WHERE table_schema = 'public'
                   AND table_name = '{table}'
                   AND column_name = '{col}'"
            ))
            .fetch_optional(&pool)
            .await
            .unwrap();

            let (data_type,) =
                result.unwrap_or_else(|| panic!("Table {table} is missing column {col}"));
            assert_eq!(
                data_type, "timestamp with time zone",
                "Table {table}.{col} should be timestamptz, got {data_type}"
            );
        }
    }
}

/// No character varying columns should exist; TEXT is used throughout.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_no_varchar_columns(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name, column_name
         FROM information_schema.columns
         WHERE table_schema = 'public'
           AND data_type = 'character varying'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name, column_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(
        rows.is_empty(),
        "Found VARCHAR columns (should use TEXT): {:?}",
        rows
    );
}

/// Every foreign key column must have a corresponding index.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_fks_have_indexes(pool: PgPool) {
    // Get all FK columns
    let fk_columns: Vec<(String, String)> = sqlx::query_as(
        "SELECT DISTINCT
             tc.table_name,
             kcu.column_name
         FROM information_schema.table_constraints tc
         JOIN information_schema.key_column_usage kcu
             ON tc.constraint_name = kcu.constraint_name
             AND tc.table_schema = kcu.table_schema
         WHERE tc.constraint_type = 'FOREIGN KEY'
           AND tc.table_schema = 'public'
         ORDER BY tc.table_name, kcu.column_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    for (table, column) in &fk_columns {
        // Check if an index exists on this column
        let has_index: (bool,) = sqlx::query_as(&format!(
            "SELECT EXISTS (
                SELECT 1
                FROM pg_indexes
                WHERE schemaname = 'public'
                  AND tablename = '{table}'
                  AND indexdef LIKE '%({column})%'
            )"
        ))
        .fetch_one(&pool)
        .await
        .unwrap();

        assert!(has_index.0, "FK column {table}.{column} has no index");
    }
}

/// Every foreign key constraint must have explicit ON DELETE and ON UPDATE rules.
///
/// This prevents accidental `NO ACTION` defaults that would silently block
/// parent row deletions instead of cascading or restricting intentionally.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_fks_have_on_delete_and_on_update(pool: PgPool) {
    let fk_rules: Vec<(String, String, String, String)> = sqlx::query_as(
        "SELECT
             rc.constraint_name,
             tc.table_name,
             rc.delete_rule,
             rc.update_rule
         FROM information_schema.referential_constraints rc
         JOIN information_schema.table_constraints tc
             ON rc.constraint_name = tc.constraint_name
             AND rc.constraint_schema = tc.table_schema
         WHERE rc.constraint_schema = 'public'
         ORDER BY tc.table_name, rc.constraint_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(
        !fk_rules.is_empty(),
        "Expected at least one FK constraint in the schema"
    );

    for (constraint, table, delete_rule, update_rule) in &fk_rules {
        assert!(
            delete_rule != "NO ACTION" || update_rule != "NO ACTION",
            "FK {constraint} on {table} has default NO ACTION for both ON DELETE and ON UPDATE; \
             specify an explicit rule (CASCADE, RESTRICT, SET NULL, or SET DEFAULT)"
        );
    }
}

/// Unique constraints carry the `uq_` prefix the API maps to 409.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unique_constraints_are_prefixed(pool: PgPool) {
    let names: Vec<(String,)> = sqlx::query_as(
        "SELECT constraint_name
         FROM information_schema.table_constraints
         WHERE constraint_type = 'UNIQUE'
           AND table_schema = 'public'
         ORDER BY constraint_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    let names: Vec<&str> = names.iter().map(|(n,)| n.as_str()).collect();
    for expected in [
        "uq_game_categories_name",
        "uq_games_name",
        "uq_players_name",
        "uq_users_username",
    ] {
        assert!(names.contains(&expected), "missing constraint {expected}");
    }
    for name in &names {
        assert!(name.starts_with("uq_"), "unique constraint {name} lacks uq_ prefix");
    }
}

/// `updated_at` is bumped by the trigger on every UPDATE.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_updated_at_trigger_fires(pool: PgPool) {
    let (id, created): (i64, chrono::DateTime<chrono::Utc>) = sqlx::query_as(
        "INSERT INTO game_categories (name, updated_at)
         VALUES ('Strategy', NOW() - INTERVAL '1 hour')
         RETURNING id, updated_at",
    )
    .fetch_one(&pool)
    .await
    .unwrap();

    let (updated,): (chrono::DateTime<chrono::Utc>,) = sqlx::query_as(
        "UPDATE game_categories SET name = 'Board' WHERE id = $1 RETURNING updated_at",
    )
    .bind(id)
    .fetch_one(&pool)
    .await
    .unwrap();

    assert!(updated > created);
}
