use sqlx::PgPool;

/// All `id` columns are bigint, except the smallint settings singleton.
#[sqlx::test(migrations = "./migrations")]
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

    assert!(!rows.is_empty());
    for (table, data_type) in &rows {
        let expected = if table == "settings" { "smallint" } else { "bigint" };
        assert_eq!(data_type, expected, "Table {table}.id");
    }
}

/// Unique constraints use the `uq_` prefix so the API can map them to 409.
#[sqlx::test(migrations = "./migrations")]
async fn test_unique_constraints_are_prefixed(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name, constraint_name
         FROM information_schema.table_constraints
         WHERE table_schema = 'public'
           AND constraint_type = 'UNIQUE'",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!rows.is_empty());
    for (table, name) in &rows {
        assert!(name.starts_with("uq_"), "{table}: constraint {name} should start with uq_");
    }
}

/// The `updated_at` trigger overrides whatever the statement writes.
#[sqlx::test(migrations = "./migrations")]
async fn test_updated_at_trigger_fires(pool: PgPool) {
    sqlx::query("UPDATE settings SET updated_at = '2000-01-01T00:00:00Z' WHERE id = 1")
        .execute(&pool)
        .await
        .unwrap();

    let (updated_at,): (chrono::DateTime<chrono::Utc>,) =
        sqlx::query_as("SELECT updated_at FROM settings WHERE id = 1")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert!(updated_at.timestamp() > 946_684_800, "got {updated_at}");
}
