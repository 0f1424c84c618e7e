use crate::db::{connect_in_memory, connect_with_config};
use anyhow::Result;
use configs::DatabaseConfig;
use migration::MigratorTrait;
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

#[tokio::test]
async fn test_in_memory_connection_is_migrated() -> Result<()> {
    let db = connect_in_memory().await?;
    assert_eq!(db.get_database_backend(), DatabaseBackend::Sqlite);

    let row = db
        .query_one(Statement::from_string(
            DatabaseBackend::Sqlite,
            "SELECT COUNT(*) AS n FROM sqlite_master WHERE type = 'table' AND name IN ('queue', 'reservation')",
        ))
        .await?
        .expect("count row");
    let n: i64 = row.try_get("", "n")?;
    assert_eq!(n, 2);
    Ok(())
}

#[tokio::test]
async fn test_foreign_keys_enforced() -> Result<()> {
    let db = connect_in_memory().await?;
    let row = db
        .query_one(Statement::from_string(DatabaseBackend::Sqlite, "PRAGMA foreign_keys"))
        .await?
        .expect("pragma row");
    let on: i64 = row.try_get_by_index(0)?;
    assert_eq!(on, 1);
    Ok(())
}

#[tokio::test]
async fn test_migrations_are_reversible() -> Result<()> {
    let db = connect_with_config(&DatabaseConfig::in_memory()).await?;
    migration::Migrator::up(&db, None).await?;
    migration::Migrator::down(&db, None).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(())
}
