#![cfg(test)]
use configs::DatabaseConfig;
use sea_orm::DatabaseConnection;
use tempfile::TempDir;

/// Fresh migrated in-memory database per test; tests never share state.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    models::db::connect_in_memory().await
}

/// Migrated database file with the default pool, so transactions really run on
/// separate connections. Keep the returned directory alive for the test's duration.
pub async fn get_file_db() -> Result<(TempDir, DatabaseConnection), anyhow::Error> {
    let dir = TempDir::new()?;
    let cfg = DatabaseConfig {
        url: format!("sqlite://{}?mode=rwc", dir.path().join("cola.db").display()),
        ..DatabaseConfig::default()
    };
    let db = models::db::connect_and_migrate(&cfg).await?;
    Ok((dir, db))
}
