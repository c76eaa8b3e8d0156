use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use crate::config::Config;
use std::str::FromStr;

pub mod models;
pub mod provider;
mod sqlite;
#[cfg(test)]
pub mod mock;

pub use provider::{Connection, Database, DbError, Param, Row};

pub type DbPool = SqlitePool;

pub async fn init(cfg: &Config) -> Result<DbPool> {
    let db_url = format!("sqlite://{}?mode=rwc", cfg.database.path);

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(
            SqliteConnectOptions::from_str(&db_url)?
                .create_if_missing(true)
                .foreign_keys(true)
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
        )
        .await?;

    migrate(&pool).await?;

    tracing::info!("Database connected: {}", cfg.database.path);
    Ok(pool)
}

/// Apply the bundled schema and reference codes.
pub async fn migrate(pool: &DbPool) -> Result<()> {
    sqlx::migrate!("./src/db/migrations").run(pool).await?;
    Ok(())
}

/// Create default admin user if no users exist yet.
pub async fn seed_admin(pool: &DbPool) -> Result<()> {
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM USERS")
        .fetch_one(pool)
        .await?;

    if count.0 == 0 {
        sqlx::query(
            "INSERT INTO USERS (USERNAME, NAME, EMAIL, PASSWORD, ROLE)
             VALUES ('admin', 'Administrator', 'admin@localhost', 'admin', 'ADMIN')"
        )
        .execute(pool)
        .await?;

        tracing::warn!(
            "Created default admin user (login: admin, password: admin). \
             Change immediately in production!"
        );
    }

    Ok(())
}
