// core/src/db.rs

//! Connection pool setup and schema migrations.

use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use sqlx::{Sqlite, Transaction};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info, instrument};

use crate::error::StoreResult;

pub type DbPool = SqlitePool;

/// Schema migrations under `core/migrations`, embedded at compile time.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// How long a connection waits on another connection's write lock before giving up.
pub const BUSY_TIMEOUT: Duration = Duration::from_secs(10);

/// Opens a pool on `database_url` (creating the file if needed) and brings the schema up to date.
#[instrument(skip(database_url))]
pub async fn connect(database_url: &str, max_connections: u32) -> StoreResult<DbPool> {
  debug!("Opening SQLite pool with up to {} connections.", max_connections);
  let options = SqliteConnectOptions::from_str(database_url)?
    .create_if_missing(true)
    .foreign_keys(true)
    .journal_mode(SqliteJournalMode::Wal)
    .busy_timeout(BUSY_TIMEOUT);

  let pool = SqlitePoolOptions::new()
    .max_connections(max_connections)
    .connect_with(options)
    .await?;
  info!("Database connection pool established.");

  migrate(&pool).await?;
  Ok(pool)
}

/// A private in-memory database on a single long-lived connection.
///
/// Every connection to `sqlite::memory:` sees its own empty database, so the pool
/// is pinned to one connection that is never recycled. Callers must not hold a
/// transaction while issuing queries on the pool itself.
pub async fn connect_in_memory() -> StoreResult<DbPool> {
  let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
  let pool = SqlitePoolOptions::new()
    .max_connections(1)
    .min_connections(1)
    .idle_timeout(None)
    .max_lifetime(None)
    .connect_with(options)
    .await?;
  migrate(&pool).await?;
  Ok(pool)
}

/// Starts a transaction that takes the database write lock up front.
///
/// A deferred transaction that reads before it writes cannot wait out a
/// concurrent writer: SQLite fails the lock upgrade with `SQLITE_BUSY` straight
/// away. Taking the lock in `BEGIN` lets the busy timeout queue writers instead.
pub(crate) async fn begin_write(pool: &DbPool) -> StoreResult<Transaction<'static, Sqlite>> {
  Ok(pool.begin_with("BEGIN IMMEDIATE").await?)
}

#[instrument(skip(pool))]
pub async fn migrate(pool: &DbPool) -> StoreResult<()> {
  MIGRATOR.run(pool).await?;
  info!("Database schema is up to date.");
  Ok(())
}
