//! SQLite storage bootstrap, migrations and connection pooling.
//!
//! # Responsibility
//! - Open and configure SQLite connections for jotter core.
//! - Apply schema migrations in deterministic order.
//! - Own the process-wide connection pool and its transaction scope.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - No connection is handed to repositories before migrations succeed.
//! - A transaction belongs to exactly one request and is committed or rolled
//!   back before `DbPool::with_transaction` returns.

use crate::error::AppError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;
mod pool;

pub use open::{open_db, open_db_in_memory};
pub use pool::{DbPool, MAX_POOL_SIZE};

pub type DbResult<T> = Result<T, DbError>;

/// Storage bootstrap failure.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    InvalidPoolSize(usize),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::InvalidPoolSize(size) => write!(
                f,
                "connection pool size {size} is outside 1..={MAX_POOL_SIZE}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } | Self::InvalidPoolSize(_) => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<DbError> for AppError {
    fn from(value: DbError) -> Self {
        AppError::infra_db("DB_ERROR", Some(Box::new(value)))
    }
}
