//! Process-wide SQLite connection pool.
//!
//! # Responsibility
//! - Hold a fixed set of bootstrapped connections created once at startup.
//! - Run units of work inside a single transaction: IMMEDIATE for writes,
//!   DEFERRED for reads.
//!
//! # Invariants
//! - Every pooled connection was opened through `open_db`/`open_db_in_memory`.
//! - A checked-out connection is used by exactly one caller at a time.
//! - `with_transaction` commits on `Ok` and rolls back on `Err`; begin and
//!   commit failures surface as `infra_db` errors.

use super::{open_db, open_db_in_memory, DbError, DbResult};
use crate::error::AppResult;
use log::{debug, warn};
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError, TryLockError};

/// Upper bound accepted for `DbPool::open`.
pub const MAX_POOL_SIZE: usize = 32;

/// Fixed-size pool of SQLite connections.
pub struct DbPool {
    slots: Vec<Mutex<Connection>>,
    next: AtomicUsize,
}

impl DbPool {
    /// Opens `size` connections to the database file at `path`.
    ///
    /// Migrations run on the first connection; later ones observe the
    /// already-current schema version.
    pub fn open(path: impl AsRef<Path>, size: usize) -> DbResult<Self> {
        if size == 0 || size > MAX_POOL_SIZE {
            return Err(DbError::InvalidPoolSize(size));
        }

        let path = path.as_ref();
        let mut slots = Vec::with_capacity(size);
        for _ in 0..size {
            slots.push(Mutex::new(open_db(path)?));
        }
        debug!("event=db_pool_open module=db status=ok mode=file size={size}");
        Ok(Self::from_slots(slots))
    }

    /// Opens a single-connection in-memory pool.
    ///
    /// SQLite in-memory connections do not share data, so the pool cannot
    /// grow beyond one connection.
    pub fn in_memory() -> DbResult<Self> {
        Ok(Self::from_connection(open_db_in_memory()?))
    }

    /// Wraps an already-bootstrapped connection in a one-slot pool.
    pub fn from_connection(conn: Connection) -> Self {
        Self::from_slots(vec![Mutex::new(conn)])
    }

    fn from_slots(slots: Vec<Mutex<Connection>>) -> Self {
        Self {
            slots,
            next: AtomicUsize::new(0),
        }
    }

    /// Number of pooled connections.
    pub fn size(&self) -> usize {
        self.slots.len()
    }

    /// Runs `work` inside one IMMEDIATE transaction on a pooled connection.
    ///
    /// The write lock is taken when the transaction begins. The transaction
    /// is committed when `work` returns `Ok` and rolled back when it returns
    /// `Err`; the error from `work` is returned unchanged.
    pub fn with_transaction<T>(
        &self,
        work: impl FnOnce(&Transaction<'_>) -> AppResult<T>,
    ) -> AppResult<T> {
        self.run_transaction(TransactionBehavior::Immediate, work)
    }

    /// Runs read-only `work` inside one DEFERRED transaction.
    ///
    /// No write lock is requested; on WAL databases the read sees one snapshot
    /// and does not wait for an open writer.
    pub fn with_read_transaction<T>(
        &self,
        work: impl FnOnce(&Transaction<'_>) -> AppResult<T>,
    ) -> AppResult<T> {
        self.run_transaction(TransactionBehavior::Deferred, work)
    }

    fn run_transaction<T>(
        &self,
        behavior: TransactionBehavior,
        work: impl FnOnce(&Transaction<'_>) -> AppResult<T>,
    ) -> AppResult<T> {
        let mut conn = self.checkout();
        let tx = conn.transaction_with_behavior(behavior)?;

        match work(&tx) {
            Ok(value) => {
                tx.commit()?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback() {
                    warn!(
                        "event=db_rollback module=db status=error error={}",
                        rollback_err
                    );
                }
                Err(err)
            }
        }
    }

    /// Runs `work` against a pooled connection outside any transaction.
    pub fn with_connection<T>(&self, work: impl FnOnce(&Connection) -> AppResult<T>) -> AppResult<T> {
        let conn = self.checkout();
        work(&conn)
    }

    fn checkout(&self) -> MutexGuard<'_, Connection> {
        for slot in &self.slots {
            match slot.try_lock() {
                Ok(guard) => return guard,
                // A panicked holder leaves the connection itself usable; any
                // open transaction was rolled back when it was dropped.
                Err(TryLockError::Poisoned(poisoned)) => return poisoned.into_inner(),
                Err(TryLockError::WouldBlock) => continue,
            }
        }

        let index = self.next.fetch_add(1, Ordering::Relaxed) % self.slots.len();
        self.slots[index]
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for DbPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbPool")
            .field("size", &self.slots.len())
            .finish_non_exhaustive()
    }
}
