use crate::core::broker::DbBroker;
use crate::core::error::{LookupError, NumcheckError};
use crate::core::schemas;
use crate::core::store::NumberStore;
use crate::core::time;
use rusqlite::{Connection, OptionalExtension, params};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_ACTOR: &str = "numcheck";

pub fn db_connect(db_path: &str) -> Result<Connection, NumcheckError> {
    let conn = Connection::open(db_path)?;
    conn.busy_timeout(std::time::Duration::from_secs(5))?;
    conn.query_row("PRAGMA journal_mode=WAL;", [], |_| Ok(()))?;
    Ok(conn)
}

pub fn numbers_db_path(root: &Path) -> PathBuf {
    root.join(schemas::NUMBERS_DB_NAME)
}

pub fn initialize_numbers_db(root: &Path, actor: &str) -> Result<(), NumcheckError> {
    fs::create_dir_all(root)?;

    let broker = DbBroker::new(root);
    broker.with_conn(&numbers_db_path(root), actor, "numbers.init", |conn| {
        conn.execute(schemas::NUMBERS_DB_SCHEMA, [])?;
        Ok(())
    })
}

impl From<NumcheckError> for LookupError {
    fn from(err: NumcheckError) -> Self {
        match err {
            NumcheckError::RusqliteError(e) => LookupError::Sqlite(e),
            other => LookupError::Unavailable(other.to_string()),
        }
    }
}

/// Production [`NumberStore`] backed by `<root>/numbers.db`.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db_path: PathBuf,
    broker: DbBroker,
    actor: String,
}

impl SqliteStore {
    /// Open the store under `root`, creating the directory and schema if needed.
    pub fn open(root: &Path, actor: &str) -> Result<Self, NumcheckError> {
        initialize_numbers_db(root, actor)?;
        Ok(Self {
            db_path: numbers_db_path(root),
            broker: DbBroker::new(root),
            actor: actor.to_string(),
        })
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Insert or replace the value recorded under `id`.
    pub fn put(&self, id: i64, value: i64) -> Result<(), NumcheckError> {
        self.broker
            .with_conn(&self.db_path, &self.actor, "numbers.put", |conn| {
                conn.execute(
                    "INSERT INTO numbers(id, value, updated_at) VALUES(?1, ?2, ?3)
                     ON CONFLICT(id) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                    params![id, value, time::now_epoch_z()],
                )?;
                Ok(())
            })
    }

    /// All rows ordered by id.
    pub fn list(&self) -> Result<Vec<(i64, i64)>, NumcheckError> {
        self.broker
            .with_conn(&self.db_path, &self.actor, "numbers.list", |conn| {
                let mut stmt = conn.prepare("SELECT id, value FROM numbers ORDER BY id")?;
                let rows = stmt
                    .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(rows)
            })
    }
}

impl NumberStore for SqliteStore {
    fn get(&self, id: i64) -> Result<i64, LookupError> {
        self.broker
            .with_conn(&self.db_path, &self.actor, "numbers.get", |conn| {
                conn.query_row("SELECT value FROM numbers WHERE id = ?1", params![id], |row| {
                    row.get(0)
                })
                .optional()?
                .ok_or(LookupError::NotFound(id))
            })
    }
}
