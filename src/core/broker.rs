use crate::core::db;
use crate::core::error::NumcheckError;
use crate::core::schemas;
use crate::core::time;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Single entry point for database access.
/// Every operation is serialized in-process and recorded in the audit log.
#[derive(Debug, Clone)]
pub struct DbBroker {
    audit_log_path: PathBuf,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BrokerEvent {
    pub ts: String,
    pub event_id: String,
    pub actor: String,
    pub op: String,
    pub db_id: String,
    pub status: String,
}

impl DbBroker {
    pub fn new(root: &Path) -> Self {
        Self {
            audit_log_path: root.join(schemas::AUDIT_LOG_NAME),
        }
    }

    /// Execute a closure with a serialized connection to the specified DB.
    pub fn with_conn<F, R, E>(
        &self,
        db_path: &Path,
        actor: &str,
        op_name: &str,
        f: F,
    ) -> Result<R, E>
    where
        F: FnOnce(&Connection) -> Result<R, E>,
        E: From<NumcheckError>,
    {
        static DB_LOCK: Mutex<()> = Mutex::new(());
        let _lock = DB_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        let db_id = db_path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let result = db::db_connect(&db_path.to_string_lossy())
            .map_err(E::from)
            .and_then(|conn| f(&conn));

        // The operation's own outcome wins over a failed audit write.
        let status = if result.is_ok() { "success" } else { "error" };
        if let Err(e) = self.log_event(actor, op_name, &db_id, status) {
            eprintln!(
                "warning: {} not recorded in {}: {}",
                op_name,
                self.audit_log_path.display(),
                e
            );
        }

        result
    }

    fn log_event(
        &self,
        actor: &str,
        op: &str,
        db_id: &str,
        status: &str,
    ) -> Result<(), NumcheckError> {
        let ev = BrokerEvent {
            ts: time::now_epoch_z(),
            event_id: time::new_event_id(),
            actor: actor.to_string(),
            op: op.to_string(),
            db_id: db_id.to_string(),
            status: status.to_string(),
        };
        let line = serde_json::to_string(&ev)
            .map_err(|e| NumcheckError::Audit(e.to_string()))?;

        let mut f = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.audit_log_path)?;
        writeln!(f, "{}", line)?;
        Ok(())
    }
}

/// Read back the audit log under `root`. A missing log reads as empty.
pub fn read_events(root: &Path) -> Result<Vec<BrokerEvent>, NumcheckError> {
    let path = root.join(schemas::AUDIT_LOG_NAME);
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(&path)?;
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            serde_json::from_str(line).map_err(|e| {
                NumcheckError::Audit(format!(
                    "corrupt audit line in {}: {}",
                    path.display(),
                    e
                ))
            })
        })
        .collect()
}
