//! Database schema definitions for the numbers store.

pub const NUMBERS_DB_NAME: &str = "numbers.db";

pub const NUMBERS_DB_SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS numbers (
        id INTEGER PRIMARY KEY,
        value INTEGER NOT NULL,
        updated_at TEXT NOT NULL
    )
";

pub const AUDIT_LOG_NAME: &str = "broker.events.jsonl";
