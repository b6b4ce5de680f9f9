//! SQL schema for the Roster SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE ... IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- rowid order doubles as insertion order for list queries.
CREATE TABLE IF NOT EXISTS users (
    id         TEXT PRIMARY KEY,            -- 24-char hex ObjectId
    name       TEXT NOT NULL,
    email      TEXT NOT NULL UNIQUE,
    age        INTEGER CHECK (age IS NULL OR age >= 0),
    is_active  INTEGER NOT NULL DEFAULT 1
);

CREATE INDEX IF NOT EXISTS users_active_idx ON users(is_active);

PRAGMA user_version = 1;
";
