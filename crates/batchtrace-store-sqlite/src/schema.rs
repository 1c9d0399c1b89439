//! SQL schema for the batchtrace SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Batches are strictly append-only.
-- No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS batches (
    batch_id     TEXT PRIMARY KEY,
    product_name TEXT NOT NULL,
    origin       TEXT NOT NULL,
    harvest_date TEXT NOT NULL,   -- ISO 8601 calendar date
    created_at   TEXT NOT NULL    -- RFC 3339 UTC; server-assigned
);

-- Events are strictly append-only as well. Each row is an independent
-- insert keyed by its own generated id; sibling events never reference
-- each other.
CREATE TABLE IF NOT EXISTS events (
    event_id     TEXT PRIMARY KEY,
    batch_id     TEXT NOT NULL REFERENCES batches(batch_id),
    event_type   TEXT NOT NULL,   -- open-ended lifecycle stage label
    description  TEXT NOT NULL,
    location     TEXT NOT NULL,
    timestamp    TEXT NOT NULL,   -- ISO 8601 calendar date; real-world date
    created_at   TEXT NOT NULL,   -- RFC 3339 UTC; server-assigned
    verification TEXT             -- JSON-encoded Verification or NULL
);

CREATE INDEX IF NOT EXISTS events_batch_idx   ON events(batch_id);
CREATE INDEX IF NOT EXISTS events_date_idx    ON events(timestamp);
CREATE INDEX IF NOT EXISTS batches_created_idx ON batches(created_at);

PRAGMA user_version = 1;
";
