//! SQL schema for the SQLite quote store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    user_id     TEXT PRIMARY KEY,
    external_id TEXT NOT NULL UNIQUE,  -- auth-provider subject id
    email       TEXT,
    created_at  TEXT NOT NULL
);

-- Reference data below is provisioned out-of-band and never mutated by
-- request paths.
CREATE TABLE IF NOT EXISTS authors (
    author_id TEXT PRIMARY KEY,
    name      TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS categories (
    category_id TEXT PRIMARY KEY,
    name        TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS quotes (
    quote_id    TEXT PRIMARY KEY,
    text        TEXT NOT NULL,
    author_id   TEXT NOT NULL REFERENCES authors(author_id),
    category_id TEXT REFERENCES categories(category_id)
);

-- The only mutable core state. Like-counts are always derived from this
-- table at read time; no counter column exists to drift.
CREATE TABLE IF NOT EXISTS favorites (
    favorite_id TEXT PRIMARY KEY,
    user_id     TEXT NOT NULL REFERENCES users(user_id),
    quote_id    TEXT NOT NULL REFERENCES quotes(quote_id),
    created_at  TEXT,
    UNIQUE (user_id, quote_id)
);

CREATE INDEX IF NOT EXISTS favorites_user_idx  ON favorites(user_id);
CREATE INDEX IF NOT EXISTS favorites_quote_idx ON favorites(quote_id);
CREATE INDEX IF NOT EXISTS quotes_author_idx   ON quotes(author_id);

PRAGMA user_version = 1;
";
