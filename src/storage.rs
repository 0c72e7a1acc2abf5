// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, params};
use std::fs;
use std::path::{Path, PathBuf};

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.alphavelocity", "Spendlog", "spendlog"));

/// Storage key for the serialized category collection.
pub const KEY_CATEGORIES: &str = "expense-tracker-categories";
/// Storage key for the serialized account collection.
pub const KEY_ACCOUNTS: &str = "expense-tracker-accounts";
/// Storage key for the serialized transaction collection.
pub const KEY_TRANSACTIONS: &str = "expense-tracker-transactions";

pub fn data_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("spendlog.sqlite"))
}

/// Durable key-value storage: a single SQLite file holding whole-collection
/// JSON strings under fixed keys. Every write replaces the complete value
/// for its key; the persisted form is never a diff.
pub struct Storage {
    conn: Connection,
}

impl Storage {
    pub fn open_default() -> Result<Self> {
        Self::open(data_path()?)
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)
            .with_context(|| format!("Open data store at {}", path.display()))?;
        init_schema(&conn)?;
        Ok(Storage { conn })
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Open in-memory data store")?;
        init_schema(&conn)?;
        Ok(Storage { conn })
    }

    pub fn get(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key=?1", params![key], |r| {
                r.get(0)
            })
            .optional()
    }

    pub fn put(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT INTO kv(key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value",
            params![key, value],
        )?;
        Ok(())
    }
}

fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS kv(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );
    "#,
    )?;
    Ok(())
}
