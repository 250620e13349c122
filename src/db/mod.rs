//! SQLite persistence layer for blocker settings and the blocklist.
//!
//! Uses `rusqlite` with bundled SQLite. Handles:
//! - The blocker-enabled flag and PIN digest (key-value `settings` table)
//! - The ordered blocklist of normalized domains (`blocked_sites` table)
//!
//! Absent keys fall back to defaults (enabled, no PIN, empty list), so a
//! fresh database behaves like a first install without an init step.

mod blocklist;

use std::path::Path;
use std::sync::Mutex;

use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};

use crate::config;

/// Setting key for the blocker-enabled flag.
const KEY_BLOCKER_ENABLED: &str = "blocker_enabled";

/// Setting key for the stored PIN digest.
const KEY_HASHED_PIN: &str = "hashed_pin";

/// Manages the SQLite database holding all persisted blocker state.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open or create the database at the given path.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS settings (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS blocked_sites (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                domain TEXT NOT NULL UNIQUE COLLATE NOCASE
            );
            ",
        )?;

        // Enable WAL mode for better concurrent read performance.
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Whether the blocker is enabled. Absent flag defaults to enabled.
    pub fn blocker_enabled(&self) -> Result<bool> {
        match self.get_setting(KEY_BLOCKER_ENABLED)? {
            Some(value) => Ok(value == "1"),
            None => Ok(config::DEFAULT_BLOCKER_ENABLED),
        }
    }

    /// Persist the blocker-enabled flag.
    pub fn set_blocker_enabled(&self, enabled: bool) -> Result<()> {
        self.put_setting(KEY_BLOCKER_ENABLED, if enabled { "1" } else { "0" })
    }

    /// The stored PIN digest, or `None` when no PIN has been configured.
    pub fn pin_digest(&self) -> Result<Option<String>> {
        self.get_setting(KEY_HASHED_PIN)
    }

    /// Persist a new PIN digest.
    pub fn set_pin_digest(&self, digest: &str) -> Result<()> {
        self.put_setting(KEY_HASHED_PIN, digest)
    }

    /// Persist a gating transition's effect in a single transaction, so a
    /// first-time PIN setup never lands without its enabled flag.
    pub fn apply_gate_effect(&self, enabled: bool, new_pin_digest: Option<&str>) -> Result<()> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;
        if let Some(digest) = new_pin_digest {
            tx.execute(
                "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
                params![KEY_HASHED_PIN, digest],
            )?;
        }
        tx.execute(
            "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
            params![KEY_BLOCKER_ENABLED, if enabled { "1" } else { "0" }],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn.lock().unwrap();
        let value = conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn put_setting(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}
