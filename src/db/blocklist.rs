//! Blocklist table CRUD operations.
//!
//! Domains are stored already normalized (see `core::domain`); this layer
//! only guarantees insertion order and case-insensitive uniqueness.

use anyhow::Result;
use rusqlite::params;

use super::Database;

impl Database {
    /// Add a normalized domain to the blocklist.
    ///
    /// Returns `false` when the domain is already present (compared
    /// case-insensitively); the list is left unchanged in that case.
    pub fn add_domain(&self, domain: &str) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let inserted = conn.execute(
            "INSERT OR IGNORE INTO blocked_sites (domain) VALUES (?1)",
            params![domain],
        )?;
        Ok(inserted > 0)
    }

    /// Remove a domain from the blocklist. Returns `false` when absent.
    pub fn remove_domain(&self, domain: &str) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let removed = conn.execute(
            "DELETE FROM blocked_sites WHERE domain = ?1 COLLATE NOCASE",
            params![domain],
        )?;
        Ok(removed > 0)
    }

    /// All blocked domains in insertion order.
    pub fn blocked_domains(&self) -> Result<Vec<String>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare_cached("SELECT domain FROM blocked_sites ORDER BY id")?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        let mut results = Vec::new();
        for row in rows {
            results.push(row?);
        }
        Ok(results)
    }
}
