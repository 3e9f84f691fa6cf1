use rusqlite::{Connection, OptionalExtension};

use crate::{Database, Result, now_timestamp};

impl Database {
    /// Register a skill name. The catalog itself is managed elsewhere; swap
    /// requests only need the row to exist.
    pub fn create_skill(&self, name: &str) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO skills (name, created_at) VALUES (?1, ?2)",
                (name, now_timestamp()),
            )?;
            Ok(conn.last_insert_rowid())
        })
    }
}

pub fn skill_exists(conn: &Connection, id: i64) -> Result<bool> {
    let found = conn
        .query_row("SELECT 1 FROM skills WHERE id = ?1", [id], |_| Ok(()))
        .optional()?;
    Ok(found.is_some())
}
