use rusqlite::{Connection, OptionalExtension, types::ToSql};

use crate::models::UserRow;
use crate::{Database, Result, now_timestamp};

/// Partial profile update. `None` leaves a column untouched;
/// `profile_picture: Some(None)` clears the picture.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub full_name: Option<String>,
    pub profile_picture: Option<Option<String>>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.profile_picture.is_none()
    }
}

impl Database {
    pub fn create_user(&self, full_name: &str, profile_picture: Option<&str>) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (full_name, profile_picture, created_at) VALUES (?1, ?2, ?3)",
                (full_name, profile_picture, now_timestamp()),
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn get_user(&self, id: i64) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user(conn, id))
    }

    /// Apply `patch` to user `id`. Returns false when nothing was changed
    /// (empty patch or unknown user).
    pub fn update_user(&self, id: i64, patch: &UserPatch) -> Result<bool> {
        if patch.is_empty() {
            return Ok(false);
        }
        self.with_conn(|conn| update_user(conn, id, patch))
    }
}

pub fn query_user(conn: &Connection, id: i64) -> Result<Option<UserRow>> {
    let row = conn
        .query_row(
            "SELECT id, full_name, profile_picture, created_at FROM users WHERE id = ?1",
            [id],
            |row| {
                Ok(UserRow {
                    id: row.get(0)?,
                    full_name: row.get(1)?,
                    profile_picture: row.get(2)?,
                    created_at: row.get(3)?,
                })
            },
        )
        .optional()?;
    Ok(row)
}

pub fn user_exists(conn: &Connection, id: i64) -> Result<bool> {
    let found = conn
        .query_row("SELECT 1 FROM users WHERE id = ?1", [id], |_| Ok(()))
        .optional()?;
    Ok(found.is_some())
}

/// The SET list is assembled from fixed column names only; caller data is
/// always bound as a parameter.
fn update_user(conn: &Connection, id: i64, patch: &UserPatch) -> Result<bool> {
    let mut assignments: Vec<String> = Vec::new();
    let mut values: Vec<&dyn ToSql> = Vec::new();

    if let Some(full_name) = &patch.full_name {
        values.push(full_name);
        assignments.push(format!("full_name = ?{}", values.len()));
    }
    if let Some(picture) = &patch.profile_picture {
        values.push(picture);
        assignments.push(format!("profile_picture = ?{}", values.len()));
    }

    values.push(&id);
    let sql = format!(
        "UPDATE users SET {} WHERE id = ?{}",
        assignments.join(", "),
        values.len()
    );

    let changed = conn.execute(&sql, values.as_slice())?;
    Ok(changed > 0)
}
