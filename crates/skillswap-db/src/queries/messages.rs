use rusqlite::Connection;

use crate::Result;
use crate::models::MessageRow;

pub fn insert(
    conn: &Connection,
    conversation_id: i64,
    sender_id: i64,
    content: &str,
    now: &str,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO messages (conversation_id, sender_id, content, is_read, created_at)
         VALUES (?1, ?2, ?3, 0, ?4)",
        rusqlite::params![conversation_id, sender_id, content, now],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Mark everything the other participant sent as read by `reader_id`.
/// Returns the number of messages that flipped.
pub fn mark_read(conn: &Connection, conversation_id: i64, reader_id: i64) -> Result<usize> {
    let changed = conn.execute(
        "UPDATE messages SET is_read = 1
         WHERE conversation_id = ?1 AND sender_id != ?2 AND is_read = 0",
        [conversation_id, reader_id],
    )?;
    Ok(changed)
}

/// Full history of a conversation, oldest first; `id` breaks timestamp ties.
pub fn list(conn: &Connection, conversation_id: i64) -> Result<Vec<MessageRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, conversation_id, sender_id, content, is_read, created_at
         FROM messages
         WHERE conversation_id = ?1
         ORDER BY created_at ASC, id ASC",
    )?;

    let rows = stmt
        .query_map([conversation_id], |row| {
            Ok(MessageRow {
                id: row.get(0)?,
                conversation_id: row.get(1)?,
                sender_id: row.get(2)?,
                content: row.get(3)?,
                is_read: row.get(4)?,
                created_at: row.get(5)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// Every stored body with its id, for offline audits of the whole table.
pub fn all_contents(conn: &Connection) -> Result<Vec<(i64, String)>> {
    let mut stmt = conn.prepare("SELECT id, content FROM messages ORDER BY id")?;
    let rows = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}
