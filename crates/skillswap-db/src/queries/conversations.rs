use rusqlite::{Connection, OptionalExtension, Row};

use crate::Result;
use crate::models::{ConversationRow, ConversationSummaryRow};

const CONVERSATION_COLUMNS: &str = "id, participant_a, participant_b, created_at, updated_at";

/// Resolve the conversation for a normalized pair (`low < high`), creating it
/// if absent. A single upsert statement, so concurrent callers on separate
/// connections still end up with one row. Bumps `updated_at` either way.
pub fn upsert_pair(conn: &Connection, low: i64, high: i64, now: &str) -> Result<i64> {
    let id = conn.query_row(
        "INSERT INTO conversations (participant_a, participant_b, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?3)
         ON CONFLICT (participant_a, participant_b)
         DO UPDATE SET updated_at = excluded.updated_at
         RETURNING id",
        rusqlite::params![low, high, now],
        |row| row.get(0),
    )?;
    Ok(id)
}

pub fn get(conn: &Connection, id: i64) -> Result<Option<ConversationRow>> {
    let sql = format!("SELECT {CONVERSATION_COLUMNS} FROM conversations WHERE id = ?1");
    let row = conn.query_row(&sql, [id], map_conversation).optional()?;
    Ok(row)
}

/// Fetch a conversation only if `user_id` is one of its participants.
pub fn get_for_participant(
    conn: &Connection,
    id: i64,
    user_id: i64,
) -> Result<Option<ConversationRow>> {
    let sql = format!(
        "SELECT {CONVERSATION_COLUMNS} FROM conversations
         WHERE id = ?1 AND (participant_a = ?2 OR participant_b = ?2)"
    );
    let row = conn
        .query_row(&sql, [id, user_id], map_conversation)
        .optional()?;
    Ok(row)
}

pub fn touch(conn: &Connection, id: i64, now: &str) -> Result<()> {
    conn.execute(
        "UPDATE conversations SET updated_at = ?2 WHERE id = ?1",
        rusqlite::params![id, now],
    )?;
    Ok(())
}

/// Inbox rows for `user_id`, most recently active first. Latest message and
/// unread count are computed per conversation in the same query.
pub fn summaries_for_user(conn: &Connection, user_id: i64) -> Result<Vec<ConversationSummaryRow>> {
    let mut stmt = conn.prepare(
        "SELECT c.id, c.updated_at, u.id, u.full_name, u.profile_picture,
                (SELECT m.content FROM messages m
                  WHERE m.conversation_id = c.id
                  ORDER BY m.created_at DESC, m.id DESC LIMIT 1),
                (SELECT m.created_at FROM messages m
                  WHERE m.conversation_id = c.id
                  ORDER BY m.created_at DESC, m.id DESC LIMIT 1),
                (SELECT COUNT(*) FROM messages m
                  WHERE m.conversation_id = c.id AND m.sender_id != ?1 AND m.is_read = 0)
         FROM conversations c
         JOIN users u
           ON u.id = CASE WHEN c.participant_a = ?1 THEN c.participant_b ELSE c.participant_a END
         WHERE c.participant_a = ?1 OR c.participant_b = ?1
         ORDER BY c.updated_at DESC, c.id DESC",
    )?;

    let rows = stmt
        .query_map([user_id], |row| {
            Ok(ConversationSummaryRow {
                id: row.get(0)?,
                updated_at: row.get(1)?,
                other_user_id: row.get(2)?,
                other_full_name: row.get(3)?,
                other_profile_picture: row.get(4)?,
                last_message: row.get(5)?,
                last_message_time: row.get(6)?,
                unread_count: row.get(7)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn map_conversation(row: &Row<'_>) -> rusqlite::Result<ConversationRow> {
    Ok(ConversationRow {
        id: row.get(0)?,
        participant_a: row.get(1)?,
        participant_b: row.get(2)?,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
    })
}
