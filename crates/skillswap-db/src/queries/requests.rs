use rusqlite::{Connection, OptionalExtension};
use skillswap_types::models::SwapStatus;

use crate::Result;
use crate::models::{RequestListingRow, SwapRequestRow};

pub fn insert(
    conn: &Connection,
    sender_id: i64,
    receiver_id: i64,
    skill_id: i64,
    message: &str,
    now: &str,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO swap_requests (sender_id, receiver_id, skill_id, message, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        rusqlite::params![
            sender_id,
            receiver_id,
            skill_id,
            message,
            SwapStatus::Pending.as_str(),
            now
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get(conn: &Connection, id: i64) -> Result<Option<SwapRequestRow>> {
    let row = conn
        .query_row(
            "SELECT id, sender_id, receiver_id, skill_id, message, status, created_at
             FROM swap_requests WHERE id = ?1",
            [id],
            |row| {
                Ok(SwapRequestRow {
                    id: row.get(0)?,
                    sender_id: row.get(1)?,
                    receiver_id: row.get(2)?,
                    skill_id: row.get(3)?,
                    message: row.get(4)?,
                    status: row.get(5)?,
                    created_at: row.get(6)?,
                })
            },
        )
        .optional()?;
    Ok(row)
}

pub fn find_pending(
    conn: &Connection,
    sender_id: i64,
    receiver_id: i64,
    skill_id: i64,
) -> Result<Option<i64>> {
    let id = conn
        .query_row(
            "SELECT id FROM swap_requests
             WHERE sender_id = ?1 AND receiver_id = ?2 AND skill_id = ?3 AND status = 'pending'",
            [sender_id, receiver_id, skill_id],
            |row| row.get(0),
        )
        .optional()?;
    Ok(id)
}

pub fn set_status(conn: &Connection, id: i64, status: SwapStatus) -> Result<()> {
    conn.execute(
        "UPDATE swap_requests SET status = ?2 WHERE id = ?1",
        rusqlite::params![id, status.as_str()],
    )?;
    Ok(())
}

/// Requests others sent to `user_id`, newest first.
pub fn incoming_for(conn: &Connection, user_id: i64) -> Result<Vec<RequestListingRow>> {
    query_listings(
        conn,
        "SELECT r.id, r.status, r.message, r.created_at,
                u.id, u.full_name, u.profile_picture, s.name
         FROM swap_requests r
         JOIN users u ON r.sender_id = u.id
         JOIN skills s ON r.skill_id = s.id
         WHERE r.receiver_id = ?1
         ORDER BY r.created_at DESC, r.id DESC",
        user_id,
    )
}

/// Requests `user_id` sent to others, newest first.
pub fn sent_by(conn: &Connection, user_id: i64) -> Result<Vec<RequestListingRow>> {
    query_listings(
        conn,
        "SELECT r.id, r.status, r.message, r.created_at,
                u.id, u.full_name, u.profile_picture, s.name
         FROM swap_requests r
         JOIN users u ON r.receiver_id = u.id
         JOIN skills s ON r.skill_id = s.id
         WHERE r.sender_id = ?1
         ORDER BY r.created_at DESC, r.id DESC",
        user_id,
    )
}

fn query_listings(conn: &Connection, sql: &str, user_id: i64) -> Result<Vec<RequestListingRow>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([user_id], |row| {
            Ok(RequestListingRow {
                id: row.get(0)?,
                status: row.get(1)?,
                message: row.get(2)?,
                created_at: row.get(3)?,
                counterpart_id: row.get(4)?,
                counterpart_name: row.get(5)?,
                counterpart_picture: row.get(6)?,
                skill_name: row.get(7)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}
