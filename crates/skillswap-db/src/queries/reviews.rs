use rusqlite::{Connection, OptionalExtension};

use crate::Result;
use crate::models::{ReviewListingRow, ReviewStatsRow};

pub struct NewReview<'a> {
    pub reviewer_id: i64,
    pub reviewed_id: i64,
    pub request_id: i64,
    pub rating: u8,
    pub comment: &'a str,
}

pub fn insert(conn: &Connection, review: &NewReview<'_>, now: &str) -> Result<i64> {
    conn.execute(
        "INSERT INTO reviews (reviewer_id, reviewed_id, request_id, rating, comment, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        rusqlite::params![
            review.reviewer_id,
            review.reviewed_id,
            review.request_id,
            review.rating,
            review.comment,
            now
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn exists(conn: &Connection, request_id: i64, reviewer_id: i64) -> Result<bool> {
    let found = conn
        .query_row(
            "SELECT 1 FROM reviews WHERE request_id = ?1 AND reviewer_id = ?2",
            [request_id, reviewer_id],
            |_| Ok(()),
        )
        .optional()?;
    Ok(found.is_some())
}

/// Reviews `user_id` has received, newest first, with reviewer details.
pub fn received_by(conn: &Connection, user_id: i64) -> Result<Vec<ReviewListingRow>> {
    let mut stmt = conn.prepare(
        "SELECT r.id, r.rating, r.comment, r.created_at,
                u.id, u.full_name, u.profile_picture
         FROM reviews r
         JOIN users u ON r.reviewer_id = u.id
         WHERE r.reviewed_id = ?1
         ORDER BY r.created_at DESC, r.id DESC",
    )?;
    let rows = stmt
        .query_map([user_id], |row| {
            Ok(ReviewListingRow {
                id: row.get(0)?,
                rating: row.get(1)?,
                comment: row.get(2)?,
                created_at: row.get(3)?,
                reviewer_id: row.get(4)?,
                reviewer_name: row.get(5)?,
                reviewer_picture: row.get(6)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn stats_for(conn: &Connection, user_id: i64) -> Result<ReviewStatsRow> {
    let stats = conn.query_row(
        "SELECT AVG(rating), COUNT(*) FROM reviews WHERE reviewed_id = ?1",
        [user_id],
        |row| {
            Ok(ReviewStatsRow {
                average: row.get(0)?,
                count: row.get(1)?,
            })
        },
    )?;
    Ok(stats)
}
