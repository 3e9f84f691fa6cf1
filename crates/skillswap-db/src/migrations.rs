use rusqlite::Connection;
use tracing::info;

use crate::Result;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);")?;

    let version = current_version(conn)?;

    if version < 1 {
        info!("Running migration v1 (initial schema)");
        conn.execute_batch(
            "
            BEGIN;

            CREATE TABLE users (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                full_name       TEXT NOT NULL,
                profile_picture TEXT,
                created_at      TEXT NOT NULL
            );

            CREATE TABLE skills (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                name        TEXT NOT NULL UNIQUE,
                created_at  TEXT NOT NULL
            );

            -- One row per unordered pair, stored low id first.
            CREATE TABLE conversations (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                participant_a   INTEGER NOT NULL REFERENCES users(id),
                participant_b   INTEGER NOT NULL REFERENCES users(id),
                created_at      TEXT NOT NULL,
                updated_at      TEXT NOT NULL,
                CHECK (participant_a < participant_b),
                UNIQUE (participant_a, participant_b)
            );

            CREATE INDEX idx_conversations_participant_b
                ON conversations(participant_b);

            -- Append-only; only is_read ever changes.
            CREATE TABLE messages (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                conversation_id INTEGER NOT NULL REFERENCES conversations(id),
                sender_id       INTEGER NOT NULL REFERENCES users(id),
                content         TEXT NOT NULL,
                is_read         INTEGER NOT NULL DEFAULT 0,
                created_at      TEXT NOT NULL
            );

            CREATE INDEX idx_messages_conversation
                ON messages(conversation_id, created_at, id);

            CREATE TABLE swap_requests (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                sender_id   INTEGER NOT NULL REFERENCES users(id),
                receiver_id INTEGER NOT NULL REFERENCES users(id),
                skill_id    INTEGER NOT NULL REFERENCES skills(id),
                message     TEXT NOT NULL DEFAULT '',
                status      TEXT NOT NULL DEFAULT 'pending'
                    CHECK (status IN ('pending', 'accepted', 'rejected', 'completed')),
                created_at  TEXT NOT NULL,
                CHECK (sender_id != receiver_id)
            );

            CREATE UNIQUE INDEX idx_swap_requests_one_pending
                ON swap_requests(sender_id, receiver_id, skill_id)
                WHERE status = 'pending';

            CREATE INDEX idx_swap_requests_receiver
                ON swap_requests(receiver_id, created_at);

            CREATE TABLE reviews (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                reviewer_id INTEGER NOT NULL REFERENCES users(id),
                reviewed_id INTEGER NOT NULL REFERENCES users(id),
                request_id  INTEGER NOT NULL REFERENCES swap_requests(id),
                rating      INTEGER NOT NULL CHECK (rating BETWEEN 1 AND 5),
                comment     TEXT NOT NULL DEFAULT '',
                created_at  TEXT NOT NULL,
                UNIQUE (request_id, reviewer_id)
            );

            CREATE INDEX idx_reviews_reviewed
                ON reviews(reviewed_id, created_at);

            INSERT INTO schema_version (version) VALUES (1);

            COMMIT;
            ",
        )?;
    }

    info!("Database migrations complete (schema v{})", current_version(conn)?);
    Ok(())
}

pub fn current_version(conn: &Connection) -> Result<i64> {
    let version = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |r| r.get(0),
    )?;
    Ok(version)
}
