use std::sync::Arc;

use tracing::debug;

use skillswap_db::queries::{conversations, users};
use skillswap_db::{Connection, Database, now_timestamp};
use skillswap_types::models::{Conversation, UserId};

use crate::time::parse_timestamp;
use crate::{Error, Result};

/// Maps an unordered pair of users to their single conversation.
#[derive(Clone)]
pub struct ConversationDirectory {
    db: Arc<Database>,
}

impl ConversationDirectory {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Return the conversation between `user_a` and `user_b`, creating it on
    /// first contact. Symmetric in its arguments; bumps `updated_at`.
    pub fn resolve_or_create(&self, user_a: UserId, user_b: UserId) -> Result<i64> {
        self.db
            .with_tx(|conn| resolve_in(conn, user_a, user_b, &now_timestamp()))
    }

    /// Fetch a conversation the caller takes part in. Non-participants get
    /// `NotFound`, same as for a missing id.
    pub fn get(&self, conversation_id: i64, user_id: UserId) -> Result<Conversation> {
        let row = self
            .db
            .with_conn(|conn| conversations::get_for_participant(conn, conversation_id, user_id))?
            .ok_or_else(|| Error::not_found("conversation", conversation_id))?;

        Ok(Conversation {
            id: row.id,
            participant_a: row.participant_a,
            participant_b: row.participant_b,
            updated_at: parse_timestamp(&row.updated_at, "conversation"),
        })
    }
}

/// Order a pair low-first, rejecting self-conversations.
pub(crate) fn normalize_pair(user_a: UserId, user_b: UserId) -> Result<(UserId, UserId)> {
    if user_a == user_b {
        return Err(Error::InvalidParticipants);
    }
    Ok((user_a.min(user_b), user_a.max(user_b)))
}

/// Resolve-or-create on an open transaction, so callers can chain further
/// writes (the first message) into the same commit.
pub(crate) fn resolve_in(conn: &Connection, user_a: UserId, user_b: UserId, now: &str) -> Result<i64> {
    let (low, high) = normalize_pair(user_a, user_b)?;

    for user in [low, high] {
        if !users::user_exists(conn, user)? {
            return Err(Error::not_found("user", user));
        }
    }

    let id = conversations::upsert_pair(conn, low, high, now)?;
    debug!("Resolved conversation {} for pair ({}, {})", id, low, high);
    Ok(id)
}
