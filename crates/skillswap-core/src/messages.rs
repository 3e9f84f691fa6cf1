use std::sync::Arc;

use tracing::{debug, info, warn};

use skillswap_crypto::MessageCipher;
use skillswap_db::models::MessageRow;
use skillswap_db::queries::{conversations, messages};
use skillswap_db::{Database, now_timestamp};
use skillswap_types::models::{Message, UserId};

use crate::conversations::resolve_in;
use crate::time::parse_timestamp;
use crate::{Error, Result};

/// Appends encrypted messages to conversations and reads them back.
#[derive(Clone)]
pub struct MessageStore {
    db: Arc<Database>,
    cipher: MessageCipher,
}

impl MessageStore {
    pub fn new(db: Arc<Database>, cipher: MessageCipher) -> Self {
        Self { db, cipher }
    }

    /// Send `plaintext` from `sender_id` to `receiver_id`, opening their
    /// conversation if this is the first message. Conversation and message
    /// are committed together.
    pub fn send(&self, sender_id: UserId, receiver_id: UserId, plaintext: &str) -> Result<Message> {
        require_content(plaintext)?;
        let stored = self.seal(plaintext)?;
        let now = now_timestamp();

        let (conversation_id, id) = self.db.with_tx(|conn| {
            let conversation_id = resolve_in(conn, sender_id, receiver_id, &now)?;
            let id = messages::insert(conn, conversation_id, sender_id, &stored, &now)?;
            Ok::<_, Error>((conversation_id, id))
        })?;

        info!(
            "Message {} sent by {} in conversation {}",
            id, sender_id, conversation_id
        );
        Ok(echo(id, conversation_id, sender_id, plaintext, &now))
    }

    /// Append to an existing conversation. The sender must be one of its
    /// participants. Returns the record with the caller's plaintext.
    pub fn append(&self, conversation_id: i64, sender_id: UserId, plaintext: &str) -> Result<Message> {
        require_content(plaintext)?;
        let stored = self.seal(plaintext)?;
        let now = now_timestamp();

        let id = self.db.with_tx(|conn| {
            let conversation = conversations::get(conn, conversation_id)?
                .ok_or_else(|| Error::not_found("conversation", conversation_id))?;
            if conversation.participant_a != sender_id && conversation.participant_b != sender_id {
                return Err(Error::Unauthorized(sender_id));
            }

            let id = messages::insert(conn, conversation_id, sender_id, &stored, &now)?;
            conversations::touch(conn, conversation_id, &now)?;
            Ok(id)
        })?;

        debug!("Message {} appended to conversation {}", id, conversation_id);
        Ok(echo(id, conversation_id, sender_id, plaintext, &now))
    }

    /// Full history of a conversation as seen by `user_id`, oldest first.
    /// Opening it marks the other participant's messages as read.
    pub fn list(&self, conversation_id: i64, user_id: UserId) -> Result<Vec<Message>> {
        self.db
            .with_conn(|conn| conversations::get_for_participant(conn, conversation_id, user_id))?
            .ok_or_else(|| Error::not_found("conversation", conversation_id))?;

        // A failed read receipt must not hide the history.
        match self
            .db
            .with_tx(|conn| messages::mark_read(conn, conversation_id, user_id))
        {
            Ok(0) => {}
            Ok(n) => debug!(
                "Marked {} messages read in conversation {} for {}",
                n, conversation_id, user_id
            ),
            Err(e) => warn!(
                "Failed to mark conversation {} read for {}: {}",
                conversation_id, user_id, e
            ),
        }

        let rows = self
            .db
            .with_conn(|conn| messages::list(conn, conversation_id))?;

        let listed: Vec<Message> = rows.into_iter().map(|row| self.open(row, user_id)).collect();

        let degraded = listed.iter().filter(|m| m.degraded).count();
        if degraded > 0 {
            warn!(
                "{} of {} messages in conversation {} could not be decrypted with the active key",
                degraded,
                listed.len(),
                conversation_id
            );
        }

        Ok(listed)
    }

    fn seal(&self, plaintext: &str) -> Result<String> {
        self.cipher
            .encrypt(plaintext)
            .map_err(|e| Error::Encryption(e.to_string()))
    }

    fn open(&self, row: MessageRow, viewer: UserId) -> Message {
        let body = self.cipher.decrypt(&row.content);
        Message {
            id: row.id,
            conversation_id: row.conversation_id,
            sender_id: row.sender_id,
            degraded: body.is_degraded(),
            content: body.into_text(),
            created_at: parse_timestamp(&row.created_at, &format!("message {}", row.id)),
            is_read: row.is_read,
            is_me: row.sender_id == viewer,
        }
    }
}

fn require_content(plaintext: &str) -> Result<()> {
    if plaintext.trim().is_empty() {
        return Err(Error::InvalidInput("message content is required".into()));
    }
    Ok(())
}

fn echo(id: i64, conversation_id: i64, sender_id: UserId, plaintext: &str, now: &str) -> Message {
    Message {
        id,
        conversation_id,
        sender_id,
        content: plaintext.to_string(),
        degraded: false,
        created_at: parse_timestamp(now, "new message"),
        is_read: false,
        is_me: true,
    }
}
