use std::sync::Arc;

use tracing::warn;

use skillswap_crypto::MessageCipher;
use skillswap_db::Database;
use skillswap_db::queries::conversations;
use skillswap_types::models::{ConversationSummary, Participant, UserId};

use crate::Result;
use crate::avatar::avatar_url;
use crate::time::parse_timestamp;

/// Builds the inbox view: one row per conversation with the other
/// participant, a preview of the latest message and the unread count.
#[derive(Clone)]
pub struct ConversationSummaryService {
    db: Arc<Database>,
    cipher: MessageCipher,
}

impl ConversationSummaryService {
    pub fn new(db: Arc<Database>, cipher: MessageCipher) -> Self {
        Self { db, cipher }
    }

    /// Conversations of `user_id`, most recently active first. Previews that
    /// cannot be decrypted show the placeholder instead of failing the list.
    pub fn list_for_user(&self, user_id: UserId) -> Result<Vec<ConversationSummary>> {
        let rows = self
            .db
            .with_conn(|conn| conversations::summaries_for_user(conn, user_id))?;

        let summaries = rows
            .into_iter()
            .map(|row| {
                let last_message_preview = match row.last_message.as_deref() {
                    Some(stored) => {
                        let body = self.cipher.decrypt(stored);
                        if body.is_degraded() {
                            warn!("Preview of conversation {} could not be decrypted", row.id);
                        }
                        body.into_text()
                    }
                    None => String::new(),
                };

                ConversationSummary {
                    conversation_id: row.id,
                    other_participant: Participant {
                        id: row.other_user_id,
                        picture: avatar_url(row.other_profile_picture.as_deref(), &row.other_full_name),
                        name: row.other_full_name,
                    },
                    last_message_preview,
                    last_message_time: row
                        .last_message_time
                        .as_deref()
                        .map(|t| parse_timestamp(t, &format!("conversation {}", row.id))),
                    unread_count: u32::try_from(row.unread_count).unwrap_or(u32::MAX),
                    updated_at: parse_timestamp(&row.updated_at, &format!("conversation {}", row.id)),
                }
            })
            .collect();

        Ok(summaries)
    }
}
