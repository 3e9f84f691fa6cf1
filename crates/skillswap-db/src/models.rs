//! Database row types: these map directly to SQLite rows.
//! Distinct from skillswap-types models to keep the DB layer independent.

use skillswap_types::models::SwapStatus;

use crate::{Error, Result};

pub struct UserRow {
    pub id: i64,
    pub full_name: String,
    pub profile_picture: Option<String>,
    pub created_at: String,
}

pub struct ConversationRow {
    pub id: i64,
    pub participant_a: i64,
    pub participant_b: i64,
    pub created_at: String,
    pub updated_at: String,
}

pub struct MessageRow {
    pub id: i64,
    pub conversation_id: i64,
    pub sender_id: i64,
    /// Stored body: ciphertext, or plaintext for legacy rows.
    pub content: String,
    pub is_read: bool,
    pub created_at: String,
}

/// One inbox entry: the conversation joined with the other participant and
/// its latest message.
pub struct ConversationSummaryRow {
    pub id: i64,
    pub updated_at: String,
    pub other_user_id: i64,
    pub other_full_name: String,
    pub other_profile_picture: Option<String>,
    pub last_message: Option<String>,
    pub last_message_time: Option<String>,
    pub unread_count: i64,
}

pub struct SwapRequestRow {
    pub id: i64,
    pub sender_id: i64,
    pub receiver_id: i64,
    pub skill_id: i64,
    pub message: String,
    pub status: String,
    pub created_at: String,
}

impl SwapRequestRow {
    pub fn status(&self) -> Result<SwapStatus> {
        parse_status(self.id, &self.status)
    }
}

pub struct RequestListingRow {
    pub id: i64,
    pub status: String,
    pub message: String,
    pub created_at: String,
    pub counterpart_id: i64,
    pub counterpart_name: String,
    pub counterpart_picture: Option<String>,
    pub skill_name: String,
}

impl RequestListingRow {
    pub fn status(&self) -> Result<SwapStatus> {
        parse_status(self.id, &self.status)
    }
}

pub struct ReviewListingRow {
    pub id: i64,
    pub rating: i64,
    pub comment: String,
    pub created_at: String,
    pub reviewer_id: i64,
    pub reviewer_name: String,
    pub reviewer_picture: Option<String>,
}

pub struct ReviewStatsRow {
    pub average: Option<f64>,
    pub count: i64,
}

fn parse_status(request_id: i64, raw: &str) -> Result<SwapStatus> {
    raw.parse()
        .map_err(|_| Error::Corrupt(format!("swap request {} has status '{}'", request_id, raw)))
}
