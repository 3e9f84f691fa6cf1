use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

/// Users are owned by the profile collaborator; the core only ever sees ids.
pub type UserId = i64;

// -- Conversations --

/// A durable pairing of two users. The pair is stored normalized
/// (`participant_a < participant_b`) so lookups are order-independent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: i64,
    pub participant_a: UserId,
    pub participant_b: UserId,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    pub fn has_participant(&self, user_id: UserId) -> bool {
        self.participant_a == user_id || self.participant_b == user_id
    }

    /// The participant that is not `user_id`.
    pub fn other_participant(&self, user_id: UserId) -> UserId {
        if self.participant_a == user_id {
            self.participant_b
        } else {
            self.participant_a
        }
    }
}

/// A message as seen by one participant, content already decrypted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub conversation_id: i64,
    pub sender_id: UserId,
    pub content: String,
    /// True when `content` is the unavailable placeholder rather than the
    /// stored text.
    pub degraded: bool,
    pub created_at: DateTime<Utc>,
    pub is_read: bool,
    pub is_me: bool,
}

/// Public face of a user inside list views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub id: UserId,
    pub name: String,
    pub picture: String,
}

/// One row of a user's inbox.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub conversation_id: i64,
    pub other_participant: Participant,
    pub last_message_preview: String,
    pub last_message_time: Option<DateTime<Utc>>,
    pub unread_count: u32,
    pub updated_at: DateTime<Utc>,
}

// -- Swap requests --

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SwapStatus {
    Pending,
    Accepted,
    Rejected,
    Completed,
}

impl SwapStatus {
    /// The stored and wire spelling.
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// No further lifecycle work is expected once a request lands here.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Rejected | Self::Completed)
    }

    /// Only completed swaps may be reviewed.
    pub fn is_reviewable(self) -> bool {
        self == Self::Completed
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapRequest {
    pub id: i64,
    pub sender_id: UserId,
    pub receiver_id: UserId,
    pub skill_id: i64,
    pub message: String,
    pub status: SwapStatus,
    pub created_at: DateTime<Utc>,
}

impl SwapRequest {
    pub fn is_party(&self, user_id: UserId) -> bool {
        self.sender_id == user_id || self.receiver_id == user_id
    }

    /// The other party of the request, if `user_id` is one of them.
    pub fn counterpart(&self, user_id: UserId) -> Option<UserId> {
        if self.sender_id == user_id {
            Some(self.receiver_id)
        } else if self.receiver_id == user_id {
            Some(self.sender_id)
        } else {
            None
        }
    }
}

/// A request as listed on one user's board, joined with the other party and
/// the skill name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestListing {
    pub id: i64,
    pub status: SwapStatus,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub counterpart: Participant,
    pub skill_name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestBoard {
    pub incoming: Vec<RequestListing>,
    pub sent: Vec<RequestListing>,
}

// -- Reviews --

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    pub reviewer_id: UserId,
    pub reviewed_id: UserId,
    pub request_id: i64,
    pub rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewListing {
    pub id: i64,
    pub rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub reviewer: Participant,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewStats {
    /// Mean rating rounded to one decimal; 0.0 when there are no reviews.
    pub average: f64,
    pub count: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserReviews {
    pub reviews: Vec<ReviewListing>,
    pub stats: ReviewStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_string_mapping() {
        assert_eq!(SwapStatus::Completed.as_str(), "completed");
        assert_eq!(SwapStatus::Accepted.to_string(), "accepted");
        assert_eq!("accepted".parse::<SwapStatus>().unwrap(), SwapStatus::Accepted);
        assert!("archived".parse::<SwapStatus>().is_err());
    }

    #[test]
    fn only_completed_is_reviewable() {
        assert!(SwapStatus::Completed.is_reviewable());
        assert!(!SwapStatus::Rejected.is_reviewable());
        assert!(SwapStatus::Rejected.is_terminal());
        assert!(!SwapStatus::Accepted.is_terminal());
    }
}
