//! Messaging and swap-request services for SkillSwap.
//!
//! Every service holds an `Arc<Database>` handed in at construction and keeps
//! no other state between calls. Each mutating operation runs in a single
//! transaction; validation and authorization happen before any write.

pub mod avatar;
pub mod conversations;
pub mod error;
pub mod messages;
pub mod requests;
pub mod reviews;
pub mod sanitize;
pub mod summaries;

mod time;

use std::sync::Arc;

use skillswap_crypto::MessageCipher;
use skillswap_db::Database;

pub use conversations::ConversationDirectory;
pub use error::{Error, ErrorKind, Result};
pub use messages::MessageStore;
pub use requests::SwapRequestLifecycle;
pub use reviews::ReviewService;
pub use summaries::ConversationSummaryService;

/// All services wired to one store and one cipher.
#[derive(Clone)]
pub struct SkillSwap {
    pub conversations: ConversationDirectory,
    pub messages: MessageStore,
    pub summaries: ConversationSummaryService,
    pub requests: SwapRequestLifecycle,
    pub reviews: ReviewService,
}

impl SkillSwap {
    pub fn new(db: Arc<Database>, cipher: MessageCipher) -> Self {
        Self {
            conversations: ConversationDirectory::new(db.clone()),
            messages: MessageStore::new(db.clone(), cipher.clone()),
            summaries: ConversationSummaryService::new(db.clone(), cipher),
            requests: SwapRequestLifecycle::new(db.clone()),
            reviews: ReviewService::new(db),
        }
    }
}

#[cfg(test)]
mod tests;
