use std::sync::Arc;

use tracing::{debug, info};

use skillswap_db::models::{RequestListingRow, SwapRequestRow};
use skillswap_db::queries::{requests, skills, users};
use skillswap_db::{Connection, Database, now_timestamp};
use skillswap_types::models::{
    Participant, RequestBoard, RequestListing, SwapRequest, SwapStatus, UserId,
};

use crate::avatar::avatar_url;
use crate::sanitize::{MAX_TEXT_LEN, sanitize_text};
use crate::time::parse_timestamp;
use crate::{Error, Result};

/// Lifecycle of a skill-swap request.
///
/// `pending` moves to `accepted` or `rejected` at the receiver's hand; either
/// party may mark a request `completed` at any point. The previous status is
/// not consulted, only who is asking.
#[derive(Clone)]
pub struct SwapRequestLifecycle {
    db: Arc<Database>,
}

impl SwapRequestLifecycle {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub fn create(
        &self,
        sender_id: UserId,
        receiver_id: UserId,
        skill_id: i64,
        message: &str,
    ) -> Result<SwapRequest> {
        if sender_id == receiver_id {
            return Err(Error::SelfRequest);
        }
        let message = sanitize_text(message, MAX_TEXT_LEN)?;
        let now = now_timestamp();

        let id = self.db.with_tx(|conn| {
            for user in [sender_id, receiver_id] {
                if !users::user_exists(conn, user)? {
                    return Err(Error::not_found("user", user));
                }
            }
            if !skills::skill_exists(conn, skill_id)? {
                return Err(Error::not_found("skill", skill_id));
            }
            if requests::find_pending(conn, sender_id, receiver_id, skill_id)?.is_some() {
                return Err(Error::DuplicatePending);
            }

            requests::insert(conn, sender_id, receiver_id, skill_id, &message, &now).map_err(|e| {
                if e.is_unique_violation() {
                    Error::DuplicatePending
                } else {
                    Error::Storage(e)
                }
            })
        })?;

        info!(
            "Swap request {} created: {} -> {} for skill {}",
            id, sender_id, receiver_id, skill_id
        );

        Ok(SwapRequest {
            id,
            sender_id,
            receiver_id,
            skill_id,
            message,
            status: SwapStatus::Pending,
            created_at: parse_timestamp(&now, "new swap request"),
        })
    }

    /// Move a request to `new_status` on behalf of `actor_id`.
    pub fn transition(
        &self,
        request_id: i64,
        actor_id: UserId,
        new_status: SwapStatus,
    ) -> Result<SwapRequest> {
        if new_status == SwapStatus::Pending {
            return Err(Error::InvalidInput(
                "status must be accepted, rejected or completed".into(),
            ));
        }

        let (previous, request) = self.db.with_tx(|conn| {
            let mut request = load(conn, request_id)?;
            authorize(&request, actor_id, new_status)?;

            requests::set_status(conn, request_id, new_status)?;
            let previous = std::mem::replace(&mut request.status, new_status);
            Ok::<_, Error>((previous, request))
        })?;

        if previous.is_terminal() {
            debug!(
                "Swap request {} left terminal status {} for {}",
                request_id, previous, new_status
            );
        }
        info!(
            "Swap request {} {} -> {} by {}",
            request_id, previous, new_status, actor_id
        );
        Ok(request)
    }

    /// Whether a review may reference this request.
    pub fn is_reviewable(&self, request_id: i64) -> Result<bool> {
        let request = self.db.with_conn(|conn| load(conn, request_id))?;
        Ok(request.status.is_reviewable())
    }

    /// Incoming and sent requests of `user_id`, each newest first.
    pub fn list_for_user(&self, user_id: UserId) -> Result<RequestBoard> {
        let (incoming, sent) = self.db.with_conn(|conn| {
            Ok::<_, Error>((
                requests::incoming_for(conn, user_id)?,
                requests::sent_by(conn, user_id)?,
            ))
        })?;

        Ok(RequestBoard {
            incoming: incoming.into_iter().map(to_listing).collect::<Result<_>>()?,
            sent: sent.into_iter().map(to_listing).collect::<Result<_>>()?,
        })
    }
}

fn authorize(request: &SwapRequest, actor_id: UserId, new_status: SwapStatus) -> Result<()> {
    match new_status {
        SwapStatus::Accepted | SwapStatus::Rejected if actor_id != request.receiver_id => Err(
            Error::Forbidden(format!("only the receiver may mark a request {}", new_status)),
        ),
        SwapStatus::Completed if !request.is_party(actor_id) => Err(Error::Forbidden(
            "only the sender or receiver may complete a request".into(),
        )),
        _ => Ok(()),
    }
}

/// Load a request on an open connection, `NotFound` if absent.
pub(crate) fn load(conn: &Connection, request_id: i64) -> Result<SwapRequest> {
    let row = requests::get(conn, request_id)?
        .ok_or_else(|| Error::not_found("swap request", request_id))?;
    to_request(row)
}

fn to_request(row: SwapRequestRow) -> Result<SwapRequest> {
    Ok(SwapRequest {
        status: row.status()?,
        created_at: parse_timestamp(&row.created_at, &format!("swap request {}", row.id)),
        id: row.id,
        sender_id: row.sender_id,
        receiver_id: row.receiver_id,
        skill_id: row.skill_id,
        message: row.message,
    })
}

fn to_listing(row: RequestListingRow) -> Result<RequestListing> {
    Ok(RequestListing {
        status: row.status()?,
        created_at: parse_timestamp(&row.created_at, &format!("swap request {}", row.id)),
        counterpart: Participant {
            id: row.counterpart_id,
            picture: avatar_url(row.counterpart_picture.as_deref(), &row.counterpart_name),
            name: row.counterpart_name,
        },
        id: row.id,
        message: row.message,
        skill_name: row.skill_name,
    })
}
