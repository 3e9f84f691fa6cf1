use std::sync::Arc;

use tracing::info;

use skillswap_db::Database;
use skillswap_db::queries::reviews::{self, NewReview};
use skillswap_types::models::{Participant, Review, ReviewListing, ReviewStats, UserId, UserReviews};

use crate::avatar::avatar_url;
use crate::requests::load;
use crate::sanitize::{MAX_TEXT_LEN, sanitize_text};
use crate::time::parse_timestamp;
use crate::{Error, Result};

/// Reviews left after a completed swap, one per party per request.
#[derive(Clone)]
pub struct ReviewService {
    db: Arc<Database>,
}

impl ReviewService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Review the other party of `request_id`. The request must be completed
    /// and `reviewer_id` must be its sender or receiver.
    pub fn create(
        &self,
        reviewer_id: UserId,
        request_id: i64,
        rating: i64,
        comment: &str,
    ) -> Result<Review> {
        let rating = u8::try_from(rating)
            .ok()
            .filter(|r| (1..=5).contains(r))
            .ok_or_else(|| Error::InvalidInput("rating must be between 1 and 5".into()))?;
        let comment = sanitize_text(comment, MAX_TEXT_LEN)?;
        let now = skillswap_db::now_timestamp();

        let (id, reviewed_id) = self.db.with_tx(|conn| {
            let request = load(conn, request_id)?;
            if !request.status.is_reviewable() {
                return Err(Error::NotCompleted(request_id));
            }
            let reviewed_id = request.counterpart(reviewer_id).ok_or_else(|| {
                Error::Forbidden("only a party to the swap may review it".into())
            })?;
            if reviews::exists(conn, request_id, reviewer_id)? {
                return Err(Error::DuplicateReview(request_id));
            }

            let review = NewReview {
                reviewer_id,
                reviewed_id,
                request_id,
                rating,
                comment: &comment,
            };
            let id = reviews::insert(conn, &review, &now).map_err(|e| {
                if e.is_unique_violation() {
                    Error::DuplicateReview(request_id)
                } else {
                    Error::Storage(e)
                }
            })?;
            Ok((id, reviewed_id))
        })?;

        info!(
            "Review {} submitted by {} for request {} ({} stars)",
            id, reviewer_id, request_id, rating
        );

        Ok(Review {
            id,
            reviewer_id,
            reviewed_id,
            request_id,
            rating,
            comment,
            created_at: parse_timestamp(&now, "new review"),
        })
    }

    /// Reviews `user_id` has received, newest first, with the average rating.
    pub fn list_for_user(&self, user_id: UserId) -> Result<UserReviews> {
        let (rows, stats) = self.db.with_conn(|conn| {
            Ok::<_, Error>((
                reviews::received_by(conn, user_id)?,
                reviews::stats_for(conn, user_id)?,
            ))
        })?;

        let reviews = rows
            .into_iter()
            .map(|row| ReviewListing {
                id: row.id,
                rating: u8::try_from(row.rating).unwrap_or_default(),
                created_at: parse_timestamp(&row.created_at, &format!("review {}", row.id)),
                comment: row.comment,
                reviewer: Participant {
                    id: row.reviewer_id,
                    picture: avatar_url(row.reviewer_picture.as_deref(), &row.reviewer_name),
                    name: row.reviewer_name,
                },
            })
            .collect();

        Ok(UserReviews {
            reviews,
            stats: ReviewStats {
                average: round_one_decimal(stats.average.unwrap_or(0.0)),
                count: u32::try_from(stats.count).unwrap_or(u32::MAX),
            },
        })
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
