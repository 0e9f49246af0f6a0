//! Worker review submission and aggregates

use super::ApiClient;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Aggregate rating for a worker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewStats {
    #[serde(rename = "averageRating")]
    pub average_rating: f64,
    #[serde(rename = "totalReviews")]
    pub total_reviews: u64,
}

/// A new review to submit
#[derive(Debug, Clone, Serialize)]
pub struct NewReview {
    /// Reviewing user's id
    pub user: i64,
    /// Reviewed worker's id
    pub worker: i64,
    pub rating: u8,
    pub comment: String,
}

impl NewReview {
    /// Ratings are whole stars, 1 through 5
    pub fn validate(&self) -> Result<()> {
        if !(1..=5).contains(&self.rating) {
            return Err(Error::Validation(
                "rating must be between 1 and 5".to_string(),
            ));
        }
        Ok(())
    }
}

/// Fetch rating aggregates for a worker
pub async fn stats(client: &ApiClient, worker_id: i64) -> Result<ReviewStats> {
    client
        .get(&format!("/reviews/stats/{}", worker_id), &[])
        .await
}

/// Submit a review
pub async fn submit(client: &ApiClient, review: &NewReview) -> Result<()> {
    review.validate()?;
    client.post_unit("/reviews/newReview", review).await
}
