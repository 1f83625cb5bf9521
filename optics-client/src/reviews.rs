//! Customer reviews screen

use crate::query::{Order, TableQuery};
use crate::{ClientResult, TableClient};
use shared::models::Review;

pub const REVIEWS_TABLE: &str = "reviews";
pub const EMPTY_MESSAGE: &str = "No reviews yet.";

const REVIEW_COLUMNS: [&str; 5] = ["id", "name", "rating", "review_description", "created_at"];

/// Newest-first review list
#[derive(Debug, Clone)]
pub struct ReviewList {
    table: TableClient,
    reviews: Vec<Review>,
}

impl ReviewList {
    pub fn new(table: TableClient) -> Self {
        Self {
            table,
            reviews: Vec::new(),
        }
    }

    /// A failed fetch leaves the list empty.
    pub async fn load(&mut self) -> ClientResult<&[Review]> {
        let query = TableQuery::new()
            .select(&REVIEW_COLUMNS)
            .order("created_at", Order::Desc);
        match self.table.select(REVIEWS_TABLE, &query).await {
            Ok(reviews) => {
                self.reviews = reviews;
                tracing::debug!(count = self.reviews.len(), "Reviews loaded");
                Ok(&self.reviews)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch reviews");
                self.reviews.clear();
                Err(e)
            }
        }
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    /// Mean rating, `None` without reviews
    pub fn average_rating(&self) -> Option<f64> {
        if self.reviews.is_empty() {
            return None;
        }
        let total: i64 = self.reviews.iter().map(|r| r.stars() as i64).sum();
        Some(total as f64 / self.reviews.len() as f64)
    }
}
