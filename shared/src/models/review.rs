//! Customer Review Model

use serde::{Deserialize, Serialize};

/// Review row (`reviews` table), written by customers on the public site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub name: String,
    /// Star rating as submitted, 1..=5 in practice
    pub rating: i32,
    pub review_description: String,
    /// ISO 8601 timestamp
    pub created_at: String,
}

impl Review {
    pub const MAX_STARS: usize = 5;

    /// Number of stars to draw, clamped to `0..=5`.
    pub fn stars(&self) -> usize {
        self.rating.clamp(0, Self::MAX_STARS as i32) as usize
    }

    /// Calendar date part of `created_at`, or the raw value when it has none.
    pub fn created_date(&self) -> &str {
        self.created_at
            .split_once('T')
            .map(|(date, _)| date)
            .unwrap_or(&self.created_at)
    }
}
