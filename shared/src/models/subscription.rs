//! Email Subscription Model

use serde::{Deserialize, Serialize};

/// Subscription row (`emailsubscriptions` table)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailSubscription {
    pub id: i64,
    pub email: String,
}

/// Create subscription payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionCreate {
    pub email: String,
}
