//! Email subscriptions screen

use crate::query::TableQuery;
use crate::validation::{INVALID_EMAIL, is_valid_email};
use crate::{ClientResult, TableClient};
use shared::models::{EmailSubscription, SubscriptionCreate};

pub const SUBSCRIPTIONS_TABLE: &str = "emailsubscriptions";
pub const ADD_FAILED: &str = "Failed to add email. It may already exist.";

/// Why `add` did not subscribe an address
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubscribeError {
    #[error("{}", INVALID_EMAIL)]
    Invalid,
    #[error("{}", ADD_FAILED)]
    Insert,
}

#[derive(Debug, Clone)]
pub struct SubscriptionList {
    table: TableClient,
    subscriptions: Vec<EmailSubscription>,
    error: Option<SubscribeError>,
}

impl SubscriptionList {
    pub fn new(table: TableClient) -> Self {
        Self {
            table,
            subscriptions: Vec::new(),
            error: None,
        }
    }

    /// On failure the previous list is kept.
    pub async fn load(&mut self) -> ClientResult<&[EmailSubscription]> {
        match self.table.select(SUBSCRIPTIONS_TABLE, &TableQuery::new()).await {
            Ok(rows) => {
                self.subscriptions = rows;
                tracing::debug!(count = self.subscriptions.len(), "Subscriptions loaded");
                Ok(&self.subscriptions)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch subscriptions");
                Err(e)
            }
        }
    }

    /// Subscribe `email`. Blank input does nothing and returns `Ok(0)`;
    /// otherwise the number of rows appended.
    pub async fn add(&mut self, email: &str) -> Result<usize, SubscribeError> {
        let email = email.trim();
        if email.is_empty() {
            return Ok(0);
        }
        if !is_valid_email(email) {
            self.error = Some(SubscribeError::Invalid);
            return Err(SubscribeError::Invalid);
        }

        let payload = SubscriptionCreate {
            email: email.to_string(),
        };
        match self
            .table
            .insert::<EmailSubscription, _>(SUBSCRIPTIONS_TABLE, &[payload])
            .await
        {
            Ok(rows) => {
                let added = rows.len();
                self.subscriptions.extend(rows);
                self.error = None;
                tracing::info!(added, "Email subscribed");
                Ok(added)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to add subscription");
                self.error = Some(SubscribeError::Insert);
                Err(SubscribeError::Insert)
            }
        }
    }

    pub fn subscriptions(&self) -> &[EmailSubscription] {
        &self.subscriptions
    }

    /// The last failed `add`, cleared by the next success
    pub fn error(&self) -> Option<SubscribeError> {
        self.error
    }
}
