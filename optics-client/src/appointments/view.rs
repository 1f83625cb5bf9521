//! Appointment list state
//!
//! Holds the cached rows and the active filter, and relays edit and delete
//! intents to the store. The cache changes only after the store reports
//! success.

use super::filter::{AppointmentFilter, StatusFilter, filter_and_sort};
use crate::error::{MutationAction, ViewError};
use crate::store::RecordStore;
use chrono::{Local, NaiveDate};
use shared::models::{AppointmentRecord, AppointmentUpdate};

pub const UPDATED_NOTICE: &str = "Appointment updated successfully!";
pub const DELETED_NOTICE: &str = "Appointment deleted.";

/// Outcome banner of the last mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Success(m) | Notice::Error(m) => m,
        }
    }
}

pub struct AppointmentView<S: RecordStore> {
    store: S,
    records: Vec<AppointmentRecord>,
    filter: AppointmentFilter,
    load_error: Option<ViewError>,
    notice: Option<Notice>,
}

impl<S: RecordStore> AppointmentView<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            records: Vec::new(),
            filter: AppointmentFilter::default(),
            load_error: None,
            notice: None,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Replace the cache with every row from the store.
    ///
    /// On failure no partial data is kept.
    pub async fn load(&mut self) -> Result<usize, ViewError> {
        let result = self.store.fetch_all().await;
        match result {
            Ok(records) => {
                tracing::debug!(count = records.len(), "Appointments loaded");
                self.records = records;
                self.load_error = None;
                Ok(self.records.len())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch appointments");
                let err = ViewError::fetch(&e);
                self.records.clear();
                self.load_error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Rows to display, evaluated against the current local date
    pub fn visible(&self) -> Vec<AppointmentRecord> {
        self.visible_on(Local::now().date_naive())
    }

    pub fn visible_on(&self, today: NaiveDate) -> Vec<AppointmentRecord> {
        filter_and_sort(&self.records, &self.filter, today)
    }

    /// Cached rows in store order
    pub fn records(&self) -> &[AppointmentRecord] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&AppointmentRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn filter(&self) -> &AppointmentFilter {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: AppointmentFilter) {
        self.filter = filter;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filter.search = search.into();
    }

    pub fn set_date_range(&mut self, start_date: impl Into<String>, end_date: impl Into<String>) {
        self.filter.start_date = start_date.into();
        self.filter.end_date = end_date.into();
    }

    /// Raw select value, e.g. `"all"` or `"confirmed"`
    pub fn set_status(&mut self, status: &str) {
        self.filter.status = StatusFilter::parse(status);
    }

    pub fn reset_filters(&mut self) {
        self.filter = AppointmentFilter::default();
    }

    pub fn load_error(&self) -> Option<&ViewError> {
        self.load_error.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    /// Save an edited record and replace the cached copy with the stored row.
    pub async fn apply_edit(
        &mut self,
        updated: &AppointmentRecord,
    ) -> Result<AppointmentRecord, ViewError> {
        let changes = AppointmentUpdate::from(updated);
        let result = self.store.update(&updated.id, &changes).await;
        match result {
            Ok(stored) => {
                match self.records.iter_mut().find(|r| r.id == stored.id) {
                    Some(slot) => *slot = stored.clone(),
                    None => {
                        tracing::debug!(id = %stored.id, "Edited appointment not cached")
                    }
                }
                tracing::info!(id = %stored.id, "Appointment updated");
                self.notice = Some(Notice::Success(UPDATED_NOTICE.to_string()));
                Ok(stored)
            }
            Err(e) => Err(self.mutation_failed(MutationAction::Update, &updated.id, e)),
        }
    }

    /// Delete a record and drop it from the cache.
    pub async fn apply_delete(&mut self, id: &str) -> Result<(), ViewError> {
        let result = self.store.delete(id).await;
        match result {
            Ok(()) => {
                self.records.retain(|r| r.id != id);
                tracing::info!(id = %id, "Appointment deleted");
                self.notice = Some(Notice::Success(DELETED_NOTICE.to_string()));
                Ok(())
            }
            Err(e) => Err(self.mutation_failed(MutationAction::Delete, id, e)),
        }
    }

    fn mutation_failed(
        &mut self,
        action: MutationAction,
        id: &str,
        e: crate::ClientError,
    ) -> ViewError {
        tracing::warn!(id = %id, action = ?action, error = %e, "Appointment mutation failed");
        let err = ViewError::mutation(action, &e);
        self.notice = Some(Notice::Error(err.user_message().to_string()));
        err
    }
}
