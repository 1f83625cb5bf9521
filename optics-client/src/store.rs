//! Appointment record store
//!
//! `RecordStore` is the only collaborator the appointment view talks to.
//! `AppointmentService` backs it with the `appointments` table;
//! `MemoryStore` keeps rows in process.

use crate::query::{Order, TableQuery};
use crate::{ClientError, ClientResult, TableClient};
use async_trait::async_trait;
use shared::models::{AppointmentCreate, AppointmentRecord, AppointmentUpdate};
use std::sync::Mutex;

pub const APPOINTMENTS_TABLE: &str = "appointments";

/// Remote CRUD interface for appointment rows
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Every appointment row
    async fn fetch_all(&self) -> ClientResult<Vec<AppointmentRecord>>;

    /// Apply `changes` to row `id` and return the stored row
    async fn update(
        &self,
        id: &str,
        changes: &AppointmentUpdate,
    ) -> ClientResult<AppointmentRecord>;

    /// Remove row `id`
    async fn delete(&self, id: &str) -> ClientResult<()>;
}

/// Appointment table access
#[derive(Debug, Clone)]
pub struct AppointmentService {
    table: TableClient,
}

impl AppointmentService {
    pub fn new(table: TableClient) -> Self {
        Self { table }
    }

    fn chronological() -> TableQuery {
        TableQuery::new().order("appointment_datetime", Order::Asc)
    }

    fn single(rows: Vec<AppointmentRecord>, id: &str) -> ClientResult<AppointmentRecord> {
        rows.into_iter()
            .next()
            .ok_or_else(|| ClientError::NotFound(format!("Appointment {}", id)))
    }

    pub async fn get_by_id(&self, id: &str) -> ClientResult<AppointmentRecord> {
        let rows = self
            .table
            .select(APPOINTMENTS_TABLE, &TableQuery::new().eq("id", id).limit(1))
            .await?;
        Self::single(rows, id)
    }

    pub async fn create(&self, appointment: &AppointmentCreate) -> ClientResult<AppointmentRecord> {
        let rows: Vec<AppointmentRecord> = self
            .table
            .insert(APPOINTMENTS_TABLE, std::slice::from_ref(appointment))
            .await?;
        let created = rows
            .into_iter()
            .next()
            .ok_or_else(|| ClientError::InvalidResponse("Insert returned no rows".into()))?;
        tracing::info!(id = %created.id, "Appointment created");
        Ok(created)
    }

    /// Server-side search over first name, last name and email
    pub async fn search(&self, query: &str) -> ClientResult<Vec<AppointmentRecord>> {
        let query = Self::chronological().ilike_any(&["first_name", "last_name", "email"], query);
        self.table.select_lenient(APPOINTMENTS_TABLE, &query).await
    }

    /// Server-side inclusive date range
    pub async fn by_date_range(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> ClientResult<Vec<AppointmentRecord>> {
        let query = Self::chronological()
            .gte("appointment_datetime", start_date)
            .lte("appointment_datetime", end_date);
        self.table.select_lenient(APPOINTMENTS_TABLE, &query).await
    }
}

#[async_trait]
impl RecordStore for AppointmentService {
    async fn fetch_all(&self) -> ClientResult<Vec<AppointmentRecord>> {
        self.table
            .select_lenient(APPOINTMENTS_TABLE, &Self::chronological())
            .await
    }

    async fn update(
        &self,
        id: &str,
        changes: &AppointmentUpdate,
    ) -> ClientResult<AppointmentRecord> {
        let rows = self
            .table
            .update(APPOINTMENTS_TABLE, &TableQuery::new().eq("id", id), changes)
            .await?;
        Self::single(rows, id)
    }

    async fn delete(&self, id: &str) -> ClientResult<()> {
        self.table
            .delete(APPOINTMENTS_TABLE, &TableQuery::new().eq("id", id))
            .await
    }
}

/// In-process store
///
/// `fail_with` makes every following call fail with the given message
/// until `recover` is called.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<AppointmentRecord>>,
    failure: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new(rows: Vec<AppointmentRecord>) -> Self {
        Self {
            rows: Mutex::new(rows),
            failure: Mutex::new(None),
        }
    }

    pub fn fail_with(&self, message: impl Into<String>) {
        *self.failure.lock().unwrap_or_else(|e| e.into_inner()) = Some(message.into());
    }

    pub fn recover(&self) {
        *self.failure.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }

    /// Snapshot of the stored rows
    pub fn rows(&self) -> Vec<AppointmentRecord> {
        self.rows.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn check(&self) -> ClientResult<()> {
        match self.failure.lock().unwrap_or_else(|e| e.into_inner()).as_ref() {
            Some(message) => Err(ClientError::Internal(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn fetch_all(&self) -> ClientResult<Vec<AppointmentRecord>> {
        self.check()?;
        Ok(self.rows())
    }

    async fn update(
        &self,
        id: &str,
        changes: &AppointmentUpdate,
    ) -> ClientResult<AppointmentRecord> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap_or_else(|e| e.into_inner());
        let row = rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| ClientError::NotFound(format!("Appointment {}", id)))?;
        changes.apply_to(row);
        Ok(row.clone())
    }

    async fn delete(&self, id: &str) -> ClientResult<()> {
        self.check()?;
        self.rows
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .retain(|r| r.id != id);
        Ok(())
    }
}
