//! Table REST client

use crate::query::TableQuery;
use crate::{ClientError, ClientResult, HttpClient};
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

const REST_PREFIX: &str = "rest/v1";
const RETURN_REPRESENTATION: &str = "return=representation";
const RETURN_MINIMAL: &str = "return=minimal";

/// CRUD access to the backend's tables
#[derive(Debug, Clone)]
pub struct TableClient {
    http: HttpClient,
}

impl TableClient {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    fn path(table: &str) -> String {
        format!("{}/{}", REST_PREFIX, table)
    }

    /// Read rows
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &TableQuery,
    ) -> ClientResult<Vec<T>> {
        tracing::debug!(table = %table, "select");
        let request = self
            .http
            .request(Method::GET, &Self::path(table))
            .query(&query.to_pairs());
        self.http.send(request).await
    }

    /// Read rows, skipping any that do not decode as `T`
    pub async fn select_lenient<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &TableQuery,
    ) -> ClientResult<Vec<T>> {
        let raw: Vec<serde_json::Value> = self.select(table, query).await?;
        let rows = raw
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| match serde_json::from_value(value) {
                Ok(row) => Some(row),
                Err(e) => {
                    tracing::warn!(table = %table, index, error = %e, "Skipping malformed row");
                    None
                }
            })
            .collect();
        Ok(rows)
    }

    /// Insert rows and return them as stored
    pub async fn insert<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        table: &str,
        rows: &[B],
    ) -> ClientResult<Vec<T>> {
        tracing::debug!(table = %table, rows = rows.len(), "insert");
        let request = self
            .http
            .request(Method::POST, &Self::path(table))
            .header("Prefer", RETURN_REPRESENTATION)
            .json(rows);
        self.http.send(request).await
    }

    /// Insert rows without reading them back
    pub async fn insert_minimal<B: Serialize + Sync>(
        &self,
        table: &str,
        rows: &[B],
    ) -> ClientResult<()> {
        tracing::debug!(table = %table, rows = rows.len(), "insert");
        let request = self
            .http
            .request(Method::POST, &Self::path(table))
            .header("Prefer", RETURN_MINIMAL)
            .json(rows);
        self.http.send_empty(request).await
    }

    /// Update the rows matched by `filter` and return them
    pub async fn update<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        table: &str,
        filter: &TableQuery,
        changes: &B,
    ) -> ClientResult<Vec<T>> {
        Self::require_filter(table, filter)?;
        tracing::debug!(table = %table, "update");
        let request = self
            .http
            .request(Method::PATCH, &Self::path(table))
            .header("Prefer", RETURN_REPRESENTATION)
            .query(&filter.to_filter_pairs())
            .json(changes);
        self.http.send(request).await
    }

    /// Delete the rows matched by `filter`
    pub async fn delete(&self, table: &str, filter: &TableQuery) -> ClientResult<()> {
        Self::require_filter(table, filter)?;
        tracing::debug!(table = %table, "delete");
        let request = self
            .http
            .request(Method::DELETE, &Self::path(table))
            .query(&filter.to_filter_pairs());
        self.http.send_empty(request).await
    }

    /// A missing filter would touch every row in the table.
    fn require_filter(table: &str, filter: &TableQuery) -> ClientResult<()> {
        if filter.has_conditions() {
            Ok(())
        } else {
            Err(ClientError::Validation(format!(
                "Refusing unfiltered write on {}",
                table
            )))
        }
    }
}
