//! Row-level access to the REST table endpoint

use crate::client::{error_for_status, handle_response, Transport};
use crate::error::{BackendError, Result};
use crate::types::{CountRow, Order};
use reqwest::header;
use serde::{de::DeserializeOwned, Serialize};

const REST_PATH: &str = "rest/v1";

/// Select / insert / update / delete against named tables
#[derive(Clone)]
pub struct TableClient {
    transport: Transport,
}

impl TableClient {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    fn table_url(&self, table: &str) -> String {
        self.transport
            .url(&format!("{}/{}", REST_PATH, urlencoding::encode(table)))
    }

    async fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        let schema = &self.transport.config().schema;
        let request = self
            .transport
            .http()
            .request(method, url)
            .header("Accept-Profile", schema.as_str())
            .header("Content-Profile", schema.as_str());
        self.transport.authorize(request).await
    }

    /// Fetch every visible row, ordered
    pub async fn select_ordered<T: DeserializeOwned>(&self, table: &str, order: &Order) -> Result<Vec<T>> {
        let url = self.table_url(table);
        let response = self
            .request(reqwest::Method::GET, &url)
            .await
            .query(&[("select", "*".to_string()), ("order", order.to_query())])
            .send()
            .await?;

        let rows: Vec<T> = handle_response(response).await?;
        tracing::debug!(table, rows = rows.len(), "Selected rows");
        Ok(rows)
    }

    /// Count visible rows; doubles as a connectivity probe
    pub async fn count(&self, table: &str) -> Result<u64> {
        let url = self.table_url(table);
        let response = self
            .request(reqwest::Method::GET, &url)
            .await
            .query(&[("select", "count")])
            .send()
            .await?;

        let rows: Vec<CountRow> = handle_response(response).await?;
        Ok(rows.first().map(|row| row.count).unwrap_or(0))
    }

    /// Insert one row and return the stored representation
    pub async fn insert_one<B, T>(&self, table: &str, row: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.table_url(table);
        let response = self
            .request(reqwest::Method::POST, &url)
            .await
            .header(header::CONTENT_TYPE, "application/json")
            .header("Prefer", "return=representation")
            .json(&[row])
            .send()
            .await?;

        let mut rows: Vec<T> = handle_response(response).await?;
        if rows.is_empty() {
            return Err(BackendError::InvalidResponse(format!(
                "insert into {} returned no rows",
                table
            )));
        }
        Ok(rows.swap_remove(0))
    }

    /// Patch the row with the given id.
    ///
    /// Returns the affected rows; an unknown id yields an empty vector, not an error.
    pub async fn update_by_id<P, T>(&self, table: &str, id: &str, patch: &P) -> Result<Vec<T>>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.table_url(table);
        let response = self
            .request(reqwest::Method::PATCH, &url)
            .await
            .query(&[("id", format!("eq.{}", id))])
            .header(header::CONTENT_TYPE, "application/json")
            .header("Prefer", "return=representation")
            .json(patch)
            .send()
            .await?;

        let rows: Vec<T> = handle_response(response).await?;
        tracing::debug!(table, id, affected = rows.len(), "Updated rows");
        Ok(rows)
    }

    /// Delete the row with the given id
    pub async fn delete_by_id(&self, table: &str, id: &str) -> Result<()> {
        let url = self.table_url(table);
        let response = self
            .request(reqwest::Method::DELETE, &url)
            .await
            .query(&[("id", format!("eq.{}", id))])
            .send()
            .await?;

        error_for_status(response).await?;
        Ok(())
    }
}
