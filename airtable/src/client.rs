use crate::types::{Record, RecordPage};
use reqwest::StatusCode;
use url::Url;

/// Root of the Airtable REST API. Tests point the client at a local
/// stand-in via [`Client::with_api_root`].
pub const API_ROOT: &str = "https://api.airtable.com/v0";

#[derive(thiserror::Error, Debug)]
pub enum AirtableError {
    #[error("airtable responded with {status}: {body}")]
    Upstream { status: StatusCode, body: String },
    #[error("request to airtable failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("invalid airtable URL: {0}")]
    InvalidUrl(String),
}

/// Client for one table of one Airtable base.
///
/// Exposes the two operations the service needs: listing the records of
/// the table and deleting a single record by id. Deletion is permanent;
/// the upstream offers no undo. Listing reads only the first page the
/// upstream returns, no paging.
pub struct Client {
    http: reqwest::Client,
    credential: String,
    table_url: Url,
}

impl Client {
    pub fn new(credential: &str, base: &str, table: &str) -> Result<Self, AirtableError> {
        Self::with_api_root(API_ROOT, credential, base, table)
    }

    pub fn with_api_root(
        root: &str,
        credential: &str,
        base: &str,
        table: &str,
    ) -> Result<Self, AirtableError> {
        let mut table_url = Url::parse(root.trim_end_matches('/'))
            .map_err(|e| AirtableError::InvalidUrl(e.to_string()))?;

        // `push` percent-encodes, so table names with spaces or slashes
        // land in the path correctly.
        table_url
            .path_segments_mut()
            .map_err(|_| AirtableError::InvalidUrl(format!("not a base URL: {root}")))?
            .push(base)
            .push(table);

        Ok(Client {
            http: reqwest::Client::new(),
            credential: credential.to_string(),
            table_url,
        })
    }

    /// Fetch the records of the table, in the order the upstream returns
    /// them. May be empty.
    pub async fn list_records(&self) -> Result<Vec<Record>, AirtableError> {
        let response = self
            .http
            .get(self.table_url.clone())
            .bearer_auth(&self.credential)
            .send()
            .await?;

        let page: RecordPage = Self::check(response).await?.json().await?;

        tracing::debug!(count = page.records.len(), "listed records");

        Ok(page.records)
    }

    /// Delete one record by id. Success carries no payload.
    pub async fn delete_record(&self, id: &str) -> Result<(), AirtableError> {
        let response = self
            .http
            .delete(self.record_url(id)?)
            .bearer_auth(&self.credential)
            .send()
            .await?;

        Self::check(response).await?;

        Ok(())
    }

    fn record_url(&self, id: &str) -> Result<Url, AirtableError> {
        let mut url = self.table_url.clone();
        url.path_segments_mut()
            .map_err(|_| AirtableError::InvalidUrl(self.table_url.to_string()))?
            .push(id);
        Ok(url)
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, AirtableError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        // Keep whatever the upstream said; callers surface it to their own
        // callers. An unreadable body collapses to an empty string.
        let body = response.text().await.unwrap_or_default();
        Err(AirtableError::Upstream { status, body })
    }
}
