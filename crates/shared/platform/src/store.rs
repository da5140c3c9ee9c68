//! Record store client for the platform's REST table API.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use common::{AppError, AppResult, PlatformConfig};

use crate::query::Query;
use crate::token::AccessToken;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Error code the store returns when a single-row read matched nothing.
pub const NO_ROWS_CODE: &str = "PGRST116";

/// Codes reported when the addressed table or view does not exist.
const MISSING_RELATION_CODES: &[&str] = &["42P01", "PGRST205"];

const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Generic row store. Rows travel as JSON; typed decoding happens in the
/// repositories.
///
/// A single-row read that matches nothing fails with [`AppError::NotFound`];
/// a missing table or view fails with [`AppError::Unavailable`]. Other read
/// failures, bare 404s included, are [`AppError::Backend`]; rejected writes
/// are [`AppError::WriteFailed`].
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Rows matching the query
    async fn select(&self, query: &Query) -> AppResult<Vec<Value>>;

    /// Exactly one row matching the query
    async fn select_single(&self, query: &Query) -> AppResult<Value>;

    async fn insert(&self, table: &str, row: Value) -> AppResult<()>;

    /// Apply `patch` to every row the query's filters select
    async fn update(&self, query: &Query, patch: Value) -> AppResult<()>;

    /// Delete every row the query's filters select
    async fn delete(&self, query: &Query) -> AppResult<()>;
}

/// Error body returned by the REST API
#[derive(Debug, Default, Deserialize)]
struct StoreErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// HTTP implementation of [`RecordStore`].
pub struct RestStore {
    client: Client,
    base_url: String,
    anon_key: String,
    token: AccessToken,
}

impl RestStore {
    pub fn new(client: Client, config: &PlatformConfig, token: AccessToken) -> Self {
        Self {
            client,
            base_url: config.rest_url(),
            anon_key: config.anon_key.clone(),
            token,
        }
    }

    fn url(&self, table: &str) -> String {
        format!("{}/{}", self.base_url, table)
    }

    /// Attach the anon key and the caller's bearer token (anon key when signed out)
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let bearer = self.token.get().unwrap_or_else(|| self.anon_key.clone());
        request
            .header("apikey", &self.anon_key)
            .bearer_auth(bearer)
    }

    async fn read_failure(response: Response) -> AppError {
        let status = response.status();
        let body = error_body(response).await;
        match body.code.as_deref() {
            Some(NO_ROWS_CODE) => AppError::NotFound,
            Some(code) if MISSING_RELATION_CODES.contains(&code) => {
                AppError::unavailable(describe(status, &body))
            }
            _ => AppError::backend(describe(status, &body)),
        }
    }

    async fn write_failure(response: Response) -> AppError {
        let status = response.status();
        let body = error_body(response).await;
        match body.code.as_deref() {
            Some(code) if MISSING_RELATION_CODES.contains(&code) => {
                AppError::unavailable(describe(status, &body))
            }
            _ => AppError::write_failed(describe(status, &body)),
        }
    }

    async fn send_write(&self, request: RequestBuilder) -> AppResult<()> {
        let response = self
            .authorize(request)
            .header("Prefer", "return=minimal")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::write_failure(response).await);
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for RestStore {
    async fn select(&self, query: &Query) -> AppResult<Vec<Value>> {
        debug!(table = query.table(), "Selecting rows");
        let response = self
            .authorize(self.client.get(self.url(query.table())))
            .query(&query.select_params())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::read_failure(response).await);
        }
        Ok(response.json().await?)
    }

    async fn select_single(&self, query: &Query) -> AppResult<Value> {
        debug!(table = query.table(), "Selecting single row");
        let response = self
            .authorize(self.client.get(self.url(query.table())))
            .query(&query.select_params())
            .header("Accept", SINGLE_OBJECT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::read_failure(response).await);
        }
        Ok(response.json().await?)
    }

    async fn insert(&self, table: &str, row: Value) -> AppResult<()> {
        debug!(table, "Inserting row");
        self.send_write(self.client.post(self.url(table)).json(&row))
            .await
    }

    async fn update(&self, query: &Query, patch: Value) -> AppResult<()> {
        debug!(table = query.table(), "Updating rows");
        self.send_write(
            self.client
                .patch(self.url(query.table()))
                .query(&query.filter_params())
                .json(&patch),
        )
        .await
    }

    async fn delete(&self, query: &Query) -> AppResult<()> {
        debug!(table = query.table(), "Deleting rows");
        self.send_write(
            self.client
                .delete(self.url(query.table()))
                .query(&query.filter_params()),
        )
        .await
    }
}

async fn error_body(response: Response) -> StoreErrorBody {
    response.json().await.unwrap_or_default()
}

fn describe(status: StatusCode, body: &StoreErrorBody) -> String {
    match (&body.code, &body.message) {
        (Some(code), Some(message)) => format!("{} ({}): {}", status, code, message),
        (None, Some(message)) => format!("{}: {}", status, message),
        _ => status.to_string(),
    }
}
