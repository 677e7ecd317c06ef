//! HTTP client for the contacts endpoint.
//!
//! Every verb goes to the same path; update and delete name the record by
//! `_id` in the JSON body.

use async_trait::async_trait;
use cybermind_core::contact::{Priority, ProjectType};
use cybermind_core::types::{ContactId, Timestamp};
use serde::{Deserialize, Serialize};

/// A stored contact as the server returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRecord {
    #[serde(rename = "_id")]
    pub id: ContactId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub message: String,
    pub project_type: ProjectType,
    pub priority: Priority,
    pub created_at: Timestamp,
}

/// Fields sent on create and update.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPayload {
    pub name: String,
    pub email: String,
    /// Sent as typed. An empty string means "no phone".
    pub phone: String,
    pub message: String,
    pub project_type: ProjectType,
    pub priority: Priority,
}

#[derive(Serialize)]
struct UpdateBody<'a> {
    #[serde(rename = "_id")]
    id: ContactId,
    #[serde(flatten)]
    contact: &'a ContactPayload,
}

#[derive(Serialize)]
struct DeleteBody {
    #[serde(rename = "_id")]
    id: ContactId,
}

/// Errors from the contacts HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, decoding).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-2xx status code.
    #[error("Contacts API error ({status}): {body}")]
    Status {
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// The four operations the form needs from the server.
#[async_trait]
pub trait ContactsApi: Send + Sync {
    /// All contacts, newest first.
    async fn list(&self) -> Result<Vec<ContactRecord>, ClientError>;

    async fn create(&self, contact: &ContactPayload) -> Result<ContactRecord, ClientError>;

    async fn update(
        &self,
        id: ContactId,
        contact: &ContactPayload,
    ) -> Result<ContactRecord, ClientError>;

    async fn delete(&self, id: ContactId) -> Result<(), ClientError>;
}

/// [`ContactsApi`] over `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpContactsApi {
    client: reqwest::Client,
    endpoint: String,
    token: Option<String>,
}

impl HttpContactsApi {
    /// * `base_url` - Server origin, e.g. `http://localhost:3000`.
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Reuse an existing [`reqwest::Client`] (and its connection pool).
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}/api/contacts", base_url.trim_end_matches('/')),
            token: None,
        }
    }

    /// Send `Authorization: Bearer <token>` with every request. Needed when
    /// the server verifies identity-provider sessions.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request(&self, method: reqwest::Method) -> reqwest::RequestBuilder {
        let builder = self.client.request(method, &self.endpoint);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    // ---- private helpers ----

    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl ContactsApi for HttpContactsApi {
    async fn list(&self) -> Result<Vec<ContactRecord>, ClientError> {
        let response = self.request(reqwest::Method::GET).send().await?;
        Self::parse_response(response).await
    }

    async fn create(&self, contact: &ContactPayload) -> Result<ContactRecord, ClientError> {
        let response = self
            .request(reqwest::Method::POST)
            .json(contact)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn update(
        &self,
        id: ContactId,
        contact: &ContactPayload,
    ) -> Result<ContactRecord, ClientError> {
        let response = self
            .request(reqwest::Method::PUT)
            .json(&UpdateBody { id, contact })
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn delete(&self, id: ContactId) -> Result<(), ClientError> {
        let response = self
            .request(reqwest::Method::DELETE)
            .json(&DeleteBody { id })
            .send()
            .await?;
        Self::ensure_success(response).await?;
        Ok(())
    }
}
