//! # Remote Writer
//!
//! The queue's remote collaborator: two insert endpoints, one per action kind,
//! each taking the action payload verbatim.
//!
//! `RestRemote` talks to a PostgREST-style API:
//!
//! ```text
//! POST {base}/rest/v1/messages
//! POST {base}/rest/v1/surprises
//! ```
//!
//! Any non-2xx answer (including a validation rejection) is a `RemoteError`,
//! which the queue treats exactly like a network failure.

use crate::shared::ActionKind;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Failure of a remote write
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Transport failure (DNS, connect, timeout, ...)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The remote answered but refused the write
    #[error("remote rejected write ({status}): {message}")]
    Rejected {
        /// HTTP status code of the response
        status: u16,
        /// Response body, as returned by the remote
        message: String,
    },
}

/// Insert-capable remote data store
#[async_trait]
pub trait RemoteWriter: Send + Sync {
    async fn insert_message(&self, payload: &serde_json::Value) -> Result<(), RemoteError>;

    async fn insert_surprise(&self, payload: &serde_json::Value) -> Result<(), RemoteError>;

    /// Dispatch to the insert matching `kind`
    async fn write(&self, kind: ActionKind, payload: &serde_json::Value) -> Result<(), RemoteError> {
        match kind {
            ActionKind::SendMessage => self.insert_message(payload).await,
            ActionKind::SendSurprise => self.insert_surprise(payload).await,
        }
    }
}

/// PostgREST client for the `messages` and `surprises` tables
#[derive(Debug, Clone)]
pub struct RestRemote {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    access_token: Option<String>,
}

impl RestRemote {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            access_token: None,
        })
    }

    /// Authenticate writes as a signed-in user instead of the anonymous key
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    async fn insert(&self, table: &str, payload: &serde_json::Value) -> Result<(), RemoteError> {
        let bearer = self.access_token.as_deref().unwrap_or(&self.api_key);

        let response = self
            .client
            .post(self.table_url(table))
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", bearer))
            .header("Prefer", "return=minimal")
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RemoteError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        tracing::debug!(table, status = status.as_u16(), "Remote insert accepted");
        Ok(())
    }
}

#[async_trait]
impl RemoteWriter for RestRemote {
    async fn insert_message(&self, payload: &serde_json::Value) -> Result<(), RemoteError> {
        self.insert(ActionKind::SendMessage.table(), payload).await
    }

    async fn insert_surprise(&self, payload: &serde_json::Value) -> Result<(), RemoteError> {
        self.insert(ActionKind::SendSurprise.table(), payload).await
    }
}
