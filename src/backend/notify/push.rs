/**
 * Push Gateway
 *
 * Outbound delivery of a `PushNotification` to the push service. Every call is
 * bounded by a timeout; expiry is reported as `PushError::Timeout` and, like any
 * other gateway failure, is not retried by the dispatcher.
 */

use crate::shared::PushNotification;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Expo push API endpoint
pub const DEFAULT_PUSH_GATEWAY_URL: &str = "https://exp.host/--/api/v2/push/send";

/// Default bound for one gateway call
pub const DEFAULT_PUSH_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum PushError {
    #[error("push gateway request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("push gateway returned {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("push gateway did not answer within {0:?}")]
    Timeout(Duration),
}

/// Outbound push delivery
#[async_trait]
pub trait PushGateway: Send + Sync {
    async fn send(&self, notification: &PushNotification) -> Result<(), PushError>;
}

/// HTTP client for the Expo push service
#[derive(Debug, Clone)]
pub struct ExpoPushGateway {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
    access_token: Option<String>,
}

impl ExpoPushGateway {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, PushError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
            timeout,
            access_token: None,
        })
    }

    /// Send an access token with every request (enhanced push security)
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    async fn post(&self, notification: &PushNotification) -> Result<(), PushError> {
        let mut request = self
            .client
            .post(&self.url)
            .header("Accept", "application/json")
            .json(notification);
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(PushError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(status = status.as_u16(), %body, "Push gateway accepted notification");
        Ok(())
    }
}

#[async_trait]
impl PushGateway for ExpoPushGateway {
    async fn send(&self, notification: &PushNotification) -> Result<(), PushError> {
        match tokio::time::timeout(self.timeout, self.post(notification)).await {
            Ok(result) => result,
            Err(_) => Err(PushError::Timeout(self.timeout)),
        }
    }
}
