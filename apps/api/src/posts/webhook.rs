//! Publisher — forwards finished posts to the external webhook (e.g. a Zapier catch hook).

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::models::platform::Platform;

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Webhook request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Webhook rejected the post (status {status}): {body}")]
    Rejected { status: u16, body: String },
}

/// Body sent to the webhook. The response is opaque: 2xx is success.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishRequest {
    pub content: String,
    pub platforms: Vec<Platform>,
    pub scheduled_date_time: Option<DateTime<Utc>>,
}

#[async_trait]
pub trait Publisher: Send + Sync {
    async fn forward(&self, request: &PublishRequest) -> Result<(), PublishError>;
}

pub struct WebhookPublisher {
    client: Client,
    url: String,
}

impl WebhookPublisher {
    pub fn new(url: String, timeout: Duration) -> Result<Self, PublishError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            url,
        })
    }
}

#[async_trait]
impl Publisher for WebhookPublisher {
    async fn forward(&self, request: &PublishRequest) -> Result<(), PublishError> {
        let response = self.client.post(&self.url).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PublishError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        info!(
            "Webhook accepted post for {:?} (scheduled: {:?})",
            request.platforms, request.scheduled_date_time
        );
        Ok(())
    }
}
