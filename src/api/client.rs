use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::error::WatchError;

/// Source of homework status snapshots.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HomeworkApi: Send + Sync {
    /// Fetch statuses changed since `from_date` (unix seconds). One attempt,
    /// no retries.
    async fn homework_statuses(&self, from_date: i64) -> Result<Value, WatchError>;
}

#[derive(Clone)]
pub struct PracticumClient {
    client: Client,
    endpoint: String,
    token: String,
}

impl PracticumClient {
    pub fn new(config: &Config) -> Result<Self, WatchError> {
        let client = Client::builder().timeout(config.request_timeout).build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            token: config.practicum_token.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl HomeworkApi for PracticumClient {
    async fn homework_statuses(&self, from_date: i64) -> Result<Value, WatchError> {
        debug!(endpoint = %self.endpoint, from_date, "Requesting homework statuses");

        let resp = self
            .client
            .get(&self.endpoint)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(WatchError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let value: Value = serde_json::from_str(&body)?;
        debug!("Homework API returned: {}", value);

        Ok(value)
    }
}
