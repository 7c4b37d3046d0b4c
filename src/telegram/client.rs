use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::error;

use crate::config::Config;

const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Telegram message length limit is 4096 chars
const MAX_MESSAGE_CHARS: usize = 4000;

/// Outbound chat transport.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatSender: Send + Sync {
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<()>;
}

#[derive(Clone)]
pub struct TelegramClient {
    client: Client,
    bot_token: String,
    api_base: String,
}

impl TelegramClient {
    pub fn new(bot_token: String) -> Self {
        Self {
            client: Client::new(),
            bot_token,
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            client,
            bot_token: config.telegram_token.clone(),
            api_base: DEFAULT_API_BASE.to_string(),
        })
    }

    /// Point the client at a different Bot API server.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl ChatSender for TelegramClient {
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<()> {
        // The URL carries the bot token; errors are stripped of it before logging.
        let url = format!("{}/bot{}/sendMessage", self.api_base, self.bot_token);

        for chunk in split_message(text, MAX_MESSAGE_CHARS) {
            let body = json!({
                "chat_id": chat_id,
                "text": chunk,
            });

            let resp = self
                .client
                .post(&url)
                .json(&body)
                .send()
                .await
                .map_err(|e| e.without_url())?;
            if !resp.status().is_success() {
                let status = resp.status();
                let err_text = resp.text().await.map_err(|e| e.without_url())?;
                error!("Telegram sendMessage error ({}): {}", status, err_text);
                anyhow::bail!("Telegram sendMessage failed ({}): {}", status, err_text);
            }
        }
        Ok(())
    }
}

fn split_message(text: &str, max_len: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return vec![String::new()];
    }
    chars.chunks(max_len).map(|c| c.iter().collect()).collect()
}
