//! Poll-evaluate-notify loop for the latest homework submission

use chrono::DateTime;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::api::HomeworkApi;
use crate::config::Config;
use crate::error::WatchError;
use crate::review::{check_response, render_status, NO_SUBMISSIONS_TEXT};
use crate::telegram::Notifier;

/// Mutable state carried between iterations. Lost on restart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoopState {
    /// Text of the last notification a send was attempted for.
    pub last_sent_text: Option<String>,
    /// Lower bound (`from_date`) for the next poll, in server time.
    pub next_timestamp: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchPhase {
    /// Last iteration succeeded; next poll after the retry interval.
    Polling,
    /// Last iteration failed; next poll after the backoff interval.
    Backoff,
}

pub fn failure_text(error: &WatchError) -> String {
    format!("Сбой в работе программы: {}", error)
}

pub struct StatusWatcher {
    api: Arc<dyn HomeworkApi>,
    notifier: Notifier,
    retry_interval: Duration,
    backoff_interval: Duration,
    state: LoopState,
    phase: WatchPhase,
}

impl StatusWatcher {
    pub fn new(config: &Config, api: Arc<dyn HomeworkApi>, notifier: Notifier) -> Self {
        Self {
            api,
            notifier,
            retry_interval: config.retry_interval,
            backoff_interval: config.backoff_interval,
            state: LoopState {
                last_sent_text: None,
                next_timestamp: config.initial_timestamp,
            },
            phase: WatchPhase::Polling,
        }
    }

    pub fn state(&self) -> &LoopState {
        &self.state
    }

    pub fn phase(&self) -> WatchPhase {
        self.phase
    }

    /// Run the watcher forever. Errors never end the loop; they only shorten
    /// the sleep before the next attempt.
    pub async fn run(mut self) {
        info!(
            "Starting homework watcher (retry: {:?}, backoff: {:?}, from_date: {})",
            self.retry_interval, self.backoff_interval, self.state.next_timestamp
        );

        loop {
            let interval = self.tick().await;
            debug!(phase = ?self.phase, "Sleeping for {:?}", interval);
            sleep(interval).await;
        }
    }

    /// Run a single iteration without sleeping.
    pub async fn run_once(&mut self) -> WatchPhase {
        self.tick().await;
        self.phase
    }

    /// One poll-evaluate-notify iteration. Returns how long to sleep before
    /// the next one.
    pub async fn tick(&mut self) -> Duration {
        match self.evaluate().await {
            Ok(text) => {
                self.phase = WatchPhase::Polling;
                self.notify_if_changed(&text).await;
                self.retry_interval
            }
            Err(e) => {
                error!(
                    status = ?e.status_code(),
                    "Homework watcher iteration failed: {}", e
                );
                self.phase = WatchPhase::Backoff;
                self.notify_if_changed(&failure_text(&e)).await;
                self.backoff_interval
            }
        }
    }

    async fn evaluate(&mut self) -> Result<String, WatchError> {
        let response = self
            .api
            .homework_statuses(self.state.next_timestamp)
            .await?;
        let result = check_response(response)?;

        self.advance_timestamp(result.current_date);

        let text = match result.latest() {
            Some(submission) => render_status(submission),
            None => {
                debug!("No homework changes since last poll");
                NO_SUBMISSIONS_TEXT.to_string()
            }
        };

        Ok(text)
    }

    fn advance_timestamp(&mut self, current_date: i64) {
        if current_date < self.state.next_timestamp {
            warn!(
                "Server reported current_date {} behind next poll timestamp {}, keeping the latter",
                current_date, self.state.next_timestamp
            );
            return;
        }

        self.state.next_timestamp = current_date;
        match DateTime::from_timestamp(current_date, 0) {
            Some(at) => debug!("Next poll from {}", at.to_rfc3339()),
            None => debug!("Next poll from {}", current_date),
        }
    }

    /// Send `text` unless it equals the last notification. A failed send
    /// still counts: the same text is never attempted twice in a row.
    async fn notify_if_changed(&mut self, text: &str) -> bool {
        if self.state.last_sent_text.as_deref() == Some(text) {
            debug!("Status unchanged, skipping notification");
            return false;
        }

        let delivered = self.notifier.notify(text).await;
        self.state.last_sent_text = Some(text.to_string());
        delivered
    }
}
