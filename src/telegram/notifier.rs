use std::sync::Arc;
use tracing::{error, info};

use super::ChatSender;

/// Best-effort delivery of notification text to one chat.
///
/// Exactly one send attempt per call. Failures are logged and reported
/// through the return value, never propagated.
#[derive(Clone)]
pub struct Notifier {
    sender: Arc<dyn ChatSender>,
    chat_id: i64,
}

impl Notifier {
    pub fn new(sender: Arc<dyn ChatSender>, chat_id: i64) -> Self {
        Self { sender, chat_id }
    }

    pub fn chat_id(&self) -> i64 {
        self.chat_id
    }

    /// Returns true if the text was delivered.
    pub async fn notify(&self, text: &str) -> bool {
        match self.sender.send_message(self.chat_id, text).await {
            Ok(()) => {
                info!(chat_id = self.chat_id, "Bot sent message: \"{}\"", text);
                true
            }
            Err(e) => {
                error!(chat_id = self.chat_id, "Bot failed to send message: {}", e);
                false
            }
        }
    }
}
