pub mod client;
pub mod notifier;

#[cfg(test)]
pub use client::MockChatSender;
pub use client::{ChatSender, TelegramClient};
pub use notifier::Notifier;
