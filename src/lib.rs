//! Homework review notifier.
//!
//! Polls the homework review API, renders the status of the latest
//! submission and forwards changes to a Telegram chat.

pub mod api;
pub mod config;
pub mod error;
pub mod review;
pub mod telegram;
pub mod watcher;

pub use error::WatchError;
