pub mod client;

#[cfg(test)]
pub use client::MockHomeworkApi;
pub use client::{HomeworkApi, PracticumClient};
