pub mod runner;

pub use runner::{failure_text, LoopState, StatusWatcher, WatchPhase};
