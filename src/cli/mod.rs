use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "homework-bot")]
#[command(author, version, about = "Forwards homework review status changes to Telegram")]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text, env = "HOMEWORK_BOT_LOG_FORMAT")]
    pub log_format: LogFormat,

    /// Run a single poll and exit
    #[arg(long)]
    pub once: bool,

    /// Read variables from this file instead of `.env`
    #[arg(long, env = "HOMEWORK_BOT_ENV_FILE")]
    pub env_file: Option<PathBuf>,

    /// Unix timestamp for the first poll (overrides FROM_DATE)
    #[arg(long)]
    pub from_date: Option<i64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}
