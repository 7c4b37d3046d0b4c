//! Mapping of review statuses to the text sent to the chat.

use serde::Deserialize;
use std::fmt;
use tracing::{debug, warn};

/// Sent when the API reports no submissions since the last poll.
pub const NO_SUBMISSIONS_TEXT: &str = "Нет работ на проверке.";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum HomeworkStatus {
    Reviewing,
    Approved,
    Rejected,
    /// Any status code the API documents later; kept verbatim.
    Unknown(String),
}

impl From<String> for HomeworkStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "reviewing" => HomeworkStatus::Reviewing,
            "approved" => HomeworkStatus::Approved,
            "rejected" => HomeworkStatus::Rejected,
            _ => HomeworkStatus::Unknown(raw),
        }
    }
}

impl HomeworkStatus {
    pub fn as_str(&self) -> &str {
        match self {
            HomeworkStatus::Reviewing => "reviewing",
            HomeworkStatus::Approved => "approved",
            HomeworkStatus::Rejected => "rejected",
            HomeworkStatus::Unknown(raw) => raw,
        }
    }

    /// Reviewer verdict for the known statuses.
    pub fn verdict(&self) -> Option<&'static str> {
        match self {
            HomeworkStatus::Approved => Some("Работа проверена: ревьюеру всё понравилось. Ура!"),
            HomeworkStatus::Reviewing => Some("Работа принята. Ждём ревью."),
            HomeworkStatus::Rejected => Some("Работа проверена: у ревьюера есть замечания."),
            HomeworkStatus::Unknown(_) => None,
        }
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Submission {
    pub homework_name: String,
    pub status: HomeworkStatus,
}

/// Render the chat text for a submission. Never fails: unknown statuses get
/// a default text naming the raw code.
pub fn render_status(submission: &Submission) -> String {
    let name = &submission.homework_name;
    debug!(homework = %name, status = %submission.status, "Observed homework status");

    match submission.status.verdict() {
        Some(verdict) => format!("Изменился статус проверки работы \"{}\". {}", name, verdict),
        None => {
            warn!(
                homework = %name,
                status = %submission.status,
                "Undocumented homework status in API response"
            );
            format!(
                "Незадокументированный статус работы \"{}\": {}",
                name, submission.status
            )
        }
    }
}
