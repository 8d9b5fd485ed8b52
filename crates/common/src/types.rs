use serde::{Deserialize, Serialize};

/// Baseline status text before anything has been notified.
pub const UNKNOWN_STATUS_TEXT: &str = "Unknown";

/// Review status of a homework submission, as reported by the review API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    /// Look up a status by its wire code. Unknown codes return `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "approved" => Some(HomeworkStatus::Approved),
            "reviewing" => Some(HomeworkStatus::Reviewing),
            "rejected" => Some(HomeworkStatus::Rejected),
            _ => None,
        }
    }

    /// Localized verdict sentence shown to the student.
    pub fn verdict(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            HomeworkStatus::Reviewing => "Работа взята на проверку ревьюером.",
            HomeworkStatus::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl std::fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HomeworkStatus::Approved => write!(f, "approved"),
            HomeworkStatus::Reviewing => write!(f, "reviewing"),
            HomeworkStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// One entry of the `homeworks` array, kept as raw JSON.
///
/// Only the most recent entry is ever inspected, so field checks happen when
/// that entry is rendered rather than when the payload is validated.
pub type HomeworkRecord = serde_json::Value;

/// In-memory notification baseline owned by the poll loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationState {
    /// Last status text that was notified.
    pub last_status_text: String,
    /// Rendering of the last error that was notified, if any.
    pub last_error_text: Option<String>,
}

impl Default for NotificationState {
    fn default() -> Self {
        Self {
            last_status_text: UNKNOWN_STATUS_TEXT.to_string(),
            last_error_text: None,
        }
    }
}
