use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use ts_rs::TS;

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS, EnumString, Display, Default,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ReminderStatus {
    #[default]
    Draft,
    Approved,
    Sent,
    Cancelled,
}

impl ReminderStatus {
    /// A reminder that is still waiting to go out
    pub fn is_pending(&self) -> bool {
        matches!(self, ReminderStatus::Draft | ReminderStatus::Approved)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct Reminder {
    pub id: String,
    pub task_id: String, // Foreign key to Task
    #[serde(default)]
    pub status: ReminderStatus,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub recipient: Option<String>,
}
