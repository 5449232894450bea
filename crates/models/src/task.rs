use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use ts_rs::TS;

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS, EnumString, Display, Default,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    #[default]
    Open,
    Pending,
    AwaitingPrice,
    AwaitingClient,
    InProgress,
    Complete,
    Cancelled,
}

impl TaskStatus {
    pub fn is_closed(&self) -> bool {
        matches!(self, TaskStatus::Complete | TaskStatus::Cancelled)
    }
}

/// Priority buckets, ordered from most to least pressing
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS, EnumString, Display, Default,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
    UrgentPayment,
    BoqOffer,
    Report,
    Opportunity,
    #[default]
    Normal,
}

impl TaskPriority {
    pub fn order(&self) -> u8 {
        match self {
            TaskPriority::UrgentPayment => 1,
            TaskPriority::BoqOffer => 2,
            TaskPriority::Report => 3,
            TaskPriority::Opportunity => 4,
            TaskPriority::Normal => 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct Task {
    pub id: String,
    #[serde(default)]
    pub project_id: Option<String>, // Foreign key to Project
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

impl Task {
    pub fn is_open(&self) -> bool {
        !self.status.is_closed()
    }
}
