use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use ts_rs::TS;

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS, EnumString, Display, Default,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum MeetingType {
    #[default]
    Meeting,
    SiteVisit,
    Call,
}

/// A scheduled meeting, site visit or call
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct Meeting {
    pub id: String,
    pub title: String,
    pub date: DateTime<Utc>,
    #[serde(rename = "type", default)]
    pub meeting_type: MeetingType,
    #[serde(default)]
    pub project_id: Option<String>, // Foreign key to Project
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub confirmed: bool,
}
