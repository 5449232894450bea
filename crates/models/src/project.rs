use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use ts_rs::TS;

use super::finance::FinancialEntry;

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS, EnumString, Display, Default,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    #[default]
    Lead,
    Negotiation,
    Active,
    OnHold,
    ClosedWon,
    ClosedLost,
}

impl ProjectStatus {
    /// Statuses shown on the dashboard and finance views
    pub fn is_open_pipeline(&self) -> bool {
        matches!(self, ProjectStatus::Active | ProjectStatus::Negotiation)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub client_id: Option<String>, // Foreign key to Client
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub estimated_hours: Option<f64>,
    #[serde(default)]
    pub actual_hours: f64,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct ProjectWithFinance {
    #[serde(flatten)]
    #[ts(flatten)]
    pub project: Project,
    #[serde(default)]
    pub financial_entries: Vec<FinancialEntry>,
}

impl std::ops::Deref for ProjectWithFinance {
    type Target = Project;
    fn deref(&self) -> &Self::Target {
        &self.project
    }
}

/// Read-only view of a project handed to the advisor.
///
/// `margin` is computed by the caller: `(budget - costs) / budget * 100` when the
/// budget is positive, otherwise `0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct ProjectSnapshot {
    pub id: String,
    pub name: String,
    pub status: ProjectStatus,
    pub estimated_hours: Option<f64>,
    pub actual_hours: f64,
    pub updated_at: DateTime<Utc>,
    pub budget: Option<f64>,
    pub costs: f64,
    pub margin: f64,
}

impl ProjectSnapshot {
    pub fn is_active(&self) -> bool {
        self.status == ProjectStatus::Active
    }

    /// Estimated effort still to be spent, never negative
    pub fn remaining_hours(&self) -> f64 {
        (self.estimated_hours.unwrap_or(0.0) - self.actual_hours).max(0.0)
    }

    pub fn has_budget(&self) -> bool {
        self.budget.is_some_and(|budget| budget > 0.0)
    }
}
