use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS, EnumString, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum FinancialEntryType {
    Budget,
    InvoiceSent,
    InvoicePaid,
    Cost,
    Estimate,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct FinancialEntry {
    pub id: String,
    pub project_id: String,
    #[serde(rename = "type")]
    pub entry_type: FinancialEntryType,
    pub amount: f64,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Outstanding invoice balance for a project, as handed to the advisor.
///
/// The caller decides which balances count as overdue; `id` is the id of the
/// project the invoices belong to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct PaymentSnapshot {
    pub id: String,
    pub project_name: String,
    pub amount: f64,
    pub days_overdue: i64,
}

/// Money picture of a single project on the finance view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct ProjectFinanceSummary {
    pub project_id: String,
    pub project_name: String,
    pub budget: f64,
    pub invoiced: f64,
    pub paid: f64,
    pub costs: f64,
    pub margin: f64,
    pub outstanding: f64,
    pub at_risk: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
pub struct PortfolioTotals {
    pub budget: f64,
    pub invoiced: f64,
    pub paid: f64,
    pub costs: f64,
    pub outstanding: f64,
    pub margin: f64,
}
