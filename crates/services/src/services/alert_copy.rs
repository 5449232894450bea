//! Human-readable wording for advisor alerts.
//!
//! The rules in `advisor_alerts` only compute numbers; everything the operator
//! reads is produced here from those numbers.

use utils::format::{format_currency, format_one_decimal, format_whole_hours};

/// Numeric facts behind one alert, ready to be worded
#[derive(Debug, Clone, PartialEq)]
pub enum AlertFacts<'a> {
    WorkloadOverload {
        remaining_hours: f64,
        weekly_capacity_hours: f64,
        weeks_to_complete: f64,
    },
    HighWorkload {
        remaining_hours: f64,
    },
    LowMargin {
        project_name: &'a str,
        margin: f64,
        threshold: f64,
    },
    Stalled {
        project_name: &'a str,
        days_since_update: i64,
    },
    OverduePayment {
        project_name: &'a str,
        amount: f64,
        days_overdue: i64,
        currency: &'a str,
    },
}

impl AlertFacts<'_> {
    pub fn title(&self) -> String {
        match self {
            AlertFacts::WorkloadOverload { .. } => "Workload Overload".to_string(),
            AlertFacts::HighWorkload { .. } => "High Workload".to_string(),
            AlertFacts::LowMargin { project_name, .. } => format!("Low Margin: {}", project_name),
            AlertFacts::Stalled { project_name, .. } => {
                format!("Stalled Project: {}", project_name)
            }
            AlertFacts::OverduePayment { project_name, .. } => {
                format!("Overdue Payment: {}", project_name)
            }
        }
    }

    pub fn description(&self) -> String {
        match self {
            AlertFacts::WorkloadOverload {
                remaining_hours,
                weekly_capacity_hours,
                weeks_to_complete,
            } => format!(
                "You have {} hours of work remaining across active projects. At your current capacity ({}h/week), this would take {} weeks.",
                format_whole_hours(*remaining_hours),
                weekly_capacity_hours,
                format_one_decimal(*weeks_to_complete)
            ),
            AlertFacts::HighWorkload { remaining_hours } => format!(
                "{} hours of work remaining. Consider prioritizing or delegating tasks.",
                format_whole_hours(*remaining_hours)
            ),
            AlertFacts::LowMargin {
                margin, threshold, ..
            } => format!(
                "Project margin is {}% (threshold: {}%). Review costs and consider adjustments.",
                format_one_decimal(*margin),
                threshold
            ),
            AlertFacts::Stalled {
                days_since_update, ..
            } => format!(
                "No activity in {} days. Consider following up or updating status.",
                days_since_update
            ),
            AlertFacts::OverduePayment {
                amount,
                days_overdue,
                currency,
                ..
            } => format!(
                "{} outstanding for {} days.",
                format_currency(*amount, currency),
                days_overdue
            ),
        }
    }
}
