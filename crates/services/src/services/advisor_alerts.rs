//! Rule-based advisor: turns project, settings and payment snapshots into a
//! prioritised list of alerts for the dashboard.
//!
//! Generation is a pure function of its input and `now`. Rules run in a fixed
//! order (workload, margin, stalled, overdue payment) and the result is stably
//! sorted so that critical alerts come first.

use chrono::{DateTime, Duration, Utc};
use models::{
    alert::{Alert, AlertAction, AlertMetadata, AlertSeverity, AlertType},
    finance::PaymentSnapshot,
    project::ProjectSnapshot,
    settings::SettingsSnapshot,
};

use super::alert_copy::AlertFacts;

/// Weeks of remaining work above which a warning is raised
pub const WORKLOAD_WARNING_WEEKS: f64 = 4.0;
/// Weeks of remaining work above which the workload alert turns critical
pub const WORKLOAD_CRITICAL_WEEKS: f64 = 8.0;
/// Margin (percentage points) below which a margin alert is critical
pub const CRITICAL_MARGIN_PERCENT: f64 = 5.0;
/// Days without an update before an active project counts as stalled
pub const STALLED_AFTER_DAYS: i64 = 30;
/// Days without an update after which a stalled alert is critical
pub const STALLED_CRITICAL_DAYS: i64 = 60;
/// Days overdue after which a payment alert is critical
pub const PAYMENT_CRITICAL_DAYS: i64 = 30;

pub const DEFAULT_CURRENCY: &str = "EUR";

/// Everything one advisor run looks at
#[derive(Debug, Clone, PartialEq)]
pub struct AdvisorInput {
    pub settings: SettingsSnapshot,
    pub projects: Vec<ProjectSnapshot>,
    /// Already restricted by the caller to the balances it considers overdue
    pub overdue_payments: Vec<PaymentSnapshot>,
    /// Currency used when wording payment alerts
    pub currency: String,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl AdvisorInput {
    pub fn new(
        settings: SettingsSnapshot,
        projects: Vec<ProjectSnapshot>,
        overdue_payments: Vec<PaymentSnapshot>,
    ) -> Self {
        Self {
            settings,
            projects,
            overdue_payments,
            currency: default_currency(),
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }
}

/// Generate the advisor alerts for `input` as of `now`.
///
/// An empty result means nothing needs attention.
pub fn generate_advisor_alerts(input: &AdvisorInput, now: DateTime<Utc>) -> Vec<Alert> {
    let mut alerts = collect_alerts(input, now);
    sort_by_severity(&mut alerts);
    alerts
}

/// Move critical alerts ahead of warnings, keeping relative order otherwise
pub fn sort_by_severity(alerts: &mut [Alert]) {
    // `sort_by_key` is stable
    alerts.sort_by_key(|alert| !alert.severity.is_critical());
}

fn collect_alerts(input: &AdvisorInput, now: DateTime<Utc>) -> Vec<Alert> {
    let mut alerts = Vec::new();
    alerts.extend(workload_alert(&input.settings, &input.projects));
    alerts.extend(margin_alerts(&input.settings, &input.projects));
    alerts.extend(stalled_alerts(&input.projects, now));
    alerts.extend(payment_alerts(&input.overdue_payments, &input.currency));
    alerts
}

fn workload_alert(settings: &SettingsSnapshot, projects: &[ProjectSnapshot]) -> Option<Alert> {
    let capacity = settings.weekly_capacity_hours;
    if !(capacity.is_finite() && capacity > 0.0) {
        return None;
    }

    let remaining_hours: f64 = projects
        .iter()
        .filter(|p| p.is_active())
        .map(ProjectSnapshot::remaining_hours)
        .sum();
    let weeks_to_complete = remaining_hours / capacity;

    let metadata = AlertMetadata {
        remaining_hours: Some(remaining_hours),
        weeks_to_complete: Some(weeks_to_complete),
        ..Default::default()
    };

    if weeks_to_complete > WORKLOAD_CRITICAL_WEEKS {
        let facts = AlertFacts::WorkloadOverload {
            remaining_hours,
            weekly_capacity_hours: capacity,
            weeks_to_complete,
        };
        Some(build_alert(
            "workload-critical".to_string(),
            AlertType::Workload,
            AlertSeverity::Critical,
            &facts,
            AlertAction::new("Review Projects", "/projects?status=ACTIVE"),
            metadata,
        ))
    } else if weeks_to_complete > WORKLOAD_WARNING_WEEKS {
        let facts = AlertFacts::HighWorkload { remaining_hours };
        Some(build_alert(
            "workload-warning".to_string(),
            AlertType::Workload,
            AlertSeverity::Warning,
            &facts,
            AlertAction::new("View Tasks", "/tasks"),
            metadata,
        ))
    } else {
        None
    }
}

fn margin_alerts(settings: &SettingsSnapshot, projects: &[ProjectSnapshot]) -> Vec<Alert> {
    let threshold = settings.margin_warning_threshold;

    projects
        .iter()
        .filter(|p| p.is_active() && p.has_budget() && p.margin < threshold)
        .map(|project| {
            let severity = if project.margin < CRITICAL_MARGIN_PERCENT {
                AlertSeverity::Critical
            } else {
                AlertSeverity::Warning
            };
            let facts = AlertFacts::LowMargin {
                project_name: &project.name,
                margin: project.margin,
                threshold,
            };
            build_alert(
                format!("margin-{}", project.id),
                AlertType::Margin,
                severity,
                &facts,
                project_action(&project.id),
                AlertMetadata {
                    margin: Some(project.margin),
                    ..Default::default()
                },
            )
        })
        .collect()
}

fn stalled_alerts(projects: &[ProjectSnapshot], now: DateTime<Utc>) -> Vec<Alert> {
    let stalled_after = Duration::days(STALLED_AFTER_DAYS);

    projects
        .iter()
        .filter(|p| p.is_active())
        .filter_map(|project| {
            let idle = now.signed_duration_since(project.updated_at);
            if idle <= stalled_after {
                return None;
            }
            // whole days, rounded down
            let days_since_update = idle.num_days();
            let severity = if days_since_update > STALLED_CRITICAL_DAYS {
                AlertSeverity::Critical
            } else {
                AlertSeverity::Warning
            };
            let facts = AlertFacts::Stalled {
                project_name: &project.name,
                days_since_update,
            };
            Some(build_alert(
                format!("stalled-{}", project.id),
                AlertType::Stalled,
                severity,
                &facts,
                project_action(&project.id),
                AlertMetadata {
                    days_since_update: Some(days_since_update),
                    ..Default::default()
                },
            ))
        })
        .collect()
}

fn payment_alerts(payments: &[PaymentSnapshot], currency: &str) -> Vec<Alert> {
    payments
        .iter()
        .map(|payment| {
            // Checked here as well: callers may prefilter with a shorter window
            let severity = if payment.days_overdue > PAYMENT_CRITICAL_DAYS {
                AlertSeverity::Critical
            } else {
                AlertSeverity::Warning
            };
            let facts = AlertFacts::OverduePayment {
                project_name: &payment.project_name,
                amount: payment.amount,
                days_overdue: payment.days_overdue,
                currency,
            };
            build_alert(
                format!("payment-{}", payment.id),
                AlertType::OverduePayment,
                severity,
                &facts,
                AlertAction::new("View Finance", "/finance"),
                AlertMetadata {
                    amount: Some(payment.amount),
                    days_overdue: Some(payment.days_overdue),
                    ..Default::default()
                },
            )
        })
        .collect()
}

fn project_action(project_id: &str) -> AlertAction {
    AlertAction::new("View Project", format!("/projects/{}", project_id))
}

fn build_alert(
    id: String,
    kind: AlertType,
    severity: AlertSeverity,
    facts: &AlertFacts<'_>,
    action: AlertAction,
    metadata: AlertMetadata,
) -> Alert {
    Alert {
        id,
        kind,
        severity,
        title: facts.title(),
        description: facts.description(),
        action: Some(action),
        metadata: Some(metadata),
    }
}
