//! Boundary checks for advisor input.
//!
//! The alert rules assume sane numbers. Anything loaded from outside goes
//! through here first so bad records are reported and clamped instead of
//! producing nonsense alerts.

use std::fmt;

use models::{finance::PaymentSnapshot, project::ProjectSnapshot, settings::SettingsSnapshot};
use tracing::debug;

use super::advisor_alerts::AdvisorInput;

/// A single value that failed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    /// Record the value belongs to, e.g. `settings` or `project p1`
    pub subject: String,
    pub field: &'static str,
    pub problem: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} {}", self.subject, self.field, self.problem)
    }
}

/// Result of validating one advisor input
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub projects_checked: usize,
    pub payments_checked: usize,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Check if validation passed without issues
    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }

    /// Get a summary message
    pub fn summary(&self) -> String {
        if self.issues.is_empty() {
            format!(
                "Snapshot OK - {} projects, {} payments",
                self.projects_checked, self.payments_checked
            )
        } else {
            let issues: Vec<String> = self.issues.iter().map(|i| i.to_string()).collect();
            format!("Snapshot validation issues: {}", issues.join(", "))
        }
    }
}

pub struct SnapshotValidator;

impl SnapshotValidator {
    pub fn validate(input: &AdvisorInput) -> ValidationResult {
        let mut issues = Vec::new();

        check_settings(&input.settings, &mut issues);
        for project in &input.projects {
            check_project(project, &mut issues);
        }
        for payment in &input.overdue_payments {
            check_payment(payment, &mut issues);
        }

        debug!(
            projects = input.projects.len(),
            payments = input.overdue_payments.len(),
            issues = issues.len(),
            "Advisor snapshot validated"
        );

        ValidationResult {
            projects_checked: input.projects.len(),
            payments_checked: input.overdue_payments.len(),
            issues,
        }
    }

    /// Copy of `input` with every out-of-range number clamped to zero.
    ///
    /// Capacity is left as is: a non-positive capacity already disables the
    /// workload rule.
    pub fn normalize(input: &AdvisorInput) -> AdvisorInput {
        let mut normalized = input.clone();

        let threshold = &mut normalized.settings.margin_warning_threshold;
        *threshold = if threshold.is_finite() {
            threshold.clamp(0.0, 100.0)
        } else {
            0.0
        };

        for project in &mut normalized.projects {
            project.estimated_hours = project.estimated_hours.map(non_negative);
            project.actual_hours = non_negative(project.actual_hours);
            project.budget = project.budget.map(non_negative);
            project.costs = non_negative(project.costs);
            if !project.margin.is_finite() {
                project.margin = 0.0;
            }
        }

        for payment in &mut normalized.overdue_payments {
            payment.amount = non_negative(payment.amount);
            payment.days_overdue = payment.days_overdue.max(0);
        }

        normalized
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

fn check_settings(settings: &SettingsSnapshot, issues: &mut Vec<ValidationIssue>) {
    let capacity = settings.weekly_capacity_hours;
    if !capacity.is_finite() || capacity <= 0.0 {
        issues.push(issue(
            "settings",
            "weekly_capacity_hours",
            format!("must be a positive number, got {}", capacity),
        ));
    }

    let threshold = settings.margin_warning_threshold;
    if !(0.0..=100.0).contains(&threshold) {
        issues.push(issue(
            "settings",
            "margin_warning_threshold",
            format!("must be between 0 and 100, got {}", threshold),
        ));
    }
}

fn check_project(project: &ProjectSnapshot, issues: &mut Vec<ValidationIssue>) {
    let subject = format!("project {}", project.id);
    let mut check = |field: &'static str, value: f64| {
        if !value.is_finite() || value < 0.0 {
            issues.push(issue(
                &subject,
                field,
                format!("must be a non-negative number, got {}", value),
            ));
        }
    };

    if let Some(estimated) = project.estimated_hours {
        check("estimated_hours", estimated);
    }
    check("actual_hours", project.actual_hours);
    if let Some(budget) = project.budget {
        check("budget", budget);
    }
    check("costs", project.costs);

    if !project.margin.is_finite() {
        issues.push(issue(&subject, "margin", "must be a finite number".to_string()));
    }
}

fn check_payment(payment: &PaymentSnapshot, issues: &mut Vec<ValidationIssue>) {
    let subject = format!("payment {}", payment.id);
    if !payment.amount.is_finite() || payment.amount <= 0.0 {
        issues.push(issue(
            &subject,
            "amount",
            format!("must be a positive amount, got {}", payment.amount),
        ));
    }
    if payment.days_overdue < 0 {
        issues.push(issue(
            &subject,
            "days_overdue",
            format!("must not be negative, got {}", payment.days_overdue),
        ));
    }
}

fn issue(subject: &str, field: &'static str, problem: String) -> ValidationIssue {
    ValidationIssue {
        subject: subject.to_string(),
        field,
        problem,
    }
}
