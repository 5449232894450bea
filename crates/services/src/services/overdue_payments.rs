//! Detects unpaid invoice balances that have been outstanding for too long.

use chrono::{DateTime, Duration, Utc};
use models::{
    finance::{FinancialEntryType, PaymentSnapshot},
    project::ProjectWithFinance,
};
use tracing::warn;

use super::project_financials::total_of;

/// Days after sending an invoice before its balance counts as overdue
pub const DEFAULT_OVERDUE_AFTER_DAYS: i64 = 30;

/// Find projects whose invoices have gone unpaid for more than `overdue_after_days`.
///
/// Only invoices sent before the cut-off count towards the outstanding amount,
/// while all payments received are credited against it. The age of the balance
/// is measured from the project's oldest invoice.
pub fn detect_overdue_payments(
    projects: &[ProjectWithFinance],
    now: DateTime<Utc>,
    overdue_after_days: i64,
) -> Vec<PaymentSnapshot> {
    let Some(cutoff) = Duration::try_days(overdue_after_days)
        .and_then(|window| now.checked_sub_signed(window))
    else {
        warn!(overdue_after_days, "Overdue window out of range, skipping payment check");
        return Vec::new();
    };

    projects
        .iter()
        .filter_map(|project| overdue_balance(project, now, cutoff))
        .filter(|payment| payment.days_overdue > overdue_after_days)
        .collect()
}

fn overdue_balance(
    project: &ProjectWithFinance,
    now: DateTime<Utc>,
    cutoff: DateTime<Utc>,
) -> Option<PaymentSnapshot> {
    let invoices = || {
        project
            .financial_entries
            .iter()
            .filter(|e| e.entry_type == FinancialEntryType::InvoiceSent)
    };

    let invoiced: f64 = invoices().filter(|e| e.date < cutoff).map(|e| e.amount).sum();
    let paid = total_of(project, FinancialEntryType::InvoicePaid);
    let outstanding = invoiced - paid;
    if outstanding <= 0.0 {
        return None;
    }

    let oldest = invoices().map(|e| e.date).min()?;
    Some(PaymentSnapshot {
        id: project.id.clone(),
        project_name: project.name.clone(),
        amount: outstanding,
        days_overdue: now.signed_duration_since(oldest).num_days(),
    })
}
