pub mod advisor;
pub mod advisor_alerts;
pub mod alert_copy;
pub mod config;
pub mod dashboard;
pub mod overdue_payments;
pub mod project_financials;
pub mod snapshot_validator;
pub mod task_triage;
