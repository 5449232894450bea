//! Service that prepares the studio's records for the advisor and runs it.

use chrono::{DateTime, Utc};
use models::{
    alert::{Alert, AlertSummary},
    dataset::StudioDataset,
    finance::{PortfolioTotals, ProjectFinanceSummary},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};
use ts_rs::TS;

use super::{
    advisor_alerts::{AdvisorInput, generate_advisor_alerts},
    config::{AdvisorConfig, ConfigError},
    overdue_payments::detect_overdue_payments,
    project_financials::{finance_summary, portfolio_totals, project_snapshot},
    snapshot_validator::SnapshotValidator,
};

#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("invalid advisor snapshot: {0}")]
    InvalidSnapshot(String),
}

/// Alerts produced by one advisor run
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct AdvisorReport {
    pub generated_at: DateTime<Utc>,
    pub summary: AlertSummary,
    pub alerts: Vec<Alert>,
}

/// Finance view across the open pipeline
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct FinanceReport {
    pub projects: Vec<ProjectFinanceSummary>,
    pub totals: PortfolioTotals,
}

pub struct AdvisorService {
    config: AdvisorConfig,
}

impl AdvisorService {
    pub fn new(config: AdvisorConfig) -> Self {
        Self { config }
    }

    /// Like [`AdvisorService::new`] but rejects out-of-range config values
    pub fn try_new(config: AdvisorConfig) -> Result<Self, AdvisorError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &AdvisorConfig {
        &self.config
    }

    /// Shape the dataset into the advisor's input: settings with fallbacks, one
    /// snapshot per open project and the balances overdue by the configured window.
    pub fn build_input(&self, dataset: &StudioDataset, now: DateTime<Utc>) -> AdvisorInput {
        let settings = dataset
            .settings
            .snapshot(&self.config.fallback_settings());

        let pipeline: Vec<_> = dataset
            .projects
            .iter()
            .filter(|p| p.status.is_open_pipeline())
            .cloned()
            .collect();

        let projects = pipeline.iter().map(project_snapshot).collect();
        let overdue_payments =
            detect_overdue_payments(&pipeline, now, self.config.payment_overdue_days);

        AdvisorInput::new(settings, projects, overdue_payments).with_currency(self.currency(dataset))
    }

    /// Build the input, guard it, and generate alerts
    pub fn run(&self, dataset: &StudioDataset, now: DateTime<Utc>) -> Result<AdvisorReport, AdvisorError> {
        let input = self.build_input(dataset, now);
        self.run_input(&input, now)
    }

    /// Guard an already shaped input and generate alerts from it
    pub fn run_input(&self, input: &AdvisorInput, now: DateTime<Utc>) -> Result<AdvisorReport, AdvisorError> {
        let validation = SnapshotValidator::validate(input);

        let alerts = if validation.is_ok() {
            generate_advisor_alerts(input, now)
        } else if self.config.strict_validation {
            return Err(AdvisorError::InvalidSnapshot(validation.summary()));
        } else {
            warn!(
                issues = validation.issues.len(),
                "{}; clamping values",
                validation.summary()
            );
            generate_advisor_alerts(&SnapshotValidator::normalize(input), now)
        };

        let summary = AlertSummary::from_alerts(&alerts);
        info!(
            projects = input.projects.len(),
            overdue_payments = input.overdue_payments.len(),
            alerts = summary.total,
            critical = summary.critical,
            warning = summary.warning,
            "Advisor alerts generated"
        );
        for alert in &alerts {
            debug!(id = %alert.id, severity = %alert.severity, "{}", alert.title);
        }

        Ok(AdvisorReport {
            generated_at: now,
            summary,
            alerts,
        })
    }

    /// Per-project finances for the open pipeline, plus totals
    pub fn finance(&self, dataset: &StudioDataset) -> FinanceReport {
        let threshold = dataset
            .settings
            .snapshot(&self.config.fallback_settings())
            .margin_warning_threshold;

        let projects: Vec<ProjectFinanceSummary> = dataset
            .projects
            .iter()
            .filter(|p| p.status.is_open_pipeline())
            .map(|p| finance_summary(p, threshold))
            .collect();
        let totals = portfolio_totals(&projects);

        FinanceReport { projects, totals }
    }

    /// Currency for wording amounts: the studio's own, else the configured one
    pub fn currency(&self, dataset: &StudioDataset) -> String {
        let stored = dataset.settings.default_currency.trim();
        if stored.is_empty() {
            self.config.currency.clone()
        } else {
            stored.to_string()
        }
    }
}
