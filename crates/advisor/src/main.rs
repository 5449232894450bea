//! Command line front end for the Damelie PA advisor.
//!
//! Reads a JSON export of the studio's records and prints alerts, the dashboard,
//! the finance overview or the task lists, as text or JSON.

mod render;

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use models::dataset::StudioDataset;
use serde::Serialize;
use services::services::{
    advisor::AdvisorService,
    config::AdvisorConfig,
    dashboard::dashboard_overview,
    task_triage::{reminder_candidates, urgent_tasks},
};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "damelie-advisor", version)]
#[command(about = "Proactive alerts for a design studio's project pipeline")]
struct Cli {
    /// Advisor config file (defaults to <config dir>/damelie-pa/advisor.toml)
    #[arg(long, global = true, env = "DAMELIE_ADVISOR_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(
        short,
        long,
        global = true,
        value_enum,
        default_value_t = OutputFormat::Text,
        env = "DAMELIE_OUTPUT_FORMAT"
    )]
    format: OutputFormat,

    /// Weekly capacity in hours, overriding the stored settings
    #[arg(long, global = true, env = "DAMELIE_WEEKLY_CAPACITY")]
    weekly_capacity: Option<f64>,

    /// Margin warning threshold in percent, overriding the stored settings
    #[arg(long, global = true, env = "DAMELIE_MARGIN_THRESHOLD")]
    margin_threshold: Option<f64>,

    /// Evaluate as of this RFC 3339 instant instead of the current time
    #[arg(long, global = true, env = "DAMELIE_NOW")]
    now: Option<DateTime<Utc>>,

    /// Fail on invalid records instead of clamping them
    #[arg(long, global = true, env = "DAMELIE_STRICT")]
    strict: bool,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate advisor alerts for the open pipeline
    Alerts {
        /// Studio dataset (JSON)
        dataset: PathBuf,
    },
    /// Quick stats, today's schedule and recently updated projects
    Dashboard {
        /// Studio dataset (JSON)
        dataset: PathBuf,
    },
    /// Budget, invoicing and margin per active or negotiating project
    Finance {
        /// Studio dataset (JSON)
        dataset: PathBuf,
    },
    /// Open tasks that are payment-urgent or due today
    Urgent {
        /// Studio dataset (JSON)
        dataset: PathBuf,
        /// Maximum number of tasks to list
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Overdue tasks that have no reminder drafted or approved
    Reminders {
        /// Studio dataset (JSON)
        dataset: PathBuf,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    utils::log::init_tracing(if cli.verbose { "debug" } else { "info" });

    let mut config =
        AdvisorConfig::load(cli.config.as_deref()).context("Failed to load advisor config")?;
    if cli.strict {
        config.strict_validation = true;
    }
    let service = AdvisorService::try_new(config)?;
    let now = cli.now.unwrap_or_else(Utc::now);

    match &cli.command {
        Commands::Alerts { dataset } => {
            let dataset = load_dataset(dataset, &cli)?;
            let report = service.run(&dataset, now)?;
            emit(cli.format, &report, || render::alerts(&report))
        }
        Commands::Dashboard { dataset } => {
            let dataset = load_dataset(dataset, &cli)?;
            let overview = dashboard_overview(&dataset, now);
            emit(cli.format, &overview, || render::dashboard(&overview, now))
        }
        Commands::Finance { dataset } => {
            let dataset = load_dataset(dataset, &cli)?;
            let report = service.finance(&dataset);
            let currency = service.currency(&dataset);
            emit(cli.format, &report, || render::finance(&report, &currency))
        }
        Commands::Urgent { dataset, limit } => {
            let dataset = load_dataset(dataset, &cli)?;
            let limit = limit.unwrap_or(service.config().urgent_task_limit);
            let tasks = urgent_tasks(&dataset.tasks, now, limit);
            emit(cli.format, &tasks, || render::urgent(&tasks, &dataset, now))
        }
        Commands::Reminders { dataset } => {
            let dataset = load_dataset(dataset, &cli)?;
            let candidates = reminder_candidates(&dataset, now);
            emit(cli.format, &candidates, || render::reminders(&candidates))
        }
    }
}

/// Read the dataset and apply the command line overrides to its settings
fn load_dataset(path: &Path, cli: &Cli) -> Result<StudioDataset> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset {}", path.display()))?;
    let mut dataset: StudioDataset = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid dataset {}", path.display()))?;

    if let Some(hours) = cli.weekly_capacity {
        dataset.settings.weekly_capacity_hours = Some(hours);
    }
    if let Some(threshold) = cli.margin_threshold {
        dataset.settings.margin_warning_threshold = Some(threshold);
    }

    debug!(
        path = %path.display(),
        projects = dataset.projects.len(),
        tasks = dataset.tasks.len(),
        "Loaded dataset"
    );
    Ok(dataset)
}

fn emit<T: Serialize + ?Sized>(
    format: OutputFormat,
    value: &T,
    text: impl FnOnce() -> String,
) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Text => print!("{}", text()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_global_overrides_after_subcommand() {
        let cli = Cli::try_parse_from([
            "damelie-advisor",
            "alerts",
            "studio.json",
            "--format",
            "json",
            "--weekly-capacity",
            "32",
            "--now",
            "2025-06-01T12:00:00Z",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.weekly_capacity, Some(32.0));
        assert_eq!(
            cli.now.map(|n| n.to_rfc3339()),
            Some("2025-06-01T12:00:00+00:00".to_string())
        );
        assert!(matches!(cli.command, Commands::Alerts { ref dataset } if dataset == Path::new("studio.json")));
    }

    #[test]
    fn test_load_dataset_applies_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("studio.json");
        fs::write(
            &path,
            r#"{"settings": {"weekly_capacity_hours": 40}, "projects": []}"#,
        )
        .unwrap();

        let cli = Cli::try_parse_from([
            "damelie-advisor",
            "--margin-threshold",
            "20",
            "finance",
            path.to_str().unwrap(),
        ])
        .unwrap();
        let dataset = load_dataset(&path, &cli).unwrap();
        assert_eq!(dataset.settings.weekly_capacity_hours, Some(40.0));
        assert_eq!(dataset.settings.margin_warning_threshold, Some(20.0));

        let err = load_dataset(&dir.path().join("missing.json"), &cli).unwrap_err();
        assert!(err.to_string().contains("Failed to read dataset"));
    }

    #[test]
    fn test_demo_dataset_alerts() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/studio.json");
        let cli = Cli::try_parse_from(["damelie-advisor", "alerts", "studio.json"]).unwrap();
        let dataset = load_dataset(&path, &cli).unwrap();

        let now = "2025-01-15T09:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let report = AdvisorService::new(AdvisorConfig::default())
            .run(&dataset, now)
            .unwrap();
        let ids: Vec<&str> = report.alerts.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["workload-critical", "payment-p1", "payment-p2", "stalled-p1"]
        );
        assert_eq!(report.alerts[1].title, "Overdue Payment: Villa Renovation Son Vida");
        assert!(report.alerts[1].description.contains("€45,000.00"));
    }

    #[test]
    fn test_demo_dataset_dashboard() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/studio.json");
        let cli = Cli::try_parse_from(["damelie-advisor", "dashboard", "studio.json"]).unwrap();
        let dataset = load_dataset(&path, &cli).unwrap();

        let now = "2025-01-15T09:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let overview = dashboard_overview(&dataset, now);
        assert_eq!(overview.stats.active_projects, 2);
        assert_eq!(overview.stats.total_tasks, 7);
        assert_eq!(overview.stats.completed_tasks, 1);
        assert_eq!(overview.stats.overdue_count, 2);

        let meetings: Vec<&str> = overview.today_meetings.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(meetings, vec!["m2"]);

        let recent: Vec<&str> = overview.recent_projects.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(recent, vec!["p2", "p3", "p1"]);
    }
}
