//! Prints the TypeScript declarations the dashboard uses for advisor output.
//!
//! `generate-types [OUTPUT]` writes to OUTPUT when given, stdout otherwise.

use std::fs;

use anyhow::Context;
use models::{
    alert::{Alert, AlertAction, AlertMetadata, AlertSeverity, AlertSummary, AlertType},
    finance::{PortfolioTotals, ProjectFinanceSummary},
    meeting::MeetingType,
    project::ProjectStatus,
};
use services::services::{
    advisor::{AdvisorReport, FinanceReport},
    dashboard::{DashboardOverview, DashboardStats, RecentProject, ScheduledMeeting},
    task_triage::ReminderCandidate,
};
use ts_rs::TS;

fn declarations() -> String {
    let decls = [
        AlertType::decl(),
        AlertSeverity::decl(),
        AlertAction::decl(),
        AlertMetadata::decl(),
        Alert::decl(),
        AlertSummary::decl(),
        AdvisorReport::decl(),
        ProjectFinanceSummary::decl(),
        PortfolioTotals::decl(),
        FinanceReport::decl(),
        ReminderCandidate::decl(),
        ProjectStatus::decl(),
        MeetingType::decl(),
        DashboardStats::decl(),
        ScheduledMeeting::decl(),
        RecentProject::decl(),
        DashboardOverview::decl(),
    ];

    let mut out = String::from("// This file was generated by `generate-types`. Do not edit.\n\n");
    for decl in decls {
        out.push_str("export ");
        out.push_str(&decl);
        out.push_str("\n\n");
    }
    out
}

fn main() -> anyhow::Result<()> {
    let output = declarations();
    match std::env::args().nth(1) {
        Some(path) => {
            fs::write(&path, output).with_context(|| format!("Failed to write {}", path))?;
            eprintln!("Wrote TypeScript types to {}", path);
        }
        None => print!("{}", output),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declarations_cover_alert_shape() {
        let out = declarations();
        assert!(out.contains("export type AlertSeverity = \"warning\" | \"critical\";"));
        assert!(out.contains("export type Alert = "));
        assert!(out.contains("type: AlertType"));
        assert!(out.contains("export type ReminderCandidate = "));
        assert!(out.contains("export type DashboardOverview = "));
    }
}
