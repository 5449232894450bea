//! Plain text views of the advisor's output.

use chrono::{DateTime, Utc};
use models::{dataset::StudioDataset, task::Task};
use services::services::{
    advisor::{AdvisorReport, FinanceReport},
    dashboard::DashboardOverview,
    task_triage::ReminderCandidate,
};
use utils::format::{format_currency, format_one_decimal, format_relative_date};

pub fn alerts(report: &AdvisorReport) -> String {
    if report.summary.all_clear() {
        return "All clear! No alerts or warnings at this time.\n".to_string();
    }

    let mut lines = vec![format!(
        "{} alerts ({} critical, {} warning)",
        report.summary.total, report.summary.critical, report.summary.warning
    )];
    for alert in &report.alerts {
        lines.push(String::new());
        lines.push(format!(
            "[{}] {}",
            alert.severity.to_string().to_uppercase(),
            alert.title
        ));
        lines.push(format!("    {}", alert.description));
        if let Some(action) = &alert.action {
            lines.push(format!("    -> {} ({})", action.label, action.href));
        }
    }
    finish(lines)
}

pub fn dashboard(overview: &DashboardOverview, now: DateTime<Utc>) -> String {
    let stats = &overview.stats;
    let mut lines = vec![format!(
        "Active projects: {}   Tasks: {} ({} complete)   Overdue: {}",
        stats.active_projects, stats.total_tasks, stats.completed_tasks, stats.overdue_count
    )];

    lines.push(String::new());
    lines.push("Today's schedule".to_string());
    if overview.today_meetings.is_empty() {
        lines.push("  No meetings scheduled for today.".to_string());
    }
    for meeting in &overview.today_meetings {
        let mut line = format!(
            "  {}  [{}] {}",
            meeting.date.format("%H:%M"),
            meeting.meeting_type,
            meeting.title
        );
        if let Some(project) = &meeting.project_name {
            line.push_str(&format!(" ({})", project));
        }
        lines.push(line);
    }

    lines.push(String::new());
    lines.push("Recent projects".to_string());
    if overview.recent_projects.is_empty() {
        lines.push("  No active projects.".to_string());
    }
    for project in &overview.recent_projects {
        let client = project.client_name.as_deref().unwrap_or("No client");
        let tasks = if project.task_count == 1 { "task" } else { "tasks" };
        lines.push(format!(
            "  - {} ({}, {}, {} {}) last updated: {}",
            project.name,
            project.status,
            client,
            project.task_count,
            tasks,
            format_relative_date(project.updated_at, now)
        ));
    }
    finish(lines)
}

pub fn finance(report: &FinanceReport, currency: &str) -> String {
    if report.projects.is_empty() {
        return "No active or negotiating projects.\n".to_string();
    }

    let money = |amount: f64| format_currency(amount, currency);
    let row = |name: &str, budget: f64, invoiced: f64, paid: f64, outstanding: f64, margin: f64| {
        format!(
            "{:<30} {:>15} {:>15} {:>15} {:>15} {:>7}%",
            name,
            money(budget),
            money(invoiced),
            money(paid),
            money(outstanding),
            format_one_decimal(margin)
        )
    };

    let mut lines = vec![format!(
        "{:<30} {:>15} {:>15} {:>15} {:>15} {:>8}",
        "Project", "Budget", "Invoiced", "Paid", "Outstanding", "Margin"
    )];
    for p in &report.projects {
        let mut line = row(&p.project_name, p.budget, p.invoiced, p.paid, p.outstanding, p.margin);
        if p.at_risk {
            line.push_str("  at risk");
        }
        lines.push(line);
    }
    let t = &report.totals;
    lines.push(row("Total", t.budget, t.invoiced, t.paid, t.outstanding, t.margin));
    finish(lines)
}

pub fn urgent(tasks: &[&Task], dataset: &StudioDataset, now: DateTime<Utc>) -> String {
    if tasks.is_empty() {
        return "Nothing urgent today.\n".to_string();
    }

    let lines = tasks
        .iter()
        .map(|task| {
            let project = task
                .project_id
                .as_deref()
                .and_then(|id| dataset.project(id))
                .map_or("General", |p| p.name.as_str());
            let due = task
                .due_date
                .map_or_else(|| "no due date".to_string(), |d| format_relative_date(d, now));
            format!("- [{}] {} ({}, {})", task.priority, task.title, project, due)
        })
        .collect();
    finish(lines)
}

pub fn reminders(candidates: &[ReminderCandidate]) -> String {
    if candidates.is_empty() {
        return "No overdue tasks need a reminder.\n".to_string();
    }

    let lines = candidates
        .iter()
        .map(|c| {
            let recipient = match &c.client_email {
                Some(email) => format!("{} <{}>", c.client_name, email),
                None => c.client_name.clone(),
            };
            let days = if c.days_past_due == 1 { "day" } else { "days" };
            format!(
                "- {} ({}, {}) {} {} overdue",
                c.title, c.project_name, recipient, c.days_past_due, days
            )
        })
        .collect();
    finish(lines)
}

fn finish(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
