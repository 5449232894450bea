//! Picks the tasks the dashboard should surface: the short urgent list and the
//! overdue tasks that still need a reminder drafted.

use chrono::{DateTime, Duration, Utc};
use models::{
    dataset::StudioDataset,
    task::{Task, TaskPriority},
};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub const DEFAULT_URGENT_TASK_LIMIT: usize = 5;

/// An overdue task with no reminder in the pipeline yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct ReminderCandidate {
    pub task_id: String,
    pub title: String,
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    pub days_past_due: i64,
    pub project_name: String,
    pub client_name: String,
    pub client_email: Option<String>,
}

/// Open tasks that are payment-urgent or due by the end of today, most pressing first
pub fn urgent_tasks(tasks: &[Task], now: DateTime<Utc>, limit: usize) -> Vec<&Task> {
    let (_, end_of_today) = day_bounds(now);

    let mut urgent: Vec<&Task> = tasks
        .iter()
        .filter(|t| t.is_open())
        .filter(|t| {
            t.priority == TaskPriority::UrgentPayment
                || t.due_date.is_some_and(|due| due <= end_of_today)
        })
        .collect();

    // undated tasks sort after dated ones within a priority
    urgent.sort_by_key(|t| (t.priority.order(), t.due_date.is_none(), t.due_date));
    urgent.truncate(limit);
    urgent
}

/// Overdue open tasks that have neither a draft nor an approved reminder
pub fn reminder_candidates(dataset: &StudioDataset, now: DateTime<Utc>) -> Vec<ReminderCandidate> {
    dataset
        .tasks
        .iter()
        .filter(|t| t.is_open())
        .filter(|t| {
            !dataset
                .reminders
                .iter()
                .any(|r| r.task_id == t.id && r.status.is_pending())
        })
        .filter_map(|task| {
            let due_date = task.due_date.filter(|due| *due < now)?;
            let project = task.project_id.as_deref().and_then(|id| dataset.project(id));
            let client = project
                .and_then(|p| p.client_id.as_deref())
                .and_then(|id| dataset.client(id));

            Some(ReminderCandidate {
                task_id: task.id.clone(),
                title: task.title.clone(),
                description: task.description.clone(),
                due_date,
                days_past_due: days_past_due(due_date, now),
                project_name: project
                    .map(|p| p.name.clone())
                    .unwrap_or_else(|| "General".to_string()),
                client_name: client
                    .map(|c| c.name.clone())
                    .unwrap_or_else(|| "Client".to_string()),
                client_email: client.and_then(|c| c.email.clone()),
            })
        })
        .collect()
}

/// Whole days since `due`, any part of a day counting as a full one
fn days_past_due(due: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let elapsed_ms = now.signed_duration_since(due).num_milliseconds();
    let day_ms = Duration::days(1).num_milliseconds();
    elapsed_ms.div_euclid(day_ms) + i64::from(elapsed_ms.rem_euclid(day_ms) != 0)
}

/// Start and end of the UTC day containing `now`
pub(crate) fn day_bounds(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = now
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .map_or(now, |midnight| midnight.and_utc());
    (start, start + Duration::days(1))
}
