//! Dashboard overview: quick stats, today's schedule and the most recently
//! touched projects.

use chrono::{DateTime, Utc};
use models::{
    dataset::StudioDataset,
    meeting::MeetingType,
    project::ProjectStatus,
    task::TaskStatus,
};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::task_triage::day_bounds;

pub const RECENT_PROJECT_LIMIT: usize = 5;

/// Counts shown in the dashboard's quick stats row
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct DashboardStats {
    pub active_projects: usize,
    /// Every task except cancelled ones
    pub total_tasks: usize,
    pub completed_tasks: usize,
    /// Open tasks due before the start of today
    pub overdue_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct ScheduledMeeting {
    pub id: String,
    pub title: String,
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub meeting_type: MeetingType,
    pub project_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct RecentProject {
    pub id: String,
    pub name: String,
    pub status: ProjectStatus,
    pub client_name: Option<String>,
    pub task_count: usize,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct DashboardOverview {
    pub stats: DashboardStats,
    pub today_meetings: Vec<ScheduledMeeting>,
    pub recent_projects: Vec<RecentProject>,
}

pub fn dashboard_overview(dataset: &StudioDataset, now: DateTime<Utc>) -> DashboardOverview {
    DashboardOverview {
        stats: dashboard_stats(dataset, now),
        today_meetings: today_meetings(dataset, now),
        recent_projects: recent_projects(dataset, RECENT_PROJECT_LIMIT),
    }
}

pub fn dashboard_stats(dataset: &StudioDataset, now: DateTime<Utc>) -> DashboardStats {
    let (start_of_today, _) = day_bounds(now);
    let tasks = &dataset.tasks;

    DashboardStats {
        active_projects: dataset
            .projects
            .iter()
            .filter(|p| p.status == ProjectStatus::Active)
            .count(),
        total_tasks: tasks
            .iter()
            .filter(|t| t.status != TaskStatus::Cancelled)
            .count(),
        completed_tasks: tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Complete)
            .count(),
        overdue_count: tasks
            .iter()
            .filter(|t| t.is_open() && t.due_date.is_some_and(|due| due < start_of_today))
            .count(),
    }
}

/// Meetings within the current UTC day, earliest first
pub fn today_meetings(dataset: &StudioDataset, now: DateTime<Utc>) -> Vec<ScheduledMeeting> {
    let (start, end) = day_bounds(now);

    let mut meetings: Vec<ScheduledMeeting> = dataset
        .meetings
        .iter()
        .filter(|m| start <= m.date && m.date < end)
        .map(|m| ScheduledMeeting {
            id: m.id.clone(),
            title: m.title.clone(),
            date: m.date,
            meeting_type: m.meeting_type,
            project_name: m
                .project_id
                .as_deref()
                .and_then(|id| dataset.project(id))
                .map(|p| p.name.clone()),
        })
        .collect();
    meetings.sort_by_key(|m| m.date);
    meetings
}

/// Active and negotiating projects, most recently updated first
pub fn recent_projects(dataset: &StudioDataset, limit: usize) -> Vec<RecentProject> {
    let mut projects: Vec<RecentProject> = dataset
        .projects
        .iter()
        .filter(|p| p.status.is_open_pipeline())
        .map(|p| RecentProject {
            id: p.id.clone(),
            name: p.name.clone(),
            status: p.status,
            client_name: p
                .client_id
                .as_deref()
                .and_then(|id| dataset.client(id))
                .map(|c| c.name.clone()),
            task_count: dataset
                .tasks
                .iter()
                .filter(|t| t.project_id.as_deref() == Some(p.id.as_str()))
                .count(),
            updated_at: p.updated_at,
        })
        .collect();
    projects.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    projects.truncate(limit);
    projects
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use models::{
        client::Client,
        meeting::Meeting,
        task::{Task, TaskPriority},
    };

    use super::*;
    use crate::services::project_financials::test_support::project;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, 9, 0, 0).unwrap()
    }

    fn task(id: &str, status: TaskStatus, due_date: Option<DateTime<Utc>>) -> Task {
        Task {
            id: id.to_string(),
            project_id: None,
            title: format!("Task {}", id),
            description: None,
            status,
            priority: TaskPriority::Normal,
            due_date,
        }
    }

    fn meeting(id: &str, date: DateTime<Utc>) -> Meeting {
        Meeting {
            id: id.to_string(),
            title: format!("Meeting {}", id),
            date,
            meeting_type: MeetingType::Meeting,
            project_id: None,
            summary: None,
            confirmed: false,
        }
    }

    #[test]
    fn test_stats_counts() {
        let mut lead = project("lead", None, now());
        lead.project.status = ProjectStatus::Lead;
        let start_of_today = Utc.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).unwrap();

        let dataset = StudioDataset {
            projects: vec![project("a", None, now()), project("b", None, now()), lead],
            tasks: vec![
                task("late", TaskStatus::Open, Some(start_of_today - Duration::minutes(1))),
                task("today", TaskStatus::InProgress, Some(start_of_today)),
                task("done", TaskStatus::Complete, Some(now() - Duration::days(3))),
                task("dropped", TaskStatus::Cancelled, Some(now() - Duration::days(3))),
                task("waiting", TaskStatus::AwaitingClient, Some(now() - Duration::days(2))),
                task("undated", TaskStatus::Open, None),
            ],
            ..Default::default()
        };

        assert_eq!(
            dashboard_stats(&dataset, now()),
            DashboardStats {
                active_projects: 2,
                total_tasks: 5,
                completed_tasks: 1,
                overdue_count: 2,
            }
        );
    }

    #[test]
    fn test_today_meetings_window_and_order() {
        let mut villa = project("p1", None, now());
        villa.project.name = "Villa X".to_string();
        let mut visit = meeting("visit", now() + Duration::hours(5));
        visit.project_id = Some("p1".to_string());

        let dataset = StudioDataset {
            projects: vec![villa],
            meetings: vec![
                visit,
                meeting("yesterday", now() - Duration::hours(10)),
                meeting("early", Utc.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).unwrap()),
                meeting("midnight", Utc.with_ymd_and_hms(2025, 1, 16, 0, 0, 0).unwrap()),
            ],
            ..Default::default()
        };

        let meetings = today_meetings(&dataset, now());
        let ids: Vec<&str> = meetings.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["early", "visit"]);
        assert_eq!(meetings[1].project_name.as_deref(), Some("Villa X"));
        assert!(meetings[0].project_name.is_none());
    }

    #[test]
    fn test_recent_projects_newest_first() {
        let mut projects: Vec<_> = (0..7)
            .map(|i| project(&format!("p{}", i), None, now() - Duration::days(i)))
            .collect();
        projects[0].project.status = ProjectStatus::ClosedWon;
        projects[3].project.status = ProjectStatus::Negotiation;
        projects[3].project.client_id = Some("c1".to_string());

        let mut linked = task("t1", TaskStatus::Open, None);
        linked.project_id = Some("p3".to_string());

        let dataset = StudioDataset {
            clients: vec![Client {
                id: "c1".to_string(),
                name: "Elena Martinez".to_string(),
                company: None,
                email: None,
            }],
            projects,
            tasks: vec![linked],
            ..Default::default()
        };

        let recent = recent_projects(&dataset, RECENT_PROJECT_LIMIT);
        let ids: Vec<&str> = recent.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2", "p3", "p4", "p5"]);
        assert_eq!(recent[2].client_name.as_deref(), Some("Elena Martinez"));
        assert_eq!(recent[2].task_count, 1);
        assert_eq!(recent[0].task_count, 0);
    }
}
