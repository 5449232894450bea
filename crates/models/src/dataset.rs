use serde::{Deserialize, Serialize};

use super::{
    client::Client, meeting::Meeting, project::ProjectWithFinance, reminder::Reminder,
    settings::SystemSettings, task::Task,
};

/// Everything the advisor needs, as loaded from the studio's records
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudioDataset {
    #[serde(default)]
    pub settings: SystemSettings,
    #[serde(default)]
    pub clients: Vec<Client>,
    #[serde(default)]
    pub projects: Vec<ProjectWithFinance>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub reminders: Vec<Reminder>,
    #[serde(default)]
    pub meetings: Vec<Meeting>,
}

impl StudioDataset {
    pub fn project(&self, id: &str) -> Option<&ProjectWithFinance> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn client(&self, id: &str) -> Option<&Client> {
        self.clients.iter().find(|c| c.id == id)
    }
}
