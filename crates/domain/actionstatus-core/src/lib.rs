use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod badge;
pub mod merge;

pub use badge::{badge_for, Badge, StatusColor};
pub use merge::merge_statuses;

pub type RepoId = uuid::Uuid;

/// Build status of a monitored repository's workflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildStatus {
    #[default]
    Unknown,
    Running,
    Succeeded,
    Failed,
}

impl BuildStatus {
    pub const ALL: [BuildStatus; 4] = [
        BuildStatus::Unknown,
        BuildStatus::Running,
        BuildStatus::Succeeded,
        BuildStatus::Failed,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BuildStatus::Unknown => "unknown",
            BuildStatus::Running => "running",
            BuildStatus::Succeeded => "passing",
            BuildStatus::Failed => "failing",
        }
    }
}

/// One monitored repository. `id` never changes once assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repo {
    pub id: RepoId,
    pub name: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub workflow: String,
    #[serde(default)]
    pub status: BuildStatus,
    #[serde(default)]
    pub last_checked: Option<DateTime<Utc>>,
}

impl Repo {
    /// Creates a repo with a freshly generated id and no known status.
    pub fn new(name: impl Into<String>, owner: impl Into<String>, workflow: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            name: name.into(),
            owner: owner.into(),
            workflow: workflow.into(),
            status: BuildStatus::Unknown,
            last_checked: None,
        }
    }

    pub fn badge(&self) -> Badge {
        badge_for(self.status)
    }

    /// `owner/name`, or just the name while no owner is set.
    pub fn slug(&self) -> String {
        if self.owner.is_empty() {
            self.name.clone()
        } else {
            format!("{}/{}", self.owner, self.name)
        }
    }
}

/// Fields a user may change on an existing repo. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoEdit {
    pub name: Option<String>,
    pub owner: Option<String>,
    pub workflow: Option<String>,
}

impl RepoEdit {
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.owner.is_none() && self.workflow.is_none()
    }

    pub fn apply_to(&self, repo: &mut Repo) {
        if let Some(name) = &self.name {
            repo.name = name.clone();
        }
        if let Some(owner) = &self.owner {
            repo.owner = owner.clone();
        }
        if let Some(workflow) = &self.workflow {
            repo.workflow = workflow.clone();
        }
    }
}

/// A status reported for one repo by a refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusUpdate {
    pub id: RepoId,
    pub status: BuildStatus,
}
