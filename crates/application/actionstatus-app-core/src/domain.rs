use std::sync::Arc;

use actionstatus_core::{Repo, RepoId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type RefreshRunId = uuid::Uuid;

fn default_github_url() -> String {
    actionstatus_config::DEFAULT_GITHUB_URL.to_string()
}

fn default_refresh_concurrency() -> usize {
    actionstatus_config::DEFAULT_REFRESH_CONCURRENCY
}

fn default_request_timeout_secs() -> u64 {
    actionstatus_config::DEFAULT_REQUEST_TIMEOUT_SECS
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_github_url")]
    pub github_base_url: String,
    #[serde(default = "default_refresh_concurrency")]
    pub refresh_concurrency: usize,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            github_base_url: default_github_url(),
            refresh_concurrency: default_refresh_concurrency(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BootState {
    #[default]
    Empty,
    Loading,
    Ready,
    Failed(String),
}

#[derive(Debug, Clone, Default)]
pub struct RefreshState {
    /// Run whose results will be accepted; older runs are stale.
    pub run_id: Option<RefreshRunId>,
    pub in_flight: bool,
    pub last_error: Option<String>,
    pub last_completed: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    Save,
    Refresh,
}

/// Non-blocking problem shown to the user until the same kind of work succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    pub fn save(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::Save,
            message: message.into(),
        }
    }

    pub fn refresh(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::Refresh,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub boot: BootState,

    /// Display order. Shared with save and refresh snapshots; the reducer
    /// copies on write.
    pub repos: Arc<Vec<Repo>>,
    pub selected_id: Option<RepoId>,
    pub editing: bool,

    pub refresh: RefreshState,

    pub warning: Option<Warning>,
}

impl AppState {
    pub fn repo(&self, id: RepoId) -> Option<&Repo> {
        self.repos.iter().find(|r| r.id == id)
    }

    pub fn position(&self, id: RepoId) -> Option<usize> {
        self.repos.iter().position(|r| r.id == id)
    }

    pub fn selected(&self) -> Option<&Repo> {
        self.selected_id.and_then(|id| self.repo(id))
    }

    pub fn has_warning(&self, kind: WarningKind) -> bool {
        self.warning.as_ref().is_some_and(|w| w.kind == kind)
    }
}
