use actionstatus_core::{Repo, RepoId, StatusColor};
use chrono::{DateTime, Utc};

use crate::domain::AppState;

fn format_last_checked(ts: Option<DateTime<Utc>>) -> Option<String> {
    ts.map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRowVm {
    pub id: RepoId,
    pub name: String,
    pub icon: &'static str,
    pub color: StatusColor,
    pub status_label: &'static str,
    pub last_checked_human: Option<String>,
    /// Rows lead to the editor only in edit mode.
    pub navigable: bool,
    pub selected: bool,
}

impl RepoRowVm {
    fn new(repo: &Repo, state: &AppState) -> Self {
        let badge = repo.badge();
        Self {
            id: repo.id,
            name: repo.name.clone(),
            icon: badge.icon,
            color: badge.color,
            status_label: repo.status.label(),
            last_checked_human: format_last_checked(repo.last_checked),
            navigable: state.editing,
            selected: state.selected_id == Some(repo.id),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RepoListVm {
    pub rows: Vec<RepoRowVm>,
    pub editing: bool,
    pub refreshing: bool,
    pub selected_id: Option<RepoId>,
    pub footer: String,
    pub warning: Option<String>,
}

pub fn footer_text(count: usize) -> String {
    format!("Monitoring {count} repos.")
}

pub fn list_vm(state: &AppState) -> RepoListVm {
    RepoListVm {
        rows: state
            .repos
            .iter()
            .map(|r| RepoRowVm::new(r, state))
            .collect(),
        editing: state.editing,
        refreshing: state.refresh.in_flight,
        selected_id: state.selected_id,
        footer: footer_text(state.repos.len()),
        warning: state.warning.as_ref().map(|w| w.message.clone()),
    }
}
