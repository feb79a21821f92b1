use actionstatus_core::{Repo, RepoId, StatusUpdate};
use chrono::{DateTime, Utc};

use crate::domain::{RefreshRunId, Warning};

#[derive(Debug, Clone)]
pub enum DomainEvent {
    // Boot state
    BootLoadingStarted,
    InitialStateLoaded {
        repos: Vec<Repo>,
    },
    BootFailed {
        message: String,
    },

    // List mutations
    RepoAdded(Repo),
    /// One batch; observers see all ids gone at once.
    ReposRemoved {
        ids: Vec<RepoId>,
    },
    RepoEdited(Repo),

    // Presentation state
    SelectionChanged(Option<RepoId>),
    EditingChanged(bool),

    // Refresh
    RefreshStarted {
        run_id: RefreshRunId,
    },
    RefreshCompleted {
        run_id: RefreshRunId,
        updates: Vec<StatusUpdate>,
        checked_at: DateTime<Utc>,
    },
    RefreshFailed {
        run_id: RefreshRunId,
        message: String,
    },

    // User-visible, non-blocking
    Warning(Warning),
    /// A save went through after an earlier one failed.
    SaveRecovered,
}

impl DomainEvent {
    /// Run id carried by refresh results, used to drop stale completions.
    pub fn refresh_result_run_id(&self) -> Option<RefreshRunId> {
        match self {
            DomainEvent::RefreshCompleted { run_id, .. }
            | DomainEvent::RefreshFailed { run_id, .. } => Some(*run_id),
            _ => None,
        }
    }

    /// Whether applying this event changes the persisted list.
    pub fn mutates_list(&self) -> bool {
        matches!(
            self,
            DomainEvent::RepoAdded(_)
                | DomainEvent::ReposRemoved { .. }
                | DomainEvent::RepoEdited(_)
                | DomainEvent::RefreshCompleted { .. }
        )
    }
}
