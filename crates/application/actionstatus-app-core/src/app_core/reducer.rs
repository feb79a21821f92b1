use std::collections::HashSet;
use std::sync::Arc;

use actionstatus_core::merge_statuses;

use crate::domain::{AppState, BootState, Warning, WarningKind};

use super::events::DomainEvent;

pub fn reduce(mut state: AppState, ev: DomainEvent) -> AppState {
    match ev {
        DomainEvent::BootLoadingStarted => {
            state.boot = BootState::Loading;
        }

        DomainEvent::InitialStateLoaded { repos } => {
            state.repos = Arc::new(repos);
            state.selected_id = None;
            state.boot = BootState::Ready;
        }

        DomainEvent::BootFailed { message } => {
            state.boot = BootState::Failed(message);
        }

        DomainEvent::RepoAdded(repo) => Arc::make_mut(&mut state.repos).push(repo),

        DomainEvent::ReposRemoved { ids } => {
            let ids: HashSet<_> = ids.into_iter().collect();
            Arc::make_mut(&mut state.repos).retain(|r| !ids.contains(&r.id));
            if state.selected_id.is_some_and(|sel| ids.contains(&sel)) {
                state.selected_id = None;
            }
        }

        DomainEvent::RepoEdited(repo) => {
            if let Some(slot) = Arc::make_mut(&mut state.repos)
                .iter_mut()
                .find(|r| r.id == repo.id)
            {
                *slot = repo;
            }
        }

        DomainEvent::SelectionChanged(id) => state.selected_id = id,
        DomainEvent::EditingChanged(editing) => state.editing = editing,

        DomainEvent::RefreshStarted { run_id } => {
            state.refresh.run_id = Some(run_id);
            state.refresh.in_flight = true;
            state.refresh.last_error = None;
        }

        DomainEvent::RefreshCompleted {
            run_id: _,
            updates,
            checked_at,
        } => {
            merge_statuses(Arc::make_mut(&mut state.repos).as_mut_slice(), &updates, checked_at);
            if state.has_warning(WarningKind::Refresh) {
                state.warning = None;
            }
            state.refresh.in_flight = false;
            state.refresh.last_error = None;
            state.refresh.last_completed = Some(checked_at);
        }

        DomainEvent::RefreshFailed { run_id: _, message } => {
            state.refresh.in_flight = false;
            state.warning = Some(Warning::refresh(format!("Refresh failed: {message}")));
            state.refresh.last_error = Some(message);
        }

        DomainEvent::Warning(warning) => {
            state.warning = Some(warning);
        }

        DomainEvent::SaveRecovered => {
            if state.has_warning(WarningKind::Save) {
                state.warning = None;
            }
        }
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use actionstatus_core::Repo;

    #[test]
    fn removing_the_selected_repo_clears_selection() {
        let a = Repo::new("a", "", "Tests");
        let b = Repo::new("b", "", "Tests");
        let state = AppState {
            repos: Arc::new(vec![a.clone(), b.clone()]),
            selected_id: Some(b.id),
            ..Default::default()
        };

        let next = reduce(state, DomainEvent::ReposRemoved { ids: vec![b.id] });
        assert_eq!(*next.repos, vec![a]);
        assert_eq!(next.selected_id, None);
    }

    #[test]
    fn removing_other_repos_keeps_selection() {
        let a = Repo::new("a", "", "Tests");
        let b = Repo::new("b", "", "Tests");
        let state = AppState {
            repos: Arc::new(vec![a.clone(), b.clone()]),
            selected_id: Some(a.id),
            ..Default::default()
        };

        let next = reduce(state, DomainEvent::ReposRemoved { ids: vec![b.id] });
        assert_eq!(next.selected_id, Some(a.id));
    }

    #[test]
    fn failed_refresh_keeps_statuses_and_records_error() {
        let mut a = Repo::new("a", "org", "Tests");
        a.status = actionstatus_core::BuildStatus::Succeeded;
        let run_id = uuid::Uuid::new_v4();
        let state = AppState {
            repos: Arc::new(vec![a.clone()]),
            ..Default::default()
        };

        let state = reduce(state, DomainEvent::RefreshStarted { run_id });
        assert!(state.refresh.in_flight);

        let state = reduce(
            state,
            DomainEvent::RefreshFailed {
                run_id,
                message: "timed out".into(),
            },
        );
        assert!(!state.refresh.in_flight);
        assert_eq!(state.refresh.last_error.as_deref(), Some("timed out"));
        assert!(state.has_warning(WarningKind::Refresh));
        assert_eq!(*state.repos, vec![a]);
    }

    #[test]
    fn recovered_save_clears_only_save_warnings() {
        let state = reduce(
            AppState::default(),
            DomainEvent::Warning(Warning::save("Failed to save repositories: disk full")),
        );
        let state = reduce(state, DomainEvent::SaveRecovered);
        assert_eq!(state.warning, None);

        let run_id = uuid::Uuid::new_v4();
        let state = reduce(
            state,
            DomainEvent::RefreshFailed {
                run_id,
                message: "offline".into(),
            },
        );
        let state = reduce(state, DomainEvent::SaveRecovered);
        assert!(state.has_warning(WarningKind::Refresh));
    }

    #[test]
    fn snapshots_are_not_changed_by_later_events() {
        let state = reduce(
            AppState::default(),
            DomainEvent::RepoAdded(Repo::new("a", "", "Tests")),
        );
        let snapshot = state.repos.clone();

        let state = reduce(
            state,
            DomainEvent::RepoAdded(Repo::new("b", "", "Tests")),
        );
        assert_eq!(snapshot.len(), 1);
        assert_eq!(state.repos.len(), 2);
    }
}
