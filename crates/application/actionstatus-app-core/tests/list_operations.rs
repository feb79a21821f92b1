mod common;

use std::collections::HashSet;
use std::sync::atomic::Ordering;
use std::sync::{mpsc, Arc, Mutex};
use std::time::Duration;

use actionstatus_app_core::{
    list_vm, AppCommand, AppState, AppStore, DomainEvent, ListError, RepoEdit,
    RepoListController, RepoStore, WarningKind,
};
use common::{controller, NullStore, ScriptedSource};

#[test]
fn many_adds_produce_unique_ids_in_order() {
    let mut c = RepoListController::new(
        AppStore::new(AppState::default()),
        NullStore,
        ScriptedSource::default(),
    );

    let ids: Vec<_> = (0..10_000).map(|_| c.add().id).collect();

    let state = c.state();
    assert_eq!(state.repos.len(), 10_000);
    let unique: HashSet<_> = ids.iter().collect();
    assert_eq!(unique.len(), ids.len());
    assert!(state.repos.iter().map(|r| r.id).eq(ids.into_iter()));
}

#[test]
fn large_batch_removal_keeps_the_rest_in_order() {
    let mut c = RepoListController::new(
        AppStore::new(AppState::default()),
        NullStore,
        ScriptedSource::default(),
    );
    let ids: Vec<_> = (0..10_000).map(|_| c.add().id).collect();

    let evens: Vec<usize> = (0..10_000).step_by(2).collect();
    let removed = c.remove(&evens).unwrap();
    assert_eq!(removed.len(), 5_000);

    let state = c.state();
    assert_eq!(state.repos.len(), 5_000);
    assert!(state
        .repos
        .iter()
        .map(|r| r.id)
        .eq(ids.iter().copied().skip(1).step_by(2)));
}

#[test]
fn new_repos_get_placeholder_defaults() {
    let (mut c, store, _) = controller();
    let repo = c.add();

    assert_eq!(repo.name, "Untitled");
    assert_eq!(repo.workflow, "Tests");
    assert_eq!(repo.status, actionstatus_app_core::BuildStatus::Unknown);
    assert_eq!(c.state().selected_id, None);
    assert_eq!(store.saved.lock().unwrap().len(), 1);
}

#[test]
fn batch_removal_keeps_relative_order() {
    let (mut c, _, _) = controller();
    let ids: Vec<_> = (0..6).map(|_| c.add().id).collect();

    // Unordered and repeated positions.
    let removed = c.remove(&[4, 1, 4, 0]).unwrap();
    let removed_ids: Vec<_> = removed.iter().map(|r| r.id).collect();
    assert_eq!(removed_ids, vec![ids[0], ids[1], ids[4]]);

    let left: Vec<_> = c.state().repos.iter().map(|r| r.id).collect();
    assert_eq!(left, vec![ids[2], ids[3], ids[5]]);
}

#[test]
fn out_of_range_removal_changes_nothing() {
    let (mut c, store, _) = controller();
    for _ in 0..3 {
        c.add();
    }
    let before = c.state().repos;
    let saves_before = store.saves.load(Ordering::SeqCst);

    let err = c.remove(&[0, 3]).unwrap_err();
    assert_eq!(err, ListError::InvalidIndex { index: 3, len: 3 });
    assert_eq!(c.state().repos, before);
    assert_eq!(store.saves.load(Ordering::SeqCst), saves_before);
}

#[test]
fn removing_the_selected_repo_clears_selection() {
    let (mut c, _, _) = controller();
    let _first = c.add();
    let second = c.add();
    let _third = c.add();
    assert_eq!(c.state().repos.len(), 3);
    assert_eq!(c.state().selected_id, None);

    c.select(Some(second.id));
    assert_eq!(c.state().selected_id, Some(second.id));

    c.remove(&[1]).unwrap();
    let state = c.state();
    assert_eq!(state.repos.len(), 2);
    assert_eq!(state.selected_id, None);
}

#[test]
fn removing_by_id_clears_selection_and_reports_missing_ids() {
    let (mut c, _, _) = controller();
    let repo = c.add();
    c.select(Some(repo.id));

    assert_eq!(c.remove_id(repo.id).unwrap().id, repo.id);
    assert_eq!(c.state().selected_id, None);
    assert_eq!(c.remove_id(repo.id), Err(ListError::NotFound(repo.id)));
}

#[test]
fn edit_changes_fields_in_place() {
    let (mut c, store, _) = controller();
    let a = c.add();
    let b = c.add();

    let edited = c
        .edit(
            a.id,
            RepoEdit {
                name: Some("widgets".into()),
                owner: Some("acme".into()),
                workflow: None,
            },
        )
        .unwrap();
    assert_eq!(edited.id, a.id);

    let state = c.state();
    assert_eq!(state.repos[0].name, "widgets");
    assert_eq!(state.repos[0].owner, "acme");
    assert_eq!(state.repos[0].workflow, "Tests");
    assert_eq!(state.repos[1].id, b.id);
    assert_eq!(store.saved.lock().unwrap()[0].name, "widgets");
}

#[test]
fn editing_an_unknown_id_fails() {
    let (mut c, _, _) = controller();
    let stranger = actionstatus_app_core::Repo::new("x", "", "Tests");
    assert_eq!(
        c.edit(stranger.id, RepoEdit::rename("y")),
        Err(ListError::NotFound(stranger.id))
    );
}

#[test]
fn every_mutation_is_persisted() {
    let (mut c, store, _) = controller();
    let a = c.add();
    c.add();
    c.edit(a.id, RepoEdit::rename("renamed")).unwrap();
    c.remove(&[1]).unwrap();

    assert_eq!(store.saves.load(Ordering::SeqCst), 4);
    let saved = store.saved.lock().unwrap().clone();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].name, "renamed");

    // Selection and edit mode are not part of the stored list.
    c.select(Some(a.id));
    c.set_editing(true);
    assert_eq!(store.saves.load(Ordering::SeqCst), 4);
}

#[test]
fn failed_save_keeps_the_mutation_and_warns() {
    let (mut c, store, _) = controller();
    store.fail.store(true, Ordering::SeqCst);

    let repo = c.add();
    let state = c.state();
    assert_eq!(state.repos.len(), 1);
    assert_eq!(state.repos[0].id, repo.id);
    assert!(state
        .warning
        .as_ref()
        .is_some_and(|w| w.kind == WarningKind::Save && w.message.contains("disk full")));
}

#[test]
fn save_warning_clears_once_saving_works_again() {
    let (mut c, store, _) = controller();
    store.fail.store(true, Ordering::SeqCst);
    c.add();
    assert!(c.state().has_warning(WarningKind::Save));

    store.fail.store(false, Ordering::SeqCst);
    c.add();
    let state = c.state();
    assert_eq!(state.warning, None);
    assert_eq!(list_vm(&state).warning, None);
    assert_eq!(store.saved.lock().unwrap().len(), 2);
}

/// Reads the app state from another thread while a save is in progress.
struct ConcurrentReadStore {
    app: AppStore,
    lengths: Arc<Mutex<Vec<usize>>>,
}

impl RepoStore for ConcurrentReadStore {
    fn load(&self) -> anyhow::Result<Vec<actionstatus_app_core::Repo>> {
        Ok(Vec::new())
    }

    fn save(&self, _repos: &[actionstatus_app_core::Repo]) -> anyhow::Result<()> {
        let app = self.app.clone();
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            let _ = tx.send(app.state().repos.len());
        });
        let len = rx
            .recv_timeout(Duration::from_secs(2))
            .map_err(|_| anyhow::anyhow!("state stayed locked during save"))?;
        self.lengths.lock().unwrap().push(len);
        Ok(())
    }
}

#[test]
fn state_stays_readable_while_saving() {
    let app = AppStore::new(AppState::default());
    let lengths: Arc<Mutex<Vec<usize>>> = Arc::default();
    let mut c = RepoListController::new(
        app.clone(),
        ConcurrentReadStore {
            app,
            lengths: lengths.clone(),
        },
        ScriptedSource::default(),
    );

    c.add();
    c.add();

    assert_eq!(c.state().warning, None);
    assert_eq!(*lengths.lock().unwrap(), vec![1, 2]);
}

#[test]
fn observers_see_a_batch_removal_once() {
    let (mut c, _, _) = controller();
    for _ in 0..4 {
        c.add();
    }

    let seen: Arc<Mutex<Vec<usize>>> = Arc::default();
    let sub = c.subscribe({
        let seen = seen.clone();
        move |ev, state| {
            if let DomainEvent::ReposRemoved { .. } = ev {
                seen.lock().unwrap().push(state.repos.len());
            }
        }
    });

    c.remove(&[0, 2, 3]).unwrap();
    assert_eq!(*seen.lock().unwrap(), vec![1]);

    assert!(c.unsubscribe(sub));
    c.remove(&[0]).unwrap();
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[test]
fn add_command_selects_the_new_repo() {
    let (mut c, _, _) = controller();
    c.dispatch(AppCommand::AddRepo).unwrap();

    let state = c.state();
    assert_eq!(state.repos.len(), 1);
    assert_eq!(state.selected_id, Some(state.repos[0].id));
}

#[test]
fn rows_are_only_selectable_while_editing() {
    let (mut c, _, _) = controller();
    let repo = c.add();

    c.tap_row(repo.id);
    assert_eq!(c.state().selected_id, None);

    c.dispatch(AppCommand::ToggleEditing).unwrap();
    assert!(c.state().editing);
    c.dispatch(AppCommand::TapRow(repo.id)).unwrap();
    assert_eq!(c.state().selected_id, Some(repo.id));

    c.dispatch(AppCommand::SetEditing(false)).unwrap();
    assert!(!c.state().editing);
}

#[test]
fn remove_command_surfaces_invalid_index() {
    let (mut c, _, _) = controller();
    assert_eq!(
        c.dispatch(AppCommand::RemoveAt(vec![0])),
        Err(ListError::InvalidIndex { index: 0, len: 0 })
    );
}

#[test]
fn load_restores_the_saved_list() {
    let (mut c, store, _) = controller();
    let saved = vec![
        actionstatus_app_core::Repo::new("one", "acme", "Tests"),
        actionstatus_app_core::Repo::new("two", "acme", "CI"),
    ];
    *store.saved.lock().unwrap() = saved.clone();

    c.load().unwrap();
    let state = c.state();
    assert_eq!(*state.repos, saved);
    assert_eq!(state.boot, actionstatus_app_core::BootState::Ready);
}

#[test]
fn failed_load_is_reported() {
    let (mut c, store, _) = controller();
    store.fail.store(true, Ordering::SeqCst);

    let err = c.load().unwrap_err();
    assert!(matches!(err, ListError::PersistenceFailure(_)));
    assert!(matches!(
        c.state().boot,
        actionstatus_app_core::BootState::Failed(_)
    ));
    assert!(c.state().repos.is_empty());
}
