use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use actionstatus_core::{Repo, RepoEdit, RepoId};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::app_core::{AppCommand, AppStore, DomainEvent, SubscriptionId};
use crate::domain::{AppState, RefreshRunId, Warning, WarningKind};
use crate::error::ListError;
use crate::ports::{RepoStore, StatusSource};
use crate::refresh::RefreshCoordinator;

/// Owns the monitored repository list, its selection and edit mode.
///
/// Every mutation goes through [`AppStore::apply`], so listeners observe each
/// change exactly once and never see a half-applied batch. The list is saved
/// through the [`RepoStore`] after each mutation; save errors become warnings.
pub struct RepoListController<R, S> {
    pub store: AppStore,
    repos: Arc<R>,
    refresher: RefreshCoordinator<S>,

    tx: mpsc::Sender<DomainEvent>,
    rx: mpsc::Receiver<DomainEvent>,
}

impl<R, S> RepoListController<R, S>
where
    R: RepoStore,
    S: StatusSource,
{
    pub fn new(store: AppStore, repos: R, source: S) -> Self {
        Self::with_refresh_deadline(
            store,
            repos,
            source,
            Duration::from_secs(actionstatus_config::REFRESH_DEADLINE_SECS),
        )
    }

    pub fn with_refresh_deadline(store: AppStore, repos: R, source: S, deadline: Duration) -> Self {
        let (tx, rx) = mpsc::channel(actionstatus_config::EVENT_CHANNEL_CAPACITY);
        Self {
            store,
            repos: Arc::new(repos),
            refresher: RefreshCoordinator::new(Arc::new(source), tx.clone(), deadline),
            tx,
            rx,
        }
    }

    pub fn state(&self) -> AppState {
        self.store.state()
    }

    pub fn subscribe(
        &self,
        listener: impl Fn(&DomainEvent, &AppState) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.store.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    pub fn load(&mut self) -> Result<(), ListError> {
        self.store.apply(DomainEvent::BootLoadingStarted);
        match self.repos.load() {
            Ok(repos) => {
                info!("Loaded {} repositories", repos.len());
                self.store.apply(DomainEvent::InitialStateLoaded { repos });
                Ok(())
            }
            Err(e) => {
                let message = format!("{e:#}");
                warn!("Failed to load repositories: {}", message);
                self.store.apply(DomainEvent::BootFailed {
                    message: message.clone(),
                });
                Err(ListError::PersistenceFailure(message))
            }
        }
    }

    pub fn add(&mut self) -> Repo {
        let repo = Repo::new(
            actionstatus_config::DEFAULT_REPO_NAME,
            "",
            actionstatus_config::DEFAULT_WORKFLOW,
        );
        info!("Adding repository {}", repo.id);
        self.mutate(DomainEvent::RepoAdded(repo.clone()));
        repo
    }

    /// Removes the repos at the given positions as one batch.
    ///
    /// Positions may repeat and come in any order. If any is out of range
    /// nothing is removed.
    pub fn remove(&mut self, at: &[usize]) -> Result<Vec<Repo>, ListError> {
        let positions: BTreeSet<usize> = at.iter().copied().collect();
        let removed: Vec<Repo> = self.store.read(|state| {
            let len = state.repos.len();
            if let Some(&index) = positions.iter().find(|&&i| i >= len) {
                return Err(ListError::InvalidIndex { index, len });
            }
            Ok(positions.iter().map(|&i| state.repos[i].clone()).collect())
        })?;
        if removed.is_empty() {
            return Ok(removed);
        }

        let ids = removed.iter().map(|r| r.id).collect();
        info!("Removing {} repositories", removed.len());
        self.mutate(DomainEvent::ReposRemoved { ids });
        Ok(removed)
    }

    pub fn remove_id(&mut self, id: RepoId) -> Result<Repo, ListError> {
        let repo = self
            .store
            .read(|s| s.repo(id).cloned())
            .ok_or(ListError::NotFound(id))?;
        info!("Removing repository {}", id);
        self.mutate(DomainEvent::ReposRemoved { ids: vec![id] });
        Ok(repo)
    }

    pub fn edit(&mut self, id: RepoId, edit: RepoEdit) -> Result<Repo, ListError> {
        let mut repo = self
            .store
            .read(|s| s.repo(id).cloned())
            .ok_or(ListError::NotFound(id))?;
        if edit.is_empty() {
            return Ok(repo);
        }
        edit.apply_to(&mut repo);
        debug!("Editing repository {}", id);
        self.mutate(DomainEvent::RepoEdited(repo.clone()));
        Ok(repo)
    }

    /// Records the selection. Any id is accepted; removal clears it.
    pub fn select(&mut self, id: Option<RepoId>) {
        self.store.apply(DomainEvent::SelectionChanged(id));
    }

    /// Rows only become selectable in edit mode.
    pub fn tap_row(&mut self, id: RepoId) {
        if self.store.read(|s| s.editing) {
            self.select(Some(id));
        }
    }

    pub fn set_editing(&mut self, editing: bool) {
        self.store.apply(DomainEvent::EditingChanged(editing));
    }

    pub fn toggle_editing(&mut self) {
        let editing = self.store.read(|s| s.editing);
        self.set_editing(!editing);
    }

    /// Starts a status refresh, superseding any refresh still in flight.
    /// Results are merged by [`tick`](Self::tick).
    pub fn refresh(&mut self) -> RefreshRunId {
        let run_id: RefreshRunId = uuid::Uuid::new_v4();
        self.store.apply(DomainEvent::RefreshStarted { run_id });

        let repos = self.store.read(|s| Arc::clone(&s.repos));
        debug!("Refresh {} started for {} repositories", run_id, repos.len());
        if let Err(e) = self.refresher.start(run_id, repos) {
            self.store.apply(DomainEvent::RefreshFailed {
                run_id,
                message: format!("Failed to start refresh worker thread: {e}"),
            });
        }
        run_id
    }

    /// How long a refresh may run before it is reported as timed out.
    pub fn set_refresh_deadline(&mut self, deadline: Duration) {
        self.refresher.set_deadline(deadline);
    }

    pub fn is_refreshing(&self) -> bool {
        self.store.read(|s| s.refresh.in_flight)
    }

    /// Outcome of the last finished refresh.
    pub fn last_refresh(&self) -> Result<(), ListError> {
        match self.store.read(|s| s.refresh.last_error.clone()) {
            Some(message) => Err(ListError::RefreshFailure(message)),
            None => Ok(()),
        }
    }

    pub fn dispatch(&mut self, cmd: AppCommand) -> Result<(), ListError> {
        match cmd {
            AppCommand::LoadInitialState => self.load()?,
            AppCommand::AddRepo => {
                let repo = self.add();
                self.select(Some(repo.id));
            }
            AppCommand::RemoveAt(at) => {
                self.remove(&at)?;
            }
            AppCommand::RemoveRepo(id) => {
                self.remove_id(id)?;
            }
            AppCommand::EditRepo { id, edit } => {
                self.edit(id, edit)?;
            }
            AppCommand::Select(id) => self.select(id),
            AppCommand::TapRow(id) => self.tap_row(id),
            AppCommand::SetEditing(editing) => self.set_editing(editing),
            AppCommand::ToggleEditing => self.toggle_editing(),
            AppCommand::Refresh | AppCommand::Appeared => {
                self.refresh();
            }
        }
        Ok(())
    }

    /// Applies events delivered by background work. Refresh results from a
    /// run other than the current one are dropped. Returns how many events
    /// were applied.
    pub fn tick(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(ev) = self.rx.try_recv() {
            if let Some(run_id) = ev.refresh_result_run_id() {
                let current = self.store.read(|s| s.refresh.run_id);
                if current != Some(run_id) {
                    debug!("Dropping result of stale refresh {}", run_id);
                    continue;
                }
            }
            let persist = ev.mutates_list();
            self.store.apply(ev);
            if persist {
                self.persist();
            }
            applied += 1;
        }
        applied
    }

    pub fn sender(&self) -> mpsc::Sender<DomainEvent> {
        self.tx.clone()
    }

    fn mutate(&self, ev: DomainEvent) {
        self.store.apply(ev);
        self.persist();
    }

    fn persist(&self) {
        let repos = self.store.read(|s| Arc::clone(&s.repos));
        let result = self.repos.save(&repos);
        drop(repos);

        match result {
            Ok(()) => {
                if self.store.read(|s| s.has_warning(WarningKind::Save)) {
                    self.store.apply(DomainEvent::SaveRecovered);
                }
            }
            Err(e) => {
                warn!("Failed to save repositories: {:#}", e);
                self.store.apply(DomainEvent::Warning(Warning::save(format!(
                    "Failed to save repositories: {e:#}"
                ))));
            }
        }
    }
}
