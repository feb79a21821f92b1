#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use actionstatus_app_core::ports::{RepoStore, StatusSource};
use actionstatus_app_core::{AppState, AppStore, Repo, RepoListController, StatusUpdate};

#[derive(Clone, Default)]
pub struct MemoryStore {
    pub saved: Arc<Mutex<Vec<Repo>>>,
    pub saves: Arc<AtomicUsize>,
    pub fail: Arc<AtomicBool>,
}

impl RepoStore for MemoryStore {
    fn load(&self) -> anyhow::Result<Vec<Repo>> {
        if self.fail.load(Ordering::SeqCst) {
            anyhow::bail!("disk unavailable");
        }
        Ok(self.saved.lock().unwrap().clone())
    }

    fn save(&self, repos: &[Repo]) -> anyhow::Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            anyhow::bail!("disk full");
        }
        *self.saved.lock().unwrap() = repos.to_vec();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Accepts and discards every save.
pub struct NullStore;

impl RepoStore for NullStore {
    fn load(&self) -> anyhow::Result<Vec<Repo>> {
        Ok(Vec::new())
    }

    fn save(&self, _repos: &[Repo]) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Answers the n-th fetch with `script[n]` after the given delay; fetches past
/// the end of the script report nothing.
#[derive(Clone, Default)]
pub struct ScriptedSource {
    pub script: Arc<Mutex<Vec<(Duration, Result<Vec<StatusUpdate>, String>)>>>,
    pub calls: Arc<AtomicUsize>,
}

impl ScriptedSource {
    pub fn push_ok(&self, delay: Duration, updates: Vec<StatusUpdate>) {
        self.script.lock().unwrap().push((delay, Ok(updates)));
    }

    pub fn push_err(&self, delay: Duration, message: &str) {
        self.script
            .lock()
            .unwrap()
            .push((delay, Err(message.to_string())));
    }
}

#[async_trait::async_trait]
impl StatusSource for ScriptedSource {
    async fn fetch(&self, _repos: &[Repo]) -> anyhow::Result<Vec<StatusUpdate>> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        let step = {
            let script = self.script.lock().unwrap();
            script
                .get(n)
                .map(|(delay, res)| (*delay, res.clone()))
        };
        match step {
            Some((delay, res)) => {
                tokio::time::sleep(delay).await;
                res.map_err(|m| anyhow::anyhow!(m))
            }
            None => Ok(Vec::new()),
        }
    }
}

pub type TestController = RepoListController<MemoryStore, ScriptedSource>;

pub fn controller() -> (TestController, MemoryStore, ScriptedSource) {
    let store = MemoryStore::default();
    let source = ScriptedSource::default();
    let c = RepoListController::new(
        AppStore::new(AppState::default()),
        store.clone(),
        source.clone(),
    );
    (c, store, source)
}

/// Ticks until no refresh is in flight.
pub fn wait_for_refresh(c: &mut TestController) {
    let deadline = Instant::now() + Duration::from_secs(3);
    while Instant::now() < deadline {
        c.tick();
        if !c.is_refreshing() {
            return;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    panic!("refresh did not finish in time");
}
