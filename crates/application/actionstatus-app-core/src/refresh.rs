use std::sync::Arc;
use std::time::Duration;

use actionstatus_core::Repo;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::app_core::DomainEvent;
use crate::domain::RefreshRunId;
use crate::ports::StatusSource;

/// Runs status fetches off the owning thread. Starting a run cancels the
/// previous one; results come back as events on `tx`.
pub struct RefreshCoordinator<S> {
    source: Arc<S>,
    tx: mpsc::Sender<DomainEvent>,
    cancel: Option<CancellationToken>,
    deadline: Duration,
}

impl<S: StatusSource> RefreshCoordinator<S> {
    pub fn new(source: Arc<S>, tx: mpsc::Sender<DomainEvent>, deadline: Duration) -> Self {
        Self {
            source,
            tx,
            cancel: None,
            deadline,
        }
    }

    pub fn set_deadline(&mut self, deadline: Duration) {
        self.deadline = deadline;
    }

    pub fn cancel(&mut self) {
        if let Some(token) = self.cancel.take() {
            token.cancel();
        }
    }

    pub fn start(&mut self, run_id: RefreshRunId, repos: Arc<Vec<Repo>>) -> anyhow::Result<()> {
        self.cancel();
        let token = CancellationToken::new();
        self.cancel = Some(token.clone());

        let tx = self.tx.clone();
        let source = self.source.clone();
        let deadline = self.deadline;

        std::thread::Builder::new()
            .name("actionstatus-refresh".into())
            .spawn(move || {
                let rt = match crate::async_runtime::runtime() {
                    Ok(rt) => rt,
                    Err(e) => {
                        let _ = tx.blocking_send(DomainEvent::RefreshFailed {
                            run_id,
                            message: e.to_string(),
                        });
                        return;
                    }
                };

                rt.block_on(async move {
                    let outcome = tokio::select! {
                        _ = token.cancelled() => {
                            debug!("Refresh {} superseded", run_id);
                            return;
                        }
                        res = tokio::time::timeout(deadline, source.fetch(&repos)) => res,
                    };

                    let ev = match outcome {
                        Ok(Ok(updates)) => DomainEvent::RefreshCompleted {
                            run_id,
                            updates,
                            checked_at: chrono::Utc::now(),
                        },
                        Ok(Err(e)) => {
                            warn!("Refresh {} failed: {:#}", run_id, e);
                            DomainEvent::RefreshFailed {
                                run_id,
                                message: format!("{e:#}"),
                            }
                        }
                        Err(_) => {
                            warn!("Refresh {} timed out after {:?}", run_id, deadline);
                            DomainEvent::RefreshFailed {
                                run_id,
                                message: format!("timed out after {deadline:?}"),
                            }
                        }
                    };
                    let _ = tx.send(ev).await;
                });
            })?;

        Ok(())
    }
}

impl<S> Drop for RefreshCoordinator<S> {
    fn drop(&mut self) {
        if let Some(token) = self.cancel.take() {
            token.cancel();
        }
    }
}
