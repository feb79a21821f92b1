use actionstatus_core::{Repo, StatusUpdate};
use async_trait::async_trait;

/// Durable storage for the repository list.
pub trait RepoStore: Send + Sync + 'static {
    fn load(&self) -> anyhow::Result<Vec<Repo>>;
    fn save(&self, repos: &[Repo]) -> anyhow::Result<()>;
}

/// Reports current build statuses. May return updates for any subset of
/// `repos`; repos it says nothing about keep their status.
#[async_trait]
pub trait StatusSource: Send + Sync + 'static {
    async fn fetch(&self, repos: &[Repo]) -> anyhow::Result<Vec<StatusUpdate>>;
}
