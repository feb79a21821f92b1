use actionstatus_core::RepoId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListError {
    #[error("index {index} is out of range for {len} repositories")]
    InvalidIndex { index: usize, len: usize },
    #[error("repository {0} not found")]
    NotFound(RepoId),
    #[error("persistence failed: {0}")]
    PersistenceFailure(String),
    #[error("refresh failed: {0}")]
    RefreshFailure(String),
}
