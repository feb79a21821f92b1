use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::{Repo, RepoId, StatusUpdate};

/// Applies reported statuses to `repos` in place.
///
/// Updates for ids that are not in `repos` are ignored and repos without an
/// update keep their current status. Order and identity are never touched.
/// Returns the ids of the repos that received an update.
pub fn merge_statuses(
    repos: &mut [Repo],
    updates: &[StatusUpdate],
    checked_at: DateTime<Utc>,
) -> Vec<RepoId> {
    // Last report wins if a source repeats an id.
    let by_id: HashMap<RepoId, _> = updates.iter().map(|u| (u.id, u.status)).collect();

    let mut touched = Vec::new();
    for repo in repos.iter_mut() {
        if let Some(status) = by_id.get(&repo.id) {
            repo.status = *status;
            repo.last_checked = Some(checked_at);
            touched.push(repo.id);
        }
    }
    touched
}
