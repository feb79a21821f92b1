use std::time::Duration;

use actionstatus_core::{Repo, StatusUpdate};
use actionstatus_infra::{build_http_client, BadgeClient};
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use tracing::{debug, warn};

use crate::domain::AppSettings;
use crate::ports::StatusSource;

/// Polls each repo's GitHub Actions workflow badge.
pub struct HttpStatusSource {
    client: BadgeClient,
    concurrency: usize,
}

impl HttpStatusSource {
    pub fn new(client: BadgeClient, concurrency: usize) -> Self {
        Self {
            client,
            concurrency: actionstatus_config::clamp_concurrency(concurrency),
        }
    }

    pub fn from_settings(settings: &AppSettings) -> anyhow::Result<Self> {
        let http = build_http_client(Duration::from_secs(settings.request_timeout_secs))?;
        Ok(Self::new(
            BadgeClient::new(http, settings.github_base_url.clone()),
            settings.refresh_concurrency,
        ))
    }
}

#[async_trait]
impl StatusSource for HttpStatusSource {
    async fn fetch(&self, repos: &[Repo]) -> anyhow::Result<Vec<StatusUpdate>> {
        let pollable: Vec<Repo> = repos
            .iter()
            .filter(|r| !r.owner.trim().is_empty())
            .cloned()
            .collect();
        if pollable.len() < repos.len() {
            debug!(
                "Skipping {} repositories without an owner",
                repos.len() - pollable.len()
            );
        }
        if pollable.is_empty() {
            return Ok(Vec::new());
        }

        let client = &self.client;
        let results: Vec<_> = stream::iter(pollable)
            .map(|repo: Repo| async move {
                let res = client
                    .fetch_status(&repo.owner, &repo.name, &repo.workflow)
                    .await;
                (repo, res)
            })
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        let attempted = results.len();
        let mut updates = Vec::with_capacity(attempted);
        let mut last_error = None;
        for (repo, res) in results {
            match res {
                Ok(status) => updates.push(StatusUpdate {
                    id: repo.id,
                    status,
                }),
                Err(e) => {
                    warn!("Could not fetch status for {}: {}", repo.slug(), e);
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) if updates.is_empty() => Err(anyhow::anyhow!(
                "all {attempted} badge requests failed; last error: {e}"
            )),
            _ => Ok(updates),
        }
    }
}
