use actionstatus_core::BuildStatus;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Characters left untouched in a URL path segment.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

#[derive(Debug, Error)]
pub enum NetError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("badge request for {url} returned status {status}")]
    Status { url: String, status: u16 },
    #[error("repository '{0}' has no owner to poll")]
    MissingOwner(String),
}

pub fn build_http_client(timeout: Duration) -> Result<Client, NetError> {
    let client = Client::builder()
        .timeout(timeout)
        .user_agent(concat!("actionstatus/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// Status half of a badge: the last `<text>` element, or the part of
/// `<title>` after the final " - ". The workflow name is never consulted.
fn status_label(svg: &str) -> Option<&str> {
    if let Some(start) = svg.rfind("<text") {
        let rest = &svg[start..];
        let body = &rest[rest.find('>')? + 1..];
        let end = body.find("</text>")?;
        return Some(body[..end].trim());
    }

    let start = svg.find("<title>")? + "<title>".len();
    let end = start + svg[start..].find("</title>")?;
    let title = &svg[start..end];
    Some(title.rsplit_once(" - ").map_or(title, |(_, status)| status).trim())
}

/// Reads the status label out of a workflow badge SVG.
pub fn classify_badge(svg: &str) -> BuildStatus {
    let Some(label) = status_label(svg) else {
        return BuildStatus::Unknown;
    };
    let text = label.to_ascii_lowercase();
    if text.contains("failing") {
        BuildStatus::Failed
    } else if text.contains("passing") {
        BuildStatus::Succeeded
    } else if ["in progress", "running", "pending", "queued"]
        .iter()
        .any(|needle| text.contains(needle))
    {
        BuildStatus::Running
    } else {
        BuildStatus::Unknown
    }
}

/// Fetches GitHub Actions workflow badges.
#[derive(Clone)]
pub struct BadgeClient {
    client: Client,
    base_url: String,
}

impl BadgeClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn badge_url(&self, owner: &str, name: &str, workflow: &str) -> String {
        format!(
            "{}/{}/{}/workflows/{}/badge.svg",
            self.base_url,
            utf8_percent_encode(owner, SEGMENT),
            utf8_percent_encode(name, SEGMENT),
            utf8_percent_encode(workflow, SEGMENT),
        )
    }

    pub async fn fetch_status(
        &self,
        owner: &str,
        name: &str,
        workflow: &str,
    ) -> Result<BuildStatus, NetError> {
        if owner.trim().is_empty() {
            return Err(NetError::MissingOwner(name.to_string()));
        }

        let url = self.badge_url(owner, name, workflow);
        debug!("Fetching badge {}", url);

        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(NetError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = resp.text().await?;
        Ok(classify_badge(&body))
    }
}
