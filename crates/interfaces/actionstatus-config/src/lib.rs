//! Central configuration constants for defaults and runtime limits.

/// Window/navigation title shown by chrome variants that have one.
pub const APP_TITLE: &str = "Action Status";

/// Name given to a freshly added repository until the user edits it.
pub const DEFAULT_REPO_NAME: &str = "Untitled";

/// Workflow polled for a freshly added repository.
pub const DEFAULT_WORKFLOW: &str = "Tests";

/// Base URL that workflow badges are fetched from.
pub const DEFAULT_GITHUB_URL: &str = "https://github.com";

/// Default number of badge requests in flight during a refresh.
pub const DEFAULT_REFRESH_CONCURRENCY: usize = 4;

/// Minimum allowed concurrent badge requests.
pub const MIN_REFRESH_CONCURRENCY: usize = 1;

/// Maximum allowed concurrent badge requests.
pub const MAX_REFRESH_CONCURRENCY: usize = 16;

/// Per-request timeout for badge fetches, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Upper bound for a whole refresh run, in seconds.
pub const REFRESH_DEADLINE_SECS: u64 = 30;

/// Capacity of the controller's event channel.
pub const EVENT_CHANNEL_CAPACITY: usize = 100;

/// Convenience function to clamp a concurrency value into allowed range.
pub fn clamp_concurrency(v: usize) -> usize {
    v.clamp(MIN_REFRESH_CONCURRENCY, MAX_REFRESH_CONCURRENCY)
}
