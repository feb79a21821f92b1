pub mod net;

// Re-exports for convenience
pub use net::{build_http_client, classify_badge, BadgeClient, NetError};
