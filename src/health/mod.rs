mod fetcher;
mod models;

pub use fetcher::{parse_health_body, redact_url, HealthFetcher, HEALTH_PATH};
pub use models::{ClusterHealthDocument, ClusterStatus, HealthMetric, UNKNOWN_STATUS_CODE};
