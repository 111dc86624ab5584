use thiserror::Error;

/// Errors raised while reading `/_cluster/health`.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not complete (DNS, connect, TLS, body read)
    #[error("failed to reach {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("request to {url} timed out")]
    Timeout { url: String },
    #[error("{url} returned HTTP {status}")]
    UnexpectedStatus { url: String, status: u16 },
    /// Body is not JSON, or not shaped like a health document
    #[error("invalid health response from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    /// The cluster answered with an `error` field
    #[error("{message}")]
    BackendReported { message: String },
}

impl FetchError {
    /// `url` must already be redacted; the raw URL inside `err` is dropped.
    pub(crate) fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
            }
        } else {
            Self::Transport {
                url: url.to_string(),
                source: err.without_url(),
            }
        }
    }
}

/// Errors raised while turning a health document into metrics and submitting them.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("health field `{field}` is missing or null")]
    MissingField { field: &'static str },
    #[error("metric submission rejected: {message}")]
    Rejected { message: String },
    #[error("metric submission timed out")]
    Timeout,
}

#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("failed to set up logging: {0:#}")]
    Telemetry(anyhow::Error),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Publish(#[from] PublishError),
}

impl MonitorError {
    /// Process exit code for this failure. Bad configuration shares clap's usage code.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => 2,
            Self::Telemetry(_) | Self::Fetch(_) | Self::Publish(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_reported_displays_message_verbatim() {
        let err = FetchError::BackendReported {
            message: "cluster block exception".to_string(),
        };
        assert_eq!(format!("{err}"), "cluster block exception");
    }

    #[test]
    fn test_unexpected_status_mentions_url() {
        let err = FetchError::UnexpectedStatus {
            url: "http://es:9200/_cluster/health".to_string(),
            status: 503,
        };
        let msg = format!("{err}");
        assert!(msg.contains("http://es:9200/_cluster/health"), "Expected url in: {msg}");
        assert!(msg.contains("503"), "Expected status in: {msg}");
    }

    #[test]
    fn test_missing_field_names_the_field() {
        let err = PublishError::MissingField {
            field: "delayed_unassigned_shards",
        };
        assert!(format!("{err}").contains("delayed_unassigned_shards"));
    }

    #[test]
    fn test_exit_codes() {
        let config_err = MonitorError::Config(config::ConfigError::Message("bad".into()));
        assert_eq!(config_err.exit_code(), 2);

        let fetch_err = MonitorError::from(FetchError::Timeout {
            url: "http://localhost:9200/_cluster/health".to_string(),
        });
        assert_eq!(fetch_err.exit_code(), 1);

        let publish_err = MonitorError::from(PublishError::Timeout);
        assert_eq!(publish_err.exit_code(), 1);
    }

    #[test]
    fn test_parse_error_from_invalid_json() {
        let source = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let err = FetchError::Parse {
            url: "http://localhost:9200/_cluster/health".to_string(),
            source,
        };
        assert!(format!("{err}").starts_with("invalid health response"));
    }
}
