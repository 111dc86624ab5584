use super::models::ClusterHealthDocument;
use crate::errors::FetchError;
use std::time::Duration;

pub const HEALTH_PATH: &str = "/_cluster/health";

/// Reads `/_cluster/health` from a single Elasticsearch endpoint.
///
/// No retries: a failed read fails the whole run and the scheduler decides
/// when to try again.
pub struct HealthFetcher {
    url: String,
    http: reqwest::Client,
}

impl HealthFetcher {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let url = format!("{}{}", base_url.trim_end_matches('/'), HEALTH_PATH);
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::from_reqwest(&redact_url(&url), e))?;
        Ok(Self { url, http })
    }

    pub fn health_url(&self) -> &str {
        &self.url
    }

    #[tracing::instrument(
        name = "Fetch cluster health",
        skip(self),
        fields(url = %redact_url(&self.url))
    )]
    pub async fn fetch(&self) -> Result<ClusterHealthDocument, FetchError> {
        let url = redact_url(&self.url);

        let response = self
            .http
            .get(&self.url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(&url, e))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::from_reqwest(&url, e))?;
        tracing::debug!(status = status.as_u16(), bytes = body.len(), "Health response received");

        parse_health_body(&url, status, &body)
    }
}

/// Validates a raw `/_cluster/health` response.
///
/// The `error` field wins over the HTTP status so that the reason
/// Elasticsearch gives on a 4xx/5xx reaches the log.
pub fn parse_health_body(
    url: &str,
    status: reqwest::StatusCode,
    body: &[u8],
) -> Result<ClusterHealthDocument, FetchError> {
    let json: serde_json::Value = match serde_json::from_slice(body) {
        Ok(json) => json,
        Err(source) if status.is_success() => {
            return Err(FetchError::Parse {
                url: url.to_string(),
                source,
            })
        }
        Err(_) => {
            return Err(FetchError::UnexpectedStatus {
                url: url.to_string(),
                status: status.as_u16(),
            })
        }
    };

    if let Some(error) = json.get("error") {
        return Err(FetchError::BackendReported {
            message: backend_error_message(error),
        });
    }

    if !status.is_success() {
        return Err(FetchError::UnexpectedStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    serde_json::from_value(json).map_err(|source| FetchError::Parse {
        url: url.to_string(),
        source,
    })
}

// ES 1.x sends a string, later versions an object with `reason`.
fn backend_error_message(error: &serde_json::Value) -> String {
    match error {
        serde_json::Value::String(message) => message.clone(),
        other => other
            .get("reason")
            .and_then(|reason| reason.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| other.to_string()),
    }
}

/// Masks credentials embedded in the base URL before it is logged.
pub fn redact_url(raw: &str) -> String {
    match reqwest::Url::parse(raw) {
        Ok(mut url) if url.password().is_some() => {
            let _ = url.set_password(Some("***"));
            url.to_string()
        }
        _ => raw.to_string(),
    }
}
