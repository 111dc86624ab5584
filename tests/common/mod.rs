#![allow(dead_code)]

use async_trait::async_trait;
use es_cloudwatch::errors::PublishError;
use es_cloudwatch::health::HealthFetcher;
use es_cloudwatch::metrics::{MetricDataPoint, MetricPublisher, MetricSink, MissingFieldPolicy};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// One `put_metric_data` call as seen by the sink.
#[derive(Debug, Clone)]
pub struct Submission {
    pub namespace: String,
    pub points: Vec<MetricDataPoint>,
}

/// Records every batch instead of sending it; optionally fails.
#[derive(Default)]
pub struct RecordingSink {
    submissions: Mutex<Vec<Submission>>,
    fail_with: Option<String>,
}

impl RecordingSink {
    pub fn failing(message: &str) -> Self {
        Self {
            submissions: Mutex::new(Vec::new()),
            fail_with: Some(message.to_string()),
        }
    }

    pub fn submissions(&self) -> Vec<Submission> {
        self.submissions.lock().unwrap().clone()
    }
}

#[async_trait]
impl MetricSink for RecordingSink {
    async fn put_metric_data(
        &self,
        namespace: &str,
        points: &[MetricDataPoint],
    ) -> Result<(), PublishError> {
        self.submissions.lock().unwrap().push(Submission {
            namespace: namespace.to_string(),
            points: points.to_vec(),
        });
        match &self.fail_with {
            Some(message) => Err(PublishError::Rejected {
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

/// A complete green-cluster response, as returned by Elasticsearch 7.x.
pub fn health_body(status: &str, cluster_name: &str) -> Value {
    json!({
        "cluster_name": cluster_name,
        "status": status,
        "timed_out": false,
        "number_of_nodes": 3,
        "number_of_data_nodes": 3,
        "active_primary_shards": 12,
        "active_shards": 24,
        "relocating_shards": 0,
        "initializing_shards": 0,
        "unassigned_shards": 0,
        "delayed_unassigned_shards": 0,
        "number_of_pending_tasks": 0,
        "number_of_in_flight_fetch": 0,
        "task_max_waiting_in_queue_millis": 0,
        "active_shards_percent_as_number": 100.0
    })
}

pub async fn mock_health(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/_cluster/health"))
        .respond_with(response)
        .mount(server)
        .await;
}

pub fn fetcher(server: &MockServer) -> HealthFetcher {
    HealthFetcher::new(&server.uri(), Duration::from_secs(5)).expect("failed to build fetcher")
}

pub fn publisher(sink: Arc<RecordingSink>, on_missing: MissingFieldPolicy) -> MetricPublisher {
    MetricPublisher::new(sink, "Custom/ElasticsearchCluster", on_missing)
}
