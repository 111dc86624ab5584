use super::models::{dimensions, MetricDataPoint, MetricUnit, STATUS_METRIC};
use super::sink::MetricSink;
use crate::errors::PublishError;
use crate::health::{ClusterHealthDocument, HealthMetric};
use chrono::{DateTime, SubsecRound, Utc};
use serde::Deserialize;
use std::sync::Arc;

/// What to do with a numeric health field that is null or absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingFieldPolicy {
    /// Abort the run before anything is submitted
    #[default]
    Reject,
    /// Leave the field out of the batch and log a warning
    Skip,
}

pub struct MetricPublisher {
    sink: Arc<dyn MetricSink>,
    namespace: String,
    on_missing: MissingFieldPolicy,
}

impl MetricPublisher {
    pub fn new(
        sink: Arc<dyn MetricSink>,
        namespace: impl Into<String>,
        on_missing: MissingFieldPolicy,
    ) -> Self {
        Self {
            sink,
            namespace: namespace.into(),
            on_missing,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Converts one health document into the batch for this run, stamped now.
    pub fn build_data_points(
        &self,
        doc: &ClusterHealthDocument,
        instance: Option<&str>,
    ) -> Result<Vec<MetricDataPoint>, PublishError> {
        self.build_data_points_at(doc, instance, Utc::now().trunc_subsecs(0))
    }

    pub fn build_data_points_at(
        &self,
        doc: &ClusterHealthDocument,
        instance: Option<&str>,
        timestamp: DateTime<Utc>,
    ) -> Result<Vec<MetricDataPoint>, PublishError> {
        let dimensions = dimensions(&doc.cluster_name, instance);
        let point = |name: &str, value: f64| MetricDataPoint {
            name: name.to_string(),
            value,
            unit: MetricUnit::Count,
            dimensions: dimensions.clone(),
            timestamp,
        };

        let mut points = Vec::with_capacity(HealthMetric::ALL.len() + 1);
        points.push(point(STATUS_METRIC, f64::from(doc.status.code())));

        for metric in HealthMetric::ALL {
            match (doc.value(metric), self.on_missing) {
                (Some(value), _) => points.push(point(metric.name(), value as f64)),
                (None, MissingFieldPolicy::Reject) => {
                    return Err(PublishError::MissingField {
                        field: metric.name(),
                    })
                }
                (None, MissingFieldPolicy::Skip) => {
                    tracing::warn!(field = metric.name(), "Health field missing, not published");
                }
            }
        }

        Ok(points)
    }

    /// Builds the batch and submits it in a single call.
    #[tracing::instrument(
        name = "Publish cluster health",
        skip(self, doc),
        fields(cluster = %doc.cluster_name, namespace = %self.namespace)
    )]
    pub async fn publish(
        &self,
        doc: &ClusterHealthDocument,
        instance: Option<&str>,
    ) -> Result<usize, PublishError> {
        let points = self.build_data_points(doc, instance)?;
        tracing::debug!(count = points.len(), status = %doc.status, "Submitting metric batch");

        self.sink.put_metric_data(&self.namespace, &points).await?;

        tracing::info!(count = points.len(), "Cluster health published");
        Ok(points.len())
    }
}
