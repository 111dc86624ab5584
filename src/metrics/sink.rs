use super::models::MetricDataPoint;
use crate::errors::PublishError;
use async_trait::async_trait;

/// Destination for one batch of data points.
///
/// Production talks to CloudWatch; `--dry-run` and tests use the other
/// implementations.
#[async_trait]
pub trait MetricSink: Send + Sync {
    async fn put_metric_data(
        &self,
        namespace: &str,
        points: &[MetricDataPoint],
    ) -> Result<(), PublishError>;
}

/// Logs every point instead of submitting it.
#[derive(Debug, Default)]
pub struct DryRunSink;

#[async_trait]
impl MetricSink for DryRunSink {
    async fn put_metric_data(
        &self,
        namespace: &str,
        points: &[MetricDataPoint],
    ) -> Result<(), PublishError> {
        for point in points {
            let dimensions = point
                .dimensions
                .iter()
                .map(|d| format!("{}={}", d.name, d.value))
                .collect::<Vec<_>>()
                .join(",");
            tracing::info!(
                namespace,
                metric = %point.name,
                value = point.value,
                dimensions = %dimensions,
                timestamp = %point.timestamp,
                "Dry run, metric not submitted"
            );
        }
        Ok(())
    }
}
