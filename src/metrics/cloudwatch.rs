use super::models::{MetricDataPoint, MetricUnit};
use super::sink::MetricSink;
use crate::errors::PublishError;
use async_trait::async_trait;
use aws_config::retry::RetryConfig;
use aws_config::timeout::TimeoutConfig;
use aws_config::{BehaviorVersion, ConfigLoader};
use aws_sdk_cloudwatch::config::Region;
use aws_sdk_cloudwatch::error::{DisplayErrorContext, SdkError};
use aws_sdk_cloudwatch::primitives::DateTime;
use aws_sdk_cloudwatch::types::{Dimension, MetricDatum, StandardUnit};
use std::time::Duration;

/// PutMetricData accepts at most this many data points per request.
pub const MAX_DATA_POINTS_PER_REQUEST: usize = 1000;

/// Submits batches with `PutMetricData`. Credentials come from the default
/// AWS provider chain.
pub struct CloudWatchSink {
    client: aws_sdk_cloudwatch::Client,
}

impl CloudWatchSink {
    pub fn new(client: aws_sdk_cloudwatch::Client) -> Self {
        Self { client }
    }

    pub async fn from_env(region: &str, endpoint_url: Option<&str>, timeout: Duration) -> Self {
        Self::from_loader(config_loader(region, endpoint_url, timeout)).await
    }

    pub async fn from_loader(loader: ConfigLoader) -> Self {
        let sdk_config = loader.load().await;
        Self::new(aws_sdk_cloudwatch::Client::new(&sdk_config))
    }
}

/// SDK settings for a single-attempt submission: the whole call, retries
/// disabled, is bounded by `timeout`.
pub fn config_loader(
    region: &str,
    endpoint_url: Option<&str>,
    timeout: Duration,
) -> ConfigLoader {
    let loader = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region.to_string()))
        .retry_config(RetryConfig::disabled())
        .timeout_config(TimeoutConfig::builder().operation_timeout(timeout).build());
    match endpoint_url {
        Some(endpoint_url) => loader.endpoint_url(endpoint_url),
        None => loader,
    }
}

#[async_trait]
impl MetricSink for CloudWatchSink {
    #[tracing::instrument(name = "PutMetricData", skip(self, points), fields(count = points.len()))]
    async fn put_metric_data(
        &self,
        namespace: &str,
        points: &[MetricDataPoint],
    ) -> Result<(), PublishError> {
        if points.len() > MAX_DATA_POINTS_PER_REQUEST {
            return Err(PublishError::Rejected {
                message: format!(
                    "{} data points exceed the limit of {} per request",
                    points.len(),
                    MAX_DATA_POINTS_PER_REQUEST
                ),
            });
        }

        let metric_data = points
            .iter()
            .map(to_metric_datum)
            .collect::<Result<Vec<_>, _>>()?;

        self.client
            .put_metric_data()
            .namespace(namespace)
            .set_metric_data(Some(metric_data))
            .send()
            .await
            .map_err(|err| match err {
                SdkError::TimeoutError(_) => PublishError::Timeout,
                other => {
                    tracing::error!("PutMetricData failed: {}", DisplayErrorContext(&other));
                    PublishError::Rejected {
                        message: DisplayErrorContext(&other).to_string(),
                    }
                }
            })?;

        Ok(())
    }
}

pub fn to_metric_datum(point: &MetricDataPoint) -> Result<MetricDatum, PublishError> {
    let dimensions = point
        .dimensions
        .iter()
        .map(|d| Dimension::builder().name(&d.name).value(&d.value).build())
        .collect::<Result<Vec<_>, _>>()
        .map_err(invalid_datum)?;

    MetricDatum::builder()
        .metric_name(&point.name)
        .value(point.value)
        .unit(standard_unit(point.unit))
        .timestamp(DateTime::from_secs(point.timestamp.timestamp()))
        .set_dimensions(Some(dimensions))
        .build()
        .map_err(invalid_datum)
}

fn standard_unit(unit: MetricUnit) -> StandardUnit {
    match unit {
        MetricUnit::Count => StandardUnit::Count,
    }
}

fn invalid_datum(err: aws_sdk_cloudwatch::error::BuildError) -> PublishError {
    PublishError::Rejected {
        message: format!("invalid metric datum: {err}"),
    }
}
