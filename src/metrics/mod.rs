mod cloudwatch;
mod models;
mod publisher;
mod sink;

pub use cloudwatch::{
    config_loader, to_metric_datum, CloudWatchSink, MAX_DATA_POINTS_PER_REQUEST,
};
pub use models::{
    dimensions, Dimension, MetricDataPoint, MetricUnit, CLUSTER_DIMENSION, INSTANCE_DIMENSION,
    STATUS_METRIC,
};
pub use publisher::{MetricPublisher, MissingFieldPolicy};
pub use sink::{DryRunSink, MetricSink};
