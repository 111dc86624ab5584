use chrono::{DateTime, Utc};

pub const CLUSTER_DIMENSION: &str = "ElasticsearchCluster";
pub const INSTANCE_DIMENSION: &str = "Instance";

/// Metric name used for the colour code.
pub const STATUS_METRIC: &str = "status";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dimension {
    pub name: String,
    pub value: String,
}

impl Dimension {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetricUnit {
    #[default]
    Count,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricDataPoint {
    pub name: String,
    pub value: f64,
    pub unit: MetricUnit,
    pub dimensions: Vec<Dimension>,
    pub timestamp: DateTime<Utc>,
}

/// Dimensions shared by every point of one run: the instance tag when one
/// was configured, then the cluster name.
pub fn dimensions(cluster_name: &str, instance: Option<&str>) -> Vec<Dimension> {
    [
        instance.map(|id| Dimension::new(INSTANCE_DIMENSION, id)),
        Some(Dimension::new(CLUSTER_DIMENSION, cluster_name)),
    ]
    .into_iter()
    .flatten()
    .collect()
}
