use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Code published for any status label outside green/yellow/red.
pub const UNKNOWN_STATUS_CODE: u8 = 255;

/// Cluster colour as reported by `/_cluster/health`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClusterStatus {
    Green,
    Yellow,
    Red,
    /// Absent, null, or a label we do not recognise (raw value kept for logging)
    Unknown(Option<String>),
}

impl ClusterStatus {
    pub fn from_label(label: &str) -> Self {
        match label {
            "green" => Self::Green,
            "yellow" => Self::Yellow,
            "red" => Self::Red,
            other => Self::Unknown(Some(other.to_string())),
        }
    }

    /// Severity code: higher is worse, 255 means unknown.
    pub fn code(&self) -> u8 {
        match self {
            Self::Green => 0,
            Self::Yellow => 1,
            Self::Red => 2,
            Self::Unknown(_) => UNKNOWN_STATUS_CODE,
        }
    }
}

impl Default for ClusterStatus {
    fn default() -> Self {
        Self::Unknown(None)
    }
}

impl fmt::Display for ClusterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Green => write!(f, "green"),
            Self::Yellow => write!(f, "yellow"),
            Self::Red => write!(f, "red"),
            Self::Unknown(Some(raw)) => write!(f, "unknown ({raw})"),
            Self::Unknown(None) => write!(f, "unknown"),
        }
    }
}

impl<'de> Deserialize<'de> for ClusterStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(match raw {
            None | Some(serde_json::Value::Null) => Self::Unknown(None),
            Some(serde_json::Value::String(label)) => Self::from_label(&label),
            Some(other) => Self::Unknown(Some(other.to_string())),
        })
    }
}

/// The numeric fields of the health document that are republished as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthMetric {
    NumberOfNodes,
    NumberOfDataNodes,
    ActivePrimaryShards,
    ActiveShards,
    RelocatingShards,
    InitializingShards,
    UnassignedShards,
    DelayedUnassignedShards,
    NumberOfPendingTasks,
    NumberOfInFlightFetch,
}

impl HealthMetric {
    /// Publication order.
    pub const ALL: [HealthMetric; 10] = [
        Self::NumberOfNodes,
        Self::NumberOfDataNodes,
        Self::ActivePrimaryShards,
        Self::ActiveShards,
        Self::RelocatingShards,
        Self::InitializingShards,
        Self::UnassignedShards,
        Self::DelayedUnassignedShards,
        Self::NumberOfPendingTasks,
        Self::NumberOfInFlightFetch,
    ];

    /// Field name in the health document, also used as the metric name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::NumberOfNodes => "number_of_nodes",
            Self::NumberOfDataNodes => "number_of_data_nodes",
            Self::ActivePrimaryShards => "active_primary_shards",
            Self::ActiveShards => "active_shards",
            Self::RelocatingShards => "relocating_shards",
            Self::InitializingShards => "initializing_shards",
            Self::UnassignedShards => "unassigned_shards",
            Self::DelayedUnassignedShards => "delayed_unassigned_shards",
            Self::NumberOfPendingTasks => "number_of_pending_tasks",
            Self::NumberOfInFlightFetch => "number_of_in_flight_fetch",
        }
    }
}

impl fmt::Display for HealthMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Snapshot returned by `GET /_cluster/health`.
///
/// Numeric fields are optional because older clusters omit some of them
/// (`delayed_unassigned_shards`, `number_of_in_flight_fetch`).
#[derive(Debug, Clone, Deserialize)]
pub struct ClusterHealthDocument {
    pub cluster_name: String,
    #[serde(default)]
    pub status: ClusterStatus,
    #[serde(default)]
    pub number_of_nodes: Option<u64>,
    #[serde(default)]
    pub number_of_data_nodes: Option<u64>,
    #[serde(default)]
    pub active_primary_shards: Option<u64>,
    #[serde(default)]
    pub active_shards: Option<u64>,
    #[serde(default)]
    pub relocating_shards: Option<u64>,
    #[serde(default)]
    pub initializing_shards: Option<u64>,
    #[serde(default)]
    pub unassigned_shards: Option<u64>,
    #[serde(default)]
    pub delayed_unassigned_shards: Option<u64>,
    #[serde(default)]
    pub number_of_pending_tasks: Option<u64>,
    #[serde(default)]
    pub number_of_in_flight_fetch: Option<u64>,
}

impl ClusterHealthDocument {
    pub fn value(&self, metric: HealthMetric) -> Option<u64> {
        match metric {
            HealthMetric::NumberOfNodes => self.number_of_nodes,
            HealthMetric::NumberOfDataNodes => self.number_of_data_nodes,
            HealthMetric::ActivePrimaryShards => self.active_primary_shards,
            HealthMetric::ActiveShards => self.active_shards,
            HealthMetric::RelocatingShards => self.relocating_shards,
            HealthMetric::InitializingShards => self.initializing_shards,
            HealthMetric::UnassignedShards => self.unassigned_shards,
            HealthMetric::DelayedUnassignedShards => self.delayed_unassigned_shards,
            HealthMetric::NumberOfPendingTasks => self.number_of_pending_tasks,
            HealthMetric::NumberOfInFlightFetch => self.number_of_in_flight_fetch,
        }
    }
}
