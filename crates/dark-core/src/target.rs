//! Panel query targets, one variant per datasource dialect

use serde::Serialize;
use std::collections::BTreeMap;

use crate::is_false;

/// A single datasource query attached to a panel
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    Prometheus(PrometheusTarget),
    Graphite(GraphiteTarget),
    #[serde(rename = "influxdb")]
    InfluxDb(InfluxDbTarget),
    Stackdriver(StackdriverTarget),
    Loki(LokiTarget),
}

impl Target {
    /// Query reference id (`A`, `B`, ...), if any
    pub fn ref_id(&self) -> Option<&str> {
        match self {
            Self::Prometheus(t) => t.ref_id.as_deref(),
            Self::Graphite(t) => t.ref_id.as_deref(),
            Self::InfluxDb(t) => t.ref_id.as_deref(),
            Self::Stackdriver(t) => t.ref_id.as_deref(),
            Self::Loki(t) => t.ref_id.as_deref(),
        }
    }

    pub fn is_hidden(&self) -> bool {
        match self {
            Self::Prometheus(t) => t.hidden,
            Self::Graphite(t) => t.hidden,
            Self::InfluxDb(t) => t.hidden,
            Self::Stackdriver(t) => t.hidden,
            Self::Loki(t) => t.hidden,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PrometheusTarget {
    pub query: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<String>,

    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub ref_id: Option<String>,

    #[serde(skip_serializing_if = "is_false")]
    pub hidden: bool,

    /// `time_series`, `table` or `heatmap`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(skip_serializing_if = "is_false")]
    pub instant: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval_factor: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphiteTarget {
    pub query: String,

    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub ref_id: Option<String>,

    #[serde(skip_serializing_if = "is_false")]
    pub hidden: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InfluxDbTarget {
    /// Measurement name
    pub query: String,

    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub ref_id: Option<String>,

    #[serde(skip_serializing_if = "is_false")]
    pub hidden: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LokiTarget {
    pub query: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<String>,

    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub ref_id: Option<String>,

    #[serde(skip_serializing_if = "is_false")]
    pub hidden: bool,
}

/// Google Cloud Monitoring metric kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Cumulative,
    Gauge,
    Delta,
}

impl MetricKind {
    /// Parse a metric kind, ignoring case
    pub fn parse(kind: &str) -> Option<Self> {
        match kind.to_ascii_lowercase().as_str() {
            "cumulative" => Some(Self::Cumulative),
            "gauge" => Some(Self::Gauge),
            "delta" => Some(Self::Delta),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StackdriverTarget {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,

    #[serde(rename = "type")]
    pub kind: MetricKind,

    pub metric: String,

    #[serde(skip_serializing_if = "StackdriverFilters::is_empty")]
    pub filters: StackdriverFilters,

    /// Cross-series reducer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<String>,

    /// Per-series aligner
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<StackdriverAlignment>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub group_by: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<String>,

    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub ref_id: Option<String>,

    #[serde(skip_serializing_if = "is_false")]
    pub hidden: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StackdriverAlignment {
    pub method: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
}

/// Label filters, grouped by comparison operator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StackdriverFilters {
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub eq: BTreeMap<String, String>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub neq: BTreeMap<String, String>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub matches: BTreeMap<String, String>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub not_matches: BTreeMap<String, String>,
}

impl StackdriverFilters {
    pub fn is_empty(&self) -> bool {
        self.eq.is_empty()
            && self.neq.is_empty()
            && self.matches.is_empty()
            && self.not_matches.is_empty()
    }
}
