//! Target decoder
//!
//! Grafana does not tag targets with their dialect; it is inferred from
//! which query field is populated, in this order:
//!
//! | field        | dialect     |
//! |--------------|-------------|
//! | `expr`       | Prometheus  |
//! | `target`     | Graphite    |
//! | `measurement`| InfluxDB    |
//! | `metricType` | Stackdriver |
//!
//! Loki targets only appear in logs panels and are decoded there.

use phf::phf_map;
use serde::Deserialize;
use serde_json::Value;

use dark_core::target::{
    GraphiteTarget, InfluxDbTarget, LokiTarget, MetricKind, PrometheusTarget, StackdriverAlignment,
    StackdriverFilters, StackdriverTarget, Target,
};

use crate::error::{ConversionWarning, Diagnostics, WarningCategory, warnings};
use crate::input::{decode_item, non_empty, null_as_default};

// =============================================================================
// STACKDRIVER LOOKUP TABLES
// =============================================================================

/// Cross-series reducers
static REDUCERS: phf::Map<&'static str, &'static str> = phf_map! {
    "REDUCE_NONE" => "none",
    "REDUCE_MEAN" => "mean",
    "REDUCE_MIN" => "min",
    "REDUCE_MAX" => "max",
    "REDUCE_SUM" => "sum",
    "REDUCE_STDDEV" => "stddev",
    "REDUCE_COUNT" => "count",
    "REDUCE_COUNT_TRUE" => "count_true",
    "REDUCE_COUNT_FALSE" => "count_false",
    "REDUCE_FRACTION_TRUE" => "fraction_true",
    "REDUCE_PERCENTILE_99" => "percentile_99",
    "REDUCE_PERCENTILE_95" => "percentile_95",
    "REDUCE_PERCENTILE_50" => "percentile_50",
    "REDUCE_PERCENTILE_05" => "percentile_05",
};

/// Per-series aligners
static ALIGNERS: phf::Map<&'static str, &'static str> = phf_map! {
    "ALIGN_NONE" => "none",
    "ALIGN_DELTA" => "delta",
    "ALIGN_RATE" => "rate",
    "ALIGN_INTERPOLATE" => "interpolate",
    "ALIGN_NEXT_OLDER" => "next_older",
    "ALIGN_MIN" => "min",
    "ALIGN_MAX" => "max",
    "ALIGN_MEAN" => "mean",
    "ALIGN_COUNT" => "count",
    "ALIGN_SUM" => "sum",
    "ALIGN_STDDEV" => "stddev",
    "ALIGN_COUNT_TRUE" => "count_true",
    "ALIGN_COUNT_FALSE" => "count_false",
    "ALIGN_FRACTION_TRUE" => "fraction_true",
    "ALIGN_PERCENTILE_99" => "percentile_99",
    "ALIGN_PERCENTILE_95" => "percentile_95",
    "ALIGN_PERCENTILE_50" => "percentile_50",
    "ALIGN_PERCENTILE_05" => "percentile_05",
    "ALIGN_PERCENT_CHANGE" => "percent_change",
};

// =============================================================================
// RAW TARGET
// =============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawTarget {
    ref_id: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    hide: bool,

    // Prometheus & Loki
    #[serde(deserialize_with = "null_as_default")]
    expr: String,
    legend_format: Option<String>,
    format: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    instant: bool,
    interval_factor: Option<i64>,

    // Graphite
    #[serde(deserialize_with = "null_as_default")]
    target: String,

    // InfluxDB
    #[serde(deserialize_with = "null_as_default")]
    measurement: String,

    // Stackdriver
    #[serde(deserialize_with = "null_as_default")]
    metric_type: String,
    #[serde(deserialize_with = "null_as_default")]
    metric_kind: String,
    cross_series_reducer: Option<String>,
    per_series_aligner: Option<String>,
    alignment_period: Option<String>,
    project_name: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    filters: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    group_bys: Vec<String>,
    alias_by: Option<String>,
}

/// Decode every target of a panel, skipping the ones that fail
pub(crate) fn decode_targets(raw: &[Value], diagnostics: &mut Diagnostics) -> Vec<Target> {
    raw.iter()
        .filter_map(|target| decode_target(target, diagnostics))
        .collect()
}

/// Decode a single target, inferring its dialect
pub(crate) fn decode_target(value: &Value, diagnostics: &mut Diagnostics) -> Option<Target> {
    let raw: RawTarget = decode_item(value, WarningCategory::Target, diagnostics)?;

    if !raw.expr.is_empty() {
        return Some(Target::Prometheus(PrometheusTarget {
            query: raw.expr,
            legend: non_empty(raw.legend_format),
            ref_id: non_empty(raw.ref_id),
            hidden: raw.hide,
            format: non_empty(raw.format),
            instant: raw.instant,
            interval_factor: raw.interval_factor,
        }));
    }

    if !raw.target.is_empty() {
        return Some(Target::Graphite(GraphiteTarget {
            query: raw.target,
            ref_id: non_empty(raw.ref_id),
            hidden: raw.hide,
        }));
    }

    if !raw.measurement.is_empty() {
        return Some(Target::InfluxDb(InfluxDbTarget {
            query: raw.measurement,
            ref_id: non_empty(raw.ref_id),
            hidden: raw.hide,
        }));
    }

    if !raw.metric_type.is_empty() {
        return decode_stackdriver(raw, diagnostics).map(Target::Stackdriver);
    }

    diagnostics.push(
        ConversionWarning::unsupported(
            WarningCategory::Target,
            raw.ref_id.as_deref().unwrap_or_default(),
            format!("unhandled target type: skipped ({})", value),
        )
        .with_suggestion("Supported dialects are Prometheus, Graphite, InfluxDB and Stackdriver"),
    );

    None
}

/// Decode a logs panel target, always a Loki query
pub(crate) fn decode_loki_target(value: &Value, diagnostics: &mut Diagnostics) -> Option<Target> {
    let raw: RawTarget = decode_item(value, WarningCategory::Target, diagnostics)?;

    if raw.expr.is_empty() {
        diagnostics.push(ConversionWarning::warning(
            WarningCategory::Target,
            raw.ref_id.as_deref().unwrap_or_default(),
            "loki target without a query: skipped",
        ));
        return None;
    }

    Some(Target::Loki(LokiTarget {
        query: raw.expr,
        legend: non_empty(raw.legend_format),
        ref_id: non_empty(raw.ref_id),
        hidden: raw.hide,
    }))
}

fn decode_stackdriver(raw: RawTarget, diagnostics: &mut Diagnostics) -> Option<StackdriverTarget> {
    let subject = raw.ref_id.clone().unwrap_or_default();

    let Some(kind) = MetricKind::parse(&raw.metric_kind) else {
        diagnostics.push(ConversionWarning::warning(
            WarningCategory::Target,
            &subject,
            format!(
                "unknown stackdriver metric kind '{}': target skipped",
                raw.metric_kind
            ),
        ));
        return None;
    };

    let aggregation = non_empty(raw.cross_series_reducer).and_then(|code| {
        lookup(&REDUCERS, &code, "cross-series reducer", &subject, diagnostics)
    });

    let alignment = non_empty(raw.per_series_aligner)
        .and_then(|code| lookup(&ALIGNERS, &code, "per-series aligner", &subject, diagnostics))
        .map(|method| StackdriverAlignment {
            method,
            period: non_empty(raw.alignment_period),
        });

    Some(StackdriverTarget {
        project: non_empty(raw.project_name),
        kind,
        metric: raw.metric_type,
        filters: parse_filters(&raw.filters, &subject, diagnostics),
        aggregation,
        alignment,
        group_by: raw.group_bys,
        legend: non_empty(raw.alias_by),
        ref_id: non_empty(raw.ref_id),
        hidden: raw.hide,
    })
}

fn lookup(
    table: &phf::Map<&'static str, &'static str>,
    code: &str,
    field: &str,
    subject: &str,
    diagnostics: &mut Diagnostics,
) -> Option<String> {
    match table.get(code) {
        Some(name) => Some((*name).to_string()),
        None => {
            diagnostics.push(warnings::unknown_value(
                WarningCategory::Target,
                subject,
                field,
                code,
            ));
            None
        }
    }
}

/// Parse `[left, op, right, "AND", left, op, right, ...]` into filter maps
pub(crate) fn parse_filters(
    tokens: &[String],
    subject: &str,
    diagnostics: &mut Diagnostics,
) -> StackdriverFilters {
    let mut filters = StackdriverFilters::default();
    let mut triple: Vec<&str> = Vec::with_capacity(3);

    for token in tokens {
        if token == "AND" {
            continue;
        }

        triple.push(token);
        if triple.len() < 3 {
            continue;
        }

        let (left, operator, right) = (triple[0], triple[1], triple[2]);
        let map = match operator {
            "=" => Some(&mut filters.eq),
            "!=" => Some(&mut filters.neq),
            "=~" => Some(&mut filters.matches),
            "!=~" => Some(&mut filters.not_matches),
            _ => None,
        };

        match map {
            Some(map) => {
                map.insert(left.to_string(), right.to_string());
            }
            None => diagnostics.push(warnings::unknown_value(
                WarningCategory::Target,
                subject,
                "stackdriver filter operator",
                operator,
            )),
        }

        triple.clear();
    }

    filters
}
