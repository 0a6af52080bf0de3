//! Panel decoders
//!
//! [`decode_panel`] reads the attributes shared by every panel, then
//! dispatches on the `type` discriminator. Each kind deserializes its own
//! settings struct from the same JSON value.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use dark_core::panel::{Panel, PanelCommon, RepeatDirection};

use crate::error::{Diagnostics, WarningCategory, warnings};
use crate::input::{Datasource, Height, decode_item, non_empty, null_as_default};
use crate::link::decode_panel_links;

mod graph;
mod heatmap;
mod logs;
mod single_stat;
mod stat;
mod table;
mod text;
mod timeseries;

/// Panel type marking the start of a row
pub(crate) const ROW_TYPE: &str = "row";

/// Attributes every panel carries, rows included
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct RawPanel {
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    pub span: Option<f64>,
    pub grid_pos: Option<GridPos>,
    pub height: Option<Height>,
    #[serde(deserialize_with = "null_as_default")]
    pub transparent: bool,
    pub description: Option<String>,
    pub datasource: Option<Datasource>,
    pub repeat: Option<String>,
    pub repeat_direction: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub links: Vec<Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub targets: Vec<Value>,

    // Rows only
    #[serde(deserialize_with = "null_as_default")]
    pub collapsed: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub panels: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct GridPos {
    pub h: Option<i64>,
    pub w: Option<i64>,
}

impl RawPanel {
    pub fn parse(value: &Value, diagnostics: &mut Diagnostics) -> Option<Self> {
        decode_item(value, WarningCategory::Panel, diagnostics)
    }

    /// Legacy 12-column span: explicit when set, else half the 24-unit grid
    /// width. The grid position only counts when it carries a height.
    pub fn span(&self) -> Option<f64> {
        match self.span {
            Some(span) if span != 0.0 => Some(span),
            _ => self
                .grid_pos
                .as_ref()
                .filter(|pos| pos.h.is_some())
                .and_then(|pos| pos.w)
                .map(|w| (w / 2) as f64),
        }
    }

    pub fn is_row(&self) -> bool {
        self.kind == ROW_TYPE
    }
}

/// Grafana's vocabulary is inverted: a panel repeated horizontally lays its
/// copies out in a vertical stack of columns, and vice versa.
pub(crate) fn repeat_direction(source: &str) -> RepeatDirection {
    match source {
        "h" | "horizontal" => RepeatDirection::Vertical,
        _ => RepeatDirection::Horizontal,
    }
}

/// Decode a data panel, or `None` when it is skipped
pub(crate) fn decode_panel(value: &Value, diagnostics: &mut Diagnostics) -> Option<Panel> {
    let raw = RawPanel::parse(value, diagnostics)?;
    decode_parsed_panel(&raw, value, diagnostics)
}

pub(crate) fn decode_parsed_panel(
    raw: &RawPanel,
    value: &Value,
    diagnostics: &mut Diagnostics,
) -> Option<Panel> {
    let panel = match raw.kind.as_str() {
        "graph" => Panel::Graph(graph::decode(raw, value, diagnostics)?),
        "heatmap" => Panel::Heatmap(heatmap::decode(raw, value, diagnostics)?),
        "singlestat" => Panel::SingleStat(single_stat::decode(raw, value, diagnostics)?),
        "stat" => Panel::Stat(stat::decode_stat(raw, value, diagnostics)?),
        "gauge" => Panel::Gauge(stat::decode_gauge(raw, value, diagnostics)?),
        "table" => Panel::Table(table::decode(raw, value, diagnostics)?),
        "text" => Panel::Text(text::decode(raw, value, diagnostics)?),
        "logs" => Panel::Logs(logs::decode(raw, value, diagnostics)?),
        "timeseries" => Panel::TimeSeries(timeseries::decode(raw, value, diagnostics)?),
        kind => {
            diagnostics.push(warnings::unknown_panel(&raw.title, kind));
            return None;
        }
    };

    Some(panel)
}

/// Common attributes, identical for every kind
fn decode_common(raw: &RawPanel, diagnostics: &mut Diagnostics) -> PanelCommon {
    PanelCommon {
        title: raw.title.clone(),
        span: raw.span(),
        height: raw.height.clone().and_then(Height::into_text),
        transparent: raw.transparent,
        description: non_empty(raw.description.clone()),
        datasource: raw.datasource.clone().and_then(Datasource::legacy_name),
        repeat: non_empty(raw.repeat.clone()),
        repeat_direction: raw.repeat_direction.as_deref().map(repeat_direction),
        links: decode_panel_links(&raw.links, diagnostics),
    }
}

/// Deserialize the kind-specific settings of a panel
fn settings<T: DeserializeOwned>(
    raw: &RawPanel,
    value: &Value,
    diagnostics: &mut Diagnostics,
) -> Option<T> {
    match T::deserialize(value) {
        Ok(settings) => Some(settings),
        Err(err) => {
            diagnostics.push(warnings::malformed(WarningCategory::Panel, &raw.title, &err));
            None
        }
    }
}
