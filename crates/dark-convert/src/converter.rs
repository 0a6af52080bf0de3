//! Main converter logic
//!
//! Reads a Grafana dashboard export, assembles the typed model and writes it
//! out either as plain YAML or wrapped in a `GrafanaDashboard` manifest.

use std::io::{Read, Write};

use serde_json::Value;

use dark_core::{DashboardManifest, DashboardModel, ManifestOptions, Row, render};

use crate::annotation::decode_annotations;
use crate::error::{ConversionWarning, Diagnostics, Result, WarningSeverity};
use crate::input::{RawDashboard, Refresh, expect_object, non_empty};
use crate::link::decode_dashboard_links;
use crate::panels::{RawPanel, decode_panel, decode_parsed_panel};
use crate::variable::decode_variables;

/// Shape of the converter output
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// The dashboard model alone
    #[default]
    Yaml,
    /// The dashboard wrapped in a `GrafanaDashboard` resource
    Manifest(ManifestOptions),
}

/// Options for the converter
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    pub output: OutputMode,
}

impl ConvertOptions {
    pub fn manifest(options: ManifestOptions) -> Self {
        Self {
            output: OutputMode::Manifest(options),
        }
    }
}

/// Result of a conversion
#[derive(Debug)]
pub struct Conversion {
    /// The converted dashboard
    pub dashboard: DashboardModel,
    /// Items skipped or defaulted along the way
    pub warnings: Vec<ConversionWarning>,
}

impl Conversion {
    pub fn count(&self, severity: WarningSeverity) -> usize {
        self.warnings
            .iter()
            .filter(|w| w.severity == severity)
            .count()
    }

    /// Whether a malformed item had to be dropped
    pub fn has_errors(&self) -> bool {
        self.count(WarningSeverity::Error) > 0
    }

    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Convert Grafana dashboard exports
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// Convert the dashboard read from `reader` and write the result to `writer`
    pub fn convert<R: Read, W: Write>(&self, mut reader: R, writer: W) -> Result<Conversion> {
        // Manifest options are checked before reading anything
        if let OutputMode::Manifest(options) = &self.options.output {
            options.validate()?;
        }

        let mut input = String::new();
        reader.read_to_string(&mut input)?;

        let conversion = convert_dashboard(&input)?;

        match &self.options.output {
            OutputMode::Yaml => {
                render::to_writer(writer, &conversion.dashboard)?;
                Ok(conversion)
            }
            OutputMode::Manifest(options) => {
                let manifest = DashboardManifest::new(options, conversion.dashboard)?;
                render::to_writer(writer, &manifest)?;

                Ok(Conversion {
                    dashboard: manifest.spec,
                    warnings: conversion.warnings,
                })
            }
        }
    }
}

/// Convert a dashboard export held in memory
pub fn convert_dashboard(input: &str) -> Result<Conversion> {
    let document: Value = serde_json::from_str(input)?;
    expect_object(&document)?;
    let raw: RawDashboard = serde_json::from_value(document)?;
    let mut diagnostics = Diagnostics::new();

    let dashboard = assemble(raw, &mut diagnostics);

    tracing::debug!(
        title = %dashboard.title,
        rows = dashboard.rows.len(),
        panels = dashboard.panels().count(),
        warnings = diagnostics.len(),
        "dashboard converted"
    );

    Ok(Conversion {
        dashboard,
        warnings: diagnostics.into_warnings(),
    })
}

/// Convert with default options (plain YAML)
pub fn convert<R: Read, W: Write>(reader: R, writer: W) -> Result<Conversion> {
    Converter::new(ConvertOptions::default()).convert(reader, writer)
}

/// Convert with custom options
pub fn convert_with_options<R: Read, W: Write>(
    reader: R,
    writer: W,
    options: ConvertOptions,
) -> Result<Conversion> {
    Converter::new(options).convert(reader, writer)
}

// =============================================================================
// ASSEMBLY
// =============================================================================

fn assemble(raw: RawDashboard, diagnostics: &mut Diagnostics) -> DashboardModel {
    let variables = decode_variables(&raw.templating.list, diagnostics);
    let tags_annotations = decode_annotations(&raw.annotations.list, diagnostics);
    let links = decode_dashboard_links(&raw.links, diagnostics);
    let rows = decode_rows(&raw.panels, diagnostics);

    DashboardModel {
        title: raw.title,
        uid: non_empty(raw.uid),
        slug: non_empty(raw.slug),
        editable: raw.editable,
        shared_crosshair: raw.shared_crosshair || raw.graph_tooltip.is_some_and(|mode| mode > 0),
        tags: raw.tags,
        auto_refresh: raw.refresh.and_then(Refresh::interval),
        time: raw.time.map(|range| [range.from, range.to]),
        timezone: non_empty(raw.timezone),
        tags_annotations,
        variables,
        external_links: links.external,
        dashboard_links: links.internal,
        rows,
    }
}

/// Group the flat panel list into rows.
///
/// A `row` panel closes the current row and opens a new one; its nested
/// (collapsed) panels belong to it. Panels found before the first row marker
/// land in an implicit "Overview" row.
fn decode_rows(panels: &[Value], diagnostics: &mut Diagnostics) -> Vec<Row> {
    let mut rows = Vec::new();
    let mut current: Option<Row> = None;

    for value in panels {
        let Some(raw) = RawPanel::parse(value, diagnostics) else {
            continue;
        };

        if raw.is_row() {
            rows.extend(current.take());

            let mut row = Row::new(raw.title.as_str());
            row.repeat_for = non_empty(raw.repeat.clone());
            row.collapse = raw.collapsed;
            row.panels = raw
                .panels
                .iter()
                .filter_map(|nested| decode_panel(nested, diagnostics))
                .collect();

            current = Some(row);
            continue;
        }

        let row = current.get_or_insert_with(Row::overview);
        if let Some(panel) = decode_parsed_panel(&raw, value, diagnostics) {
            row.panels.push(panel);
        }
    }

    rows.extend(current);
    rows
}
