//! Dark Convert - Grafana dashboard JSON to Dark YAML converter
//!
//! This crate turns a Grafana dashboard export into the typed
//! [`DashboardModel`](dark_core::DashboardModel) that Dark stores in
//! `GrafanaDashboard` resources.
//!
//! # Philosophy
//!
//! Dashboard exports routinely carry panel types, plugin fields and legacy
//! quirks nobody planned for. The converter never gives up on a dashboard
//! because of one item: anything it cannot interpret is dropped and reported
//! as a [`ConversionWarning`]. Only a document that is not JSON at all, or
//! missing manifest options, is fatal.
//!
//! | Grafana                         | Dark                              |
//! |---------------------------------|-----------------------------------|
//! | `{"type": "row", ...}` markers  | `rows: [{name, panels}]`          |
//! | `targets: [{"expr": ...}]`      | `targets: [{prometheus: ...}]`    |
//! | `templating.list`               | `variables: [{query: ...}]`       |
//! | `annotations.list` (tags)       | `tags_annotations`                |
//! | `links`                         | `dashboard_links`, `external_links` |
//!
//! # Example
//!
//! ```
//! use dark_convert::{ConvertOptions, Converter, WarningSeverity};
//! use dark_core::ManifestOptions;
//!
//! let input = r#"{
//!     "title": "Services",
//!     "panels": [
//!         {"type": "row", "title": "Traffic"},
//!         {"type": "graph", "title": "Requests", "datasource": "prometheus"},
//!         {"type": "piechart", "title": "Share"}
//!     ]
//! }"#;
//!
//! let options = ConvertOptions::manifest(ManifestOptions::new("services", "Team"));
//! let mut output = Vec::new();
//! let conversion = Converter::new(options)
//!     .convert(input.as_bytes(), &mut output)
//!     .unwrap();
//!
//! assert_eq!(conversion.dashboard.rows[0].panels.len(), 1);
//! assert_eq!(conversion.count(WarningSeverity::Unsupported), 1);
//!
//! let yaml = String::from_utf8(output).unwrap();
//! assert!(yaml.contains("kind: GrafanaDashboard"));
//! ```

mod alert;
mod annotation;
pub mod converter;
pub mod error;
mod input;
mod link;
mod panels;
mod target;
mod variable;

// Re-exports
pub use converter::{
    Conversion, ConvertOptions, Converter, OutputMode, convert, convert_dashboard,
    convert_with_options,
};
pub use error::{
    ConversionWarning, ConvertError, Diagnostics, Result, WarningCategory, WarningSeverity,
};
