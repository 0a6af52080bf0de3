//! Dark Core - typed dashboard model
//!
//! This crate holds the structured, versioned representation of a Grafana
//! dashboard that Dark stores in `GrafanaDashboard` resources:
//! - `DashboardModel`: general settings, variables, annotations, links and rows
//! - `Panel`: one closed variant per supported panel kind
//! - `Target`: one closed variant per supported query dialect
//! - `Variable`: one closed variant per template variable kind
//! - `DashboardManifest`: the Kubernetes envelope around a dashboard
//!
//! Every type is built once by a converter and then only serialized; nothing
//! here mutates after construction.
//!
//! # Example
//!
//! ```
//! use dark_core::{DashboardModel, Row, render};
//!
//! let dashboard = DashboardModel {
//!     title: "Overview".to_string(),
//!     rows: vec![Row::new("Services")],
//!     ..Default::default()
//! };
//!
//! let yaml = render::to_yaml(&dashboard).unwrap();
//! assert!(yaml.contains("title: Overview"));
//! ```

pub mod alert;
pub mod dashboard;
pub mod error;
pub mod manifest;
pub mod panel;
pub mod render;
pub mod target;
pub mod variable;

pub use alert::{Alert, AlertCondition, AlertThreshold, AlertValue};
pub use dashboard::{
    DashboardInternalLink, DashboardModel, ExternalLink, PanelLink, Row, TagAnnotation,
};
pub use error::ManifestError;
pub use manifest::{DashboardManifest, ManifestOptions, API_VERSION, KIND};
pub use panel::{Panel, PanelCommon, RepeatDirection};
pub use target::{StackdriverAlignment, StackdriverFilters, StackdriverTarget, Target};
pub use variable::{HideMode, Variable};

/// `skip_serializing_if` helper for flags that are only rendered when set
pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}
