//! Dashboard template variables

use serde::Serialize;
use std::collections::BTreeMap;

use crate::is_false;

/// How much of a variable is hidden from the dashboard header.
///
/// A visible variable carries no hide mode at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HideMode {
    /// Only the label is hidden
    Label,
    /// The whole variable is hidden
    Variable,
}

impl HideMode {
    /// Value rendered for this mode; the empty string means "shown"
    pub fn as_str(mode: Option<Self>) -> &'static str {
        match mode {
            None => "",
            Some(Self::Label) => "label",
            Some(Self::Variable) => "variable",
        }
    }
}

/// A dashboard-level named parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Variable {
    Interval(IntervalVariable),
    Custom(CustomVariable),
    Query(QueryVariable),
    Const(ConstVariable),
    Datasource(DatasourceVariable),
}

impl Variable {
    pub fn name(&self) -> &str {
        match self {
            Self::Interval(v) => &v.name,
            Self::Custom(v) => &v.name,
            Self::Query(v) => &v.name,
            Self::Const(v) => &v.name,
            Self::Datasource(v) => &v.name,
        }
    }

    pub fn hide(&self) -> Option<HideMode> {
        match self {
            Self::Interval(v) => v.hide,
            Self::Custom(v) => v.hide,
            Self::Query(v) => v.hide,
            Self::Const(v) => v.hide,
            Self::Datasource(v) => v.hide,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IntervalVariable {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    pub values: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide: Option<HideMode>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CustomVariable {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    /// Option text to option value
    pub values_map: BTreeMap<String, String>,

    #[serde(skip_serializing_if = "is_false")]
    pub include_all: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_value: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide: Option<HideMode>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryVariable {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub datasource: Option<String>,

    pub request: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub regex: Option<String>,

    #[serde(skip_serializing_if = "is_false")]
    pub include_all: bool,

    #[serde(skip_serializing_if = "is_false")]
    pub default_all: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_value: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide: Option<HideMode>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConstVariable {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    pub values_map: BTreeMap<String, String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide: Option<HideMode>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DatasourceVariable {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Datasource plugin id, e.g. `prometheus`
    #[serde(rename = "type")]
    pub plugin: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub regex: Option<String>,

    #[serde(skip_serializing_if = "is_false")]
    pub include_all: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide: Option<HideMode>,
}
