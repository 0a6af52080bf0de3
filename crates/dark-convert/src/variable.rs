//! Template variable decoders

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

use dark_core::variable::{
    ConstVariable, CustomVariable, DatasourceVariable, HideMode, IntervalVariable, QueryVariable,
    Variable,
};

use crate::error::{ConversionWarning, Diagnostics, WarningCategory, warnings};
use crate::input::{Datasource, QueryRequest, Selection, decode_item, non_empty, null_as_default};

/// Selection value meaning "all options"
const ALL_VALUE: &str = "$__all";

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawVariable {
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    kind: String,
    #[serde(deserialize_with = "null_as_default")]
    name: String,
    label: Option<String>,
    hide: Option<i64>,
    current: Option<RawCurrent>,
    #[serde(deserialize_with = "null_as_default")]
    options: Vec<RawOption>,
    query: Option<QueryRequest>,
    datasource: Option<Datasource>,
    regex: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    include_all: bool,
    all_value: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawCurrent {
    text: Option<Selection>,
    value: Option<Selection>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawOption {
    text: Option<Selection>,
    value: Option<Selection>,
}

impl RawVariable {
    fn current_value(&mut self) -> String {
        Selection::joined(self.current.as_mut().and_then(|c| c.value.take()))
    }

    fn current_text(&mut self) -> String {
        Selection::joined(self.current.as_mut().and_then(|c| c.text.take()))
    }

    fn values_map(&mut self) -> BTreeMap<String, String> {
        std::mem::take(&mut self.options)
            .into_iter()
            .map(|opt| (Selection::joined(opt.text), Selection::joined(opt.value)))
            .collect()
    }
}

/// Decode `templating.list`
pub(crate) fn decode_variables(raw: &[Value], diagnostics: &mut Diagnostics) -> Vec<Variable> {
    raw.iter()
        .filter_map(|value| decode_variable(value, diagnostics))
        .collect()
}

fn decode_variable(value: &Value, diagnostics: &mut Diagnostics) -> Option<Variable> {
    let mut raw: RawVariable = decode_item(value, WarningCategory::Variable, diagnostics)?;
    let hide = decode_hide(raw.hide, &raw.name, diagnostics);
    let label = non_empty(raw.label.take());

    let kind = std::mem::take(&mut raw.kind);

    let variable = match kind.as_str() {
        "interval" => Variable::Interval(IntervalVariable {
            default: non_empty(Some(raw.current_value())),
            values: std::mem::take(&mut raw.options)
                .into_iter()
                .map(|opt| Selection::joined(opt.value))
                .collect(),
            name: raw.name,
            label,
            hide,
        }),
        "custom" => Variable::Custom(CustomVariable {
            default: non_empty(Some(raw.current_value())),
            values_map: raw.values_map(),
            include_all: raw.include_all,
            all_value: non_empty(raw.all_value),
            name: raw.name,
            label,
            hide,
        }),
        "query" => Variable::Query(QueryVariable {
            default_all: raw.current_value() == ALL_VALUE,
            datasource: raw.datasource.and_then(Datasource::legacy_name),
            request: QueryRequest::into_query(raw.query),
            regex: non_empty(raw.regex),
            include_all: raw.include_all,
            all_value: non_empty(raw.all_value),
            name: raw.name,
            label,
            hide,
        }),
        "const" | "constant" => Variable::Const(ConstVariable {
            default: non_empty(Some(raw.current_text())),
            values_map: raw.values_map(),
            name: raw.name,
            label,
            hide,
        }),
        "datasource" => Variable::Datasource(DatasourceVariable {
            plugin: QueryRequest::into_query(raw.query),
            regex: non_empty(raw.regex),
            include_all: raw.include_all,
            name: raw.name,
            label,
            hide,
        }),
        kind => {
            diagnostics.push(ConversionWarning::unsupported(
                WarningCategory::Variable,
                &raw.name,
                format!("unhandled variable type '{}': skipped", kind),
            ));
            return None;
        }
    };

    Some(variable)
}

/// 0 = shown, 1 = label hidden, 2 = variable hidden
fn decode_hide(code: Option<i64>, name: &str, diagnostics: &mut Diagnostics) -> Option<HideMode> {
    match code.unwrap_or(0) {
        0 => None,
        1 => Some(HideMode::Label),
        2 => Some(HideMode::Variable),
        other => {
            diagnostics.push(warnings::defaulted(
                WarningCategory::Variable,
                name,
                "hide code",
                &other.to_string(),
                "shown",
            ));
            None
        }
    }
}
