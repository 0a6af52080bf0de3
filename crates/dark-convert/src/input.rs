//! Lenient view of a Grafana dashboard export
//!
//! Only the scalar settings are typed up front. Item lists stay raw JSON
//! values so each item can be decoded (and rejected) on its own. Fields
//! that Grafana writes in several shapes get a small untagged union and a
//! single narrowing helper.

use serde::de::{DeserializeOwned, Unexpected};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{ConversionWarning, Diagnostics, WarningCategory, warnings};

/// Deserialize `null` as the type's default value
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Treat empty strings as absent
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Best-effort name of a raw item, for diagnostics
pub(crate) fn item_label(value: &Value) -> &str {
    ["title", "name", "refId", "alias"]
        .iter()
        .find_map(|key| value.get(key).and_then(Value::as_str))
        .unwrap_or_default()
}

/// Decode each raw item, skipping (and reporting) the malformed ones
pub(crate) fn decode_each<T: DeserializeOwned>(
    items: &[Value],
    category: WarningCategory,
    diagnostics: &mut Diagnostics,
) -> Vec<T> {
    items
        .iter()
        .filter_map(|item| decode_item(item, category, diagnostics))
        .collect()
}

/// Reject anything but a JSON object.
///
/// Derived struct visitors also accept sequences and fill fields by position,
/// which would turn an array into a half-populated item.
pub(crate) fn expect_object(value: &Value) -> Result<(), serde_json::Error> {
    let unexpected = match value {
        Value::Object(_) => return Ok(()),
        Value::Null => Unexpected::Unit,
        Value::Bool(b) => Unexpected::Bool(*b),
        Value::Number(_) => Unexpected::Other("number"),
        Value::String(s) => Unexpected::Str(s),
        Value::Array(_) => Unexpected::Seq,
    };

    Err(serde::de::Error::invalid_type(unexpected, &"a JSON object"))
}

/// Decode a single raw item, reporting it when malformed
pub(crate) fn decode_item<T: DeserializeOwned>(
    item: &Value,
    category: WarningCategory,
    diagnostics: &mut Diagnostics,
) -> Option<T> {
    match expect_object(item).and_then(|()| T::deserialize(item)) {
        Ok(decoded) => Some(decoded),
        Err(err) => {
            diagnostics.push(warnings::malformed(category, item_label(item), &err));
            None
        }
    }
}

// =============================================================================
// DASHBOARD
// =============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct RawDashboard {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    pub uid: Option<String>,
    pub slug: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub editable: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub shared_crosshair: bool,
    /// 0 = default, 1 = shared crosshair, 2 = shared tooltip
    pub graph_tooltip: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    pub refresh: Option<Refresh>,
    pub time: Option<RawTimeRange>,
    pub timezone: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub panels: Vec<Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub templating: RawList,
    #[serde(deserialize_with = "null_as_default")]
    pub annotations: RawList,
    #[serde(deserialize_with = "null_as_default")]
    pub links: Vec<Value>,
}

/// `{"list": [...]}` wrapper used by templating and annotations
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawList {
    #[serde(deserialize_with = "null_as_default")]
    pub list: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawTimeRange {
    #[serde(deserialize_with = "null_as_default")]
    pub from: String,
    #[serde(deserialize_with = "null_as_default")]
    pub to: String,
}

// =============================================================================
// POLYMORPHIC FIELDS
// =============================================================================

/// `refresh`: `false` when disabled, a duration otherwise
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum Refresh {
    Flag(bool),
    Interval(String),
}

impl Refresh {
    pub fn interval(self) -> Option<String> {
        match self {
            Self::Flag(_) => None,
            Self::Interval(interval) => non_empty(Some(interval)),
        }
    }
}

/// Legacy datasource name or a `{uid, type}` reference
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum Datasource {
    Name(String),
    Reference(serde_json::Map<String, Value>),
}

impl Datasource {
    /// Only legacy names survive; references point at instance-specific UIDs
    pub fn legacy_name(self) -> Option<String> {
        match self {
            Self::Name(name) => non_empty(Some(name)),
            Self::Reference(_) => None,
        }
    }
}

/// Panel height, written as `"250px"` or `250`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum Height {
    Text(String),
    Number(serde_json::Number),
}

impl Height {
    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Text(text) => non_empty(Some(text)),
            Self::Number(number) => Some(number.to_string()),
        }
    }
}

/// Axis boundary, written either as a number or as a numeric string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum Bound {
    Number(f64),
    Text(String),
}

impl Bound {
    /// Unparsable strings are dropped with a diagnostic
    pub fn narrow(
        bound: Option<Self>,
        field: &str,
        subject: &str,
        diagnostics: &mut Diagnostics,
    ) -> Option<f64> {
        match bound? {
            Self::Number(value) => Some(value),
            Self::Text(text) if text.trim().is_empty() => None,
            Self::Text(text) => match text.trim().parse::<f64>() {
                Ok(value) => Some(value),
                Err(_) => {
                    diagnostics.push(ConversionWarning::warning(
                        WarningCategory::Field,
                        subject,
                        format!("{} '{}' is not a number: ignored", field, text),
                    ));
                    None
                }
            },
        }
    }
}

/// A variable selection: one value, or several for multi-value variables
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum Selection {
    One(String),
    Many(Vec<String>),
}

impl Selection {
    /// Lists are joined with commas
    pub fn joined(selection: Option<Self>) -> String {
        match selection {
            None => String::new(),
            Some(Self::One(value)) => value,
            Some(Self::Many(values)) => values.join(","),
        }
    }
}

/// A query variable request: a bare string or `{"query": "..."}`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum QueryRequest {
    Text(String),
    Object {
        #[serde(default, deserialize_with = "null_as_default")]
        query: String,
    },
}

impl QueryRequest {
    pub fn into_query(request: Option<Self>) -> String {
        match request {
            None => String::new(),
            Some(Self::Text(query)) | Some(Self::Object { query }) => query,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WarningSeverity;
    use serde_json::json;

    #[test]
    fn test_refresh_narrowing() {
        let flag: Refresh = serde_json::from_value(json!(false)).unwrap();
        assert_eq!(flag.interval(), None);

        let interval: Refresh = serde_json::from_value(json!("30s")).unwrap();
        assert_eq!(interval.interval(), Some("30s".to_string()));
    }

    #[test]
    fn test_datasource_narrowing() {
        let legacy: Datasource = serde_json::from_value(json!("prometheus")).unwrap();
        assert_eq!(legacy.legacy_name(), Some("prometheus".to_string()));

        let reference: Datasource =
            serde_json::from_value(json!({"uid": "P1809F7CD0C75ACF3", "type": "prometheus"}))
                .unwrap();
        assert_eq!(reference.legacy_name(), None);
    }

    #[test]
    fn test_height_narrowing() {
        let text: Height = serde_json::from_value(json!("250px")).unwrap();
        assert_eq!(text.into_text(), Some("250px".to_string()));

        let number: Height = serde_json::from_value(json!(300)).unwrap();
        assert_eq!(number.into_text(), Some("300".to_string()));
    }

    #[test]
    fn test_bound_narrowing() {
        let mut diagnostics = Diagnostics::new();

        let parsed = Bound::narrow(Some(Bound::Text("1.5".into())), "min", "CPU", &mut diagnostics);
        assert_eq!(parsed, Some(1.5));

        let number = Bound::narrow(Some(Bound::Number(0.0)), "min", "CPU", &mut diagnostics);
        assert_eq!(number, Some(0.0));

        assert_eq!(Bound::narrow(None, "min", "CPU", &mut diagnostics), None);
        assert!(diagnostics.is_empty());

        let invalid = Bound::narrow(Some(Bound::Text("auto".into())), "max", "CPU", &mut diagnostics);
        assert_eq!(invalid, None);
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_selection_joined() {
        let many: Selection = serde_json::from_value(json!(["a", "b"])).unwrap();
        assert_eq!(Selection::joined(Some(many)), "a,b");
        assert_eq!(Selection::joined(None), "");
    }

    #[test]
    fn test_query_request_shapes() {
        let text: QueryRequest = serde_json::from_value(json!("label_values(job)")).unwrap();
        assert_eq!(QueryRequest::into_query(Some(text)), "label_values(job)");

        let object: QueryRequest =
            serde_json::from_value(json!({"query": "label_values(instance)", "refId": "X"}))
                .unwrap();
        assert_eq!(QueryRequest::into_query(Some(object)), "label_values(instance)");
    }

    #[test]
    fn test_decode_each_skips_malformed() {
        #[derive(Deserialize)]
        struct Item {
            #[allow(dead_code)]
            name: String,
        }

        let mut diagnostics = Diagnostics::new();
        let items = vec![json!({"name": "ok"}), json!({"name": 42})];

        let decoded: Vec<Item> = decode_each(&items, WarningCategory::Variable, &mut diagnostics);
        assert_eq!(decoded.len(), 1);
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_decode_item_rejects_arrays() {
        #[derive(Debug, Default, Deserialize)]
        #[serde(default)]
        struct Item {
            name: String,
        }

        let mut diagnostics = Diagnostics::new();
        let decoded: Option<Item> =
            decode_item(&json!(["positional"]), WarningCategory::Panel, &mut diagnostics);

        assert!(decoded.is_none());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics.warnings()[0].severity, WarningSeverity::Error);

        let decoded: Option<Item> =
            decode_item(&json!({"name": "ok"}), WarningCategory::Panel, &mut diagnostics);
        assert_eq!(decoded.map(|item| item.name).as_deref(), Some("ok"));
    }

    #[test]
    fn test_expect_object() {
        assert!(expect_object(&json!({})).is_ok());
        assert!(expect_object(&json!([])).is_err());
        assert!(expect_object(&json!("title")).is_err());
        assert!(expect_object(&json!(null)).is_err());
    }
}
