//! Typed properties shared by all chart variants.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Formats the label of a single datum.
///
/// Only settable programmatically, never through an attribute.
#[derive(Clone)]
pub struct LabelFormatter(Rc<dyn Fn(&Value) -> String>);

impl LabelFormatter {
    pub fn new(f: impl Fn(&Value) -> String + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Format the label for a datum.
    pub fn format(&self, datum: &Value) -> String {
        (self.0)(datum)
    }
}

impl fmt::Debug for LabelFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LabelFormatter(..)")
    }
}

/// Chart data: a single datum or an ordered sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChartData {
    Many(Vec<Value>),
    Single(Value),
}

/// One legend entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendData {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<LegendSymbol>,
}

impl LegendData {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: None,
        }
    }
}

/// Symbol drawn next to a legend entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendSymbol {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,

    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Offsets around the chart area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
}

impl Padding {
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top: Some(top),
            right: Some(right),
            bottom: Some(bottom),
            left: Some(left),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendOrientation {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LegendPosition {
    Bottom,
    BottomLeft,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubTitlePosition {
    Bottom,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartThemeColor {
    Blue,
    Cyan,
    Gold,
    Gray,
    Green,
    Multi,
    MultiOrdered,
    MultiUnordered,
    Orange,
    Purple,
}

/// Properties common to every chart variant.
///
/// Unset fields never reach the renderer, so attributes of the same name stay visible.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ChartData>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,

    #[serde(skip)]
    pub labels: Option<LabelFormatter>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend_allow_wrap: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend_data: Option<Vec<LegendData>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend_orientation: Option<LegendOrientation>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend_position: Option<LegendPosition>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<Padding>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_title_position: Option<SubTitlePosition>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme_color: Option<ChartThemeColor>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
}

impl ChartProperties {
    /// Explicitly set properties as camelCase parameters.
    pub fn to_params(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            Ok(_) => Map::new(),
            Err(e) => {
                tracing::warn!("Failed to serialize chart properties: {}", e);
                Map::new()
            }
        }
    }

    /// Legend entries built from plain names.
    pub fn legend_names<I, S>(names: I) -> Vec<LegendData>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names.into_iter().map(LegendData::named).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn unset_properties_produce_no_params() {
        assert!(ChartProperties::default().to_params().is_empty());
    }

    #[test]
    fn set_properties_use_camel_case_keys() {
        let props = ChartProperties {
            legend_data: Some(ChartProperties::legend_names(["Cats", "Dogs"])),
            legend_position: Some(LegendPosition::BottomLeft),
            sub_title_position: Some(SubTitlePosition::Right),
            theme_color: Some(ChartThemeColor::MultiOrdered),
            padding: Some(Padding {
                top: Some(20.0),
                ..Default::default()
            }),
            ..Default::default()
        };

        assert_eq!(
            Value::Object(props.to_params()),
            json!({
                "legendData": [{ "name": "Cats" }, { "name": "Dogs" }],
                "legendPosition": "bottom-left",
                "subTitlePosition": "right",
                "themeColor": "multiOrdered",
                "padding": { "top": 20.0 },
            })
        );
    }

    #[test]
    fn labels_never_serialize() {
        let props = ChartProperties {
            labels: Some(LabelFormatter::new(|d| format!("{}", d["y"]))),
            ..Default::default()
        };

        assert!(props.to_params().is_empty());
        let formatter = props.labels.unwrap();
        assert_eq!(formatter.format(&json!({ "y": 3 })), "3");
    }

    #[test]
    fn data_accepts_single_or_many() {
        let many = ChartData::Many(vec![json!(1), json!(2)]);
        let single = ChartData::Single(json!({ "x": "Cats", "y": 35 }));

        assert_eq!(serde_json::to_value(many).unwrap(), json!([1, 2]));
        assert_eq!(
            serde_json::to_value(single).unwrap(),
            json!({ "x": "Cats", "y": 35 })
        );
    }
}
