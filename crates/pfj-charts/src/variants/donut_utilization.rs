use std::any::Any;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::typed_or_attribute;
use crate::traits::{Attributes, BridgeError, ChartVariant, ComponentBinding, ComponentRef};

pub const TAG: &str = "pfj-chart-donut-utilization";
pub const COMPONENT: ComponentRef = ComponentRef("ChartDonutUtilization");

/// Utilization level at which the donut changes color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    pub value: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Threshold {
    pub fn new(value: f64) -> Self {
        Self { value, color: None }
    }

    pub fn colored(value: f64, color: impl Into<String>) -> Self {
        Self {
            value,
            color: Some(color.into()),
        }
    }
}

/// Donut showing a single utilization value.
///
/// Standalone it renders its own chart; inside a `pfj-chart-donut-threshold`
/// it is rendered as part of the threshold chart.
#[derive(Debug, Clone, Default)]
pub struct DonutUtilization {
    pub thresholds: Option<Vec<Threshold>>,
    pub invert: Option<bool>,
}

impl DonutUtilization {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ChartVariant for DonutUtilization {
    fn tag_name(&self) -> &'static str {
        TAG
    }

    fn react_component(&self, attributes: &Attributes) -> Result<ComponentBinding, BridgeError> {
        let mut extra = Map::new();
        typed_or_attribute(
            &mut extra,
            "thresholds",
            self.thresholds.as_ref(),
            attributes,
            "thresholds",
        );
        if let Some(invert) = self.invert {
            extra.insert("invert".to_string(), Value::Bool(invert));
        }
        Ok(ComponentBinding {
            component: COMPONENT,
            extra,
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
