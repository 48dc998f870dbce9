use std::any::Any;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::traits::{Attributes, BridgeError, ChartVariant, ComponentBinding, ComponentRef};

pub const TAG: &str = "pfj-chart-donut-threshold";
pub const COMPONENT: ComponentRef = ComponentRef("ChartDonutThreshold");

/// One labelled threshold band, e.g. `{ x: "Warning at 60%", y: 60 }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryThreshold {
    pub x: String,
    pub y: f64,
}

impl CategoryThreshold {
    pub fn new(x: impl Into<String>, y: f64) -> Self {
        Self { x: x.into(), y }
    }
}

/// Donut with static threshold bands. The utilization it shows comes from a
/// composed `pfj-chart-donut-utilization` child.
#[derive(Debug, Clone, Default)]
pub struct DonutThreshold {
    pub thresholds: Option<Vec<CategoryThreshold>>,
    pub invert: Option<bool>,
}

impl DonutThreshold {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ChartVariant for DonutThreshold {
    fn tag_name(&self) -> &'static str {
        TAG
    }

    fn react_component(&self, _attributes: &Attributes) -> Result<ComponentBinding, BridgeError> {
        let mut extra = Map::new();
        // Typed threshold bands are the chart's data. A `data` attribute goes
        // through the attribute layer so a later `data` property still wins.
        if let Some(thresholds) = &self.thresholds {
            match serde_json::to_value(thresholds) {
                Ok(value) => {
                    extra.insert("data".to_string(), value);
                }
                Err(e) => tracing::warn!("Failed to serialize thresholds: {}", e),
            }
        }
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn thresholds_become_data() {
        let donut = DonutThreshold {
            thresholds: Some(vec![
                CategoryThreshold::new("Warning at 60%", 60.0),
                CategoryThreshold::new("Danger at 90%", 90.0),
            ]),
            invert: None,
        };
        let binding = donut.react_component(&Attributes::new()).unwrap();

        assert_eq!(
            binding.extra.get("data"),
            Some(&json!([
                { "x": "Warning at 60%", "y": 60.0 },
                { "x": "Danger at 90%", "y": 90.0 },
            ]))
        );
    }

    #[test]
    fn data_attribute_is_left_to_the_attribute_layer() {
        let attributes = Attributes::from([("data".to_string(), "1".to_string())]);
        let binding = DonutThreshold::new().react_component(&attributes).unwrap();

        assert!(!binding.extra.contains_key("data"));
    }
}
