use std::any::Any;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::typed_or_attribute;
use crate::properties::LegendData;
use crate::traits::{Attributes, BridgeError, ChartVariant, ComponentBinding, ComponentRef};

pub const TAG: &str = "pfj-chart-bullet";
pub const COMPONENT: ComponentRef = ComponentRef("ChartBullet");

/// One bullet measure or range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulletData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub y: f64,
}

impl BulletData {
    pub fn new(name: impl Into<String>, y: f64) -> Self {
        Self {
            name: Some(name.into()),
            y,
        }
    }

    pub fn value(y: f64) -> Self {
        Self { name: None, y }
    }
}

/// Bullet chart: a primary measure against comparative measures and
/// qualitative ranges.
#[derive(Debug, Clone, Default)]
pub struct Bullet {
    pub comparative_error_measure_data: Option<Vec<BulletData>>,
    pub comparative_error_measure_legend_data: Option<Vec<LegendData>>,
    pub comparative_warning_measure_data: Option<Vec<BulletData>>,
    pub comparative_warning_measure_legend_data: Option<Vec<LegendData>>,
    pub primary_dot_measure_data: Option<Vec<BulletData>>,
    pub primary_dot_measure_legend_data: Option<Vec<LegendData>>,
    pub primary_segmented_measure_data: Option<Vec<BulletData>>,
    pub primary_segmented_measure_legend_data: Option<Vec<LegendData>>,
    pub qualitative_range_data: Option<Vec<BulletData>>,
    pub qualitative_range_legend_data: Option<Vec<LegendData>>,
    pub max_domain: Option<f64>,
}

impl Bullet {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ChartVariant for Bullet {
    fn tag_name(&self) -> &'static str {
        TAG
    }

    fn react_component(&self, attributes: &Attributes) -> Result<ComponentBinding, BridgeError> {
        let mut extra = Map::new();

        let measures = [
            (
                "comparativeErrorMeasureData",
                "comparative-error-measure-data",
                &self.comparative_error_measure_data,
            ),
            (
                "comparativeWarningMeasureData",
                "comparative-warning-measure-data",
                &self.comparative_warning_measure_data,
            ),
            (
                "primaryDotMeasureData",
                "primary-dot-measure-data",
                &self.primary_dot_measure_data,
            ),
            (
                "primarySegmentedMeasureData",
                "primary-segmented-measure-data",
                &self.primary_segmented_measure_data,
            ),
            (
                "qualitativeRangeData",
                "qualitative-range-data",
                &self.qualitative_range_data,
            ),
        ];
        for (key, attribute, typed) in measures {
            typed_or_attribute(&mut extra, key, typed.as_ref(), attributes, attribute);
        }

        let legends = [
            (
                "comparativeErrorMeasureLegendData",
                "comparative-error-measure-legend-data",
                &self.comparative_error_measure_legend_data,
            ),
            (
                "comparativeWarningMeasureLegendData",
                "comparative-warning-measure-legend-data",
                &self.comparative_warning_measure_legend_data,
            ),
            (
                "primaryDotMeasureLegendData",
                "primary-dot-measure-legend-data",
                &self.primary_dot_measure_legend_data,
            ),
            (
                "primarySegmentedMeasureLegendData",
                "primary-segmented-measure-legend-data",
                &self.primary_segmented_measure_legend_data,
            ),
            (
                "qualitativeRangeLegendData",
                "qualitative-range-legend-data",
                &self.qualitative_range_legend_data,
            ),
        ];
        for (key, attribute, typed) in legends {
            typed_or_attribute(&mut extra, key, typed.as_ref(), attributes, attribute);
        }

        // A typed max domain is numeric already; the attribute passes
        // through the regular attribute conversion.
        if let Some(max) = self.max_domain {
            extra.insert("maxDomain".to_string(), Value::from(max));
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
