use std::any::Any;

use crate::traits::{Attributes, BridgeError, ChartVariant, ComponentBinding, ComponentRef};

pub const TAG: &str = "pfj-chart-donut";
pub const COMPONENT: ComponentRef = ComponentRef("ChartDonut");

/// Plain donut chart. Everything it needs is in the common properties.
#[derive(Debug, Clone, Default)]
pub struct Donut;

impl Donut {
    pub fn new() -> Self {
        Self
    }
}

impl ChartVariant for Donut {
    fn tag_name(&self) -> &'static str {
        TAG
    }

    fn react_component(&self, _attributes: &Attributes) -> Result<ComponentBinding, BridgeError> {
        Ok(ComponentBinding::new(COMPONENT))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
