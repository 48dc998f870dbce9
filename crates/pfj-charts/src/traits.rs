//! Trait definitions for chart variants and render hosts.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::element::Element;
use crate::params::ParameterSet;

/// Raw attributes of an element, keyed by lower-cased attribute name.
pub type Attributes = BTreeMap<String, String>;

/// Reference to a component of the external rendering library (e.g. "ChartBullet").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ComponentRef(pub &'static str);

impl ComponentRef {
    /// Component name as known to the renderer.
    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ComponentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// What a chart variant hands to the bridge: the component to render and
/// the parameters only this variant knows about.
#[derive(Debug, Clone)]
pub struct ComponentBinding {
    /// Component to render
    pub component: ComponentRef,

    /// Variant-specific parameters, overriding attributes and common properties
    pub extra: Map<String, Value>,
}

impl ComponentBinding {
    /// Bind a component without extra parameters.
    pub fn new(component: ComponentRef) -> Self {
        Self {
            component,
            extra: Map::new(),
        }
    }

    /// Add an extra parameter.
    pub fn with(mut self, key: &str, value: Value) -> Self {
        self.extra.insert(key.to_string(), value);
        self
    }
}

/// One component invocation handed to a render target.
#[derive(Debug, Clone, Serialize)]
pub struct RenderNode {
    /// Component to render
    pub component: ComponentRef,

    /// Merged and filtered parameters
    pub params: ParameterSet,

    /// Invocations of composed adapter-backed children, in document order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RenderNode>,
}

/// Errors raised by the bridge.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BridgeError {
    #[error("<{0}> does not implement react_component()")]
    MissingComponentHook(String),

    #[error("<{0}> is not backed by a chart variant")]
    NotAdapterBacked(String),

    #[error("<{0}> is not connected to a document")]
    NotConnected(String),

    #[error("<{0}> is already mounted")]
    AlreadyMounted(String),

    #[error("Element <{0}> is already defined")]
    AlreadyDefined(String),

    #[error("Unknown element <{0}>")]
    UnknownTag(String),

    #[error("<{0}> cannot be appended to itself or one of its descendants")]
    InvalidHierarchy(String),
}

/// A concrete chart variant backing an element.
pub trait ChartVariant: Any {
    /// Custom element tag (e.g. "pfj-chart-bullet")
    fn tag_name(&self) -> &'static str;

    /// Component to render plus variant-specific parameters.
    ///
    /// Variants must override this; the default fails every render.
    fn react_component(&self, attributes: &Attributes) -> Result<ComponentBinding, BridgeError> {
        let _ = attributes;
        Err(BridgeError::MissingComponentHook(self.tag_name().to_string()))
    }

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Creates render targets for mounted elements.
pub trait RenderHost {
    /// Create the target bound to the element's content region.
    fn create_target(&self, element: &Element) -> Box<dyn RenderTarget>;
}

/// Mount point owned exclusively by one mounted element.
pub trait RenderTarget {
    /// Render (or re-render) the component tree into this target.
    fn render(&mut self, node: &RenderNode);

    /// Tear the target down. Called exactly once.
    fn unmount(&mut self);
}
