//! Registry of custom element tags and the chart variants behind them.

use std::collections::HashMap;
use std::fmt;

use crate::coerce::to_pascal_case;
use crate::traits::{Attributes, BridgeError, ChartVariant, ComponentRef};
use crate::variants::{Bullet, Donut, DonutThreshold, DonutUtilization};

type Factory = Box<dyn Fn() -> Box<dyn ChartVariant>>;

/// Maps element tags (case-insensitive) to variant factories.
#[derive(Default)]
pub struct ElementRegistry {
    /// Factories by lowercase tag
    factories: HashMap<String, Factory>,
}

impl ElementRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with every built-in chart defined.
    pub fn with_charts() -> Self {
        let mut registry = Self::new();
        registry.define_builtin::<Bullet>();
        registry.define_builtin::<Donut>();
        registry.define_builtin::<DonutThreshold>();
        registry.define_builtin::<DonutUtilization>();
        registry
    }

    /// Define a tag. Each tag can be defined once.
    pub fn define<F>(&mut self, tag: &str, factory: F) -> Result<(), BridgeError>
    where
        F: Fn() -> Box<dyn ChartVariant> + 'static,
    {
        let key = tag.to_lowercase();
        if self.factories.contains_key(&key) {
            return Err(BridgeError::AlreadyDefined(key));
        }
        tracing::debug!("Defined <{}> ({})", key, to_pascal_case(&key));
        self.factories.insert(key, Box::new(factory));
        Ok(())
    }

    fn define_builtin<V: ChartVariant + Default>(&mut self) {
        let tag = V::default().tag_name();
        if let Err(e) = self.define(tag, || Box::new(V::default())) {
            tracing::warn!("{}", e);
        }
    }

    /// Instantiate the variant for a tag.
    pub fn create(&self, tag: &str) -> Option<Box<dyn ChartVariant>> {
        self.factories.get(&tag.to_lowercase()).map(|factory| factory())
    }

    /// Check if a tag is defined.
    pub fn contains(&self, tag: &str) -> bool {
        self.factories.contains_key(&tag.to_lowercase())
    }

    /// All defined tags, sorted.
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    /// Component a tag renders, as reported by a fresh variant.
    pub fn component(&self, tag: &str) -> Result<ComponentRef, BridgeError> {
        let variant = self
            .create(tag)
            .ok_or_else(|| BridgeError::UnknownTag(tag.to_lowercase()))?;
        Ok(variant.react_component(&Attributes::new())?.component)
    }
}

impl fmt::Debug for ElementRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementRegistry")
            .field("tags", &self.tags())
            .finish()
    }
}
