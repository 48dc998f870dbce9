//! Parameter sets handed to the renderer.

use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::coerce::{dash_to_camel, parse_attr_value, parse_number};
use crate::properties::{ChartProperties, LabelFormatter};
use crate::traits::Attributes;

/// Parameters whose values are callbacks or composed sub-components.
/// They cannot be derived from flat attributes and never reach the renderer.
pub static DISALLOWED_KEYS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    HashSet::from([
        "events",
        "containerComponent",
        "legendComponent",
        "labelComponent",
        "titleComponent",
        "subTitleComponent",
        "groupComponent",
        "desc",
    ])
});

/// Attributes that never become parameters.
pub static IGNORED_ATTRIBUTES: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| HashSet::from(["class", "style", "labels"]));

/// Merged, filtered parameters for one component invocation.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ParameterSet {
    #[serde(flatten)]
    values: BTreeMap<String, Value>,

    #[serde(skip)]
    labels: Option<LabelFormatter>,
}

impl ParameterSet {
    /// Merge attributes, common properties and variant extras.
    ///
    /// Later sources override earlier ones by key; disallowed keys are dropped
    /// last, then `width` and `height` are made numeric.
    pub fn merge(
        attributes: &Attributes,
        properties: &ChartProperties,
        extra: &Map<String, Value>,
    ) -> Self {
        let mut values = BTreeMap::new();

        for (name, raw) in attributes {
            let key = dash_to_camel(name);
            if IGNORED_ATTRIBUTES.contains(key.as_str()) {
                continue;
            }
            values.insert(key, parse_attr_value(raw));
        }

        for (key, value) in properties.to_params() {
            values.insert(key, value);
        }

        for (key, value) in extra {
            values.insert(key.clone(), value.clone());
        }

        values.retain(|key, _| !DISALLOWED_KEYS.contains(key.as_str()));

        for key in ["width", "height"] {
            coerce_dimension(&mut values, key);
        }

        Self {
            values,
            labels: properties.labels.clone(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Label formatter set as a typed property.
    pub fn labels(&self) -> Option<&LabelFormatter> {
        self.labels.as_ref()
    }

    /// Values as a JSON object.
    pub fn to_json(&self) -> Value {
        Value::Object(self.values.clone().into_iter().collect())
    }
}

fn coerce_dimension(values: &mut BTreeMap<String, Value>, key: &str) {
    let Some(value) = values.get(key) else {
        return;
    };

    let coerced = match value {
        Value::Number(_) => return,
        Value::Bool(b) => Some(Value::from(u8::from(*b))),
        Value::String(s) => parse_number(s.trim()).map(Value::Number),
        _ => None,
    };

    match coerced {
        Some(number) => {
            values.insert(key.to_string(), number);
        }
        None => {
            tracing::warn!("Dropping non-numeric {}: {}", key, value);
            values.remove(key);
        }
    }
}
