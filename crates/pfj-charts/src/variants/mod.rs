//! Built-in chart variants.

mod bullet;
mod donut;
mod donut_threshold;
mod donut_utilization;

pub use bullet::{Bullet, BulletData};
pub use donut::Donut;
pub use donut_threshold::{CategoryThreshold, DonutThreshold};
pub use donut_utilization::{DonutUtilization, Threshold};

use serde::Serialize;
use serde_json::Map;

use crate::coerce::parse_attr_value;
use crate::traits::Attributes;

/// Prefer the typed property; fall back to the (coerced) attribute.
fn typed_or_attribute<T: Serialize>(
    extra: &mut Map<String, serde_json::Value>,
    key: &str,
    typed: Option<&T>,
    attributes: &Attributes,
    attribute: &str,
) {
    if let Some(value) = typed {
        match serde_json::to_value(value) {
            Ok(value) => {
                extra.insert(key.to_string(), value);
                return;
            }
            Err(e) => tracing::warn!("Failed to serialize {}: {}", key, e),
        }
    }

    if let Some(raw) = attributes.get(attribute).filter(|raw| !raw.is_empty()) {
        extra.insert(key.to_string(), parse_attr_value(raw));
    }
}
