//! A document: the root of a connected element tree.

use std::rc::Rc;

use crate::adapter::Bridge;
use crate::element::Element;
use crate::markup::MarkupNode;
use crate::observer::Delivery;
use crate::registry::ElementRegistry;
use crate::traits::{BridgeError, ChartVariant, RenderHost};

/// Owns the bridge, the tag registry and a connected `body` element.
///
/// Elements appended (directly or indirectly) to the body are connected;
/// charts among them are mounted and kept rendered.
#[derive(Debug)]
pub struct Document {
    bridge: Bridge,
    registry: ElementRegistry,
    body: Element,
}

impl Document {
    /// Document with the built-in charts and batched delivery.
    pub fn new(host: Rc<dyn RenderHost>) -> Self {
        Self::with_registry(host, Delivery::default(), ElementRegistry::with_charts())
    }

    pub fn with_delivery(host: Rc<dyn RenderHost>, delivery: Delivery) -> Self {
        Self::with_registry(host, delivery, ElementRegistry::with_charts())
    }

    pub fn with_registry(
        host: Rc<dyn RenderHost>,
        delivery: Delivery,
        registry: ElementRegistry,
    ) -> Self {
        let bridge = Bridge::new(host, delivery);
        let body = Element::passive("body");
        // A passive element has nothing to mount; connecting it cannot fail.
        if let Err(e) = bridge.connect(&body) {
            tracing::error!("Failed to connect <body>: {}", e);
        }
        Self {
            bridge,
            registry,
            body,
        }
    }

    pub fn body(&self) -> &Element {
        &self.body
    }

    pub fn bridge(&self) -> &Bridge {
        &self.bridge
    }

    pub fn registry(&self) -> &ElementRegistry {
        &self.registry
    }

    /// Define an additional chart tag.
    pub fn define<F>(&mut self, tag: &str, factory: F) -> Result<(), BridgeError>
    where
        F: Fn() -> Box<dyn ChartVariant> + 'static,
    {
        self.registry.define(tag, factory)
    }

    /// New unconnected element; adapter-backed if the tag is defined.
    pub fn create_element(&self, tag: &str) -> Element {
        match self.registry.create(tag) {
            Some(variant) => Element::with_variant(variant),
            None => Element::passive(tag),
        }
    }

    /// Build an unconnected element tree from parsed markup.
    pub fn build(&self, markup: &MarkupNode) -> Result<Element, BridgeError> {
        let element = self.create_element(&markup.tag);
        for (name, value) in &markup.attributes {
            element.set_attribute(name, value.as_str());
        }
        for child in &markup.children {
            element.append_child(&self.build(child)?)?;
        }
        Ok(element)
    }

    /// Append to the body, connecting and mounting as needed.
    pub fn append(&self, element: &Element) -> Result<(), BridgeError> {
        self.body.append_child(element)
    }

    /// Run queued change notifications.
    pub fn flush(&self) -> usize {
        self.bridge.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::parse_markup;
    use crate::recording::{RecordingHost, RenderEvent};
    use crate::variants::{Bullet, BulletData};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn document(delivery: Delivery) -> (RecordingHost, Document) {
        let host = RecordingHost::new();
        let doc = Document::with_delivery(Rc::new(host.clone()), delivery);
        (host, doc)
    }

    #[test]
    fn creates_adapter_backed_elements_for_defined_tags() {
        let (_, doc) = document(Delivery::Batched);

        assert!(doc.create_element("PFJ-CHART-BULLET").is_adapter_backed());
        assert!(!doc.create_element("div").is_adapter_backed());
        assert!(doc.body().is_connected());
    }

    #[test]
    fn renders_markup_once_per_top_level_chart() {
        let (host, doc) = document(Delivery::Batched);
        let nodes = parse_markup(
            r#"<div>
                 <pfj-chart-donut title="Pets" data='[{"x":"Cats","y":35}]' width="300"></pfj-chart-donut>
                 <pfj-chart-donut-threshold data='[{"x":"Warning at 60%","y":60}]'>
                   <pfj-chart-donut-utilization data='{"x":"Storage","y":45}'></pfj-chart-donut-utilization>
                 </pfj-chart-donut-threshold>
               </div>"#,
        )
        .unwrap();

        let root = doc.build(&nodes[0]).unwrap();
        doc.append(&root).unwrap();
        doc.flush();

        assert_eq!(host.created_count(), 2);
        assert_eq!(host.render_count("pfj-chart-donut"), 1);
        assert_eq!(host.render_count("pfj-chart-donut-threshold"), 1);

        let donut = host.last_render("pfj-chart-donut").unwrap();
        assert_eq!(
            donut.params.to_json(),
            json!({ "title": "Pets", "data": [{ "x": "Cats", "y": 35 }], "width": 300 })
        );

        let threshold = host.last_render("pfj-chart-donut-threshold").unwrap();
        assert_eq!(threshold.children.len(), 1);
        assert_eq!(
            threshold.children[0].params.get("data"),
            Some(&json!({ "x": "Storage", "y": 45 }))
        );
    }

    #[test]
    fn burst_of_changes_renders_final_state_once() {
        let (host, doc) = document(Delivery::Batched);
        let bullet = doc.create_element("pfj-chart-bullet");
        doc.append(&bullet).unwrap();
        assert_eq!(host.render_count("pfj-chart-bullet"), 1);

        bullet.set_attribute("title", "first");
        bullet.set_attribute("title", "second");
        bullet.update_variant::<Bullet, _>(|b| {
            b.primary_segmented_measure_data = Some(vec![BulletData::new("Measure", 60.0)]);
        });
        assert_eq!(doc.flush(), 1);

        assert_eq!(host.render_count("pfj-chart-bullet"), 2);
        let node = host.last_render("pfj-chart-bullet").unwrap();
        assert_eq!(node.params.get("title"), Some(&json!("second")));
        assert_eq!(
            node.params.get("primarySegmentedMeasureData"),
            Some(&json!([{ "name": "Measure", "y": 60.0 }]))
        );
    }

    #[test]
    fn removing_from_body_unmounts() {
        let (host, doc) = document(Delivery::Synchronous);
        let donut = doc.create_element("pfj-chart-donut");
        doc.append(&donut).unwrap();

        assert!(doc.body().remove_child(&donut));

        assert!(!donut.is_mounted());
        assert!(!donut.is_connected());
        assert!(matches!(
            host.events().last(),
            Some(RenderEvent::Unmounted { .. })
        ));

        // the detached element still exists and notifies nobody
        donut.set_attribute("title", "ignored");
        assert_eq!(host.render_count("pfj-chart-donut"), 1);
    }

    #[test]
    fn custom_tags_without_hook_fail_to_mount() {
        struct Sketch;
        impl ChartVariant for Sketch {
            fn tag_name(&self) -> &'static str {
                "pfj-chart-sketch"
            }
            fn as_any(&self) -> &dyn std::any::Any {
                self
            }
            fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
                self
            }
        }

        let (host, mut doc) = document(Delivery::Batched);
        doc.define("pfj-chart-sketch", || Box::new(Sketch)).unwrap();

        let sketch = doc.create_element("pfj-chart-sketch");
        assert_eq!(
            doc.append(&sketch),
            Err(BridgeError::MissingComponentHook("pfj-chart-sketch".to_string()))
        );
        assert!(doc.body().children().is_empty());
        assert_eq!(host.created_count(), host.unmount_count());
    }
}
