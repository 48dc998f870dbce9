//! A render host that records what it is asked to do.
//!
//! Used by the command line tool to print render passes and by tests to
//! assert on them.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde::Serialize;

use crate::element::Element;
use crate::traits::{RenderHost, RenderNode, RenderTarget};

/// Something that happened to a render target.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RenderEvent {
    Created { tag: String, target: usize },
    Rendered { tag: String, target: usize, node: RenderNode },
    Unmounted { tag: String, target: usize },
}

impl RenderEvent {
    pub fn tag(&self) -> &str {
        match self {
            RenderEvent::Created { tag, .. }
            | RenderEvent::Rendered { tag, .. }
            | RenderEvent::Unmounted { tag, .. } => tag,
        }
    }
}

/// Render host recording every call into a shared event log.
///
/// Clones share the log.
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    events: Rc<RefCell<Vec<RenderEvent>>>,
    next_target: Rc<Cell<usize>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded events, oldest first.
    pub fn events(&self) -> Vec<RenderEvent> {
        self.events.borrow().clone()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    /// Number of render calls for elements with the given tag.
    pub fn render_count(&self, tag: &str) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|e| matches!(e, RenderEvent::Rendered { .. }) && e.tag() == tag)
            .count()
    }

    /// The most recent render of an element with the given tag.
    pub fn last_render(&self, tag: &str) -> Option<RenderNode> {
        self.events.borrow().iter().rev().find_map(|e| match e {
            RenderEvent::Rendered { tag: t, node, .. } if t == tag => Some(node.clone()),
            _ => None,
        })
    }

    pub fn created_count(&self) -> usize {
        self.count(|e| matches!(e, RenderEvent::Created { .. }))
    }

    pub fn unmount_count(&self) -> usize {
        self.count(|e| matches!(e, RenderEvent::Unmounted { .. }))
    }

    fn count(&self, f: impl Fn(&RenderEvent) -> bool) -> usize {
        self.events.borrow().iter().filter(|e| f(e)).count()
    }

    fn record(&self, event: RenderEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl RenderHost for RecordingHost {
    fn create_target(&self, element: &Element) -> Box<dyn RenderTarget> {
        let target = self.next_target.get();
        self.next_target.set(target + 1);

        let tag = element.tag();
        self.record(RenderEvent::Created {
            tag: tag.clone(),
            target,
        });

        Box::new(RecordingTarget {
            host: self.clone(),
            tag,
            target,
        })
    }
}

struct RecordingTarget {
    host: RecordingHost,
    tag: String,
    target: usize,
}

impl RenderTarget for RecordingTarget {
    fn render(&mut self, node: &RenderNode) {
        self.host.record(RenderEvent::Rendered {
            tag: self.tag.clone(),
            target: self.target,
            node: node.clone(),
        });
    }

    fn unmount(&mut self) {
        self.host.record(RenderEvent::Unmounted {
            tag: self.tag.clone(),
            target: self.target,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::ComponentRef;
    use serde_json::json;

    #[test]
    fn events_serialize_with_kind_tag() {
        let host = RecordingHost::new();
        let el = Element::passive("pfj-chart-donut");
        let mut target = host.create_target(&el);
        target.render(&RenderNode {
            component: ComponentRef("ChartDonut"),
            params: Default::default(),
            children: Vec::new(),
        });
        target.unmount();

        assert_eq!(
            serde_json::to_value(host.events()).unwrap(),
            json!([
                { "event": "created", "tag": "pfj-chart-donut", "target": 0 },
                {
                    "event": "rendered",
                    "tag": "pfj-chart-donut",
                    "target": 0,
                    "node": { "component": "ChartDonut", "params": {} },
                },
                { "event": "unmounted", "tag": "pfj-chart-donut", "target": 0 },
            ])
        );
    }

    #[test]
    fn clones_share_the_log() {
        let host = RecordingHost::new();
        let other = host.clone();
        other.create_target(&Element::passive("a"));
        other.create_target(&Element::passive("b"));

        assert_eq!(host.created_count(), 2);
        host.clear();
        assert!(other.events().is_empty());
    }
}
