//! The bridge between chart elements and the external renderer.
//!
//! A mounted element owns exactly one render target. Whenever observed state
//! of the element (or of a composed child) changes, the bridge recomputes the
//! parameter sets and re-invokes the renderer.

use std::fmt;
use std::rc::{Rc, Weak};

use crate::element::{Element, WeakElement};
use crate::observer::{ChangeObserver, Delivery, Subscription, TaskQueue};
use crate::params::ParameterSet;
use crate::traits::{BridgeError, RenderHost, RenderNode, RenderTarget};

/// Render state of a mounted element.
pub(crate) struct Mount {
    // Taken out while the target renders.
    target: Option<Box<dyn RenderTarget>>,
    observer: Rc<ChangeObserver>,
    subscription: Subscription,
}

impl Mount {
    pub(crate) fn observer(&self) -> Rc<ChangeObserver> {
        Rc::clone(&self.observer)
    }
}

struct BridgeInner {
    host: Rc<dyn RenderHost>,
    queue: Rc<TaskQueue>,
    delivery: Delivery,
}

/// Keeps mounted elements and their render targets in sync.
#[derive(Clone)]
pub struct Bridge {
    inner: Rc<BridgeInner>,
}

impl Bridge {
    pub fn new(host: Rc<dyn RenderHost>, delivery: Delivery) -> Self {
        Self {
            inner: Rc::new(BridgeInner {
                host,
                queue: TaskQueue::new(),
                delivery,
            }),
        }
    }

    pub fn delivery(&self) -> Delivery {
        self.inner.delivery
    }

    pub fn queue(&self) -> &Rc<TaskQueue> {
        &self.inner.queue
    }

    /// Run pending batched notifications.
    pub fn flush(&self) -> usize {
        self.inner.queue.run_until_idle()
    }

    /// Create the render target, start observing and render once.
    ///
    /// Fails if the element is not connected, not adapter-backed or already
    /// mounted, and if the initial render fails (the target is torn down again).
    pub fn mount(&self, element: &Element) -> Result<(), BridgeError> {
        {
            let node = element.node();
            if node.variant.is_none() {
                return Err(BridgeError::NotAdapterBacked(node.tag.clone()));
            }
            if node.bridge.is_none() {
                return Err(BridgeError::NotConnected(node.tag.clone()));
            }
            if node.mount.is_some() {
                return Err(BridgeError::AlreadyMounted(node.tag.clone()));
            }
        }

        let target = self.inner.host.create_target(element);
        let observer = ChangeObserver::new(Rc::clone(&self.inner.queue), self.inner.delivery);
        let subscription = observer.subscribe(render_listener(
            Rc::downgrade(&self.inner),
            element.downgrade(),
        ));

        element.node_mut().mount = Some(Mount {
            target: Some(target),
            observer,
            subscription,
        });
        tracing::debug!("Mounted <{}>", element.tag());

        if let Err(e) = self.render(element) {
            self.unmount(element);
            return Err(e);
        }
        Ok(())
    }

    /// Stop observing and tear the render target down. No-op if not mounted.
    pub fn unmount(&self, element: &Element) {
        let mount = element.node_mut().mount.take();
        let Some(mut mount) = mount else {
            return;
        };
        mount.subscription.disconnect();
        // A target that is rendering right now is unmounted by `render`.
        if let Some(mut target) = mount.target.take() {
            target.unmount();
        }
        tracing::debug!("Unmounted <{}>", element.tag());
    }

    /// Merge attributes, common properties and variant extras of one element.
    pub fn compute_parameters(&self, element: &Element) -> Result<ParameterSet, BridgeError> {
        let node = element.node();
        let variant = node
            .variant
            .as_ref()
            .ok_or_else(|| BridgeError::NotAdapterBacked(node.tag.clone()))?;
        let binding = variant.react_component(&node.attributes)?;
        Ok(ParameterSet::merge(
            &node.attributes,
            &node.properties,
            &binding.extra,
        ))
    }

    /// Re-invoke the renderer for a mounted element. No-op if not mounted.
    pub fn render(&self, element: &Element) -> Result<(), BridgeError> {
        if !element.is_mounted() {
            tracing::trace!("Skipping render of unmounted <{}>", element.tag());
            return Ok(());
        }

        let tree = self.render_node(element)?;

        // The element is not borrowed while the target renders, so targets
        // may read it.
        let target = element
            .node_mut()
            .mount
            .as_mut()
            .and_then(|mount| mount.target.take());
        let Some(mut target) = target else {
            return Ok(());
        };
        target.render(&tree);
        tracing::debug!(
            "Rendered <{}> as {} with {} parameters",
            element.tag(),
            tree.component,
            tree.params.len()
        );

        // Unmounted while rendering: the target is torn down here.
        let leftover = {
            let mut node = element.node_mut();
            match node.mount.as_mut() {
                Some(mount) if mount.target.is_none() => {
                    mount.target = Some(target);
                    None
                }
                _ => Some(target),
            }
        };
        if let Some(mut target) = leftover {
            target.unmount();
        }
        Ok(())
    }

    /// Component invocation for an element and its composed charts.
    ///
    /// Composed charts are the nearest adapter-backed descendants; passive
    /// elements in between are skipped.
    pub fn render_node(&self, element: &Element) -> Result<RenderNode, BridgeError> {
        let (component, params, children) = {
            let node = element.node();
            let variant = node
                .variant
                .as_ref()
                .ok_or_else(|| BridgeError::NotAdapterBacked(node.tag.clone()))?;
            let binding = variant.react_component(&node.attributes)?;
            let params = ParameterSet::merge(&node.attributes, &node.properties, &binding.extra);
            (binding.component, params, node.children.clone())
        };

        let children = composed_children(&children)
            .iter()
            .map(|child| self.render_node(child))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RenderNode {
            component,
            params,
            children,
        })
    }

    /// Connect a subtree to this bridge.
    ///
    /// Adapter-backed elements without an adapter-backed ancestor are mounted;
    /// composed children are rendered by their ancestor instead.
    pub fn connect(&self, element: &Element) -> Result<(), BridgeError> {
        let composed = element.has_adapter_backed_ancestor();
        self.connect_subtree(element, composed)
    }

    fn connect_subtree(&self, element: &Element, composed: bool) -> Result<(), BridgeError> {
        element.node_mut().bridge = Some(self.clone());

        let backed = element.is_adapter_backed();
        if backed && !composed {
            self.mount(element)?;
        }

        for child in element.children() {
            self.connect_subtree(&child, composed || backed)?;
        }
        Ok(())
    }

    /// Disconnect a subtree, unmounting everything mounted inside it.
    pub fn disconnect(&self, element: &Element) {
        self.unmount(element);
        element.node_mut().bridge = None;
        for child in element.children() {
            self.disconnect(&child);
        }
    }
}

/// Nearest adapter-backed descendants, looking through passive elements.
fn composed_children(children: &[Element]) -> Vec<Element> {
    let mut composed = Vec::new();
    for child in children {
        if child.is_adapter_backed() {
            composed.push(child.clone());
        } else {
            composed.extend(composed_children(&child.children()));
        }
    }
    composed
}

fn render_listener(bridge: Weak<BridgeInner>, element: WeakElement) -> impl Fn() {
    move || {
        let (Some(inner), Some(element)) = (bridge.upgrade(), element.upgrade()) else {
            return;
        };
        let bridge = Bridge { inner };
        if let Err(e) = bridge.render(&element) {
            tracing::error!("Failed to render <{}>: {}", element.tag(), e);
        }
    }
}

impl fmt::Debug for Bridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bridge")
            .field("delivery", &self.inner.delivery)
            .field("pending", &self.inner.queue.pending())
            .finish()
    }
}
