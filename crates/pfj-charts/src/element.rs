//! Chart elements: attributes, typed properties and composed children.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::adapter::{Bridge, Mount};
use crate::properties::ChartProperties;
use crate::traits::{Attributes, BridgeError, ChartVariant};

/// A long-lived node of the element tree.
///
/// Cloning yields another handle onto the same node.
#[derive(Clone)]
pub struct Element {
    node: Rc<RefCell<Node>>,
}

pub(crate) struct Node {
    pub(crate) tag: String,
    pub(crate) attributes: Attributes,
    pub(crate) properties: ChartProperties,
    pub(crate) variant: Option<Box<dyn ChartVariant>>,
    pub(crate) children: Vec<Element>,
    // Relation only: the parent owns us, never the other way round.
    pub(crate) parent: Weak<RefCell<Node>>,
    // Set while the element is part of a document.
    pub(crate) bridge: Option<Bridge>,
    pub(crate) mount: Option<Mount>,
}

/// Weak handle used by listeners so they never keep an element alive.
#[derive(Clone)]
pub(crate) struct WeakElement(Weak<RefCell<Node>>);

impl WeakElement {
    pub(crate) fn upgrade(&self) -> Option<Element> {
        self.0.upgrade().map(|node| Element { node })
    }
}

impl Element {
    fn from_parts(tag: &str, variant: Option<Box<dyn ChartVariant>>) -> Self {
        Self {
            node: Rc::new(RefCell::new(Node {
                tag: tag.to_lowercase(),
                attributes: Attributes::new(),
                properties: ChartProperties::default(),
                variant,
                children: Vec::new(),
                parent: Weak::new(),
                bridge: None,
                mount: None,
            })),
        }
    }

    /// An ordinary element the bridge never renders.
    pub fn passive(tag: &str) -> Self {
        Self::from_parts(tag, None)
    }

    /// An adapter-backed element for the given chart variant.
    pub fn with_variant(variant: Box<dyn ChartVariant>) -> Self {
        let tag = variant.tag_name();
        Self::from_parts(tag, Some(variant))
    }

    pub(crate) fn node(&self) -> Ref<'_, Node> {
        self.node.borrow()
    }

    pub(crate) fn node_mut(&self) -> RefMut<'_, Node> {
        self.node.borrow_mut()
    }

    pub(crate) fn downgrade(&self) -> WeakElement {
        WeakElement(Rc::downgrade(&self.node))
    }

    /// Whether both handles point at the same node.
    pub fn ptr_eq(&self, other: &Element) -> bool {
        Rc::ptr_eq(&self.node, &other.node)
    }

    pub fn tag(&self) -> String {
        self.node().tag.clone()
    }

    pub fn is_adapter_backed(&self) -> bool {
        self.node().variant.is_some()
    }

    pub fn is_connected(&self) -> bool {
        self.node().bridge.is_some()
    }

    pub fn is_mounted(&self) -> bool {
        self.node().mount.is_some()
    }

    // ------------------------------------------------------ attributes

    /// Set an attribute. Names are case-insensitive.
    pub fn set_attribute(&self, name: &str, value: impl Into<String>) {
        self.node_mut()
            .attributes
            .insert(name.to_lowercase(), value.into());
        self.notify_change();
    }

    /// Remove an attribute, returning its previous value.
    pub fn remove_attribute(&self, name: &str) -> Option<String> {
        let removed = self.node_mut().attributes.remove(&name.to_lowercase());
        if removed.is_some() {
            self.notify_change();
        }
        removed
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.node().attributes.get(&name.to_lowercase()).cloned()
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.node().attributes.contains_key(&name.to_lowercase())
    }

    pub fn attributes(&self) -> Attributes {
        self.node().attributes.clone()
    }

    // ------------------------------------------------------ properties

    pub fn properties(&self) -> ChartProperties {
        self.node().properties.clone()
    }

    /// Mutate the common chart properties and notify the owning chart.
    pub fn update_properties<R>(&self, f: impl FnOnce(&mut ChartProperties) -> R) -> R {
        let result = f(&mut self.node_mut().properties);
        self.notify_change();
        result
    }

    /// Mutate the typed properties of the backing variant.
    ///
    /// Returns `None` (and notifies nobody) if the element is not backed by `V`.
    pub fn update_variant<V: ChartVariant, R>(&self, f: impl FnOnce(&mut V) -> R) -> Option<R> {
        let result = {
            let mut node = self.node_mut();
            let variant = node.variant.as_mut()?.as_any_mut().downcast_mut::<V>()?;
            f(variant)
        };
        self.notify_change();
        Some(result)
    }

    /// Read the typed properties of the backing variant.
    pub fn variant_ref<V: ChartVariant, R>(&self, f: impl FnOnce(&V) -> R) -> Option<R> {
        let node = self.node();
        let variant = node.variant.as_ref()?.as_any().downcast_ref::<V>()?;
        Some(f(variant))
    }

    // ------------------------------------------------------ hierarchy

    pub fn parent(&self) -> Option<Element> {
        self.node().parent.upgrade().map(|node| Element { node })
    }

    pub fn children(&self) -> Vec<Element> {
        self.node().children.clone()
    }

    /// Whether `self` is `other` or one of its ancestors.
    fn is_inclusive_ancestor_of(&self, other: &Element) -> bool {
        let mut current = Some(other.clone());
        while let Some(el) = current {
            if el.ptr_eq(self) {
                return true;
            }
            current = el.parent();
        }
        false
    }

    /// Whether any strict ancestor is adapter-backed.
    pub(crate) fn has_adapter_backed_ancestor(&self) -> bool {
        let mut current = self.parent();
        while let Some(el) = current {
            if el.is_adapter_backed() {
                return true;
            }
            current = el.parent();
        }
        false
    }

    /// Append a child, moving it out of its previous parent.
    ///
    /// If this element is connected the child's subtree is connected too, and
    /// top-level charts inside it are mounted.
    pub fn append_child(&self, child: &Element) -> Result<(), BridgeError> {
        if child.is_inclusive_ancestor_of(self) {
            return Err(BridgeError::InvalidHierarchy(child.tag()));
        }

        if let Some(old_parent) = child.parent() {
            old_parent.remove_child(child);
        }

        child.node_mut().parent = Rc::downgrade(&self.node);
        self.node_mut().children.push(child.clone());

        let bridge = self.node().bridge.clone();
        if let Some(bridge) = bridge {
            if let Err(e) = bridge.connect(child) {
                bridge.disconnect(child);
                self.detach(child);
                return Err(e);
            }
        }

        self.notify_change();
        Ok(())
    }

    /// Remove a direct child. The child keeps existing, disconnected.
    pub fn remove_child(&self, child: &Element) -> bool {
        if !self.detach(child) {
            return false;
        }

        let bridge = child.node().bridge.clone();
        if let Some(bridge) = bridge {
            bridge.disconnect(child);
        }

        self.notify_change();
        true
    }

    fn detach(&self, child: &Element) -> bool {
        let position = self.node().children.iter().position(|c| c.ptr_eq(child));
        let Some(index) = position else {
            return false;
        };
        self.node_mut().children.remove(index);
        child.node_mut().parent = Weak::new();
        true
    }

    // ------------------------------------------------------ notification

    /// Nearest ancestor-or-self that owns a render target, looked up now.
    pub(crate) fn owner(&self) -> Option<Element> {
        let mut current = Some(self.clone());
        while let Some(el) = current {
            if el.is_mounted() {
                return Some(el);
            }
            current = el.parent();
        }
        None
    }

    /// Tell the owning chart that observed state changed.
    pub(crate) fn notify_change(&self) {
        if !self.is_connected() {
            return;
        }
        let Some(owner) = self.owner() else {
            return;
        };
        let observer = owner.node().mount.as_ref().map(Mount::observer);
        if let Some(observer) = observer {
            observer.notify();
        }
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.node();
        f.debug_struct("Element")
            .field("tag", &node.tag)
            .field("attributes", &node.attributes)
            .field("children", &node.children.len())
            .field("connected", &node.bridge.is_some())
            .field("mounted", &node.mount.is_some())
            .finish()
    }
}
