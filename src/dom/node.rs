use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::constants::{MODULE_ID_ATTR, MODULE_NAME_ATTR};
use crate::models::{ModuleId, ModuleName};

/// Shared handle to an element in a tree.
pub type ElementRef = Arc<Element>;

/// A single element: tag, attributes, ordered children.
///
/// Attributes and children sit behind locks so markers can be written after
/// the tree has been built and shared.
#[derive(Debug)]
pub struct Element {
    tag: String,
    attributes: RwLock<HashMap<String, String>>,
    children: RwLock<Vec<Node>>,
}

/// A node in a tree. Only an element can act as a subtree root; every other
/// kind of node falls under the permissive no-op contract of the lifecycle
/// facade.
#[derive(Debug, Clone)]
pub enum Node {
    Element(ElementRef),
    Text(String),
}

impl Element {
    pub fn new(tag: impl Into<String>) -> ElementRef {
        Arc::new(Self {
            tag: tag.into(),
            attributes: RwLock::new(HashMap::new()),
            children: RwLock::new(Vec::new()),
        })
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attr(&self, name: &str) -> Option<String> {
        self.attributes.read().get(name).cloned()
    }

    pub fn set_attr(&self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.write().insert(name.into(), value.into());
    }

    pub fn remove_attr(&self, name: &str) {
        self.attributes.write().remove(name);
    }

    pub fn append_child(&self, child: Node) {
        self.children.write().push(child);
    }

    /// Snapshot of the current children.
    pub fn children(&self) -> Vec<Node> {
        self.children.read().clone()
    }

    /// Every element of the subtree rooted here, in document order
    /// (pre-order, root included).
    pub fn descendants(self: &Arc<Self>) -> Vec<ElementRef> {
        let mut elements = Vec::new();
        collect_elements(self, &mut elements);
        elements
    }

    /// Elements of this subtree carrying the module-name marker, in
    /// document order.
    pub fn module_roots(self: &Arc<Self>) -> Vec<ElementRef> {
        self.descendants()
            .into_iter()
            .filter(|element| element.attr(MODULE_NAME_ATTR).is_some())
            .collect()
    }

    /// The module kind declared on this element, if any.
    pub fn module_name(&self) -> Option<ModuleName> {
        self.attr(MODULE_NAME_ATTR).map(ModuleName::from)
    }

    /// The registry-assigned identifier carried by this element, if any.
    pub fn module_id(&self) -> Option<ModuleId> {
        self.attr(MODULE_ID_ATTR).map(ModuleId::from)
    }
}

fn collect_elements(element: &ElementRef, elements: &mut Vec<ElementRef>) {
    elements.push(element.clone());
    for child in element.children() {
        if let Node::Element(child_element) = child {
            collect_elements(&child_element, elements);
        }
    }
}

impl Node {
    /// The subtree root this node denotes, if it structurally is one.
    pub fn as_scope_root(&self) -> Option<&ElementRef> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }
}

impl From<ElementRef> for Node {
    fn from(element: ElementRef) -> Self {
        Node::Element(element)
    }
}
