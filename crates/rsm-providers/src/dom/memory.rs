//! In-memory DOM tree
//!
//! Parents own their children; children point back through weak references,
//! so dropping the root releases the whole tree.
//!
//! ## Example
//!
//! ```
//! use rsm_domain::ports::DomNode;
//! use rsm_providers::dom::MemoryDocument;
//!
//! let document = MemoryDocument::new("https://app/");
//! let root = document.create_element("main");
//! root.set_attribute("::injector", "");
//! let button = document.create_element("button");
//! root.append_child(&button);
//!
//! assert!(button.closest_ancestor_with("::injector").is_some());
//! assert_eq!(button.base_uri().as_deref(), Some("https://app/"));
//! ```

use rsm_domain::ports::{Document, DomNode};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, Weak};

/// Document owning a base URI
#[derive(Debug)]
pub struct MemoryDocument {
    base_uri: RwLock<String>,
}

impl MemoryDocument {
    /// Create a document
    pub fn new<S: Into<String>>(base_uri: S) -> Arc<Self> {
        Arc::new(Self {
            base_uri: RwLock::new(base_uri.into()),
        })
    }

    /// Change the base URI
    pub fn set_base_uri<S: Into<String>>(&self, base_uri: S) {
        *self.base_uri.write().unwrap_or_else(PoisonError::into_inner) = base_uri.into();
    }

    /// Create an element owned by this document
    pub fn create_element<S: Into<String>>(self: &Arc<Self>, tag: S) -> Arc<MemoryElement> {
        MemoryElement::create(tag.into(), Some(Arc::clone(self)))
    }
}

impl Document for MemoryDocument {
    fn base_uri(&self) -> String {
        self.base_uri
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Element of an in-memory tree
pub struct MemoryElement {
    tag: String,
    document: Option<Arc<MemoryDocument>>,
    attributes: RwLock<BTreeMap<String, String>>,
    parent: RwLock<Weak<MemoryElement>>,
    children: RwLock<Vec<Arc<MemoryElement>>>,
}

impl MemoryElement {
    fn create(tag: String, document: Option<Arc<MemoryDocument>>) -> Arc<Self> {
        Arc::new(Self {
            tag,
            document,
            attributes: RwLock::new(BTreeMap::new()),
            parent: RwLock::new(Weak::new()),
            children: RwLock::new(Vec::new()),
        })
    }

    /// Element without an owning document
    pub fn detached<S: Into<String>>(tag: S) -> Arc<Self> {
        Self::create(tag.into(), None)
    }

    /// Tag name
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Set an attribute
    pub fn set_attribute<N: Into<String>, V: Into<String>>(&self, name: N, value: V) {
        self.attributes
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.into(), value.into());
    }

    /// Remove an attribute; returns its old value
    pub fn remove_attribute(&self, name: &str) -> Option<String> {
        self.attributes
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name)
    }

    /// Append `child`, moving it out of its previous parent
    pub fn append_child(self: &Arc<Self>, child: &Arc<MemoryElement>) {
        if let Some(previous) = child.parent_element() {
            previous
                .children
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .retain(|existing| !Arc::ptr_eq(existing, child));
        }
        *child.parent.write().unwrap_or_else(PoisonError::into_inner) = Arc::downgrade(self);
        self.children
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::clone(child));
    }

    /// Parent as a concrete element
    pub fn parent_element(&self) -> Option<Arc<MemoryElement>> {
        self.parent
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .upgrade()
    }

    /// Children, in insertion order
    pub fn children(&self) -> Vec<Arc<MemoryElement>> {
        self.children
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// This element as a port object
    pub fn as_node(self: &Arc<Self>) -> Arc<dyn DomNode> {
        Arc::clone(self) as Arc<dyn DomNode>
    }
}

impl DomNode for MemoryElement {
    fn parent(&self) -> Option<Arc<dyn DomNode>> {
        self.parent_element()
            .map(|parent| parent as Arc<dyn DomNode>)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    fn attribute_names(&self) -> Vec<String> {
        self.attributes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    fn base_uri(&self) -> Option<String> {
        self.document.as_ref().map(|document| document.base_uri())
    }
}

impl fmt::Debug for MemoryElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryElement")
            .field("tag", &self.tag)
            .field(
                "attributes",
                &*self.attributes.read().unwrap_or_else(PoisonError::into_inner),
            )
            .finish_non_exhaustive()
    }
}
