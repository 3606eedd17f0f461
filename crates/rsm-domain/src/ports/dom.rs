//! DOM tree port
//!
//! The minimal capabilities the injector needs from a live, externally owned
//! tree: parent navigation, attribute reads and the owning document's base URI.

use std::fmt;
use std::sync::Arc;

/// Element of the host's DOM tree
pub trait DomNode: Send + Sync + fmt::Debug {
    /// Parent element, `None` at the root
    fn parent(&self) -> Option<Arc<dyn DomNode>>;

    /// Value of an attribute
    fn attribute(&self, name: &str) -> Option<String>;

    /// Names of every attribute currently set
    fn attribute_names(&self) -> Vec<String>;

    /// Base URI of the owning document, `None` when detached
    fn base_uri(&self) -> Option<String>;

    /// Whether an attribute is set
    fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// Nearest strict ancestor carrying `name`
    fn closest_ancestor_with(&self, name: &str) -> Option<Arc<dyn DomNode>> {
        let mut current = self.parent();
        while let Some(node) = current {
            if node.has_attribute(name) {
                return Some(node);
            }
            current = node.parent();
        }
        None
    }
}

/// Document-like host exposing a base URI
pub trait Document: Send + Sync {
    /// Base URI of the document
    fn base_uri(&self) -> String;
}
