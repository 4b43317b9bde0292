use serde::{Deserialize, Serialize};

/// Handle to a node in its document's arena.
///
/// Ids are only meaningful against the document that issued them; a
/// `deep_clone` assigns fresh ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Raw arena index, for diagnostics.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Closed set of node variants.
///
/// Polymorphic behavior in the editing layer dispatches on this tag rather
/// than on a type hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Element,
    Attribute,
    Text,
    Cdata,
    Comment,
}

impl NodeKind {
    /// Text, CDATA, and comment nodes share the "text-like" contract: they
    /// carry a single mutable string value and no children.
    pub fn is_text_like(self) -> bool {
        matches!(self, NodeKind::Text | NodeKind::Cdata | NodeKind::Comment)
    }
}

/// Where a new node is attached among its siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InsertPosition {
    #[default]
    Append,
    Prepend,
}

/// A single node in the document arena.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum XmlNode {
    /// Element with ordered attributes and children
    Element {
        name: String,
        namespace: Option<String>,
        attributes: Vec<NodeId>,
        children: Vec<NodeId>,
        parent: Option<NodeId>,
    },

    /// Named attribute on an element
    Attribute {
        name: String,
        value: String,
        parent: Option<NodeId>,
    },

    /// Plain character data
    Text { value: String, parent: Option<NodeId> },

    /// CDATA section
    Cdata { value: String, parent: Option<NodeId> },

    /// Comment node
    Comment { value: String, parent: Option<NodeId> },
}

impl XmlNode {
    pub fn kind(&self) -> NodeKind {
        match self {
            XmlNode::Element { .. } => NodeKind::Element,
            XmlNode::Attribute { .. } => NodeKind::Attribute,
            XmlNode::Text { .. } => NodeKind::Text,
            XmlNode::Cdata { .. } => NodeKind::Cdata,
            XmlNode::Comment { .. } => NodeKind::Comment,
        }
    }

    /// Owning element, `None` for the document root.
    pub fn parent(&self) -> Option<NodeId> {
        match self {
            XmlNode::Element { parent, .. }
            | XmlNode::Attribute { parent, .. }
            | XmlNode::Text { parent, .. }
            | XmlNode::Cdata { parent, .. }
            | XmlNode::Comment { parent, .. } => *parent,
        }
    }

    pub(crate) fn set_parent(&mut self, new_parent: Option<NodeId>) {
        match self {
            XmlNode::Element { parent, .. }
            | XmlNode::Attribute { parent, .. }
            | XmlNode::Text { parent, .. }
            | XmlNode::Cdata { parent, .. }
            | XmlNode::Comment { parent, .. } => *parent = new_parent,
        }
    }

    /// Local name for elements and attributes.
    pub fn name(&self) -> Option<&str> {
        match self {
            XmlNode::Element { name, .. } | XmlNode::Attribute { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Namespace URI, defined for elements only.
    pub fn namespace(&self) -> Option<&str> {
        match self {
            XmlNode::Element { namespace, .. } => namespace.as_deref(),
            _ => None,
        }
    }

    /// Textual value for attributes and text-like nodes.
    pub fn value(&self) -> Option<&str> {
        match self {
            XmlNode::Attribute { value, .. }
            | XmlNode::Text { value, .. }
            | XmlNode::Cdata { value, .. }
            | XmlNode::Comment { value, .. } => Some(value),
            XmlNode::Element { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert!(NodeKind::Text.is_text_like());
        assert!(NodeKind::Cdata.is_text_like());
        assert!(NodeKind::Comment.is_text_like());
        assert!(!NodeKind::Element.is_text_like());
        assert!(!NodeKind::Attribute.is_text_like());
    }

    #[test]
    fn test_node_serialization() {
        let node = XmlNode::Attribute {
            name: "id".to_string(),
            value: "a-1".to_string(),
            parent: Some(NodeId(0)),
        };

        let json = serde_json::to_string(&node).unwrap();
        let deserialized: XmlNode = serde_json::from_str(&json).unwrap();

        assert_eq!(node, deserialized);
    }
}
