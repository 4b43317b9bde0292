//! # Document Tree
//!
//! Arena-backed mutable XML document.
//!
//! Nodes live in a flat store and point at each other by `NodeId`. Detaching
//! a node unlinks it from its parent but leaves the slot allocated; the node
//! simply becomes unreachable from the root. `deep_clone` walks the reachable
//! tree only, so detached slots never survive a snapshot.

use crate::error::DocumentError;
use crate::node::{InsertPosition, NodeId, NodeKind, XmlNode};
use serde::{Deserialize, Serialize};

/// Mutable XML document tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XmlDocument {
    nodes: Vec<XmlNode>,
    root: NodeId,
    namespace: Option<String>,
}

impl XmlDocument {
    /// Create a document with a single root element.
    pub fn new(root_name: impl Into<String>, namespace: Option<&str>) -> Self {
        let namespace = namespace.map(str::to_string);
        let root = XmlNode::Element {
            name: root_name.into(),
            namespace: namespace.clone(),
            attributes: Vec::new(),
            children: Vec::new(),
            parent: None,
        };

        Self {
            nodes: vec![root],
            root: NodeId(0),
            namespace,
        }
    }

    /// Root element handle.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Document namespace URI (the root element's namespace).
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Look up a node, `None` if the id is stale.
    pub fn get(&self, id: NodeId) -> Option<&XmlNode> {
        self.nodes.get(id.0)
    }

    /// Look up a node or fail.
    pub fn node(&self, id: NodeId) -> Result<&XmlNode, DocumentError> {
        self.nodes.get(id.0).ok_or(DocumentError::NodeNotFound(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut XmlNode, DocumentError> {
        self.nodes
            .get_mut(id.0)
            .ok_or(DocumentError::NodeNotFound(id))
    }

    /// Ordered children of an element.
    pub fn children(&self, element: NodeId) -> Result<&[NodeId], DocumentError> {
        match self.node(element)? {
            XmlNode::Element { children, .. } => Ok(children),
            _ => Err(DocumentError::NotAnElement),
        }
    }

    /// Ordered attributes of an element.
    pub fn attributes(&self, element: NodeId) -> Result<&[NodeId], DocumentError> {
        match self.node(element)? {
            XmlNode::Element { attributes, .. } => Ok(attributes),
            _ => Err(DocumentError::NotAnElement),
        }
    }

    /// Find an attribute of `element` by name.
    pub fn attribute(
        &self,
        element: NodeId,
        name: &str,
    ) -> Result<Option<NodeId>, DocumentError> {
        for id in self.attributes(element)? {
            if self.node(*id)?.name() == Some(name) {
                return Ok(Some(*id));
            }
        }
        Ok(None)
    }

    /// Attribute value of `element` by name.
    pub fn attribute_value(
        &self,
        element: NodeId,
        name: &str,
    ) -> Result<Option<&str>, DocumentError> {
        match self.attribute(element, name)? {
            Some(id) => Ok(self.node(id)?.value()),
            None => Ok(None),
        }
    }

    /// Create a child element under `parent`.
    pub fn create_element(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        position: InsertPosition,
    ) -> Result<NodeId, DocumentError> {
        let node = XmlNode::Element {
            name: name.into(),
            namespace: self.namespace.clone(),
            attributes: Vec::new(),
            children: Vec::new(),
            parent: Some(parent),
        };
        self.attach_child(parent, node, position)
    }

    /// Create a text node under `parent`.
    pub fn create_text(
        &mut self,
        parent: NodeId,
        value: impl Into<String>,
        position: InsertPosition,
    ) -> Result<NodeId, DocumentError> {
        let node = XmlNode::Text {
            value: value.into(),
            parent: Some(parent),
        };
        self.attach_child(parent, node, position)
    }

    /// Create a CDATA section under `parent`.
    pub fn create_cdata(
        &mut self,
        parent: NodeId,
        value: impl Into<String>,
        position: InsertPosition,
    ) -> Result<NodeId, DocumentError> {
        let node = XmlNode::Cdata {
            value: value.into(),
            parent: Some(parent),
        };
        self.attach_child(parent, node, position)
    }

    /// Create a comment under `parent`.
    pub fn create_comment(
        &mut self,
        parent: NodeId,
        value: impl Into<String>,
        position: InsertPosition,
    ) -> Result<NodeId, DocumentError> {
        let node = XmlNode::Comment {
            value: value.into(),
            parent: Some(parent),
        };
        self.attach_child(parent, node, position)
    }

    /// Create an attribute on `element`.
    ///
    /// Name uniqueness is a cross-node invariant enforced by the editing
    /// layer; this primitive attaches unconditionally.
    pub fn create_attribute(
        &mut self,
        element: NodeId,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<NodeId, DocumentError> {
        // Fail before allocating if the target is not an element.
        self.attributes(element)?;

        let id = NodeId(self.nodes.len());
        self.nodes.push(XmlNode::Attribute {
            name: name.into(),
            value: value.into(),
            parent: Some(element),
        });

        if let XmlNode::Element { attributes, .. } = self.node_mut(element)? {
            attributes.push(id);
        }

        tracing::debug!(element = element.index(), attribute = id.index(), "attribute created");
        Ok(id)
    }

    fn attach_child(
        &mut self,
        parent: NodeId,
        node: XmlNode,
        position: InsertPosition,
    ) -> Result<NodeId, DocumentError> {
        // Fail before allocating if the parent is not an element.
        self.children(parent)?;

        let id = NodeId(self.nodes.len());
        self.nodes.push(node);

        if let XmlNode::Element { children, .. } = self.node_mut(parent)? {
            match position {
                InsertPosition::Append => children.push(id),
                InsertPosition::Prepend => children.insert(0, id),
            }
        }

        tracing::debug!(parent = parent.index(), child = id.index(), "node created");
        Ok(id)
    }

    /// Replace the textual value of an attribute or text-like node.
    pub fn set_value(
        &mut self,
        id: NodeId,
        new_value: impl Into<String>,
    ) -> Result<(), DocumentError> {
        match self.node_mut(id)? {
            XmlNode::Attribute { value, .. }
            | XmlNode::Text { value, .. }
            | XmlNode::Cdata { value, .. }
            | XmlNode::Comment { value, .. } => {
                *value = new_value.into();
                Ok(())
            }
            XmlNode::Element { .. } => Err(DocumentError::NotTextual),
        }
    }

    /// Unlink a node from its parent.
    ///
    /// The slot stays allocated but the node becomes unreachable; snapshots
    /// taken afterwards will not contain it.
    pub fn detach(&mut self, id: NodeId) -> Result<(), DocumentError> {
        if id == self.root {
            return Err(DocumentError::CannotDetachRoot);
        }

        let parent = self.node(id)?.parent().ok_or(DocumentError::NotAttached)?;
        if let XmlNode::Element {
            attributes,
            children,
            ..
        } = self.node_mut(parent)?
        {
            attributes.retain(|c| *c != id);
            children.retain(|c| *c != id);
        }
        self.node_mut(id)?.set_parent(None);

        tracing::debug!(node = id.index(), "node detached");
        Ok(())
    }

    /// Index of a node within its parent's child (or attribute) list.
    pub fn position(&self, id: NodeId) -> Result<usize, DocumentError> {
        let parent = self.node(id)?.parent().ok_or(DocumentError::NotAttached)?;
        let list = self.sibling_list(parent, id)?;
        list.iter()
            .position(|c| *c == id)
            .ok_or(DocumentError::NotAttached)
    }

    /// Sibling `offset` steps away from `id`, `None` past either end.
    pub fn sibling_at(
        &self,
        id: NodeId,
        offset: isize,
    ) -> Result<Option<NodeId>, DocumentError> {
        let parent = self.node(id)?.parent().ok_or(DocumentError::NotAttached)?;
        let list = self.sibling_list(parent, id)?;
        let pos = list
            .iter()
            .position(|c| *c == id)
            .ok_or(DocumentError::NotAttached)? as isize;

        let target = pos + offset;
        if target < 0 || target >= list.len() as isize {
            return Ok(None);
        }
        Ok(Some(list[target as usize]))
    }

    /// Swap two nodes within their shared parent's ordering.
    pub fn swap_siblings(&mut self, a: NodeId, b: NodeId) -> Result<(), DocumentError> {
        if a == b {
            return Ok(());
        }

        let parent_a = self.node(a)?.parent().ok_or(DocumentError::NotAttached)?;
        let parent_b = self.node(b)?.parent().ok_or(DocumentError::NotAttached)?;
        if parent_a != parent_b {
            return Err(DocumentError::DifferentParents);
        }

        let in_attrs = self.node(a)?.kind() == NodeKind::Attribute;
        if let XmlNode::Element {
            attributes,
            children,
            ..
        } = self.node_mut(parent_a)?
        {
            let list = if in_attrs { attributes } else { children };
            let pos_a = list.iter().position(|c| *c == a);
            let pos_b = list.iter().position(|c| *c == b);
            match (pos_a, pos_b) {
                (Some(i), Some(j)) => {
                    list.swap(i, j);
                    Ok(())
                }
                _ => Err(DocumentError::NotAttached),
            }
        } else {
            Err(DocumentError::NotAnElement)
        }
    }

    fn sibling_list(&self, parent: NodeId, id: NodeId) -> Result<&[NodeId], DocumentError> {
        if self.node(id)?.kind() == NodeKind::Attribute {
            self.attributes(parent)
        } else {
            self.children(parent)
        }
    }

    /// Deep-copy the document.
    ///
    /// Produces a brand-new document in the same namespace with the root
    /// subtree deep-imported. The copy shares nothing with the source, and
    /// slots detached from the source tree are not carried over.
    pub fn deep_clone(&self) -> XmlDocument {
        let mut copy = XmlDocument {
            nodes: Vec::new(),
            root: NodeId(0),
            namespace: self.namespace.clone(),
        };
        copy.root = self.import_into(self.root, None, &mut copy);
        copy
    }

    fn import_into(
        &self,
        src: NodeId,
        parent: Option<NodeId>,
        dst: &mut XmlDocument,
    ) -> NodeId {
        let id = NodeId(dst.nodes.len());
        match &self.nodes[src.0] {
            XmlNode::Element {
                name,
                namespace,
                attributes,
                children,
                ..
            } => {
                // Reserve the slot first so children can point back at it.
                dst.nodes.push(XmlNode::Element {
                    name: name.clone(),
                    namespace: namespace.clone(),
                    attributes: Vec::new(),
                    children: Vec::new(),
                    parent,
                });

                let imported_attrs: Vec<NodeId> = attributes
                    .iter()
                    .map(|a| self.import_into(*a, Some(id), dst))
                    .collect();
                let imported_children: Vec<NodeId> = children
                    .iter()
                    .map(|c| self.import_into(*c, Some(id), dst))
                    .collect();

                if let XmlNode::Element {
                    attributes,
                    children,
                    ..
                } = &mut dst.nodes[id.0]
                {
                    *attributes = imported_attrs;
                    *children = imported_children;
                }
                id
            }
            leaf => {
                let mut node = leaf.clone();
                node.set_parent(parent);
                dst.nodes.push(node);
                id
            }
        }
    }

    /// Content equality ignoring arena indices.
    ///
    /// Two documents are structurally equal when their reachable trees carry
    /// the same names, values, and ordering.
    pub fn structural_eq(&self, other: &XmlDocument) -> bool {
        self.namespace == other.namespace && self.subtree_eq(self.root, other, other.root)
    }

    fn subtree_eq(&self, a: NodeId, other: &XmlDocument, b: NodeId) -> bool {
        match (&self.nodes[a.0], &other.nodes[b.0]) {
            (
                XmlNode::Element {
                    name: name_a,
                    namespace: ns_a,
                    attributes: attrs_a,
                    children: kids_a,
                    ..
                },
                XmlNode::Element {
                    name: name_b,
                    namespace: ns_b,
                    attributes: attrs_b,
                    children: kids_b,
                    ..
                },
            ) => {
                name_a == name_b
                    && ns_a == ns_b
                    && attrs_a.len() == attrs_b.len()
                    && kids_a.len() == kids_b.len()
                    && attrs_a
                        .iter()
                        .zip(attrs_b)
                        .all(|(x, y)| self.subtree_eq(*x, other, *y))
                    && kids_a
                        .iter()
                        .zip(kids_b)
                        .all(|(x, y)| self.subtree_eq(*x, other, *y))
            }
            (node_a, node_b) => {
                node_a.kind() == node_b.kind()
                    && node_a.name() == node_b.name()
                    && node_a.value() == node_b.value()
            }
        }
    }
}
