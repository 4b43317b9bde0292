//! # Editor Node Model
//!
//! Typed, polymorphic view of the document tree that the presentation layer
//! edits through.
//!
//! ## Design
//!
//! - One `EditorNode` struct dispatching on `NodeKind` replaces an
//!   inheritance hierarchy; text, CDATA, and comment nodes share one set of
//!   match arms and specialize only their created document node, type label,
//!   and default insertion point
//! - "Not yet created" is a state, not a subtype: a stub is a node whose
//!   `live` handle is absent. Committing attaches the handle; discarding the
//!   stub never touches the document
//! - Operations validate first and mutate second, so a failure leaves both
//!   the model and the document unchanged

use crate::errors::EditError;
use serde::{Deserialize, Serialize};
use xmledit_common::{walk_element, Visitor};
use xmledit_document::{InsertPosition, NodeId, NodeKind, XmlDocument};

/// Selection state of a node in the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DisplayState {
    #[default]
    Unselected,
    Selected,
}

/// One editable node.
///
/// Invariant: `live` is present iff the node has been committed to the
/// document; stubs have no `live` handle. After `remove()` every operation
/// except disposal fails with `EditError::InvalidState`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorNode {
    kind: NodeKind,
    parent: Option<NodeId>,
    live: Option<NodeId>,
    display: DisplayState,
    pending_name: Option<String>,
    pending_value: String,
    position: InsertPosition,
    removed: bool,
}

impl EditorNode {
    /// Stub for a node not yet committed to the document.
    ///
    /// Comments prepend by default; everything else appends.
    pub fn stub(kind: NodeKind, parent: NodeId) -> Self {
        let position = match kind {
            NodeKind::Comment => InsertPosition::Prepend,
            _ => InsertPosition::Append,
        };

        Self {
            kind,
            parent: Some(parent),
            live: None,
            display: DisplayState::Unselected,
            pending_name: None,
            pending_value: String::new(),
            position,
            removed: false,
        }
    }

    /// View over a node that already exists in the document.
    pub fn committed(doc: &XmlDocument, id: NodeId) -> Result<Self, EditError> {
        let node = doc.node(id)?;

        Ok(Self {
            kind: node.kind(),
            parent: node.parent(),
            live: Some(id),
            display: DisplayState::Unselected,
            pending_name: node.name().map(str::to_string),
            pending_value: node.value().unwrap_or_default().to_string(),
            position: InsertPosition::Append,
            removed: false,
        })
    }

    /// Override the insertion point for a stub.
    pub fn with_position(mut self, position: InsertPosition) -> Self {
        self.position = position;
        self
    }

    /// Seed the pending value of a stub.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.pending_value = value.into();
        self
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Owning element in the document.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Handle into the document tree; absent for stubs.
    pub fn live(&self) -> Option<NodeId> {
        self.live
    }

    pub fn is_stub(&self) -> bool {
        self.live.is_none()
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }

    /// Type-label header shown alongside the value for marked text-like
    /// nodes.
    pub fn label(&self) -> Option<&'static str> {
        match self.kind {
            NodeKind::Cdata => Some("#cdata"),
            NodeKind::Comment => Some("#comment"),
            _ => None,
        }
    }

    fn ensure_active(&self) -> Result<(), EditError> {
        if self.removed {
            Err(EditError::InvalidState(
                "node has been removed".to_string(),
            ))
        } else {
            Ok(())
        }
    }

    pub fn select(&mut self) -> Result<(), EditError> {
        self.ensure_active()?;
        self.display = DisplayState::Selected;
        Ok(())
    }

    pub fn deselect(&mut self) -> Result<(), EditError> {
        self.ensure_active()?;
        self.display = DisplayState::Unselected;
        Ok(())
    }

    pub fn is_selected(&self) -> bool {
        self.display == DisplayState::Selected
    }

    /// Detach the live node from the document and mark this node for
    /// disposal. A stub is disposed without touching the document.
    pub fn remove(&mut self, doc: &mut XmlDocument) -> Result<(), EditError> {
        self.ensure_active()?;

        if let Some(id) = self.live.take() {
            doc.detach(id)?;
            tracing::debug!(node = id.index(), kind = ?self.kind, "node removed");
        }

        self.display = DisplayState::Unselected;
        self.removed = true;
        Ok(())
    }

    /// Materialize a stub into a real document node.
    ///
    /// Text-like nodes that are already live return their current textual
    /// value instead of re-creating (`Ok(Some(value))`); a fresh creation
    /// returns `Ok(None)`. Attribute stubs enforce name uniqueness against
    /// the parent's existing attributes and fail with `DuplicateName`
    /// without mutating anything.
    pub fn create_in_document(
        &mut self,
        doc: &mut XmlDocument,
    ) -> Result<Option<String>, EditError> {
        self.ensure_active()?;

        if let Some(id) = self.live {
            if self.kind.is_text_like() {
                return Ok(doc.node(id)?.value().map(str::to_string));
            }
            return Err(EditError::InvalidState(
                "node already exists in the document".to_string(),
            ));
        }

        let parent = self.parent.ok_or_else(|| {
            EditError::InvalidState("stub has no parent element".to_string())
        })?;

        let id = match self.kind {
            NodeKind::Element => {
                let name = self.pending_name.clone().ok_or_else(|| {
                    EditError::InvalidState("element stub has no name".to_string())
                })?;
                doc.create_element(parent, name, self.position)?
            }
            NodeKind::Attribute => {
                let name = self.pending_name.clone().ok_or_else(|| {
                    EditError::InvalidState("attribute stub has no name".to_string())
                })?;
                if doc.attribute(parent, &name)?.is_some() {
                    return Err(EditError::DuplicateName(name));
                }
                doc.create_attribute(parent, name, self.pending_value.clone())?
            }
            NodeKind::Text => doc.create_text(parent, self.pending_value.clone(), self.position)?,
            NodeKind::Cdata => {
                doc.create_cdata(parent, self.pending_value.clone(), self.position)?
            }
            NodeKind::Comment => {
                doc.create_comment(parent, self.pending_value.clone(), self.position)?
            }
        };

        self.live = Some(id);
        tracing::debug!(node = id.index(), kind = ?self.kind, "node created");
        Ok(None)
    }

    /// Commit a stub under a candidate name read from pending user input.
    ///
    /// This is the attribute-stub `create` path: the name is trimmed and
    /// validated, then creation is delegated to [`create_in_document`]. On
    /// failure the node stays a stub and the document is untouched.
    ///
    /// [`create_in_document`]: EditorNode::create_in_document
    pub fn commit_name(
        &mut self,
        doc: &mut XmlDocument,
        name: &str,
    ) -> Result<NodeId, EditError> {
        self.ensure_active()?;

        if self.live.is_some() {
            return Err(EditError::InvalidState(
                "node already exists in the document".to_string(),
            ));
        }

        let name = name.trim();
        if name.is_empty() {
            return Err(EditError::InvalidState("name must not be empty".to_string()));
        }

        self.pending_name = Some(name.to_string());
        self.create_in_document(doc)?;

        self.live.ok_or_else(|| {
            EditError::InvalidState("creation did not attach a live node".to_string())
        })
    }

    /// Buffer an edited textual value from the presentation layer.
    pub fn set_value(&mut self, value: impl Into<String>) -> Result<(), EditError> {
        self.ensure_active()?;
        self.pending_value = value.into();
        Ok(())
    }

    /// Push the buffered value into the live node.
    ///
    /// Defined for text-like and attribute nodes; a successful no-op for
    /// elements, which carry their text as child nodes.
    pub fn sync_value(&mut self, doc: &mut XmlDocument) -> Result<(), EditError> {
        self.ensure_active()?;

        if self.kind == NodeKind::Element {
            return Ok(());
        }

        let id = self.live.ok_or_else(|| {
            EditError::InvalidState("cannot sync a node that was never created".to_string())
        })?;
        doc.set_value(id, self.pending_value.clone())?;
        Ok(())
    }

    /// Current textual value: the live node's if committed, the pending
    /// buffer otherwise.
    pub fn value<'a>(&'a self, doc: &'a XmlDocument) -> Option<&'a str> {
        match self.live {
            Some(id) => doc.get(id).and_then(|node| node.value()),
            None => Some(&self.pending_value),
        }
    }

    /// Swap with the previous sibling. `Ok(false)` at the boundary.
    pub fn move_up(&mut self, doc: &mut XmlDocument) -> Result<bool, EditError> {
        self.shift(doc, -1)
    }

    /// Swap with the next sibling. `Ok(false)` at the boundary.
    pub fn move_down(&mut self, doc: &mut XmlDocument) -> Result<bool, EditError> {
        self.shift(doc, 1)
    }

    fn shift(&mut self, doc: &mut XmlDocument, direction: isize) -> Result<bool, EditError> {
        self.ensure_active()?;

        let id = self.live.ok_or_else(|| {
            EditError::InvalidState("stub has no position in the document".to_string())
        })?;

        match doc.sibling_at(id, direction)? {
            Some(other) => {
                doc.swap_siblings(id, other)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Swap positions with another committed sibling.
    pub fn swap(&mut self, doc: &mut XmlDocument, other: &EditorNode) -> Result<(), EditError> {
        self.ensure_active()?;
        other.ensure_active()?;

        let a = self.live.ok_or_else(|| {
            EditError::InvalidState("stub has no position in the document".to_string())
        })?;
        let b = other.live.ok_or_else(|| {
            EditError::InvalidState("stub has no position in the document".to_string())
        })?;

        doc.swap_siblings(a, b)?;
        Ok(())
    }
}

/// Flat, document-ordered view of every committed node.
///
/// The presentation layer re-derives this after each undo/redo restore; the
/// ordering always mirrors the document's child ordering because it is read
/// straight out of the document.
#[derive(Debug, Clone, Default)]
pub struct NodeModel {
    pub nodes: Vec<EditorNode>,
}

impl NodeModel {
    /// Rebuild the model from the live document.
    pub fn rebuild(doc: &XmlDocument) -> Self {
        struct Collect<'a> {
            doc: &'a XmlDocument,
            nodes: Vec<EditorNode>,
        }

        impl Collect<'_> {
            fn push(&mut self, id: NodeId) {
                if let Ok(node) = EditorNode::committed(self.doc, id) {
                    self.nodes.push(node);
                }
            }
        }

        impl Visitor for Collect<'_> {
            fn visit_element(&mut self, doc: &XmlDocument, id: NodeId) {
                self.push(id);
                walk_element(self, doc, id);
            }

            fn visit_attribute(&mut self, _doc: &XmlDocument, id: NodeId) {
                self.push(id);
            }

            fn visit_text(&mut self, _doc: &XmlDocument, id: NodeId) {
                self.push(id);
            }

            fn visit_cdata(&mut self, _doc: &XmlDocument, id: NodeId) {
                self.push(id);
            }

            fn visit_comment(&mut self, _doc: &XmlDocument, id: NodeId) {
                self.push(id);
            }
        }

        let mut collect = Collect {
            doc,
            nodes: Vec::new(),
        };
        xmledit_common::walk_document(&mut collect, doc);

        NodeModel {
            nodes: collect.nodes,
        }
    }

    /// Live handles in model order, for comparing against document order.
    pub fn live_ids(&self) -> Vec<NodeId> {
        self.nodes.iter().filter_map(EditorNode::live).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_children() -> (XmlDocument, Vec<NodeId>) {
        let mut doc = XmlDocument::new("root", None);
        let root = doc.root();
        let ids = vec![
            doc.create_text(root, "one", InsertPosition::Append).unwrap(),
            doc.create_text(root, "two", InsertPosition::Append).unwrap(),
            doc.create_text(root, "three", InsertPosition::Append).unwrap(),
        ];
        (doc, ids)
    }

    #[test]
    fn test_selection_is_local() {
        let doc = XmlDocument::new("root", None);
        let mut node = EditorNode::committed(&doc, doc.root()).unwrap();

        assert!(!node.is_selected());
        node.select().unwrap();
        assert!(node.is_selected());
        node.deselect().unwrap();
        assert!(!node.is_selected());
    }

    #[test]
    fn test_stub_commit_attaches_live_node() {
        let mut doc = XmlDocument::new("root", None);
        let root = doc.root();

        let mut stub = EditorNode::stub(NodeKind::Attribute, root).with_value("42");
        assert!(stub.is_stub());

        let id = stub.commit_name(&mut doc, "  count  ").unwrap();
        assert_eq!(stub.live(), Some(id));
        assert_eq!(doc.attribute_value(root, "count").unwrap(), Some("42"));
    }

    #[test]
    fn test_empty_name_is_invalid_state() {
        let mut doc = XmlDocument::new("root", None);
        let mut stub = EditorNode::stub(NodeKind::Attribute, doc.root());

        let err = stub.commit_name(&mut doc, "   ").unwrap_err();
        assert!(matches!(err, EditError::InvalidState(_)));
        assert!(stub.is_stub());
    }

    #[test]
    fn test_duplicate_attribute_is_atomic() {
        let mut doc = XmlDocument::new("root", None);
        let root = doc.root();
        doc.create_attribute(root, "id", "first").unwrap();

        let mut stub = EditorNode::stub(NodeKind::Attribute, root).with_value("second");
        let err = stub.commit_name(&mut doc, "id").unwrap_err();

        assert_eq!(err, EditError::DuplicateName("id".to_string()));
        // The stub survives and the attribute set is untouched.
        assert!(stub.is_stub());
        assert_eq!(doc.attributes(root).unwrap().len(), 1);
        assert_eq!(doc.attribute_value(root, "id").unwrap(), Some("first"));
    }

    #[test]
    fn test_text_create_is_idempotent_read() {
        let mut doc = XmlDocument::new("root", None);
        let mut node = EditorNode::stub(NodeKind::Text, doc.root()).with_value("hello");

        assert_eq!(node.create_in_document(&mut doc).unwrap(), None);
        // A second call reads the current value instead of re-creating.
        assert_eq!(
            node.create_in_document(&mut doc).unwrap(),
            Some("hello".to_string())
        );
        assert_eq!(doc.children(doc.root()).unwrap().len(), 1);
    }

    #[test]
    fn test_comment_prepends_by_default() {
        let (mut doc, ids) = doc_with_children();
        let root = doc.root();

        let mut comment = EditorNode::stub(NodeKind::Comment, root).with_value("header");
        comment.create_in_document(&mut doc).unwrap();

        let children = doc.children(root).unwrap();
        assert_eq!(children[0], comment.live().unwrap());
        assert_eq!(&children[1..], &ids[..]);
        assert_eq!(comment.label(), Some("#comment"));
    }

    #[test]
    fn test_sync_value_pushes_into_live_node() {
        let (mut doc, ids) = doc_with_children();
        let mut node = EditorNode::committed(&doc, ids[0]).unwrap();

        node.set_value("edited").unwrap();
        node.sync_value(&mut doc).unwrap();
        assert_eq!(doc.node(ids[0]).unwrap().value(), Some("edited"));

        // Elements accept sync_value as a no-op.
        let mut root = EditorNode::committed(&doc, doc.root()).unwrap();
        root.set_value("ignored").unwrap();
        root.sync_value(&mut doc).unwrap();
    }

    #[test]
    fn test_sync_value_on_stub_is_invalid() {
        let mut doc = XmlDocument::new("root", None);
        let mut stub = EditorNode::stub(NodeKind::Text, doc.root());
        stub.set_value("pending").unwrap();

        assert!(matches!(
            stub.sync_value(&mut doc),
            Err(EditError::InvalidState(_))
        ));
    }

    #[test]
    fn test_removed_node_rejects_operations() {
        let (mut doc, ids) = doc_with_children();
        let mut node = EditorNode::committed(&doc, ids[1]).unwrap();

        node.remove(&mut doc).unwrap();
        assert!(node.is_removed());
        assert_eq!(doc.children(doc.root()).unwrap().len(), 2);

        assert!(matches!(node.select(), Err(EditError::InvalidState(_))));
        assert!(matches!(
            node.remove(&mut doc),
            Err(EditError::InvalidState(_))
        ));
        assert!(matches!(
            node.sync_value(&mut doc),
            Err(EditError::InvalidState(_))
        ));
        assert!(matches!(
            node.move_up(&mut doc),
            Err(EditError::InvalidState(_))
        ));
    }

    #[test]
    fn test_remove_stub_never_touches_document() {
        let mut doc = XmlDocument::new("root", None);
        let mut stub = EditorNode::stub(NodeKind::Cdata, doc.root());

        stub.remove(&mut doc).unwrap();
        assert!(doc.children(doc.root()).unwrap().is_empty());
    }

    #[test]
    fn test_moves_keep_model_and_document_aligned() {
        let (mut doc, ids) = doc_with_children();
        let root = doc.root();

        let mut first = EditorNode::committed(&doc, ids[0]).unwrap();
        assert!(first.move_down(&mut doc).unwrap());
        assert_eq!(doc.children(root).unwrap(), &[ids[1], ids[0], ids[2]]);

        let mut last = EditorNode::committed(&doc, ids[2]).unwrap();
        assert!(last.move_up(&mut doc).unwrap());
        assert_eq!(doc.children(root).unwrap(), &[ids[1], ids[2], ids[0]]);

        // Boundary moves are silent no-ops.
        let mut top = EditorNode::committed(&doc, ids[1]).unwrap();
        assert!(!top.move_up(&mut doc).unwrap());
        assert_eq!(doc.children(root).unwrap(), &[ids[1], ids[2], ids[0]]);

        // The rebuilt model mirrors the document's ordering.
        let model = NodeModel::rebuild(&doc);
        assert_eq!(model.live_ids(), vec![root, ids[1], ids[2], ids[0]]);
    }

    #[test]
    fn test_swap_requires_shared_parent() {
        let (mut doc, ids) = doc_with_children();
        let nested = doc
            .create_element(doc.root(), "nested", InsertPosition::Append)
            .unwrap();
        let inner = doc.create_text(nested, "x", InsertPosition::Append).unwrap();

        let mut a = EditorNode::committed(&doc, ids[0]).unwrap();
        let b = EditorNode::committed(&doc, inner).unwrap();
        assert!(a.swap(&mut doc, &b).is_err());

        let c = EditorNode::committed(&doc, ids[2]).unwrap();
        a.swap(&mut doc, &c).unwrap();
        assert_eq!(doc.children(doc.root()).unwrap()[0], ids[2]);
    }

    #[test]
    fn test_rebuild_walks_attributes_and_children() {
        let mut doc = XmlDocument::new("root", None);
        let root = doc.root();
        doc.create_attribute(root, "id", "r").unwrap();
        let child = doc
            .create_element(root, "child", InsertPosition::Append)
            .unwrap();
        doc.create_cdata(child, "payload", InsertPosition::Append)
            .unwrap();

        let model = NodeModel::rebuild(&doc);
        let kinds: Vec<NodeKind> = model.nodes.iter().map(EditorNode::kind).collect();
        assert_eq!(
            kinds,
            vec![
                NodeKind::Element,
                NodeKind::Attribute,
                NodeKind::Element,
                NodeKind::Cdata
            ]
        );
        assert!(model.nodes.iter().all(|n| !n.is_stub()));
    }
}
