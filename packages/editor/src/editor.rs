//! # Edit Session
//!
//! Owns the live document and coordinates the node model, namespace
//! registry, and undo history for one editing session.
//!
//! Exactly one session mutates the tree at a time; everything here is
//! synchronous. Cross-node invariants the individual nodes cannot see alone
//! (attribute name uniqueness) are enforced at this level.

use crate::errors::EditorError;
use crate::history::UndoHistory;
use crate::namespace::{self, NamespaceRegistry};
use crate::node::{EditorNode, NodeModel};
use serde::{Deserialize, Serialize};
use xmledit_document::{NodeId, NodeKind, XmlDocument};

/// Session configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorOptions {
    /// Maximum number of undo snapshots; zero disables the history.
    pub undo_history_size: usize,

    /// Seed (uri, prefix) pairs for the namespace registry.
    pub namespaces: Vec<(String, String)>,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            undo_history_size: 100,
            namespaces: Vec::new(),
        }
    }
}

/// Render-refresh hook; single slot, replaced by re-registration.
pub type RenderRefresh = Box<dyn FnMut(&XmlDocument)>;

/// One editing session over one live document.
pub struct Editor {
    options: EditorOptions,
    document: XmlDocument,
    registry: NamespaceRegistry,
    history: UndoHistory,
    render_refresh: Option<RenderRefresh>,
}

impl Editor {
    /// Create a session around an already-built document.
    ///
    /// The registry is seeded from the options and the supplied document is
    /// captured as the initial snapshot, so the very first committed edit
    /// can be undone.
    pub fn new(document: XmlDocument, options: EditorOptions) -> Self {
        let mut registry = NamespaceRegistry::new();
        for (uri, prefix) in &options.namespaces {
            registry.add_namespace(uri, prefix);
        }

        let mut history = UndoHistory::new(options.undo_history_size);
        history.capture(&document);

        Self {
            options,
            document,
            registry,
            history,
            render_refresh: None,
        }
    }

    /// Live document accessor.
    pub fn document(&self) -> &XmlDocument {
        &self.document
    }

    /// Mutable live document accessor.
    pub fn document_mut(&mut self) -> &mut XmlDocument {
        &mut self.document
    }

    /// Replace the live document outright.
    pub fn set_document(&mut self, document: XmlDocument) {
        self.document = document;
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn registry(&self) -> &NamespaceRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut NamespaceRegistry {
        &mut self.registry
    }

    pub fn history(&self) -> &UndoHistory {
        &self.history
    }

    /// History access for registering the state event hooks.
    pub fn history_mut(&mut self) -> &mut UndoHistory {
        &mut self.history
    }

    /// Register the render-refresh hook, replacing any previous one.
    pub fn set_render_refresh(&mut self, hook: impl FnMut(&XmlDocument) + 'static) {
        self.render_refresh = Some(Box::new(hook));
    }

    /// Snapshot the live document after a committed edit.
    pub fn commit(&mut self) {
        self.history.capture(&self.document);
    }

    /// Move through history by `step`; on success the live document is
    /// replaced with the restored snapshot and the render-refresh hook runs
    /// exactly once so the presentation layer can rebuild its node model.
    pub fn navigate(&mut self, step: isize) -> bool {
        match self.history.change_head(step) {
            Some(restored) => {
                self.document = restored;
                if let Some(hook) = self.render_refresh.as_mut() {
                    hook(&self.document);
                }
                true
            }
            None => false,
        }
    }

    pub fn undo(&mut self) -> bool {
        self.navigate(-1)
    }

    pub fn redo(&mut self) -> bool {
        self.navigate(1)
    }

    /// Create an attribute on `element`, enforcing name uniqueness.
    ///
    /// On `DuplicateName` the element's attribute set is left untouched.
    pub fn add_attribute(
        &mut self,
        element: NodeId,
        name: &str,
        value: &str,
    ) -> Result<EditorNode, EditorError> {
        let mut node = EditorNode::stub(NodeKind::Attribute, element).with_value(value);
        node.commit_name(&mut self.document, name)?;
        self.commit();
        Ok(node)
    }

    /// Create an attribute named through the namespace registry.
    ///
    /// An unregistered URI falls back to the bare local name.
    pub fn add_attribute_ns(
        &mut self,
        element: NodeId,
        uri: &str,
        local: &str,
        value: &str,
    ) -> Result<EditorNode, EditorError> {
        let name = match self.registry.resolve_prefix(uri) {
            Some(prefix) => format!("{prefix}{local}"),
            None => local.to_string(),
        };
        self.add_attribute(element, &name, value)
    }

    /// Create and commit a child element.
    pub fn create_element(
        &mut self,
        parent: NodeId,
        name: &str,
    ) -> Result<EditorNode, EditorError> {
        let mut node = EditorNode::stub(NodeKind::Element, parent);
        node.commit_name(&mut self.document, name)?;
        self.commit();
        Ok(node)
    }

    /// Create and commit a text node.
    pub fn create_text_node(
        &mut self,
        parent: NodeId,
        value: &str,
    ) -> Result<EditorNode, EditorError> {
        self.create_text_like(NodeKind::Text, parent, value)
    }

    /// Create and commit a CDATA section.
    pub fn create_cdata(
        &mut self,
        parent: NodeId,
        value: &str,
    ) -> Result<EditorNode, EditorError> {
        self.create_text_like(NodeKind::Cdata, parent, value)
    }

    /// Create and commit a comment.
    pub fn create_comment(
        &mut self,
        parent: NodeId,
        value: &str,
    ) -> Result<EditorNode, EditorError> {
        self.create_text_like(NodeKind::Comment, parent, value)
    }

    fn create_text_like(
        &mut self,
        kind: NodeKind,
        parent: NodeId,
        value: &str,
    ) -> Result<EditorNode, EditorError> {
        let mut node = EditorNode::stub(kind, parent).with_value(value);
        node.create_in_document(&mut self.document)?;
        self.commit();
        Ok(node)
    }

    /// Rebuild the committed node model from the live document.
    pub fn node_model(&self) -> NodeModel {
        NodeModel::rebuild(&self.document)
    }

    /// Qualified display name of a node, resolved through the registry.
    pub fn qualified_name(&self, id: NodeId) -> Result<String, EditorError> {
        namespace::qualified_name(&self.registry, &self.document, id)
    }
}
