//! # Namespace Registry
//!
//! Bidirectional mapping between namespace URIs and short prefixes.
//!
//! The registry is seeded once at editor construction and passed explicitly
//! to whatever needs qualified-name resolution; it is never ambient state.
//! Namespaces are additive for the session: mappings are inserted or
//! replaced, never removed.

use crate::errors::EditorError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use xmledit_document::{NodeId, XmlDocument};

/// URI ↔ prefix registry.
///
/// Invariant: the two maps always agree — for every registered (uri, prefix)
/// pair, `uri_to_prefix[uri] == prefix` and `prefix_to_uri[prefix] == uri`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamespaceRegistry {
    uri_to_prefix: HashMap<String, String>,
    prefix_to_uri: HashMap<String, String>,
}

impl NamespaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a (uri, prefix) pair in both directions.
    ///
    /// Overwriting an existing association is allowed; any stale pairing is
    /// evicted so the two maps stay consistent.
    pub fn add_namespace(&mut self, uri: &str, prefix: &str) {
        if let Some(old_prefix) = self.uri_to_prefix.insert(uri.to_string(), prefix.to_string()) {
            if old_prefix != prefix {
                self.prefix_to_uri.remove(&old_prefix);
            }
        }
        if let Some(old_uri) = self.prefix_to_uri.insert(prefix.to_string(), uri.to_string()) {
            if old_uri != uri {
                self.uri_to_prefix.remove(&old_uri);
            }
        }
    }

    /// Resolve a URI to its prefix, with the `":"` separator appended so
    /// callers can build a qualified name by plain concatenation.
    ///
    /// Returns `None` for unregistered URIs; absence is an expected outcome,
    /// not an error.
    pub fn resolve_prefix(&self, uri: &str) -> Option<String> {
        self.uri_to_prefix.get(uri).map(|prefix| format!("{prefix}:"))
    }

    pub fn contains_uri(&self, uri: &str) -> bool {
        self.uri_to_prefix.contains_key(uri)
    }

    pub fn contains_prefix(&self, prefix: &str) -> bool {
        self.prefix_to_uri.contains_key(prefix)
    }

    /// Read-only export of the prefix → URI mapping for the rendering layer.
    pub fn prefix_map(&self) -> &HashMap<String, String> {
        &self.prefix_to_uri
    }
}

/// Display name of a named node, prefixed with its resolved namespace prefix
/// when the node's namespace is registered.
pub fn qualified_name(
    registry: &NamespaceRegistry,
    doc: &XmlDocument,
    id: NodeId,
) -> Result<String, EditorError> {
    let node = doc.node(id)?;
    let local = node
        .name()
        .ok_or_else(|| crate::errors::EditError::InvalidState("node has no name".to_string()))?;

    match node.namespace().and_then(|uri| registry.resolve_prefix(uri)) {
        Some(prefix) => Ok(format!("{prefix}{local}")),
        None => Ok(local.to_string()),
    }
}
