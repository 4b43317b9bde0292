//! # Xmledit Editor
//!
//! Core engine of the structured XML editor.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ presentation (out of scope): visual tree,   │
//! │ DOM events, autocomplete                    │
//! └─────────────────────────────────────────────┘
//!                     ↓ render-refresh hook
//! ┌─────────────────────────────────────────────┐
//! │ editor: session + node model + history      │
//! │  - Typed node model with stub states        │
//! │  - Whole-document snapshot undo/redo        │
//! │  - Namespace URI ↔ prefix resolution        │
//! │  - Cross-node invariants (name uniqueness)  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ document: mutable XML tree + deep clone     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **The document is the source of truth**: the node model is a typed
//!    view over it; sibling ordering is read from the tree, never duplicated
//! 2. **Snapshots never alias**: the history clones on capture and again on
//!    restore, so no stored snapshot can be reached from live state
//! 3. **Failures are atomic**: a rejected edit leaves model and document
//!    untouched
//! 4. **Single session**: all mutation is synchronous and single-threaded
//!
//! ## Usage
//!
//! ```rust,ignore
//! use xmledit_document::XmlDocument;
//! use xmledit_editor::{Editor, EditorOptions};
//!
//! let doc = XmlDocument::new("catalog", Some("http://example.com/catalog"));
//! let mut editor = Editor::new(doc, EditorOptions::default());
//!
//! let root = editor.document().root();
//! editor.add_attribute(root, "version", "1.0")?;
//!
//! editor.undo();   // attribute gone
//! editor.redo();   // attribute back
//! ```

mod editor;
mod errors;
mod history;
mod namespace;
mod node;

pub use editor::{Editor, EditorOptions, RenderRefresh};
pub use errors::{EditError, EditorError};
pub use history::{HistoryCallback, HistoryState, UndoHistory};
pub use namespace::{qualified_name, NamespaceRegistry};
pub use node::{DisplayState, EditorNode, NodeModel};

// Re-export document types for convenience
pub use xmledit_document::{InsertPosition, NodeId, NodeKind, XmlDocument, XmlNode};
