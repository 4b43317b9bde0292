//! # Xmledit Document
//!
//! The mutable XML document tree underlying the editor.
//!
//! A document is an arena of typed nodes. Elements own ordered child and
//! attribute lists; every other node records its owning element. The tree is
//! built programmatically (the editor assumes an already-parsed document) and
//! mutated in place by the editing layer.
//!
//! ## Core Principles
//!
//! 1. **The document is the source of truth**: sibling ordering lives in the
//!    element's child list, nowhere else
//! 2. **Handles, not pointers**: nodes are addressed by `NodeId` indices into
//!    the arena, so back-references never fight the borrow checker
//! 3. **Snapshots never alias**: `deep_clone` produces a fully independent
//!    document; detached nodes are compacted away in the copy

mod document;
mod error;
mod node;

pub use document::XmlDocument;
pub use error::DocumentError;
pub use node::{InsertPosition, NodeId, NodeKind, XmlNode};
