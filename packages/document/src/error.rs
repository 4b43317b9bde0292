//! Error types for document-tree operations

use crate::node::NodeId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("node not found: {0:?}")]
    NodeNotFound(NodeId),

    #[error("node is not an element")]
    NotAnElement,

    #[error("node carries no textual value")]
    NotTextual,

    #[error("cannot detach the document root")]
    CannotDetachRoot,

    #[error("node is not attached to a parent")]
    NotAttached,

    #[error("nodes do not share a parent")]
    DifferentParents,
}
