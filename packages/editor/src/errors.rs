//! Error types for the editor

use thiserror::Error;
use xmledit_document::DocumentError;

/// Structural edit failures surfaced to the presentation layer.
///
/// Both variants are atomic: a failed operation leaves the node model and
/// the document exactly as they were. Out-of-range history navigation and
/// unregistered namespace lookups are modeled as absent values, not errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditError {
    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Duplicate attribute name: {0}")]
    DuplicateName(String),

    #[error("Document error: {0}")]
    Document(#[from] DocumentError),
}

/// Session-level error wrapper
#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Edit error: {0}")]
    Edit(#[from] EditError),

    #[error("Document error: {0}")]
    Document(#[from] DocumentError),
}
