//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::NoteId;

/// Domain errors represent misuse of the response tree.
/// Absent lookups (`index_of`) are not errors and never show up here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Wide enough to name any `usize` or `isize` index as passed.
    #[error("child index out of range: {index}")]
    IndexOutOfRange { index: i128 },

    #[error("no more elements in child enumeration")]
    EndOfSequence,

    #[error("note not found in this tree: {0:?}")]
    NodeNotFound(NoteId),

    #[error("note is already attached: {0:?}")]
    AlreadyAttached(NoteId),

    #[error("attaching {0:?} would make it its own ancestor")]
    CycleDetected(NoteId),
}

/// Result type for response tree operations.
pub type DomainResult<T> = Result<T, DomainError>;
