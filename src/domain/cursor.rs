//! Forward-only enumeration over a note's direct responses.

use std::iter::FusedIterator;

use tracing::warn;

use crate::domain::arena::{NoteId, ResponseTree};
use crate::domain::error::{DomainError, DomainResult};

/// Enumeration cursor over one sibling chain.
///
/// Holds only the id of the next response, not a borrow of the tree: the tree
/// stays mutable between steps. Responses appended behind the position already
/// reached are never revisited, responses appended ahead are picked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildCursor {
    next: Option<NoteId>,
}

impl ChildCursor {
    pub(crate) fn new(first: Option<NoteId>) -> Self {
        Self { next: first }
    }

    /// True while at least one response remains. Never fails.
    pub fn has_more(&self) -> bool {
        self.next.is_some()
    }

    /// Returns the current response and steps to its next sibling.
    ///
    /// # Errors
    /// * [`DomainError::EndOfSequence`] once the chain is exhausted
    /// * [`DomainError::NodeNotFound`] if the cursor is used with another tree
    pub fn next_element<T>(&mut self, tree: &ResponseTree<T>) -> DomainResult<NoteId> {
        let current = self.next.ok_or(DomainError::EndOfSequence)?;
        self.next = tree.next_sibling(current)?;
        Ok(current)
    }
}

/// Borrowing iterator over a note's direct responses in arrival order.
pub struct Children<'a, T> {
    tree: &'a ResponseTree<T>,
    cursor: ChildCursor,
}

impl<'a, T> Children<'a, T> {
    pub(crate) fn new(tree: &'a ResponseTree<T>, cursor: ChildCursor) -> Self {
        Self { tree, cursor }
    }
}

impl<'a, T> Iterator for Children<'a, T> {
    type Item = NoteId;

    fn next(&mut self) -> Option<Self::Item> {
        match self.cursor.next_element(self.tree) {
            Ok(id) => Some(id),
            Err(DomainError::EndOfSequence) => None,
            Err(err) => {
                warn!(%err, "sibling chain broken, ending enumeration");
                None
            }
        }
    }
}

impl<'a, T> FusedIterator for Children<'a, T> {}
