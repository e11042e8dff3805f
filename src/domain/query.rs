//! Read-only query surface consumed by tree-view adapters.
//!
//! Widget toolkits address rows with signed indices and report a missing
//! child as `-1`; the trait speaks that dialect so a binding layer can forward
//! calls without translating. The binding depends on this trait only.

use tracing::instrument;

use crate::domain::arena::{NoteId, ResponseTree};
use crate::domain::error::{DomainError, DomainResult};

/// Sentinel returned by [`TreeQueryable::child_node_index`] for non-children.
pub const NOT_FOUND: isize = -1;

pub trait TreeQueryable {
    type Node: Copy + Eq;

    fn parent_node(&self, node: Self::Node) -> DomainResult<Option<Self::Node>>;

    /// Fails with [`DomainError::IndexOutOfRange`] for negative indices and
    /// indices at or past the child count.
    fn child_node_at(&self, node: Self::Node, index: isize) -> DomainResult<Self::Node>;

    fn child_node_count(&self, node: Self::Node) -> DomainResult<usize>;

    /// Position of `target` among the direct children, or [`NOT_FOUND`].
    fn child_node_index(&self, node: Self::Node, target: Self::Node) -> DomainResult<isize>;

    fn is_leaf_node(&self, node: Self::Node) -> DomainResult<bool>;

    fn allows_children(&self, node: Self::Node) -> DomainResult<bool>;

    fn child_nodes<'a>(
        &'a self,
        node: Self::Node,
    ) -> DomainResult<Box<dyn Iterator<Item = Self::Node> + 'a>>;
}

impl<T> TreeQueryable for ResponseTree<T> {
    type Node = NoteId;

    fn parent_node(&self, node: NoteId) -> DomainResult<Option<NoteId>> {
        self.parent(node)
    }

    fn child_node_at(&self, node: NoteId, index: isize) -> DomainResult<NoteId> {
        let position = usize::try_from(index).map_err(|_| DomainError::IndexOutOfRange {
            index: index as i128,
        })?;
        self.child_at(node, position)
    }

    fn child_node_count(&self, node: NoteId) -> DomainResult<usize> {
        self.child_count(node)
    }

    fn child_node_index(&self, node: NoteId, target: NoteId) -> DomainResult<isize> {
        Ok(self
            .index_of(node, target)?
            .and_then(|position| isize::try_from(position).ok())
            .unwrap_or(NOT_FOUND))
    }

    fn is_leaf_node(&self, node: NoteId) -> DomainResult<bool> {
        self.is_leaf(node)
    }

    // Every note may receive responses.
    fn allows_children(&self, node: NoteId) -> DomainResult<bool> {
        self.node(node).map(|_| true)
    }

    fn child_nodes<'a>(&'a self, node: NoteId) -> DomainResult<Box<dyn Iterator<Item = NoteId> + 'a>> {
        Ok(Box::new(self.children(node)?))
    }
}

/// Fully expanded rows of a tree view: every node below and including `node`
/// with its depth, in display order.
///
/// Uses nothing but the [`TreeQueryable`] surface, the way a widget model
/// populates itself.
#[instrument(level = "debug", skip(view))]
pub fn expanded_rows<Q>(view: &Q, node: Q::Node) -> DomainResult<Vec<(usize, Q::Node)>>
where
    Q: TreeQueryable,
    Q::Node: std::fmt::Debug,
{
    let mut rows = Vec::new();
    let mut stack = vec![(0, node)];
    while let Some((depth, current)) = stack.pop() {
        rows.push((depth, current));
        let children: Vec<_> = view.child_nodes(current)?.collect();
        // Push children in reverse order for top-to-bottom rows
        for child in children.into_iter().rev() {
            stack.push((depth + 1, child));
        }
    }
    Ok(rows)
}
