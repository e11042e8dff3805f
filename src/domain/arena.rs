use std::sync::atomic::{AtomicU64, Ordering};

use generational_arena::{Arena, Index};
use tracing::{debug, instrument, warn};

use crate::domain::cursor::{ChildCursor, Children};
use crate::domain::error::{DomainError, DomainResult};

static NEXT_TREE_TAG: AtomicU64 = AtomicU64::new(0);

/// Handle of a note inside a [`ResponseTree`].
///
/// Ids compare by identity: two notes with equal payloads are still distinct.
/// Every id carries the tag of the tree that issued it, so an id never
/// resolves in another tree even when the arena slots coincide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoteId {
    tree: u64,
    index: Index,
}

/// Tree node in left-child/right-sibling form.
///
/// A node knows only its first response; the remaining responses hang off
/// that one through `next_sibling`, in arrival order.
#[derive(Debug)]
pub struct NoteNode<T> {
    /// Note payload for this node
    pub note: T,
    /// Index of the note this one responds to, None for the root and detached notes
    parent: Option<NoteId>,
    /// Index of the earliest response, None for leaves
    first_child: Option<NoteId>,
    /// Index of the next response to the same parent, None for the last one
    next_sibling: Option<NoteId>,
}

impl<T> NoteNode<T> {
    fn detached(note: T) -> Self {
        Self {
            note,
            parent: None,
            first_child: None,
            next_sibling: None,
        }
    }

    pub fn parent(&self) -> Option<NoteId> {
        self.parent
    }

    pub fn first_child(&self) -> Option<NoteId> {
        self.first_child
    }

    pub fn next_sibling(&self) -> Option<NoteId> {
        self.next_sibling
    }

    pub fn is_leaf(&self) -> bool {
        self.first_child.is_none()
    }
}

/// Arena-backed response tree for one discussion thread.
///
/// The arena owns every note. Parent, child and sibling links are plain
/// indices, so no link keeps a note alive and nothing is ever freed before
/// the tree itself is dropped.
#[derive(Debug)]
pub struct ResponseTree<T> {
    /// Arena storage for all notes, attached or not
    arena: Arena<NoteNode<T>>,
    /// Index of the original discussion note
    root: NoteId,
    /// Process-unique tag stamped into every id this tree hands out
    tag: u64,
}

impl<T> ResponseTree<T> {
    /// Starts a thread with `note` as the original discussion note.
    pub fn new(note: T) -> Self {
        let tag = NEXT_TREE_TAG.fetch_add(1, Ordering::Relaxed);
        let mut arena = Arena::new();
        let root = NoteId {
            tree: tag,
            index: arena.insert(NoteNode::detached(note)),
        };
        Self { arena, root, tag }
    }

    pub fn root(&self) -> NoteId {
        self.root
    }

    /// Number of notes in the arena, including detached ones.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Looks up a note issued by this tree.
    ///
    /// Ids from any other tree fail with [`DomainError::NodeNotFound`].
    #[instrument(level = "trace", skip(self))]
    pub fn node(&self, id: NoteId) -> DomainResult<&NoteNode<T>> {
        if id.tree != self.tag {
            return Err(DomainError::NodeNotFound(id));
        }
        self.arena.get(id.index).ok_or(DomainError::NodeNotFound(id))
    }

    fn node_mut(&mut self, id: NoteId) -> DomainResult<&mut NoteNode<T>> {
        if id.tree != self.tag {
            return Err(DomainError::NodeNotFound(id));
        }
        self.arena.get_mut(id.index).ok_or(DomainError::NodeNotFound(id))
    }

    pub fn note(&self, id: NoteId) -> DomainResult<&T> {
        self.node(id).map(|node| &node.note)
    }

    pub fn note_mut(&mut self, id: NoteId) -> DomainResult<&mut T> {
        self.node_mut(id).map(|node| &mut node.note)
    }

    /// Creates a detached note. It joins the thread once passed to
    /// [`ResponseTree::add_response`].
    #[instrument(level = "trace", skip(self, note))]
    pub fn create_note(&mut self, note: T) -> NoteId {
        NoteId {
            tree: self.tag,
            index: self.arena.insert(NoteNode::detached(note)),
        }
    }

    /// Appends `response` as the last response to `parent`.
    ///
    /// Walks `parent`'s response chain to its tail, so the cost is linear in
    /// the number of existing responses. The child link and the parent back
    /// link are written together; a rejected call leaves the tree untouched.
    ///
    /// # Errors
    /// * [`DomainError::NodeNotFound`] if either id is not in this tree
    /// * [`DomainError::AlreadyAttached`] if `response` already has a parent
    ///   or is the root
    /// * [`DomainError::CycleDetected`] if `response` is `parent` or one of
    ///   its ancestors
    #[instrument(level = "debug", skip(self))]
    pub fn add_response(&mut self, parent: NoteId, response: NoteId) -> DomainResult<()> {
        self.node(parent)?;
        if self.node(response)?.parent.is_some() || response == self.root {
            warn!(?response, "rejecting response that is already attached");
            return Err(DomainError::AlreadyAttached(response));
        }
        if response == parent || self.ancestors(parent)?.any(|id| id == response) {
            warn!(?response, ?parent, "rejecting response that would form a cycle");
            return Err(DomainError::CycleDetected(response));
        }

        let tail = self.children(parent)?.last();
        match tail {
            None => self.node_mut(parent)?.first_child = Some(response),
            Some(tail) => self.node_mut(tail)?.next_sibling = Some(response),
        }
        self.node_mut(response)?.parent = Some(parent);
        debug!(?parent, ?response, "response attached");
        Ok(())
    }

    /// Creates `note` and attaches it as the last response to `parent`.
    pub fn respond(&mut self, parent: NoteId, note: T) -> DomainResult<NoteId> {
        self.node(parent)?;
        let response = self.create_note(note);
        self.add_response(parent, response)?;
        Ok(response)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn parent(&self, id: NoteId) -> DomainResult<Option<NoteId>> {
        self.node(id).map(NoteNode::parent)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn first_child(&self, id: NoteId) -> DomainResult<Option<NoteId>> {
        self.node(id).map(NoteNode::first_child)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn next_sibling(&self, id: NoteId) -> DomainResult<Option<NoteId>> {
        self.node(id).map(NoteNode::next_sibling)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn is_leaf(&self, id: NoteId) -> DomainResult<bool> {
        self.node(id).map(NoteNode::is_leaf)
    }

    /// Number of direct responses, counted by walking the sibling chain.
    #[instrument(level = "trace", skip(self))]
    pub fn child_count(&self, id: NoteId) -> DomainResult<usize> {
        Ok(self.children(id)?.count())
    }

    /// The `index`-th direct response in arrival order.
    #[instrument(level = "trace", skip(self))]
    pub fn child_at(&self, id: NoteId, index: usize) -> DomainResult<NoteId> {
        self.children(id)?
            .nth(index)
            .ok_or(DomainError::IndexOutOfRange {
                index: index as i128,
            })
    }

    /// Position of `target` among the direct responses of `id`.
    ///
    /// Grandchildren, siblings and unrelated notes are simply absent.
    #[instrument(level = "trace", skip(self))]
    pub fn index_of(&self, id: NoteId, target: NoteId) -> DomainResult<Option<usize>> {
        Ok(self.children(id)?.position(|child| child == target))
    }

    /// Number of notes below `id`, excluding `id` itself.
    ///
    /// Walks the whole subtree on every call.
    #[instrument(level = "debug", skip(self))]
    pub fn response_count(&self, id: NoteId) -> DomainResult<usize> {
        Ok(self.descendants(id)?.count() - 1)
    }

    /// Lazy sequence over the direct responses of `id`.
    pub fn children(&self, id: NoteId) -> DomainResult<Children<'_, T>> {
        Ok(Children::new(self, self.cursor(id)?))
    }

    /// Detached enumeration cursor over the direct responses of `id`.
    ///
    /// Unlike [`ResponseTree::children`] the cursor does not borrow the tree,
    /// so responses may be appended between steps.
    pub fn cursor(&self, id: NoteId) -> DomainResult<ChildCursor> {
        Ok(ChildCursor::new(self.first_child(id)?))
    }

    /// Walks parent links upwards, starting with the parent of `id`.
    pub fn ancestors(&self, id: NoteId) -> DomainResult<Ancestors<'_, T>> {
        Ok(Ancestors {
            tree: self,
            next: self.parent(id)?,
        })
    }

    /// Pre-order walk of the subtree rooted at `id`, `id` first.
    pub fn descendants(&self, id: NoteId) -> DomainResult<Descendants<'_, T>> {
        self.node(id)?;
        Ok(Descendants {
            tree: self,
            start: id,
            stack: vec![id],
        })
    }
}

pub struct Ancestors<'a, T> {
    tree: &'a ResponseTree<T>,
    next: Option<NoteId>,
}

impl<'a, T> Iterator for Ancestors<'a, T> {
    type Item = NoteId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.tree.node(current).ok().and_then(NoteNode::parent);
        Some(current)
    }
}

pub struct Descendants<'a, T> {
    tree: &'a ResponseTree<T>,
    start: NoteId,
    stack: Vec<NoteId>,
}

impl<'a, T> Iterator for Descendants<'a, T> {
    type Item = NoteId;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.stack.pop() {
            if let Ok(node) = self.tree.node(current) {
                // Sibling goes under the child so the child's subtree comes out first.
                // The start node's siblings are outside the subtree.
                if current != self.start {
                    self.stack.extend(node.next_sibling);
                }
                self.stack.extend(node.first_child);
                return Some(current);
            }
        }
        None
    }
}
