//! The node entity: one path in a hierarchy.

use treefs_path::Path;

use crate::arena::NodeId;

/// Discipline for a node's child sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildOrder {
    /// Children kept in strictly increasing lexicographic order by full
    /// path; lookups use binary search.
    Sorted,

    /// Children kept in positional slots, up to `max`. Removing an earlier
    /// slot shifts later slots down, so slot two is promoted when slot one
    /// is removed.
    Positional { max: usize },
}

/// One entry in a hierarchy.
///
/// The path is immutable after creation. The parent id is a navigational
/// back-link only; ownership of a subtree flows strictly downward through
/// the child list.
#[derive(Debug, Clone)]
pub struct Node<D> {
    pub(crate) path: Path,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) data: D,
}

impl<D> Node<D> {
    pub(crate) fn new(path: Path, parent: Option<NodeId>, data: D) -> Self {
        Self {
            path,
            parent,
            children: Vec::new(),
            data,
        }
    }

    /// The full path of this node.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The parent back-link, `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child ids in stored order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Variant payload.
    pub fn data(&self) -> &D {
        &self.data
    }

    /// Mutable variant payload.
    pub fn data_mut(&mut self) -> &mut D {
        &mut self.data
    }
}
