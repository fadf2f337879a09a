//! The hierarchy engine: traversal, linkage, chain insertion, subtree
//! removal.
//!
//! A `Hierarchy` owns a node arena, the optional root id, and a live node
//! count. It implements the whole-path algorithms shared by every tree
//! variant; the orchestrators in `treefs-tree` layer lifecycle and typed
//! semantics on top.

use treefs_path::Path;

use crate::arena::{Arena, NodeId};
use crate::error::TreeError;
use crate::node::{ChildOrder, Node};

/// Arena-backed tree of [`Node`]s with a fixed child discipline.
#[derive(Debug, Clone)]
pub struct Hierarchy<D> {
    arena: Arena<Node<D>>,
    root: Option<NodeId>,
    count: usize,
    order: ChildOrder,
}

impl<D> Hierarchy<D> {
    /// Create an empty hierarchy with the given child discipline.
    pub fn new(order: ChildOrder) -> Self {
        Self {
            arena: Arena::new(),
            root: None,
            count: 0,
            order,
        }
    }

    /// The root id, `None` when the hierarchy is empty.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// The live node count.
    pub fn count(&self) -> usize {
        self.count
    }

    /// The child discipline.
    pub fn order(&self) -> ChildOrder {
        self.order
    }

    /// The node at `id`. Panics if the id names a vacated slot, which is a
    /// contract violation.
    pub fn node(&self, id: NodeId) -> &Node<D> {
        &self.arena[id]
    }

    /// Mutable node access with the same contract as [`Hierarchy::node`].
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node<D> {
        &mut self.arena[id]
    }

    /// Non-panicking node access, used by the invariant checker.
    pub fn get(&self, id: NodeId) -> Option<&Node<D>> {
        self.arena.get(id)
    }

    /// Create an unlinked node one segment below `parent` (or a bare
    /// top-level node when `parent` is `None`).
    ///
    /// The parent back-link is set but the parent's child list is not
    /// touched; the caller decides whether and when to link.
    pub fn create_node(
        &mut self,
        parent: Option<NodeId>,
        segment: &str,
        data: D,
    ) -> Result<NodeId, TreeError> {
        let path = match parent {
            Some(p) => self.arena[p].path.join(segment),
            None => Path::parse(segment),
        };
        Ok(self.arena.try_insert(Node::new(path, parent, data))?)
    }

    /// Locate `path` among `parent`'s children.
    ///
    /// `Ok(slot)` when found; `Err(slot)` with the insertion slot the path
    /// would occupy (for the positional discipline, the next free slot).
    pub fn child_slot(&self, parent: NodeId, path: &Path) -> Result<usize, usize> {
        let children = &self.arena[parent].children;
        match self.order {
            ChildOrder::Sorted => {
                children.binary_search_by(|&c| self.arena[c].path.cmp(path))
            }
            ChildOrder::Positional { .. } => children
                .iter()
                .position(|&c| self.arena[c].path == *path)
                .ok_or(children.len()),
        }
    }

    /// The child of `parent` with exactly the given path, if present.
    pub fn find_child(&self, parent: NodeId, path: &Path) -> Option<NodeId> {
        let slot = self.child_slot(parent, path).ok()?;
        Some(self.arena[parent].children[slot])
    }

    /// Link an existing node as a child of `parent`.
    ///
    /// Validates, in order: the child's path is not already present among
    /// the parent's children; the child is exactly one segment below the
    /// parent; the positional discipline has a free slot. On failure both
    /// nodes are left unmodified and the caller still owns the child.
    pub fn link_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        let child_path = self.arena[child].path.clone();

        let slot = match self.child_slot(parent, &child_path) {
            Ok(_) => return Err(TreeError::AlreadyInTree),
            Err(slot) => slot,
        };

        let parent_node = &self.arena[parent];
        match child_path.strip_prefix(&parent_node.path) {
            Some(rest) if rest.len() == 1 => {}
            _ => return Err(TreeError::ParentChild),
        }
        if let ChildOrder::Positional { max } = self.order {
            if parent_node.children.len() >= max {
                return Err(TreeError::ParentChild);
            }
        }

        let children = &mut self.arena[parent].children;
        children.try_reserve(1).map_err(|_| TreeError::Memory)?;
        children.insert(slot, child);
        self.arena[child].parent = Some(parent);
        Ok(())
    }

    /// Remove `child` from `parent`'s child sequence without destroying it.
    ///
    /// Later positional slots shift down, so removing slot one promotes
    /// slot two. Fails with `ParentChild` if the child is not linked.
    pub fn unlink_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        let slot = self.arena[parent]
            .children
            .iter()
            .position(|&c| c == child)
            .ok_or(TreeError::ParentChild)?;
        self.arena[parent].children.remove(slot);
        Ok(())
    }

    /// Create a node one segment below `parent` and link it, destroying
    /// the new node if linking fails so no leak is observable.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        segment: &str,
        data: D,
    ) -> Result<NodeId, TreeError> {
        let child = self.create_node(Some(parent), segment, data)?;
        match self.link_child(parent, child) {
            Ok(()) => {
                self.count += 1;
                Ok(child)
            }
            Err(e) => {
                self.arena.remove(child);
                Err(e)
            }
        }
    }

    /// Prefix-match traversal: the deepest node whose path is a
    /// segment-aligned prefix of `target`.
    ///
    /// `None` when the hierarchy is empty or the root does not prefix the
    /// target. The caller compares the returned node's path against the
    /// target to distinguish exact match from partial match.
    pub fn deepest_match(&self, target: &Path) -> Option<NodeId> {
        let root = self.root?;
        if !self.arena[root].path.is_prefix_of(target) {
            return None;
        }
        let mut current = root;
        loop {
            let node = &self.arena[current];
            if node.path == *target {
                return Some(current);
            }
            let next = node.path.join(&target[node.path.len()]);
            match self.child_slot(current, &next) {
                Ok(slot) => current = node.children[slot],
                Err(_) => return Some(current),
            }
        }
    }

    /// The node whose path equals `target`, if any.
    pub fn find_exact(&self, target: &Path) -> Option<NodeId> {
        self.deepest_match(target)
            .filter(|&id| self.arena[id].path == *target)
    }

    /// Build and attach the linear chain of new nodes for `rest`, the
    /// unmatched remainder of a path below `parent`.
    ///
    /// `data_for(is_last)` supplies the payload for each new node, with
    /// `is_last` true for the final node of the chain. The chain is linked
    /// internally first and its head is attached last (to `parent`, or as
    /// the new root when `parent` is `None`). Any failure destroys the
    /// entire partial chain and leaves the hierarchy untouched. On success
    /// the count grows by the chain length and the head id is returned.
    pub fn insert_chain<F>(
        &mut self,
        parent: Option<NodeId>,
        rest: &Path,
        mut data_for: F,
    ) -> Result<NodeId, TreeError>
    where
        F: FnMut(bool) -> D,
    {
        if rest.is_empty() {
            return Err(TreeError::AlreadyInTree);
        }

        let total = rest.len();
        let mut created: Vec<NodeId> = Vec::new();
        let mut prev: Option<NodeId> = None;

        for (i, segment) in rest.iter().enumerate() {
            let data = data_for(i + 1 == total);
            let id = match self.create_node(prev.or(parent), segment, data) {
                Ok(id) => id,
                Err(e) => {
                    self.discard_chain(&created);
                    return Err(e);
                }
            };
            created.push(id);
            if let Some(p) = prev {
                if let Err(e) = self.link_child(p, id) {
                    self.discard_chain(&created);
                    return Err(e);
                }
            }
            prev = Some(id);
        }

        let head = created[0];
        match parent {
            Some(p) => {
                if let Err(e) = self.link_child(p, head) {
                    self.discard_chain(&created);
                    return Err(e);
                }
            }
            None => self.root = Some(head),
        }
        self.count += total;
        Ok(head)
    }

    fn discard_chain(&mut self, ids: &[NodeId]) {
        for &id in ids {
            self.arena.remove(id);
        }
    }

    /// Destroy the subtree rooted at `id`, unlinking it from its parent
    /// (or clearing the root) first. Returns the number of nodes
    /// destroyed; the count shrinks by the same amount.
    ///
    /// Traversal uses an explicit stack, so depth is bounded by heap
    /// rather than call-stack size.
    pub fn remove_subtree(&mut self, id: NodeId) -> usize {
        if let Some(parent) = self.arena[id].parent {
            let children = &mut self.arena[parent].children;
            if let Some(slot) = children.iter().position(|&c| c == id) {
                children.remove(slot);
            }
        } else if self.root == Some(id) {
            self.root = None;
        }

        let mut destroyed = 0;
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(node) = self.arena.remove(next) {
                stack.extend(node.children);
                destroyed += 1;
            }
        }
        self.count -= destroyed;
        destroyed
    }

    /// Preorder depth-first node listing.
    ///
    /// `reorder` chooses the visit order at each node given the stored
    /// child slice; pass the identity to keep stored order.
    pub fn preorder<F>(&self, mut reorder: F) -> Vec<NodeId>
    where
        F: FnMut(&Hierarchy<D>, &[NodeId]) -> Vec<NodeId>,
    {
        let mut out = Vec::new();
        let mut stack = match self.root {
            Some(root) => vec![root],
            None => return out,
        };
        while let Some(id) = stack.pop() {
            out.push(id);
            let visit = reorder(self, &self.arena[id].children);
            for &child in visit.iter().rev() {
                stack.push(child);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use treefs_path::path;

    fn sorted() -> Hierarchy<()> {
        Hierarchy::new(ChildOrder::Sorted)
    }

    fn binary() -> Hierarchy<()> {
        Hierarchy::new(ChildOrder::Positional { max: 2 })
    }

    #[test]
    fn create_node_computes_child_path() {
        let mut h = sorted();
        let a = h.create_node(None, "a", ()).unwrap();
        let b = h.create_node(Some(a), "b", ()).unwrap();

        assert_eq!(h.node(a).path(), &path!("a"));
        assert_eq!(h.node(b).path(), &path!("a/b"));
        assert_eq!(h.node(b).parent(), Some(a));
        // create does not link
        assert!(h.node(a).children().is_empty());
    }

    #[test]
    fn link_child_inserts_sorted() {
        let mut h = sorted();
        let a = h.create_node(None, "a", ()).unwrap();
        let c = h.create_node(Some(a), "c", ()).unwrap();
        let b = h.create_node(Some(a), "b", ()).unwrap();

        h.link_child(a, c).unwrap();
        h.link_child(a, b).unwrap();

        assert_eq!(h.node(a).children(), &[b, c]);
    }

    #[test]
    fn link_child_rejects_duplicate() {
        let mut h = sorted();
        let a = h.create_node(None, "a", ()).unwrap();
        let b1 = h.create_node(Some(a), "b", ()).unwrap();
        let b2 = h.create_node(Some(a), "b", ()).unwrap();

        h.link_child(a, b1).unwrap();
        assert_eq!(h.link_child(a, b2), Err(TreeError::AlreadyInTree));
        assert_eq!(h.node(a).children(), &[b1]);
    }

    #[test]
    fn link_child_rejects_grandchild() {
        let mut h = sorted();
        let a = h.create_node(None, "a", ()).unwrap();
        let b = h.create_node(Some(a), "b", ()).unwrap();
        let deep = h.create_node(Some(b), "c", ()).unwrap();

        // a/b/c is two segments below a
        assert_eq!(h.link_child(a, deep), Err(TreeError::ParentChild));
        assert!(h.node(a).children().is_empty());
    }

    #[test]
    fn link_child_rejects_unrelated_path() {
        let mut h = sorted();
        let a = h.create_node(None, "a", ()).unwrap();
        let x = h.create_node(None, "x", ()).unwrap();

        assert_eq!(h.link_child(a, x), Err(TreeError::ParentChild));
    }

    #[test]
    fn positional_arity_is_enforced() {
        let mut h = binary();
        let a = h.create_node(None, "a", ()).unwrap();
        let b = h.create_node(Some(a), "b", ()).unwrap();
        let c = h.create_node(Some(a), "c", ()).unwrap();
        let d = h.create_node(Some(a), "d", ()).unwrap();

        h.link_child(a, b).unwrap();
        h.link_child(a, c).unwrap();
        assert_eq!(h.link_child(a, d), Err(TreeError::ParentChild));
        assert_eq!(h.node(a).children(), &[b, c]);
    }

    #[test]
    fn positional_keeps_insertion_order() {
        let mut h = binary();
        let a = h.create_node(None, "a", ()).unwrap();
        let z = h.create_node(Some(a), "z", ()).unwrap();
        let b = h.create_node(Some(a), "b", ()).unwrap();

        h.link_child(a, z).unwrap();
        h.link_child(a, b).unwrap();
        // no sorting under the positional discipline
        assert_eq!(h.node(a).children(), &[z, b]);
    }

    #[test]
    fn unlink_promotes_second_slot() {
        let mut h = binary();
        let a = h.create_node(None, "a", ()).unwrap();
        let b = h.create_node(Some(a), "b", ()).unwrap();
        let c = h.create_node(Some(a), "c", ()).unwrap();
        h.link_child(a, b).unwrap();
        h.link_child(a, c).unwrap();

        h.unlink_child(a, b).unwrap();
        assert_eq!(h.node(a).children(), &[c]);
        // child itself is untouched
        assert!(h.get(b).is_some());
    }

    #[test]
    fn unlink_missing_child_fails() {
        let mut h = sorted();
        let a = h.create_node(None, "a", ()).unwrap();
        let b = h.create_node(Some(a), "b", ()).unwrap();

        assert_eq!(h.unlink_child(a, b), Err(TreeError::ParentChild));
    }

    #[test]
    fn add_child_destroys_on_link_failure() {
        let mut h = binary();
        let a = h.create_node(None, "a", ()).unwrap();
        h.add_child(a, "b", ()).unwrap();
        h.add_child(a, "c", ()).unwrap();
        let before = h.count();

        assert_eq!(h.add_child(a, "d", ()), Err(TreeError::ParentChild));
        assert_eq!(h.count(), before);
    }

    #[test]
    fn insert_chain_builds_every_segment() {
        let mut h = sorted();
        let head = h.insert_chain(None, &path!("a/b/c"), |_| ()).unwrap();

        assert_eq!(h.root(), Some(head));
        assert_eq!(h.count(), 3);
        assert!(h.find_exact(&path!("a")).is_some());
        assert!(h.find_exact(&path!("a/b")).is_some());
        assert!(h.find_exact(&path!("a/b/c")).is_some());
    }

    #[test]
    fn insert_chain_flags_last_node() {
        let mut h: Hierarchy<bool> = Hierarchy::new(ChildOrder::Sorted);
        h.insert_chain(None, &path!("a/b/c"), |is_last| is_last).unwrap();

        let c = h.find_exact(&path!("a/b/c")).unwrap();
        let b = h.find_exact(&path!("a/b")).unwrap();
        assert!(*h.node(c).data());
        assert!(!*h.node(b).data());
    }

    #[test]
    fn insert_chain_empty_rest_is_already_in_tree() {
        let mut h = sorted();
        let a = h.insert_chain(None, &path!("a"), |_| ()).unwrap();
        assert_eq!(
            h.insert_chain(Some(a), &path!(""), |_| ()),
            Err(TreeError::AlreadyInTree)
        );
    }

    #[test]
    fn insert_chain_rolls_back_when_head_cannot_link() {
        let mut h = binary();
        let a = h.insert_chain(None, &path!("a"), |_| ()).unwrap();
        h.insert_chain(Some(a), &path!("b/x"), |_| ()).unwrap();
        h.insert_chain(Some(a), &path!("c"), |_| ()).unwrap();
        let count = h.count();

        // third child of "a": the whole two-node chain must be discarded
        let err = h.insert_chain(Some(a), &path!("d/e"), |_| ());
        assert_eq!(err, Err(TreeError::ParentChild));
        assert_eq!(h.count(), count);
        assert!(h.find_exact(&path!("a/d")).is_none());
        assert!(h.find_exact(&path!("a/d/e")).is_none());
    }

    #[test]
    fn find_child_reports_exact_child() {
        let mut h = sorted();
        let a = h.create_node(None, "a", ()).unwrap();
        let b = h.create_node(Some(a), "b", ()).unwrap();
        h.link_child(a, b).unwrap();

        assert_eq!(h.find_child(a, &path!("a/b")), Some(b));
        assert_eq!(h.find_child(a, &path!("a/c")), None);
        assert_eq!(h.child_slot(a, &path!("a/c")), Err(1));
    }

    #[test]
    fn deepest_match_stops_at_partial() {
        let mut h = sorted();
        h.insert_chain(None, &path!("a/b"), |_| ()).unwrap();

        let hit = h.deepest_match(&path!("a/b/c/d")).unwrap();
        assert_eq!(h.node(hit).path(), &path!("a/b"));
    }

    #[test]
    fn deepest_match_requires_root_prefix() {
        let mut h = sorted();
        h.insert_chain(None, &path!("a/b"), |_| ()).unwrap();

        assert!(h.deepest_match(&path!("d/e")).is_none());
    }

    #[test]
    fn deepest_match_is_segment_aligned() {
        let mut h = sorted();
        h.insert_chain(None, &path!("abc"), |_| ()).unwrap();

        // "ab" is a string prefix of "abc" but not a segment prefix
        assert!(h.deepest_match(&path!("ab/x")).is_none());
    }

    #[test]
    fn find_exact_distinguishes_partial() {
        let mut h = sorted();
        h.insert_chain(None, &path!("a/b"), |_| ()).unwrap();

        assert!(h.find_exact(&path!("a/b")).is_some());
        assert!(h.find_exact(&path!("a/b/c")).is_none());
        assert!(h.find_exact(&path!("a")).is_some());
    }

    #[test]
    fn remove_subtree_counts_descendants() {
        let mut h = sorted();
        h.insert_chain(None, &path!("a/b/c"), |_| ()).unwrap();
        let b = h.find_exact(&path!("a/b")).unwrap();

        assert_eq!(h.remove_subtree(b), 2);
        assert_eq!(h.count(), 1);
        assert!(h.find_exact(&path!("a")).is_some());
        assert!(h.find_exact(&path!("a/b")).is_none());
    }

    #[test]
    fn remove_subtree_at_root_clears_root() {
        let mut h = sorted();
        h.insert_chain(None, &path!("a/b"), |_| ()).unwrap();
        let root = h.root().unwrap();

        assert_eq!(h.remove_subtree(root), 2);
        assert_eq!(h.root(), None);
        assert_eq!(h.count(), 0);
    }

    #[test]
    fn preorder_visits_parent_before_children() {
        let mut h = sorted();
        h.insert_chain(None, &path!("a/b"), |_| ()).unwrap();
        let a = h.find_exact(&path!("a")).unwrap();
        h.insert_chain(Some(a), &path!("c"), |_| ()).unwrap();

        let paths: Vec<String> = h
            .preorder(|_, kids| kids.to_vec())
            .into_iter()
            .map(|id| h.node(id).path().to_string())
            .collect();
        assert_eq!(paths, ["a", "a/b", "a/c"]);
    }

    #[test]
    fn preorder_respects_reorder_hook() {
        let mut h = sorted();
        h.insert_chain(None, &path!("a/b"), |_| ()).unwrap();
        let a = h.find_exact(&path!("a")).unwrap();
        h.insert_chain(Some(a), &path!("c"), |_| ()).unwrap();

        let paths: Vec<String> = h
            .preorder(|_, kids| kids.iter().rev().copied().collect())
            .into_iter()
            .map(|id| h.node(id).path().to_string())
            .collect();
        assert_eq!(paths, ["a", "a/c", "a/b"]);
    }
}
