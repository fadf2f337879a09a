//! Recursive, read-only invariant verification.
//!
//! The checker walks a hierarchy and reports the first structural invariant
//! that does not hold. It is diagnostic only: a violation means a
//! programming defect, never a runtime condition, so it is invoked as an
//! optional pre/post-condition around mutations and never as control flow.

use crate::arena::NodeId;
use crate::hierarchy::Hierarchy;
use crate::node::ChildOrder;

/// A structural invariant that failed to hold.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    /// The root node carries a parent back-link.
    #[error("root node '{path}' has a parent back-link")]
    RootHasParent { path: String },

    /// A child's path is not its parent's path plus exactly one segment.
    #[error("node '{child}' is not exactly one segment below its parent '{parent}'")]
    NotOneSegmentBelow { parent: String, child: String },

    /// A linked child's back-link does not point at its linking parent.
    #[error("child '{child}' of '{parent}' has a mismatched parent back-link")]
    ParentBackLinkMismatch { parent: String, child: String },

    /// Two children of one node share a path.
    #[error("node '{parent}' has duplicate child path '{child}'")]
    DuplicateChild { parent: String, child: String },

    /// A sorted child sequence is not strictly increasing by path.
    #[error("children of '{parent}' are not in strictly increasing path order")]
    ChildrenOutOfOrder { parent: String },

    /// A positional node exceeds its arity limit.
    #[error("node '{parent}' has {found} children, over the limit of {max}")]
    TooManyChildren {
        parent: String,
        found: usize,
        max: usize,
    },

    /// A child id names a vacated arena slot.
    #[error("node '{parent}' links to a vacant arena slot")]
    DanglingChild { parent: String },

    /// The recorded count differs from the number of reachable nodes.
    #[error("{recorded} nodes recorded but {reachable} reachable from the root")]
    CountMismatch { recorded: usize, reachable: usize },

    /// A file node has children (typed variant).
    #[error("file node '{path}' has children")]
    FileWithChildren { path: String },
}

/// Check one node's linkage invariants against its children.
fn check_node<D>(h: &Hierarchy<D>, id: NodeId) -> Result<(), Violation> {
    let node = h.node(id);
    let parent_path = node.path().to_string();

    if let ChildOrder::Positional { max } = h.order() {
        if node.children().len() > max {
            return Err(Violation::TooManyChildren {
                parent: parent_path,
                found: node.children().len(),
                max,
            });
        }
    }

    for &child_id in node.children() {
        let child = match h.get(child_id) {
            Some(child) => child,
            None => {
                return Err(Violation::DanglingChild {
                    parent: parent_path,
                });
            }
        };
        if child.parent() != Some(id) {
            return Err(Violation::ParentBackLinkMismatch {
                parent: parent_path,
                child: child.path().to_string(),
            });
        }
        match child.path().strip_prefix(node.path()) {
            Some(rest) if rest.len() == 1 => {}
            _ => {
                return Err(Violation::NotOneSegmentBelow {
                    parent: parent_path,
                    child: child.path().to_string(),
                });
            }
        }
    }

    for pair in node.children().windows(2) {
        let (a, b) = (h.node(pair[0]).path(), h.node(pair[1]).path());
        if a == b {
            return Err(Violation::DuplicateChild {
                parent: parent_path,
                child: a.to_string(),
            });
        }
        if h.order() == ChildOrder::Sorted && a > b {
            return Err(Violation::ChildrenOutOfOrder {
                parent: parent_path,
            });
        }
    }

    // Positional duplicates may be non-adjacent
    if matches!(h.order(), ChildOrder::Positional { .. }) {
        for (i, &a) in node.children().iter().enumerate() {
            for &b in &node.children()[i + 1..] {
                if h.node(a).path() == h.node(b).path() {
                    return Err(Violation::DuplicateChild {
                        parent: parent_path,
                        child: h.node(a).path().to_string(),
                    });
                }
            }
        }
    }

    Ok(())
}

/// Verify every structural invariant of a hierarchy.
///
/// Walks preorder from the root, short-circuiting on the first violation.
/// `node_check` is a variant-supplied extra per-node invariant (the typed
/// variant uses it to assert that file nodes are leaves); pass
/// [`no_extra_check`] when there is none.
pub fn check<D, F>(h: &Hierarchy<D>, node_check: F) -> Result<(), Violation>
where
    F: Fn(&Hierarchy<D>, NodeId) -> Result<(), Violation>,
{
    let root = match h.root() {
        Some(root) => root,
        None => {
            if h.count() != 0 {
                return Err(Violation::CountMismatch {
                    recorded: h.count(),
                    reachable: 0,
                });
            }
            return Ok(());
        }
    };

    if let Some(node) = h.get(root) {
        if node.parent().is_some() {
            return Err(Violation::RootHasParent {
                path: node.path().to_string(),
            });
        }
    }

    let mut reachable = 0;
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        reachable += 1;
        check_node(h, id)?;
        node_check(h, id)?;
        stack.extend_from_slice(h.node(id).children());
    }

    if reachable != h.count() {
        return Err(Violation::CountMismatch {
            recorded: h.count(),
            reachable,
        });
    }
    Ok(())
}

/// The empty extra per-node check.
pub fn no_extra_check<D>(_: &Hierarchy<D>, _: NodeId) -> Result<(), Violation> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use treefs_path::path;

    #[test]
    fn empty_hierarchy_is_valid() {
        let h: Hierarchy<()> = Hierarchy::new(ChildOrder::Sorted);
        assert_eq!(check(&h, no_extra_check), Ok(()));
    }

    #[test]
    fn well_formed_tree_is_valid() {
        let mut h: Hierarchy<()> = Hierarchy::new(ChildOrder::Sorted);
        h.insert_chain(None, &path!("a/b/c"), |_| ()).unwrap();
        let a = h.find_exact(&path!("a")).unwrap();
        h.insert_chain(Some(a), &path!("d"), |_| ()).unwrap();

        assert_eq!(check(&h, no_extra_check), Ok(()));
    }

    #[test]
    fn unlinked_child_breaks_count() {
        let mut h: Hierarchy<()> = Hierarchy::new(ChildOrder::Sorted);
        h.insert_chain(None, &path!("a/b"), |_| ()).unwrap();
        let a = h.find_exact(&path!("a")).unwrap();
        let b = h.find_exact(&path!("a/b")).unwrap();

        // unlink without destroying: b is still counted but unreachable
        h.unlink_child(a, b).unwrap();
        assert_eq!(
            check(&h, no_extra_check),
            Err(Violation::CountMismatch {
                recorded: 2,
                reachable: 1
            })
        );
    }

    #[test]
    fn extra_check_is_consulted() {
        let mut h: Hierarchy<bool> = Hierarchy::new(ChildOrder::Sorted);
        h.insert_chain(None, &path!("a"), |_| true).unwrap();

        let result = check(&h, |h, id| {
            if *h.node(id).data() {
                Err(Violation::FileWithChildren {
                    path: h.node(id).path().to_string(),
                })
            } else {
                Ok(())
            }
        });
        assert!(matches!(result, Err(Violation::FileWithChildren { .. })));
    }

    #[test]
    fn violation_messages_name_paths() {
        let v = Violation::NotOneSegmentBelow {
            parent: "a".to_string(),
            child: "a/b/c".to_string(),
        };
        let text = v.to_string();
        assert!(text.contains("a/b/c"));
        assert!(text.contains("one segment"));
    }
}
