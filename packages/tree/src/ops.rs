//! Orchestration steps shared by the tree variants.

use treefs_node::{checker, Hierarchy, NodeId, TreeError, Violation};
use treefs_path::Path;

/// Whole-path insertion: traverse to the deepest match, then attach the
/// chain for the unmatched remainder atomically.
///
/// `guard` is consulted on a non-exact deepest match before any node is
/// created; the typed variant uses it to reject descent through a file.
pub(crate) fn insert_path<D, F, G>(
    state: &mut Hierarchy<D>,
    path: &Path,
    data_for: F,
    guard: G,
) -> Result<(), TreeError>
where
    F: FnMut(bool) -> D,
    G: Fn(&Hierarchy<D>, NodeId) -> Result<(), TreeError>,
{
    if path.is_empty() {
        return Err(TreeError::ConflictingPath);
    }
    match state.deepest_match(path) {
        Some(id) if *state.node(id).path() == *path => Err(TreeError::AlreadyInTree),
        Some(id) => {
            guard(state, id)?;
            let rest = path
                .strip_prefix(state.node(id).path())
                .ok_or(TreeError::ParentChild)?;
            state.insert_chain(Some(id), &rest, data_for).map(|_| ())
        }
        None if state.root().is_some() => Err(TreeError::ConflictingPath),
        None => state.insert_chain(None, path, data_for).map(|_| ()),
    }
}

/// Locate the exact node for `path`, then destroy its subtree.
/// Returns the number of nodes destroyed.
pub(crate) fn remove_path<D>(state: &mut Hierarchy<D>, path: &Path) -> Result<usize, TreeError> {
    let id = state.find_exact(path).ok_or(TreeError::NoSuchPath)?;
    Ok(state.remove_subtree(id))
}

/// Render the preorder path listing, one newline-terminated line per node.
pub(crate) fn render<D, F>(state: &Hierarchy<D>, reorder: F) -> String
where
    F: FnMut(&Hierarchy<D>, &[NodeId]) -> Vec<NodeId>,
{
    let mut out = String::new();
    for id in state.preorder(reorder) {
        out.push_str(&state.node(id).path().to_string());
        out.push('\n');
    }
    out
}

/// Run the invariant checker over an orchestrator's state, panicking on a
/// violation. Diagnostic only: a violation is a programming defect.
pub(crate) fn enforce_invariants<D, F>(state: Option<&Hierarchy<D>>, node_check: F)
where
    F: Fn(&Hierarchy<D>, NodeId) -> Result<(), Violation>,
{
    let Some(h) = state else {
        // Uninitialized: no state to verify.
        return;
    };
    if let Err(violation) = checker::check(h, node_check) {
        tracing::error!(%violation, "tree invariant violated");
        panic!("tree invariant violated: {violation}");
    }
}
