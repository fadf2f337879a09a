//! Trait seams shared by the tree variants.

use treefs_node::TreeError;
use treefs_path::Path;

/// Lifecycle and serialization surface common to every tree variant.
///
/// A tree is an explicit handle: Uninitialized → `init()` → Initialized →
/// `destroy()` → Uninitialized. Multiple independent instances coexist;
/// there is no process-wide state.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `&mut dyn Tree`.
pub trait Tree {
    /// Transition to the initialized, empty state.
    ///
    /// Fails with `Initialization` (and is a no-op) when already
    /// initialized.
    fn init(&mut self) -> Result<(), TreeError>;

    /// Destroy all contents and return to the uninitialized state.
    ///
    /// Fails with `Initialization` (and is a no-op) when not initialized.
    fn destroy(&mut self) -> Result<(), TreeError>;

    /// True between `init()` and `destroy()`.
    fn is_initialized(&self) -> bool;

    /// Number of live nodes; 0 when uninitialized.
    fn node_count(&self) -> usize;

    /// Preorder serialization: one newline-terminated line per node path.
    ///
    /// An initialized empty tree yields the empty string; an uninitialized
    /// tree yields `None`.
    fn to_text(&self) -> Option<String>;
}

/// Whole-path operations of the untyped variants.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `&mut dyn PathTree`.
pub trait PathTree: Tree {
    /// Insert `path`, creating every missing ancestor, atomically.
    fn insert_path(&mut self, path: &Path) -> Result<(), TreeError>;

    /// True iff a node with exactly this path exists. False when
    /// uninitialized.
    fn contains_path(&self, path: &Path) -> bool;

    /// Remove the node at exactly this path together with its subtree.
    fn remove_path(&mut self, path: &Path) -> Result<(), TreeError>;
}
