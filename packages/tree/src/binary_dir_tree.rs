//! The capacity-limited binary directory tree.

use treefs_node::{checker, ChildOrder, Hierarchy, TreeError};
use treefs_path::Path;

use crate::ops;
use crate::traits::{PathTree, Tree};

/// Maximum children per node in the binary variant.
pub const BINARY_ARITY: usize = 2;

/// A directory hierarchy in which each node has 0, 1, or 2 children.
///
/// Children are held in positional slots rather than sorted: the first
/// insertion takes slot one, the second takes slot two, and removing slot
/// one promotes slot two. An insertion that would require a third child
/// fails with `ParentChild` and leaves the tree unchanged.
#[derive(Debug, Default)]
pub struct BinaryDirTree {
    state: Option<Hierarchy<()>>,
    verify: bool,
}

impl BinaryDirTree {
    /// Create an uninitialized tree.
    pub fn new() -> Self {
        Self {
            state: None,
            verify: false,
        }
    }

    /// Create an uninitialized tree that re-verifies every structural
    /// invariant around each mutation. Panics on a violation.
    pub fn with_verification() -> Self {
        Self {
            state: None,
            verify: true,
        }
    }

    fn check(&self) {
        if self.verify {
            ops::enforce_invariants(self.state.as_ref(), checker::no_extra_check);
        }
    }

    fn insert_inner(&mut self, path: &Path) -> Result<(), TreeError> {
        let state = self.state.as_mut().ok_or(TreeError::Initialization)?;
        ops::insert_path(state, path, |_| (), |_, _| Ok(()))
    }

    fn remove_inner(&mut self, path: &Path) -> Result<usize, TreeError> {
        let state = self.state.as_mut().ok_or(TreeError::Initialization)?;
        ops::remove_path(state, path)
    }
}

impl Tree for BinaryDirTree {
    fn init(&mut self) -> Result<(), TreeError> {
        self.check();
        if self.state.is_some() {
            return Err(TreeError::Initialization);
        }
        self.state = Some(Hierarchy::new(ChildOrder::Positional { max: BINARY_ARITY }));
        tracing::debug!("binary directory tree initialized");
        self.check();
        Ok(())
    }

    fn destroy(&mut self) -> Result<(), TreeError> {
        self.check();
        if self.state.take().is_none() {
            return Err(TreeError::Initialization);
        }
        tracing::debug!("binary directory tree destroyed");
        self.check();
        Ok(())
    }

    fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    fn node_count(&self) -> usize {
        self.state.as_ref().map_or(0, Hierarchy::count)
    }

    fn to_text(&self) -> Option<String> {
        let state = self.state.as_ref()?;
        Some(ops::render(state, |_, kids| kids.to_vec()))
    }
}

impl PathTree for BinaryDirTree {
    fn insert_path(&mut self, path: &Path) -> Result<(), TreeError> {
        self.check();
        let result = self.insert_inner(path);
        tracing::debug!(%path, ok = result.is_ok(), "insert path");
        self.check();
        result
    }

    fn contains_path(&self, path: &Path) -> bool {
        self.state
            .as_ref()
            .is_some_and(|state| state.find_exact(path).is_some())
    }

    fn remove_path(&mut self, path: &Path) -> Result<(), TreeError> {
        self.check();
        let result = self.remove_inner(path);
        if let Ok(removed) = result {
            tracing::debug!(%path, removed, "removed path");
        }
        self.check();
        result.map(|_| ())
    }
}
