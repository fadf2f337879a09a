//! The unbounded directory tree.

use treefs_node::{checker, ChildOrder, Hierarchy, TreeError};
use treefs_path::Path;

use crate::ops;
use crate::traits::{PathTree, Tree};

/// A directory hierarchy with unbounded arity and lexicographically sorted
/// children.
///
/// # Example
///
/// ```rust
/// use treefs_tree::{DirTree, PathTree, Tree};
/// use treefs_path::path;
///
/// let mut tree = DirTree::new();
/// tree.init().unwrap();
/// tree.insert_path(&path!("a/b/c")).unwrap();
/// assert!(tree.contains_path(&path!("a/b")));
/// assert_eq!(tree.to_text().unwrap(), "a\na/b\na/b/c\n");
/// ```
#[derive(Debug, Default)]
pub struct DirTree {
    state: Option<Hierarchy<()>>,
    verify: bool,
}

impl DirTree {
    /// Create an uninitialized tree.
    pub fn new() -> Self {
        Self {
            state: None,
            verify: false,
        }
    }

    /// Create an uninitialized tree that re-verifies every structural
    /// invariant around each mutation. Panics on a violation; for tests
    /// and debugging, not production control flow.
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

impl Tree for DirTree {
    fn init(&mut self) -> Result<(), TreeError> {
        self.check();
        if self.state.is_some() {
            return Err(TreeError::Initialization);
        }
        self.state = Some(Hierarchy::new(ChildOrder::Sorted));
        tracing::debug!("directory tree initialized");
        self.check();
        Ok(())
    }

    fn destroy(&mut self) -> Result<(), TreeError> {
        self.check();
        if self.state.take().is_none() {
            return Err(TreeError::Initialization);
        }
        tracing::debug!("directory tree destroyed");
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

impl PathTree for DirTree {
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
