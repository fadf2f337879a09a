//! The typed directory/file tree.

use bytes::Bytes;
use treefs_node::{ChildOrder, Hierarchy, NodeId, TreeError, Violation};
use treefs_path::Path;

use crate::ops;
use crate::traits::Tree;

/// The type of a file tree entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    Directory,
    File,
}

/// Result of [`FileTree::stat`]: the entry's type and, for files, the
/// length of its contents. Directories carry no length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metadata {
    pub entry_type: EntryType,
    pub length: Option<usize>,
}

/// Per-node payload: a directory, or a file with optional contents.
///
/// A file's contents may be absent, which is distinct from empty; the
/// buffer carries its own length.
#[derive(Debug, Clone)]
enum Entry {
    Directory,
    File { contents: Option<Bytes> },
}

/// A hierarchy of directories and files: directories may be leaves or
/// non-leaves, files are always leaves, and the root is always a
/// directory.
///
/// # Example
///
/// ```rust
/// use treefs_tree::{EntryType, FileTree, Tree};
/// use treefs_path::path;
/// use bytes::Bytes;
///
/// let mut tree = FileTree::new();
/// tree.init().unwrap();
/// tree.insert_dir(&path!("a/b")).unwrap();
/// tree.insert_file(&path!("a/b/notes"), Some(Bytes::from_static(b"hi")))
///     .unwrap();
///
/// let meta = tree.stat(&path!("a/b/notes")).unwrap();
/// assert_eq!(meta.entry_type, EntryType::File);
/// assert_eq!(meta.length, Some(2));
/// ```
#[derive(Debug, Default)]
pub struct FileTree {
    state: Option<Hierarchy<Entry>>,
    verify: bool,
}

/// Guard for descent: the deepest existing node on an insertion path must
/// be a directory, since a file can have no descendants.
fn require_directory(h: &Hierarchy<Entry>, id: NodeId) -> Result<(), TreeError> {
    match h.node(id).data() {
        Entry::Directory => Ok(()),
        Entry::File { .. } => Err(TreeError::NotADirectory),
    }
}

/// Extra invariant of the typed variant: file nodes are leaves.
fn files_are_leaves(h: &Hierarchy<Entry>, id: NodeId) -> Result<(), Violation> {
    let node = h.node(id);
    if matches!(node.data(), Entry::File { .. }) && !node.children().is_empty() {
        return Err(Violation::FileWithChildren {
            path: node.path().to_string(),
        });
    }
    Ok(())
}

impl FileTree {
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
            ops::enforce_invariants(self.state.as_ref(), files_are_leaves);
        }
    }

    fn state(&self) -> Result<&Hierarchy<Entry>, TreeError> {
        self.state.as_ref().ok_or(TreeError::Initialization)
    }

    fn state_mut(&mut self) -> Result<&mut Hierarchy<Entry>, TreeError> {
        self.state.as_mut().ok_or(TreeError::Initialization)
    }

    fn entry_type_at(&self, path: &Path) -> Option<EntryType> {
        let state = self.state.as_ref()?;
        let id = state.find_exact(path)?;
        Some(match state.node(id).data() {
            Entry::Directory => EntryType::Directory,
            Entry::File { .. } => EntryType::File,
        })
    }

    /// Insert a directory at `path`, creating missing ancestors as
    /// directories.
    pub fn insert_dir(&mut self, path: &Path) -> Result<(), TreeError> {
        self.check();
        let result = match self.state_mut() {
            Ok(state) => ops::insert_path(state, path, |_| Entry::Directory, require_directory),
            Err(e) => Err(e),
        };
        tracing::debug!(%path, ok = result.is_ok(), "insert dir");
        self.check();
        result
    }

    /// Insert a file at `path` with the given contents, creating missing
    /// ancestors as directories.
    ///
    /// The root of a file tree must be a directory: a one-segment file
    /// path into an empty tree fails with `ConflictingPath`.
    pub fn insert_file(
        &mut self,
        path: &Path,
        contents: Option<Bytes>,
    ) -> Result<(), TreeError> {
        self.check();
        let result = self.insert_file_inner(path, contents);
        tracing::debug!(%path, ok = result.is_ok(), "insert file");
        self.check();
        result
    }

    fn insert_file_inner(
        &mut self,
        path: &Path,
        contents: Option<Bytes>,
    ) -> Result<(), TreeError> {
        let state = self.state.as_mut().ok_or(TreeError::Initialization)?;
        if state.root().is_none() && path.len() == 1 {
            return Err(TreeError::ConflictingPath);
        }
        let mut contents = Some(contents);
        ops::insert_path(
            state,
            path,
            |is_last| {
                if is_last {
                    Entry::File {
                        contents: contents.take().flatten(),
                    }
                } else {
                    Entry::Directory
                }
            },
            require_directory,
        )
    }

    /// True iff `path` exists as a directory.
    pub fn contains_dir(&self, path: &Path) -> bool {
        self.entry_type_at(path) == Some(EntryType::Directory)
    }

    /// True iff `path` exists as a file.
    pub fn contains_file(&self, path: &Path) -> bool {
        self.entry_type_at(path) == Some(EntryType::File)
    }

    /// Remove the directory at `path` together with its subtree.
    ///
    /// Fails with `NotADirectory` when the path exists as a file.
    pub fn rm_dir(&mut self, path: &Path) -> Result<(), TreeError> {
        self.check();
        let result = self.rm_typed(path, EntryType::Directory);
        self.check();
        result
    }

    /// Remove the file at `path`.
    ///
    /// Fails with `NotAFile` when the path exists as a directory.
    pub fn rm_file(&mut self, path: &Path) -> Result<(), TreeError> {
        self.check();
        let result = self.rm_typed(path, EntryType::File);
        self.check();
        result
    }

    fn rm_typed(&mut self, path: &Path, expected: EntryType) -> Result<(), TreeError> {
        let state = self.state.as_mut().ok_or(TreeError::Initialization)?;
        let id = state.find_exact(path).ok_or(TreeError::NoSuchPath)?;
        let found = match state.node(id).data() {
            Entry::Directory => EntryType::Directory,
            Entry::File { .. } => EntryType::File,
        };
        if found != expected {
            return Err(match expected {
                EntryType::Directory => TreeError::NotADirectory,
                EntryType::File => TreeError::NotAFile,
            });
        }
        let removed = state.remove_subtree(id);
        tracing::debug!(%path, removed, "removed entry");
        Ok(())
    }

    /// The contents of the file at `path`.
    ///
    /// `Ok(None)` means the file exists with absent contents; a
    /// directory at the path fails with `NotAFile`.
    pub fn file_contents(&self, path: &Path) -> Result<Option<Bytes>, TreeError> {
        let state = self.state()?;
        let id = state.find_exact(path).ok_or(TreeError::NoSuchPath)?;
        match state.node(id).data() {
            Entry::File { contents } => Ok(contents.clone()),
            Entry::Directory => Err(TreeError::NotAFile),
        }
    }

    /// Atomically swap the contents of the file at `path`, returning the
    /// previous contents. Ownership of the old buffer transfers to the
    /// caller; the new buffer is owned by the node.
    pub fn replace_file_contents(
        &mut self,
        path: &Path,
        new_contents: Option<Bytes>,
    ) -> Result<Option<Bytes>, TreeError> {
        self.check();
        let result = self.replace_inner(path, new_contents);
        self.check();
        result
    }

    fn replace_inner(
        &mut self,
        path: &Path,
        new_contents: Option<Bytes>,
    ) -> Result<Option<Bytes>, TreeError> {
        let state = self.state_mut()?;
        let id = state.find_exact(path).ok_or(TreeError::NoSuchPath)?;
        match state.node_mut(id).data_mut() {
            Entry::File { contents } => Ok(std::mem::replace(contents, new_contents)),
            Entry::Directory => Err(TreeError::NotAFile),
        }
    }

    /// The type of the entry at `path` and, for files, its content
    /// length (absent contents report length 0).
    pub fn stat(&self, path: &Path) -> Result<Metadata, TreeError> {
        let state = self.state()?;
        let id = state.find_exact(path).ok_or(TreeError::NoSuchPath)?;
        Ok(match state.node(id).data() {
            Entry::Directory => Metadata {
                entry_type: EntryType::Directory,
                length: None,
            },
            Entry::File { contents } => Metadata {
                entry_type: EntryType::File,
                length: Some(contents.as_ref().map_or(0, Bytes::len)),
            },
        })
    }
}

impl Tree for FileTree {
    fn init(&mut self) -> Result<(), TreeError> {
        self.check();
        if self.state.is_some() {
            return Err(TreeError::Initialization);
        }
        self.state = Some(Hierarchy::new(ChildOrder::Sorted));
        tracing::debug!("file tree initialized");
        self.check();
        Ok(())
    }

    fn destroy(&mut self) -> Result<(), TreeError> {
        self.check();
        if self.state.take().is_none() {
            return Err(TreeError::Initialization);
        }
        tracing::debug!("file tree destroyed");
        self.check();
        Ok(())
    }

    fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    fn node_count(&self) -> usize {
        self.state.as_ref().map_or(0, Hierarchy::count)
    }

    /// Preorder listing in which, at every directory, all file children
    /// precede all directory children; each group stays in lexicographic
    /// order.
    fn to_text(&self) -> Option<String> {
        let state = self.state.as_ref()?;
        Some(ops::render(state, |h, kids| {
            let (files, dirs): (Vec<NodeId>, Vec<NodeId>) = kids
                .iter()
                .copied()
                .partition(|&c| matches!(h.node(c).data(), Entry::File { .. }));
            files.into_iter().chain(dirs).collect()
        }))
    }
}
