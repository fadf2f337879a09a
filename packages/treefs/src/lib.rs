//! treefs: in-memory, path-addressed hierarchical trees.
//!
//! A family of filesystem-like namespaces that never touch real storage.
//! Clients mutate a tree through whole-path operations — insert, remove,
//! query, serialize — and the tree enforces structural invariants (unique
//! paths, parent-prefix consistency, arity limits, type consistency) at
//! every mutation. Mutations are all-or-nothing: a failed multi-node
//! insertion leaves the tree exactly as it was.
//!
//! # Variants
//!
//! - [`DirTree`]: unbounded directory tree, children sorted by path
//! - [`BinaryDirTree`]: at most two children per node, positional slots
//! - [`FileTree`]: typed directories and files with content buffers
//!
//! # Example
//!
//! ```rust
//! use treefs::{path, DirTree, PathTree, Tree};
//!
//! let mut tree = DirTree::new();
//! tree.init().unwrap();
//! tree.insert_path(&path!("a/b/c")).unwrap();
//! assert!(tree.contains_path(&path!("a/b")));
//! assert_eq!(tree.to_text().unwrap(), "a\na/b\na/b/c\n");
//! ```

pub use bytes::Bytes;

pub use treefs_path::{path, Path, SEPARATOR};

pub use treefs_node::{
    checker, Arena, ChildOrder, Hierarchy, Node, NodeId, TreeError, Violation,
};

pub use treefs_tree::{
    BinaryDirTree, DirTree, EntryType, FileTree, Metadata, PathTree, Tree, BINARY_ARITY,
};
