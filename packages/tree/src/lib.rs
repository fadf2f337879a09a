//! treefs tree orchestrators: lifecycle, whole-path operations, typed
//! semantics.
//!
//! Three variants share the node engine from `treefs-node`:
//! - [`DirTree`]: unbounded arity, children sorted lexicographically
//! - [`BinaryDirTree`]: at most two children per node, positional slots
//! - [`FileTree`]: typed directory/file entries with content buffers
//!
//! Every tree is an explicit handle with an init/destroy state machine;
//! operations on an uninitialized tree fail with
//! `TreeError::Initialization`. Mutations are all-or-nothing, and an
//! optional verification mode re-checks every structural invariant around
//! each mutation.

mod binary_dir_tree;
mod dir_tree;
mod file_tree;
mod ops;
mod traits;

pub use binary_dir_tree::{BinaryDirTree, BINARY_ARITY};
pub use dir_tree::DirTree;
pub use file_tree::{EntryType, FileTree, Metadata};
pub use traits::{PathTree, Tree};
