//! Error taxonomy shared by every tree variant.

use crate::arena::AllocError;

/// Failure of a tree operation.
///
/// A closed enum replaces integer status codes so call sites match
/// exhaustively. Every mutating operation is all-or-nothing: when one of
/// these is returned the tree is exactly as it was before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// The tree is not in the initialization state the operation requires.
    #[error("tree is not in the required initialization state")]
    Initialization,

    /// A parent could not link to a child (illegal extension or, for the
    /// binary variant, a full node).
    #[error("parent cannot link to child")]
    ParentChild,

    /// The path already exists in the tree.
    #[error("path is already in the tree")]
    AlreadyInTree,

    /// The path does not exist in the tree.
    #[error("no such path")]
    NoSuchPath,

    /// The path is not underneath the existing root, or would put a file
    /// at the root.
    #[error("path conflicts with the existing root")]
    ConflictingPath,

    /// A proper prefix of the path exists as a file (typed variant only).
    #[error("a prefix of the path is not a directory")]
    NotADirectory,

    /// The path names a directory where a file is required (typed variant
    /// only).
    #[error("path is not a file")]
    NotAFile,

    /// Memory allocation failed. Recoverable: the caller may retry or
    /// abandon, existing structure is never corrupted.
    #[error("memory allocation failed")]
    Memory,
}

impl From<AllocError> for TreeError {
    fn from(_: AllocError) -> Self {
        TreeError::Memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(TreeError::NoSuchPath.to_string(), "no such path");
        assert!(TreeError::NotADirectory.to_string().contains("directory"));
    }

    #[test]
    fn alloc_error_converts() {
        let e: TreeError = AllocError.into();
        assert_eq!(e, TreeError::Memory);
    }

    #[test]
    fn is_std_error() {
        let e: Box<dyn std::error::Error> = Box::new(TreeError::ParentChild);
        let _ = e.to_string();
    }
}
