//! treefs node engine: the entity layer under every tree variant.
//!
//! This crate owns the pieces with algorithmic content and no lifecycle:
//! - `Arena`/`NodeId`: slotted storage with id back-references, so the
//!   parent/child cycle is modeled as asymmetric ownership
//! - `Node`: one path in a hierarchy plus a variant payload
//! - `Hierarchy`: prefix-match traversal, sorted/positional child linkage,
//!   rollback-safe chain insertion, stack-based subtree removal
//! - `checker`: read-only recursive invariant verification
//! - `TreeError`: the closed error taxonomy shared by every variant
//!
//! The orchestrators in `treefs-tree` add the init/destroy state machine
//! and the typed directory/file semantics on top.

mod arena;
pub mod checker;
mod error;
mod hierarchy;
mod node;

pub use arena::{AllocError, Arena, NodeId};
pub use checker::Violation;
pub use error::TreeError;
pub use hierarchy::Hierarchy;
pub use node::{ChildOrder, Node};
