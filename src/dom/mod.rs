//! Fragment arena: slotmap-backed widget bindings with id/class node data.

pub mod arena;
pub mod node;

pub use arena::FragmentArena;
pub use node::{Fragment, FragmentId, NodeData};
