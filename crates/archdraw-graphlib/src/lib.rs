#![forbid(unsafe_code)]

//! Compound directed graph container used by `archdraw`.
//!
//! Nodes and edges keep insertion order so that every serializer built on top of the graph is
//! deterministic. Compound parents form a tree; [`Graph::set_parent`] rejects any assignment that
//! would make a node its own ancestor.

pub mod alg;
mod graph;

pub use graph::{EdgeKey, Graph, GraphOptions};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("node `{id}` is not in the graph")]
    MissingNode { id: String },
    #[error("node `{id}` is already in the graph")]
    DuplicateNode { id: String },
    #[error("making `{parent}` the parent of `{child}` would create a cycle")]
    ParentCycle { child: String, parent: String },
}

pub type Result<T> = std::result::Result<T, GraphError>;
