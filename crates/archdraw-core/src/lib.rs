#![forbid(unsafe_code)]

//! Architecture diagram model and builder (headless).
//!
//! A diagram is assembled with a [`DiagramBuilder`]: nodes carry a label and a [`NodeKind`],
//! clusters group nodes (and other clusters) into a tree, and edges connect two nodes with an
//! optional label and style. [`DiagramBuilder::finish`] yields a read-only [`Diagram`] that can be
//! serialized to Graphviz DOT ([`Diagram::to_dot`]) or to a JSON snapshot through `serde`.
//!
//! Layout and image output live in `archdraw-render`.

pub mod attrs;
pub mod builder;
pub mod diagram;
pub mod dot;
pub mod error;
pub mod kind;
pub mod model;

pub use attrs::{Attributes, Direction, GraphAttributes};
pub use builder::{ClusterHandle, DiagramBuilder, NodeHandle};
pub use diagram::{ClusterRef, Diagram, EdgeRef, NodeRef};
pub use error::{Error, Result};
pub use kind::{NodeKind, NodeStyle, Provider};
pub use model::{EdgeOptions, EdgeStyle};

#[cfg(test)]
mod tests;
