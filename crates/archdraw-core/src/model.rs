//! Element and edge payloads stored in the diagram graph.

use crate::kind::NodeKind;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Element {
    Node(NodeData),
    Cluster(ClusterData),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NodeData {
    pub label: String,
    pub kind: NodeKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ClusterData {
    pub label: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    Bold,
}

impl EdgeStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Dashed => "dashed",
            Self::Dotted => "dotted",
            Self::Bold => "bold",
        }
    }
}

/// Cosmetic options for a single edge.
///
/// ```
/// use archdraw_core::{EdgeOptions, EdgeStyle};
///
/// let opts = EdgeOptions::labeled("Image Tag Update").dashed();
/// assert_eq!(opts.style, Some(EdgeStyle::Dashed));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeOptions {
    pub label: Option<String>,
    pub style: Option<EdgeStyle>,
    pub color: Option<String>,
}

impl EdgeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    pub fn with_style(mut self, style: EdgeStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn dashed(self) -> Self {
        self.with_style(EdgeStyle::Dashed)
    }

    pub fn dotted(self) -> Self {
        self.with_style(EdgeStyle::Dotted)
    }

    pub fn bold(self) -> Self {
        self.with_style(EdgeStyle::Bold)
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}
