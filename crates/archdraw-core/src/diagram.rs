//! A finished, read-only diagram.

use crate::attrs::{Direction, GraphAttributes};
use crate::builder::{ClusterHandle, DiagramGraph, NodeHandle};
use crate::kind::NodeKind;
use crate::model::{EdgeStyle, Element};
use archdraw_graphlib::alg;
use serde::{Serialize, Serializer};

/// The graph produced by [`DiagramBuilder::finish`](crate::DiagramBuilder::finish).
///
/// A `Diagram` cannot be edited; it is meant to be serialized once and dropped.
#[derive(Debug, Clone)]
pub struct Diagram {
    pub(crate) id: u64,
    pub(crate) title: String,
    pub(crate) attributes: GraphAttributes,
    pub(crate) graph: DiagramGraph,
    pub(crate) node_ids: Vec<String>,
    pub(crate) cluster_ids: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRef<'a> {
    pub id: &'a str,
    pub label: &'a str,
    pub kind: NodeKind,
    pub cluster: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterRef<'a> {
    pub id: &'a str,
    pub label: &'a str,
    pub parent: Option<&'a str>,
    pub depth: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeRef<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub label: Option<&'a str>,
    pub style: EdgeStyle,
    pub color: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DiagramSnapshot<'a> {
    title: &'a str,
    direction: Direction,
    attributes: &'a GraphAttributes,
    clusters: Vec<ClusterRef<'a>>,
    nodes: Vec<NodeRef<'a>>,
    edges: Vec<EdgeRef<'a>>,
}

impl Diagram {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn attributes(&self) -> &GraphAttributes {
        &self.attributes
    }

    pub fn direction(&self) -> Direction {
        self.attributes.direction()
    }

    /// File name stem derived from the title: whitespace-separated words joined with `_`,
    /// lowercased.
    pub fn file_stem(&self) -> String {
        self.title
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_")
            .to_lowercase()
    }

    pub fn node_count(&self) -> usize {
        self.node_ids.len()
    }

    pub fn cluster_count(&self) -> usize {
        self.cluster_ids.len()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    fn node_ref<'a>(&'a self, id: &'a str, element: &'a Element) -> Option<NodeRef<'a>> {
        match element {
            Element::Node(n) => Some(NodeRef {
                id,
                label: &n.label,
                kind: n.kind,
                cluster: self.graph.parent(id),
            }),
            Element::Cluster(_) => None,
        }
    }

    fn cluster_ref<'a>(&'a self, id: &'a str, element: &'a Element) -> Option<ClusterRef<'a>> {
        match element {
            Element::Cluster(c) => Some(ClusterRef {
                id,
                label: &c.label,
                parent: self.graph.parent(id),
                depth: self.graph.depth(id),
            }),
            Element::Node(_) => None,
        }
    }

    /// Nodes in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeRef<'_>> {
        self.graph
            .node_entries()
            .filter_map(|(id, el)| self.node_ref(id, el))
    }

    /// Clusters in creation order.
    pub fn clusters(&self) -> impl Iterator<Item = ClusterRef<'_>> {
        self.graph
            .node_entries()
            .filter_map(|(id, el)| self.cluster_ref(id, el))
    }

    /// Edges in creation order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeRef<'_>> {
        self.graph.edge_entries().map(|(key, opts)| EdgeRef {
            from: &key.v,
            to: &key.w,
            label: opts.label.as_deref(),
            style: opts.style.unwrap_or_default(),
            color: opts.color.as_deref(),
        })
    }

    pub fn node(&self, handle: NodeHandle) -> Option<NodeRef<'_>> {
        if handle.diagram != self.id {
            return None;
        }
        let id = self.node_ids.get(handle.index)?;
        let element = self.graph.node(id)?;
        self.node_ref(id, element)
    }

    pub fn cluster(&self, handle: ClusterHandle) -> Option<ClusterRef<'_>> {
        if handle.diagram != self.id {
            return None;
        }
        let id = self.cluster_ids.get(handle.index)?;
        let element = self.graph.node(id)?;
        self.cluster_ref(id, element)
    }

    pub fn node_by_id(&self, id: &str) -> Option<NodeRef<'_>> {
        let (id, element) = self.graph.node_entries().find(|(v, _)| *v == id)?;
        self.node_ref(id, element)
    }

    /// Nodes inside `handle`, including those in nested clusters, in tree order.
    pub fn cluster_members(&self, handle: ClusterHandle) -> Vec<NodeRef<'_>> {
        let Some(root) = self.cluster(handle) else {
            return Vec::new();
        };
        alg::preorder_descendants(&self.graph, root.id)
            .into_iter()
            .filter_map(|id| {
                let element = self.graph.node(id)?;
                self.node_ref(id, element)
            })
            .collect()
    }

    fn snapshot(&self) -> DiagramSnapshot<'_> {
        DiagramSnapshot {
            title: &self.title,
            direction: self.direction(),
            attributes: &self.attributes,
            clusters: self.clusters().collect(),
            nodes: self.nodes().collect(),
            edges: self.edges().collect(),
        }
    }

    pub fn to_json_value(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }

    pub fn to_json_string(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

impl Serialize for Diagram {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.snapshot().serialize(serializer)
    }
}
