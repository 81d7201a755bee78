//! Explicit diagram builder.
//!
//! A [`DiagramBuilder`] owns the graph while it is being assembled. Clusters are scopes on a stack:
//! nodes and clusters created while a scope is open are nested inside it. Handles returned by the
//! builder are only valid for the builder that produced them.

use crate::attrs::{Direction, GraphAttributes};
use crate::diagram::Diagram;
use crate::error::{Error, Result};
use crate::kind::NodeKind;
use crate::model::{ClusterData, EdgeOptions, Element, NodeData};
use archdraw_graphlib::{Graph, GraphOptions};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_DIAGRAM_ID: AtomicU64 = AtomicU64::new(1);

pub(crate) type DiagramGraph = Graph<Element, EdgeOptions>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    pub(crate) diagram: u64,
    pub(crate) index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClusterHandle {
    pub(crate) diagram: u64,
    pub(crate) index: usize,
}

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node #{} of diagram {}", self.index, self.diagram)
    }
}

impl fmt::Display for ClusterHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cluster #{} of diagram {}", self.index, self.diagram)
    }
}

#[derive(Debug)]
pub struct DiagramBuilder {
    id: u64,
    title: String,
    attributes: GraphAttributes,
    graph: DiagramGraph,
    node_ids: Vec<String>,
    cluster_ids: Vec<String>,
    scopes: Vec<ClusterHandle>,
    next_node: usize,
    next_cluster: usize,
    next_edge: usize,
}

impl DiagramBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        let id = NEXT_DIAGRAM_ID.fetch_add(1, Ordering::Relaxed);
        let title = title.into();
        tracing::debug!(diagram = id, title = %title, "opened diagram");
        Self {
            id,
            title,
            attributes: GraphAttributes::default(),
            graph: Graph::new(GraphOptions { multigraph: true }),
            node_ids: Vec::new(),
            cluster_ids: Vec::new(),
            scopes: Vec::new(),
            next_node: 0,
            next_cluster: 0,
            next_edge: 0,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.attributes.set_direction(direction);
        self
    }

    pub fn set_direction(&mut self, direction: Direction) -> &mut Self {
        self.attributes.set_direction(direction);
        self
    }

    /// Sets a graph-level Graphviz attribute, overriding the default for `key` if there is one.
    pub fn graph_attr(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.attributes.graph.insert(key.into(), value.into());
        self
    }

    pub fn node_attr(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.attributes.node.insert(key.into(), value.into());
        self
    }

    pub fn edge_attr(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.attributes.edge.insert(key.into(), value.into());
        self
    }

    pub fn attributes(&self) -> &GraphAttributes {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut GraphAttributes {
        &mut self.attributes
    }

    pub fn node_count(&self) -> usize {
        self.node_ids.len()
    }

    /// The innermost open cluster scope, if any.
    pub fn current_cluster(&self) -> Option<ClusterHandle> {
        self.scopes.last().copied()
    }

    fn fresh_id(&self, prefix: &str, counter: &mut usize) -> String {
        loop {
            *counter += 1;
            let id = format!("{prefix}{counter}");
            if !self.graph.has_node(&id) {
                return id;
            }
        }
    }

    pub(crate) fn node_id(&self, handle: NodeHandle) -> Result<&str> {
        if handle.diagram == self.id {
            if let Some(id) = self.node_ids.get(handle.index) {
                return Ok(id.as_str());
            }
        }
        Err(Error::UnknownNode {
            id: handle.to_string(),
        })
    }

    pub(crate) fn cluster_id(&self, handle: ClusterHandle) -> Result<&str> {
        if handle.diagram == self.id {
            if let Some(id) = self.cluster_ids.get(handle.index) {
                return Ok(id.as_str());
            }
        }
        Err(Error::UnknownCluster {
            id: handle.to_string(),
        })
    }

    fn cluster_label(&self, handle: ClusterHandle) -> String {
        self.cluster_id(handle)
            .ok()
            .and_then(|id| match self.graph.node(id) {
                Some(Element::Cluster(c)) => Some(format!("`{}`", c.label)),
                _ => None,
            })
            .unwrap_or_else(|| handle.to_string())
    }

    /// Attaches `id` to `parent`, or to the innermost open scope when `parent` is `None`.
    fn attach(&mut self, id: &str, parent: Option<ClusterHandle>) -> Result<()> {
        let Some(parent) = parent.or(self.current_cluster()) else {
            return Ok(());
        };
        let parent_id = self.cluster_id(parent)?.to_string();
        self.graph.set_parent(id, &parent_id)?;
        Ok(())
    }

    /// Creates a node with a generated identity inside the innermost open cluster.
    pub fn create_node(&mut self, label: impl Into<String>, kind: NodeKind) -> Result<NodeHandle> {
        let mut counter = self.next_node;
        let id = self.fresh_id("n", &mut counter);
        self.next_node = counter;
        self.create_node_with_id(id, label, kind)
    }

    /// Creates a node with a caller-chosen identity.
    ///
    /// Fails with [`Error::DuplicateNode`] if `id` already names a node or cluster of this diagram.
    pub fn create_node_with_id(
        &mut self,
        id: impl Into<String>,
        label: impl Into<String>,
        kind: NodeKind,
    ) -> Result<NodeHandle> {
        let id = id.into();
        let label = label.into();
        self.graph.add_node(
            id.clone(),
            Element::Node(NodeData {
                label: label.clone(),
                kind,
            }),
        )?;
        self.attach(&id, None)?;

        let handle = NodeHandle {
            diagram: self.id,
            index: self.node_ids.len(),
        };
        tracing::debug!(diagram = self.id, node = %id, label = %label, kind = %kind, "created node");
        self.node_ids.push(id);
        Ok(handle)
    }

    /// Creates a cluster nested in `parent`, or in the innermost open scope when `parent` is
    /// `None`. The new cluster is not entered.
    pub fn create_cluster(
        &mut self,
        label: impl Into<String>,
        parent: Option<ClusterHandle>,
    ) -> Result<ClusterHandle> {
        if let Some(parent) = parent {
            self.cluster_id(parent)?;
        }
        let label = label.into();
        let mut counter = self.next_cluster;
        let id = self.fresh_id("c", &mut counter);
        self.next_cluster = counter;

        self.graph.add_node(
            id.clone(),
            Element::Cluster(ClusterData {
                label: label.clone(),
            }),
        )?;
        self.attach(&id, parent)?;

        let handle = ClusterHandle {
            diagram: self.id,
            index: self.cluster_ids.len(),
        };
        tracing::debug!(diagram = self.id, cluster = %id, label = %label, "created cluster");
        self.cluster_ids.push(id);
        Ok(handle)
    }

    /// Creates a cluster in the current scope and enters it.
    pub fn open_cluster(&mut self, label: impl Into<String>) -> Result<ClusterHandle> {
        let handle = self.create_cluster(label, None)?;
        self.scopes.push(handle);
        Ok(handle)
    }

    /// Leaves `handle`, which must be the innermost open scope.
    pub fn close_cluster(&mut self, handle: ClusterHandle) -> Result<()> {
        match self.scopes.last().copied() {
            Some(top) if top == handle => {
                self.scopes.pop();
                Ok(())
            }
            innermost => Err(Error::ScopeMismatch {
                closing: self.cluster_label(handle),
                innermost: innermost.map(|h| self.cluster_label(h)),
            }),
        }
    }

    /// Runs `f` inside a new cluster scope and closes the scope afterwards.
    ///
    /// If `f` fails, the scope stack is restored to what it was before the call, so scopes left
    /// open by `f` are discarded along with the new one.
    pub fn cluster<T>(
        &mut self,
        label: impl Into<String>,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        let depth = self.scopes.len();
        let handle = self.open_cluster(label)?;
        match f(self) {
            Ok(value) => {
                self.close_cluster(handle)?;
                Ok(value)
            }
            Err(err) => {
                self.scopes.truncate(depth);
                Err(err)
            }
        }
    }

    /// Records a directed edge `source -> destination`.
    pub fn connect(
        &mut self,
        source: NodeHandle,
        destination: NodeHandle,
        options: EdgeOptions,
    ) -> Result<()> {
        let v = self.node_id(source)?.to_string();
        let w = self.node_id(destination)?.to_string();

        self.next_edge += 1;
        let name = format!("e{}", self.next_edge);
        tracing::debug!(
            diagram = self.id,
            from = %v,
            to = %w,
            label = options.label.as_deref().unwrap_or(""),
            "connected nodes"
        );
        self.graph.set_edge_named(&v, &w, Some(&name), options)?;
        Ok(())
    }

    /// Connects each handle to the next one (`a -> b -> c`). All handles are validated before any
    /// edge is recorded.
    pub fn chain(&mut self, nodes: &[NodeHandle], options: EdgeOptions) -> Result<()> {
        for &n in nodes {
            self.node_id(n)?;
        }
        for pair in nodes.windows(2) {
            self.connect(pair[0], pair[1], options.clone())?;
        }
        Ok(())
    }

    /// Connects `source` to every handle in `destinations`.
    pub fn fan_out(
        &mut self,
        source: NodeHandle,
        destinations: &[NodeHandle],
        options: EdgeOptions,
    ) -> Result<()> {
        self.node_id(source)?;
        for &d in destinations {
            self.node_id(d)?;
        }
        for &d in destinations {
            self.connect(source, d, options.clone())?;
        }
        Ok(())
    }

    /// Closes the builder. Fails if a cluster scope is still open.
    pub fn finish(self) -> Result<Diagram> {
        if let Some(open) = self.current_cluster() {
            return Err(Error::UnclosedScope {
                label: self
                    .cluster_id(open)
                    .ok()
                    .and_then(|id| match self.graph.node(id) {
                        Some(Element::Cluster(c)) => Some(c.label.clone()),
                        _ => None,
                    })
                    .unwrap_or_else(|| open.to_string()),
            });
        }
        tracing::debug!(
            diagram = self.id,
            nodes = self.node_ids.len(),
            clusters = self.cluster_ids.len(),
            edges = self.graph.edge_count(),
            "finished diagram"
        );
        Ok(Diagram {
            id: self.id,
            title: self.title,
            attributes: self.attributes,
            graph: self.graph,
            node_ids: self.node_ids,
            cluster_ids: self.cluster_ids,
        })
    }
}
