//! The core `Graph` container.
//!
//! The graph is always directed and compound. Multigraph support is opt-in through
//! [`GraphOptions::multigraph`]; without it, edge names are ignored and a second
//! `set_edge_named` between the same pair of nodes replaces the label of the first.

mod edge_key;
mod entries;

pub use edge_key::EdgeKey;

use crate::{GraphError, Result};
use edge_key::EdgeKeyView;
use entries::{EdgeEntry, NodeEntry};
use rustc_hash::FxBuildHasher;

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

#[derive(Debug, Clone, Copy, Default)]
pub struct GraphOptions {
    pub multigraph: bool,
}

#[derive(Debug, Clone)]
pub struct Graph<N, E> {
    options: GraphOptions,

    nodes: Vec<NodeEntry<N>>,
    node_index: HashMap<String, usize>,

    edges: Vec<EdgeEntry<E>>,
    edge_index: HashMap<EdgeKey, usize>,

    parent: HashMap<String, String>,
    children: HashMap<String, Vec<String>>,
}

impl<N, E> Graph<N, E> {
    pub fn new(options: GraphOptions) -> Self {
        Self {
            options,
            nodes: Vec::new(),
            node_index: HashMap::default(),
            edges: Vec::new(),
            edge_index: HashMap::default(),
            parent: HashMap::default(),
            children: HashMap::default(),
        }
    }

    fn edge_key_view<'a>(&self, v: &'a str, w: &'a str, name: Option<&'a str>) -> EdgeKeyView<'a> {
        let name = if self.options.multigraph { name } else { None };
        EdgeKeyView { v, w, name }
    }

    fn require_node(&self, id: &str) -> Result<()> {
        if self.has_node(id) {
            Ok(())
        } else {
            Err(GraphError::MissingNode { id: id.to_string() })
        }
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    /// Inserts a node, failing if the id is already taken.
    pub fn add_node(&mut self, id: impl Into<String>, label: N) -> Result<&mut Self> {
        let id = id.into();
        if self.node_index.contains_key(&id) {
            return Err(GraphError::DuplicateNode { id });
        }
        let idx = self.nodes.len();
        self.nodes.push(NodeEntry {
            id: id.clone(),
            label,
        });
        self.node_index.insert(id, idx);
        Ok(self)
    }

    pub fn node(&self, id: &str) -> Option<&N> {
        self.node_index.get(id).map(|&idx| &self.nodes[idx].label)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Nodes in insertion order.
    pub fn node_entries(&self) -> impl Iterator<Item = (&str, &N)> {
        self.nodes.iter().map(|n| (n.id.as_str(), &n.label))
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Edges in insertion order.
    pub fn edge_entries(&self) -> impl Iterator<Item = (&EdgeKey, &E)> {
        self.edges.iter().map(|e| (&e.key, &e.label))
    }

    /// Inserts or relabels the edge `v -> w` (named `name` in multigraphs).
    ///
    /// Both endpoints must already exist; edges never create nodes implicitly.
    pub fn set_edge_named(
        &mut self,
        v: &str,
        w: &str,
        name: Option<&str>,
        label: E,
    ) -> Result<&mut Self> {
        self.require_node(v)?;
        self.require_node(w)?;

        let view = self.edge_key_view(v, w, name);
        if let Some(&idx) = self.edge_index.get(&view) {
            self.edges[idx].label = label;
            return Ok(self);
        }

        let key = EdgeKey::new(view.v, view.w, view.name);
        let idx = self.edges.len();
        self.edges.push(EdgeEntry {
            key: key.clone(),
            label,
        });
        self.edge_index.insert(key, idx);
        Ok(self)
    }

    /// Makes `parent` the compound parent of `child`, moving `child` if it already had one.
    ///
    /// Fails if either node is missing or if `child` is `parent` or one of its ancestors.
    pub fn set_parent(&mut self, child: &str, parent: &str) -> Result<&mut Self> {
        self.require_node(child)?;
        self.require_node(parent)?;

        if child == parent || self.ancestors(parent).contains(&child) {
            return Err(GraphError::ParentCycle {
                child: child.to_string(),
                parent: parent.to_string(),
            });
        }

        if let Some(prev) = self.parent.insert(child.to_string(), parent.to_string()) {
            if let Some(ch) = self.children.get_mut(&prev) {
                ch.retain(|c| c != child);
            }
        }
        let entry = self.children.entry(parent.to_string()).or_default();
        if !entry.iter().any(|c| c == child) {
            entry.push(child.to_string());
        }
        Ok(self)
    }

    pub fn parent(&self, child: &str) -> Option<&str> {
        self.parent.get(child).map(|s| s.as_str())
    }

    /// Direct children of `parent` in the order they were attached.
    pub fn children(&self, parent: &str) -> Vec<&str> {
        self.children
            .get(parent)
            .map(|v| v.iter().map(|s| s.as_str()).collect::<Vec<_>>())
            .unwrap_or_default()
    }

    /// Nodes without a compound parent, in insertion order.
    pub fn children_root(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .filter(|n| !self.parent.contains_key(&n.id))
            .map(|n| n.id.as_str())
            .collect()
    }

    /// Parent chain of `v`, nearest first.
    pub fn ancestors(&self, v: &str) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        let mut cur = self.parent(v);
        while let Some(p) = cur {
            // The parent map is a tree by construction; the length guard only protects against
            // a corrupted map.
            if out.len() > self.nodes.len() {
                break;
            }
            out.push(p);
            cur = self.parent(p);
        }
        out
    }

    pub fn depth(&self, v: &str) -> usize {
        self.ancestors(v).len()
    }
}
