//! Graphviz attribute sets carried by a diagram.

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Ordered `key -> value` map. Order is preserved so serialized output is stable.
pub type Attributes = IndexMap<String, String>;

pub const DEFAULT_FONT: &str = "Sans-Serif";
pub const DEFAULT_FONT_COLOR: &str = "#2D3436";
pub const DEFAULT_EDGE_COLOR: &str = "#7B8894";
pub const CLUSTER_PEN_COLOR: &str = "#AEB6BE";

/// Cluster background colors, indexed by nesting depth (wrapping).
pub const CLUSTER_BG_COLORS: [&str; 4] = ["#E5F5FD", "#EBF3E7", "#ECE8F6", "#FDF7E3"];

pub fn cluster_bg_color(depth: usize) -> &'static str {
    CLUSTER_BG_COLORS[depth % CLUSTER_BG_COLORS.len()]
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Direction {
    #[default]
    TB,
    BT,
    LR,
    RL,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TB => "TB",
            Self::BT => "BT",
            Self::LR => "LR",
            Self::RL => "RL",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TB" | "TD" => Ok(Self::TB),
            "BT" => Ok(Self::BT),
            "LR" => Ok(Self::LR),
            "RL" => Ok(Self::RL),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphAttributes {
    pub graph: Attributes,
    pub node: Attributes,
    pub edge: Attributes,
}

fn attrs<const N: usize>(pairs: [(&str, &str); N]) -> Attributes {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

impl Default for GraphAttributes {
    fn default() -> Self {
        Self {
            graph: attrs([
                ("pad", "2.0"),
                ("splines", "ortho"),
                ("nodesep", "0.60"),
                ("ranksep", "0.75"),
                ("fontname", DEFAULT_FONT),
                ("fontsize", "15"),
                ("fontcolor", DEFAULT_FONT_COLOR),
                ("rankdir", Direction::TB.as_str()),
            ]),
            node: attrs([
                ("shape", "box"),
                ("style", "rounded,filled"),
                ("fontname", DEFAULT_FONT),
                ("fontsize", "13"),
                ("fontcolor", DEFAULT_FONT_COLOR),
                ("margin", "0.2,0.1"),
            ]),
            edge: attrs([
                ("color", DEFAULT_EDGE_COLOR),
                ("fontname", DEFAULT_FONT),
                ("fontsize", "12"),
                ("fontcolor", DEFAULT_FONT_COLOR),
            ]),
        }
    }
}

impl GraphAttributes {
    pub fn direction(&self) -> Direction {
        self.graph
            .get("rankdir")
            .and_then(|v| v.parse().ok())
            .unwrap_or_default()
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.graph
            .insert("rankdir".to_string(), direction.as_str().to_string());
    }
}
