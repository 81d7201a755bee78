//! Graphviz DOT serializer.
//!
//! Output is deterministic: attribute blocks first, then the cluster tree in creation order, then
//! every edge at the root scope in creation order. Graphviz decides where an edge is routed, so
//! cross-cluster edges need no special handling here.

use crate::attrs::{self, Attributes, cluster_bg_color};
use crate::diagram::Diagram;
use crate::model::{EdgeStyle, Element};
use std::fmt::{self, Write};

const INDENT: &str = "  ";

/// Quotes `s` as a DOT string literal. Newlines become `\n` line breaks.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}

/// Subgraph name Graphviz treats as a cluster.
pub fn cluster_name(id: &str) -> String {
    format!("cluster_{id}")
}

fn write_attr_list<'a, W: Write>(
    w: &mut W,
    pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> fmt::Result {
    let mut first = true;
    for (k, v) in pairs {
        if first {
            w.write_str(" [")?;
            first = false;
        } else {
            w.write_str(", ")?;
        }
        write!(w, "{k}={}", quote(v))?;
    }
    if !first {
        w.write_str("]")?;
    }
    Ok(())
}

fn pairs(attrs: &Attributes) -> impl Iterator<Item = (&str, &str)> {
    attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
}

fn write_indent<W: Write>(w: &mut W, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        w.write_str(INDENT)?;
    }
    Ok(())
}

fn write_scope<W: Write>(
    w: &mut W,
    diagram: &Diagram,
    members: &[&str],
    depth: usize,
) -> fmt::Result {
    let g = &diagram.graph;
    for &id in members {
        match g.node(id) {
            Some(Element::Node(node)) => {
                let style = node.kind.style();
                write_indent(w, depth)?;
                w.write_str(&quote(id))?;
                write_attr_list(
                    w,
                    [
                        ("label", node.label.as_str()),
                        ("shape", style.shape),
                        ("fillcolor", style.fillcolor),
                        ("color", style.color),
                    ],
                )?;
                w.write_str(";\n")?;
            }
            Some(Element::Cluster(cluster)) => {
                write_indent(w, depth)?;
                writeln!(w, "subgraph {} {{", quote(&cluster_name(id)))?;
                write_indent(w, depth + 1)?;
                w.write_str("graph")?;
                write_attr_list(
                    w,
                    [
                        ("label", cluster.label.as_str()),
                        ("labeljust", "l"),
                        ("pencolor", attrs::CLUSTER_PEN_COLOR),
                        ("style", "rounded"),
                        ("bgcolor", cluster_bg_color(g.depth(id))),
                        ("fontsize", "12"),
                    ],
                )?;
                w.write_str(";\n")?;

                let children = g.children(id);
                write_scope(w, diagram, &children, depth + 1)?;

                write_indent(w, depth)?;
                w.write_str("}\n")?;
            }
            None => {}
        }
    }
    Ok(())
}

impl Diagram {
    pub fn write_dot<W: Write>(&self, w: &mut W) -> fmt::Result {
        writeln!(w, "digraph {} {{", quote(&self.title))?;

        w.write_str(INDENT)?;
        w.write_str("graph")?;
        // A caller-supplied `label` replaces the title.
        let title = (!self.attributes.graph.contains_key("label"))
            .then(|| ("label", self.title.as_str()));
        write_attr_list(
            w,
            title.into_iter().chain(pairs(&self.attributes.graph)),
        )?;
        w.write_str(";\n")?;

        w.write_str(INDENT)?;
        w.write_str("node")?;
        write_attr_list(w, pairs(&self.attributes.node))?;
        w.write_str(";\n")?;

        w.write_str(INDENT)?;
        w.write_str("edge")?;
        write_attr_list(w, pairs(&self.attributes.edge))?;
        w.write_str(";\n\n")?;

        let roots = self.graph.children_root();
        write_scope(w, self, &roots, 1)?;

        if self.edge_count() > 0 {
            w.write_str("\n")?;
        }
        for edge in self.edges() {
            w.write_str(INDENT)?;
            write!(w, "{} -> {}", quote(edge.from), quote(edge.to))?;
            let style = (edge.style != EdgeStyle::Solid).then(|| edge.style.as_str());
            write_attr_list(
                w,
                [
                    edge.label.map(|l| ("label", l)),
                    style.map(|s| ("style", s)),
                    edge.color.map(|c| ("color", c)),
                ]
                .into_iter()
                .flatten(),
            )?;
            w.write_str(";\n")?;
        }

        w.write_str("}\n")
    }

    /// Serializes the diagram to Graphviz DOT source.
    pub fn to_dot(&self) -> String {
        let mut out = String::new();
        // Writing into a `String` cannot fail.
        let _ = self.write_dot(&mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_escapes_quotes_backslashes_and_newlines() {
        assert_eq!(quote("plain"), "\"plain\"");
        assert_eq!(quote("a \"b\""), "\"a \\\"b\\\"\"");
        assert_eq!(quote("C:\\tmp"), "\"C:\\\\tmp\"");
        assert_eq!(quote("Cloud SQL\n(PostgreSQL, HA)"), "\"Cloud SQL\\n(PostgreSQL, HA)\"");
    }

    #[test]
    fn attr_list_is_omitted_when_empty() {
        let mut out = String::new();
        write_attr_list(&mut out, std::iter::empty::<(&str, &str)>()).unwrap();
        assert_eq!(out, "");

        write_attr_list(&mut out, [("a", "1"), ("b", "x y")]).unwrap();
        assert_eq!(out, " [a=\"1\", b=\"x y\"]");
    }
}
