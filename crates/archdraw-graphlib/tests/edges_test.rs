use archdraw_graphlib::{Graph, GraphError, GraphOptions};

#[test]
fn add_node_rejects_duplicates() {
    let mut g: Graph<&str, ()> = Graph::new(GraphOptions::default());
    g.add_node("a", "first").unwrap();
    assert_eq!(
        g.add_node("a", "second").unwrap_err(),
        GraphError::DuplicateNode {
            id: "a".to_string()
        }
    );
    assert_eq!(g.node("a"), Some(&"first"));
    assert_eq!(g.node_count(), 1);
}

#[test]
fn set_edge_requires_both_endpoints() {
    let mut g: Graph<(), ()> = Graph::new(GraphOptions::default());
    g.add_node("a", ()).unwrap();

    assert_eq!(
        g.set_edge_named("a", "b", None, ()).unwrap_err(),
        GraphError::MissingNode {
            id: "b".to_string()
        }
    );
    assert_eq!(g.edge_count(), 0);
    assert!(!g.has_node("b"));
}

#[test]
fn simple_graph_relabels_repeated_edges() {
    let mut g: Graph<(), i32> = Graph::new(GraphOptions::default());
    g.add_node("a", ()).unwrap();
    g.add_node("b", ()).unwrap();

    g.set_edge_named("a", "b", Some("x"), 1).unwrap();
    g.set_edge_named("a", "b", Some("y"), 2).unwrap();

    let edges: Vec<_> = g.edge_entries().collect();
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].0.name, None);
    assert_eq!(*edges[0].1, 2);
}

#[test]
fn multigraph_keeps_parallel_edges_in_insertion_order() {
    let mut g: Graph<(), &str> = Graph::new(GraphOptions { multigraph: true });
    g.add_node("a", ()).unwrap();
    g.add_node("b", ()).unwrap();

    g.set_edge_named("a", "b", Some("e1"), "first").unwrap();
    g.set_edge_named("a", "b", Some("e2"), "second").unwrap();
    g.set_edge_named("b", "a", Some("e3"), "back").unwrap();
    g.set_edge_named("a", "b", Some("e2"), "relabeled").unwrap();

    assert_eq!(g.edge_count(), 3);
    let edges: Vec<(&str, &str, Option<&str>, &str)> = g
        .edge_entries()
        .map(|(k, l)| (k.v.as_str(), k.w.as_str(), k.name.as_deref(), *l))
        .collect();
    assert_eq!(
        edges,
        vec![
            ("a", "b", Some("e1"), "first"),
            ("a", "b", Some("e2"), "relabeled"),
            ("b", "a", Some("e3"), "back"),
        ]
    );
}
