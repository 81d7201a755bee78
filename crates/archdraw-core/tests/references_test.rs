use archdraw_core::{DiagramBuilder, EdgeOptions, Error, NodeKind};

#[test]
fn handle_from_another_builder_fails_before_anything_is_rendered() {
    let mut other = DiagramBuilder::new("Other");
    let stray = other.create_node("Stray", NodeKind::Blank).unwrap();

    let mut b = DiagramBuilder::new("Main");
    let a = b.create_node("A", NodeKind::Blank).unwrap();
    assert!(matches!(
        b.connect(a, stray, EdgeOptions::labeled("X")),
        Err(Error::UnknownNode { .. })
    ));

    let d = b.finish().unwrap();
    assert_eq!(d.edge_count(), 0);
    assert!(!d.to_dot().contains("->"));
}

#[test]
fn cluster_members_include_nested_nodes_in_tree_order() {
    let mut b = DiagramBuilder::new("Members");
    let outer = b.open_cluster("Outer").unwrap();
    b.create_node("first", NodeKind::Vpc).unwrap();
    let inner = b.open_cluster("Inner").unwrap();
    b.create_node("nested", NodeKind::Deployment).unwrap();
    b.close_cluster(inner).unwrap();
    b.create_node("last", NodeKind::Sql).unwrap();
    b.close_cluster(outer).unwrap();
    b.create_node("outside", NodeKind::Mobile).unwrap();
    let d = b.finish().unwrap();

    let labels: Vec<_> = d.cluster_members(outer).iter().map(|n| n.label).collect();
    assert_eq!(labels, ["first", "nested", "last"]);
    let labels: Vec<_> = d.cluster_members(inner).iter().map(|n| n.label).collect();
    assert_eq!(labels, ["nested"]);
}

#[test]
fn errors_render_readable_messages() {
    let mut b = DiagramBuilder::new("Messages");
    b.open_cluster("Still Open").unwrap();
    let err = b.finish().unwrap_err();
    assert_eq!(err.to_string(), "cluster `Still Open` is still open");

    let mut b = DiagramBuilder::new("Messages");
    let c = b.create_cluster("Never Opened", None).unwrap();
    let err = b.close_cluster(c).unwrap_err();
    assert_eq!(
        err.to_string(),
        "cannot close cluster `Never Opened`: the innermost open cluster is <none>"
    );
}
