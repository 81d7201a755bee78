use crate::*;
use serde_json::json;

#[test]
fn json_snapshot_lists_clusters_nodes_and_edges() {
    let mut b = DiagramBuilder::new("Snapshot");
    let user = b.create_node("End Users", NodeKind::Mobile).unwrap();
    let dns = b
        .cluster("Public Ingress", |b| b.create_node("Cloud DNS", NodeKind::Dns))
        .unwrap();
    b.connect(user, dns, EdgeOptions::default()).unwrap();
    let d = b.finish().unwrap();

    let value = d.to_json_value().unwrap();
    assert_eq!(value["title"], json!("Snapshot"));
    assert_eq!(value["direction"], json!("TB"));
    assert_eq!(
        value["clusters"],
        json!([{ "id": "c1", "label": "Public Ingress", "parent": null, "depth": 0 }])
    );
    assert_eq!(
        value["nodes"],
        json!([
            { "id": "n1", "label": "End Users", "kind": "generic.device.mobile", "cluster": null },
            { "id": "n2", "label": "Cloud DNS", "kind": "gcp.network.dns", "cluster": "c1" }
        ])
    );
    assert_eq!(
        value["edges"],
        json!([{ "from": "n1", "to": "n2", "label": null, "style": "solid", "color": null }])
    );
    assert_eq!(value["attributes"]["graph"]["rankdir"], json!("TB"));
}

#[test]
fn identical_builder_calls_yield_identical_snapshots() {
    let build = || {
        let mut b = DiagramBuilder::new("Repeat");
        let a = b.create_node("A", NodeKind::Git).unwrap();
        let c = b.create_node("B", NodeKind::Build).unwrap();
        b.connect(a, c, EdgeOptions::labeled("push")).unwrap();
        b.finish().unwrap().to_json_string(false).unwrap()
    };
    assert_eq!(build(), build());
}
