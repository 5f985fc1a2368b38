use pretty_assertions::assert_eq;
use reqflow::config::CanvasConfig;
use reqflow::error::GraphError;
use reqflow::workflow::codec;
use reqflow::workflow::{DiagramGraph, EntityType, FlowGraph, FlowchartData};
use serde_json::json;
use std::collections::HashSet;

fn graph_of(labels: &[(EntityType, i64, &str)]) -> (DiagramGraph, Vec<String>) {
    let mut graph = DiagramGraph::new(CanvasConfig::default());
    let ids = labels
        .iter()
        .map(|(entity_type, id, label)| graph.add_node(*entity_type, *id, *label).id.clone())
        .collect();
    (graph, ids)
}

#[test]
fn connect_between_any_existing_nodes_adds_exactly_one_edge() {
    let (mut graph, ids) = graph_of(&[
        (EntityType::User, 1, "Admin"),
        (EntityType::Page, 2, "Dashboard"),
        (EntityType::Functionality, 3, "Export"),
    ]);

    let mut expected = 0;
    for source in &ids {
        for target in &ids {
            let edge = graph.connect(source, target, None).unwrap().clone();
            expected += 1;

            assert_eq!(graph.edges().len(), expected);
            assert_eq!(&edge.source, source);
            assert_eq!(&edge.target, target);
            assert_eq!(graph.edges().last(), Some(&edge));
        }
    }

    let edge_ids: HashSet<_> = graph.edges().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(edge_ids.len(), graph.edges().len());
}

#[test]
fn connect_with_an_unknown_endpoint_changes_nothing() {
    let (mut graph, ids) = graph_of(&[(EntityType::User, 1, "Admin"), (EntityType::Page, 2, "Dashboard")]);
    graph.connect(&ids[0], &ids[1], None).unwrap();
    let before = graph.flowchart().clone();

    for (source, target) in [(ids[0].as_str(), "missing"), ("missing", ids[1].as_str()), ("a", "b")] {
        let err = graph.connect(source, target, Some("label".into())).unwrap_err();
        assert!(matches!(err, GraphError::InvalidReference { .. }));
        assert_eq!(graph.flowchart(), &before);
    }
}

#[test]
fn ten_thousand_added_nodes_have_distinct_ids() {
    let mut graph = DiagramGraph::new(CanvasConfig::default());
    for n in 0..10_000 {
        // Few distinct entities, so ids differ only by timestamp and sequence
        graph.add_node(EntityType::User, n % 3, "Admin");
    }

    let ids: HashSet<_> = graph.nodes().iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids.len(), 10_000);
}

#[test]
fn added_nodes_never_reuse_ids_loaded_from_storage() {
    let stored = codec::decode(Some(&json!({
        "nodes": [
            {"id": "user-1-0-0", "position": {"x": 0, "y": 0}, "data": {"label": "Admin"}},
            {"id": "node_7", "type": "input", "position": {"x": 10, "y": 10}, "data": {"label": "Start"}}
        ],
        "edges": []
    })))
    .unwrap();
    let mut graph = DiagramGraph::from_flowchart(stored, CanvasConfig::default());

    for _ in 0..50 {
        graph.add_node(EntityType::User, 1, "Admin");
    }

    let ids: HashSet<_> = graph.nodes().iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids.len(), 52);
    assert_eq!(graph.nodes()[1].node_type(), Some("input"));
}

#[test]
fn edited_graph_round_trips_with_unknown_keys_intact() {
    let stored = json!({
        "nodes": [{
            "id": "page-4-1700000000000",
            "type": "default",
            "position": {"x": 120.5, "y": 80},
            "data": {"label": "Checkout", "entityType": "page", "entityId": 4, "icon": "cart"},
            "width": 150,
            "selected": false
        }],
        "edges": [],
        "viewport": {"x": 0, "y": 0, "zoom": 1.25}
    });
    let mut graph = DiagramGraph::from_flowchart(codec::decode(Some(&stored)).unwrap(), CanvasConfig::default());
    let added = graph.add_node(EntityType::Functionality, 9, "Pay").id.clone();
    graph.connect("page-4-1700000000000", &added, Some("submits".into())).unwrap();

    let encoded = codec::encode(graph.flowchart()).unwrap();
    let decoded = codec::decode(Some(&encoded)).unwrap();
    assert_eq!(&decoded, graph.flowchart());

    assert_eq!(encoded["viewport"], json!({"x": 0, "y": 0, "zoom": 1.25}));
    assert_eq!(encoded["nodes"][0]["width"], json!(150));
    assert_eq!(encoded["nodes"][0]["data"]["icon"], json!("cart"));
    assert_eq!(encoded["edges"][0]["label"], json!("submits"));
}

#[test]
fn removing_a_node_keeps_its_edges_dangling() {
    let (mut graph, ids) = graph_of(&[(EntityType::User, 1, "Admin"), (EntityType::Page, 2, "Dashboard")]);
    let edge = graph.connect(&ids[0], &ids[1], None).unwrap().clone();

    graph.remove_node(&ids[0]).unwrap();

    assert_eq!(graph.nodes().len(), 1);
    assert_eq!(graph.nodes()[0].id, ids[1]);
    assert_eq!(graph.edges(), &[edge.clone()]);

    let analysis = FlowGraph::build(graph.flowchart());
    assert_eq!(analysis.dangling_edges(), &[&edge]);
}

#[test]
fn absent_flowchart_opens_as_an_empty_graph() {
    assert_eq!(codec::decode(None).unwrap(), FlowchartData::default());
    assert_eq!(codec::decode(Some(&serde_json::Value::Null)).unwrap(), FlowchartData::default());
    assert_eq!(codec::decode(Some(&json!({}))).unwrap(), FlowchartData::default());
}
