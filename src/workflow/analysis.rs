/// Petgraph view of a flowchart
///
/// Builds a directed graph from the stored node/edge lists so the editor and the CLI can
/// answer structural questions: which edges dangle, which nodes are isolated, what is
/// reachable from a node. Cycles are legal in a workflow diagram and are not rejected.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{Bfs, EdgeRef};
use petgraph::Direction;
use std::collections::HashMap;

use crate::workflow::types::{FlowEdge, FlowchartData};

/// Indexed graph over one flowchart
#[derive(Debug)]
pub struct FlowGraph<'a> {
    /// Node weights are flowchart node ids, edge weights are flowchart edges
    graph: DiGraph<&'a str, &'a FlowEdge>,
    /// Mapping from node ID to graph node index
    node_id_to_index: HashMap<&'a str, NodeIndex>,
    /// Edges whose source or target is not a node of this flowchart
    dangling: Vec<&'a FlowEdge>,
}

impl<'a> FlowGraph<'a> {
    /// Build the graph, setting aside edges with a missing endpoint
    pub fn build(flowchart: &'a FlowchartData) -> Self {
        let mut graph = DiGraph::new();
        let mut node_id_to_index = HashMap::new();
        let mut dangling = Vec::new();

        for node in &flowchart.nodes {
            let index = graph.add_node(node.id.as_str());
            node_id_to_index.insert(node.id.as_str(), index);
        }

        for edge in &flowchart.edges {
            let from = node_id_to_index.get(edge.source.as_str());
            let to = node_id_to_index.get(edge.target.as_str());
            match (from, to) {
                (Some(&from), Some(&to)) => {
                    graph.add_edge(from, to, edge);
                }
                _ => dangling.push(edge),
            }
        }

        if !dangling.is_empty() {
            tracing::debug!("⚠️ Flowchart has {} dangling edge(s)", dangling.len());
        }

        Self { graph, node_id_to_index, dangling }
    }

    /// Edges that point at a node no longer in the flowchart
    pub fn dangling_edges(&self) -> &[&'a FlowEdge] {
        &self.dangling
    }

    /// Nodes with no resolvable edge in either direction
    pub fn isolated_nodes(&self) -> Vec<&'a str> {
        self.graph
            .node_indices()
            .filter(|&idx| {
                self.graph.edges_directed(idx, Direction::Incoming).next().is_none()
                    && self.graph.edges_directed(idx, Direction::Outgoing).next().is_none()
            })
            .map(|idx| self.graph[idx])
            .collect()
    }

    /// Every edge that starts or ends at `node_id`, dangling edges included
    pub fn incident_edges(&self, node_id: &str) -> Vec<&'a FlowEdge> {
        let mut incident: Vec<&'a FlowEdge> = match self.node_id_to_index.get(node_id) {
            Some(&idx) => {
                let mut edges: Vec<_> = self
                    .graph
                    .edges_directed(idx, Direction::Outgoing)
                    .chain(self.graph.edges_directed(idx, Direction::Incoming))
                    .map(|e| *e.weight())
                    .collect();
                // A self-loop shows up in both directions
                edges.sort_by(|a, b| a.id.cmp(&b.id));
                edges.dedup_by(|a, b| a.id == b.id);
                edges
            }
            None => Vec::new(),
        };
        incident.extend(
            self.dangling
                .iter()
                .copied()
                .filter(|e| e.source == node_id || e.target == node_id),
        );
        incident
    }

    /// Node ids reachable from `node_id` by following edges forward, including itself
    pub fn reachable_from(&self, node_id: &str) -> Vec<&'a str> {
        let Some(&start) = self.node_id_to_index.get(node_id) else {
            return Vec::new();
        };

        let mut reachable = Vec::new();
        let mut bfs = Bfs::new(&self.graph, start);
        while let Some(idx) = bfs.next(&self.graph) {
            reachable.push(self.graph[idx]);
        }
        reachable
    }
}
