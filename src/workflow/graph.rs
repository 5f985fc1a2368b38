/// Diagram graph model
///
/// In-memory working copy of a workflow's flowchart. Nodes and edges keep insertion
/// order (display order on the canvas). Edge endpoints are checked when an edge is
/// created and never again: removing a node leaves its edges in place.

use rand::Rng;
use serde_json::{json, Map, Value};
use std::collections::HashSet;
use uuid::Uuid;

use crate::config::CanvasConfig;
use crate::error::GraphError;
use crate::project::types::EntityId;
use crate::workflow::types::{EntityType, FlowEdge, FlowNode, FlowchartData, NodeData, Position};

/// Canvas node type assigned to nodes created by the editor
pub const DEFAULT_NODE_TYPE: &str = "default";

/// Placement attempts before falling back to a deterministic nudge
const PLACEMENT_ATTEMPTS: usize = 32;

/// Mutable node/edge graph with collision-free id allocation
#[derive(Debug, Clone)]
pub struct DiagramGraph {
    flowchart: FlowchartData,
    canvas: CanvasConfig,
    /// Monotonic suffix for node ids, never reused within this graph
    next_seq: u64,
}

impl DiagramGraph {
    pub fn new(canvas: CanvasConfig) -> Self {
        Self::from_flowchart(FlowchartData::default(), canvas)
    }

    pub fn from_flowchart(flowchart: FlowchartData, canvas: CanvasConfig) -> Self {
        Self { flowchart, canvas, next_seq: 0 }
    }

    pub fn canvas(&self) -> CanvasConfig {
        self.canvas
    }

    pub fn flowchart(&self) -> &FlowchartData {
        &self.flowchart
    }

    pub fn into_flowchart(self) -> FlowchartData {
        self.flowchart
    }

    pub fn nodes(&self) -> &[FlowNode] {
        &self.flowchart.nodes
    }

    pub fn edges(&self) -> &[FlowEdge] {
        &self.flowchart.edges
    }

    pub fn node(&self, id: &str) -> Option<&FlowNode> {
        self.flowchart.node(id)
    }

    pub fn edge(&self, id: &str) -> Option<&FlowEdge> {
        self.flowchart.edge(id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.flowchart.contains_node(id)
    }

    /// Append a node bound to a project entity
    ///
    /// The id combines entity type, entity id, a millisecond timestamp and a per-graph
    /// sequence number; ids already present (e.g. loaded from storage) are skipped.
    pub fn add_node(&mut self, entity_type: EntityType, entity_id: EntityId, label: impl Into<String>) -> &FlowNode {
        let id = self.fresh_node_id(entity_type, entity_id);
        let position = self.free_position();

        tracing::debug!("➕ Adding node '{}' at ({:.1}, {:.1})", id, position.x, position.y);

        let mut extra = Map::new();
        extra.insert("style".to_string(), node_style(entity_type));

        self.flowchart.nodes.push(FlowNode {
            id,
            node_type: Some(Some(DEFAULT_NODE_TYPE.to_string())),
            position,
            data: NodeData::bound(entity_type, entity_id, label),
            extra,
        });

        let last = self.flowchart.nodes.len() - 1;
        &self.flowchart.nodes[last]
    }

    /// Append a directed edge between two existing nodes
    ///
    /// Self-loops and parallel edges are allowed; each edge gets its own id.
    pub fn connect(&mut self, source: &str, target: &str, label: Option<String>) -> Result<&FlowEdge, GraphError> {
        for endpoint in [source, target] {
            if !self.contains_node(endpoint) {
                return Err(GraphError::InvalidReference { id: endpoint.to_string() });
            }
        }

        let id = self.fresh_edge_id();
        tracing::debug!("🔗 Connecting '{}' → '{}' as '{}'", source, target, id);

        self.flowchart.edges.push(FlowEdge {
            id,
            source: source.to_string(),
            target: target.to_string(),
            label: label.map(Some),
            extra: Map::new(),
        });

        let last = self.flowchart.edges.len() - 1;
        Ok(&self.flowchart.edges[last])
    }

    /// Remove a node, leaving any edges that reference it untouched
    pub fn remove_node(&mut self, id: &str) -> Option<FlowNode> {
        let index = self.flowchart.nodes.iter().position(|n| n.id == id)?;
        Some(self.flowchart.nodes.remove(index))
    }

    /// Remove a node together with every edge that starts or ends at it
    pub fn remove_node_with_edges(&mut self, id: &str) -> Option<(FlowNode, Vec<FlowEdge>)> {
        let node = self.remove_node(id)?;
        let (incident, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.flowchart.edges)
            .into_iter()
            .partition(|e| e.source == id || e.target == id);
        self.flowchart.edges = kept;
        Some((node, incident))
    }

    pub fn remove_edge(&mut self, id: &str) -> Option<FlowEdge> {
        let index = self.flowchart.edges.iter().position(|e| e.id == id)?;
        Some(self.flowchart.edges.remove(index))
    }

    /// Reposition a node; unknown ids are ignored
    pub fn move_node(&mut self, id: &str, position: Position) -> bool {
        match self.flowchart.nodes.iter_mut().find(|n| n.id == id) {
            Some(node) => {
                node.position = position;
                true
            }
            None => false,
        }
    }

    fn fresh_node_id(&mut self, entity_type: EntityType, entity_id: EntityId) -> String {
        let millis = chrono::Utc::now().timestamp_millis();
        loop {
            let seq = self.next_seq;
            self.next_seq += 1;
            let candidate = format!("{entity_type}-{entity_id}-{millis}-{seq}");
            if !self.contains_node(&candidate) {
                return candidate;
            }
        }
    }

    fn fresh_edge_id(&self) -> String {
        loop {
            let candidate = format!("edge-{}", Uuid::new_v4());
            if self.edge(&candidate).is_none() {
                return candidate;
            }
        }
    }

    /// Random spot inside the canvas region that no existing node sits on exactly
    fn free_position(&self) -> Position {
        let taken: HashSet<(u64, u64)> = self
            .flowchart
            .nodes
            .iter()
            .map(|n| (n.position.x.to_bits(), n.position.y.to_bits()))
            .collect();
        let is_free = |p: &Position| !taken.contains(&(p.x.to_bits(), p.y.to_bits()));

        let mut rng = rand::rng();
        let (width, height) = self.canvas.extent();
        for _ in 0..PLACEMENT_ATTEMPTS {
            let candidate = Position::new(rng.random_range(0.0..width), rng.random_range(0.0..height));
            if is_free(&candidate) {
                return candidate;
            }
        }

        // Degenerate canvas: step diagonally until clear
        let mut candidate = Position::new(0.0, 0.0);
        while !is_free(&candidate) {
            candidate.x += 1.0;
            candidate.y += 1.0;
        }
        candidate
    }
}

/// Canvas style written into new nodes, colored by entity type
fn node_style(entity_type: EntityType) -> Value {
    json!({
        "background": entity_type.accent_color(),
        "color": "white",
        "border": "2px solid #fff",
        "borderRadius": "8px",
        "padding": "10px",
        "fontSize": "14px",
        "fontWeight": 600,
    })
}
