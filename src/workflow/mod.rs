/// Workflow Diagram Layer
///
/// This module handles workflow diagrams from stored payload to interactive editing.
/// It provides:
/// - Type definitions (Workflow, FlowchartData, FlowNode, FlowEdge)
/// - The lossless codec between the stored payload and the typed flowchart
/// - The node/edge graph model and its petgraph analysis view
/// - The diagram editor engine with single-flight saves

// Core workflow type definitions
pub mod types;

// Stored payload <-> typed flowchart
pub mod codec;

// Node/edge working copy with id allocation and placement
pub mod graph;

// Dangling edges, isolated nodes, reachability
pub mod analysis;

// Picker, connect, save
pub mod editor;

// Re-export commonly used types
pub use analysis::FlowGraph;
pub use editor::{DiagramEditor, EdgeCandidate, EditorMode, LoadOutcome, PickerSection, RenderedNode};
pub use graph::DiagramGraph;
pub use types::{EntityType, FlowEdge, FlowNode, FlowchartData, NodeData, Position, Workflow};
