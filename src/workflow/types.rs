/// Core workflow type definitions
///
/// Defines the workflow record and the node/edge flowchart payload it owns. The payload
/// layout is the storage contract shared with the requirements API:
/// `{ nodes: [{id, type, position: {x, y}, data: {label, entityType?, entityId?, ...}}],
///    edges: [{id, source, target, label?}] }`.
/// Keys the client does not know about are kept in `extra` maps so nothing is lost
/// between load and save. Optional known keys are `Option<Option<_>>`: the outer layer
/// records whether the key was present, the inner one whether it was `null`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::project::types::EntityId;

/// A named diagram of interactions between users, pages and functionalities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    pub id: EntityId,
    pub project_id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Stored flowchart, kept opaque until the codec decodes it
    #[serde(default)]
    pub flowchart_data: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Node/edge graph owned by one workflow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FlowchartData {
    #[serde(default)]
    pub nodes: Vec<FlowNode>,
    #[serde(default)]
    pub edges: Vec<FlowEdge>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FlowchartData {
    pub fn node(&self, id: &str) -> Option<&FlowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge(&self, id: &str) -> Option<&FlowEdge> {
        self.edges.iter().find(|e| e.id == id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }
}

/// A diagram node, optionally bound to a project entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowNode {
    /// Unique within one flowchart
    pub id: String,
    /// Canvas node type (new nodes use "default")
    #[serde(
        rename = "type",
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub node_type: Option<Option<String>>,
    pub position: Position,
    pub data: NodeData,
    /// Canvas-specific keys such as `style`, `width` or `selected`
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FlowNode {
    pub fn node_type(&self) -> Option<&str> {
        self.node_type.as_ref()?.as_deref()
    }
}

/// Free-form canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Node payload: typed fields over an open mapping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub label: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub entity_type: Option<Option<EntityType>>,
    /// Weak reference into the project; may dangle after the entity is deleted
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub entity_id: Option<Option<EntityId>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NodeData {
    /// Data of a node bound to a project entity
    pub fn bound(entity_type: EntityType, entity_id: EntityId, label: impl Into<String>) -> Self {
        Self {
            label: Some(Some(label.into())),
            entity_type: Some(Some(entity_type)),
            entity_id: Some(Some(entity_id)),
            extra: Map::new(),
        }
    }

    /// Stored label; empty when absent or null
    pub fn label(&self) -> &str {
        self.label.as_ref().and_then(|l| l.as_deref()).unwrap_or_default()
    }

    pub fn entity_type(&self) -> Option<EntityType> {
        self.entity_type.flatten()
    }

    pub fn entity_id(&self) -> Option<EntityId> {
        self.entity_id.flatten()
    }

    /// Referenced entity, when both halves of the reference are set
    pub fn entity(&self) -> Option<(EntityType, EntityId)> {
        self.entity_type().zip(self.entity_id())
    }
}

/// Directed link between two nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowEdge {
    /// Unique within one flowchart
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub label: Option<Option<String>>,
    /// Canvas-specific keys such as `sourceHandle` or `animated`
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FlowEdge {
    pub fn label(&self) -> Option<&str> {
        self.label.as_ref()?.as_deref()
    }
}

/// Kind of project entity a node can reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    User,
    Page,
    Functionality,
}

impl EntityType {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityType::User => "user",
            EntityType::Page => "page",
            EntityType::Functionality => "functionality",
        }
    }

    /// Background color used for nodes of this kind
    pub fn accent_color(self) -> &'static str {
        match self {
            EntityType::User => "#0ea5e9",
            EntityType::Page => "#10b981",
            EntityType::Functionality => "#a855f7",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
