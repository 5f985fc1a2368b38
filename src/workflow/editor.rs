/// Diagram editor engine
///
/// Owns the working copy of one workflow's flowchart plus the project entities its
/// nodes can reference. The editor is either viewing the diagram or has the node picker
/// open; saving runs alongside either mode. At most one save is in flight per editor,
/// and a successful save swaps the persisted baseline atomically.

use arc_swap::ArcSwap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::api::payloads::WorkflowUpdate;
use crate::api::RequirementsApi;
use crate::config::Config;
use crate::error::{ApiError, CodecError, EditorError};
use crate::project::store::ProjectEntities;
use crate::project::types::EntityId;
use crate::workflow::codec;
use crate::workflow::graph::DiagramGraph;
use crate::workflow::types::{EntityType, FlowEdge, FlowNode, FlowchartData, Position, Workflow};

/// Interaction mode of the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    /// Diagram shown, no panel open
    Viewing,
    /// Node picker open, listing the project's entities
    AddingNode,
}

/// Edge proposed by a drag-to-connect gesture
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeCandidate {
    pub source: String,
    pub target: String,
    pub label: Option<String>,
}

impl EdgeCandidate {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self { source: source.into(), target: target.into(), label: None }
    }
}

/// One pickable entity
#[derive(Debug, Clone, PartialEq)]
pub struct PickerEntry {
    pub entity_type: EntityType,
    pub entity_id: EntityId,
    pub label: String,
}

/// Picker entries of one entity type; empty sections are never produced
#[derive(Debug, Clone, PartialEq)]
pub struct PickerSection {
    pub entity_type: EntityType,
    pub entries: Vec<PickerEntry>,
}

/// Display form of a node
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedNode<'a> {
    pub id: &'a str,
    /// Referenced entity's current name, or the stored label when unresolved
    pub label: &'a str,
    pub position: Position,
    pub color: Option<&'static str>,
    /// The node references an entity that no longer exists
    pub dangling: bool,
}

/// How an entity load ended
#[derive(Debug)]
pub enum LoadOutcome {
    Complete,
    /// Some lists are empty or partial; the error says why
    Partial(ApiError),
}

/// Interactive editor for one workflow diagram
#[derive(Debug)]
pub struct DiagramEditor {
    workflow_id: EntityId,
    project_id: EntityId,
    /// Working copy, mutated by every edit
    graph: DiagramGraph,
    /// Last persisted flowchart
    baseline: ArcSwap<FlowchartData>,
    entities: ProjectEntities,
    entities_complete: bool,
    mode: EditorMode,
    /// Set while a save is in flight
    saving: AtomicBool,
    fetch_concurrency: usize,
}

impl DiagramEditor {
    /// Open the stored flowchart of `workflow`
    pub fn open(workflow: &Workflow, config: &Config) -> Result<Self, CodecError> {
        let flowchart = codec::decode(workflow.flowchart_data.as_ref())?;

        tracing::info!(
            "📊 Opened workflow {} ('{}') with {} nodes and {} edges",
            workflow.id,
            workflow.name,
            flowchart.nodes.len(),
            flowchart.edges.len()
        );

        Ok(Self {
            workflow_id: workflow.id,
            project_id: workflow.project_id,
            baseline: ArcSwap::from_pointee(flowchart.clone()),
            graph: DiagramGraph::from_flowchart(flowchart, config.canvas),
            entities: ProjectEntities::default(),
            entities_complete: false,
            mode: EditorMode::Viewing,
            saving: AtomicBool::new(false),
            fetch_concurrency: config.api.fetch_concurrency,
        })
    }

    /// Replace the working copy with a freshly fetched workflow record
    pub fn reset_to(&mut self, workflow: &Workflow) -> Result<(), CodecError> {
        let flowchart = codec::decode(workflow.flowchart_data.as_ref())?;
        self.workflow_id = workflow.id;
        self.project_id = workflow.project_id;
        self.baseline.store(Arc::new(flowchart.clone()));
        self.graph = DiagramGraph::from_flowchart(flowchart, self.graph.canvas());
        self.mode = EditorMode::Viewing;
        Ok(())
    }

    pub fn workflow_id(&self) -> EntityId {
        self.workflow_id
    }

    pub fn project_id(&self) -> EntityId {
        self.project_id
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn graph(&self) -> &DiagramGraph {
        &self.graph
    }

    pub fn entities(&self) -> &ProjectEntities {
        &self.entities
    }

    /// Flowchart as last persisted (or as opened)
    pub fn baseline(&self) -> Arc<FlowchartData> {
        self.baseline.load_full()
    }

    pub fn is_saving(&self) -> bool {
        self.saving.load(Ordering::Acquire)
    }

    /// Whether the working copy differs from the persisted baseline
    pub fn is_dirty(&self) -> bool {
        let baseline = self.baseline.load();
        **baseline != *self.graph.flowchart()
    }

    /// Fetch the project's users, pages and functionalities for the picker
    ///
    /// Failures are logged and reported, never raised; whatever was fetched before the
    /// failure replaces the current lists.
    pub async fn load_entities(&mut self, api: &dyn RequirementsApi) -> LoadOutcome {
        let report = ProjectEntities::load(api, self.project_id, self.fetch_concurrency).await;
        self.entities = report.entities;
        self.entities_complete = report.failure.is_none();
        match report.failure {
            None => LoadOutcome::Complete,
            Some(e) => LoadOutcome::Partial(e),
        }
    }

    pub fn open_picker(&mut self) {
        self.mode = EditorMode::AddingNode;
    }

    pub fn cancel_picker(&mut self) {
        self.mode = EditorMode::Viewing;
    }

    /// Picker contents: users, pages, then functionalities, skipping empty sections
    pub fn picker_sections(&self) -> Vec<PickerSection> {
        let users = self.entities.users.iter().map(|u| (EntityType::User, u.id, &u.name));
        let pages = self.entities.pages.iter().map(|p| (EntityType::Page, p.id, &p.name));
        let functionalities = self
            .entities
            .functionalities
            .iter()
            .map(|f| (EntityType::Functionality, f.id, &f.name));

        let mut sections = Vec::new();
        for (entity_type, entries) in [
            (EntityType::User, section_entries(users)),
            (EntityType::Page, section_entries(pages)),
            (EntityType::Functionality, section_entries(functionalities)),
        ] {
            if !entries.is_empty() {
                sections.push(PickerSection { entity_type, entries });
            }
        }
        sections
    }

    /// Add a node for the picked entity and close the picker
    pub fn pick(&mut self, entity_type: EntityType, entity_id: EntityId) -> Result<&FlowNode, EditorError> {
        if self.mode != EditorMode::AddingNode {
            return Err(EditorError::PickerClosed);
        }
        let label = self
            .entities
            .name_of(entity_type, entity_id)
            .ok_or(EditorError::UnknownEntity { entity_type, id: entity_id })?
            .to_string();

        self.mode = EditorMode::Viewing;
        Ok(self.graph.add_node(entity_type, entity_id, label))
    }

    /// Accept a drag-to-connect gesture
    pub fn on_connect(&mut self, candidate: EdgeCandidate) -> Result<&FlowEdge, EditorError> {
        Ok(self.graph.connect(&candidate.source, &candidate.target, candidate.label)?)
    }

    pub fn move_node(&mut self, id: &str, position: Position) -> bool {
        self.graph.move_node(id, position)
    }

    pub fn remove_node(&mut self, id: &str) -> Option<FlowNode> {
        self.graph.remove_node(id)
    }

    pub fn remove_node_with_edges(&mut self, id: &str) -> Option<(FlowNode, Vec<FlowEdge>)> {
        self.graph.remove_node_with_edges(id)
    }

    pub fn remove_edge(&mut self, id: &str) -> Option<FlowEdge> {
        self.graph.remove_edge(id)
    }

    /// Nodes in display order, resolved against the loaded entities
    pub fn rendered_nodes(&self) -> Vec<RenderedNode<'_>> {
        self.graph
            .nodes()
            .iter()
            .map(|node| {
                let reference = node.data.entity();
                let current_name =
                    reference.and_then(|(entity_type, id)| self.entities.name_of(entity_type, id));
                RenderedNode {
                    id: &node.id,
                    label: current_name.unwrap_or(node.data.label()),
                    position: node.position,
                    color: node.data.entity_type().map(EntityType::accent_color),
                    dangling: self.entities_complete && reference.is_some() && current_name.is_none(),
                }
            })
            .collect()
    }

    /// Persist the working copy as the workflow's flowchart
    ///
    /// Sends a full-replace update carrying only `flowchartData`. A request made while
    /// another save is pending is rejected without touching the network. On failure the
    /// working copy and baseline are unchanged.
    pub async fn save(&self, api: &dyn RequirementsApi) -> Result<(), EditorError> {
        let _guard = SaveGuard::acquire(&self.saving).ok_or_else(|| {
            tracing::debug!("Save of workflow {} rejected, one is already in flight", self.workflow_id);
            EditorError::SaveInProgress
        })?;

        let snapshot = self.graph.flowchart().clone();
        let body = WorkflowUpdate::flowchart(codec::encode(&snapshot)?);

        tracing::info!(
            "💾 Saving workflow {} ({} nodes, {} edges)",
            self.workflow_id,
            snapshot.nodes.len(),
            snapshot.edges.len()
        );

        match api.update_workflow(self.workflow_id, &body).await {
            Ok(_) => {
                self.baseline.store(Arc::new(snapshot));
                tracing::info!("✅ Workflow {} saved", self.workflow_id);
                Ok(())
            }
            Err(e) => {
                tracing::error!("❌ Failed to save workflow {}: {}", self.workflow_id, e);
                Err(e.into())
            }
        }
    }

    /// Tear the editor down, discarding unsaved edits
    ///
    /// Returns whether any edits were discarded. Nothing is sent.
    pub fn close(self) -> bool {
        let discarded = self.is_dirty();
        if discarded {
            tracing::info!("🗑️ Closing workflow {} with unsaved changes discarded", self.workflow_id);
        }
        discarded
    }
}

fn section_entries<'a>(items: impl Iterator<Item = (EntityType, EntityId, &'a String)>) -> Vec<PickerEntry> {
    items
        .map(|(entity_type, entity_id, name)| PickerEntry { entity_type, entity_id, label: name.clone() })
        .collect()
}

/// In-flight marker released on drop, including when a save future is cancelled
struct SaveGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> SaveGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for SaveGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
