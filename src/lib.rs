/// Reqflow: requirements gathering client with a workflow diagram editor
///
/// This library models projects, their user roles, pages and functionalities, and the
/// workflow diagrams that connect them, on top of an external requirements CRUD API.

// Core configuration and setup
pub mod config;

// Error taxonomy shared by every layer
pub mod error;

// Requirements API layer - trait seam and reqwest client for the external store
pub mod api;

// Project layer - entity records, per-view entity store, drafts and confirmed deletes
pub mod project;

// Field schema layer - form/table field lists and the functionality creation flow
pub mod schema;

// Workflow layer - flowchart types, codec, graph model, analysis and editor
pub mod workflow;

// Re-export commonly used types for external consumers
pub use api::{HttpApiClient, RequirementsApi};
pub use config::Config;
pub use error::{ApiError, CodecError, EditorError, FieldError, GraphError, ValidationError};
pub use project::{EntityId, Project, ProjectEntities};
pub use workflow::{DiagramEditor, DiagramGraph, EntityType, FlowchartData, Workflow};
