/// Requirements API Layer
///
/// The external CRUD store is reached through the `RequirementsApi` trait so the editor
/// and forms never depend on a transport. It provides:
/// - Request body types that omit unset optionals
/// - The trait mirroring the store's REST contract
/// - A reqwest-backed HTTP implementation

// Request bodies for create/update calls
pub mod payloads;

// reqwest implementation of the API contract
pub mod client;

use async_trait::async_trait;

use crate::error::ApiError;
use crate::project::records::DeleteTarget;
use crate::project::types::{EntityId, Functionality, Page, Project, RequirementUser};
use crate::workflow::types::Workflow;
use payloads::{NewFunctionality, NewPage, NewProject, NewUser, NewWorkflow, WorkflowUpdate};

pub use client::HttpApiClient;

/// Contract of the external requirements store
///
/// List operations return records in creation order.
#[async_trait]
pub trait RequirementsApi: Send + Sync {
    async fn list_projects(&self) -> Result<Vec<Project>, ApiError>;
    async fn get_project(&self, id: EntityId) -> Result<Project, ApiError>;
    async fn create_project(&self, body: &NewProject) -> Result<Project, ApiError>;
    async fn update_project(&self, id: EntityId, body: &NewProject) -> Result<Project, ApiError>;

    async fn list_users(&self, project_id: EntityId) -> Result<Vec<RequirementUser>, ApiError>;
    async fn create_user(&self, body: &NewUser) -> Result<RequirementUser, ApiError>;
    async fn update_user(&self, id: EntityId, body: &NewUser) -> Result<RequirementUser, ApiError>;

    async fn list_pages(&self, project_id: EntityId) -> Result<Vec<Page>, ApiError>;
    async fn create_page(&self, body: &NewPage) -> Result<Page, ApiError>;
    async fn update_page(&self, id: EntityId, body: &NewPage) -> Result<Page, ApiError>;

    async fn list_functionalities(&self, page_id: EntityId) -> Result<Vec<Functionality>, ApiError>;
    async fn create_functionality(&self, body: &NewFunctionality) -> Result<Functionality, ApiError>;
    async fn update_functionality(&self, id: EntityId, body: &NewFunctionality) -> Result<Functionality, ApiError>;

    async fn list_workflows(&self, project_id: EntityId) -> Result<Vec<Workflow>, ApiError>;
    async fn get_workflow(&self, id: EntityId) -> Result<Workflow, ApiError>;
    async fn create_workflow(&self, body: &NewWorkflow) -> Result<Workflow, ApiError>;
    async fn update_workflow(&self, id: EntityId, body: &WorkflowUpdate) -> Result<Workflow, ApiError>;

    /// Delete a record; deleting an id that is already gone counts as success
    async fn delete(&self, target: DeleteTarget) -> Result<(), ApiError>;
}
