//! Shared fixtures for integration tests: record builders, an in-memory `MockApi`, and
//! an axum fake of the requirements REST API (see `server`).
#![allow(dead_code)]

pub mod server;

use async_trait::async_trait;
use chrono::Utc;
use reqflow::api::payloads::{NewFunctionality, NewPage, NewProject, NewUser, NewWorkflow, WorkflowUpdate};
use reqflow::api::RequirementsApi;
use reqflow::error::ApiError;
use reqflow::project::records::DeleteTarget;
use reqflow::project::types::{EntityId, Functionality, Page, Project, RequirementUser};
use reqflow::schema::FunctionalityKind;
use reqflow::workflow::types::Workflow;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tokio::sync::Semaphore;

pub fn project(id: EntityId, name: &str) -> Project {
    Project {
        id,
        name: name.to_string(),
        description: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn user(id: EntityId, project_id: EntityId, name: &str) -> RequirementUser {
    RequirementUser {
        id,
        project_id,
        name: name.to_string(),
        description: None,
        privileges: None,
        page_access: None,
        functionality_access: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn page(id: EntityId, project_id: EntityId, name: &str) -> Page {
    Page {
        id,
        project_id,
        name: name.to_string(),
        description: None,
        functionalities: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn functionality(id: EntityId, page_id: EntityId, name: &str, kind: FunctionalityKind) -> Functionality {
    Functionality {
        id,
        page_id,
        name: name.to_string(),
        description: None,
        kind,
        fields: None,
        data_to_display: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn workflow(id: EntityId, project_id: EntityId, flowchart_data: Option<Value>) -> Workflow {
    Workflow {
        id,
        project_id,
        name: "Checkout flow".to_string(),
        description: None,
        flowchart_data,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn not_mocked(what: &str) -> ApiError {
    ApiError::Unavailable(format!("{what} is not mocked"))
}

fn server_error(method: &'static str, url: String) -> ApiError {
    ApiError::Status { method, url, status: 500 }
}

/// In-memory API double recording every write
///
/// Workflow updates can be held at a gate until the test opens it, to observe the
/// editor while a save is in flight.
#[derive(Default)]
pub struct MockApi {
    pub users: Vec<RequirementUser>,
    pub pages: Vec<Page>,
    pub functionalities: Vec<Functionality>,
    pub fail_users: bool,
    pub failing_pages: Vec<EntityId>,
    pub fail_saves: AtomicBool,
    pub save_gate: Option<Semaphore>,
    pub functionality_requests: Mutex<Vec<EntityId>>,
    pub updates: Mutex<Vec<(EntityId, WorkflowUpdate)>>,
    pub deletes: Mutex<Vec<DeleteTarget>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold every workflow update until `open_save_gate` is called
    pub fn with_save_gate(mut self) -> Self {
        self.save_gate = Some(Semaphore::new(0));
        self
    }

    pub fn open_save_gate(&self) {
        if let Some(gate) = &self.save_gate {
            gate.add_permits(1_000);
        }
    }

    pub fn update_count(&self) -> usize {
        self.updates.lock().unwrap().len()
    }

    pub fn last_update(&self) -> Option<(EntityId, WorkflowUpdate)> {
        self.updates.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl RequirementsApi for MockApi {
    async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        Err(not_mocked("list_projects"))
    }

    async fn get_project(&self, id: EntityId) -> Result<Project, ApiError> {
        Ok(project(id, "Mock project"))
    }

    async fn create_project(&self, _body: &NewProject) -> Result<Project, ApiError> {
        Err(not_mocked("create_project"))
    }

    async fn update_project(&self, _id: EntityId, _body: &NewProject) -> Result<Project, ApiError> {
        Err(not_mocked("update_project"))
    }

    async fn list_users(&self, project_id: EntityId) -> Result<Vec<RequirementUser>, ApiError> {
        if self.fail_users {
            return Err(server_error("GET", format!("/users/project/{project_id}")));
        }
        Ok(self.users.iter().filter(|u| u.project_id == project_id).cloned().collect())
    }

    async fn create_user(&self, _body: &NewUser) -> Result<RequirementUser, ApiError> {
        Err(not_mocked("create_user"))
    }

    async fn update_user(&self, _id: EntityId, _body: &NewUser) -> Result<RequirementUser, ApiError> {
        Err(not_mocked("update_user"))
    }

    async fn list_pages(&self, project_id: EntityId) -> Result<Vec<Page>, ApiError> {
        Ok(self.pages.iter().filter(|p| p.project_id == project_id).cloned().collect())
    }

    async fn create_page(&self, _body: &NewPage) -> Result<Page, ApiError> {
        Err(not_mocked("create_page"))
    }

    async fn update_page(&self, _id: EntityId, _body: &NewPage) -> Result<Page, ApiError> {
        Err(not_mocked("update_page"))
    }

    async fn list_functionalities(&self, page_id: EntityId) -> Result<Vec<Functionality>, ApiError> {
        self.functionality_requests.lock().unwrap().push(page_id);
        if self.failing_pages.contains(&page_id) {
            return Err(server_error("GET", format!("/functionalities/page/{page_id}")));
        }
        Ok(self.functionalities.iter().filter(|f| f.page_id == page_id).cloned().collect())
    }

    async fn create_functionality(&self, _body: &NewFunctionality) -> Result<Functionality, ApiError> {
        Err(not_mocked("create_functionality"))
    }

    async fn update_functionality(&self, _id: EntityId, _body: &NewFunctionality) -> Result<Functionality, ApiError> {
        Err(not_mocked("update_functionality"))
    }

    async fn list_workflows(&self, _project_id: EntityId) -> Result<Vec<Workflow>, ApiError> {
        Err(not_mocked("list_workflows"))
    }

    async fn get_workflow(&self, _id: EntityId) -> Result<Workflow, ApiError> {
        Err(not_mocked("get_workflow"))
    }

    async fn create_workflow(&self, _body: &NewWorkflow) -> Result<Workflow, ApiError> {
        Err(not_mocked("create_workflow"))
    }

    async fn update_workflow(&self, id: EntityId, body: &WorkflowUpdate) -> Result<Workflow, ApiError> {
        self.updates.lock().unwrap().push((id, body.clone()));

        if let Some(gate) = &self.save_gate {
            gate.acquire().await.expect("save gate closed").forget();
        }
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(server_error("PUT", format!("/workflows/{id}")));
        }
        Ok(workflow(id, 1, body.flowchart_data.clone()))
    }

    async fn delete(&self, target: DeleteTarget) -> Result<(), ApiError> {
        self.deletes.lock().unwrap().push(target);
        Ok(())
    }
}
