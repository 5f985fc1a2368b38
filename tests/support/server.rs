//! In-process fake of the requirements REST API
//!
//! Serves the subset of routes the client exercises from an in-memory store and keeps
//! every raw request body, so tests can check exactly what went over the wire.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post},
    Router,
};
use chrono::Utc;
use reqflow::api::payloads::{NewFunctionality, NewPage, NewProject, NewWorkflow, WorkflowUpdate};
use reqflow::project::records::Record;
use reqflow::project::types::{EntityId, Functionality, Page, Project, RequirementUser};
use reqflow::workflow::types::Workflow;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct Store {
    next_id: EntityId,
    pub projects: Vec<Project>,
    pub users: Vec<RequirementUser>,
    pub pages: Vec<Page>,
    pub functionalities: Vec<Functionality>,
    pub workflows: Vec<Workflow>,
    /// Raw POST/PUT bodies in arrival order
    pub bodies: Vec<Value>,
    /// Page whose functionality listing answers 500
    pub failing_page: Option<EntityId>,
}

impl Store {
    fn allocate_id(&mut self) -> EntityId {
        self.next_id += 1;
        self.next_id
    }
}

pub type SharedStore = Arc<RwLock<Store>>;

/// Start the fake on an ephemeral port; returns the API base URL and the shared store
pub async fn spawn() -> (String, SharedStore) {
    let store = SharedStore::default();
    let app = Router::new()
        .route("/api/projects", get(list_projects).post(create_project))
        .route("/api/projects/{id}", get(get_project).delete(delete_project))
        .route("/api/users/project/{id}", get(list_users))
        .route("/api/pages", post(create_page))
        .route("/api/pages/project/{id}", get(list_pages))
        .route("/api/pages/{id}", delete(delete_page))
        .route("/api/functionalities", post(create_functionality))
        .route("/api/functionalities/page/{id}", get(list_functionalities))
        .route("/api/workflows", post(create_workflow))
        .route("/api/workflows/project/{id}", get(list_workflows))
        .route(
            "/api/workflows/{id}",
            get(get_workflow).put(update_workflow).delete(delete_workflow),
        )
        .with_state(store.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}/api"), store)
}

/// Record the raw body, then decode it as the expected payload
fn accept<T: DeserializeOwned>(store: &mut Store, body: Value) -> Result<T, StatusCode> {
    store.bodies.push(body.clone());
    serde_json::from_value(body).map_err(|_| StatusCode::BAD_REQUEST)
}

fn remove<T: Record>(items: &mut Vec<T>, id: EntityId) -> StatusCode {
    match items.iter().position(|item| item.id() == id) {
        Some(index) => {
            items.remove(index);
            StatusCode::NO_CONTENT
        }
        None => StatusCode::NOT_FOUND,
    }
}

async fn list_projects(State(store): State<SharedStore>) -> Json<Vec<Project>> {
    Json(store.read().await.projects.clone())
}

async fn get_project(State(store): State<SharedStore>, Path(id): Path<EntityId>) -> Result<Json<Project>, StatusCode> {
    let store = store.read().await;
    store.projects.iter().find(|p| p.id == id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn create_project(State(store): State<SharedStore>, Json(body): Json<Value>) -> Result<Json<Project>, StatusCode> {
    let mut store = store.write().await;
    let payload: NewProject = accept(&mut store, body)?;
    let project = Project {
        id: store.allocate_id(),
        name: payload.name,
        description: payload.description,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };
    store.projects.push(project.clone());
    Ok(Json(project))
}

async fn delete_project(State(store): State<SharedStore>, Path(id): Path<EntityId>) -> StatusCode {
    remove(&mut store.write().await.projects, id)
}

async fn list_users(State(store): State<SharedStore>, Path(project_id): Path<EntityId>) -> Json<Vec<RequirementUser>> {
    let store = store.read().await;
    Json(store.users.iter().filter(|u| u.project_id == project_id).cloned().collect())
}

async fn list_pages(State(store): State<SharedStore>, Path(project_id): Path<EntityId>) -> Json<Vec<Page>> {
    let store = store.read().await;
    Json(store.pages.iter().filter(|p| p.project_id == project_id).cloned().collect())
}

async fn create_page(State(store): State<SharedStore>, Json(body): Json<Value>) -> Result<Json<Page>, StatusCode> {
    let mut store = store.write().await;
    let payload: NewPage = accept(&mut store, body)?;
    let page = Page {
        id: store.allocate_id(),
        project_id: payload.project_id,
        name: payload.name,
        description: payload.description,
        functionalities: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };
    store.pages.push(page.clone());
    Ok(Json(page))
}

async fn delete_page(State(store): State<SharedStore>, Path(id): Path<EntityId>) -> StatusCode {
    remove(&mut store.write().await.pages, id)
}

async fn list_functionalities(
    State(store): State<SharedStore>,
    Path(page_id): Path<EntityId>,
) -> Result<Json<Vec<Functionality>>, StatusCode> {
    let store = store.read().await;
    if store.failing_page == Some(page_id) {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    Ok(Json(store.functionalities.iter().filter(|f| f.page_id == page_id).cloned().collect()))
}

async fn create_functionality(
    State(store): State<SharedStore>,
    Json(body): Json<Value>,
) -> Result<Json<Functionality>, StatusCode> {
    let mut store = store.write().await;
    let payload: NewFunctionality = accept(&mut store, body)?;
    let functionality = Functionality {
        id: store.allocate_id(),
        page_id: payload.page_id,
        name: payload.name,
        description: payload.description,
        kind: payload.kind,
        fields: payload.fields,
        data_to_display: payload.data_to_display,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };
    store.functionalities.push(functionality.clone());
    Ok(Json(functionality))
}

async fn list_workflows(State(store): State<SharedStore>, Path(project_id): Path<EntityId>) -> Json<Vec<Workflow>> {
    let store = store.read().await;
    Json(store.workflows.iter().filter(|w| w.project_id == project_id).cloned().collect())
}

async fn get_workflow(State(store): State<SharedStore>, Path(id): Path<EntityId>) -> Result<Json<Workflow>, StatusCode> {
    let store = store.read().await;
    store.workflows.iter().find(|w| w.id == id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn create_workflow(State(store): State<SharedStore>, Json(body): Json<Value>) -> Result<Json<Workflow>, StatusCode> {
    let mut store = store.write().await;
    let payload: NewWorkflow = accept(&mut store, body)?;
    let workflow = Workflow {
        id: store.allocate_id(),
        project_id: payload.project_id,
        name: payload.name,
        description: payload.description,
        flowchart_data: payload.flowchart_data,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };
    store.workflows.push(workflow.clone());
    Ok(Json(workflow))
}

/// Partial update: only attributes present in the body change
async fn update_workflow(
    State(store): State<SharedStore>,
    Path(id): Path<EntityId>,
    Json(body): Json<Value>,
) -> Result<Json<Workflow>, StatusCode> {
    let mut store = store.write().await;
    let update: WorkflowUpdate = accept(&mut store, body)?;
    let workflow = store.workflows.iter_mut().find(|w| w.id == id).ok_or(StatusCode::NOT_FOUND)?;

    if let Some(name) = update.name {
        workflow.name = name;
    }
    if let Some(description) = update.description {
        workflow.description = Some(description);
    }
    if let Some(flowchart_data) = update.flowchart_data {
        workflow.flowchart_data = Some(flowchart_data);
    }
    workflow.updated_at = Utc::now();

    Ok(Json(workflow.clone()))
}

async fn delete_workflow(State(store): State<SharedStore>, Path(id): Path<EntityId>) -> StatusCode {
    remove(&mut store.write().await.workflows, id)
}
