/// HTTP client for the requirements API
///
/// Thin reqwest wrapper: one method per endpoint, JSON in and out, every failure mapped
/// to `ApiError`. No retries; timeouts come from the configured request timeout.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::payloads::{NewFunctionality, NewPage, NewProject, NewUser, NewWorkflow, WorkflowUpdate};
use crate::api::RequirementsApi;
use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::project::records::DeleteTarget;
use crate::project::types::{EntityId, Functionality, Page, Project, RequirementUser};
use crate::workflow::types::Workflow;

/// reqwest-backed implementation of `RequirementsApi`
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    http: Client,
    /// Base URL without a trailing slash
    base_url: String,
}

impl HttpApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ApiError::Unavailable(format!("HTTP client setup failed: {e}")))?;
        Ok(Self::with_client(http, &config.base_url))
    }

    pub fn with_client(http: Client, base_url: &str) -> Self {
        Self { http, base_url: base_url.trim_end_matches('/').to_string() }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        let request = self.http.get(&url);
        self.execute("GET", url, request).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let url = self.url(path);
        let request = self.http.post(&url).json(body);
        self.execute("POST", url, request).await
    }

    async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let url = self.url(path);
        let request = self.http.put(&url).json(body);
        self.execute("PUT", url, request).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: &'static str,
        url: String,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        tracing::debug!("📡 {} {}", method, url);

        let response = request.send().await.map_err(|source| ApiError::Transport {
            method,
            url: url.clone(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("❌ {} {} returned {}", method, url, status);
            return Err(ApiError::Status { method, url, status: status.as_u16() });
        }

        response.json::<T>().await.map_err(|source| ApiError::Decode { url, source })
    }
}

#[async_trait]
impl RequirementsApi for HttpApiClient {
    async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        self.get("/projects").await
    }

    async fn get_project(&self, id: EntityId) -> Result<Project, ApiError> {
        self.get(&format!("/projects/{id}")).await
    }

    async fn create_project(&self, body: &NewProject) -> Result<Project, ApiError> {
        self.post("/projects", body).await
    }

    async fn update_project(&self, id: EntityId, body: &NewProject) -> Result<Project, ApiError> {
        self.put(&format!("/projects/{id}"), body).await
    }

    async fn list_users(&self, project_id: EntityId) -> Result<Vec<RequirementUser>, ApiError> {
        self.get(&format!("/users/project/{project_id}")).await
    }

    async fn create_user(&self, body: &NewUser) -> Result<RequirementUser, ApiError> {
        self.post("/users", body).await
    }

    async fn update_user(&self, id: EntityId, body: &NewUser) -> Result<RequirementUser, ApiError> {
        self.put(&format!("/users/{id}"), body).await
    }

    async fn list_pages(&self, project_id: EntityId) -> Result<Vec<Page>, ApiError> {
        self.get(&format!("/pages/project/{project_id}")).await
    }

    async fn create_page(&self, body: &NewPage) -> Result<Page, ApiError> {
        self.post("/pages", body).await
    }

    async fn update_page(&self, id: EntityId, body: &NewPage) -> Result<Page, ApiError> {
        self.put(&format!("/pages/{id}"), body).await
    }

    async fn list_functionalities(&self, page_id: EntityId) -> Result<Vec<Functionality>, ApiError> {
        self.get(&format!("/functionalities/page/{page_id}")).await
    }

    async fn create_functionality(&self, body: &NewFunctionality) -> Result<Functionality, ApiError> {
        self.post("/functionalities", body).await
    }

    async fn update_functionality(&self, id: EntityId, body: &NewFunctionality) -> Result<Functionality, ApiError> {
        self.put(&format!("/functionalities/{id}"), body).await
    }

    async fn list_workflows(&self, project_id: EntityId) -> Result<Vec<Workflow>, ApiError> {
        self.get(&format!("/workflows/project/{project_id}")).await
    }

    async fn get_workflow(&self, id: EntityId) -> Result<Workflow, ApiError> {
        self.get(&format!("/workflows/{id}")).await
    }

    async fn create_workflow(&self, body: &NewWorkflow) -> Result<Workflow, ApiError> {
        self.post("/workflows", body).await
    }

    async fn update_workflow(&self, id: EntityId, body: &WorkflowUpdate) -> Result<Workflow, ApiError> {
        self.put(&format!("/workflows/{id}"), body).await
    }

    async fn delete(&self, target: DeleteTarget) -> Result<(), ApiError> {
        let url = self.url(&target.path());
        tracing::debug!("📡 DELETE {}", url);

        let response = self.http.delete(&url).send().await.map_err(|source| ApiError::Transport {
            method: "DELETE",
            url: url.clone(),
            source,
        })?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::NOT_FOUND => {
                tracing::debug!("{} already absent, treating delete as done", target);
                Ok(())
            }
            status => {
                tracing::warn!("❌ DELETE {} returned {}", url, status);
                Err(ApiError::Status { method: "DELETE", url, status: status.as_u16() })
            }
        }
    }
}
