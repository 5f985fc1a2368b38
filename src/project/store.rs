/// Project entity store
///
/// Holds the users, pages and functionalities of one project as fetched for a single
/// view. Functionalities are owned by pages, so loading them takes a second round of
/// requests after the pages arrive.

use futures::stream::{self, StreamExt};

use crate::api::RequirementsApi;
use crate::error::ApiError;
use crate::project::types::{EntityId, Functionality, Page, RequirementUser};
use crate::workflow::types::EntityType;

/// Entities a diagram node can reference, for one project
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectEntities {
    pub users: Vec<RequirementUser>,
    pub pages: Vec<Page>,
    /// Grouped by page, in the order the pages were returned
    pub functionalities: Vec<Functionality>,
}

/// Outcome of an entity load; lists fetched before a failure are kept
#[derive(Debug)]
pub struct LoadReport {
    pub entities: ProjectEntities,
    pub failure: Option<ApiError>,
}

impl LoadReport {
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }
}

impl ProjectEntities {
    pub fn user(&self, id: EntityId) -> Option<&RequirementUser> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn page(&self, id: EntityId) -> Option<&Page> {
        self.pages.iter().find(|p| p.id == id)
    }

    pub fn functionality(&self, id: EntityId) -> Option<&Functionality> {
        self.functionalities.iter().find(|f| f.id == id)
    }

    /// Current name of a referenced entity, `None` when it is not (or no longer) loaded
    pub fn name_of(&self, entity_type: EntityType, id: EntityId) -> Option<&str> {
        match entity_type {
            EntityType::User => self.user(id).map(|u| u.name.as_str()),
            EntityType::Page => self.page(id).map(|p| p.name.as_str()),
            EntityType::Functionality => self.functionality(id).map(|f| f.name.as_str()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.pages.is_empty() && self.functionalities.is_empty()
    }

    /// Fetch everything a project's diagram can reference
    ///
    /// Users and pages are requested together. Functionality requests then run with at
    /// most `concurrency` in flight, but results are consumed in page order and the first
    /// failure stops the load, so the aggregate is always a prefix grouped by page.
    pub async fn load(api: &dyn RequirementsApi, project_id: EntityId, concurrency: usize) -> LoadReport {
        tracing::info!("📥 Loading entities for project {}", project_id);

        let mut entities = ProjectEntities::default();
        let (users, pages) = futures::join!(api.list_users(project_id), api.list_pages(project_id));

        let mut failure = None;
        match users {
            Ok(users) => entities.users = users,
            Err(e) => failure = Some(e),
        }
        match pages {
            Ok(pages) => entities.pages = pages,
            Err(e) => {
                failure.get_or_insert(e);
            }
        }
        if let Some(e) = failure {
            tracing::warn!("⚠️ Entity load for project {} stopped: {}", project_id, e);
            return LoadReport { entities, failure: Some(e) };
        }

        let page_ids: Vec<EntityId> = entities.pages.iter().map(|p| p.id).collect();
        let mut fetches = stream::iter(page_ids)
            .map(|page_id| async move { (page_id, api.list_functionalities(page_id).await) })
            .buffered(concurrency.max(1));

        while let Some((page_id, result)) = fetches.next().await {
            match result {
                Ok(functionalities) => entities.functionalities.extend(functionalities),
                Err(e) => {
                    tracing::warn!(
                        "⚠️ Functionalities of page {} could not be loaded, keeping {} loaded so far: {}",
                        page_id,
                        entities.functionalities.len(),
                        e
                    );
                    return LoadReport { entities, failure: Some(e) };
                }
            }
        }

        tracing::info!(
            "✅ Loaded {} users, {} pages, {} functionalities for project {}",
            entities.users.len(),
            entities.pages.len(),
            entities.functionalities.len(),
            project_id
        );

        LoadReport { entities, failure: None }
    }
}
