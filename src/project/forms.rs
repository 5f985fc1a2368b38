/// Creation drafts for projects, pages, users and workflows
///
/// Each draft validates locally and only then yields the request body, so a rejected
/// draft never reaches the network. Optional text is trimmed and dropped when blank.

use serde_json::json;

use crate::api::payloads::{NewPage, NewProject, NewUser, NewWorkflow};
use crate::error::ValidationError;
use crate::project::store::ProjectEntities;
use crate::project::types::EntityId;
use crate::schema::functionality::non_blank;

fn required_name(name: &str, entity: &'static str) -> Result<String, ValidationError> {
    non_blank(name).ok_or(ValidationError::EmptyName { entity })
}

#[derive(Debug, Clone, Default)]
pub struct ProjectDraft {
    pub name: String,
    pub description: String,
}

impl ProjectDraft {
    pub fn submit(&self) -> Result<NewProject, ValidationError> {
        Ok(NewProject {
            name: required_name(&self.name, "Project")?,
            description: non_blank(&self.description),
        })
    }
}

#[derive(Debug, Clone)]
pub struct PageDraft {
    pub project_id: EntityId,
    pub name: String,
    pub description: String,
}

impl PageDraft {
    pub fn new(project_id: EntityId) -> Self {
        Self { project_id, name: String::new(), description: String::new() }
    }

    pub fn submit(&self) -> Result<NewPage, ValidationError> {
        Ok(NewPage {
            project_id: self.project_id,
            name: required_name(&self.name, "Page")?,
            description: non_blank(&self.description),
        })
    }
}

/// Workflow draft; new workflows always start with an empty flowchart
#[derive(Debug, Clone)]
pub struct WorkflowDraft {
    pub project_id: EntityId,
    pub name: String,
    pub description: String,
}

impl WorkflowDraft {
    pub fn new(project_id: EntityId) -> Self {
        Self { project_id, name: String::new(), description: String::new() }
    }

    pub fn submit(&self) -> Result<NewWorkflow, ValidationError> {
        Ok(NewWorkflow {
            project_id: self.project_id,
            name: required_name(&self.name, "Workflow")?,
            description: non_blank(&self.description),
            flowchart_data: Some(json!({"nodes": [], "edges": []})),
        })
    }
}

/// User draft with page and functionality access selections
#[derive(Debug, Clone)]
pub struct UserDraft {
    pub project_id: EntityId,
    pub name: String,
    pub description: String,
    /// Comma-separated privilege labels as typed by the user
    pub privileges_text: String,
    selected_pages: Vec<EntityId>,
    selected_functionalities: Vec<EntityId>,
}

impl UserDraft {
    pub fn new(project_id: EntityId) -> Self {
        Self {
            project_id,
            name: String::new(),
            description: String::new(),
            privileges_text: String::new(),
            selected_pages: Vec::new(),
            selected_functionalities: Vec::new(),
        }
    }

    /// Select or deselect a page; returns whether it is now selected
    pub fn toggle_page(&mut self, page_id: EntityId) -> bool {
        toggle(&mut self.selected_pages, page_id)
    }

    /// Select or deselect a functionality; returns whether it is now selected
    pub fn toggle_functionality(&mut self, functionality_id: EntityId) -> bool {
        toggle(&mut self.selected_functionalities, functionality_id)
    }

    pub fn selected_pages(&self) -> &[EntityId] {
        &self.selected_pages
    }

    pub fn selected_functionalities(&self) -> &[EntityId] {
        &self.selected_functionalities
    }

    /// Split the privilege text on commas, trimming and dropping empty labels
    pub fn privileges(&self) -> Vec<String> {
        self.privileges_text
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Validate against the project's loaded entities and build the request body
    pub fn submit(&self, entities: &ProjectEntities) -> Result<NewUser, ValidationError> {
        let name = required_name(&self.name, "User")?;

        if let Some(&id) = self.selected_pages.iter().find(|&&id| entities.page(id).is_none()) {
            return Err(ValidationError::ForeignReference { kind: "page", id });
        }
        if let Some(&id) = self
            .selected_functionalities
            .iter()
            .find(|&&id| entities.functionality(id).is_none())
        {
            return Err(ValidationError::ForeignReference { kind: "functionality", id });
        }

        let privileges = self.privileges();
        Ok(NewUser {
            project_id: self.project_id,
            name,
            description: non_blank(&self.description),
            privileges: (!privileges.is_empty()).then_some(privileges),
            page_access: (!self.selected_pages.is_empty()).then(|| self.selected_pages.clone()),
            functionality_access: (!self.selected_functionalities.is_empty())
                .then(|| self.selected_functionalities.clone()),
        })
    }
}

fn toggle(selection: &mut Vec<EntityId>, id: EntityId) -> bool {
    if let Some(index) = selection.iter().position(|&s| s == id) {
        selection.remove(index);
        false
    } else {
        selection.push(id);
        true
    }
}
