/// Request bodies for the requirements API
///
/// Optional attributes that are unset are omitted from the body rather than sent as
/// explicit nulls.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::project::types::EntityId;
use crate::schema::{FieldDefinition, FunctionalityKind};

/// Body for `POST /projects` and `PUT /projects/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProject {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body for `POST /users` and `PUT /users/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub project_id: EntityId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privileges: Option<Vec<String>>,
    /// Page ids the user may access
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_access: Option<Vec<EntityId>>,
    /// Functionality ids the user may access
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub functionality_access: Option<Vec<EntityId>>,
}

/// Body for `POST /pages` and `PUT /pages/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPage {
    pub project_id: EntityId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body for `POST /functionalities` and `PUT /functionalities/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFunctionality {
    pub page_id: EntityId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: FunctionalityKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FieldDefinition>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_to_display: Option<String>,
}

/// Body for `POST /workflows`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWorkflow {
    pub project_id: EntityId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flowchart_data: Option<Value>,
}

/// Partial body for `PUT /workflows/{id}`; absent attributes stay untouched server-side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flowchart_data: Option<Value>,
}

impl WorkflowUpdate {
    /// Diagram save: replaces the flowchart and nothing else
    pub fn flowchart(flowchart_data: Value) -> Self {
        Self { flowchart_data: Some(flowchart_data), ..Self::default() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unset_optionals_are_omitted() {
        let body = serde_json::to_value(NewPage { project_id: 2, name: "Home".into(), description: None }).unwrap();
        assert_eq!(body, json!({"projectId": 2, "name": "Home"}));
    }

    #[test]
    fn flowchart_update_carries_only_the_flowchart() {
        let body = serde_json::to_value(WorkflowUpdate::flowchart(json!({"nodes": [], "edges": []}))).unwrap();
        assert_eq!(body, json!({"flowchartData": {"nodes": [], "edges": []}}));
    }
}
