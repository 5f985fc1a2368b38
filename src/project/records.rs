/// Local record lists and confirmed deletes
///
/// Lists mirror what a view has fetched, in creation order. Deleting goes through a
/// two-stage handle: a `PendingDelete` only becomes executable once the user confirms it.

use std::fmt;

use crate::api::RequirementsApi;
use crate::error::ApiError;
use crate::project::types::{EntityId, Functionality, Page, Project, RequirementUser};
use crate::workflow::types::Workflow;

/// Anything with an API-issued id
pub trait Record {
    fn id(&self) -> EntityId;
}

macro_rules! impl_record {
    ($($ty:ty),*) => {
        $(impl Record for $ty {
            fn id(&self) -> EntityId {
                self.id
            }
        })*
    };
}

impl_record!(Project, RequirementUser, Page, Functionality, Workflow);

/// Creation-ordered list of records held by one view
#[derive(Debug, Clone, PartialEq)]
pub struct RecordList<T> {
    items: Vec<T>,
}

impl<T> Default for RecordList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Record> RecordList<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    /// Append a freshly created record
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Drop `id` from the local list; absent ids are fine
    pub fn forget(&mut self, id: EntityId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        self.items.len() != before
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    pub fn replace_all(&mut self, items: Vec<T>) {
        self.items = items;
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A record the user asked to delete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeleteTarget {
    Project(EntityId),
    User(EntityId),
    Page(EntityId),
    Functionality(EntityId),
    Workflow(EntityId),
}

impl DeleteTarget {
    pub fn id(self) -> EntityId {
        match self {
            DeleteTarget::Project(id)
            | DeleteTarget::User(id)
            | DeleteTarget::Page(id)
            | DeleteTarget::Functionality(id)
            | DeleteTarget::Workflow(id) => id,
        }
    }

    /// REST path of the record
    pub fn path(self) -> String {
        match self {
            DeleteTarget::Project(id) => format!("/projects/{id}"),
            DeleteTarget::User(id) => format!("/users/{id}"),
            DeleteTarget::Page(id) => format!("/pages/{id}"),
            DeleteTarget::Functionality(id) => format!("/functionalities/{id}"),
            DeleteTarget::Workflow(id) => format!("/workflows/{id}"),
        }
    }

    /// Question shown before the destructive call
    pub fn prompt(self) -> &'static str {
        match self {
            DeleteTarget::Project(_) => "Are you sure you want to delete this project and everything in it?",
            DeleteTarget::User(_) => "Are you sure you want to delete this user?",
            DeleteTarget::Page(_) => "Are you sure you want to delete this page and all its functionalities?",
            DeleteTarget::Functionality(_) => "Are you sure you want to delete this functionality?",
            DeleteTarget::Workflow(_) => "Are you sure you want to delete this workflow?",
        }
    }

    /// Start the delete flow; nothing is sent until the returned handle is confirmed
    pub fn request(self) -> PendingDelete {
        PendingDelete { target: self }
    }
}

impl fmt::Display for DeleteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            DeleteTarget::Project(_) => "project",
            DeleteTarget::User(_) => "user",
            DeleteTarget::Page(_) => "page",
            DeleteTarget::Functionality(_) => "functionality",
            DeleteTarget::Workflow(_) => "workflow",
        };
        write!(f, "{} {}", kind, self.id())
    }
}

/// Delete awaiting the user's answer
#[derive(Debug)]
#[must_use = "a pending delete does nothing until confirmed"]
pub struct PendingDelete {
    target: DeleteTarget,
}

impl PendingDelete {
    pub fn target(&self) -> DeleteTarget {
        self.target
    }

    pub fn prompt(&self) -> &'static str {
        self.target.prompt()
    }

    pub fn confirm(self) -> ConfirmedDelete {
        ConfirmedDelete { target: self.target }
    }

    /// Resolve with the user's answer; `None` means the user declined
    pub fn answer(self, confirmed: bool) -> Option<ConfirmedDelete> {
        if confirmed {
            Some(self.confirm())
        } else {
            tracing::debug!("Delete of {} declined", self.target);
            None
        }
    }
}

/// Delete the user agreed to; the only way to issue the destructive call
#[derive(Debug)]
pub struct ConfirmedDelete {
    target: DeleteTarget,
}

impl ConfirmedDelete {
    pub fn target(&self) -> DeleteTarget {
        self.target
    }

    pub async fn execute(self, api: &dyn RequirementsApi) -> Result<DeleteTarget, ApiError> {
        api.delete(self.target).await?;
        tracing::info!("🗑️ Deleted {}", self.target);
        Ok(self.target)
    }

    /// Execute, then drop the id from `list`
    ///
    /// On failure the list is left as it was.
    pub async fn execute_and_forget<T: Record>(
        self,
        api: &dyn RequirementsApi,
        list: &mut RecordList<T>,
    ) -> Result<DeleteTarget, ApiError> {
        let target = self.execute(api).await?;
        list.forget(target.id());
        Ok(target)
    }
}
