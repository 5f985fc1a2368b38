/// Project management module
///
/// Handles everything scoped to one project: entity records, the per-view entity
/// store, creation drafts, and local record lists with confirmed deletes.

pub mod forms;
pub mod records;
pub mod store;
pub mod types;

pub use forms::{PageDraft, ProjectDraft, UserDraft, WorkflowDraft};
pub use records::{ConfirmedDelete, DeleteTarget, PendingDelete, Record, RecordList};
pub use store::{LoadReport, ProjectEntities};
pub use types::{EntityId, Functionality, Page, Project, RequirementUser};
