/// Field Schema Layer
///
/// Shapes the configurable data of a functionality:
/// - Field definitions and the index-addressed field list
/// - Functionality kinds and the creation draft that decides what gets transmitted

// Field definitions and field list editing
pub mod field;

// Functionality kinds and creation flow
pub mod functionality;

pub use field::{FieldDefinition, FieldList, FieldPatch, FieldType};
pub use functionality::{DraftStep, FunctionalityDraft, FunctionalityKind};
