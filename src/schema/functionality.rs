/// Functionality kinds and the two-step functionality creation flow
///
/// Step one collects name, description and kind. Step two collects the field list and
/// display text, which only form and table functionalities ever transmit.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::api::payloads::NewFunctionality;
use crate::error::ValidationError;
use crate::project::types::EntityId;
use crate::schema::field::FieldList;

/// What a functionality is on its page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FunctionalityKind {
    #[default]
    Button,
    Form,
    Table,
}

impl FunctionalityKind {
    /// Whether this kind carries a field list and display text
    pub fn has_data_fields(self) -> bool {
        match self {
            FunctionalityKind::Button => false,
            FunctionalityKind::Form | FunctionalityKind::Table => true,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FunctionalityKind::Button => "button",
            FunctionalityKind::Form => "form",
            FunctionalityKind::Table => "table",
        }
    }
}

impl fmt::Display for FunctionalityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which step of the creation flow is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftStep {
    Details,
    Configuration,
}

/// In-progress functionality, edited by the creation panel
///
/// Panel state may hold fields or display text for any kind (the user can switch
/// kinds back and forth); `submit` decides what is actually transmitted.
#[derive(Debug, Clone)]
pub struct FunctionalityDraft {
    pub page_id: EntityId,
    pub name: String,
    pub description: String,
    pub kind: FunctionalityKind,
    pub data_to_display: String,
    pub fields: FieldList,
    step: DraftStep,
}

impl FunctionalityDraft {
    pub fn new(page_id: EntityId) -> Self {
        Self {
            page_id,
            name: String::new(),
            description: String::new(),
            kind: FunctionalityKind::default(),
            data_to_display: String::new(),
            fields: FieldList::new(),
            step: DraftStep::Details,
        }
    }

    pub fn step(&self) -> DraftStep {
        self.step
    }

    /// Advance to the configuration step once the details are valid
    pub fn next(&mut self) -> Result<(), ValidationError> {
        self.details_complete()?;
        self.step = DraftStep::Configuration;
        Ok(())
    }

    pub fn back(&mut self) {
        self.step = DraftStep::Details;
    }

    pub fn details_complete(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName { entity: "Functionality" });
        }
        Ok(())
    }

    /// Build the create payload
    ///
    /// Button functionalities never carry fields or display text. Form and table
    /// functionalities send fields only when at least one exists, and display text
    /// only when it is non-blank.
    pub fn submit(&self) -> Result<NewFunctionality, ValidationError> {
        self.details_complete()?;

        let (fields, data_to_display) = if self.kind.has_data_fields() {
            if let Some(index) = self.fields.iter().position(|f| f.name.trim().is_empty()) {
                return Err(ValidationError::EmptyFieldName { index });
            }
            let fields = (!self.fields.is_empty()).then(|| self.fields.as_slice().to_vec());
            (fields, non_blank(&self.data_to_display))
        } else {
            (None, None)
        };

        Ok(NewFunctionality {
            page_id: self.page_id,
            name: self.name.trim().to_string(),
            description: non_blank(&self.description),
            kind: self.kind,
            fields,
            data_to_display,
        })
    }
}

/// Trim, and drop the value entirely when nothing is left
pub(crate) fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
