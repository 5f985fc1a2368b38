/// Field definitions for form and table functionalities
///
/// A field list is an ordered sequence edited in place by index. Types and values are
/// stored uninterpreted; only the shape is enforced here.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::error::FieldError;

/// Input type of a single field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    Text,
    Number,
    Email,
    Date,
    Boolean,
    Select,
}

impl FieldType {
    /// Every field type in picker order
    pub const ALL: [FieldType; 6] = [
        FieldType::Text,
        FieldType::Number,
        FieldType::Email,
        FieldType::Date,
        FieldType::Boolean,
        FieldType::Select,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Email => "email",
            FieldType::Date => "date",
            FieldType::Boolean => "boolean",
            FieldType::Select => "select",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A configurable data field of a form or table functionality
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub required: bool,
    /// Free-text validation expression, never evaluated by the client
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
}

/// Partial update merged into an existing field; `None` leaves the attribute untouched
///
/// `validation` and `default_value` are optional on the field itself, so their patch
/// entries are doubled: `Some(None)` clears the attribute.
#[derive(Debug, Clone, Default)]
pub struct FieldPatch {
    pub name: Option<String>,
    pub field_type: Option<FieldType>,
    pub required: Option<bool>,
    pub validation: Option<Option<String>>,
    pub default_value: Option<Option<Value>>,
}

impl FieldPatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self { name: Some(name.into()), ..Self::default() }
    }

    pub fn field_type(field_type: FieldType) -> Self {
        Self { field_type: Some(field_type), ..Self::default() }
    }

    pub fn required(required: bool) -> Self {
        Self { required: Some(required), ..Self::default() }
    }

    pub fn validation(validation: Option<String>) -> Self {
        Self { validation: Some(validation), ..Self::default() }
    }

    pub fn default_value(default_value: Option<Value>) -> Self {
        Self { default_value: Some(default_value), ..Self::default() }
    }

    fn apply(self, field: &mut FieldDefinition) {
        if let Some(name) = self.name {
            field.name = name;
        }
        if let Some(field_type) = self.field_type {
            field.field_type = field_type;
        }
        if let Some(required) = self.required {
            field.required = required;
        }
        if let Some(validation) = self.validation {
            field.validation = validation;
        }
        if let Some(default_value) = self.default_value {
            field.default_value = default_value;
        }
    }
}

/// Ordered, index-addressed list of field definitions
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldList {
    fields: Vec<FieldDefinition>,
}

impl FieldList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a blank text field and return its index
    pub fn add_field(&mut self) -> usize {
        self.fields.push(FieldDefinition::default());
        self.fields.len() - 1
    }

    pub fn update_field(&mut self, index: usize, patch: FieldPatch) -> Result<&FieldDefinition, FieldError> {
        let len = self.fields.len();
        let field = self
            .fields
            .get_mut(index)
            .ok_or(FieldError::IndexOutOfRange { index, len })?;
        patch.apply(field);
        Ok(field)
    }

    /// Remove the field at `index`; later fields shift down by one
    pub fn remove_field(&mut self, index: usize) -> Result<FieldDefinition, FieldError> {
        if index >= self.fields.len() {
            return Err(FieldError::IndexOutOfRange { index, len: self.fields.len() });
        }
        Ok(self.fields.remove(index))
    }

    pub fn get(&self, index: usize) -> Option<&FieldDefinition> {
        self.fields.get(index)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.iter()
    }

    pub fn as_slice(&self) -> &[FieldDefinition] {
        &self.fields
    }

    pub fn into_vec(self) -> Vec<FieldDefinition> {
        self.fields
    }
}

impl From<Vec<FieldDefinition>> for FieldList {
    fn from(fields: Vec<FieldDefinition>) -> Self {
        Self { fields }
    }
}
