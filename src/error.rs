/// Error taxonomy for the reqflow client
///
/// Network failures, pre-network validation failures, and graph/schema misuse are
/// kept apart so callers can surface each one differently.

use thiserror::Error;

use crate::project::types::EntityId;

/// Failure talking to the requirements API. Never retried.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{method} {url} could not be sent: {source}")]
    Transport {
        method: &'static str,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{method} {url} returned HTTP {status}")]
    Status {
        method: &'static str,
        url: String,
        status: u16,
    },

    #[error("response from {url} could not be decoded: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("requirements API unavailable: {0}")]
    Unavailable(String),
}

/// Input rejected before any network call is issued.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{entity} name is required")]
    EmptyName { entity: &'static str },

    #[error("field #{index} needs a name")]
    EmptyFieldName { index: usize },

    #[error("{kind} {id} does not belong to this project")]
    ForeignReference { kind: &'static str, id: EntityId },
}

/// Diagram graph misuse.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("node '{id}' is not part of this diagram")]
    InvalidReference { id: String },
}

/// Field list misuse.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("field index {index} is out of range for {len} fields")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Stored flowchart payload could not be read or written.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("malformed flowchart payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Errors surfaced by the diagram editor.
#[derive(Error, Debug)]
pub enum EditorError {
    #[error("a save is already in flight for this workflow")]
    SaveInProgress,

    #[error("the node picker is not open")]
    PickerClosed,

    #[error("{entity_type} {id} is not among the loaded project entities")]
    UnknownEntity {
        entity_type: crate::workflow::types::EntityType,
        id: EntityId,
    },

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Api(#[from] ApiError),
}
