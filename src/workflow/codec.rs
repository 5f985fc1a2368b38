/// Flowchart persistence adapter
///
/// Converts between the editor's typed flowchart and the opaque JSON value stored on the
/// workflow record. Unknown keys ride along in the `extra` maps, so a save-then-reload
/// cycle reproduces the graph exactly.

use serde::Deserialize;
use serde_json::Value;

use crate::error::CodecError;
use crate::workflow::types::FlowchartData;

/// Serialize a flowchart into the stored payload shape
pub fn encode(flowchart: &FlowchartData) -> Result<Value, CodecError> {
    Ok(serde_json::to_value(flowchart)?)
}

/// Deserialize a stored payload; a missing or null payload is the empty flowchart
pub fn decode(stored: Option<&Value>) -> Result<FlowchartData, CodecError> {
    match stored {
        None | Some(Value::Null) => Ok(FlowchartData::default()),
        Some(value) => Ok(FlowchartData::deserialize(value)?),
    }
}

pub fn encode_str(flowchart: &FlowchartData) -> Result<String, CodecError> {
    Ok(serde_json::to_string(flowchart)?)
}

pub fn decode_str(raw: &str) -> Result<FlowchartData, CodecError> {
    let value: Value = serde_json::from_str(raw)?;
    decode(Some(&value))
}
