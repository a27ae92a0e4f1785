//! JSON encoding of a command list
//!
//! The output is a JSON array with one object per command, in emission
//! order. Unset axes are `null`, never `0`. The decoder is used by tests and
//! tooling that read a saved program back; it reports the index of the first
//! element it cannot accept.

use crate::command::CommandRecord;
use edmkit_core::{DecodeError, Result};
use serde_json::Value;
use tracing::debug;

/// Encode `records` as a JSON array, pretty printed if `pretty`
pub fn to_json_string(records: &[CommandRecord], pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(records)?
    } else {
        serde_json::to_string(records)?
    };
    debug!(commands = records.len(), bytes = json.len(), "command list serialized");
    Ok(json)
}

/// Encode `records` as a JSON value
pub fn to_json_value(records: &[CommandRecord]) -> Result<Value> {
    Ok(serde_json::to_value(records)?)
}

/// Decode a JSON command list
pub fn from_json_str(json: &str) -> Result<Vec<CommandRecord>> {
    let value: Value = serde_json::from_str(json).map_err(|e| DecodeError::Malformed {
        reason: e.to_string(),
    })?;
    Ok(from_json_value(value)?)
}

/// Decode an already parsed command list
pub fn from_json_value(value: Value) -> std::result::Result<Vec<CommandRecord>, DecodeError> {
    let Value::Array(elements) = value else {
        return Err(DecodeError::NotAnArray);
    };
    debug!(commands = elements.len(), "decoding command list");

    elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| {
            if !element.is_object() {
                return Err(DecodeError::NotAnObject { index });
            }
            serde_json::from_value(element).map_err(|e| DecodeError::InvalidRecord {
                index,
                reason: e.to_string(),
            })
        })
        .collect()
}
