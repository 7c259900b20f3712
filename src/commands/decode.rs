//! `idmint decode` command.

use chrono::SecondsFormat;
use serde::Serialize;

use crate::error::Result;
use crate::id::{GeneratedId, NodeId, SnowflakeParts};

#[derive(Debug, Serialize)]
struct DecodedId {
    id: GeneratedId,
    timestamp_delta: u64,
    unix_millis: i64,
    timestamp: Option<String>,
    node_id: NodeId,
    sequence: u16,
}

/// Execute the `decode` command.
///
/// # Errors
///
/// Returns [`crate::error::IdError::InvalidId`] if `raw` is not a
/// non-negative decimal that fits an `i64`.
pub fn run(raw: &str, json: bool) -> Result<String> {
    let id: GeneratedId = raw.parse()?;
    let parts = SnowflakeParts::decompose(id);
    let timestamp = parts
        .timestamp()
        .map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true));
    let decoded = DecodedId {
        id,
        timestamp_delta: parts.timestamp_delta,
        unix_millis: parts.unix_millis(),
        timestamp,
        node_id: parts.node_id,
        sequence: parts.sequence,
    };

    if json {
        return Ok(format!("{}\n", serde_json::to_string(&decoded)?));
    }

    let timestamp = decoded.timestamp.as_deref().unwrap_or("out of range");
    let fields = [
        ("id:", decoded.id.to_string()),
        ("timestamp_delta:", format!("{} ms", decoded.timestamp_delta)),
        ("unix_millis:", decoded.unix_millis.to_string()),
        ("timestamp:", timestamp.to_string()),
        ("node_id:", decoded.node_id.to_string()),
        ("sequence:", decoded.sequence.to_string()),
    ];
    let out: String = fields
        .iter()
        .map(|(label, value)| format!("{label:<17}{value}\n"))
        .collect();
    Ok(out)
}
