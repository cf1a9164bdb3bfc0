use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;
use waitrank_core::{Error, Result};

/// Read a data file holding a JSON array of candidate records.
///
/// Records are returned unvalidated. A missing file surfaces as
/// `Error::Io`, invalid JSON or a non-array document as
/// `Error::Serialization`.
pub fn read_records<P: AsRef<Path>>(path: P) -> Result<Vec<Value>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let document: Value = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| Error::Serialization(format!("{}: {}", path.display(), e)))?;

    let records = parse_document(document)?;
    info!("Read {} records from {:?}", records.len(), path);
    Ok(records)
}

/// Parse an in-memory JSON document holding an array of records.
pub fn parse_records(data: &str) -> Result<Vec<Value>> {
    let document: Value =
        serde_json::from_str(data).map_err(|e| Error::Serialization(e.to_string()))?;
    parse_document(document)
}

fn parse_document(document: Value) -> Result<Vec<Value>> {
    match document {
        Value::Array(records) => Ok(records),
        other => Err(Error::Serialization(format!(
            "expected a JSON array of records, found {}",
            kind(&other)
        ))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
