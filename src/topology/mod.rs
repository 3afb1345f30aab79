use std::fs;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{NetfusionError, Result};
use crate::models::{Device, Topology};

/// Top-level key holding the device list in a topology document
pub const DEVICES_KEY: &str = "devices";

/// Topology path meaning "read the document from stdin"
pub const STDIN_PATH: &str = "-";

/// Load a topology document from disk.
///
/// Only the document structure is checked here (a `devices` array of
/// objects, each with a non-empty string `name`). Fields needed by a
/// device's template are checked at render time.
pub fn load_topology(path: impl AsRef<Path>) -> Result<Topology> {
    let path = path.as_ref();
    let topology = if path == Path::new(STDIN_PATH) {
        read_topology(std::io::stdin().lock())?
    } else {
        let contents = fs::read_to_string(path).map_err(|e| NetfusionError::io(path, e))?;
        parse_topology_at(path, &contents)?
    };
    tracing::debug!("Loaded {} devices from {}", topology.len(), path.display());
    Ok(topology)
}

/// Read a topology document from a stream such as stdin
pub fn read_topology(mut reader: impl Read) -> Result<Topology> {
    let mut contents = String::new();
    reader
        .read_to_string(&mut contents)
        .map_err(|e| NetfusionError::io(STDIN_PATH, e))?;
    parse_topology(&contents)
}

/// Parse a topology document held in memory (e.g. read from stdin)
pub fn parse_topology(contents: &str) -> Result<Topology> {
    parse_topology_at(Path::new("<stdin>"), contents)
}

fn parse_topology_at(path: &Path, contents: &str) -> Result<Topology> {
    let doc: Value = serde_json::from_str(contents)
        .map_err(|e| NetfusionError::parse(path, format!("invalid JSON: {}", e)))?;

    let root = doc
        .as_object()
        .ok_or_else(|| NetfusionError::parse(path, "top level must be an object"))?;

    let entries = match root.get(DEVICES_KEY) {
        Some(Value::Array(entries)) => entries,
        Some(_) => {
            return Err(NetfusionError::parse(
                path,
                format!("'{}' must be an array", DEVICES_KEY),
            ))
        }
        None => {
            return Err(NetfusionError::parse(
                path,
                format!("missing '{}' collection", DEVICES_KEY),
            ))
        }
    };

    let devices = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| parse_device(path, index, entry))
        .collect::<Result<Vec<_>>>()?;

    Ok(Topology::new(devices))
}

fn parse_device(path: &Path, index: usize, entry: &Value) -> Result<Device> {
    let fields = entry.as_object().ok_or_else(|| {
        NetfusionError::parse(path, format!("device #{} is not an object", index))
    })?;

    match fields.get("name") {
        Some(Value::String(name)) if !name.is_empty() => {}
        Some(Value::String(_)) => {
            return Err(NetfusionError::parse(
                path,
                format!("device #{} has an empty 'name'", index),
            ))
        }
        Some(_) => {
            return Err(NetfusionError::parse(
                path,
                format!("device #{} has a non-string 'name'", index),
            ))
        }
        None => {
            return Err(NetfusionError::parse(
                path,
                format!("device #{} has no 'name'", index),
            ))
        }
    }

    Device::deserialize(entry)
        .map_err(|e| NetfusionError::parse(path, format!("device #{}: {}", index, e)))
}
