//! JSON reading operations.

use std::{fs::File, io::BufReader, path::Path};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

/// Deserialize a JSON file.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path)
        .with_context(|| format!("[io::json] Failed to open JSON file: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("[io::json] Failed to parse JSON from {:?}", path))
}

/// Deserialize a JSON string (for WASM/browser use).
pub(crate) fn read_json_string<T: DeserializeOwned>(json: &str) -> Result<T> {
    serde_json::from_str(json).context("[io::json] Failed to parse JSON from string")
}
