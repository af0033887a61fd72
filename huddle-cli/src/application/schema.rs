use crate::infrastructure::{CliError, Result};
use huddle_core::{ClientMessage, RelayEvent};
use schemars::schema::RootSchema;
use schemars::schema_for;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// JSON schemas of both wire directions, keyed by file name
pub fn protocol_schemas() -> Vec<(&'static str, RootSchema)> {
    vec![
        ("client-message.schema.json", schema_for!(ClientMessage)),
        ("relay-event.schema.json", schema_for!(RelayEvent)),
    ]
}

/// Write one schema file per message direction into `dir`
pub fn write_schemas(dir: &Path) -> Result<Vec<PathBuf>> {
    if dir.exists() && !dir.is_dir() {
        return Err(CliError::invalid_directory(dir.to_path_buf()));
    }
    fs::create_dir_all(dir)?;

    let mut written = Vec::new();
    for (file_name, schema) in protocol_schemas() {
        let path = dir.join(file_name);
        fs::write(&path, serde_json::to_string_pretty(&schema)?)?;
        info!(path = %path.display(), "Wrote schema");
        written.push(path);
    }
    Ok(written)
}

/// Both schemas in one document, for stdout
pub fn combined_schema() -> Result<String> {
    let mut combined = serde_json::Map::new();
    for (file_name, schema) in protocol_schemas() {
        let key = file_name.trim_end_matches(".schema.json");
        combined.insert(key.to_string(), serde_json::to_value(schema)?);
    }
    Ok(serde_json::to_string_pretty(&combined)?)
}
