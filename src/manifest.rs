use std::fs;

use cargo_toml::Manifest;

use crate::error::Result;
use crate::record::ModuleRecord;

/// Load and parse the manifest of a resolved module.
///
/// Read failures and parse failures surface as distinct error kinds.
pub fn read_module_manifest(record: &ModuleRecord) -> Result<Manifest> {
    let raw = fs::read(&record.manifest_path)?;
    Ok(Manifest::from_slice(&raw)?)
}
