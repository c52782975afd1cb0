use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One module known to the build tool, as reported by the module query.
///
/// Records are decoded from the query's JSON output; fields the query
/// leaves out decode to their empty values rather than failing, so the
/// usability checks happen in one place when the inventory is built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ModuleRecord {
    /// Logical module identifier.
    pub path: String,

    /// Absolute directory the module root maps to.
    pub dir: PathBuf,

    /// Location of the module's manifest file. Empty means the query ran
    /// outside any module context.
    pub manifest_path: PathBuf,

    /// Advisory minimum-toolchain version, opaque to this crate.
    pub toolchain_version: String,

    /// Whether the module is rooted in the current workspace rather than
    /// being a referenced dependency.
    pub primary: bool,
}
