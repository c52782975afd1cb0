//! modmap - resolve which build module owns a source file under analysis
//!
//! This crate provides functionality to:
//! - Inventory the build modules visible from an analysis pass's working
//!   directory by querying the build tool once per pass
//! - Match an analyzed file to the most specific enclosing module, which
//!   disambiguates nested modules and multi-module workspaces
//! - Read a resolved module's manifest to inspect declared dependencies
//!   and minimum toolchain requirements
pub mod analyzer;
pub mod error;
pub mod inventory;
pub mod manifest;
pub mod pass;
pub mod query;
pub mod record;

// Re-export commonly used types
pub use analyzer::ModuleAnalyzer;
pub use error::{Error, Result};
pub use inventory::ModuleInventory;
pub use manifest::read_module_manifest;
pub use pass::AnalysisPass;
pub use query::ModuleQuery;
pub use record::ModuleRecord;
