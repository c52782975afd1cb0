use std::io;
use std::path::PathBuf;

/// Errors that can occur while building or resolving a module inventory
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("module query failed: {0}")]
    QueryFailed(String),

    #[error("decoding module records: {source}: {output}")]
    Decode {
        source: serde_json::Error,
        output: String,
    },

    #[error("working directory is not part of a module")]
    InvalidContext,

    #[error("no module manifest found")]
    NoModuleFound,

    #[error("analysis pass contains no source file")]
    NoSourceFile,

    #[error("no module found for {}", .path.display())]
    ModuleNotFound { path: PathBuf },

    #[error("reading module manifest: {0}")]
    ManifestRead(#[from] io::Error),

    #[error("parsing module manifest: {0}")]
    ManifestParse(#[from] cargo_toml::Error),
}

/// Result type alias for modmap operations
pub type Result<T> = std::result::Result<T, Error>;
