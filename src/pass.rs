use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Extension marking a source file of the analyzed language.
const SOURCE_EXTENSION: &str = "rs";

/// A host-supplied batch of source files analyzed together.
///
/// Paths must be absolute and already resolved; nothing downstream
/// canonicalizes them or follows symlinks.
pub trait AnalysisPass {
    /// Files in the pass, in host order.
    fn files(&self) -> &[PathBuf];
}

impl AnalysisPass for Vec<PathBuf> {
    fn files(&self) -> &[PathBuf] {
        self
    }
}

impl AnalysisPass for [PathBuf] {
    fn files(&self) -> &[PathBuf] {
        self
    }
}

/// First file in the pass carrying the analyzed language's extension.
///
/// All files in one pass share a single module context, so one file stands
/// in for the whole pass.
pub(crate) fn first_source_file(pass: &dyn AnalysisPass) -> Option<&Path> {
    pass.files()
        .iter()
        .map(PathBuf::as_path)
        .find(|file| file.extension() == Some(OsStr::new(SOURCE_EXTENSION)))
}
