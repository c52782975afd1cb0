use std::cmp::Reverse;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::pass::{AnalysisPass, first_source_file};
use crate::query::ModuleQuery;
use crate::record::ModuleRecord;

/// The modules visible from an analysis pass, deepest directory first.
///
/// An inventory is built once per pass and never mutated afterwards; each
/// pass owns its own inventory, so concurrent passes need no coordination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleInventory {
    records: Vec<ModuleRecord>,
}

impl ModuleInventory {
    /// Query the build tool from the pass's working context and collect the
    /// usable module records.
    ///
    /// The query runs in the directory of the first source file of the
    /// pass. A pass without source files still triggers the query, in the
    /// inherited working directory.
    pub fn build(pass: &dyn AnalysisPass, query: &ModuleQuery) -> Result<Self> {
        let working_dir = first_source_file(pass).and_then(Path::parent);
        let raw = query.invoke(working_dir)?;
        Self::from_query_output(&raw)
    }

    /// Decode, filter, and order raw query output.
    fn from_query_output(raw: &[u8]) -> Result<Self> {
        let mut records = Vec::new();

        for decoded in serde_json::Deserializer::from_slice(raw).into_iter::<ModuleRecord>() {
            let record = decoded.map_err(|source| Error::Decode {
                source,
                output: String::from_utf8_lossy(raw).into_owned(),
            })?;

            // A record without a manifest means the query ran outside any
            // module; the whole inventory is unusable, not just this entry.
            if record.manifest_path.as_os_str().is_empty() {
                return Err(Error::InvalidContext);
            }

            // Referenced dependencies show up as secondary records; only
            // modules rooted in the workspace take part in resolution.
            if !record.primary || record.dir.as_os_str().is_empty() {
                continue;
            }

            records.push(record);
        }

        if records.is_empty() {
            return Err(Error::NoModuleFound);
        }

        // Deepest directory first; the stable sort keeps query order on
        // ties.
        records.sort_by_key(|record| Reverse(record.dir.as_os_str().len()));

        debug!("module inventory holds {} record(s)", records.len());

        Ok(Self { records })
    }

    /// Records in resolution order.
    pub fn records(&self) -> &[ModuleRecord] {
        &self.records
    }

    /// Most specific module containing the pass's representative file.
    ///
    /// Records are held deepest-directory-first, so the first whose
    /// directory prefixes the file is the innermost enclosing module. The
    /// prefix test is `Path::starts_with` on the paths as supplied; no
    /// canonicalization happens here.
    pub fn resolve(&self, pass: &dyn AnalysisPass) -> Result<&ModuleRecord> {
        let file = first_source_file(pass).ok_or(Error::NoSourceFile)?;

        debug!(
            "resolving {:?} against {} record(s)",
            file,
            self.records.len()
        );

        self.records
            .iter()
            .find(|record| file.starts_with(&record.dir))
            .ok_or_else(|| Error::ModuleNotFound {
                path: file.to_path_buf(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn record(path: &str, dir: &str, manifest: &str, primary: bool) -> String {
        serde_json::json!({
            "Path": path,
            "Dir": dir,
            "ManifestPath": manifest,
            "ToolchainVersion": "1.85",
            "Primary": primary,
        })
        .to_string()
    }

    fn pass(files: &[&str]) -> Vec<PathBuf> {
        files.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn test_orders_deepest_directory_first() {
        let raw = format!(
            "{}{}",
            record("outer", "/a", "/a/Cargo.toml", true),
            record("inner", "/a/b", "/a/b/Cargo.toml", true),
        );

        let inventory = ModuleInventory::from_query_output(raw.as_bytes()).unwrap();
        let dirs: Vec<_> = inventory.records().iter().map(|r| r.dir.clone()).collect();
        assert_eq!(dirs, [PathBuf::from("/a/b"), PathBuf::from("/a")]);

        let found = inventory.resolve(&pass(&["/a/b/c/x.rs"])).unwrap();
        assert_eq!(found.path, "inner");
    }

    #[test]
    fn test_ties_keep_query_order() {
        let raw = format!(
            "{}{}",
            record("first", "/work/aa", "/work/aa/Cargo.toml", true),
            record("second", "/work/ab", "/work/ab/Cargo.toml", true),
        );

        let inventory = ModuleInventory::from_query_output(raw.as_bytes()).unwrap();
        assert_eq!(inventory.records()[0].path, "first");
        assert_eq!(inventory.records()[1].path, "second");
    }

    #[test]
    fn test_empty_manifest_aborts_inventory() {
        // The valid record before the bad one does not save the inventory.
        let raw = format!(
            "{}{}",
            record("good", "/a", "/a/Cargo.toml", true),
            record("bad", "/b", "", true),
        );

        let err = ModuleInventory::from_query_output(raw.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::InvalidContext));
    }

    #[test]
    fn test_secondary_records_filtered() {
        let raw = format!(
            "{}{}",
            record("dep", "/registry/dep", "/registry/dep/Cargo.toml", false),
            record("own", "/work/own", "/work/own/Cargo.toml", true),
        );

        let inventory = ModuleInventory::from_query_output(raw.as_bytes()).unwrap();
        assert_eq!(inventory.records().len(), 1);
        assert_eq!(inventory.records()[0].path, "own");
    }

    #[test]
    fn test_only_secondary_records_is_not_found() {
        let raw = record("dep", "/registry/dep", "/registry/dep/Cargo.toml", false);
        let err = ModuleInventory::from_query_output(raw.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::NoModuleFound));
    }

    #[test]
    fn test_empty_dir_filtered() {
        let raw = format!(
            "{}{}",
            record("nodir", "", "/work/nodir/Cargo.toml", true),
            record("own", "/work/own", "/work/own/Cargo.toml", true),
        );

        let inventory = ModuleInventory::from_query_output(raw.as_bytes()).unwrap();
        assert_eq!(inventory.records().len(), 1);
        assert_eq!(inventory.records()[0].path, "own");
    }

    #[test]
    fn test_empty_output_is_not_found() {
        let err = ModuleInventory::from_query_output(b"").unwrap_err();
        assert!(matches!(err, Error::NoModuleFound));
    }

    #[test]
    fn test_malformed_output_keeps_raw_text() {
        let raw = b"{\"Path\": not-json}";
        let err = ModuleInventory::from_query_output(raw).unwrap_err();
        match err {
            Error::Decode { output, .. } => assert!(output.contains("not-json")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_resolve_outside_all_modules() {
        let raw = record("own", "/work/own", "/work/own/Cargo.toml", true);
        let inventory = ModuleInventory::from_query_output(raw.as_bytes()).unwrap();

        let err = inventory.resolve(&pass(&["/elsewhere/x.rs"])).unwrap_err();
        match err {
            Error::ModuleNotFound { path } => {
                assert_eq!(path, PathBuf::from("/elsewhere/x.rs"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_resolve_without_source_file() {
        let raw = record("own", "/work/own", "/work/own/Cargo.toml", true);
        let inventory = ModuleInventory::from_query_output(raw.as_bytes()).unwrap();

        let err = inventory.resolve(&pass(&["/work/own/notes.md"])).unwrap_err();
        assert!(matches!(err, Error::NoSourceFile));
    }

    #[test]
    fn test_resolve_skips_non_source_files() {
        let raw = record("own", "/work/own", "/work/own/Cargo.toml", true);
        let inventory = ModuleInventory::from_query_output(raw.as_bytes()).unwrap();

        let found = inventory
            .resolve(&pass(&["/work/own/README.md", "/work/own/src/lib.rs"]))
            .unwrap();
        assert_eq!(found.path, "own");
    }

    #[test]
    fn test_prefix_match_is_component_wise() {
        // /work/owner is not inside /work/own even though the string is a
        // prefix.
        let raw = record("own", "/work/own", "/work/own/Cargo.toml", true);
        let inventory = ModuleInventory::from_query_output(raw.as_bytes()).unwrap();

        let err = inventory.resolve(&pass(&["/work/owner/x.rs"])).unwrap_err();
        assert!(matches!(err, Error::ModuleNotFound { .. }));
    }
}
