use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::error::{Error, Result};

const QUERY_PROGRAM: &str = "cargo";
const QUERY_ARGS: &[&str] = &["modlist", "--json"];

/// External process that lists build modules as a stream of JSON records.
///
/// The query runs once per analysis pass with its working directory set
/// next to the analyzed files, blocks until the process exits, and hands
/// back the fully buffered stdout for decoding. There is no timeout and no
/// retry; a hanging producer blocks the calling pass.
#[derive(Debug, Clone)]
pub struct ModuleQuery {
    program: String,
    args: Vec<String>,
}

impl Default for ModuleQuery {
    fn default() -> Self {
        Self {
            program: QUERY_PROGRAM.to_string(),
            args: QUERY_ARGS.iter().map(|arg| arg.to_string()).collect(),
        }
    }
}

impl ModuleQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the query at another producer, e.g. a wrapper script.
    ///
    /// The replacement must honor the same contract: module records as
    /// concatenated JSON objects on stdout, non-zero exit on failure.
    pub fn custom(
        program: impl Into<String>,
        args: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Run the query once and return its raw stdout.
    ///
    /// When `working_dir` is `None` the child inherits the process's
    /// working directory.
    pub(crate) fn invoke(&self, working_dir: Option<&Path>) -> Result<Vec<u8>> {
        let mut command = Command::new(&self.program);
        command.args(&self.args);

        if let Some(dir) = working_dir {
            command.current_dir(dir);
        }

        debug!(
            "running module query '{} {}' in {:?}",
            self.program,
            self.args.join(" "),
            working_dir
        );

        let output = command
            .output()
            .map_err(|err| Error::QueryFailed(format!("spawning {}: {}", self.program, err)))?;

        if !output.status.success() {
            let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
            combined.push_str(&String::from_utf8_lossy(&output.stderr));
            return Err(Error::QueryFailed(format!(
                "{}: {}",
                output.status,
                combined.trim()
            )));
        }

        Ok(output.stdout)
    }
}
