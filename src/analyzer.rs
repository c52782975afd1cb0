use crate::error::Result;
use crate::inventory::ModuleInventory;
use crate::pass::AnalysisPass;
use crate::query::ModuleQuery;

/// Registration value handed to the hosting analysis framework.
///
/// The framework runs [`ModuleAnalyzer::run`] once per analysis pass and
/// keeps the returned inventory as that pass's result, retrievable by
/// downstream analyses.
#[derive(Debug, Clone, Default)]
pub struct ModuleAnalyzer {
    query: ModuleQuery,
}

impl ModuleAnalyzer {
    /// Name the hosting framework registers this analyzer under.
    pub const NAME: &'static str = "modmap";

    /// One-line description for the hosting framework.
    pub const DOC: &'static str = "module ownership information for analyzed files";

    pub fn new() -> Self {
        Self::default()
    }

    /// Use a non-default query invocation, e.g. a wrapper script.
    pub fn with_query(query: ModuleQuery) -> Self {
        Self { query }
    }

    /// Build the module inventory for one analysis pass.
    pub fn run(&self, pass: &dyn AnalysisPass) -> Result<ModuleInventory> {
        ModuleInventory::build(pass, &self.query)
    }
}
