//! Result types shared between commands and the terminal summary.

use std::path::PathBuf;

use restyle_cli::PipelineOutcome;

/// Outcome of a `theme` command run.
pub struct ThemeRunResult {
    pub url: String,
    pub outcome: PipelineOutcome,
    /// Written theme path; `None` on dry runs.
    pub theme_path: Option<PathBuf>,
    /// Written report path; `None` on dry runs.
    pub report_path: Option<PathBuf>,
}

impl ThemeRunResult {
    pub fn has_errors(&self) -> bool {
        !self.outcome.is_valid()
    }
}
