//! Per-invocation records collected during a run

use super::context::AccumulatedResults;

/// Outcome of running one tool against one domain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolRun {
    pub tool: String,
    pub domain: String,
    /// Recursion level (1 for the target itself)
    pub depth: usize,
    pub command_line: Vec<String>,
    /// Lines the tool printed, before filtering
    pub raw_count: usize,
    /// Lines newly admitted into the results
    pub admitted: usize,
    /// Set when the tool could not be run
    pub error: Option<String>,
}

impl ToolRun {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Everything that happened during a run, in execution order
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub runs: Vec<ToolRun>,
}

impl RunReport {
    pub fn record(&mut self, run: ToolRun) {
        self.runs.push(run);
    }

    pub fn invocation_count(&self) -> usize {
        self.runs.len()
    }

    /// Runs that failed to produce output
    pub fn failures(&self) -> impl Iterator<Item = &ToolRun> {
        self.runs.iter().filter(|run| !run.succeeded())
    }

    /// Distinct domains tools were run against, in first-seen order
    pub fn domains(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for run in &self.runs {
            if !seen.contains(&run.domain.as_str()) {
                seen.push(&run.domain);
            }
        }
        seen
    }
}

/// Results and report of one `run_flat` / `run_recursive` call
#[derive(Debug, Clone, Default)]
pub struct RunOutcome {
    pub results: AccumulatedResults,
    pub report: RunReport,
}
