//! Live progress notifications emitted while a run is in flight

use crate::tools::Tool;

use super::report::ToolRun;

/// Observer for tool invocations as they start and finish
pub trait Progress: Send + Sync {
    /// A recursion root is about to be swept
    fn level_started(&self, _domain: &str, _depth: usize, _max_depth: usize) {}

    /// A tool process is about to be started
    fn tool_started(&self, _tool: &Tool, _domain: &str, _command_line: &[String]) {}

    /// A tool finished (or failed to start) and its output was merged
    fn tool_finished(&self, _run: &ToolRun) {}
}

/// Progress observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentProgress;

impl Progress for SilentProgress {}
