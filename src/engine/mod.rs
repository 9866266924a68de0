//! Recursive aggregation engine

pub mod aggregator;
pub mod context;
pub mod progress;
pub mod report;

pub use aggregator::Aggregator;
pub use context::{AccumulatedResults, RunContext, VisitedSet};
pub use progress::{Progress, SilentProgress};
pub use report::{RunOutcome, RunReport, ToolRun};
