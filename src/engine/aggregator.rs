//! Aggregation engine
//!
//! Drives every configured tool over a domain, filters their output through
//! [`admits`], and merges it into one [`RunContext`]. In recursive mode the
//! sweep is repeated, depth first, for every newly admitted subdomain until
//! the depth bound is reached.

use std::pin::pin;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use futures::stream::{self, StreamExt};
use log::{debug, info, warn};

use crate::config::Config;
use crate::domain::admits;
use crate::error::Result;
use crate::tools::{Placeholders, Tool, ToolInvoker};

use super::context::RunContext;
use super::progress::{Progress, SilentProgress};
use super::report::{RunOutcome, RunReport, ToolRun};

type Invocation<'t> = (&'t Tool, Vec<String>, Result<Vec<String>>);

/// Runs a tool set against domains through a [`ToolInvoker`]
pub struct Aggregator {
    invoker: Arc<dyn ToolInvoker>,
    progress: Arc<dyn Progress>,
    tools: Vec<Tool>,
    placeholders: Placeholders,
    parallel_tools: usize,
}

impl Aggregator {
    /// Create an aggregator for the given tools; tools run one at a time
    pub fn new(
        invoker: Arc<dyn ToolInvoker>,
        tools: Vec<Tool>,
        wordlist: impl Into<String>,
        resolvers: impl Into<String>,
    ) -> Self {
        Self {
            invoker,
            progress: Arc::new(SilentProgress),
            tools,
            placeholders: Placeholders::new("", wordlist, resolvers),
            parallel_tools: 1,
        }
    }

    /// Create an aggregator from a loaded configuration
    pub fn from_config(invoker: Arc<dyn ToolInvoker>, config: &Config) -> Self {
        Self::new(invoker, config.tools.clone(), &config.wordlist, &config.resolvers)
            .with_parallel_tools(config.parallel_tools)
    }

    /// Number of tools allowed to run at once for a single domain
    pub fn with_parallel_tools(mut self, parallel_tools: usize) -> Self {
        self.parallel_tools = parallel_tools.max(1);
        self
    }

    /// Observer notified as each tool starts and finishes
    pub fn with_progress(mut self, progress: Arc<dyn Progress>) -> Self {
        self.progress = progress;
        self
    }

    /// Run every tool once against `domain`
    pub async fn run_flat(&self, domain: &str) -> RunOutcome {
        let mut ctx = RunContext::new();
        let mut report = RunReport::default();
        self.sweep(domain, 1, &mut ctx, &mut report).await;
        RunOutcome {
            results: ctx.results,
            report,
        }
    }

    /// Run every tool against `domain`, then against each new subdomain, up to `max_depth` levels
    pub async fn run_recursive(&self, domain: &str, max_depth: usize) -> RunOutcome {
        let mut ctx = RunContext::new();
        let mut report = RunReport::default();
        self.recurse(domain.to_string(), 1, max_depth.max(1), &mut ctx, &mut report)
            .await;
        info!(
            "Recursive run for {} visited {} domains, {} unique results",
            domain,
            ctx.visited.len(),
            ctx.results.len()
        );
        RunOutcome {
            results: ctx.results,
            report,
        }
    }

    fn recurse<'a>(
        &'a self,
        domain: String,
        depth: usize,
        max_depth: usize,
        ctx: &'a mut RunContext,
        report: &'a mut RunReport,
    ) -> BoxFuture<'a, ()> {
        async move {
            if !ctx.visited.mark(&domain) {
                debug!("Skipping {}, already visited", domain);
                return;
            }
            info!("Recursion level {}/{} for {}", depth, max_depth, domain);
            self.progress.level_started(&domain, depth, max_depth);

            let new_subs = self.sweep(&domain, depth, ctx, report).await;
            if depth < max_depth {
                for sub in new_subs {
                    self.recurse(sub, depth + 1, max_depth, &mut *ctx, &mut *report)
                        .await;
                }
            }
        }
        .boxed()
    }

    /// One pass of the tool set over `domain`; returns the subdomains it newly admitted
    async fn sweep(&self, domain: &str, depth: usize, ctx: &mut RunContext, report: &mut RunReport) -> Vec<String> {
        let placeholders = self.placeholders.for_domain(domain);
        let invocations: Vec<BoxFuture<'_, Invocation<'_>>> = self
            .tools
            .iter()
            .map(|tool| {
                let command_line = tool.command_line(&placeholders);
                let invoker = Arc::clone(&self.invoker);
                let progress = Arc::clone(&self.progress);
                let domain = domain.to_string();
                async move {
                    info!("{}: {}", tool.name, command_line.join(" "));
                    progress.tool_started(tool, &domain, &command_line);
                    let outcome = invoker.invoke(&command_line).await;
                    (tool, command_line, outcome)
                }
                .boxed()
            })
            .collect();

        // `buffered` yields in tool order, so merging stays on this task
        let mut finished = pin!(stream::iter(invocations).buffered(self.parallel_tools));
        let mut new_subs = Vec::new();

        while let Some((tool, command_line, outcome)) = finished.next().await {
            let mut run = ToolRun {
                tool: tool.name.clone(),
                domain: domain.to_string(),
                depth,
                command_line,
                raw_count: 0,
                admitted: 0,
                error: None,
            };

            match outcome {
                Ok(lines) => {
                    run.raw_count = lines.len();
                    info!("{} found {} subdomains (raw output) for {}", tool.name, lines.len(), domain);
                    let fresh = ctx.merge(lines.into_iter().filter(|line| admits(line, domain)));
                    run.admitted = fresh.len();
                    new_subs.extend(fresh);
                }
                Err(e) => {
                    warn!("{} not complete: {}", tool.name, e);
                    run.error = Some(e.to_string());
                }
            }
            self.progress.tool_finished(&run);
            report.record(run);
        }

        new_subs
    }
}
