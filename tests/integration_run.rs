//! End-to-end aggregation tests
//!
//! Drives the public API from tool configuration to the persisted result file,
//! using real `sh` processes as tools and a scripted invoker for recursion.

use std::fs;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use subsagg::config::Config;
use subsagg::engine::Aggregator;
use subsagg::error::Result;
use subsagg::sink;
use subsagg::tools::{InvokerPolicy, ProcessInvoker, Tool, ToolInvoker};
use tempfile::TempDir;

/// Reports the root, two siblings and one deeper name for every domain
#[derive(Default)]
struct CyclingInvoker {
    calls: AtomicUsize,
}

#[async_trait]
impl ToolInvoker for CyclingInvoker {
    async fn invoke(&self, command_line: &[String]) -> Result<Vec<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let domain = command_line.last().cloned().unwrap_or_default();
        Ok(vec![
            "example.com".to_string(),
            "a.example.com".to_string(),
            "b.example.com".to_string(),
            format!("deep.{}", domain),
        ])
    }
}

fn sh_tool(name: &str, script: &str) -> Tool {
    Tool::new(name, ["sh", "-c", script, name, "{domain}"])
}

fn config_with(tools: Vec<Tool>) -> Config {
    Config {
        tools,
        ..Config::default()
    }
}

/// A missing binary is reported; the other tool's output still lands in the file
#[tokio::test]
async fn test_flat_run_with_failing_tool() -> Result<()> {
    let temp = TempDir::new()?;
    let config = config_with(vec![
        Tool::new("ghost", ["subsagg-ghost-tool-does-not-exist", "-d", "{domain}"]),
        sh_tool("printer", "echo sub1.$1"),
    ]);

    let invoker = Arc::new(ProcessInvoker::new(config.invoker_policy()));
    let outcome = Aggregator::from_config(invoker, &config)
        .run_flat("example.com")
        .await;

    assert_eq!(outcome.results.sorted(), vec!["sub1.example.com"]);
    let failures: Vec<_> = outcome.report.failures().collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].tool, "ghost");

    let path = sink::persist(&outcome.results, "example.com", temp.path())?;
    assert_eq!(fs::read_to_string(path)?, "sub1.example.com");
    Ok(())
}

/// Output is filtered, deduplicated across tools and written sorted
#[tokio::test]
async fn test_flat_run_filters_and_sorts() -> Result<()> {
    let temp = TempDir::new()?;
    let config = config_with(vec![
        sh_tool("first", "printf 'z.%s\\n  a.%s  \\n\\nnoise line\\nother.org\\n' $1 $1"),
        sh_tool("second", "printf 'm.%s\\na.%s\\nevil%s\\n' $1 $1 $1; exit 2"),
    ]);

    let invoker = Arc::new(ProcessInvoker::new(config.invoker_policy()));
    let outcome = Aggregator::from_config(invoker, &config)
        .run_flat("example.com")
        .await;

    assert_eq!(outcome.report.failures().count(), 0);
    let path = sink::persist(&outcome.results, "example.com", temp.path())?;
    assert_eq!(
        fs::read_to_string(path)?,
        "a.example.com\nevilexample.com\nm.example.com\nz.example.com"
    );
    Ok(())
}

/// Tools that print nothing still produce a (possibly empty) result file
#[tokio::test]
async fn test_silent_tools_produce_empty_file() -> Result<()> {
    let temp = TempDir::new()?;
    let config = config_with(vec![sh_tool("quiet", "true")]);

    let invoker = Arc::new(ProcessInvoker::new(config.invoker_policy()));
    let outcome = Aggregator::from_config(invoker, &config)
        .run_flat("example.com")
        .await;

    assert!(outcome.results.is_empty());
    let path = sink::persist(&outcome.results, "example.com", temp.path())?;
    assert_eq!(fs::read_to_string(path)?, "");
    Ok(())
}

/// Strict exit status turns a failing tool into a reported failure
#[tokio::test]
async fn test_strict_exit_status_reports_failure() {
    let tools = vec![sh_tool("flaky", "echo a.$1; exit 1")];
    let invoker = Arc::new(ProcessInvoker::new(InvokerPolicy::default().strict_exit_status()));
    let outcome = Aggregator::new(invoker, tools, "", "").run_flat("example.com").await;

    assert!(outcome.results.is_empty());
    assert_eq!(outcome.report.failures().count(), 1);
}

/// Parallel tools give the same results as sequential ones
#[tokio::test]
async fn test_parallel_matches_sequential() {
    let tools = vec![
        sh_tool("one", "sleep 0.2; echo one.$1"),
        sh_tool("two", "echo two.$1"),
        sh_tool("three", "echo one.$1; echo three.$1"),
    ];

    let sequential = Aggregator::new(Arc::new(ProcessInvoker::default()), tools.clone(), "", "")
        .run_flat("example.com")
        .await;
    let parallel = Aggregator::new(Arc::new(ProcessInvoker::default()), tools, "", "")
        .with_parallel_tools(3)
        .run_flat("example.com")
        .await;

    assert_eq!(sequential.results, parallel.results);
    assert_eq!(
        parallel.results.sorted(),
        vec!["one.example.com", "three.example.com", "two.example.com"]
    );
    let admitted: Vec<usize> = parallel.report.runs.iter().map(|r| r.admitted).collect();
    assert_eq!(admitted, vec![1, 1, 1]);
}

/// Recursion through real processes: each level prints one deeper name
#[tokio::test]
async fn test_recursive_run_with_processes() {
    let tools = vec![sh_tool("deeper", "echo x.$1")];
    let outcome = Aggregator::new(Arc::new(ProcessInvoker::default()), tools, "", "")
        .run_recursive("example.com", 3)
        .await;

    assert_eq!(
        outcome.results.sorted(),
        vec!["x.example.com", "x.x.example.com", "x.x.x.example.com"]
    );
    assert_eq!(outcome.report.invocation_count(), 3);
}

/// A tool that reports the root and siblings back never loops
#[tokio::test]
async fn test_recursive_cycle_terminates() {
    let invoker = Arc::new(CyclingInvoker::default());
    let tools = vec![Tool::new("cycler", ["cycler", "{domain}"])];

    let outcome = Aggregator::new(invoker.clone(), tools, "", "")
        .run_recursive("example.com", 3)
        .await;

    let visited = outcome.report.domains();
    let mut unique = visited.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(visited.len(), unique.len());
    assert_eq!(invoker.calls.load(Ordering::SeqCst), outcome.report.invocation_count());
    assert!(outcome.results.contains("deep.deep.a.example.com"));
    assert!(!outcome.results.contains("deep.deep.deep.a.example.com"));
}
