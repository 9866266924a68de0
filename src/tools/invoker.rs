//! Tool invocation
//!
//! Defines the ToolInvoker trait and ProcessInvoker, which spawns one external
//! process per call and collects its standard output line by line.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;

use crate::error::{Result, SubsaggError};

/// Runs one command line and returns its non-empty, trimmed stdout lines
#[async_trait]
pub trait ToolInvoker: Send + Sync {
    /// Execute `command_line` (executable first, then arguments)
    async fn invoke(&self, command_line: &[String]) -> Result<Vec<String>>;
}

/// How a ProcessInvoker treats exit status and slow tools
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokerPolicy {
    /// A non-zero exit is not an error; whatever was printed is kept
    pub ignore_exit_status: bool,
    /// Kill the tool after this long and keep the lines read so far
    pub timeout: Option<Duration>,
}

impl Default for InvokerPolicy {
    fn default() -> Self {
        Self {
            ignore_exit_status: true,
            timeout: None,
        }
    }
}

impl InvokerPolicy {
    /// Set the per-invocation timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Treat a non-zero exit status as an invocation failure
    pub fn strict_exit_status(mut self) -> Self {
        self.ignore_exit_status = false;
        self
    }
}

/// Invoker that spawns real processes without a shell
#[derive(Debug, Clone, Default)]
pub struct ProcessInvoker {
    policy: InvokerPolicy,
}

impl ProcessInvoker {
    pub fn new(policy: InvokerPolicy) -> Self {
        Self { policy }
    }
}

#[async_trait]
impl ToolInvoker for ProcessInvoker {
    async fn invoke(&self, command_line: &[String]) -> Result<Vec<String>> {
        let (bin, args) = command_line
            .split_first()
            .ok_or_else(|| SubsaggError::Invocation("empty command".to_string()))?;

        debug!("Executing: {} {}", bin, args.join(" "));

        let mut child = Command::new(bin)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| SubsaggError::Invocation(format!("failed to start {}: {}", bin, e)))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| SubsaggError::Invocation(format!("stdout of {} was not captured", bin)))?;
        let mut segments = BufReader::new(stdout).split(b'\n');
        let mut lines = Vec::new();

        let drain = async {
            loop {
                match segments.next_segment().await {
                    Ok(Some(bytes)) => {
                        let text = String::from_utf8_lossy(&bytes);
                        let line = text.trim();
                        if !line.is_empty() {
                            debug!("output: {}", line);
                            lines.push(line.to_string());
                        }
                    }
                    Ok(None) => break,
                    Err(e) => {
                        warn!("Stopped reading output of {}: {}", bin, e);
                        break;
                    }
                }
            }
            child.wait().await
        };

        let waited = match self.policy.timeout {
            Some(limit) => match tokio::time::timeout(limit, drain).await {
                Ok(waited) => Some(waited),
                Err(_) => None,
            },
            None => Some(drain.await),
        };

        match waited {
            Some(Ok(status)) if !status.success() => {
                if !self.policy.ignore_exit_status {
                    return Err(SubsaggError::Invocation(format!("{} exited with {}", bin, status)));
                }
                debug!("{} exited with {}, keeping {} lines", bin, status, lines.len());
            }
            Some(Ok(_)) => {}
            Some(Err(e)) => warn!("Failed to wait for {}: {}", bin, e),
            None => {
                warn!(
                    "{} timed out after {:?}, keeping {} lines",
                    bin,
                    self.policy.timeout.unwrap_or_default(),
                    lines.len()
                );
                if let Err(e) = child.kill().await {
                    warn!("Failed to kill {}: {}", bin, e);
                }
            }
        }

        Ok(lines)
    }
}
