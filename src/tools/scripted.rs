//! Scripted invoker that returns canned lines without spawning processes

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{Result, SubsaggError};

use super::invoker::ToolInvoker;

type Responder = Box<dyn Fn(&[String]) -> Result<Vec<String>> + Send + Sync>;

/// Fake invoker keyed by executable name, recording every command line it sees
#[derive(Default)]
pub struct ScriptedInvoker {
    outputs: HashMap<String, Vec<String>>,
    responder: Option<Responder>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl ScriptedInvoker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixed output for an executable, whatever its arguments
    pub fn with_output<S: Into<String>>(mut self, executable: &str, lines: impl IntoIterator<Item = S>) -> Self {
        self.outputs
            .insert(executable.to_string(), lines.into_iter().map(Into::into).collect());
        self
    }

    /// Compute output from the full command line; fixed outputs take precedence
    pub fn with_responder(
        mut self,
        responder: impl Fn(&[String]) -> Result<Vec<String>> + Send + Sync + 'static,
    ) -> Self {
        self.responder = Some(Box::new(responder));
        self
    }

    /// Command lines received so far, in call order
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|calls| calls.len()).unwrap_or_default()
    }
}

#[async_trait]
impl ToolInvoker for ScriptedInvoker {
    async fn invoke(&self, command_line: &[String]) -> Result<Vec<String>> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(command_line.to_vec());
        }

        let bin = command_line
            .first()
            .ok_or_else(|| SubsaggError::Invocation("empty command".to_string()))?;

        if let Some(lines) = self.outputs.get(bin) {
            return Ok(lines.clone());
        }
        match &self.responder {
            Some(responder) => responder(command_line),
            None => Err(SubsaggError::Invocation(format!(
                "failed to start {}: No such file or directory",
                bin
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmd(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[tokio::test]
    async fn test_fixed_output() {
        let invoker = ScriptedInvoker::new().with_output("subfinder", ["a.example.com"]);
        let lines = invoker.invoke(&cmd(&["subfinder", "-d", "example.com"])).await.unwrap();
        assert_eq!(lines, vec!["a.example.com"]);
        assert_eq!(invoker.call_count(), 1);
    }

    #[tokio::test]
    async fn test_unknown_executable_fails_to_start() {
        let invoker = ScriptedInvoker::new();
        let err = invoker.invoke(&cmd(&["amass"])).await.unwrap_err();
        assert!(matches!(err, SubsaggError::Invocation(_)));
        assert_eq!(invoker.calls(), vec![cmd(&["amass"])]);
    }

    #[tokio::test]
    async fn test_responder_sees_arguments() {
        let invoker = ScriptedInvoker::new().with_responder(|cmdline| Ok(vec![format!("www.{}", cmdline[1])]));
        let lines = invoker.invoke(&cmd(&["echoer", "example.org"])).await.unwrap();
        assert_eq!(lines, vec!["www.example.org"]);
    }

    #[tokio::test]
    async fn test_empty_command_line() {
        let invoker = ScriptedInvoker::new();
        assert!(invoker.invoke(&[]).await.is_err());
    }
}
