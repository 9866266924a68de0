//! Tool definitions and command-line templating
//!
//! A tool is an external discovery program described by a name and a list of
//! command tokens. Tokens may carry `{domain}`, `{wordlist}` and `{resolvers}`
//! placeholders which are substituted before the process is spawned.

use serde::{Deserialize, Serialize};

/// Placeholder for the domain under consideration
pub const DOMAIN_PLACEHOLDER: &str = "{domain}";
/// Placeholder for the configured wordlist path
pub const WORDLIST_PLACEHOLDER: &str = "{wordlist}";
/// Placeholder for the configured resolvers path
pub const RESOLVERS_PLACEHOLDER: &str = "{resolvers}";

/// An external subdomain-discovery tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tool {
    /// Tool name (e.g., "subfinder")
    pub name: String,
    /// Command template; the first token is the executable
    pub cmd: Vec<String>,
}

impl Tool {
    /// Create a new tool definition
    pub fn new<S: Into<String>>(name: impl Into<String>, cmd: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: name.into(),
            cmd: cmd.into_iter().map(Into::into).collect(),
        }
    }

    /// Build the concrete command line for one domain
    pub fn command_line(&self, placeholders: &Placeholders) -> Vec<String> {
        self.cmd.iter().map(|token| placeholders.apply(token)).collect()
    }
}

/// Substitution map applied to every token of a tool's command template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholders {
    pub domain: String,
    pub wordlist: String,
    pub resolvers: String,
}

impl Placeholders {
    pub fn new(domain: impl Into<String>, wordlist: impl Into<String>, resolvers: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            wordlist: wordlist.into(),
            resolvers: resolvers.into(),
        }
    }

    /// Same wordlist and resolvers, different domain
    pub fn for_domain(&self, domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            ..self.clone()
        }
    }

    fn pairs(&self) -> [(&'static str, &str); 3] {
        [
            (DOMAIN_PLACEHOLDER, self.domain.as_str()),
            (WORDLIST_PLACEHOLDER, self.wordlist.as_str()),
            (RESOLVERS_PLACEHOLDER, self.resolvers.as_str()),
        ]
    }

    /// Substitute every placeholder occurrence in a single token
    pub fn apply(&self, token: &str) -> String {
        self.pairs()
            .iter()
            .fold(token.to_string(), |acc, (key, value)| acc.replace(key, value))
    }
}
