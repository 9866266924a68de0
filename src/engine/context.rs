//! Shared state for one aggregation run

use std::collections::HashSet;

/// Unique domains admitted during a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccumulatedResults {
    domains: HashSet<String>,
}

impl AccumulatedResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a domain; returns true if it was not present before
    pub fn insert(&mut self, domain: impl Into<String>) -> bool {
        self.domains.insert(domain.into())
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.domains.contains(domain)
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    /// Lexicographically sorted copy
    pub fn sorted(&self) -> Vec<String> {
        let mut sorted: Vec<String> = self.domains.iter().cloned().collect();
        sorted.sort();
        sorted
    }
}

impl<S: Into<String>> FromIterator<S> for AccumulatedResults {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            domains: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Domains already used as recursion roots
#[derive(Debug, Clone, Default)]
pub struct VisitedSet {
    domains: HashSet<String>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a domain visited; returns false if it already was
    pub fn mark(&mut self, domain: &str) -> bool {
        self.domains.insert(domain.to_string())
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.domains.contains(domain)
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

/// Results plus visited roots, passed by reference through every recursive call
#[derive(Debug, Default)]
pub struct RunContext {
    pub results: AccumulatedResults,
    pub visited: VisitedSet,
}

impl RunContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admit already-filtered lines, returning those that were new, in order
    pub fn merge<I, S>(&mut self, lines: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        lines
            .into_iter()
            .map(Into::into)
            .filter(|line| self.results.insert(line.clone()))
            .collect()
    }
}
