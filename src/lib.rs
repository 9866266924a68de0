//! subsagg - subdomain aggregator
//!
//! Runs a configurable set of external subdomain-discovery tools against a
//! target domain, keeps the lines that look like subdomains of the target,
//! and optionally repeats the sweep for newly found subdomains up to a
//! bounded depth.

pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod sink;
pub mod tools;

pub use config::Config;
pub use engine::{AccumulatedResults, Aggregator, RunOutcome, RunReport};
pub use error::{Result, SubsaggError};
