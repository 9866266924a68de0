//! Run configuration
//!
//! The tool list, wordlist and resolvers paths, plus invoker settings,
//! stored as YAML in `subsagg.yaml`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Result, SubsaggError};
use crate::tools::{InvokerPolicy, Tool};

/// Config file name, both in the working directory and under the user config dir
pub const CONFIG_FILE_NAME: &str = "subsagg.yaml";

/// Default wordlist for brute-forcing tools.
pub const DEFAULT_WORDLIST: &str = "/usr/share/seclists/Discovery/DNS/subdomains-top1million-5000.txt";

/// Default resolvers file.
pub const DEFAULT_RESOLVERS: &str = "/etc/resolv.conf";

/// Default per-tool timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 600;

/// Built-in tool set used when no tools are configured.
pub fn default_tools() -> Vec<Tool> {
    vec![
        Tool::new("subfinder", ["subfinder", "-d", "{domain}", "-silent"]),
        Tool::new("assetfinder", ["assetfinder", "--subs-only", "{domain}"]),
        Tool::new("amass", ["amass", "enum", "-passive", "-d", "{domain}"]),
        Tool::new("findomain", ["findomain", "-t", "{domain}", "--quiet"]),
        Tool::new("sublist3r", ["sublist3r", "-d", "{domain}", "-o", "-"]),
        Tool::new("chaos", ["chaos", "-d", "{domain}", "-silent"]),
        Tool::new("crtsh", ["crtsh", "{domain}"]),
        Tool::new("knockpy", ["knockpy", "-d", "{domain}"]),
        Tool::new(
            "shuffledns",
            ["shuffledns", "-d", "{domain}", "-list", "{wordlist}", "-r", "{resolvers}", "-silent"],
        ),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tools run against every domain, in this order.
    pub tools: Vec<Tool>,

    /// Substituted for `{wordlist}`.
    pub wordlist: String,

    /// Substituted for `{resolvers}`.
    pub resolvers: String,

    /// Per-tool timeout; 0 disables it.
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// How many tools may run at once against one domain.
    #[serde(rename = "parallel-tools")]
    pub parallel_tools: usize,

    /// Keep output of tools that exit non-zero.
    #[serde(rename = "ignore-exit-status")]
    pub ignore_exit_status: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tools: default_tools(),
            wordlist: DEFAULT_WORDLIST.to_string(),
            resolvers: DEFAULT_RESOLVERS.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            parallel_tools: 1,
            ignore_exit_status: true,
        }
    }
}

impl Config {
    /// Candidate config files, most specific first.
    fn candidates(explicit_path: Option<&PathBuf>) -> Vec<PathBuf> {
        if let Some(path) = explicit_path {
            return vec![path.clone()];
        }
        let mut paths = vec![PathBuf::from(CONFIG_FILE_NAME)];
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join(env!("CARGO_PKG_NAME")).join(CONFIG_FILE_NAME));
        }
        paths
    }

    /// Path config changes are written to: the explicit path, else the first
    /// existing candidate, else `./subsagg.yaml`.
    pub fn locate(explicit_path: Option<&PathBuf>) -> PathBuf {
        if let Some(path) = explicit_path {
            return path.clone();
        }
        Self::candidates(None)
            .into_iter()
            .find(|path| path.exists())
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
    }

    /// Load configuration with fallback chain.
    ///
    /// Search order:
    /// 1. Explicit path if provided
    /// 2. ./subsagg.yaml
    /// 3. ~/.config/subsagg/subsagg.yaml
    /// 4. Defaults
    ///
    /// A file that cannot be read or parsed is logged and replaced by defaults.
    pub fn load(explicit_path: Option<&PathBuf>) -> Self {
        for path in Self::candidates(explicit_path) {
            if !path.exists() {
                if explicit_path.is_some() {
                    log::warn!("Config file {} does not exist, using defaults", path.display());
                }
                continue;
            }
            return match Self::load_from_file(&path) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("Failed to load {}: {}, using defaults", path.display(), e);
                    Self::default()
                }
            };
        }

        log::info!("No config file found, using defaults");
        Self::default()
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config.normalize())
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_yaml()?)?;
        log::info!("Saved config to: {}", path.display());
        Ok(())
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Fill empty fields from the defaults.
    pub fn normalize(mut self) -> Self {
        let defaults = Self::default();
        if self.tools.is_empty() {
            self.tools = defaults.tools;
        }
        if self.wordlist.trim().is_empty() {
            self.wordlist = defaults.wordlist;
        }
        if self.resolvers.trim().is_empty() {
            self.resolvers = defaults.resolvers;
        }
        if self.parallel_tools == 0 {
            self.parallel_tools = 1;
        }
        self
    }

    pub fn invoker_policy(&self) -> InvokerPolicy {
        InvokerPolicy {
            ignore_exit_status: self.ignore_exit_status,
            timeout: (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs)),
        }
    }

    pub fn find_tool(&self, name: &str) -> Option<&Tool> {
        self.tools.iter().find(|tool| tool.name == name)
    }

    pub fn add_tool(&mut self, name: &str, cmd: Vec<String>) -> Result<()> {
        if self.find_tool(name).is_some() {
            return Err(SubsaggError::Config(format!("Tool '{}' is already configured", name)));
        }
        if cmd.iter().all(|token| token.trim().is_empty()) {
            return Err(SubsaggError::Config(format!("Tool '{}' needs a command", name)));
        }
        self.tools.push(Tool::new(name, cmd));
        Ok(())
    }

    /// Remove a tool by name; returns whether it was present.
    pub fn remove_tool(&mut self, name: &str) -> bool {
        let before = self.tools.len();
        self.tools.retain(|tool| tool.name != name);
        self.tools.len() != before
    }

    pub fn set_wordlist(&mut self, path: impl Into<String>) {
        self.wordlist = path.into();
    }

    pub fn set_resolvers(&mut self, path: impl Into<String>) {
        self.resolvers = path.into();
    }
}
