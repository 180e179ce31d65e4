//! Configuration loading for repo-insight-mcp
//!
//! Configuration is loaded from:
//! 1. Environment variable REPO_INSIGHT_CONFIG_PATH
//! 2. ~/.binks/repo-insight.toml
//! 3. Default values
//!
//! `REPO_INSIGHT_SEARCH_LIMIT` and `REPO_INSIGHT_QUALITY` override the file.

use anyhow::{Context, Result};
use repo_signals::similarity::{SearchOptions, DEFAULT_CANDIDATE_LIMIT, MAX_SEARCH_QUERIES};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub github: GithubConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub activity: ActivityConfig,
    #[serde(default)]
    pub quality: QualityConfig,
}

/// GitHub collaborator settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    /// Attempts against the statistics endpoint while GitHub computes stats
    #[serde(default = "default_stats_retries")]
    pub stats_retries: u32,
    /// Sleep between statistics attempts
    #[serde(default = "default_stats_retry_delay_ms")]
    pub stats_retry_delay_ms: u64,
    /// Page size for repository searches
    #[serde(default = "default_search_per_page")]
    pub search_per_page: u32,
    /// Page size when listing an owner's repositories
    #[serde(default = "default_owner_page_size")]
    pub owner_page_size: u32,
}

/// Similar-repository discovery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Candidates kept after de-duplication
    #[serde(default = "default_search_limit")]
    pub limit: usize,
    /// Search queries issued per discovery
    #[serde(default = "default_max_queries")]
    pub max_queries: usize,
}

/// Account activity aggregation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityConfig {
    /// Recently pushed repositories merged when no calendar is available
    #[serde(default = "default_max_repos")]
    pub max_repos: usize,
}

/// Quality scoring during comparisons
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Per-repository scoring budget; unbounded when unset
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

// Default value functions
fn default_stats_retries() -> u32 {
    6
}

fn default_stats_retry_delay_ms() -> u64 {
    1000
}

fn default_search_per_page() -> u32 {
    30
}

fn default_owner_page_size() -> u32 {
    100
}

fn default_search_limit() -> usize {
    DEFAULT_CANDIDATE_LIMIT
}

fn default_max_queries() -> usize {
    MAX_SEARCH_QUERIES
}

fn default_max_repos() -> usize {
    6
}

fn default_true() -> bool {
    true
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            stats_retries: default_stats_retries(),
            stats_retry_delay_ms: default_stats_retry_delay_ms(),
            search_per_page: default_search_per_page(),
            owner_page_size: default_owner_page_size(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            limit: default_search_limit(),
            max_queries: default_max_queries(),
        }
    }
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            max_repos: default_max_repos(),
        }
    }
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            timeout_secs: None,
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load() -> Result<Self> {
        let mut config = match Self::find_config_path() {
            Some(path) if path.exists() => {
                tracing::info!("Loading config from: {}", path.display());
                let content = std::fs::read_to_string(&path)
                    .with_context(|| format!("reading {}", path.display()))?;
                Self::from_toml(&content)?
            }
            Some(_) => {
                tracing::info!("Config file not found, using defaults");
                Self::default()
            }
            None => {
                tracing::info!("No config path specified, using defaults");
                Self::default()
            }
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parse a TOML document; missing sections take their defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("invalid repo-insight configuration")
    }

    /// Apply environment overrides read through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(limit) = lookup("REPO_INSIGHT_SEARCH_LIMIT") {
            self.search.limit = limit
                .trim()
                .parse()
                .with_context(|| format!("REPO_INSIGHT_SEARCH_LIMIT is not a number: {limit}"))?;
        }
        if let Some(flag) = lookup("REPO_INSIGHT_QUALITY") {
            self.quality.enabled = !matches!(flag.trim().to_ascii_lowercase().as_str(), "0" | "false");
        }
        Ok(())
    }

    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            limit: self.search.limit,
            max_queries: self.search.max_queries,
        }
    }

    pub fn quality_timeout(&self) -> Option<Duration> {
        self.quality.timeout_secs.map(Duration::from_secs)
    }

    fn find_config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("REPO_INSIGHT_CONFIG_PATH") {
            return Some(PathBuf::from(path));
        }

        if let Ok(home) = std::env::var("HOME") {
            return Some(PathBuf::from(home).join(".binks").join("repo-insight.toml"));
        }

        None
    }
}
