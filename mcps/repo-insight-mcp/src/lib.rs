//! Repo Insight MCP Library
//!
//! MCP tools for GitHub repository analysis on top of the `repo-signals`
//! engine, with GitHub access through the `gh` CLI.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use repo_insight_mcp::{Config, RepoInsightMcpServer};
//!
//! let server = RepoInsightMcpServer::new(Config::load()?);
//! // Use with in-memory transport or serve via stdio
//! ```
//!
//! # Features
//! - Insights: repository details, language breakdown, activity and contributors
//! - Activity: merged 52-week commit calendars for repositories and accounts
//! - Domain: classify a repository's application domain
//! - Quality: engineering hygiene signals and scores
//! - Comparison: peer discovery, repository-vs-repository reports, suggestions
//!
//! # Requirements
//! - `gh` CLI installed and authenticated (`gh auth login`)

pub mod config;
pub mod gh;
pub mod github;
pub mod handlers;
pub mod init;
pub mod params;
pub mod repo_ref;
pub mod result;
pub mod server;
pub mod types;

pub use config::Config;
pub use github::GhRepositoryData;
pub use repo_ref::RepoRef;
pub use server::RepoInsightMcpServer;

// Re-export parameter types for direct API usage
pub use params::*;
