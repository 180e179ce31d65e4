//! Repo Insight MCP Server
//!
//! Exposes GitHub repository analysis as MCP tools: commit activity
//! calendars, domain classification, quality signals and comparisons.
//!
//! # Configuration
//!
//! `~/.binks/repo-insight.toml` (or `REPO_INSIGHT_CONFIG_PATH`), with
//! `REPO_INSIGHT_SEARCH_LIMIT` and `REPO_INSIGHT_QUALITY` overrides.
//!
//! # Usage
//!
//! Configure in `.mcp.json`:
//! ```json
//! {
//!   "mcpServers": {
//!     "repo-insight": {
//!       "command": "./target/release/repo-insight-mcp"
//!     }
//!   }
//! }
//! ```

use repo_insight_mcp::{gh, init, Config, RepoInsightMcpServer};
use rmcp::{transport::stdio, ServiceExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init::init_tracing()?;

    tracing::info!("Starting Repo Insight MCP Server");

    let config = Config::load()?;
    tracing::info!(
        search_limit = config.search.limit,
        quality = config.quality.enabled,
        "configuration loaded"
    );

    if let Err(e) = gh::check_gh_available().await {
        // Continue anyway - errors will be reported per-tool
        tracing::warn!("gh CLI check failed: {}", e);
    }

    let server = RepoInsightMcpServer::new(config);
    let service = server.serve(stdio()).await?;

    tracing::info!("Server running, waiting for requests...");
    service.waiting().await?;

    tracing::info!("Server shutting down");
    Ok(())
}
