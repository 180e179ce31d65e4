//! MCP Server implementation
//!
//! This module defines the MCP server that exposes repository activity,
//! domain classification, quality scoring and comparison as tools.

use std::sync::Arc;

use repo_signals::RepositoryData;
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ErrorData as McpError,
};

use crate::config::Config;
use crate::github::GhRepositoryData;
use crate::handlers::{self, Insight};
use crate::params::{
    AccountActivityParams, ClassifyDomainParams, CompareReposParams, FindComparisonParams,
    ListReposParams, MergeActivityParams, QualityReportParams, RepoActivityParams,
    RepoInsightsParams,
};
use crate::result::json_success;

/// The Repo Insight MCP Server
#[derive(Clone)]
pub struct RepoInsightMcpServer {
    insight: Insight,
    tool_router: ToolRouter<Self>,
}

// ============================================================================
// Tool Router Implementation
// ============================================================================

#[tool_router]
impl RepoInsightMcpServer {
    /// Server backed by the gh CLI
    pub fn new(config: Config) -> Self {
        let data: Arc<dyn RepositoryData> = Arc::new(GhRepositoryData::new(config.github.clone()));
        Self::with_data(data, config)
    }

    /// Server over any repository data source
    pub fn with_data(data: Arc<dyn RepositoryData>, config: Config) -> Self {
        Self {
            insight: Insight::new(data, config),
            tool_router: Self::tool_router(),
        }
    }

    // ========================================================================
    // Activity Tools
    // ========================================================================

    #[tool(description = "Merge weekly commit series from several repositories into one 52-week calendar with per-day shading levels")]
    async fn merge_activity(
        &self,
        Parameters(params): Parameters<MergeActivityParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Merging {} activity series", params.series.len());
        json_success(&handlers::merge_activity(params))
    }

    #[tool(description = "Weekly commit activity of one repository for the last 52 weeks")]
    async fn repo_activity(
        &self,
        Parameters(params): Parameters<RepoActivityParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Repository activity for {}", params.repo);
        json_success(&handlers::repo_activity(&self.insight, params).await?)
    }

    #[tool(description = "Commit activity calendar of a user or organization. Uses the contribution calendar when available, otherwise merges the most recently pushed non-fork repositories.")]
    async fn account_activity(
        &self,
        Parameters(params): Parameters<AccountActivityParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Account activity for {}", params.login);
        json_success(&handlers::account_activity(&self.insight, params).await?)
    }

    // ========================================================================
    // Repository Tools
    // ========================================================================

    #[tool(description = "Guess a repository's application domain (chatbot, e-commerce, developer tools, ...) from its name, description and topics")]
    async fn classify_domain(
        &self,
        Parameters(params): Parameters<ClassifyDomainParams>,
    ) -> Result<CallToolResult, McpError> {
        json_success(&handlers::classify_domain(&self.insight, params).await?)
    }

    #[tool(description = "Score a repository's engineering quality signals: CI, containers, security policy, tests, linting, templates and more")]
    async fn quality_report(
        &self,
        Parameters(params): Parameters<QualityReportParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Quality report for {}", params.repo);
        json_success(&handlers::quality_report(&self.insight, params).await?)
    }

    #[tool(description = "Repository overview: metadata, language breakdown, weekly commit activity and top contributors. Parts load independently; failed parts are listed instead of failing the call.")]
    async fn repo_insights(
        &self,
        Parameters(params): Parameters<RepoInsightsParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Repository insights for {}", params.repo);
        json_success(&handlers::repo_insights(&self.insight, params).await?)
    }

    #[tool(description = "List repositories of a user or organization, most recently updated first")]
    async fn list_repos(
        &self,
        Parameters(params): Parameters<ListReposParams>,
    ) -> Result<CallToolResult, McpError> {
        json_success(&handlers::list_repos(&self.insight, params).await?)
    }

    // ========================================================================
    // Comparison Tools
    // ========================================================================

    #[tool(description = "Find a similar repository to compare against: same language, domain and size band, ranked by popularity and overlap. Set random=true for a random pick from the candidates.")]
    async fn find_comparison(
        &self,
        Parameters(params): Parameters<FindComparisonParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Finding comparison for {}", params.repo);
        json_success(&handlers::find_comparison(&self.insight, params).await?)
    }

    #[tool(description = "Compare two repositories: metric differences, shared topics, a winner, quality scores and improvement suggestions. Omit other to compare against a discovered peer.")]
    async fn compare_repos(
        &self,
        Parameters(params): Parameters<CompareReposParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(
            "Comparing {} with {}",
            params.repo,
            params.other.as_deref().unwrap_or("a discovered peer")
        );
        json_success(&handlers::compare_repos(&self.insight, params).await?)
    }
}

// ============================================================================
// Server Handler Implementation
// ============================================================================

#[tool_handler]
impl rmcp::ServerHandler for RepoInsightMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Repo Insight MCP Server - analyzes GitHub repositories: overviews with \
                 languages and contributors, commit activity calendars, domain \
                 classification, engineering quality signals and \
                 repository-vs-repository comparisons with improvement suggestions. \
                 Requires gh to be installed and authenticated."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
