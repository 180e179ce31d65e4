//! Comparison handler implementations

use repo_signals::{
    classify, find_comparison_target, find_similar_repositories, pick_best_candidate,
    pick_random_candidate, ComparisonResult, RepositorySummary,
};
use rmcp::ErrorData as McpError;
use tracing::info;

use crate::params::{CompareReposParams, FindComparisonParams};
use crate::repo_ref::RepoRef;
use crate::result::signal_to_mcp_error;
use crate::types::ComparisonTarget;

use super::Insight;

/// Discover a peer repository to compare against
pub async fn find_comparison(
    insight: &Insight,
    params: FindComparisonParams,
) -> Result<ComparisonTarget, McpError> {
    let reference: RepoRef = params.repo.parse()?;
    let source = insight.details(&reference).await?;
    let options = insight.config.search_options();

    let candidates = find_similar_repositories(insight.data.as_ref(), &source, options).await;
    let summaries: Vec<RepositorySummary> =
        candidates.iter().map(RepositorySummary::from).collect();
    let source_summary = RepositorySummary::from(&source);

    let random = params.random.unwrap_or(false);
    let target = if random {
        pick_random_candidate(&summaries, &mut rand::rng())
            .cloned()
            .map_err(signal_to_mcp_error)?
    } else {
        pick_best_candidate(&source_summary, &summaries).map_err(signal_to_mcp_error)?
    };

    info!(source = %source_summary.full_name, target = %target.full_name, random, "comparison target");
    Ok(ComparisonTarget {
        domain: classify(&source.name, source.description.as_deref(), &source.topics),
        source: source_summary,
        target,
        candidates: summaries.len(),
        random,
    })
}

/// Compare two repositories, discovering the second when omitted
pub async fn compare_repos(
    insight: &Insight,
    params: CompareReposParams,
) -> Result<ComparisonResult, McpError> {
    let reference: RepoRef = params.repo.parse()?;
    let comparator = insight.comparator(params.quality);

    let result = match params.other.as_deref() {
        Some(other) => {
            let other: RepoRef = other.parse()?;
            comparator
                .compare(&reference.skeleton(), &other.skeleton())
                .await
        }
        None => {
            let source = insight.details(&reference).await?;
            let target = find_comparison_target(
                insight.data.as_ref(),
                &source,
                insight.config.search_options(),
            )
            .await
            .map_err(signal_to_mcp_error)?;
            comparator.compare(&source, &target).await
        }
    };

    result.map_err(signal_to_mcp_error)
}
