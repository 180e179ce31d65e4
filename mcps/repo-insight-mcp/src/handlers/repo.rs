//! Repository handler implementations

use repo_signals::{classify, merge, quality, RepoProbe, RepositorySummary, SignalError};
use rmcp::ErrorData as McpError;
use tracing::{info, warn};

use crate::params::{ClassifyDomainParams, ListReposParams, QualityReportParams, RepoInsightsParams};
use crate::repo_ref::RepoRef;
use crate::result::{internal_error, invalid_params, signal_to_mcp_error};
use crate::types::{
    language_breakdown, ActivityCalendar, ActivitySource, DomainMatch, InsightFailure, InsightPart,
    QualitySummary, RepoInsights,
};

use super::Insight;

const DEFAULT_LIST_LIMIT: u32 = 30;

/// Classify a repository, either fetched by reference or from raw text
pub async fn classify_domain(
    insight: &Insight,
    params: ClassifyDomainParams,
) -> Result<DomainMatch, McpError> {
    if let Some(reference) = params.repo.as_deref() {
        let repo = insight.details(&reference.parse()?).await?;
        return Ok(DomainMatch {
            domain: classify(&repo.name, repo.description.as_deref(), &repo.topics),
        });
    }

    let name = params
        .name
        .ok_or_else(|| invalid_params("either repo or name is required"))?;
    let topics = params.topics.unwrap_or_default();
    Ok(DomainMatch {
        domain: classify(&name, params.description.as_deref(), &topics),
    })
}

/// Engineering quality report for one repository
///
/// Bounded by `quality.timeout_secs` like comparison scoring.
pub async fn quality_report(
    insight: &Insight,
    params: QualityReportParams,
) -> Result<QualitySummary, McpError> {
    let reference: RepoRef = params.repo.parse()?;
    let repo = insight.details(&reference).await?;

    let probe = RepoProbe::new(insight.data.as_ref(), repo.owner_login(), &repo.name);
    let scoring = quality::score(&repo, &probe);
    let report = match insight.config.quality_timeout() {
        Some(limit) => tokio::time::timeout(limit, scoring).await.map_err(|_| {
            warn!(repo = %repo.slug(), "quality scoring timed out");
            internal_error(format!(
                "quality scoring of {} timed out after {}s",
                repo.slug(),
                limit.as_secs()
            ))
        })?,
        None => scoring.await,
    };
    Ok(QualitySummary {
        repository: repo.slug(),
        report,
    })
}

/// Details, languages, activity and contributors of one repository
///
/// The four parts load concurrently and independently. Fails only when
/// details, languages and activity all fail, which means the repository
/// cannot be reached at all.
pub async fn repo_insights(
    insight: &Insight,
    params: RepoInsightsParams,
) -> Result<RepoInsights, McpError> {
    let reference: RepoRef = params.repo.parse()?;
    let (owner, name) = (reference.owner.as_str(), reference.name.as_str());
    let data = insight.data.as_ref();

    let (details, languages, activity, contributors) = tokio::join!(
        data.get_repository_details(owner, name),
        data.get_languages(owner, name),
        data.get_weekly_commit_activity(owner, name),
        data.get_contributors(owner, name),
    );

    let mut failures = Vec::new();
    let mut record = |part: InsightPart, e: SignalError| {
        warn!(repo = %reference, ?part, error = %e, "insight part unavailable");
        failures.push(InsightFailure {
            part,
            error: e.to_string(),
        });
    };

    let details = details
        .map_err(|e| record(InsightPart::Details, e))
        .ok()
        .map(|repo| RepositorySummary::from(&repo));
    let languages = languages
        .map_err(|e| record(InsightPart::Languages, e))
        .ok()
        .map(|bytes| language_breakdown(&bytes));
    let activity = activity
        .map_err(|e| record(InsightPart::Activity, e))
        .ok()
        .map(|weeks| ActivityCalendar::new(ActivitySource::Repository, merge(&[weeks])));
    let contributors = contributors
        .map_err(|e| record(InsightPart::Contributors, e))
        .unwrap_or_default();

    if details.is_none() && languages.is_none() && activity.is_none() {
        return Err(signal_to_mcp_error(SignalError::Unresolvable(format!(
            "'{}' could not be fetched",
            reference
        ))));
    }

    info!(repo = %reference, failures = failures.len(), "repository insights loaded");
    Ok(RepoInsights {
        repository: reference.to_string(),
        details,
        languages: languages.unwrap_or_default(),
        activity,
        contributors,
        failures,
    })
}

/// Repositories of a user or organization
pub async fn list_repos(
    insight: &Insight,
    params: ListReposParams,
) -> Result<Vec<RepositorySummary>, McpError> {
    let limit = params.limit.unwrap_or(DEFAULT_LIST_LIMIT);
    let repos = insight
        .data
        .list_owner_repositories(params.owner.trim(), limit)
        .await
        .map_err(signal_to_mcp_error)?;

    let exclude_forks = params.exclude_forks.unwrap_or(false);
    Ok(repos
        .iter()
        .filter(|repo| !(exclude_forks && repo.fork))
        .take(limit as usize)
        .map(RepositorySummary::from)
        .collect())
}
