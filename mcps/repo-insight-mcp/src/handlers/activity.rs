//! Activity handler implementations

use futures_util::future::join_all;
use repo_signals::{merge, RawRepo};
use rmcp::ErrorData as McpError;
use tracing::{debug, info, warn};

use crate::params::{AccountActivityParams, MergeActivityParams, RepoActivityParams};
use crate::repo_ref::RepoRef;
use crate::result::signal_to_mcp_error;
use crate::types::{ActivityCalendar, ActivitySource};

use super::Insight;

/// Merge caller-supplied series into one calendar
pub fn merge_activity(params: MergeActivityParams) -> ActivityCalendar {
    ActivityCalendar::new(ActivitySource::Supplied, merge(&params.series))
}

/// Weekly commit activity of one repository
pub async fn repo_activity(
    insight: &Insight,
    params: RepoActivityParams,
) -> Result<ActivityCalendar, McpError> {
    let repo: RepoRef = params.repo.parse()?;
    let weeks = insight
        .data
        .get_weekly_commit_activity(&repo.owner, &repo.name)
        .await
        .map_err(signal_to_mcp_error)?;

    Ok(ActivityCalendar::new(ActivitySource::Repository, merge(&[weeks])))
}

/// Account-level activity
///
/// Prefers the contribution calendar. Without one, merges the weekly series
/// of the most recently pushed non-fork repositories; repositories whose
/// activity cannot be fetched are left out.
pub async fn account_activity(
    insight: &Insight,
    params: AccountActivityParams,
) -> Result<ActivityCalendar, McpError> {
    let login = params.login.trim();
    match insight.data.get_contribution_calendar(login).await {
        Ok(Some(weeks)) if !weeks.is_empty() => {
            debug!(login, weeks = weeks.len(), "using contribution calendar");
            return Ok(ActivityCalendar::new(
                ActivitySource::ContributionCalendar,
                merge(&[weeks]),
            ));
        }
        Ok(_) => debug!(login, "no contribution calendar"),
        Err(e) => warn!(login, error = %e, "contribution calendar unavailable"),
    }

    let max_repos = params.max_repos.unwrap_or(insight.config.activity.max_repos);
    let repos = insight
        .data
        .list_owner_repositories(login, insight.config.github.owner_page_size)
        .await
        .map_err(signal_to_mcp_error)?;
    let recent = most_recent_repositories(repos, max_repos);

    let series = join_all(recent.iter().map(|repo| async move {
        match insight
            .data
            .get_weekly_commit_activity(repo.owner_login(), &repo.name)
            .await
        {
            Ok(weeks) => weeks,
            Err(e) => {
                warn!(repo = %repo.slug(), error = %e, "skipping repository activity");
                Vec::new()
            }
        }
    }))
    .await;

    let names: Vec<String> = recent.iter().map(RawRepo::slug).collect();
    info!(login, repositories = names.len(), "merged repository activity");
    Ok(ActivityCalendar::new(ActivitySource::RecentRepositories, merge(&series)).with_repositories(names))
}

/// Non-fork repositories, most recently pushed first, at most `max`
pub fn most_recent_repositories(repos: Vec<RawRepo>, max: usize) -> Vec<RawRepo> {
    let mut own: Vec<RawRepo> = repos.into_iter().filter(|repo| !repo.fork).collect();
    // never-pushed repositories sort last
    own.sort_by(|a, b| b.pushed_at_time().cmp(&a.pushed_at_time()));
    own.truncate(max);
    own
}
