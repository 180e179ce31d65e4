//! GitHub collaborator over `gh api`
//!
//! Implements [`RepositoryData`] for the signal engine. Authentication and
//! host selection (`GH_HOST`, enterprise hosts) are left to gh itself.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{DateTime, Datelike, Duration as ChronoDuration, NaiveDate, Utc};
use repo_signals::types::repo::parse_timestamp;
use repo_signals::{
    bucket_commits, Contributor, RawRepo, RepositoryData, SignalError, SignalResult,
    WeeklyActivity, WINDOW_WEEKS,
};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::config::GithubConfig;
use crate::gh::{execute_gh_api, execute_gh_api_raw, GhError};

const CONTRIBUTIONS_QUERY: &str = r#"
query($login: String!, $from: DateTime!, $to: DateTime!) {
  user(login: $login) {
    contributionsCollection(from: $from, to: $to) {
      contributionCalendar {
        weeks {
          firstDay
          contributionDays { date contributionCount }
        }
      }
    }
  }
}
"#;

/// Commits requested by the statistics fallback
const FALLBACK_COMMITS_PER_PAGE: u32 = 100;

/// Contributors listed per repository
const CONTRIBUTORS_PER_PAGE: u32 = 30;

#[derive(Debug, Deserialize)]
struct SearchPage {
    #[serde(default)]
    items: Vec<RawRepo>,
}

#[derive(Debug, Deserialize)]
struct ContentFile {
    content: Option<String>,
    encoding: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CommitEntry {
    commit: CommitDetail,
}

#[derive(Debug, Deserialize)]
struct CommitDetail {
    author: Option<CommitAuthor>,
}

#[derive(Debug, Deserialize)]
struct CommitAuthor {
    date: Option<String>,
}

// GraphQL contribution calendar response
#[derive(Debug, Deserialize)]
struct CalendarResponse {
    data: Option<CalendarData>,
}

#[derive(Debug, Deserialize)]
struct CalendarData {
    user: Option<CalendarUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalendarUser {
    contributions_collection: ContributionsCollection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContributionsCollection {
    contribution_calendar: ContributionCalendar,
}

#[derive(Debug, Deserialize)]
struct ContributionCalendar {
    #[serde(default)]
    weeks: Vec<CalendarWeek>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalendarWeek {
    first_day: String,
    #[serde(default)]
    contribution_days: Vec<CalendarDay>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalendarDay {
    date: String,
    contribution_count: u64,
}

/// [`RepositoryData`] backed by the gh CLI
#[derive(Debug, Clone)]
pub struct GhRepositoryData {
    config: GithubConfig,
}

impl GhRepositoryData {
    pub fn new(config: GithubConfig) -> Self {
        Self { config }
    }

    /// One attempt at the statistics endpoint; `None` while GitHub computes
    async fn commit_stats(&self, owner: &str, name: &str) -> SignalResult<Option<Vec<WeeklyActivity>>> {
        let path = format!("repos/{}/{}/stats/commit_activity", owner, name);
        let body = execute_gh_api_raw(&[path.as_str()]).await?;
        parse_commit_stats(&body)
    }

    /// Commit list of the last year bucketed into weeks
    async fn commits_fallback(&self, owner: &str, name: &str) -> SignalResult<Vec<WeeklyActivity>> {
        let path = format!("repos/{}/{}/commits", owner, name);
        let since = (Utc::now() - ChronoDuration::days(365)).to_rfc3339();
        let since_arg = format!("since={}", since);
        let per_page_arg = format!("per_page={}", FALLBACK_COMMITS_PER_PAGE);

        let entries: Vec<CommitEntry> =
            execute_gh_api(&["-X", "GET", &path, "-f", &since_arg, "-f", &per_page_arg]).await?;
        Ok(bucket_commits(&commit_times(&entries)))
    }

    async fn list_repos_at(&self, path: &str, per_page: u32) -> Result<Vec<RawRepo>, GhError> {
        let per_page_arg = format!("per_page={}", per_page);
        execute_gh_api(&["-X", "GET", path, "-f", "sort=updated", "-f", &per_page_arg]).await
    }
}

#[async_trait]
impl RepositoryData for GhRepositoryData {
    #[instrument(skip(self))]
    async fn search_repositories(&self, query: &str) -> SignalResult<Vec<RawRepo>> {
        let q_arg = format!("q={}", query);
        let per_page_arg = format!("per_page={}", self.config.search_per_page);
        let page: SearchPage = execute_gh_api(&[
            "-X",
            "GET",
            "search/repositories",
            "-f",
            &q_arg,
            "-f",
            "sort=stars",
            "-f",
            "order=desc",
            "-f",
            &per_page_arg,
        ])
        .await?;
        debug!(results = page.items.len(), "search finished");
        Ok(page.items)
    }

    #[instrument(skip(self))]
    async fn get_repository_details(&self, owner: &str, name: &str) -> SignalResult<RawRepo> {
        let path = format!("repos/{}/{}", owner, name);
        Ok(execute_gh_api(&[path.as_str()]).await?)
    }

    async fn file_exists_at(&self, owner: &str, name: &str, path: &str) -> SignalResult<bool> {
        let api_path = format!("repos/{}/{}/contents/{}", owner, name, path);
        match execute_gh_api_raw(&[api_path.as_str()]).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn get_file_content(&self, owner: &str, name: &str, path: &str) -> SignalResult<String> {
        let api_path = format!("repos/{}/{}/contents/{}", owner, name, path);
        let file: ContentFile = execute_gh_api(&[api_path.as_str()]).await?;
        decode_content(&file)
    }

    #[instrument(skip(self))]
    async fn get_weekly_commit_activity(
        &self,
        owner: &str,
        name: &str,
    ) -> SignalResult<Vec<WeeklyActivity>> {
        let attempts = self.config.stats_retries.max(1);
        let delay = Duration::from_millis(self.config.stats_retry_delay_ms);

        for attempt in 1..=attempts {
            match self.commit_stats(owner, name).await {
                Ok(Some(weeks)) => return Ok(weeks),
                Ok(None) => debug!(attempt, "statistics not ready yet"),
                Err(e) => {
                    warn!(error = %e, "statistics request failed, using commit list");
                    break;
                }
            }
            if attempt < attempts {
                tokio::time::sleep(delay).await;
            }
        }

        self.commits_fallback(owner, name).await
    }

    #[instrument(skip(self))]
    async fn get_languages(&self, owner: &str, name: &str) -> SignalResult<BTreeMap<String, u64>> {
        let path = format!("repos/{}/{}/languages", owner, name);
        Ok(execute_gh_api(&[path.as_str()]).await?)
    }

    /// Contributor list; any failure reads as no contributors
    #[instrument(skip(self))]
    async fn get_contributors(&self, owner: &str, name: &str) -> SignalResult<Vec<Contributor>> {
        let path = format!("repos/{}/{}/contributors", owner, name);
        let per_page_arg = format!("per_page={}", CONTRIBUTORS_PER_PAGE);
        match execute_gh_api_raw(&["-X", "GET", &path, "-f", &per_page_arg]).await {
            Ok(body) => Ok(parse_contributors(&body)),
            Err(e) => {
                warn!(error = %e, "contributors unavailable");
                Ok(Vec::new())
            }
        }
    }

    #[instrument(skip(self))]
    async fn list_owner_repositories(&self, owner: &str, limit: u32) -> SignalResult<Vec<RawRepo>> {
        let per_page = limit.clamp(1, self.config.owner_page_size.max(1));

        let user_path = format!("users/{}/repos", owner);
        let user_err = match self.list_repos_at(&user_path, per_page).await {
            Ok(repos) => return Ok(repos),
            Err(e) => e,
        };
        debug!(error = %user_err, "not a user, trying organization");

        let org_path = format!("orgs/{}/repos", owner);
        let org_err = match self.list_repos_at(&org_path, per_page).await {
            Ok(repos) => return Ok(repos),
            Err(e) => e,
        };
        debug!(error = %org_err, "not an organization, trying search");

        let q_arg = format!("q=user:{}", owner);
        let per_page_arg = format!("per_page={}", per_page);
        match execute_gh_api::<SearchPage>(&[
            "-X",
            "GET",
            "search/repositories",
            "-f",
            &q_arg,
            "-f",
            "sort=stars",
            "-f",
            "order=desc",
            "-f",
            &per_page_arg,
        ])
        .await
        {
            Ok(page) => Ok(page.items),
            Err(e) => {
                debug!(error = %e, "owner search failed");
                Err(org_err.into())
            }
        }
    }

    #[instrument(skip(self))]
    async fn get_contribution_calendar(&self, login: &str) -> SignalResult<Option<Vec<WeeklyActivity>>> {
        let now = Utc::now();
        let query_arg = format!("query={}", CONTRIBUTIONS_QUERY);
        let login_arg = format!("login={}", login);
        let from_arg = format!("from={}", (now - ChronoDuration::days(365)).to_rfc3339());
        let to_arg = format!("to={}", now.to_rfc3339());

        let response: CalendarResponse = execute_gh_api(&[
            "graphql", "-f", &query_arg, "-f", &login_arg, "-f", &from_arg, "-f", &to_arg,
        ])
        .await?;
        Ok(calendar_weeks(response))
    }
}

/// Statistics body: empty or `[]` while computing (HTTP 202)
fn parse_commit_stats(body: &str) -> SignalResult<Option<Vec<WeeklyActivity>>> {
    let body = body.trim();
    if body.is_empty() || body == "{}" {
        return Ok(None);
    }
    let weeks: Vec<WeeklyActivity> = serde_json::from_str(body)?;
    if weeks.is_empty() {
        return Ok(None);
    }
    let skip = weeks.len().saturating_sub(WINDOW_WEEKS);
    Ok(Some(weeks.into_iter().skip(skip).collect()))
}

/// Contributor body; empty (HTTP 204) or unparsable reads as none
fn parse_contributors(body: &str) -> Vec<Contributor> {
    let body = body.trim();
    if body.is_empty() {
        return Vec::new();
    }
    serde_json::from_str(body).unwrap_or_else(|e| {
        warn!(error = %e, "unreadable contributor list");
        Vec::new()
    })
}

fn commit_times(entries: &[CommitEntry]) -> Vec<DateTime<Utc>> {
    entries
        .iter()
        .filter_map(|entry| entry.commit.author.as_ref()?.date.as_deref())
        .filter_map(parse_timestamp)
        .collect()
}

fn decode_content(file: &ContentFile) -> SignalResult<String> {
    let content = file.content.as_deref().unwrap_or_default();
    match file.encoding.as_deref() {
        Some("base64") => {
            let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
            let bytes = STANDARD
                .decode(compact)
                .map_err(|e| SignalError::Parse(format!("invalid base64 content: {}", e)))?;
            String::from_utf8(bytes).map_err(|e| SignalError::Parse(e.to_string()))
        }
        _ => Ok(content.to_string()),
    }
}

/// Calendar weeks as weekly series keyed on their Sunday; `None` when the
/// user is unknown
fn calendar_weeks(response: CalendarResponse) -> Option<Vec<WeeklyActivity>> {
    let user = response.data?.user?;
    let weeks = user
        .contributions_collection
        .contribution_calendar
        .weeks
        .iter()
        .filter_map(|week| {
            let first_day = NaiveDate::parse_from_str(&week.first_day, "%Y-%m-%d").ok()?;
            let mut days = [0u64; 7];
            for day in &week.contribution_days {
                let weekday = NaiveDate::parse_from_str(&day.date, "%Y-%m-%d")
                    .map(|d| d.weekday().num_days_from_sunday() as usize)
                    .unwrap_or(0);
                days[weekday] += day.contribution_count;
            }
            let sunday = first_day
                - ChronoDuration::days(i64::from(first_day.weekday().num_days_from_sunday()));
            let week_start = sunday.and_hms_opt(0, 0, 0)?.and_utc().timestamp();
            Some(WeeklyActivity::from_days(week_start, days))
        })
        .collect();
    Some(weeks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_pending_bodies() {
        assert_eq!(parse_commit_stats("").unwrap(), None);
        assert_eq!(parse_commit_stats("{}\n").unwrap(), None);
        assert_eq!(parse_commit_stats("[]").unwrap(), None);
    }

    #[test]
    fn test_stats_body_parsed_and_windowed() {
        let weeks: Vec<String> = (0..60)
            .map(|i| format!(r#"{{"week": {}, "total": 1, "days": [1,0,0,0,0,0,0]}}"#, i * 604_800))
            .collect();
        let body = format!("[{}]", weeks.join(","));

        let parsed = parse_commit_stats(&body).unwrap().unwrap();
        assert_eq!(parsed.len(), 52);
        assert_eq!(parsed[0].week, 8 * 604_800);
    }

    #[test]
    fn test_stats_garbage_is_parse_error() {
        assert!(matches!(parse_commit_stats("<html>"), Err(SignalError::Parse(_))));
    }

    #[test]
    fn test_parse_contributors() {
        let contributors = parse_contributors(
            r#"[
                {"login": "octocat", "contributions": 42, "avatar_url": "https://a/1", "type": "User"},
                {"login": "hubot", "contributions": 3}
            ]"#,
        );
        assert_eq!(contributors.len(), 2);
        assert_eq!(contributors[0].login, "octocat");
        assert_eq!(contributors[0].contributions, 42);
        assert_eq!(contributors[1].avatar_url, None);
    }

    #[test]
    fn test_contributors_empty_or_garbage() {
        assert!(parse_contributors("").is_empty());
        assert!(parse_contributors("\n").is_empty());
        assert!(parse_contributors("{\"message\": \"too large\"}").is_empty());
    }

    #[test]
    fn test_commit_times_skip_missing_dates() {
        let entries: Vec<CommitEntry> = serde_json::from_str(
            r#"[
                {"commit": {"author": {"date": "2024-03-06T10:00:00Z"}}},
                {"commit": {"author": null}},
                {"commit": {"author": {"date": "not a date"}}}
            ]"#,
        )
        .unwrap();

        let times = commit_times(&entries);
        assert_eq!(times.len(), 1);
        assert_eq!(times[0].weekday().num_days_from_sunday(), 3);
    }

    #[test]
    fn test_decode_base64_content() {
        // GitHub wraps base64 at 60 columns
        let file = ContentFile {
            content: Some("eyJ3b3Jrc3BhY2VzIjog\nWyJwa2dzLyoiXX0=\n".to_string()),
            encoding: Some("base64".to_string()),
        };
        assert_eq!(decode_content(&file).unwrap(), r#"{"workspaces": ["pkgs/*"]}"#);
    }

    #[test]
    fn test_decode_invalid_base64() {
        let file = ContentFile {
            content: Some("!!!".to_string()),
            encoding: Some("base64".to_string()),
        };
        assert!(matches!(decode_content(&file), Err(SignalError::Parse(_))));
    }

    #[test]
    fn test_calendar_weeks() {
        let response: CalendarResponse = serde_json::from_str(
            r#"{"data": {"user": {"contributionsCollection": {"contributionCalendar": {"weeks": [
                {"firstDay": "2024-01-03", "contributionDays": [
                    {"date": "2024-01-03", "contributionCount": 2},
                    {"date": "2024-01-04", "contributionCount": 0},
                    {"date": "2024-01-05", "contributionCount": 1},
                    {"date": "2024-01-06", "contributionCount": 4}
                ]},
                {"firstDay": "2024-01-07", "contributionDays": [
                    {"date": "2024-01-07", "contributionCount": 3}
                ]}
            ]}}}}}"#,
        )
        .unwrap();

        let weeks = calendar_weeks(response).unwrap();
        assert_eq!(weeks.len(), 2);
        // partial first week keeps weekday positions under its Sunday
        assert_eq!(weeks[0].week, 1_703_980_800);
        assert_eq!(weeks[0].days, [0, 0, 0, 2, 0, 1, 4]);
        assert_eq!(weeks[0].total, 7);
        assert_eq!(weeks[1].week, 1_704_585_600);
        assert_eq!(weeks[1].days[0], 3);
    }

    #[test]
    fn test_calendar_unknown_user() {
        let response: CalendarResponse =
            serde_json::from_str(r#"{"data": {"user": null}}"#).unwrap();
        assert!(calendar_weeks(response).is_none());
    }
}
