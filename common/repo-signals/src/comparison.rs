//! Repository-vs-repository comparison
//!
//! [`compare_summaries`] is the pure core: scalar differences, shared topics
//! and the weighted point race. [`Comparator`] wraps it with the network
//! work (detail refresh and quality scoring, both best-effort) and the
//! quality override.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, instrument, warn};

use crate::collaborator::{RepoProbe, RepositoryData};
use crate::domain::classify;
use crate::error::{SignalError, SignalResult};
use crate::quality;
use crate::suggestions::generate_suggestions;
use crate::types::repo::parse_timestamp;
use crate::types::{
    ComparisonMetrics, ComparisonResult, QualityReport, QualityScores, RawRepo,
    RepositorySummary, Winner,
};

const MS_PER_DAY: i64 = 86_400_000;

// Point race weights
const STARS_POINTS: f64 = 40.0;
const FORKS_POINTS: f64 = 20.0;
const WATCHERS_POINTS: f64 = 15.0;
const RECENCY_POINTS: f64 = 15.0;
const LANGUAGE_MATCH_POINTS: f64 = 2.5;
const TOPIC_POINTS: f64 = 1.5;
const TOPIC_POINTS_MAX: f64 = 5.0;

/// Topics of `first` that also appear in `second`, in `first` order
pub fn common_topics(first: &[String], second: &[String]) -> Vec<String> {
    let other: HashSet<&str> = second.iter().map(String::as_str).collect();
    first
        .iter()
        .filter(|topic| other.contains(topic.as_str()))
        .cloned()
        .collect()
}

/// Whole days from `second` to `first`, floored; 0 when either is unknown
fn days_between(first: Option<&str>, second: Option<&str>) -> i64 {
    match (first.and_then(parse_timestamp), second.and_then(parse_timestamp)) {
        (Some(a), Some(b)) => (a - b).num_milliseconds().div_euclid(MS_PER_DAY),
        _ => 0,
    }
}

fn difference(first: u64, second: u64) -> i64 {
    first as i64 - second as i64
}

/// Compare two repository summaries without any network access
pub fn compare_summaries(
    first: &RepositorySummary,
    second: &RepositorySummary,
) -> ComparisonResult {
    let comparison = ComparisonMetrics {
        stars_difference: difference(first.stars, second.stars),
        forks_difference: difference(first.forks, second.forks),
        watchers_difference: difference(first.watchers, second.watchers),
        size_difference: difference(first.size, second.size),
        age_difference: days_between(first.created_at.as_deref(), second.created_at.as_deref()),
        last_update_difference: days_between(
            first.updated_at.as_deref(),
            second.updated_at.as_deref(),
        ),
        common_topics: common_topics(&first.topics, &second.topics),
        language_match: first.language == second.language,
        license_match: first.license == second.license,
        quality_scores: None,
    };

    let recency = recency_order(first.updated_at.as_deref(), second.updated_at.as_deref());
    let winner = determine_winner(&comparison, recency);

    ComparisonResult {
        repository1: first.clone().into(),
        repository2: second.clone().into(),
        comparison,
        winner,
        domain: None,
        suggestions: Vec::new(),
    }
}

/// `Greater` when the first repository was updated more recently
fn recency_order(first: Option<&str>, second: Option<&str>) -> Ordering {
    match (first.and_then(parse_timestamp), second.and_then(parse_timestamp)) {
        (Some(a), Some(b)) => a.cmp(&b),
        _ => Ordering::Equal,
    }
}

fn determine_winner(comparison: &ComparisonMetrics, recency: Ordering) -> Winner {
    let mut points = (0.0_f64, 0.0_f64);

    let mut award = |ordering: Ordering, weight: f64| match ordering {
        Ordering::Greater => points.0 += weight,
        Ordering::Less => points.1 += weight,
        Ordering::Equal => {
            points.0 += weight / 2.0;
            points.1 += weight / 2.0;
        }
    };

    award(comparison.stars_difference.cmp(&0), STARS_POINTS);
    award(comparison.forks_difference.cmp(&0), FORKS_POINTS);
    award(comparison.watchers_difference.cmp(&0), WATCHERS_POINTS);
    award(recency, RECENCY_POINTS);

    let mut shared = 0.0;
    if comparison.language_match {
        shared += LANGUAGE_MATCH_POINTS;
    }
    if !comparison.common_topics.is_empty() {
        shared += (comparison.common_topics.len() as f64 * TOPIC_POINTS).min(TOPIC_POINTS_MAX);
    }
    points.0 += shared;
    points.1 += shared;

    debug!(repo1 = points.0, repo2 = points.1, "point race");
    match points.0.partial_cmp(&points.1) {
        Some(Ordering::Greater) => Winner::Repository1,
        Some(Ordering::Less) => Winner::Repository2,
        _ => Winner::Tie,
    }
}

/// Attach quality reports, let the higher quality total decide the winner
/// and derive suggestions for repository1
fn apply_quality(result: &mut ComparisonResult, first: QualityReport, second: QualityReport) {
    result.comparison.quality_scores = Some(QualityScores {
        repo1: first.total_score(),
        repo2: second.total_score(),
    });

    match first.total_score().cmp(&second.total_score()) {
        Ordering::Greater => result.winner = Winner::Repository1,
        Ordering::Less => result.winner = Winner::Repository2,
        Ordering::Equal => {}
    }

    result.suggestions =
        generate_suggestions(&result.repository2.summary.full_name, &first, &second);
    result.repository1.quality = Some(first);
    result.repository2.quality = Some(second);
}

/// Network-backed comparison of two repositories
#[derive(Clone)]
pub struct Comparator {
    data: Arc<dyn RepositoryData>,
    quality_enabled: bool,
    quality_timeout: Option<Duration>,
}

impl Comparator {
    pub fn new(data: Arc<dyn RepositoryData>) -> Self {
        Self {
            data,
            quality_enabled: true,
            quality_timeout: None,
        }
    }

    /// Enable or disable quality scoring
    pub fn with_quality(mut self, enabled: bool) -> Self {
        self.quality_enabled = enabled;
        self
    }

    /// Give up on a side's quality scoring after `timeout`
    pub fn with_quality_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.quality_timeout = timeout;
        self
    }

    /// Compare two repositories
    ///
    /// Both sides are refreshed and scored concurrently. A failed refresh
    /// falls back to the record passed in; failed quality scoring only
    /// drops the quality section. Errors when a side cannot be addressed,
    /// or when its refresh fails and the record passed in is a placeholder.
    #[instrument(skip_all, fields(repo1 = %first.slug(), repo2 = %second.slug()))]
    pub async fn compare(&self, first: &RawRepo, second: &RawRepo) -> SignalResult<ComparisonResult> {
        for repo in [first, second] {
            if !repo.is_addressable() {
                return Err(SignalError::Unresolvable(format!(
                    "'{}' has no owner/name",
                    repo.slug()
                )));
            }
        }

        let ((first, first_quality), (second, second_quality)) =
            tokio::try_join!(self.resolve(first), self.resolve(second))?;

        let mut result = compare_summaries(
            &RepositorySummary::from(&first),
            &RepositorySummary::from(&second),
        );

        match (first_quality, second_quality) {
            (Some(q1), Some(q2)) => apply_quality(&mut result, q1, q2),
            _ if self.quality_enabled => {
                debug!("quality unavailable for at least one side, skipping override")
            }
            _ => {}
        }

        result.domain = classify(&first.name, first.description.as_deref(), &first.topics);
        Ok(result)
    }

    /// Refresh one side, then score it
    async fn resolve(&self, repo: &RawRepo) -> SignalResult<(RawRepo, Option<QualityReport>)> {
        let details = match self
            .data
            .get_repository_details(repo.owner_login(), &repo.name)
            .await
        {
            Ok(details) => details,
            Err(e) if repo.is_placeholder() => {
                warn!(repo = %repo.slug(), error = %e, "detail fetch failed with nothing to fall back to");
                return Err(SignalError::Unresolvable(format!(
                    "'{}' could not be fetched: {}",
                    repo.slug(),
                    e
                )));
            }
            Err(e) => {
                warn!(repo = %repo.slug(), error = %e, "detail fetch failed, using original record");
                repo.clone()
            }
        };

        let quality = if self.quality_enabled {
            self.quality(&details).await
        } else {
            None
        };
        Ok((details, quality))
    }

    async fn quality(&self, repo: &RawRepo) -> Option<QualityReport> {
        let probe = RepoProbe::new(self.data.as_ref(), repo.owner_login(), &repo.name);
        let scoring = quality::score(repo, &probe);

        match self.quality_timeout {
            Some(limit) => match tokio::time::timeout(limit, scoring).await {
                Ok(report) => Some(report),
                Err(_) => {
                    warn!(repo = %repo.slug(), "quality scoring timed out");
                    None
                }
            },
            None => Some(scoring.await),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::{BTreeMap, HashMap, HashSet};

    use crate::types::{Contributor, Owner, Signal, WeeklyActivity};

    #[derive(Default)]
    struct FakeData {
        details: HashMap<String, RawRepo>,
        files: HashMap<String, HashSet<&'static str>>,
        slow_probes: bool,
    }

    #[async_trait]
    impl RepositoryData for FakeData {
        async fn search_repositories(&self, _query: &str) -> SignalResult<Vec<RawRepo>> {
            Ok(Vec::new())
        }

        async fn get_repository_details(&self, owner: &str, name: &str) -> SignalResult<RawRepo> {
            self.details
                .get(&format!("{}/{}", owner, name))
                .cloned()
                .ok_or_else(|| SignalError::Network("HTTP 502".to_string()))
        }

        async fn file_exists_at(&self, owner: &str, name: &str, path: &str) -> SignalResult<bool> {
            if self.slow_probes {
                tokio::time::sleep(Duration::from_secs(60)).await;
            }
            Ok(self
                .files
                .get(&format!("{}/{}", owner, name))
                .is_some_and(|files| files.contains(path)))
        }

        async fn get_file_content(&self, _owner: &str, _name: &str, _path: &str) -> SignalResult<String> {
            Err(SignalError::Network("HTTP 404".to_string()))
        }

        async fn get_weekly_commit_activity(&self, _owner: &str, _name: &str) -> SignalResult<Vec<WeeklyActivity>> {
            Ok(Vec::new())
        }

        async fn get_languages(&self, _owner: &str, _name: &str) -> SignalResult<BTreeMap<String, u64>> {
            Ok(BTreeMap::new())
        }

        async fn get_contributors(&self, _owner: &str, _name: &str) -> SignalResult<Vec<Contributor>> {
            Ok(Vec::new())
        }

        async fn list_owner_repositories(&self, _owner: &str, _limit: u32) -> SignalResult<Vec<RawRepo>> {
            Ok(Vec::new())
        }

        async fn get_contribution_calendar(&self, _login: &str) -> SignalResult<Option<Vec<WeeklyActivity>>> {
            Ok(None)
        }
    }

    fn repo(full_name: &str, stars: u64, forks: u64, watchers: u64) -> RawRepo {
        let (owner, name) = full_name.split_once('/').unwrap();
        RawRepo {
            name: name.to_string(),
            full_name: full_name.to_string(),
            owner: Some(Owner {
                login: owner.to_string(),
            }),
            stargazers_count: stars,
            forks_count: forks,
            watchers_count: watchers,
            updated_at: Some("2024-05-01T00:00:00Z".to_string()),
            created_at: Some("2020-01-01T00:00:00Z".to_string()),
            has_issues: Some(false),
            ..Default::default()
        }
    }

    fn summary(repo: &RawRepo) -> RepositorySummary {
        RepositorySummary::from(repo)
    }

    #[test]
    fn test_differences_are_antisymmetric() {
        let a = summary(&repo("acme/a", 120, 4, 9));
        let b = summary(&repo("acme/b", 30, 10, 9));

        let ab = compare_summaries(&a, &b).comparison;
        let ba = compare_summaries(&b, &a).comparison;
        assert_eq!(ab.stars_difference, 90);
        assert_eq!(ab.stars_difference, -ba.stars_difference);
        assert_eq!(ab.forks_difference, -ba.forks_difference);
        assert_eq!(ab.watchers_difference, 0);
        assert_eq!(ab.size_difference, -ba.size_difference);
    }

    #[test]
    fn test_point_race_winner() {
        let a = summary(&repo("acme/a", 120, 10, 9));
        let b = summary(&repo("acme/b", 30, 4, 9));

        assert_eq!(compare_summaries(&a, &b).winner, Winner::Repository1);
        assert_eq!(compare_summaries(&b, &a).winner, Winner::Repository2);
    }

    #[test]
    fn test_identical_is_tie() {
        let a = summary(&repo("acme/a", 5, 5, 5));
        let b = summary(&repo("acme/b", 5, 5, 5));
        assert_eq!(compare_summaries(&a, &b).winner, Winner::Tie);
    }

    #[test]
    fn test_recency_breaks_balanced_race() {
        // stars to a (40) vs forks + watchers to b (35); recency decides
        let a = repo("acme/a", 10, 1, 1);
        let mut b = repo("acme/b", 5, 8, 8);
        b.updated_at = Some("2024-06-01T00:00:00Z".to_string());

        let result = compare_summaries(&summary(&a), &summary(&b));
        assert_eq!(result.comparison.last_update_difference, -31);
        assert_eq!(result.winner, Winner::Repository2);
    }

    #[test]
    fn test_day_differences_floor() {
        let mut a = repo("acme/a", 0, 0, 0);
        a.created_at = Some("2020-01-01T00:00:00Z".to_string());
        let mut b = repo("acme/b", 0, 0, 0);
        b.created_at = Some("2020-01-02T12:00:00Z".to_string());

        let result = compare_summaries(&summary(&a), &summary(&b));
        assert_eq!(result.comparison.age_difference, -2);

        b.created_at = None;
        let result = compare_summaries(&summary(&a), &summary(&b));
        assert_eq!(result.comparison.age_difference, 0);
    }

    #[test]
    fn test_common_topics_keep_first_order() {
        let first = vec!["web".to_string(), "cli".to_string(), "go".to_string()];
        let second = vec!["go".to_string(), "cli".to_string()];
        assert_eq!(common_topics(&first, &second), vec!["cli", "go"]);
    }

    #[test]
    fn test_language_and_license_match() {
        let mut a = repo("acme/a", 0, 0, 0);
        let mut b = repo("acme/b", 0, 0, 0);
        a.language = Some("Rust".to_string());
        b.language = Some("Go".to_string());

        let result = compare_summaries(&summary(&a), &summary(&b));
        assert!(!result.comparison.language_match);
        assert!(result.comparison.license_match);
    }

    #[tokio::test]
    async fn test_compare_uses_fetched_details() {
        let stale = repo("acme/a", 1, 0, 0);
        let fresh = repo("acme/a", 500, 0, 0);
        let other = repo("acme/b", 100, 0, 0);
        let mut data = FakeData::default();
        data.details.insert("acme/a".to_string(), fresh);
        data.details.insert("acme/b".to_string(), other.clone());

        let result = Comparator::new(Arc::new(data))
            .compare(&stale, &other)
            .await
            .unwrap();
        assert_eq!(result.comparison.stars_difference, 400);
    }

    #[tokio::test]
    async fn test_compare_falls_back_when_fetch_fails() {
        let a = repo("acme/a", 10, 0, 0);
        let b = repo("acme/b", 30, 0, 0);

        let result = Comparator::new(Arc::new(FakeData::default()))
            .compare(&a, &b)
            .await
            .unwrap();
        assert_eq!(result.comparison.stars_difference, -20);
        assert_eq!(result.repository1.summary.full_name, "acme/a");
    }

    #[tokio::test]
    async fn test_unfetchable_placeholders_are_unresolvable() {
        let placeholder = |full_name: &str| RawRepo {
            id: 0,
            created_at: None,
            ..repo(full_name, 0, 0, 0)
        };

        let result = Comparator::new(Arc::new(FakeData::default()))
            .compare(&placeholder("nope/a"), &placeholder("nope/b"))
            .await;
        assert!(matches!(result, Err(SignalError::Unresolvable(ref m)) if m.contains("nope/")));
    }

    #[tokio::test]
    async fn test_one_unfetchable_placeholder_is_unresolvable() {
        let mut data = FakeData::default();
        data.details
            .insert("acme/a".to_string(), repo("acme/a", 10, 0, 0));
        let missing = RawRepo {
            created_at: None,
            ..repo("acme/typo", 0, 0, 0)
        };

        let result = Comparator::new(Arc::new(data))
            .compare(&repo("acme/a", 10, 0, 0), &missing)
            .await;
        assert!(matches!(result, Err(SignalError::Unresolvable(ref m)) if m.contains("acme/typo")));
    }

    #[tokio::test]
    async fn test_quality_overrides_point_race() {
        let a = repo("acme/a", 10, 1, 1);
        let b = repo("acme/b", 900, 90, 90);
        let mut data = FakeData::default();
        data.files.insert(
            "acme/a".to_string(),
            [".github/workflows", "Dockerfile", "SECURITY.md"].into_iter().collect(),
        );
        data.files
            .insert("acme/b".to_string(), ["Dockerfile"].into_iter().collect());

        let result = Comparator::new(Arc::new(data)).compare(&a, &b).await.unwrap();
        assert_eq!(
            result.comparison.quality_scores,
            Some(QualityScores { repo1: 3, repo2: 1 })
        );
        assert_eq!(result.winner, Winner::Repository1);
        assert!(result.repository1.quality.is_some());
        // repo1 leads every category, so suggestions come from the generic list
        assert!(result
            .suggestions
            .iter()
            .all(|s| !s.contains("continuous integration")));
    }

    #[tokio::test]
    async fn test_equal_quality_keeps_point_race() {
        let a = repo("acme/a", 10, 1, 1);
        let b = repo("acme/b", 900, 90, 90);

        let result = Comparator::new(Arc::new(FakeData::default()))
            .compare(&a, &b)
            .await
            .unwrap();
        assert_eq!(result.comparison.quality_scores, Some(QualityScores { repo1: 0, repo2: 0 }));
        assert_eq!(result.winner, Winner::Repository2);
    }

    #[tokio::test]
    async fn test_suggestions_reference_target() {
        let a = repo("acme/a", 10, 1, 1);
        let b = repo("acme/b", 10, 1, 1);
        let mut data = FakeData::default();
        data.files
            .insert("acme/b".to_string(), ["CHANGELOG.md"].into_iter().collect());

        let result = Comparator::new(Arc::new(data)).compare(&a, &b).await.unwrap();
        assert_eq!(result.suggestions.len(), 1);
        assert!(result.suggestions[0].contains("acme/b"));
        assert!(result
            .repository2
            .quality
            .is_some_and(|q| q.has(Signal::Changelog)));
    }

    #[tokio::test]
    async fn test_quality_disabled() {
        let a = repo("acme/a", 10, 1, 1);
        let b = repo("acme/b", 20, 1, 1);

        let result = Comparator::new(Arc::new(FakeData::default()))
            .with_quality(false)
            .compare(&a, &b)
            .await
            .unwrap();
        assert!(result.comparison.quality_scores.is_none());
        assert!(result.repository1.quality.is_none());
        assert!(result.suggestions.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_quality_timeout_degrades() {
        let a = repo("acme/a", 10, 1, 1);
        let b = repo("acme/b", 20, 1, 1);
        let data = FakeData {
            slow_probes: true,
            ..Default::default()
        };

        let result = Comparator::new(Arc::new(data))
            .with_quality_timeout(Some(Duration::from_secs(5)))
            .compare(&a, &b)
            .await
            .unwrap();
        assert!(result.comparison.quality_scores.is_none());
        assert_eq!(result.winner, Winner::Repository2);
    }

    #[tokio::test]
    async fn test_domain_attached() {
        let mut a = repo("acme/support-chatbot", 1, 0, 0);
        a.description = Some("Telegram bot assistant".to_string());
        let b = repo("acme/b", 1, 0, 0);

        let result = Comparator::new(Arc::new(FakeData::default()))
            .with_quality(false)
            .compare(&a, &b)
            .await
            .unwrap();
        assert_eq!(result.domain.map(|d| d.key), Some("chatbot"));
    }

    #[tokio::test]
    async fn test_unaddressable_repository() {
        let a = RawRepo {
            name: "orphan".to_string(),
            ..Default::default()
        };
        let b = repo("acme/b", 1, 0, 0);

        let result = Comparator::new(Arc::new(FakeData::default()))
            .compare(&a, &b)
            .await;
        assert!(matches!(result, Err(SignalError::Unresolvable(_))));
    }

    #[test]
    fn test_serialized_winner() {
        assert_eq!(
            serde_json::to_value(Winner::Repository1).unwrap(),
            serde_json::json!("repository1")
        );
        assert_eq!(serde_json::to_value(Winner::Tie).unwrap(), serde_json::json!("tie"));
    }
}
