//! Tool response shapes not provided by the engine

use std::collections::BTreeMap;

use repo_signals::{
    intensity_level, max_daily_count, Contributor, Domain, QualityReport, RepositorySummary,
    WeeklyActivity,
};
use serde::Serialize;

/// Where an activity calendar came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ActivitySource {
    /// Caller-supplied series
    Supplied,
    /// One repository's commit statistics
    Repository,
    /// The account's contribution calendar
    ContributionCalendar,
    /// Merge of the account's recently pushed repositories
    RecentRepositories,
}

/// Merged weekly activity plus calendar shading
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityCalendar {
    pub source: ActivitySource,
    pub weeks: Vec<WeeklyActivity>,
    pub total_commits: u64,
    pub max_daily_count: u64,
    /// Shading level 0-4 per day, aligned with `weeks`
    pub levels: Vec<[u8; 7]>,
    /// Repositories merged, for `recentRepositories`
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub repositories: Vec<String>,
}

impl ActivityCalendar {
    pub fn new(source: ActivitySource, weeks: Vec<WeeklyActivity>) -> Self {
        let max = max_daily_count(&weeks);
        let levels = weeks
            .iter()
            .map(|week| week.days.map(|count| intensity_level(count, max)))
            .collect();
        Self {
            source,
            total_commits: weeks.iter().fold(0u64, |sum, w| sum.saturating_add(w.total)),
            max_daily_count: max,
            levels,
            weeks,
            repositories: Vec::new(),
        }
    }

    pub fn with_repositories(mut self, repositories: Vec<String>) -> Self {
        self.repositories = repositories;
        self
    }
}

/// Classification outcome
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainMatch {
    pub domain: Option<&'static Domain>,
}

/// Quality report for one repository
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QualitySummary {
    pub repository: String,
    pub report: QualityReport,
}

/// Chosen comparison target and the pool it came from
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonTarget {
    pub source: RepositorySummary,
    pub target: RepositorySummary,
    pub domain: Option<&'static Domain>,
    pub candidates: usize,
    pub random: bool,
}

/// Share of a repository's code written in one language
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageShare {
    pub language: String,
    pub bytes: u64,
    /// Percentage of all bytes, one decimal place
    pub percent: f64,
}

/// Language byte counts as shares, largest first
pub fn language_breakdown(bytes: &BTreeMap<String, u64>) -> Vec<LanguageShare> {
    let total = bytes.values().fold(0u64, |sum, b| sum.saturating_add(*b));
    let mut shares: Vec<LanguageShare> = bytes
        .iter()
        .map(|(language, &bytes)| LanguageShare {
            language: language.clone(),
            bytes,
            percent: if total == 0 {
                0.0
            } else {
                (bytes as f64 / total as f64 * 1000.0).round() / 10.0
            },
        })
        .collect();
    // stable sort keeps name order among equal sizes
    shares.sort_by(|a, b| b.bytes.cmp(&a.bytes));
    shares
}

/// Part of a repository insights bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum InsightPart {
    Details,
    Languages,
    Activity,
    Contributors,
}

/// A part that could not be loaded, and why
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightFailure {
    pub part: InsightPart,
    pub error: String,
}

/// Repository overview: metadata, languages, activity and contributors
///
/// Each part loads independently; missing parts are listed in `failures`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoInsights {
    pub repository: String,
    pub details: Option<RepositorySummary>,
    pub languages: Vec<LanguageShare>,
    pub activity: Option<ActivityCalendar>,
    pub contributors: Vec<Contributor>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<InsightFailure>,
}
