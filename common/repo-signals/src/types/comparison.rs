//! Comparison result types

use serde::Serialize;

use super::quality::QualityReport;
use super::repo::RepositorySummary;
use crate::domain::Domain;

/// Outcome of the weighted point race
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Winner {
    Repository1,
    Repository2,
    Tie,
}

/// A compared repository with its optional quality report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepositoryEntry {
    #[serde(flatten)]
    pub summary: RepositorySummary,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<QualityReport>,
}

impl From<RepositorySummary> for RepositoryEntry {
    fn from(summary: RepositorySummary) -> Self {
        Self {
            summary,
            quality: None,
        }
    }
}

/// Quality totals of both sides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QualityScores {
    pub repo1: u32,
    pub repo2: u32,
}

/// Pairwise metrics; every difference is repository1 minus repository2
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonMetrics {
    pub stars_difference: i64,
    pub forks_difference: i64,
    pub watchers_difference: i64,
    pub size_difference: i64,
    /// Whole days between creation dates
    pub age_difference: i64,
    /// Whole days between last updates; positive when repository1 was updated later
    pub last_update_difference: i64,
    /// Topics of repository1 also present on repository2, in repository1 order
    pub common_topics: Vec<String>,
    pub language_match: bool,
    pub license_match: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality_scores: Option<QualityScores>,
}

/// Full repository-vs-repository comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub repository1: RepositoryEntry,
    pub repository2: RepositoryEntry,
    pub comparison: ComparisonMetrics,
    pub winner: Winner,
    /// Domain of repository1, informational only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<&'static Domain>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}
