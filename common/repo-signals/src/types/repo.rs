//! Repository type definitions
//!
//! `RawRepo` mirrors the GitHub REST repository object; `RepositorySummary`
//! is the read-only projection used in comparisons.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::null_as_default;

/// Repository owner (user or organization)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Owner {
    /// GitHub login
    pub login: String,
}

/// Contributor entry from `repos/{owner}/{repo}/contributors`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Contributor {
    pub login: String,

    /// Commits on the default branch
    #[serde(default)]
    pub contributions: u64,

    #[serde(default)]
    pub avatar_url: Option<String>,

    #[serde(default)]
    pub html_url: Option<String>,
}

/// License metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct License {
    /// SPDX key (e.g., "mit")
    #[serde(default)]
    pub key: Option<String>,

    /// Human readable license name
    #[serde(default)]
    pub name: Option<String>,
}

/// A GitHub repository as returned by the REST API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RawRepo {
    /// Numeric repository ID
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,

    /// Repository name (without owner)
    pub name: String,

    /// Full repository name with owner (e.g., "owner/repo")
    #[serde(default, deserialize_with = "null_as_default")]
    pub full_name: String,

    /// Repository owner
    #[serde(default)]
    pub owner: Option<Owner>,

    /// Repository description
    #[serde(default)]
    pub description: Option<String>,

    /// Primary language
    #[serde(default)]
    pub language: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub stargazers_count: u64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub forks_count: u64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub watchers_count: u64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub open_issues_count: u64,

    /// Repository size in KB (0 when unknown)
    #[serde(default, deserialize_with = "null_as_default")]
    pub size: u64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub topics: Vec<String>,

    #[serde(default)]
    pub license: Option<License>,

    #[serde(default)]
    pub default_branch: Option<String>,

    /// Creation timestamp (ISO 8601)
    #[serde(default)]
    pub created_at: Option<String>,

    /// Last update timestamp (ISO 8601)
    #[serde(default)]
    pub updated_at: Option<String>,

    /// Last push timestamp (ISO 8601)
    #[serde(default)]
    pub pushed_at: Option<String>,

    /// Whether the repository is a fork
    #[serde(default, deserialize_with = "null_as_default")]
    pub fork: bool,

    /// Whether issues are enabled; absent means enabled
    #[serde(default)]
    pub has_issues: Option<bool>,
}

impl RawRepo {
    /// Owner login, falling back to the `owner/` prefix of `full_name`
    pub fn owner_login(&self) -> &str {
        match &self.owner {
            Some(owner) if !owner.login.is_empty() => &owner.login,
            _ => self
                .full_name
                .split_once('/')
                .map(|(owner, _)| owner)
                .unwrap_or(""),
        }
    }

    /// License display name, if the repository declares one
    pub fn license_name(&self) -> Option<&str> {
        self.license
            .as_ref()
            .and_then(|l| l.name.as_deref())
            .filter(|name| !name.is_empty())
    }

    pub fn issues_enabled(&self) -> bool {
        self.has_issues != Some(false)
    }

    /// Whether this record carries enough identity to address the repository
    pub fn is_addressable(&self) -> bool {
        !self.owner_login().is_empty() && !self.name.is_empty()
    }

    /// Whether this record is only a reference, with no fetched metadata
    pub fn is_placeholder(&self) -> bool {
        self.id == 0 && self.created_at.is_none()
    }

    /// `owner/name`, built from parts when `full_name` is missing
    pub fn slug(&self) -> String {
        if self.full_name.is_empty() {
            format!("{}/{}", self.owner_login(), self.name)
        } else {
            self.full_name.clone()
        }
    }

    pub fn pushed_at_time(&self) -> Option<DateTime<Utc>> {
        self.pushed_at.as_deref().and_then(parse_timestamp)
    }
}

/// Parse an ISO 8601 timestamp as returned by GitHub
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Read-only projection of a repository used in comparisons
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RepositorySummary {
    pub name: String,
    pub full_name: String,
    pub owner: String,
    pub stars: u64,
    pub forks: u64,
    pub watchers: u64,
    pub language: Option<String>,
    pub size: u64,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub description: Option<String>,
    pub topics: Vec<String>,
    pub license: Option<String>,
    pub open_issues: u64,
    pub default_branch: Option<String>,
}

impl From<&RawRepo> for RepositorySummary {
    fn from(repo: &RawRepo) -> Self {
        Self {
            name: repo.name.clone(),
            full_name: repo.slug(),
            owner: repo.owner_login().to_string(),
            stars: repo.stargazers_count,
            forks: repo.forks_count,
            watchers: repo.watchers_count,
            language: repo.language.clone(),
            size: repo.size,
            created_at: repo.created_at.clone(),
            updated_at: repo.updated_at.clone(),
            description: repo.description.clone(),
            topics: repo.topics.clone(),
            license: repo.license_name().map(str::to_string),
            open_issues: repo.open_issues_count,
            default_branch: repo.default_branch.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_sparse_repo() {
        let json = r#"{
            "name": "tool",
            "full_name": "acme/tool",
            "stargazers_count": null,
            "topics": null,
            "license": {"key": "mit", "name": "MIT License"}
        }"#;
        let repo: RawRepo = serde_json::from_str(json).unwrap();

        assert_eq!(repo.stargazers_count, 0);
        assert!(repo.topics.is_empty());
        assert_eq!(repo.owner_login(), "acme");
        assert_eq!(repo.license_name(), Some("MIT License"));
        assert!(repo.issues_enabled());
    }

    #[test]
    fn test_summary_projection() {
        let repo = RawRepo {
            name: "tool".to_string(),
            owner: Some(Owner {
                login: "acme".to_string(),
            }),
            stargazers_count: 12,
            forks_count: 3,
            topics: vec!["cli".to_string()],
            ..Default::default()
        };
        let summary = RepositorySummary::from(&repo);

        assert_eq!(summary.full_name, "acme/tool");
        assert_eq!(summary.owner, "acme");
        assert_eq!(summary.stars, 12);
        assert_eq!(summary.forks, 3);
        assert_eq!(summary.topics, vec!["cli"]);
    }

    #[test]
    fn test_addressable() {
        let anonymous = RawRepo {
            name: "tool".to_string(),
            ..Default::default()
        };
        assert!(!anonymous.is_addressable());

        let named = RawRepo {
            name: "tool".to_string(),
            full_name: "acme/tool".to_string(),
            ..Default::default()
        };
        assert!(named.is_addressable());
    }

    #[test]
    fn test_parse_timestamp() {
        assert!(parse_timestamp("2024-03-01T12:00:00Z").is_some());
        assert!(parse_timestamp("yesterday").is_none());
    }
}
