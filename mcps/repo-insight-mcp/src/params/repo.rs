//! Repository parameter types

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ClassifyDomainParams {
    #[schemars(description = "Repository in OWNER/REPO format; its metadata is fetched")]
    pub repo: Option<String>,
    #[schemars(description = "Repository name, used when repo is not given")]
    pub name: Option<String>,
    #[schemars(description = "Repository description, used when repo is not given")]
    pub description: Option<String>,
    #[schemars(description = "Repository topics, used when repo is not given")]
    pub topics: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct QualityReportParams {
    #[schemars(description = "Repository in OWNER/REPO format")]
    pub repo: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ListReposParams {
    #[schemars(description = "GitHub user or organization login")]
    pub owner: String,
    #[schemars(description = "Maximum number of repos to return (default: 30)")]
    pub limit: Option<u32>,
    #[schemars(description = "Leave out forks")]
    pub exclude_forks: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct RepoInsightsParams {
    #[schemars(description = "Repository in OWNER/REPO format")]
    pub repo: String,
}
