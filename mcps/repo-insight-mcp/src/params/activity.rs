//! Activity parameter types

use repo_signals::WeeklyActivity;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct MergeActivityParams {
    #[schemars(
        description = "Weekly commit series to merge, one array per repository. Each week is {week: epoch seconds, total, days: [Sun..Sat]}"
    )]
    pub series: Vec<Vec<WeeklyActivity>>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct RepoActivityParams {
    #[schemars(description = "Repository in OWNER/REPO format")]
    pub repo: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct AccountActivityParams {
    #[schemars(description = "GitHub user or organization login")]
    pub login: String,
    #[schemars(
        description = "Recently pushed repositories to merge when no contribution calendar is available (default: 6)"
    )]
    pub max_repos: Option<usize>,
}
