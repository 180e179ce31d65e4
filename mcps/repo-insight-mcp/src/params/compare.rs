//! Comparison parameter types

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct FindComparisonParams {
    #[schemars(description = "Repository in OWNER/REPO format to find a peer for")]
    pub repo: String,
    #[schemars(description = "Pick uniformly at random from the candidates instead of the best-ranked one")]
    pub random: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CompareReposParams {
    #[schemars(description = "First repository in OWNER/REPO format")]
    pub repo: String,
    #[schemars(
        description = "Second repository in OWNER/REPO format; discovered automatically when omitted"
    )]
    pub other: Option<String>,
    #[schemars(description = "Score engineering quality for both sides (default: server setting)")]
    pub quality: Option<bool>,
}
