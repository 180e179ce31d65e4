//! Handler implementations for repo-insight tools
//!
//! Organized by domain: activity, repo, compare. Handlers return typed
//! results; the server serializes them.

mod activity;
mod compare;
mod repo;

pub use activity::*;
pub use compare::*;
pub use repo::*;

use std::sync::Arc;

use repo_signals::{Comparator, RawRepo, RepositoryData};
use rmcp::ErrorData as McpError;

use crate::config::Config;
use crate::repo_ref::RepoRef;
use crate::result::signal_to_mcp_error;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct Insight {
    pub data: Arc<dyn RepositoryData>,
    pub config: Config,
}

impl Insight {
    pub fn new(data: Arc<dyn RepositoryData>, config: Config) -> Self {
        Self { data, config }
    }

    /// Comparator configured from settings; `quality` overrides the setting
    pub fn comparator(&self, quality: Option<bool>) -> Comparator {
        Comparator::new(self.data.clone())
            .with_quality(quality.unwrap_or(self.config.quality.enabled))
            .with_quality_timeout(self.config.quality_timeout())
    }

    /// Fetch repository metadata for a reference
    pub async fn details(&self, repo: &RepoRef) -> Result<RawRepo, McpError> {
        self.data
            .get_repository_details(&repo.owner, &repo.name)
            .await
            .map_err(signal_to_mcp_error)
    }
}
