//! Collaborator interfaces for repository data
//!
//! The engine never talks to GitHub directly. Implementations of
//! [`RepositoryData`] are injected into the operations that need network
//! access, which lets tests substitute in-memory fakes.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::error::SignalResult;
use crate::types::{Contributor, RawRepo, WeeklyActivity};

/// Source of repository metadata, content and statistics
///
/// Implementations must be `Send + Sync`; the server shares one instance
/// across concurrent tool calls.
#[async_trait]
pub trait RepositoryData: Send + Sync {
    /// Best-effort repository search using GitHub search syntax
    async fn search_repositories(&self, query: &str) -> SignalResult<Vec<RawRepo>>;

    /// Canonical metadata for one repository
    async fn get_repository_details(&self, owner: &str, name: &str) -> SignalResult<RawRepo>;

    /// Whether `path` exists on the default branch; a 404 is `Ok(false)`
    async fn file_exists_at(&self, owner: &str, name: &str, path: &str) -> SignalResult<bool>;

    /// Decoded content of a file on the default branch
    async fn get_file_content(&self, owner: &str, name: &str, path: &str)
        -> SignalResult<String>;

    /// Weekly commit series of one repository
    async fn get_weekly_commit_activity(
        &self,
        owner: &str,
        name: &str,
    ) -> SignalResult<Vec<WeeklyActivity>>;

    /// Bytes of code per language
    async fn get_languages(&self, owner: &str, name: &str) -> SignalResult<BTreeMap<String, u64>>;

    /// Contributors, most commits first
    async fn get_contributors(&self, owner: &str, name: &str) -> SignalResult<Vec<Contributor>>;

    /// Repositories owned by a user or organization
    async fn list_owner_repositories(&self, owner: &str, limit: u32)
        -> SignalResult<Vec<RawRepo>>;

    /// Contribution calendar of a user, `None` when unavailable
    async fn get_contribution_calendar(
        &self,
        login: &str,
    ) -> SignalResult<Option<Vec<WeeklyActivity>>>;
}

/// File existence and content lookups within one repository
#[async_trait]
pub trait FileProbe: Send + Sync {
    async fn exists(&self, path: &str) -> SignalResult<bool>;

    async fn content(&self, path: &str) -> SignalResult<String>;
}

/// [`FileProbe`] bound to one repository of a [`RepositoryData`]
pub struct RepoProbe<'a> {
    data: &'a dyn RepositoryData,
    owner: &'a str,
    name: &'a str,
}

impl<'a> RepoProbe<'a> {
    pub fn new(data: &'a dyn RepositoryData, owner: &'a str, name: &'a str) -> Self {
        Self { data, owner, name }
    }
}

#[async_trait]
impl FileProbe for RepoProbe<'_> {
    async fn exists(&self, path: &str) -> SignalResult<bool> {
        self.data.file_exists_at(self.owner, self.name, path).await
    }

    async fn content(&self, path: &str) -> SignalResult<String> {
        self.data.get_file_content(self.owner, self.name, path).await
    }
}
