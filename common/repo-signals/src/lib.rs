//! Repo Signals - repository signal and comparison engine
//!
//! Pure analysis over GitHub repository data, shared by the insight MCP server:
//!
//! - **Activity**: merge weekly commit series into one 52-week calendar
//! - **Domain**: guess a repository's application domain from its text
//! - **Similarity**: discover and rank candidates for a comparison
//! - **Quality**: probe for engineering-hygiene files and score them
//! - **Comparison**: repository-vs-repository report with a winner and suggestions
//!
//! Network access goes through the [`RepositoryData`] trait so every
//! operation can run against fakes in tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use repo_signals::{Comparator, RepositoryData};
//!
//! let comparator = Comparator::new(data.clone());
//! let result = comparator.compare(&repo1, &repo2).await?;
//! println!("winner: {:?}", result.winner);
//! ```

pub mod activity;
pub mod collaborator;
pub mod comparison;
pub mod domain;
pub mod error;
pub mod quality;
pub mod similarity;
pub mod suggestions;
pub mod types;

pub use activity::{bucket_commits, intensity_level, max_daily_count, merge, WINDOW_WEEKS};
pub use collaborator::{FileProbe, RepoProbe, RepositoryData};
pub use comparison::{compare_summaries, Comparator};
pub use domain::{classify, Domain, DOMAINS};
pub use error::{SignalError, SignalResult};
pub use quality::score;
pub use similarity::{
    build_search_queries, find_comparison_target, find_similar_repositories,
    pick_best_candidate, pick_random_candidate,
};
pub use suggestions::generate_suggestions;
pub use types::{
    ComparisonResult, Contributor, QualityReport, RawRepo, RepositorySummary, WeeklyActivity,
    Winner,
};
