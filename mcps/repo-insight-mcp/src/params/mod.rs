//! Parameter types for repo-insight tools
//!
//! Organized by domain: activity, repo, compare

mod activity;
mod compare;
mod repo;

pub use activity::*;
pub use compare::*;
pub use repo::*;
