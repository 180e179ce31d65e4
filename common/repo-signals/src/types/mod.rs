//! Type definitions for repository signals
//!
//! Raw GitHub shapes (`RawRepo`) and the derived, serializable projections
//! the engine returns to clients.

pub mod activity;
pub mod comparison;
pub mod quality;
pub mod repo;

pub use activity::WeeklyActivity;
pub use comparison::{ComparisonMetrics, ComparisonResult, QualityScores, RepositoryEntry, Winner};
pub use quality::{
    CategoryScore, ManagementSignals, QualityCategory, QualityReport, ScalabilitySignals,
    SecuritySignals, Signal, StructureSignals,
};
pub use repo::{Contributor, License, Owner, RawRepo, RepositorySummary};

use serde::{Deserialize, Deserializer};

/// Deserialize `null` as the type's default value
///
/// GitHub sends `null` for several counters and lists on sparse records.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
