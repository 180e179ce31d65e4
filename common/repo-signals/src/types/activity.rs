//! Weekly commit activity

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

use super::null_as_default;

/// One week of commit counts, broken down by day (index 0 = Sunday)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WeeklyActivity {
    /// Week start as Unix epoch seconds
    #[serde(alias = "weekStart")]
    pub week: i64,

    /// Commits in the week
    #[serde(default, deserialize_with = "null_as_default")]
    pub total: u64,

    /// Commits per day of week, Sunday first
    #[serde(default, deserialize_with = "deserialize_days")]
    pub days: [u64; 7],
}

impl WeeklyActivity {
    /// Build a week whose total is the sum of its days
    pub fn from_days(week: i64, days: [u64; 7]) -> Self {
        Self {
            week,
            total: days.iter().fold(0u64, |sum, &d| sum.saturating_add(d)),
            days,
        }
    }
}

/// Accept short, long or null-holed day arrays; missing slots read as 0
fn deserialize_days<'de, D>(deserializer: D) -> Result<[u64; 7], D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<Option<u64>>>::deserialize(deserializer)?.unwrap_or_default();
    let mut days = [0u64; 7];
    for (slot, value) in days.iter_mut().zip(raw) {
        *slot = value.unwrap_or(0);
    }
    Ok(days)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_days_zero_filled() {
        let week: WeeklyActivity =
            serde_json::from_str(r#"{"week": 1000, "total": 3, "days": [1, null, 2]}"#).unwrap();
        assert_eq!(week.days, [1, 0, 2, 0, 0, 0, 0]);
        assert_eq!(week.total, 3);
    }

    #[test]
    fn test_week_start_alias_and_missing_fields() {
        let week: WeeklyActivity = serde_json::from_str(r#"{"weekStart": 7}"#).unwrap();
        assert_eq!(week.week, 7);
        assert_eq!(week.total, 0);
        assert_eq!(week.days, [0; 7]);
    }

    #[test]
    fn test_from_days_sums_total() {
        let week = WeeklyActivity::from_days(0, [1, 2, 3, 0, 0, 0, 4]);
        assert_eq!(week.total, 10);
    }
}
