//! Engineering quality signal types
//!
//! Each category holds boolean flags; its score is derived from the flags at
//! construction and is never set independently.

use std::collections::HashSet;

use serde::Serialize;

/// One engineering-hygiene indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Signal {
    Ci,
    Docker,
    Kubernetes,
    Codeql,
    Dependabot,
    SecurityPolicy,
    CodeOfConduct,
    License,
    Tests,
    Lint,
    Typescript,
    Monorepo,
    Contributing,
    IssueTemplates,
    PrTemplate,
    Changelog,
    IssuesEnabled,
}

/// Quality category a signal belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum QualityCategory {
    Scalability,
    Security,
    Structure,
    Management,
}

impl QualityCategory {
    pub const ALL: [QualityCategory; 4] = [
        QualityCategory::Scalability,
        QualityCategory::Security,
        QualityCategory::Structure,
        QualityCategory::Management,
    ];
}

/// A set of flags for one category
pub trait SignalSet {
    const CATEGORY: QualityCategory;

    /// Build the flags from the set of signals found present
    fn from_present(present: &HashSet<Signal>) -> Self;

    /// Every flag of the category, in display order
    fn flags(&self) -> Vec<(Signal, bool)>;
}

macro_rules! signal_set {
    ($name:ident, $category:expr, { $($field:ident => $signal:expr),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $name {
            $(pub $field: bool,)+
        }

        impl SignalSet for $name {
            const CATEGORY: QualityCategory = $category;

            fn from_present(present: &HashSet<Signal>) -> Self {
                Self {
                    $($field: present.contains(&$signal),)+
                }
            }

            fn flags(&self) -> Vec<(Signal, bool)> {
                vec![$(($signal, self.$field)),+]
            }
        }
    };
}

signal_set!(ScalabilitySignals, QualityCategory::Scalability, {
    ci => Signal::Ci,
    docker => Signal::Docker,
    kubernetes => Signal::Kubernetes,
});

signal_set!(SecuritySignals, QualityCategory::Security, {
    codeql => Signal::Codeql,
    dependabot => Signal::Dependabot,
    security_policy => Signal::SecurityPolicy,
    code_of_conduct => Signal::CodeOfConduct,
    license => Signal::License,
});

signal_set!(StructureSignals, QualityCategory::Structure, {
    tests => Signal::Tests,
    lint => Signal::Lint,
    typescript => Signal::Typescript,
    monorepo => Signal::Monorepo,
});

signal_set!(ManagementSignals, QualityCategory::Management, {
    contributing => Signal::Contributing,
    issue_templates => Signal::IssueTemplates,
    pr_template => Signal::PrTemplate,
    changelog => Signal::Changelog,
    issues_enabled => Signal::IssuesEnabled,
});

/// Flags of one category with their count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryScore<S> {
    pub signals: S,
    score: u32,
}

impl<S: SignalSet> CategoryScore<S> {
    pub fn new(signals: S) -> Self {
        let score = signals.flags().iter().filter(|(_, on)| *on).count() as u32;
        Self { signals, score }
    }

    pub fn score(&self) -> u32 {
        self.score
    }
}

/// Quality signals of one repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityReport {
    pub scalability: CategoryScore<ScalabilitySignals>,
    pub security: CategoryScore<SecuritySignals>,
    pub structure: CategoryScore<StructureSignals>,
    pub management: CategoryScore<ManagementSignals>,
    total_score: u32,
}

impl QualityReport {
    /// Build a report from the signals found present
    pub fn from_present(present: &HashSet<Signal>) -> Self {
        let scalability = CategoryScore::new(ScalabilitySignals::from_present(present));
        let security = CategoryScore::new(SecuritySignals::from_present(present));
        let structure = CategoryScore::new(StructureSignals::from_present(present));
        let management = CategoryScore::new(ManagementSignals::from_present(present));
        let total_score =
            scalability.score() + security.score() + structure.score() + management.score();

        Self {
            scalability,
            security,
            structure,
            management,
            total_score,
        }
    }

    pub fn total_score(&self) -> u32 {
        self.total_score
    }

    pub fn category_score(&self, category: QualityCategory) -> u32 {
        match category {
            QualityCategory::Scalability => self.scalability.score(),
            QualityCategory::Security => self.security.score(),
            QualityCategory::Structure => self.structure.score(),
            QualityCategory::Management => self.management.score(),
        }
    }

    pub fn category_flags(&self, category: QualityCategory) -> Vec<(Signal, bool)> {
        match category {
            QualityCategory::Scalability => self.scalability.signals.flags(),
            QualityCategory::Security => self.security.signals.flags(),
            QualityCategory::Structure => self.structure.signals.flags(),
            QualityCategory::Management => self.management.signals.flags(),
        }
    }

    pub fn has(&self, signal: Signal) -> bool {
        QualityCategory::ALL
            .iter()
            .flat_map(|c| self.category_flags(*c))
            .any(|(s, on)| s == signal && on)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report_scores_zero() {
        let report = QualityReport::from_present(&HashSet::new());
        assert_eq!(report.total_score(), 0);
        for category in QualityCategory::ALL {
            assert_eq!(report.category_score(category), 0);
            assert!(report.category_flags(category).iter().all(|(_, on)| !on));
        }
    }

    #[test]
    fn test_scores_count_flags() {
        let present: HashSet<Signal> =
            [Signal::Ci, Signal::Docker, Signal::License, Signal::Changelog]
                .into_iter()
                .collect();
        let report = QualityReport::from_present(&present);

        assert_eq!(report.scalability.score(), 2);
        assert_eq!(report.security.score(), 1);
        assert_eq!(report.structure.score(), 0);
        assert_eq!(report.management.score(), 1);
        assert_eq!(report.total_score(), 4);
        assert!(report.has(Signal::Docker));
        assert!(!report.has(Signal::Kubernetes));
    }

    #[test]
    fn test_full_report_max_score() {
        let present: HashSet<Signal> = QualityCategory::ALL
            .iter()
            .flat_map(|c| {
                QualityReport::from_present(&HashSet::new())
                    .category_flags(*c)
                    .into_iter()
                    .map(|(s, _)| s)
                    .collect::<Vec<_>>()
            })
            .collect();
        let report = QualityReport::from_present(&present);
        assert_eq!(report.total_score(), 17);
    }

    #[test]
    fn test_serialized_shape() {
        let present: HashSet<Signal> = [Signal::SecurityPolicy].into_iter().collect();
        let json = serde_json::to_value(QualityReport::from_present(&present)).unwrap();

        assert_eq!(json["security"]["signals"]["securityPolicy"], true);
        assert_eq!(json["security"]["score"], 1);
        assert_eq!(json["totalScore"], 1);
    }
}
