//! Improvement suggestions from two quality reports

use crate::types::{QualityCategory, QualityReport, Signal};

/// Maximum suggestions returned
pub const MAX_SUGGESTIONS: usize = 5;

/// Generic suggestions used when no category gap yields anything
const GENERIC: &[Signal] = &[
    Signal::Ci,
    Signal::Docker,
    Signal::Dependabot,
    Signal::Tests,
    Signal::Contributing,
];

/// Suggest practices `own` lacks and `other` (named `target`) has
///
/// Categories are visited by descending gap; within a category every flag
/// the target has and `own` lacks produces one sentence.
pub fn generate_suggestions(
    target: &str,
    own: &QualityReport,
    other: &QualityReport,
) -> Vec<String> {
    let mut gaps: Vec<(QualityCategory, u32)> = QualityCategory::ALL
        .iter()
        .filter_map(|&category| {
            let gap = other
                .category_score(category)
                .saturating_sub(own.category_score(category));
            (gap > 0).then_some((category, gap))
        })
        .collect();
    // stable: equal gaps keep category order
    gaps.sort_by(|a, b| b.1.cmp(&a.1));

    let suggestions: Vec<String> = gaps
        .iter()
        .flat_map(|(category, _)| {
            let own_flags = own.category_flags(*category);
            other
                .category_flags(*category)
                .into_iter()
                .zip(own_flags)
                .filter(|((_, theirs), (_, ours))| *theirs && !*ours)
                .map(|((signal, _), _)| targeted(signal, target))
                .collect::<Vec<_>>()
        })
        .take(MAX_SUGGESTIONS)
        .collect();

    if !suggestions.is_empty() {
        return suggestions;
    }

    GENERIC
        .iter()
        .filter(|signal| !own.has(**signal))
        .map(|signal| generic(*signal).to_string())
        .take(MAX_SUGGESTIONS)
        .collect()
}

fn targeted(signal: Signal, target: &str) -> String {
    match signal {
        Signal::Ci => format!(
            "Set up continuous integration with GitHub Actions workflows, as {} does.",
            target
        ),
        Signal::Docker => format!(
            "Add a Dockerfile or docker-compose.yml for reproducible environments, like {}.",
            target
        ),
        Signal::Kubernetes => format!(
            "Provide Kubernetes or Helm manifests for deployment, following {}.",
            target
        ),
        Signal::Codeql => format!(
            "Enable CodeQL code scanning, which {} already runs.",
            target
        ),
        Signal::Dependabot => format!(
            "Configure Dependabot to keep dependencies current, as {} does.",
            target
        ),
        Signal::SecurityPolicy => format!(
            "Publish a SECURITY.md describing how to report vulnerabilities, like {}.",
            target
        ),
        Signal::CodeOfConduct => format!(
            "Adopt a CODE_OF_CONDUCT.md for contributors, as {} has.",
            target
        ),
        Signal::License => format!(
            "Choose and add a license; {} is clearly licensed.",
            target
        ),
        Signal::Tests => format!(
            "Add an automated test suite; {} ships tests.",
            target
        ),
        Signal::Lint => format!(
            "Add lint and formatting configuration, following {}.",
            target
        ),
        Signal::Typescript => format!(
            "Consider TypeScript for type safety, as {} uses it.",
            target
        ),
        Signal::Monorepo => format!(
            "Organize packages as workspaces, the way {} structures its monorepo.",
            target
        ),
        Signal::Contributing => format!(
            "Write a CONTRIBUTING.md guide for new contributors, like {}.",
            target
        ),
        Signal::IssueTemplates => format!(
            "Add issue templates to structure bug reports, as {} does.",
            target
        ),
        Signal::PrTemplate => format!(
            "Add a pull request template, following {}.",
            target
        ),
        Signal::Changelog => format!(
            "Keep a CHANGELOG.md of releases, like {}.",
            target
        ),
        Signal::IssuesEnabled => format!(
            "Enable GitHub issues to collect feedback, as {} does.",
            target
        ),
    }
}

fn generic(signal: Signal) -> &'static str {
    match signal {
        Signal::Ci => "Set up continuous integration with GitHub Actions.",
        Signal::Docker => "Add a Dockerfile for reproducible builds and deployments.",
        Signal::Dependabot => "Add a .github/dependabot.yml to automate dependency updates.",
        Signal::Tests => "Add automated tests to catch regressions early.",
        Signal::Contributing => "Add a CONTRIBUTING.md to guide new contributors.",
        _ => "Adopt common engineering hygiene practices.",
    }
}
