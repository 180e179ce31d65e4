//! Engineering quality scoring
//!
//! Probes a repository for hygiene files (CI, containers, security policy,
//! tests, templates, ...) and folds the findings into category scores.
//! Every probe runs concurrently and fails independently: an error reads as
//! "absent" and never aborts the report.

use std::collections::HashSet;

use futures_util::future::join_all;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::collaborator::FileProbe;
use crate::error::SignalResult;
use crate::types::{QualityReport, RawRepo, Signal};

/// Package manifest probed for the monorepo `workspaces` field
const PACKAGE_MANIFEST: &str = "package.json";

/// Tooling files probed with the rest but read by no flag
const UNSCORED_PATHS: &[&str] = &["yarn.lock", ".prettierrc"];

/// Candidate paths per signal; a signal is present when any path exists
pub const SIGNAL_PATHS: &[(Signal, &[&str])] = &[
    (Signal::Ci, &[".github/workflows"]),
    (Signal::Docker, &["Dockerfile", "docker-compose.yml"]),
    (Signal::Kubernetes, &["kubernetes", ".k8s", "helm"]),
    (Signal::Codeql, &[".github/workflows/codeql.yml"]),
    (Signal::Dependabot, &[".github/dependabot.yml"]),
    (Signal::SecurityPolicy, &["SECURITY.md"]),
    (Signal::CodeOfConduct, &["CODE_OF_CONDUCT.md"]),
    (
        Signal::Tests,
        &["jest.config.js", "jest.config.ts", "__tests__", "tests"],
    ),
    (
        Signal::Lint,
        &[".eslintrc.js", ".eslintrc.cjs", ".eslintrc.json"],
    ),
    (Signal::Typescript, &["tsconfig.json"]),
    (Signal::Monorepo, &["pnpm-workspace.yaml"]),
    (Signal::Contributing, &["CONTRIBUTING.md"]),
    (Signal::IssueTemplates, &[".github/ISSUE_TEMPLATE"]),
    (Signal::PrTemplate, &[".github/PULL_REQUEST_TEMPLATE.md"]),
    (Signal::Changelog, &["CHANGELOG.md"]),
];

/// Every path the scorer probes, table order, package manifest last
pub fn probed_paths() -> Vec<&'static str> {
    let mut paths: Vec<&'static str> = Vec::new();
    let table = SIGNAL_PATHS.iter().flat_map(|(_, candidates)| candidates.iter());
    for path in table.chain(UNSCORED_PATHS) {
        if !paths.contains(path) {
            paths.push(*path);
        }
    }
    if !paths.contains(&PACKAGE_MANIFEST) {
        paths.push(PACKAGE_MANIFEST);
    }
    paths
}

/// Score a repository's engineering quality signals
///
/// `license` and `issuesEnabled` come from the repository metadata; every
/// other flag comes from `probe`.
#[instrument(skip_all, fields(repo = %repo.slug()))]
pub async fn score(repo: &RawRepo, probe: &dyn FileProbe) -> QualityReport {
    let paths = probed_paths();
    let results = join_all(paths.iter().map(|path| async move {
        match probe.exists(path).await {
            Ok(found) => (*path, found),
            Err(e) => {
                debug!(path, error = %e, "probe failed, treating as absent");
                (*path, false)
            }
        }
    }))
    .await;

    let found: HashSet<&str> = results
        .into_iter()
        .filter_map(|(path, exists)| exists.then_some(path))
        .collect();

    let mut present: HashSet<Signal> = SIGNAL_PATHS
        .iter()
        .filter(|(_, candidates)| candidates.iter().any(|p| found.contains(p)))
        .map(|(signal, _)| *signal)
        .collect();

    if !present.contains(&Signal::Monorepo)
        && found.contains(PACKAGE_MANIFEST)
        && manifest_declares_workspaces(probe).await
    {
        present.insert(Signal::Monorepo);
    }
    if repo.license_name().is_some() {
        present.insert(Signal::License);
    }
    if repo.issues_enabled() {
        present.insert(Signal::IssuesEnabled);
    }

    let report = QualityReport::from_present(&present);
    debug!(
        probes = paths.len(),
        found = found.len(),
        total = report.total_score(),
        "quality scored"
    );
    report
}

async fn manifest_declares_workspaces(probe: &dyn FileProbe) -> bool {
    let content = match probe.content(PACKAGE_MANIFEST).await {
        Ok(content) => content,
        Err(e) => {
            debug!(error = %e, "package manifest fetch failed");
            return false;
        }
    };
    match workspaces_declared(&content) {
        Ok(declared) => declared,
        Err(e) => {
            debug!(error = %e, "package manifest parse failed");
            false
        }
    }
}

/// Whether a package manifest declares a non-empty `workspaces` field
///
/// Accepts both the array form and the `{ "packages": [...] }` form.
pub fn workspaces_declared(manifest: &str) -> SignalResult<bool> {
    let json: Value = serde_json::from_str(manifest)?;
    let declared = match json.get("workspaces") {
        Some(Value::Array(entries)) => !entries.is_empty(),
        Some(Value::Object(map)) => map
            .get("packages")
            .and_then(Value::as_array)
            .is_some_and(|packages| !packages.is_empty()),
        _ => false,
    };
    Ok(declared)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;

    use crate::error::SignalError;
    use crate::types::{License, QualityCategory};

    #[derive(Default)]
    struct FakeProbe {
        files: HashMap<&'static str, String>,
        failing: HashSet<&'static str>,
    }

    impl FakeProbe {
        fn with(paths: &[&'static str]) -> Self {
            Self {
                files: paths.iter().map(|p| (*p, String::new())).collect(),
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl FileProbe for FakeProbe {
        async fn exists(&self, path: &str) -> SignalResult<bool> {
            if self.failing.contains(path) {
                return Err(SignalError::Network("connection reset".to_string()));
            }
            Ok(self.files.contains_key(path))
        }

        async fn content(&self, path: &str) -> SignalResult<String> {
            self.files
                .get(path)
                .cloned()
                .ok_or_else(|| SignalError::Network("404".to_string()))
        }
    }

    fn bare_repo() -> RawRepo {
        RawRepo {
            name: "tool".to_string(),
            full_name: "acme/tool".to_string(),
            has_issues: Some(false),
            ..Default::default()
        }
    }

    #[test]
    fn test_probed_paths() {
        let paths = probed_paths();
        assert_eq!(paths.len(), 26);
        assert_eq!(paths.last(), Some(&"package.json"));
        assert!(paths.contains(&".prettierrc"));
        assert!(!paths.contains(&"lerna.json"));
    }

    #[tokio::test]
    async fn test_nothing_found_scores_zero() {
        let report = score(&bare_repo(), &FakeProbe::default()).await;

        assert_eq!(report.total_score(), 0);
        for category in QualityCategory::ALL {
            assert!(report.category_flags(category).iter().all(|(_, on)| !on));
        }
    }

    #[tokio::test]
    async fn test_ci_only() {
        let report = score(&bare_repo(), &FakeProbe::with(&[".github/workflows"])).await;

        assert!(report.scalability.signals.ci);
        assert!(!report.scalability.signals.docker);
        assert!(!report.scalability.signals.kubernetes);
        assert_eq!(report.scalability.score(), 1);
        assert_eq!(report.total_score(), 1);
    }

    #[tokio::test]
    async fn test_alternative_paths_are_or_ed() {
        let probe = FakeProbe::with(&["docker-compose.yml", "helm", "tests", ".eslintrc.cjs"]);
        let report = score(&bare_repo(), &probe).await;

        assert!(report.scalability.signals.docker);
        assert!(report.scalability.signals.kubernetes);
        assert!(report.structure.signals.tests);
        assert!(report.structure.signals.lint);
        assert_eq!(report.total_score(), 4);
    }

    #[tokio::test]
    async fn test_prettier_alone_is_not_lint() {
        let report = score(&bare_repo(), &FakeProbe::with(&[".prettierrc"])).await;

        assert!(!report.structure.signals.lint);
        assert_eq!(report.total_score(), 0);
    }

    #[tokio::test]
    async fn test_unscored_tooling_files() {
        let report = score(&bare_repo(), &FakeProbe::with(&["yarn.lock", "lerna.json"])).await;

        assert!(!report.structure.signals.monorepo);
        assert_eq!(report.total_score(), 0);
    }

    #[tokio::test]
    async fn test_metadata_signals() {
        let repo = RawRepo {
            license: Some(License {
                key: Some("mit".to_string()),
                name: Some("MIT License".to_string()),
            }),
            has_issues: None,
            ..bare_repo()
        };
        let report = score(&repo, &FakeProbe::default()).await;

        assert!(report.security.signals.license);
        assert!(report.management.signals.issues_enabled);
        assert_eq!(report.total_score(), 2);
    }

    #[tokio::test]
    async fn test_failed_probes_degrade_to_false() {
        let mut probe = FakeProbe::with(&["SECURITY.md", "CHANGELOG.md"]);
        probe.failing.insert("CHANGELOG.md");
        probe.failing.insert(".github/workflows");

        let report = score(&bare_repo(), &probe).await;
        assert!(report.security.signals.security_policy);
        assert!(!report.management.signals.changelog);
        assert!(!report.scalability.signals.ci);
        assert_eq!(report.total_score(), 1);
    }

    #[tokio::test]
    async fn test_monorepo_from_manifest_workspaces() {
        let mut probe = FakeProbe::default();
        probe
            .files
            .insert("package.json", r#"{"name": "root", "workspaces": ["packages/*"]}"#.to_string());

        let report = score(&bare_repo(), &probe).await;
        assert!(report.structure.signals.monorepo);
    }

    #[tokio::test]
    async fn test_monorepo_manifest_without_workspaces() {
        let mut probe = FakeProbe::default();
        probe
            .files
            .insert("package.json", r#"{"name": "single"}"#.to_string());

        let report = score(&bare_repo(), &probe).await;
        assert!(!report.structure.signals.monorepo);
    }

    #[tokio::test]
    async fn test_monorepo_malformed_manifest() {
        let mut probe = FakeProbe::default();
        probe.files.insert("package.json", "{ not json".to_string());

        let report = score(&bare_repo(), &probe).await;
        assert!(!report.structure.signals.monorepo);
        assert_eq!(report.total_score(), 0);
    }

    #[tokio::test]
    async fn test_monorepo_from_workspace_file() {
        let report = score(&bare_repo(), &FakeProbe::with(&["pnpm-workspace.yaml"])).await;
        assert!(report.structure.signals.monorepo);
    }

    #[tokio::test]
    async fn test_repeated_scoring_is_stable() {
        let probe = FakeProbe::with(&["Dockerfile", "CONTRIBUTING.md"]);
        let first = score(&bare_repo(), &probe).await;
        let second = score(&bare_repo(), &probe).await;
        assert_eq!(first, second);
    }

    #[test]
    fn test_workspaces_declared_forms() {
        assert!(workspaces_declared(r#"{"workspaces": ["a"]}"#).unwrap());
        assert!(workspaces_declared(r#"{"workspaces": {"packages": ["a/*"]}}"#).unwrap());
        assert!(!workspaces_declared(r#"{"workspaces": []}"#).unwrap());
        assert!(!workspaces_declared(r#"{"workspaces": {"packages": []}}"#).unwrap());
        assert!(workspaces_declared("[1,").is_err());
    }
}
