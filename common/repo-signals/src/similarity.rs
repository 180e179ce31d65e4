//! Comparison candidate discovery and ranking
//!
//! Discovery turns a source repository into a handful of GitHub search
//! queries and pools the results. Ranking applies hard filters (language,
//! domain, size band, popularity, topics) and scores the survivors; when the
//! filters leave nothing, the whole pool is scored instead.

use std::collections::HashSet;

use futures_util::future::join_all;
use rand::seq::IndexedRandom;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::collaborator::RepositoryData;
use crate::comparison::common_topics;
use crate::domain::{classify, search_text, Domain};
use crate::error::{SignalError, SignalResult};
use crate::types::{RawRepo, RepositorySummary};

/// Default number of search queries issued per discovery
pub const MAX_SEARCH_QUERIES: usize = 8;

/// Default size of the discovered candidate pool
pub const DEFAULT_CANDIDATE_LIMIT: usize = 50;

/// Star ceiling for candidates of a small source repository
const SMALL_REPO_STARS: u64 = 50;
const SMALL_REPO_CANDIDATE_MAX_STARS: u64 = 2000;

const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "do", "does",
    "did", "will", "would", "could", "should", "may", "might", "must", "can", "this", "that",
    "these", "those",
];

/// Options for candidate discovery
#[derive(Debug, Clone, Copy)]
pub struct SearchOptions {
    /// Maximum candidates kept after de-duplication
    pub limit: usize,
    /// Maximum queries issued
    pub max_queries: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_CANDIDATE_LIMIT,
            max_queries: MAX_SEARCH_QUERIES,
        }
    }
}

// ============================================================================
// Ranking
// ============================================================================

/// Pick the best comparison candidate for `source`
///
/// Fails with [`SignalError::NoCandidates`] only when `candidates` is empty.
/// Ties keep the earliest candidate.
pub fn pick_best_candidate(
    source: &RepositorySummary,
    candidates: &[RepositorySummary],
) -> SignalResult<RepositorySummary> {
    let index = best_candidate_index(source, candidates)?;
    Ok(candidates[index].clone())
}

fn best_candidate_index(
    source: &RepositorySummary,
    candidates: &[RepositorySummary],
) -> SignalResult<usize> {
    if candidates.is_empty() {
        return Err(SignalError::NoCandidates);
    }

    let domain = classify(&source.name, source.description.as_deref(), &source.topics);

    let filtered: Vec<usize> = candidates
        .iter()
        .enumerate()
        .filter(|(_, c)| passes_filters(source, domain, c))
        .map(|(i, _)| i)
        .collect();

    let pool: Vec<usize> = if filtered.is_empty() {
        fallback_pool(source, candidates)
    } else {
        filtered
    };

    let mut best: Option<(usize, f64)> = None;
    for index in pool {
        let score = candidate_score(source, domain, &candidates[index]);
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((index, score));
        }
    }

    best.map(|(index, _)| index).ok_or(SignalError::NoCandidates)
}

/// Pool scored when the filters reject everything: same-language
/// candidates when there are any, otherwise all of them
fn fallback_pool(source: &RepositorySummary, candidates: &[RepositorySummary]) -> Vec<usize> {
    if source.language.is_some() {
        let same_language: Vec<usize> = candidates
            .iter()
            .enumerate()
            .filter(|(_, c)| c.language == source.language)
            .map(|(i, _)| i)
            .collect();
        if !same_language.is_empty() {
            debug!(
                candidates = same_language.len(),
                "filters rejected every candidate, scoring same-language pool"
            );
            return same_language;
        }
    }

    debug!(
        candidates = candidates.len(),
        "filters rejected every candidate, scoring full pool"
    );
    (0..candidates.len()).collect()
}

fn candidate_text(candidate: &RepositorySummary) -> String {
    search_text(
        &candidate.name,
        candidate.description.as_deref(),
        &candidate.topics,
    )
}

fn passes_filters(
    source: &RepositorySummary,
    domain: Option<&Domain>,
    candidate: &RepositorySummary,
) -> bool {
    if let (Some(want), Some(have)) = (&source.language, &candidate.language) {
        if want != have {
            return false;
        }
    }

    if let Some(domain) = domain {
        if !domain.matches(&candidate_text(candidate)) {
            return false;
        }
    }

    if source.size > 0 && candidate.size > 0 {
        let (min, max) = size_band(source.size);
        if candidate.size < min || candidate.size > max {
            return false;
        }
    }

    if source.stars < SMALL_REPO_STARS && candidate.stars > SMALL_REPO_CANDIDATE_MAX_STARS {
        return false;
    }

    if !source.topics.is_empty() && common_topics(&source.topics, &candidate.topics).is_empty() {
        return false;
    }

    true
}

/// Accepted candidate sizes: `[max(10, floor(size * 0.3)), ceil(size * 3.5)]`
fn size_band(size: u64) -> (u64, u64) {
    let size = size as f64;
    let min = ((size * 0.3).floor() as u64).max(10);
    let max = (size * 3.5).ceil() as u64;
    (min, max)
}

fn candidate_score(
    source: &RepositorySummary,
    domain: Option<&Domain>,
    candidate: &RepositorySummary,
) -> f64 {
    let mut score = ((candidate.stars as f64 + 1.0).log10() * 10.0).min(50.0);

    if candidate.license.is_some() {
        score += 5.0;
    }
    if source.language.is_some() && source.language == candidate.language {
        score += 25.0;
    }

    let shared = common_topics(&source.topics, &candidate.topics).len() as f64;
    score += (shared * 3.0).min(15.0);

    if let Some(domain) = domain {
        score += 3.0 * domain.keyword_hits(&candidate_text(candidate)) as f64;
    }

    score
}

/// Pick a uniformly random candidate
///
/// Presentation-level alternative to [`pick_best_candidate`] for clients that
/// want variety rather than the closest match.
pub fn pick_random_candidate<'a, T, R>(candidates: &'a [T], rng: &mut R) -> SignalResult<&'a T>
where
    R: Rng + ?Sized,
{
    candidates.choose(rng).ok_or(SignalError::NoCandidates)
}

// ============================================================================
// Discovery
// ============================================================================

/// Build GitHub search queries describing `source`
///
/// Domain keywords come first, then topics, then description keywords, then
/// a size bracket; each is also issued language-qualified when the source
/// has a language.
pub fn build_search_queries(source: &RepositorySummary, max_queries: usize) -> Vec<String> {
    let mut queries = Vec::new();
    let language = source.language.as_deref();

    let mut push = |term: String| {
        if let Some(lang) = language {
            queries.push(term.clone());
            queries.push(format!("language:{} {}", lang, term));
        } else {
            queries.push(term);
        }
    };

    if let Some(domain) = classify(&source.name, source.description.as_deref(), &source.topics) {
        debug!(domain = domain.key, "identified source domain");
        for keyword in domain.keywords {
            push(keyword.to_string());
        }
    }
    for topic in &source.topics {
        push(format!("topic:{}", topic));
    }
    if let Some(description) = &source.description {
        for keyword in extract_keywords(description) {
            push(keyword);
        }
    }

    if source.size > 0 {
        let language_filter = language
            .map(|lang| format!(" language:{}", lang))
            .unwrap_or_default();
        queries.push(format!("size:{}{}", size_range(source.size), language_filter));
    }

    queries.truncate(max_queries);
    queries
}

/// First three significant words of a description
pub fn extract_keywords(description: &str) -> Vec<String> {
    let cleaned: String = description
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    cleaned
        .split_whitespace()
        .filter(|word| word.chars().count() > 3 && !STOP_WORDS.contains(word))
        .take(3)
        .map(str::to_string)
        .collect()
}

/// GitHub `size:` qualifier bracket for a repository size in KB
pub fn size_range(size: u64) -> &'static str {
    match size {
        s if s < 1_000 => "<1000",
        s if s < 10_000 => "1000..10000",
        s if s < 100_000 => "10000..100000",
        _ => ">100000",
    }
}

/// Search for repositories similar to `source`
///
/// Queries run concurrently; a failing query is logged and skipped. The
/// source itself is excluded and duplicates keep their first occurrence.
pub async fn find_similar_repositories(
    data: &dyn RepositoryData,
    source: &RawRepo,
    options: SearchOptions,
) -> Vec<RawRepo> {
    let summary = RepositorySummary::from(source);
    let queries = build_search_queries(&summary, options.max_queries);
    let source_slug = source.slug();

    let results = join_all(queries.iter().map(|query| async move {
        match data.search_repositories(query).await {
            Ok(repos) => repos,
            Err(e) => {
                warn!(query = %query, error = %e, "search query failed");
                Vec::new()
            }
        }
    }))
    .await;

    let mut seen: HashSet<String> = HashSet::new();
    let candidates: Vec<RawRepo> = results
        .into_iter()
        .flatten()
        .filter(|repo| repo.slug() != source_slug)
        .filter(|repo| {
            let key = if repo.id != 0 {
                repo.id.to_string()
            } else {
                repo.slug()
            };
            seen.insert(key)
        })
        .take(options.limit)
        .collect();

    debug!(
        queries = queries.len(),
        candidates = candidates.len(),
        "similar repository search finished"
    );
    candidates
}

/// Discover candidates for `source` and return the best-ranked one
pub async fn find_comparison_target(
    data: &dyn RepositoryData,
    source: &RawRepo,
    options: SearchOptions,
) -> SignalResult<RawRepo> {
    let candidates = find_similar_repositories(data, source, options).await;
    let summaries: Vec<RepositorySummary> = candidates.iter().map(RepositorySummary::from).collect();

    let index = best_candidate_index(&RepositorySummary::from(source), &summaries)?;
    info!(
        source = %source.slug(),
        target = %candidates[index].slug(),
        pool = candidates.len(),
        "picked comparison target"
    );
    Ok(candidates[index].clone())
}
