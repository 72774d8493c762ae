use std::time::Duration;

use rayon::prelude::*;

use crate::classifier::Classifier;
use crate::error::{Result, SelectError};
use crate::models::{Candidate, CandidateResult, Dataset, SearchResult};
use crate::selection::cross_validation::cross_validate_with_timeout;
use crate::selection::partition::partition;

/// Means closer than this count as tied.
pub const TIE_TOLERANCE: f64 = 1e-9;

/// Configuration for a grid search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub fold_count: usize,
    pub label_column: String,
    pub positive_label: String,
    pub seed: u64,
    /// Evaluate candidates on the rayon pool.
    pub parallel: bool,
    /// Per-candidate time budget. Set to None to disable.
    pub candidate_timeout: Option<Duration>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            fold_count: 10,
            label_column: "diagnosis".to_string(),
            positive_label: "Malignant".to_string(),
            seed: 42,
            parallel: false,
            candidate_timeout: None,
        }
    }
}

/// Cross-validate every candidate on one shared set of stratified folds and
/// rank them.
///
/// The best candidate has the highest mean accuracy; candidates within
/// [`TIE_TOLERANCE`] of it are resolved in favor of the smallest value.
pub fn search<C, F>(
    dataset: &Dataset,
    candidates: &[Candidate],
    config: &SearchConfig,
    classifier_factory: F,
) -> Result<SearchResult>
where
    C: Classifier,
    F: Fn(&Candidate) -> C + Sync,
{
    dataset.require_class(&config.label_column, &config.positive_label)?;
    let assignment = partition(dataset, config.fold_count, &config.label_column, config.seed)?;

    tracing::info!(
        candidates = candidates.len(),
        folds = config.fold_count,
        records = dataset.len(),
        parallel = config.parallel,
        "starting grid search"
    );

    let evaluate = |candidate: &Candidate| {
        cross_validate_with_timeout(
            dataset,
            &assignment,
            candidate,
            &config.positive_label,
            &classifier_factory,
            config.candidate_timeout,
        )
    };

    let mut results: Vec<CandidateResult> = if config.parallel {
        candidates.par_iter().map(evaluate).collect::<Result<_>>()?
    } else {
        candidates.iter().map(evaluate).collect::<Result<_>>()?
    };

    let best = rank(&mut results).ok_or(SelectError::NoViableCandidate {
        attempted: candidates.len(),
    })?;

    let failed = results.iter().filter(|r| !r.is_viable()).count();
    if failed > 0 {
        tracing::warn!(failed, "some candidates were excluded from ranking");
    }
    tracing::info!(best = %best, mean = results[0].mean, "grid search complete");

    Ok(SearchResult {
        label_column: config.label_column.clone(),
        positive_label: config.positive_label.clone(),
        fold_count: config.fold_count,
        seed: config.seed,
        results,
        best,
    })
}

/// Sort results into ranking order and move the best viable candidate to
/// the front. Returns None when no candidate is viable.
fn rank(results: &mut Vec<CandidateResult>) -> Option<Candidate> {
    results.sort_by(|a, b| a.cmp_rank(b));

    let top_mean = results.first().filter(|r| r.is_viable())?.mean;
    let best_idx = results
        .iter()
        .enumerate()
        .take_while(|(_, r)| r.is_viable() && top_mean - r.mean <= TIE_TOLERANCE)
        .min_by_key(|(_, r)| r.candidate.value)
        .map(|(i, _)| i)?;

    let best = results.remove(best_idx);
    let candidate = best.candidate.clone();
    results.insert(0, best);
    Some(candidate)
}
