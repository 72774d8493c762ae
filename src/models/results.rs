use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::models::candidate::Candidate;
use crate::selection::scoring::Scores;

/// Score of one candidate on one validation fold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoldResult {
    pub fold: usize,
    /// Accuracy on the validation fold; the value aggregated into the mean.
    pub score: f64,
    pub scores: Scores,
    pub train_size: usize,
    pub validation_size: usize,
}

/// Cross-validation outcome for one candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateResult {
    pub candidate: Candidate,
    pub folds: Vec<FoldResult>,
    pub mean: f64,
    pub std_error: f64,
    /// Why the candidate was dropped from ranking, if it was.
    pub failure: Option<String>,
}

impl CandidateResult {
    /// Aggregate fold results. Mean and standard error cover whichever
    /// folds completed.
    pub fn from_folds(candidate: Candidate, folds: Vec<FoldResult>, failure: Option<String>) -> Self {
        let scores: Vec<f64> = folds.iter().map(|f| f.score).collect();
        Self {
            candidate,
            mean: mean(&scores),
            std_error: standard_error(&scores),
            folds,
            failure,
        }
    }

    #[inline]
    pub fn is_viable(&self) -> bool {
        self.failure.is_none()
    }

    /// Ranking order: viable before failed, higher mean first, then the
    /// smaller hyperparameter value.
    pub fn cmp_rank(&self, other: &Self) -> Ordering {
        match (self.is_viable(), other.is_viable()) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            (true, true) => match other.mean.total_cmp(&self.mean) {
                Ordering::Equal => {}
                ord => return ord,
            },
            (false, false) => {}
        }
        self.candidate.value.cmp(&other.candidate.value)
    }
}

/// Ranked outcome of a grid search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub label_column: String,
    pub positive_label: String,
    pub fold_count: usize,
    pub seed: u64,
    /// Best candidate first, failed candidates last.
    pub results: Vec<CandidateResult>,
    pub best: Candidate,
}

impl SearchResult {
    /// Result entry of the best candidate, if present in `results`.
    pub fn best_result(&self) -> Option<&CandidateResult> {
        self.results.iter().find(|r| r.candidate == self.best)
    }

    pub fn viable(&self) -> impl Iterator<Item = &CandidateResult> {
        self.results.iter().filter(|r| r.is_viable())
    }

    pub fn failed(&self) -> impl Iterator<Item = &CandidateResult> {
        self.results.iter().filter(|r| !r.is_viable())
    }
}

/// Arithmetic mean; 0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation divided by `sqrt(n)`; 0 below two values.
pub fn standard_error(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (n - 1) as f64;
    variance.sqrt() / (n as f64).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_float_eq::*;

    fn result(k: usize, mean: f64, failure: Option<&str>) -> CandidateResult {
        CandidateResult {
            candidate: Candidate::neighbors(k),
            folds: vec![],
            mean,
            std_error: 0.0,
            failure: failure.map(str::to_string),
        }
    }

    #[test]
    fn test_standard_error() {
        // sample sd of [0.8, 0.9, 1.0] is 0.1
        let se = standard_error(&[0.8, 0.9, 1.0]);
        assert_float_absolute_eq!(se, 0.1 / 3f64.sqrt(), 1e-12);
        assert_eq!(standard_error(&[0.5]), 0.0);
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_best_result_looks_up_best_candidate() {
        let mut search = SearchResult {
            label_column: "diagnosis".to_string(),
            positive_label: "Malignant".to_string(),
            fold_count: 10,
            seed: 42,
            results: vec![result(1, 0.8, None), result(6, 0.9, None)],
            best: Candidate::neighbors(6),
        };
        assert_eq!(search.best_result().unwrap().candidate.value, 6);

        search.results.clear();
        assert!(search.best_result().is_none());
    }

    #[test]
    fn test_cmp_rank() {
        let better = result(5, 0.9, None);
        let worse = result(1, 0.8, None);
        let failed = result(3, 0.99, Some("boom"));

        assert_eq!(better.cmp_rank(&worse), Ordering::Less);
        assert_eq!(worse.cmp_rank(&failed), Ordering::Less);

        // equal means fall back to the smaller value
        let tied = result(9, 0.9, None);
        assert_eq!(better.cmp_rank(&tied), Ordering::Less);
    }
}
