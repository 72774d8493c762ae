use std::time::{Duration, Instant};

use crate::classifier::Classifier;
use crate::error::{Result, SelectError};
use crate::models::{Candidate, CandidateResult, Dataset, FoldResult};
use crate::selection::partition::FoldAssignment;
use crate::selection::scoring::score;

/// Cross-validate one candidate over every fold of `assignment`.
///
/// A fresh classifier is built per fold. Fit or predict failures mark the
/// candidate failed instead of returning an error; scoring errors are fatal.
pub fn cross_validate<C, F>(
    dataset: &Dataset,
    assignment: &FoldAssignment,
    candidate: &Candidate,
    positive_label: &str,
    classifier_factory: F,
) -> Result<CandidateResult>
where
    C: Classifier,
    F: Fn(&Candidate) -> C,
{
    cross_validate_with_timeout(
        dataset,
        assignment,
        candidate,
        positive_label,
        classifier_factory,
        None,
    )
}

/// Like [`cross_validate`], with a time budget for the whole candidate.
///
/// The budget is checked after each fold, the last one included; once
/// exceeded, the remaining folds are skipped and the candidate is marked
/// failed.
pub fn cross_validate_with_timeout<C, F>(
    dataset: &Dataset,
    assignment: &FoldAssignment,
    candidate: &Candidate,
    positive_label: &str,
    classifier_factory: F,
    timeout: Option<Duration>,
) -> Result<CandidateResult>
where
    C: Classifier,
    F: Fn(&Candidate) -> C,
{
    if assignment.len() != dataset.len() {
        return Err(SelectError::InvalidInput(format!(
            "Fold assignment covers {} records but dataset has {}",
            assignment.len(),
            dataset.len()
        )));
    }

    let labels = dataset.labels(assignment.label_column())?;
    let started = Instant::now();
    let mut folds = Vec::with_capacity(assignment.fold_count());

    for fold in 0..assignment.fold_count() {
        let train_idx = assignment.training_indices(fold);
        let valid_idx = assignment.validation_indices(fold);

        let train_x: Vec<Vec<f64>> = train_idx.iter().map(|&i| dataset.features()[i].clone()).collect();
        let train_y: Vec<String> = train_idx.iter().map(|&i| labels[i].clone()).collect();
        let valid_x: Vec<Vec<f64>> = valid_idx.iter().map(|&i| dataset.features()[i].clone()).collect();
        let valid_y: Vec<String> = valid_idx.iter().map(|&i| labels[i].clone()).collect();

        let mut classifier = classifier_factory(candidate);
        let predicted = match classifier
            .fit(&train_x, &train_y)
            .and_then(|_| classifier.predict(&valid_x))
        {
            Ok(p) => p,
            Err(e) => {
                let reason = format!("fold {}: {}", fold, e);
                tracing::warn!(%candidate, %reason, "candidate failed");
                return Ok(CandidateResult::from_folds(
                    candidate.clone(),
                    folds,
                    Some(reason),
                ));
            }
        };

        if predicted.len() != valid_y.len() {
            let reason = format!(
                "fold {}: classifier returned {} predictions for {} records",
                fold,
                predicted.len(),
                valid_y.len()
            );
            tracing::warn!(%candidate, %reason, "candidate failed");
            return Ok(CandidateResult::from_folds(
                candidate.clone(),
                folds,
                Some(reason),
            ));
        }

        let scores = score(&valid_y, &predicted, positive_label)?;
        tracing::debug!(%candidate, fold, accuracy = scores.accuracy, "fold scored");

        folds.push(FoldResult {
            fold,
            score: scores.accuracy,
            scores,
            train_size: train_idx.len(),
            validation_size: valid_idx.len(),
        });

        if let Some(limit) = timeout {
            let elapsed = started.elapsed();
            if elapsed > limit {
                let reason = format!(
                    "timed out after {:.2?} ({} of {} folds done)",
                    elapsed,
                    folds.len(),
                    assignment.fold_count()
                );
                tracing::warn!(%candidate, %reason, "candidate failed");
                return Ok(CandidateResult::from_folds(
                    candidate.clone(),
                    folds,
                    Some(reason),
                ));
            }
        }
    }

    Ok(CandidateResult::from_folds(candidate.clone(), folds, None))
}
