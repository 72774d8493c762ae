use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::classifier::Classifier;
use crate::error::{Result, SelectError};
use crate::models::{Candidate, Dataset};
use crate::selection::scoring::{score, Scores};

/// Outcome of fitting one candidate on the training split and scoring it on
/// the held-out test split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldoutReport {
    pub candidate: Candidate,
    pub positive_label: String,
    pub train_size: usize,
    pub test_size: usize,
    pub scores: Scores,
}

/// Stratified train/test split.
///
/// The test split holds `ceil(len * test_fraction)` records. Each class gets
/// the floor of its proportional share, and the records left over go to the
/// classes with the largest fractional remainders. Every class keeps at
/// least one training record.
pub fn train_test_split(
    dataset: &Dataset,
    label_column: &str,
    test_fraction: f64,
    seed: u64,
) -> Result<(Dataset, Dataset)> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(SelectError::InvalidInput(format!(
            "Test fraction must be between 0 and 1, got {}",
            test_fraction
        )));
    }
    if dataset.is_empty() {
        return Err(SelectError::EmptyInput(
            "Cannot split an empty dataset".to_string(),
        ));
    }

    let groups = dataset.indices_by_class(label_column)?;
    let test_total = (dataset.len() as f64 * test_fraction).ceil() as usize;

    // (floor share, fractional remainder) per class, in sorted class order
    let shares: Vec<(usize, f64)> = groups
        .values()
        .map(|idx| {
            let exact = idx.len() as f64 * test_fraction;
            (exact.floor() as usize, exact - exact.floor())
        })
        .collect();
    let mut quotas: Vec<usize> = shares.iter().map(|s| s.0).collect();

    let mut by_remainder: Vec<usize> = (0..shares.len()).collect();
    by_remainder.sort_by(|&a, &b| shares[b].1.total_cmp(&shares[a].1).then(a.cmp(&b)));
    let leftover = test_total.saturating_sub(quotas.iter().sum());
    for &class in by_remainder.iter().cycle().take(leftover) {
        quotas[class] += 1;
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut test_idx = Vec::with_capacity(test_total);
    let mut train_idx = Vec::with_capacity(dataset.len() - test_total);

    for ((class, indices), quota) in groups.into_iter().zip(quotas) {
        if quota >= indices.len() {
            return Err(SelectError::InsufficientData(format!(
                "Class '{}' has {} records; a test fraction of {} leaves none for training",
                class,
                indices.len(),
                test_fraction
            )));
        }

        let mut shuffled = indices;
        shuffled.shuffle(&mut rng);
        test_idx.extend_from_slice(&shuffled[..quota]);
        train_idx.extend_from_slice(&shuffled[quota..]);
    }

    test_idx.sort_unstable();
    train_idx.sort_unstable();

    Ok((dataset.subset(&train_idx), dataset.subset(&test_idx)))
}

/// Fit `candidate` on `train` and score it on `test`.
///
/// There is only one candidate here, so a classifier failure is returned as
/// an error rather than recorded.
pub fn evaluate_holdout<C, F>(
    train: &Dataset,
    test: &Dataset,
    candidate: &Candidate,
    label_column: &str,
    positive_label: &str,
    classifier_factory: F,
) -> Result<HoldoutReport>
where
    C: Classifier,
    F: Fn(&Candidate) -> C,
{
    train.require_class(label_column, positive_label)?;
    let train_y = train.labels(label_column)?;
    let test_y = test.labels(label_column)?;

    let mut classifier = classifier_factory(candidate);
    classifier.fit(train.features(), train_y)?;
    let predicted = classifier.predict(test.features())?;

    let scores = score(test_y, &predicted, positive_label)?;
    tracing::info!(
        %candidate,
        accuracy = scores.accuracy,
        precision = scores.precision,
        recall = scores.recall,
        "holdout evaluation"
    );

    Ok(HoldoutReport {
        candidate: candidate.clone(),
        positive_label: positive_label.to_string(),
        train_size: train.len(),
        test_size: test.len(),
        scores,
    })
}
