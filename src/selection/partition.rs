use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SelectError};
use crate::models::Dataset;

/// Fold id of every record, stratified on one label column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoldAssignment {
    label_column: String,
    fold_count: usize,
    folds: Vec<usize>,
}

impl FoldAssignment {
    pub fn fold_count(&self) -> usize {
        self.fold_count
    }

    /// Label column the folds were stratified on.
    pub fn label_column(&self) -> &str {
        &self.label_column
    }

    /// Number of records covered.
    pub fn len(&self) -> usize {
        self.folds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folds.is_empty()
    }

    /// Fold id of record `index`.
    pub fn fold_of(&self, index: usize) -> usize {
        self.folds[index]
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.folds
    }

    /// Records held out in `fold`, in record order.
    pub fn validation_indices(&self, fold: usize) -> Vec<usize> {
        self.indices_where(|f| f == fold)
    }

    /// Records used for training when `fold` is held out, in record order.
    pub fn training_indices(&self, fold: usize) -> Vec<usize> {
        self.indices_where(|f| f != fold)
    }

    /// Number of records in each fold.
    pub fn fold_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.fold_count];
        for &f in &self.folds {
            sizes[f] += 1;
        }
        sizes
    }

    fn indices_where(&self, pred: impl Fn(usize) -> bool) -> Vec<usize> {
        self.folds
            .iter()
            .enumerate()
            .filter(|&(_, &f)| pred(f))
            .map(|(i, _)| i)
            .collect()
    }
}

/// Split `dataset` into `fold_count` class-stratified folds.
///
/// Each class is shuffled with a generator seeded from `seed`, then dealt
/// round-robin across the folds. The deal for a class continues from the fold
/// where the previous class stopped, so fold sizes also stay within one of
/// each other. Classes are visited in sorted order.
pub fn partition(
    dataset: &Dataset,
    fold_count: usize,
    label_column: &str,
    seed: u64,
) -> Result<FoldAssignment> {
    if fold_count < 2 {
        return Err(SelectError::InsufficientData(format!(
            "At least 2 folds are required, got {}",
            fold_count
        )));
    }

    let groups = dataset.indices_by_class(label_column)?;
    if groups.is_empty() {
        return Err(SelectError::InsufficientData(
            "Cannot partition an empty dataset".to_string(),
        ));
    }

    if let Some((class, indices)) = groups.iter().find(|(_, idx)| idx.len() < fold_count) {
        return Err(SelectError::InsufficientData(format!(
            "{} folds requested but class '{}' of column '{}' has only {} records",
            fold_count,
            class,
            label_column,
            indices.len()
        )));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut folds = vec![0; dataset.len()];
    let mut next_fold = 0;

    for indices in groups.into_values() {
        let mut shuffled = indices;
        shuffled.shuffle(&mut rng);

        for record in shuffled {
            folds[record] = next_fold;
            next_fold = (next_fold + 1) % fold_count;
        }
    }

    Ok(FoldAssignment {
        label_column: label_column.to_string(),
        fold_count,
        folds,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(benign: usize, malignant: usize) -> Dataset {
        let n = benign + malignant;
        let features = (0..n).map(|i| vec![i as f64]).collect();
        let labels = (0..n)
            .map(|i| if i < benign { "Benign" } else { "Malignant" }.to_string())
            .collect();
        Dataset::new(vec!["x".to_string()], features)
            .unwrap()
            .with_labels("diagnosis", labels)
            .unwrap()
    }

    #[test]
    fn test_rejects_single_fold() {
        let ds = dataset(10, 10);
        assert!(matches!(
            partition(&ds, 1, "diagnosis", 0),
            Err(SelectError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_rejects_folds_exceeding_smallest_class() {
        let ds = dataset(20, 4);
        assert!(partition(&ds, 4, "diagnosis", 0).is_ok());
        assert!(matches!(
            partition(&ds, 5, "diagnosis", 0),
            Err(SelectError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_unknown_label_column() {
        let ds = dataset(5, 5);
        assert!(matches!(
            partition(&ds, 2, "outcome", 0),
            Err(SelectError::UnknownColumn(_))
        ));
    }

    #[test]
    fn test_fold_sizes_balanced() {
        let ds = dataset(17, 9);
        let assignment = partition(&ds, 5, "diagnosis", 3).unwrap();
        let sizes = assignment.fold_sizes();
        assert_eq!(sizes.iter().sum::<usize>(), 26);
        let min = *sizes.iter().min().unwrap();
        let max = *sizes.iter().max().unwrap();
        assert!(max - min <= 1, "sizes {:?}", sizes);
    }

    #[test]
    fn test_training_and_validation_are_complementary() {
        let ds = dataset(12, 8);
        let assignment = partition(&ds, 4, "diagnosis", 9).unwrap();
        for fold in 0..4 {
            let train = assignment.training_indices(fold);
            let valid = assignment.validation_indices(fold);
            assert_eq!(train.len() + valid.len(), 20);
            assert!(valid.iter().all(|i| !train.contains(i)));
        }
    }

    #[test]
    fn test_different_seeds_shuffle_differently() {
        let ds = dataset(50, 50);
        let a = partition(&ds, 5, "diagnosis", 1).unwrap();
        let b = partition(&ds, 5, "diagnosis", 2).unwrap();
        assert_ne!(a, b);
    }
}
