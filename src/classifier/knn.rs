use std::collections::HashMap;

use crate::classifier::Classifier;
use crate::error::ClassifierError;
use crate::models::Candidate;

/// Brute-force k-nearest-neighbors classifier.
///
/// Fitting stores the training set. Prediction ranks every training record
/// by Euclidean distance and takes a majority vote over the `k` nearest;
/// a tied vote goes to the tied label whose neighbor is closest.
#[derive(Debug, Clone)]
pub struct KnnClassifier {
    k: usize,
    features: Vec<Vec<f64>>,
    labels: Vec<String>,
}

impl KnnClassifier {
    pub fn new(k: usize) -> Self {
        Self {
            k,
            features: Vec::new(),
            labels: Vec::new(),
        }
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn is_fitted(&self) -> bool {
        !self.labels.is_empty()
    }

    fn predict_one(&self, row: &[f64]) -> Result<String, ClassifierError> {
        let mut neighbors: Vec<(f64, usize)> = Vec::with_capacity(self.features.len());
        for (i, train) in self.features.iter().enumerate() {
            let dist = squared_distance(row, train);
            if dist.is_nan() {
                return Err(ClassifierError::new(format!(
                    "Distance to training record {} is NaN",
                    i
                )));
            }
            neighbors.push((dist, i));
        }

        // Stable sort keeps training order among equidistant records
        neighbors.sort_by(|a, b| a.0.total_cmp(&b.0));

        // label -> (votes, rank of its nearest neighbor)
        let mut votes: HashMap<&str, (usize, usize)> = HashMap::new();
        for (rank, &(_, i)) in neighbors.iter().take(self.k).enumerate() {
            let entry = votes.entry(self.labels[i].as_str()).or_insert((0, rank));
            entry.0 += 1;
        }

        votes
            .into_iter()
            .max_by(|(_, (votes_a, rank_a)), (_, (votes_b, rank_b))| {
                votes_a.cmp(votes_b).then(rank_b.cmp(rank_a))
            })
            .map(|(label, _)| label.to_string())
            .ok_or_else(|| ClassifierError::new("No neighbors to vote"))
    }
}

impl Classifier for KnnClassifier {
    fn fit(&mut self, features: &[Vec<f64>], labels: &[String]) -> Result<(), ClassifierError> {
        if self.k == 0 {
            return Err(ClassifierError::new("k must be at least 1"));
        }
        if features.is_empty() {
            return Err(ClassifierError::new("Cannot fit with zero samples"));
        }
        if features.len() != labels.len() {
            return Err(ClassifierError::new(format!(
                "{} feature rows but {} labels",
                features.len(),
                labels.len()
            )));
        }
        if self.k > features.len() {
            return Err(ClassifierError::new(format!(
                "k={} exceeds the {} training samples",
                self.k,
                features.len()
            )));
        }

        self.features = features.to_vec();
        self.labels = labels.to_vec();
        Ok(())
    }

    fn predict(&self, features: &[Vec<f64>]) -> Result<Vec<String>, ClassifierError> {
        if !self.is_fitted() {
            return Err(ClassifierError::new("Model not fitted"));
        }

        let width = self.features[0].len();
        features
            .iter()
            .map(|row| {
                if row.len() != width {
                    return Err(ClassifierError::new(format!(
                        "Feature dimension mismatch: got {}, expected {}",
                        row.len(),
                        width
                    )));
                }
                self.predict_one(row)
            })
            .collect()
    }
}

/// Classifier factory for neighbor-count candidates.
pub fn knn_factory(candidate: &Candidate) -> KnnClassifier {
    KnnClassifier::new(candidate.value)
}

#[inline]
fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}
