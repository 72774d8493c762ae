pub mod knn;

pub use knn::{knn_factory, KnnClassifier};

use crate::error::ClassifierError;

/// Fit/predict capability consumed by cross-validation and holdout
/// evaluation. Implementations are built fresh per fold, so they never see
/// state from another fold.
pub trait Classifier {
    /// Train on `features` (one row per record) and their `labels`.
    fn fit(&mut self, features: &[Vec<f64>], labels: &[String]) -> Result<(), ClassifierError>;

    /// Predict one label per row of `features`.
    fn predict(&self, features: &[Vec<f64>]) -> Result<Vec<String>, ClassifierError>;
}

impl<C: Classifier + ?Sized> Classifier for Box<C> {
    fn fit(&mut self, features: &[Vec<f64>], labels: &[String]) -> Result<(), ClassifierError> {
        (**self).fit(features, labels)
    }

    fn predict(&self, features: &[Vec<f64>]) -> Result<Vec<String>, ClassifierError> {
        (**self).predict(features)
    }
}
