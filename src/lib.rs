pub mod classifier;
pub mod cli;
pub mod data;
pub mod error;
pub mod models;
pub mod selection;

pub use classifier::{Classifier, KnnClassifier};
pub use error::{ClassifierError, Result, SelectError};
pub use models::{Candidate, CandidateResult, Dataset, FoldResult, SearchResult};
