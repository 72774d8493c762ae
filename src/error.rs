use thiserror::Error;

#[derive(Debug, Error)]
pub enum SelectError {
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("Classifier failure: {0}")]
    Classifier(#[from] ClassifierError),

    #[error("No viable candidate: all {attempted} candidates failed")]
    NoViableCandidate { attempted: usize },

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Unknown label '{label}'{}", suggestion_suffix(.suggestion))]
    UnknownLabel {
        label: String,
        suggestion: Option<String>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Error raised by a classifier during `fit` or `predict`.
///
/// Scoped to one candidate: during a search it is recorded on the candidate
/// instead of aborting the run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ClassifierError(pub String);

impl ClassifierError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

fn suggestion_suffix(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(s) => format!(" (did you mean '{}'?)", s),
        None => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, SelectError>;
