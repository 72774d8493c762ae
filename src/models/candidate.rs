use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SelectError};

/// Name of the neighbor-count hyperparameter.
pub const N_NEIGHBORS: &str = "n_neighbors";

/// An immutable named hyperparameter value, e.g. `n_neighbors = 5`.
///
/// Smaller values are treated as the simpler model when breaking ties.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Candidate {
    pub name: String,
    pub value: usize,
}

impl Candidate {
    pub fn new(name: impl Into<String>, value: usize) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// A neighbor-count candidate.
    pub fn neighbors(k: usize) -> Self {
        Self::new(N_NEIGHBORS, k)
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

/// Neighbor counts `start, start + step, ...` strictly below `stop`.
pub fn neighbor_grid(start: usize, stop: usize, step: usize) -> Result<Vec<Candidate>> {
    if start == 0 {
        return Err(SelectError::InvalidInput(
            "Neighbor count must be at least 1".to_string(),
        ));
    }
    if step == 0 {
        return Err(SelectError::InvalidInput(
            "Grid step must be at least 1".to_string(),
        ));
    }

    Ok((start..stop).step_by(step).map(Candidate::neighbors).collect())
}
