pub mod candidate;
pub mod dataset;
pub mod results;

pub use candidate::{neighbor_grid, Candidate, N_NEIGHBORS};
pub use dataset::{Dataset, LabelColumn};
pub use results::{CandidateResult, FoldResult, SearchResult};
