pub mod cross_validation;
pub mod holdout;
pub mod output;
pub mod partition;
pub mod scoring;
pub mod search;

pub use cross_validation::{cross_validate, cross_validate_with_timeout};
pub use holdout::{evaluate_holdout, train_test_split, HoldoutReport};
pub use output::{print_holdout, print_ranking, write_csv, write_json};
pub use partition::{partition, FoldAssignment};
pub use scoring::{score, ConfusionCounts, Scores};
pub use search::{search, SearchConfig, TIE_TOLERANCE};
