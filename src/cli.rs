use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::data::{parse_renames, LoadOptions};
use crate::error::Result;
use crate::selection::SearchConfig;

/// knn-select — Stratified cross-validation and grid search for KNN classifiers.
#[derive(Parser, Debug)]
#[command(name = "knn-select")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Grid-search the neighbor count with k-fold cross-validation, then
    /// evaluate the best value on a held-out test split.
    Search {
        #[command(flatten)]
        data: DataArgs,

        /// Number of cross-validation folds.
        #[arg(long, default_value = "10")]
        folds: usize,

        /// First neighbor count in the grid.
        #[arg(long, default_value = "1")]
        k_start: usize,

        /// Grid stops before this neighbor count.
        #[arg(long, default_value = "100")]
        k_stop: usize,

        /// Step between neighbor counts.
        #[arg(long, default_value = "5")]
        k_step: usize,

        /// Evaluate candidates in parallel.
        #[arg(long)]
        parallel: bool,

        /// Time budget per candidate, in seconds.
        #[arg(long)]
        timeout_secs: Option<u64>,

        /// Number of ranked candidates to display.
        #[arg(long, default_value = "10")]
        top: usize,

        /// Output CSV file for all candidate results.
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Output JSON file for the full search result.
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Fit one neighbor count on the training split and score it on the
    /// held-out test split.
    Evaluate {
        #[command(flatten)]
        data: DataArgs,

        /// Neighbor count.
        #[arg(short, long, default_value = "5")]
        k: usize,
    },
}

/// Dataset and split options shared by all commands.
#[derive(Args, Debug)]
pub struct DataArgs {
    /// Path to the CSV dataset.
    #[arg(short, long)]
    pub data: PathBuf,

    /// Column holding the class label.
    #[arg(long, default_value = "diagnosis")]
    pub label_column: String,

    /// Label treated as positive for precision and recall.
    #[arg(long, default_value = "Malignant")]
    pub positive_label: String,

    /// Feature columns (comma-separated). Defaults to every other column.
    #[arg(long)]
    pub features: Option<String>,

    /// Columns to ignore when no feature list is given (comma-separated).
    #[arg(long, default_value = "id")]
    pub drop: String,

    /// Label renames, e.g. "B=Benign,M=Malignant".
    #[arg(long)]
    pub rename: Option<String>,

    /// Random seed for the holdout split and fold assignment.
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Share of records held out for the final test.
    #[arg(long, default_value = "0.25")]
    pub test_fraction: f64,
}

impl DataArgs {
    pub fn load_options(&self) -> Result<LoadOptions> {
        Ok(LoadOptions {
            label_column: self.label_column.clone(),
            features: self.features.as_deref().map(split_list),
            drop: split_list(&self.drop),
            rename: match &self.rename {
                Some(spec) => parse_renames(spec)?,
                None => Default::default(),
            },
        })
    }

    pub fn search_config(
        &self,
        fold_count: usize,
        parallel: bool,
        timeout_secs: Option<u64>,
    ) -> SearchConfig {
        SearchConfig {
            fold_count,
            label_column: self.label_column.clone(),
            positive_label: self.positive_label.clone(),
            seed: self.seed,
            parallel,
            candidate_timeout: timeout_secs.map(Duration::from_secs),
        }
    }
}

fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_defaults() {
        let cli = Cli::try_parse_from(["knn-select", "search", "--data", "wdbc.csv"]).unwrap();
        match cli.command {
            Command::Search {
                data,
                folds,
                k_start,
                k_stop,
                k_step,
                ..
            } => {
                assert_eq!((folds, k_start, k_stop, k_step), (10, 1, 100, 5));
                let config = data.search_config(folds, false, None);
                assert_eq!(config.positive_label, "Malignant");
                assert_eq!(config.seed, 42);
                assert_eq!(data.load_options().unwrap().drop, vec!["id".to_string()]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_feature_and_rename_parsing() {
        let cli = Cli::try_parse_from([
            "knn-select",
            "-v",
            "evaluate",
            "--data",
            "wdbc.csv",
            "--features",
            "radius_mean, texture_mean",
            "--rename",
            "B=Benign,M=Malignant",
            "-k",
            "11",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Command::Evaluate { data, k } => {
                assert_eq!(k, 11);
                let opts = data.load_options().unwrap();
                assert_eq!(
                    opts.features,
                    Some(vec!["radius_mean".to_string(), "texture_mean".to_string()])
                );
                assert_eq!(opts.rename["M"], "Malignant");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
