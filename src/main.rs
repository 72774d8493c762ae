use clap::Parser;
use tracing_subscriber::EnvFilter;

use knn_select_rs::classifier::knn_factory;
use knn_select_rs::cli::{Cli, Command, DataArgs};
use knn_select_rs::data::load_csv;
use knn_select_rs::error::Result;
use knn_select_rs::models::{neighbor_grid, Candidate, Dataset};
use knn_select_rs::selection::{
    evaluate_holdout, print_holdout, print_ranking, search, train_test_split, write_csv,
    write_json,
};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Search {
            data,
            folds,
            k_start,
            k_stop,
            k_step,
            parallel,
            timeout_secs,
            top,
            csv,
            json,
        } => {
            let (train, test) = load_and_split(&data)?;
            let candidates = neighbor_grid(k_start, k_stop, k_step)?;
            let config = data.search_config(folds, parallel, timeout_secs);

            println!(
                "Searching {} candidates with {}-fold cross-validation...",
                candidates.len(),
                folds
            );
            let result = search(&train, &candidates, &config, knn_factory)?;
            print_ranking(&result, top);

            let report = evaluate_holdout(
                &train,
                &test,
                &result.best,
                &data.label_column,
                &data.positive_label,
                knn_factory,
            )?;
            print_holdout(&report);

            if let Some(path) = csv {
                write_csv(&result, &path)?;
                println!("Wrote all results to {:?}", path);
            }
            if let Some(path) = json {
                write_json(&result, &path)?;
                println!("Wrote search result to {:?}", path);
            }
            Ok(())
        }
        Command::Evaluate { data, k } => {
            let (train, test) = load_and_split(&data)?;
            let report = evaluate_holdout(
                &train,
                &test,
                &Candidate::neighbors(k),
                &data.label_column,
                &data.positive_label,
                knn_factory,
            )?;
            print_holdout(&report);
            Ok(())
        }
    }
}

/// Load the dataset, print its class balance and split off the test set.
fn load_and_split(args: &DataArgs) -> Result<(Dataset, Dataset)> {
    let dataset = load_csv(&args.data, &args.load_options()?)?;
    dataset.require_class(&args.label_column, &args.positive_label)?;

    println!(
        "Loaded {} records with {} features from {:?}",
        dataset.len(),
        dataset.feature_names().len(),
        args.data
    );
    for (class, count) in dataset.class_counts(&args.label_column)? {
        println!(
            "  {}: {} ({:.1}%)",
            class,
            count,
            count as f64 / dataset.len() as f64 * 100.0
        );
    }

    let (train, test) = train_test_split(&dataset, &args.label_column, args.test_fraction, args.seed)?;
    println!("Train: {} records, test: {} records\n", train.len(), test.len());
    Ok((train, test))
}
