use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::models::SearchResult;
use crate::selection::holdout::HoldoutReport;

/// Write one row per candidate, in ranking order.
pub fn write_csv(result: &SearchResult, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "rank",
        "parameter",
        "value",
        "mean_accuracy",
        "std_error",
        "folds_completed",
        "best",
        "failure",
    ])?;

    for (i, entry) in result.results.iter().enumerate() {
        let rank = if entry.is_viable() {
            (i + 1).to_string()
        } else {
            String::new()
        };
        wtr.write_record([
            rank,
            entry.candidate.name.clone(),
            entry.candidate.value.to_string(),
            format!("{:.6}", entry.mean),
            format!("{:.6}", entry.std_error),
            entry.folds.len().to_string(),
            (entry.candidate == result.best).to_string(),
            entry.failure.clone().unwrap_or_default(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the full search result as pretty JSON.
pub fn write_json(result: &SearchResult, path: &Path) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(serde_json::to_string_pretty(result)?.as_bytes())?;
    Ok(())
}

/// Print the top-ranked candidates, then any failures.
pub fn print_ranking(result: &SearchResult, top: usize) {
    let viable = result.viable().count();
    println!(
        "\n=== Top {} of {} candidates ({}-fold CV, positive label '{}') ===\n",
        top.min(viable),
        result.results.len(),
        result.fold_count,
        result.positive_label
    );

    println!("{:>4}  {:<18} {:>8} {:>10}", "rank", "candidate", "mean", "std err");
    for (i, entry) in result.viable().take(top).enumerate() {
        let marker = if entry.candidate == result.best {
            "  ★ best"
        } else {
            ""
        };
        println!(
            "{:>4}  {:<18} {:>8.4} {:>10.4}{}",
            i + 1,
            entry.candidate.to_string(),
            entry.mean,
            entry.std_error,
            marker
        );
    }

    let failed: Vec<_> = result.failed().collect();
    if !failed.is_empty() {
        println!("\nFailed candidates ({}):", failed.len());
        for entry in failed {
            println!(
                "  {}: {}",
                entry.candidate,
                entry.failure.as_deref().unwrap_or("unknown")
            );
        }
    }
    println!();
}

/// Print the confusion counts and scores of a holdout evaluation.
pub fn print_holdout(report: &HoldoutReport) {
    let c = &report.scores.counts;

    println!(
        "=== Holdout evaluation: {} (train {}, test {}) ===\n",
        report.candidate, report.train_size, report.test_size
    );
    println!("{:>20} {:>10} {:>10}", "", "pred +", "pred -");
    println!("{:>20} {:>10} {:>10}", "actual +", c.true_positive, c.false_negative);
    println!("{:>20} {:>10} {:>10}", "actual -", c.false_positive, c.true_negative);
    println!();
    println!("Accuracy:  {:.4}", report.scores.accuracy);

    if report.scores.no_positive_predictions {
        println!(
            "Precision: {:.4} (no '{}' predictions)",
            report.scores.precision, report.positive_label
        );
    } else {
        println!("Precision: {:.4}", report.scores.precision);
    }

    if report.scores.no_positive_labels {
        println!(
            "Recall:    {:.4} (no '{}' records in test set)",
            report.scores.recall, report.positive_label
        );
    } else {
        println!("Recall:    {:.4}", report.scores.recall);
    }
    println!();
}
