use serde::{Deserialize, Serialize};

use crate::error::{Result, SelectError};

/// Binary confusion counts relative to one positive label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionCounts {
    pub true_positive: usize,
    pub false_positive: usize,
    pub false_negative: usize,
    pub true_negative: usize,
}

impl ConfusionCounts {
    /// Tally predictions against truth. Every label other than
    /// `positive_label` counts as negative.
    pub fn from_labels<S: AsRef<str>>(
        y_true: &[S],
        y_pred: &[S],
        positive_label: &str,
    ) -> Result<Self> {
        check_lengths(y_true, y_pred)?;

        let mut counts = Self::default();
        for (t, p) in y_true.iter().zip(y_pred) {
            let actual = t.as_ref() == positive_label;
            let predicted = p.as_ref() == positive_label;
            match (actual, predicted) {
                (true, true) => counts.true_positive += 1,
                (false, true) => counts.false_positive += 1,
                (true, false) => counts.false_negative += 1,
                (false, false) => counts.true_negative += 1,
            }
        }
        Ok(counts)
    }

    #[inline]
    pub fn total(&self) -> usize {
        self.true_positive + self.false_positive + self.false_negative + self.true_negative
    }

    #[inline]
    pub fn predicted_positive(&self) -> usize {
        self.true_positive + self.false_positive
    }

    #[inline]
    pub fn actual_positive(&self) -> usize {
        self.true_positive + self.false_negative
    }
}

/// Accuracy, precision and recall for one positive label.
///
/// Precision and recall are reported as 0 when their denominator is 0; the
/// `no_positive_predictions` / `no_positive_labels` flags tell that case
/// apart from a genuine 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub no_positive_predictions: bool,
    pub no_positive_labels: bool,
    pub counts: ConfusionCounts,
}

impl Scores {
    /// Scores computed from binary confusion counts alone.
    pub fn from_counts(counts: ConfusionCounts) -> Result<Self> {
        let correct = counts.true_positive + counts.true_negative;
        Self::with_matches(counts, correct)
    }

    fn with_matches(counts: ConfusionCounts, matches: usize) -> Result<Self> {
        let total = counts.total();
        if total == 0 {
            return Err(SelectError::EmptyInput(
                "Cannot score zero records".to_string(),
            ));
        }

        let (precision, no_positive_predictions) =
            ratio(counts.true_positive, counts.predicted_positive());
        let (recall, no_positive_labels) = ratio(counts.true_positive, counts.actual_positive());

        Ok(Self {
            accuracy: matches as f64 / total as f64,
            precision,
            recall,
            no_positive_predictions,
            no_positive_labels,
            counts,
        })
    }
}

/// Score predicted labels against true labels.
///
/// Accuracy counts exact label matches, so it stays correct for more than
/// two classes; precision and recall treat every other label as negative.
pub fn score<S: AsRef<str>>(y_true: &[S], y_pred: &[S], positive_label: &str) -> Result<Scores> {
    let counts = ConfusionCounts::from_labels(y_true, y_pred, positive_label)?;
    let matches = y_true
        .iter()
        .zip(y_pred)
        .filter(|(t, p)| t.as_ref() == p.as_ref())
        .count();
    Scores::with_matches(counts, matches)
}

fn check_lengths<S>(y_true: &[S], y_pred: &[S]) -> Result<()> {
    if y_true.len() != y_pred.len() {
        return Err(SelectError::InvalidInput(format!(
            "Label length mismatch: {} true vs {} predicted",
            y_true.len(),
            y_pred.len()
        )));
    }
    Ok(())
}

/// `num / den`, or `(0, true)` when the denominator is zero.
fn ratio(num: usize, den: usize) -> (f64, bool) {
    if den == 0 {
        (0.0, true)
    } else {
        (num as f64 / den as f64, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_float_eq::*;

    #[test]
    fn test_perfect_predictions() {
        let y = ["M", "B", "M", "B", "B"];
        let scores = score(&y, &y, "M").unwrap();
        assert_eq!(scores.accuracy, 1.0);
        assert_eq!(scores.precision, 1.0);
        assert_eq!(scores.recall, 1.0);
        assert!(!scores.no_positive_predictions);
        assert!(!scores.no_positive_labels);
    }

    #[test]
    fn test_no_positive_predictions_flagged() {
        let y_true = ["M", "B", "B"];
        let y_pred = ["B", "B", "B"];
        let scores = score(&y_true, &y_pred, "M").unwrap();
        assert_eq!(scores.precision, 0.0);
        assert!(scores.no_positive_predictions);
        assert_eq!(scores.recall, 0.0);
        assert!(!scores.no_positive_labels);
        assert_float_absolute_eq!(scores.accuracy, 2.0 / 3.0, 1e-12);
    }

    #[test]
    fn test_no_positive_labels_flagged() {
        let y_true = ["B", "B"];
        let y_pred = ["M", "B"];
        let scores = score(&y_true, &y_pred, "M").unwrap();
        assert!(scores.no_positive_labels);
        assert!(!scores.no_positive_predictions);
        assert_eq!(scores.precision, 0.0);
    }

    #[test]
    fn test_empty_input() {
        let empty: [&str; 0] = [];
        assert!(matches!(
            score(&empty, &empty, "M"),
            Err(SelectError::EmptyInput(_))
        ));
    }

    #[test]
    fn test_length_mismatch() {
        assert!(matches!(
            score(&["M", "B"], &["M"], "M"),
            Err(SelectError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_multiclass_accuracy_counts_exact_matches() {
        let y_true = ["a", "b", "c", "c"];
        let y_pred = ["a", "c", "b", "c"];
        let scores = score(&y_true, &y_pred, "a").unwrap();
        // b/c confusions are both "negative" but still wrong
        assert_eq!(scores.accuracy, 0.5);
        assert_eq!(scores.counts.true_negative, 3);
    }
}
