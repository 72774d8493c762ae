use assert_float_eq::*;

use knn_select_rs::selection::{score, ConfusionCounts, Scores};

#[test]
fn test_scores_from_confusion_counts() {
    let counts = ConfusionCounts {
        true_positive: 42,
        false_positive: 6,
        false_negative: 11,
        true_negative: 84,
    };
    let scores = Scores::from_counts(counts).unwrap();

    assert_eq!(counts.total(), 143);
    assert_float_absolute_eq!(scores.accuracy, 126.0 / 143.0, 1e-12);
    assert_float_absolute_eq!(scores.accuracy, 0.8811, 1e-4);
    assert_eq!(scores.precision, 0.875);
    assert_float_absolute_eq!(scores.recall, 42.0 / 53.0, 1e-12);
    assert_float_absolute_eq!(scores.recall, 0.7925, 1e-4);
}

#[test]
fn test_label_scoring_matches_count_scoring() {
    let mut y_true = Vec::new();
    let mut y_pred = Vec::new();
    let mut push = |t: &str, p: &str, n: usize| {
        for _ in 0..n {
            y_true.push(t.to_string());
            y_pred.push(p.to_string());
        }
    };
    push("Malignant", "Malignant", 42);
    push("Benign", "Malignant", 6);
    push("Malignant", "Benign", 11);
    push("Benign", "Benign", 84);

    let from_labels = score(&y_true, &y_pred, "Malignant").unwrap();
    let from_counts = Scores::from_counts(from_labels.counts).unwrap();

    assert_eq!(from_labels.counts.true_positive, 42);
    assert_eq!(from_labels.counts.false_negative, 11);
    assert_eq!(from_labels, from_counts);
}

#[test]
fn test_zero_count_scoring_is_an_error() {
    assert!(Scores::from_counts(ConfusionCounts::default()).is_err());
}
