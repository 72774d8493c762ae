use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strsim::jaro_winkler;

use crate::error::{Result, SelectError};

/// Minimum Jaro-Winkler similarity for a label to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.7;

/// A categorical column holding one label per record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelColumn {
    pub name: String,
    pub values: Vec<String>,
}

/// A read-only table of records with named numeric features and one or
/// more named label columns.
///
/// Every record has the same feature width, and every label column holds
/// exactly one value per record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    feature_names: Vec<String>,
    features: Vec<Vec<f64>>,
    label_columns: Vec<LabelColumn>,
}

impl Dataset {
    /// Build a dataset from feature rows, checking that every row matches
    /// the number of feature names.
    pub fn new(feature_names: Vec<String>, features: Vec<Vec<f64>>) -> Result<Self> {
        if let Some((row, values)) = features
            .iter()
            .enumerate()
            .find(|(_, values)| values.len() != feature_names.len())
        {
            return Err(SelectError::InvalidInput(format!(
                "Record {} has {} features, expected {}",
                row,
                values.len(),
                feature_names.len()
            )));
        }

        Ok(Self {
            feature_names,
            features,
            label_columns: Vec::new(),
        })
    }

    /// Attach a label column. A column with the same name is replaced.
    pub fn with_labels(mut self, name: impl Into<String>, values: Vec<String>) -> Result<Self> {
        let name = name.into();
        if values.len() != self.features.len() {
            return Err(SelectError::InvalidInput(format!(
                "Label column '{}' has {} values, expected {}",
                name,
                values.len(),
                self.features.len()
            )));
        }

        self.label_columns.retain(|c| c.name != name);
        self.label_columns.push(LabelColumn { name, values });
        Ok(self)
    }

    /// Number of records.
    #[inline]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn features(&self) -> &[Vec<f64>] {
        &self.features
    }

    pub fn label_column_names(&self) -> impl Iterator<Item = &str> {
        self.label_columns.iter().map(|c| c.name.as_str())
    }

    /// Labels of the named column, in record order.
    pub fn labels(&self, column: &str) -> Result<&[String]> {
        self.label_columns
            .iter()
            .find(|c| c.name == column)
            .map(|c| c.values.as_slice())
            .ok_or_else(|| SelectError::UnknownColumn(column.to_string()))
    }

    /// Record count per class of the named column, keyed in sorted order.
    pub fn class_counts(&self, column: &str) -> Result<BTreeMap<String, usize>> {
        let mut counts = BTreeMap::new();
        for label in self.labels(column)? {
            *counts.entry(label.clone()).or_insert(0) += 1;
        }
        Ok(counts)
    }

    /// Distinct classes of the named column, sorted.
    pub fn classes(&self, column: &str) -> Result<Vec<String>> {
        Ok(self.class_counts(column)?.into_keys().collect())
    }

    /// Record indices grouped by class, classes sorted, indices in record order.
    pub fn indices_by_class(&self, column: &str) -> Result<BTreeMap<&str, Vec<usize>>> {
        let mut groups: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
        for (i, label) in self.labels(column)?.iter().enumerate() {
            groups.entry(label.as_str()).or_default().push(i);
        }
        Ok(groups)
    }

    /// Check that `label` is a class of `column`, suggesting the closest
    /// existing class when it is not.
    pub fn require_class(&self, column: &str, label: &str) -> Result<()> {
        let classes = self.classes(column)?;
        if classes.iter().any(|c| c == label) {
            return Ok(());
        }

        let suggestion = classes
            .iter()
            .map(|c| (c, jaro_winkler(&c.to_lowercase(), &label.to_lowercase())))
            .filter(|(_, sim)| *sim >= SUGGESTION_THRESHOLD)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(c, _)| c.clone());

        Err(SelectError::UnknownLabel {
            label: label.to_string(),
            suggestion,
        })
    }

    /// Copy of the records at `indices`, in the given order.
    pub fn subset(&self, indices: &[usize]) -> Dataset {
        Dataset {
            feature_names: self.feature_names.clone(),
            features: indices.iter().map(|&i| self.features[i].clone()).collect(),
            label_columns: self
                .label_columns
                .iter()
                .map(|c| LabelColumn {
                    name: c.name.clone(),
                    values: indices.iter().map(|&i| c.values[i].clone()).collect(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::new(
            vec!["radius".to_string(), "texture".to_string()],
            vec![
                vec![12.0, 18.0],
                vec![20.0, 25.0],
                vec![11.5, 17.0],
                vec![19.0, 22.0],
                vec![13.0, 16.0],
            ],
        )
        .unwrap()
        .with_labels(
            "diagnosis",
            ["Benign", "Malignant", "Benign", "Malignant", "Benign"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_ragged_rows() {
        let result = Dataset::new(
            vec!["a".to_string(), "b".to_string()],
            vec![vec![1.0, 2.0], vec![3.0]],
        );
        assert!(matches!(result, Err(SelectError::InvalidInput(_))));
    }

    #[test]
    fn test_rejects_label_length_mismatch() {
        let ds = Dataset::new(vec!["a".to_string()], vec![vec![1.0], vec![2.0]]).unwrap();
        let result = ds.with_labels("y", vec!["x".to_string()]);
        assert!(matches!(result, Err(SelectError::InvalidInput(_))));
    }

    #[test]
    fn test_class_counts_sorted() {
        let counts = sample().class_counts("diagnosis").unwrap();
        let pairs: Vec<_> = counts.into_iter().collect();
        assert_eq!(
            pairs,
            vec![("Benign".to_string(), 3), ("Malignant".to_string(), 2)]
        );
    }

    #[test]
    fn test_unknown_column() {
        assert!(matches!(
            sample().labels("outcome"),
            Err(SelectError::UnknownColumn(_))
        ));
    }

    #[test]
    fn test_require_class_suggests_close_match() {
        let err = sample().require_class("diagnosis", "malignnt").unwrap_err();
        match err {
            SelectError::UnknownLabel { suggestion, .. } => {
                assert_eq!(suggestion.as_deref(), Some("Malignant"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(sample().require_class("diagnosis", "Benign").is_ok());
    }

    #[test]
    fn test_subset_keeps_labels_aligned() {
        let sub = sample().subset(&[3, 0]);
        assert_eq!(sub.len(), 2);
        assert_eq!(sub.features()[0], vec![19.0, 22.0]);
        assert_eq!(sub.labels("diagnosis").unwrap(), ["Malignant", "Benign"]);
    }
}
