use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{Result, SelectError};
use crate::models::Dataset;

/// How to turn a CSV table into a [`Dataset`].
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Column holding the class label.
    pub label_column: String,
    /// Feature columns to keep. None keeps every other column.
    pub features: Option<Vec<String>>,
    /// Columns to ignore when `features` is None (e.g. record ids).
    pub drop: Vec<String>,
    /// Raw label value -> label used in the dataset.
    pub rename: BTreeMap<String, String>,
}

/// Load a dataset from a CSV file with a header row.
pub fn load_csv<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Result<Dataset> {
    let file = File::open(path)?;
    read_csv(file, options)
}

/// Read a dataset from CSV data with a header row.
///
/// Columns with an empty header are skipped unless named in
/// `options.features`.
pub fn read_csv<R: Read>(reader: R, options: &LoadOptions) -> Result<Dataset> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let position = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| SelectError::UnknownColumn(name.to_string()))
    };

    let label_pos = position(options.label_column.as_str())?;
    let feature_pos: Vec<usize> = match &options.features {
        Some(names) => names.iter().map(|n| position(n.as_str())).collect::<Result<_>>()?,
        None => headers
            .iter()
            .enumerate()
            .filter(|(i, h)| *i != label_pos && !h.is_empty() && !options.drop.contains(*h))
            .map(|(i, _)| i)
            .collect(),
    };

    if feature_pos.is_empty() {
        return Err(SelectError::InvalidInput(
            "No feature columns selected".to_string(),
        ));
    }

    let mut features = Vec::new();
    let mut labels = Vec::new();

    for (row, record) in rdr.records().enumerate() {
        let record = record?;
        // header is line 1
        let line = row + 2;

        let values = feature_pos
            .iter()
            .map(|&col| {
                let cell = record.get(col).unwrap_or("");
                match cell.parse::<f64>() {
                    Ok(v) if v.is_finite() => Ok(v),
                    _ => Err(SelectError::InvalidInput(format!(
                        "Line {}: column '{}' is not a finite number: '{}'",
                        line, headers[col], cell
                    ))),
                }
            })
            .collect::<Result<Vec<f64>>>()?;

        let raw = record.get(label_pos).unwrap_or("");
        if raw.is_empty() {
            return Err(SelectError::InvalidInput(format!(
                "Line {}: missing label in column '{}'",
                line, options.label_column
            )));
        }
        let label = options
            .rename
            .get(raw)
            .cloned()
            .unwrap_or_else(|| raw.to_string());

        features.push(values);
        labels.push(label);
    }

    if features.is_empty() {
        return Err(SelectError::EmptyInput("CSV has no data rows".to_string()));
    }

    let names = feature_pos.iter().map(|&i| headers[i].clone()).collect();
    Dataset::new(names, features)?.with_labels(options.label_column.clone(), labels)
}

/// Parse `B=Benign,M=Malignant` into a rename map.
pub fn parse_renames(spec: &str) -> Result<BTreeMap<String, String>> {
    spec.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| match part.split_once('=') {
            Some((from, to)) if !from.trim().is_empty() && !to.trim().is_empty() => {
                Ok((from.trim().to_string(), to.trim().to_string()))
            }
            _ => Err(SelectError::InvalidInput(format!(
                "Invalid rename '{}', expected FROM=TO",
                part
            ))),
        })
        .collect()
}
