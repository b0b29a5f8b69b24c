//! Labeled dataset loading and splitting.
//!
//! Training data arrives as a flat CSV table, one applicant per row, with a
//! binary default indicator column. The loader picks out the schema's
//! columns (the raw export carries more) and validates every row at the
//! boundary.

use crate::error::{CoreError, CoreResult};
use crate::preprocess::ScalerState;
use crate::record::Record;
use crate::schema::FeatureSchema;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Label column of the original credit card default export.
pub const DEFAULT_LABEL_COLUMN: &str = "default.payment.next.month";

/// Schema-validated records with their binary labels.
#[derive(Debug, Clone)]
pub struct LabeledDataset {
    pub records: Vec<Record>,
    pub labels: Vec<u8>,
}

impl LabeledDataset {
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Load a labeled dataset from a CSV file.
///
/// The header row must contain every schema field plus `label_column`;
/// columns outside the schema are ignored. Any row failing schema
/// validation, or carrying a non-binary label, rejects the whole load.
pub fn load_csv(
    path: &Path,
    schema: &FeatureSchema,
    label_column: &str,
) -> CoreResult<LabeledDataset> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();

    let label_idx = headers
        .iter()
        .position(|h| h == label_column)
        .ok_or_else(|| CoreError::Dataset(format!("label column not found: {label_column}")))?;

    let mut field_indices = Vec::with_capacity(schema.len());
    for name in schema.field_names() {
        let idx = headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| CoreError::Dataset(format!("schema column not found: {name}")))?;
        field_indices.push((name.to_string(), idx));
    }

    let mut records = Vec::new();
    let mut labels = Vec::new();
    for (row_num, row) in reader.records().enumerate() {
        let row = row?;
        let parse = |idx: usize, name: &str| -> CoreResult<f64> {
            row.get(idx)
                .and_then(|cell| cell.trim().parse::<f64>().ok())
                .ok_or_else(|| {
                    CoreError::Dataset(format!("row {}: cannot parse column {name}", row_num + 1))
                })
        };

        let mut pairs = Vec::with_capacity(schema.len());
        for (name, idx) in &field_indices {
            pairs.push((name.clone(), parse(*idx, name)?));
        }
        let record = Record::from_named_values(schema, &pairs).map_err(|e| {
            CoreError::Dataset(format!("row {}: {e}", row_num + 1))
        })?;

        let label = parse(label_idx, label_column)?;
        let label = match label {
            l if l == 0.0 => 0u8,
            l if l == 1.0 => 1u8,
            other => {
                return Err(CoreError::Dataset(format!(
                    "row {}: label must be 0 or 1, got {other}",
                    row_num + 1
                )))
            }
        };

        records.push(record);
        labels.push(label);
    }

    tracing::info!(rows = records.len(), path = %path.display(), "dataset loaded");
    Ok(LabeledDataset { records, labels })
}

/// Load unlabeled applicant records from a CSV file (batch scoring input).
///
/// Same column handling as [`load_csv`], minus the label.
pub fn load_records_csv(path: &Path, schema: &FeatureSchema) -> CoreResult<Vec<Record>> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();

    let mut field_indices = Vec::with_capacity(schema.len());
    for name in schema.field_names() {
        let idx = headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| CoreError::Dataset(format!("schema column not found: {name}")))?;
        field_indices.push((name.to_string(), idx));
    }

    let mut records = Vec::new();
    for (row_num, row) in reader.records().enumerate() {
        let row = row?;
        let mut pairs = Vec::with_capacity(schema.len());
        for (name, idx) in &field_indices {
            let value = row
                .get(*idx)
                .and_then(|cell| cell.trim().parse::<f64>().ok())
                .ok_or_else(|| {
                    CoreError::Dataset(format!("row {}: cannot parse column {name}", row_num + 1))
                })?;
            pairs.push((name.clone(), value));
        }
        let record = Record::from_named_values(schema, &pairs)
            .map_err(|e| CoreError::Dataset(format!("row {}: {e}", row_num + 1)))?;
        records.push(record);
    }

    Ok(records)
}

/// Split a dataset into train and test partitions, stratified by label.
///
/// Each label class contributes `test_fraction` of its rows to the test
/// partition, so the class balance survives the split. Deterministic for a
/// given seed.
pub fn stratified_split(
    dataset: &LabeledDataset,
    test_fraction: f64,
    seed: u64,
) -> CoreResult<(LabeledDataset, LabeledDataset)> {
    if dataset.is_empty() {
        return Err(CoreError::Dataset("cannot split an empty dataset".to_string()));
    }
    if !(0.0..1.0).contains(&test_fraction) {
        return Err(CoreError::Dataset(format!(
            "test fraction must be in [0, 1), got {test_fraction}"
        )));
    }

    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let mut train = LabeledDataset { records: Vec::new(), labels: Vec::new() };
    let mut test = LabeledDataset { records: Vec::new(), labels: Vec::new() };

    for class in [0u8, 1u8] {
        let mut indices: Vec<usize> = dataset
            .labels
            .iter()
            .enumerate()
            .filter(|(_, l)| **l == class)
            .map(|(i, _)| i)
            .collect();
        indices.shuffle(&mut rng);

        let n_test = (indices.len() as f64 * test_fraction).round() as usize;
        for (pos, idx) in indices.into_iter().enumerate() {
            let target = if pos < n_test { &mut test } else { &mut train };
            target.records.push(dataset.records[idx].clone());
            target.labels.push(dataset.labels[idx]);
        }
    }

    Ok((train, test))
}

/// Preprocessed train/test matrices ready for training.
///
/// Persisted as JSON so every trainer invocation consumes exactly the
/// matrices the preprocessing step produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitDataset {
    pub x_train: Vec<Vec<f64>>,
    pub y_train: Vec<u8>,
    pub x_test: Vec<Vec<f64>>,
    pub y_test: Vec<u8>,
}

impl SplitDataset {
    /// Scale both partitions with a scaler fitted on the training records.
    pub fn from_partitions(
        scaler: &ScalerState,
        train: &LabeledDataset,
        test: &LabeledDataset,
    ) -> CoreResult<Self> {
        Ok(Self {
            x_train: scaler.transform_matrix(&train.records)?,
            y_train: train.labels.clone(),
            x_test: scaler.transform_matrix(&test.records)?,
            y_test: test.labels.clone(),
        })
    }

    pub fn save(&self, path: &Path) -> CoreResult<()> {
        let json = serde_json::to_string(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load(path: &Path) -> CoreResult<Self> {
        let bytes = std::fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
