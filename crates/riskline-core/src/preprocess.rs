//! Standardizing preprocessor.
//!
//! `fit` derives per-field centering and scaling parameters from a training
//! set once; the fitted state is persisted and reused verbatim at inference
//! time. Both `fit` and `transform` are pure.

use crate::error::{CoreError, CoreResult};
use crate::record::Record;
use crate::schema::FeatureSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Floor applied to fitted standard deviations. A zero-variance training
/// column would otherwise divide by zero at transform time; with the floor
/// it maps to exactly 0.0.
pub const STD_EPSILON: f64 = 1e-8;

/// Fitted centering and scaling parameters, one `(mean, std)` pair per
/// schema field, in schema order.
///
/// Persisted as a single JSON blob; `load` re-validates the state against
/// the schema, so a stale or foreign blob fails fast instead of silently
/// scaling with the wrong parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalerState {
    fields: Vec<String>,
    means: Vec<f64>,
    stds: Vec<f64>,
}

impl ScalerState {
    /// Fit per-field sample mean and sample standard deviation.
    pub fn fit(schema: &FeatureSchema, records: &[Record]) -> CoreResult<Self> {
        if records.is_empty() {
            return Err(CoreError::Dataset("cannot fit scaler on an empty training set".to_string()));
        }
        let width = schema.len();
        for record in records {
            if record.len() != width {
                return Err(CoreError::StateDimension { expected: width, found: record.len() });
            }
        }

        let n = records.len() as f64;
        let mut means = vec![0.0; width];
        for record in records {
            for (mean, value) in means.iter_mut().zip(record.values()) {
                *mean += value;
            }
        }
        for mean in &mut means {
            *mean /= n;
        }

        let mut stds = vec![0.0; width];
        if records.len() > 1 {
            for record in records {
                for (acc, (value, mean)) in
                    stds.iter_mut().zip(record.values().iter().zip(&means))
                {
                    let d = value - mean;
                    *acc += d * d;
                }
            }
            for acc in &mut stds {
                *acc = (*acc / (n - 1.0)).sqrt();
            }
        }
        for std in &mut stds {
            if *std < STD_EPSILON {
                *std = STD_EPSILON;
            }
        }

        Ok(Self {
            fields: schema.field_names().map(str::to_string).collect(),
            means,
            stds,
        })
    }

    /// Scale one record to `(value - mean) / std` in schema order.
    pub fn transform(&self, record: &Record) -> CoreResult<Vec<f64>> {
        if record.len() != self.fields.len() {
            return Err(CoreError::StateDimension {
                expected: self.fields.len(),
                found: record.len(),
            });
        }
        Ok(record
            .values()
            .iter()
            .zip(self.means.iter().zip(&self.stds))
            .map(|(v, (mean, std))| (v - mean) / std)
            .collect())
    }

    /// Scale a batch of records.
    pub fn transform_matrix(&self, records: &[Record]) -> CoreResult<Vec<Vec<f64>>> {
        records.iter().map(|r| self.transform(r)).collect()
    }

    /// Number of fields the state was fitted on.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    #[must_use]
    pub fn mean(&self, index: usize) -> f64 {
        self.means[index]
    }

    #[must_use]
    pub fn std(&self, index: usize) -> f64 {
        self.stds[index]
    }

    /// Persist the fitted state as a JSON blob.
    pub fn save(&self, path: &Path) -> CoreResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        tracing::debug!(path = %path.display(), fields = self.fields.len(), "scaler state saved");
        Ok(())
    }

    /// Load a persisted state and verify it matches `schema`.
    ///
    /// Dimensionality or field-name drift between the blob and the schema is
    /// fatal configuration breakage.
    pub fn load(path: &Path, schema: &FeatureSchema) -> CoreResult<Self> {
        let bytes = std::fs::read(path)?;
        let state: Self = serde_json::from_slice(&bytes)?;
        if state.fields.len() != schema.len()
            || state.means.len() != state.fields.len()
            || state.stds.len() != state.fields.len()
        {
            return Err(CoreError::StateDimension {
                expected: schema.len(),
                found: state.fields.len(),
            });
        }
        for (loaded, declared) in state.fields.iter().zip(schema.field_names()) {
            if loaded != declared {
                return Err(CoreError::Dataset(format!(
                    "scaler state field {loaded} does not match schema field {declared}"
                )));
            }
        }
        Ok(state)
    }
}
