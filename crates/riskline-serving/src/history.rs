//! Caller-owned prediction history.
//!
//! An explicit append-only log handed to whatever layer renders or exports
//! it; the serving core itself never keeps session state.

use crate::error::ServingResult;
use crate::result::PredictionResult;
use chrono::{DateTime, Utc};
use riskline_core::FeatureSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionEntry {
    pub submitted_at: DateTime<Utc>,
    pub inputs: Vec<(String, f64)>,
    pub result: PredictionResult,
}

/// Append-only list of predictions in submission order.
#[derive(Debug, Clone, Default)]
pub struct PredictionLog {
    entries: Vec<PredictionEntry>,
}

impl PredictionLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one successful prediction.
    pub fn record(&mut self, inputs: &[(String, f64)], result: PredictionResult) {
        self.entries.push(PredictionEntry {
            submitted_at: Utc::now(),
            inputs: inputs.to_vec(),
            result,
        });
    }

    #[must_use]
    pub fn entries(&self) -> &[PredictionEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the log as CSV: one column per schema field, then outcome
    /// columns. Rows keep submission order.
    pub fn to_csv(&self, schema: &FeatureSchema) -> ServingResult<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());

        let mut header: Vec<String> = schema.field_names().map(str::to_string).collect();
        header.extend(
            ["prediction", "probability", "risk_tier", "submitted_at"].map(str::to_string),
        );
        writer.write_record(&header)?;

        for entry in &self.entries {
            let mut row = Vec::with_capacity(header.len());
            for name in schema.field_names() {
                let value = entry
                    .inputs
                    .iter()
                    .find(|(n, _)| n == name)
                    .map_or(String::new(), |(_, v)| v.to_string());
                row.push(value);
            }
            row.push(entry.result.label.to_string());
            row.push(entry.result.probability.to_string());
            row.push(entry.result.tier.to_string());
            row.push(entry.submitted_at.to_rfc3339());
            writer.write_record(&row)?;
        }

        let bytes = writer.into_inner().map_err(|e| e.into_error())?;
        Ok(String::from_utf8(bytes).unwrap_or_default())
    }

    pub fn export_csv(&self, schema: &FeatureSchema, path: &Path) -> ServingResult<()> {
        std::fs::write(path, self.to_csv(schema)?)?;
        Ok(())
    }

    /// Append this log's rows to an existing CSV export, writing the header
    /// only when the file does not exist yet.
    pub fn append_csv(&self, schema: &FeatureSchema, path: &Path) -> ServingResult<()> {
        let rendered = self.to_csv(schema)?;
        if path.exists() {
            let rows = rendered.splitn(2, '\n').nth(1).unwrap_or_default();
            let mut file = std::fs::OpenOptions::new().append(true).open(path)?;
            std::io::Write::write_all(&mut file, rows.as_bytes())?;
        } else {
            std::fs::write(path, rendered)?;
        }
        Ok(())
    }
}
