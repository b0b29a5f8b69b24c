//! Schema-validated applicant records.

use crate::schema::{FeatureSchema, SchemaMismatch};

/// One applicant record, validated against a [`FeatureSchema`] at
/// construction and immutable afterwards.
///
/// Values are stored in schema order, so downstream code can treat a record
/// as a plain feature vector.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    values: Vec<f64>,
}

impl Record {
    /// Build a record from `(field name, value)` pairs.
    ///
    /// The pairs must cover exactly the schema's fields: a missing field,
    /// an unknown field, a duplicate, or an out-of-domain value rejects the
    /// whole record.
    pub fn from_named_values(
        schema: &FeatureSchema,
        values: &[(String, f64)],
    ) -> Result<Self, SchemaMismatch> {
        for (i, (name, _)) in values.iter().enumerate() {
            if schema.index_of(name).is_none() {
                return Err(SchemaMismatch::UnexpectedField(name.clone()));
            }
            if values[..i].iter().any(|(n, _)| n == name) {
                return Err(SchemaMismatch::DuplicateField(name.clone()));
            }
        }

        let mut ordered = Vec::with_capacity(schema.len());
        for field in schema.fields() {
            let value = values
                .iter()
                .find(|(n, _)| *n == field.name)
                .map(|(_, v)| *v)
                .ok_or_else(|| SchemaMismatch::MissingField(field.name.clone()))?;
            if !field.domain.contains(value) {
                return Err(SchemaMismatch::OutOfDomain { field: field.name.clone(), value });
            }
            ordered.push(value);
        }

        Ok(Self { values: ordered })
    }

    /// Feature values in schema order.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
