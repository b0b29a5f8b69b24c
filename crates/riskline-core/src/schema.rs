//! Feature schema: the fixed, ordered list of input fields.
//!
//! The order declared here is the order used everywhere: preprocessing,
//! training, and inference all index feature vectors by schema position.

use thiserror::Error;

/// Declared numeric domain of a single field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldDomain {
    /// Any finite value.
    Continuous,
    /// Finite and >= 0 (amounts).
    NonNegative,
    /// Integer within an inclusive range.
    IntRange { min: i64, max: i64 },
    /// One of a fixed set of integer codes.
    Codes(Vec<i64>),
}

impl FieldDomain {
    /// Whether `value` falls inside this domain.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        match self {
            FieldDomain::Continuous => true,
            FieldDomain::NonNegative => value >= 0.0,
            FieldDomain::IntRange { min, max } => {
                value.fract() == 0.0 && value >= *min as f64 && value <= *max as f64
            }
            FieldDomain::Codes(codes) => {
                value.fract() == 0.0 && codes.iter().any(|c| *c as f64 == value)
            }
        }
    }
}

/// A named field with its declared domain.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    pub domain: FieldDomain,
}

impl FieldSpec {
    #[must_use]
    pub fn new(name: impl Into<String>, domain: FieldDomain) -> Self {
        Self { name: name.into(), domain }
    }
}

/// A record failed validation against the feature schema.
///
/// Raised at the record boundary only; code past the boundary can rely on
/// records being complete and in schema order.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaMismatch {
    #[error("missing field: {0}")]
    MissingField(String),

    #[error("unexpected field: {0}")]
    UnexpectedField(String),

    #[error("duplicate field: {0}")]
    DuplicateField(String),

    #[error("field {field}: value {value} is outside its declared domain")]
    OutOfDomain { field: String, value: f64 },
}

/// Ordered sequence of field specs shared by preprocessing, training, and
/// inference.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSchema {
    fields: Vec<FieldSpec>,
}

impl FeatureSchema {
    /// Build a schema from an ordered field list.
    ///
    /// Field names must be unique; duplicates would make name-based record
    /// construction ambiguous.
    #[must_use]
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        debug_assert!(
            fields
                .iter()
                .enumerate()
                .all(|(i, f)| fields[..i].iter().all(|g| g.name != f.name)),
            "schema field names must be unique"
        );
        Self { fields }
    }

    /// The 18-field credit-default applicant schema.
    ///
    /// Field selection and codes follow the credit card default dataset:
    /// credit limit, sociodemographics, six months of repayment status,
    /// the last statement amount, and six months of payment amounts.
    #[must_use]
    pub fn credit_default() -> Self {
        let mut fields = vec![
            FieldSpec::new("LIMIT_BAL", FieldDomain::NonNegative),
            FieldSpec::new("SEX", FieldDomain::Codes(vec![1, 2])),
            FieldSpec::new("EDUCATION", FieldDomain::Codes(vec![1, 2, 3])),
            FieldSpec::new("MARRIAGE", FieldDomain::Codes(vec![1, 2, 3])),
            FieldSpec::new("AGE", FieldDomain::IntRange { min: 18, max: 100 }),
        ];
        for pay in ["PAY_0", "PAY_2", "PAY_3", "PAY_4", "PAY_5", "PAY_6"] {
            fields.push(FieldSpec::new(pay, FieldDomain::IntRange { min: -1, max: 8 }));
        }
        fields.push(FieldSpec::new("BILL_AMT6", FieldDomain::NonNegative));
        for amt in ["PAY_AMT1", "PAY_AMT2", "PAY_AMT3", "PAY_AMT4", "PAY_AMT5", "PAY_AMT6"] {
            fields.push(FieldSpec::new(amt, FieldDomain::NonNegative));
        }
        Self::new(fields)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}
