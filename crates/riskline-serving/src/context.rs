//! The serving context: everything one process needs to score applicants.

use crate::error::{ServingError, ServingResult};
use crate::result::{DefaultLabel, PredictionResult, RiskTier};
use riskline_core::{FeatureSchema, Record, ScalerState};
use riskline_models::TrainedClassifier;
use riskline_registry::{select_best, RunRegistry, TrialRecord};
use std::path::Path;

/// Scaler state plus the champion classifier, resolved once at
/// initialization and immutable afterwards.
///
/// The context is constructed explicitly and passed to callers; there is no
/// ambient global model. Re-initializing picks up registry appends made
/// since the last initialization — individual predictions never re-query
/// the registry.
#[derive(Debug)]
pub struct ServingContext {
    schema: FeatureSchema,
    scaler: ScalerState,
    champion: TrialRecord,
    classifier: TrainedClassifier,
}

impl ServingContext {
    /// Load the scaler, resolve the champion, and cache its classifier.
    ///
    /// Any failure here (missing experiment, empty experiment, unreadable
    /// artifact, scaler/schema drift) aborts initialization; no fallback is
    /// attempted.
    pub fn initialize(
        schema: FeatureSchema,
        registry: &RunRegistry,
        experiment: &str,
        scaler_path: &Path,
    ) -> ServingResult<Self> {
        let scaler = ScalerState::load(scaler_path, &schema)?;
        let champion = select_best(registry, experiment)?;
        let classifier = registry.load_artifact(&champion)?;

        if classifier.n_features() != schema.len() {
            return Err(ServingError::FeatureArity {
                expected: schema.len(),
                found: classifier.n_features(),
            });
        }

        tracing::info!(
            experiment,
            run = %champion.run_id,
            family = %classifier.family(),
            accuracy = champion.accuracy().unwrap_or_default(),
            "serving context initialized"
        );

        Ok(Self { schema, scaler, champion, classifier })
    }

    #[must_use]
    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// The trial whose classifier this context serves.
    #[must_use]
    pub fn champion(&self) -> &TrialRecord {
        &self.champion
    }

    /// Score one raw applicant record.
    ///
    /// All-or-nothing: schema validation, scaling, and classification each
    /// fail the whole request with a typed error; nothing is defaulted.
    pub fn predict(&self, values: &[(String, f64)]) -> ServingResult<PredictionResult> {
        let record = Record::from_named_values(&self.schema, values)?;
        self.predict_record(&record)
    }

    /// Score a record that already passed schema validation (batch input).
    pub fn predict_record(&self, record: &Record) -> ServingResult<PredictionResult> {
        let scaled = self.scaler.transform(record)?;

        let class = self.classifier.predict(&scaled)?;
        let probability = self.classifier.predict_proba(&scaled)?;

        Ok(PredictionResult {
            label: DefaultLabel::from_class(class),
            probability,
            tier: RiskTier::from_probability(probability),
        })
    }
}
