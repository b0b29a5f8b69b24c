//! Champion selection: the best trial of an experiment.

use crate::error::{RegistryError, RegistryResult};
use crate::store::RunRegistry;
use crate::trial::{TrialRecord, ACCURACY_METRIC};

/// Pick the trial with the highest accuracy under `experiment`.
///
/// Ties are broken by earliest creation time, then smallest run id, so the
/// result is reproducible no matter what order the registry returns trials
/// in. The registry is consulted on every call; selection is never cached,
/// since trials can be appended between calls.
pub fn select_best(registry: &RunRegistry, experiment: &str) -> RegistryResult<TrialRecord> {
    let trials = registry.query_trials(experiment)?;
    if trials.is_empty() {
        return Err(RegistryError::EmptyExperiment(experiment.to_string()));
    }

    let mut ranked = Vec::with_capacity(trials.len());
    for trial in trials {
        let accuracy = trial.accuracy().ok_or_else(|| RegistryError::MissingMetric {
            run_id: trial.run_id.to_string(),
            metric: ACCURACY_METRIC.to_string(),
        })?;
        ranked.push((accuracy, trial));
    }

    let best = ranked
        .into_iter()
        .max_by(|(acc_a, a), (acc_b, b)| {
            acc_a
                .total_cmp(acc_b)
                .then_with(|| b.created_at.cmp(&a.created_at))
                .then_with(|| b.run_id.cmp(&a.run_id))
        })
        .map(|(_, trial)| trial);

    match best {
        Some(trial) => {
            tracing::debug!(
                experiment,
                run = %trial.run_id,
                accuracy = trial.accuracy().unwrap_or_default(),
                "champion selected"
            );
            Ok(trial)
        }
        // Unreachable: the empty case returned above.
        None => Err(RegistryError::EmptyExperiment(experiment.to_string())),
    }
}
