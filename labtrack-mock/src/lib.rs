//! LabTrack Mock - Mock-Data Generator
//!
//! Populates an [`Inventory`] with plausible laboratory data for the
//! dashboard to display. Generation is fully deterministic under a seed, so
//! tests and demos can reproduce the exact same inventory.
//!
//! The distributions are intentionally simple: uniform types and statuses,
//! creation dates spread over the trailing hundred days, and a sprinkling of
//! parent links, expiry dates, and degradation notes.

use chrono::{Duration, Utc};
use labtrack_core::{
    Experiment, ExperimentResult, ExperimentStatus, ExperimentType, ResultData, ResultType,
    Sample, SampleId, SampleStatus, SampleType, Timestamp,
};
use labtrack_store::Inventory;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

const LOCATIONS: [&str; 6] = [
    "Freezer A",
    "Freezer B",
    "Refrigerator 1",
    "Cabinet 3",
    "Shelf 2",
    "Box 4",
];

const DEGRADATION_NOTE: &str = "Sample appears to be degrading. Check before use.";
const FOLLOWUP_NOTE: &str = "Further analysis may be required.";
const OBSERVATION_TEXT: &str = "Observation: Sample showed expected reaction";

/// Builder for a generated inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockDataBuilder {
    samples: usize,
    experiments: usize,
    seed: u64,
}

impl Default for MockDataBuilder {
    fn default() -> Self {
        Self {
            samples: 50,
            experiments: 30,
            seed: 0,
        }
    }
}

impl MockDataBuilder {
    /// Builder with the default collection sizes (50 samples, 30
    /// experiments) and seed 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of samples to generate.
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    /// Number of experiments to generate.
    pub fn with_experiments(mut self, experiments: usize) -> Self {
        self.experiments = experiments;
        self
    }

    /// Seed for the generator. The same seed produces the same inventory
    /// apart from entity ids and the position of `now`.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Generate the inventory.
    pub fn build(self) -> Inventory {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let now = Utc::now();
        let mut inventory = Inventory::new();

        generate_samples(&mut inventory, self.samples, now, &mut rng);
        generate_experiments(&mut inventory, self.experiments, now, &mut rng);

        debug!(
            samples = inventory.sample_count(),
            experiments = inventory.experiment_count(),
            seed = self.seed,
            "mock inventory generated"
        );
        inventory
    }
}

/// Generate `count` samples into the inventory.
fn generate_samples(inventory: &mut Inventory, count: usize, now: Timestamp, rng: &mut StdRng) {
    let mut ids: Vec<SampleId> = Vec::with_capacity(count);

    for _ in 0..count {
        let sample_type = pick(&SampleType::ALL, rng);
        let status = pick(&SampleStatus::ALL, rng);
        let created_at = now - random_span(rng, 100);

        let mut sample = Sample::new(
            format!("{}-{}", sample_type.as_str(), rng.random_range(0..1000)),
            sample_type,
        )
        .with_created_at(created_at)
        .with_location(pick(&LOCATIONS, rng))
        .with_temperature(storage_temperature(sample_type))
        .with_tags(vec![
            "research".to_string(),
            format!("lab-{}", rng.random_range(1..=3)),
        ]);
        sample.set_status(status);

        if rng.random_bool(0.7) {
            sample.expires_at = Some(now + random_span(rng, 365));
        }
        if rng.random_bool(0.3) {
            sample = sample.with_notes(DEGRADATION_NOTE);
        }
        if rng.random_bool(0.2) && !ids.is_empty() {
            sample = sample.with_parent(ids[rng.random_range(0..ids.len())]);
        }

        sample.insert_metadata("concentration", rng.random::<f64>() * 10.0);
        sample.insert_metadata("volume", rng.random::<f64>() * 50.0);
        sample.insert_metadata("ph", 7.0 + (rng.random::<f64>() * 2.0 - 1.0));

        let id = inventory
            .add_sample(sample)
            .expect("generated ids are unique and parents precede children");
        ids.push(id);
    }
}

/// Generate `count` experiments into the inventory, drawing sample
/// references from the samples already present.
fn generate_experiments(inventory: &mut Inventory, count: usize, now: Timestamp, rng: &mut StdRng) {
    let sample_ids: Vec<SampleId> = inventory.iter_samples().map(|s| s.id).collect();

    for _ in 0..count {
        let experiment_type = pick(&ExperimentType::ALL, rng);
        let status = pick(&ExperimentStatus::ALL, rng);
        let started_at = now - random_span(rng, 60);
        let ended_at = started_at + random_span(rng, 30);

        let mut refs: Vec<SampleId> = Vec::new();
        if !sample_ids.is_empty() {
            for _ in 0..rng.random_range(1..=3usize) {
                let candidate = sample_ids[rng.random_range(0..sample_ids.len())];
                if !refs.contains(&candidate) {
                    refs.push(candidate);
                }
            }
        }

        let mut experiment = Experiment::new(
            format!("{}-EXP-{}", experiment_type.as_str(), rng.random_range(0..1000)),
            experiment_type,
        )
        .with_description(format!(
            "{} experiment to analyze sample properties.",
            experiment_type.as_str()
        ))
        .with_protocol(format!(
            "Standard {} protocol version {}.0",
            experiment_type.as_str(),
            rng.random_range(1..=5)
        ))
        .with_samples(refs)
        .with_tags(vec![
            "experiment".to_string(),
            experiment_type.as_str().to_lowercase(),
        ])
        .with_started_at(started_at);

        experiment.set_status(status, ended_at);
        experiment.insert_metadata(
            "equipment",
            format!(
                "{}-machine-{}",
                experiment_type.as_str().to_lowercase(),
                rng.random_range(1..=5)
            ),
        );
        experiment.insert_metadata("temperature", 23.0 + rng.random_range(0..5) as f64);
        experiment.insert_metadata(
            "duration",
            format!("{} minutes", rng.random_range(30..210)),
        );

        let id = inventory
            .add_experiment(experiment)
            .expect("generated ids are unique and sample refs come from the inventory");

        if status == ExperimentStatus::Completed {
            for j in 0..rng.random_range(1..=3usize) {
                let result = make_result(j, ended_at, rng);
                inventory
                    .add_result(id, result)
                    .expect("experiment was just completed");
            }
        }
    }
}

fn make_result(index: usize, recorded_at: Timestamp, rng: &mut StdRng) -> ExperimentResult {
    let (result_type, data) = if rng.random_bool(0.5) {
        (ResultType::Numeric, ResultData::Numeric(rng.random::<f64>() * 100.0))
    } else {
        (ResultType::Text, ResultData::Text(OBSERVATION_TEXT.to_string()))
    };

    let mut result = ExperimentResult::new(
        format!("Result {}", index + 1),
        result_type,
        recorded_at,
        data,
    );
    if rng.random_bool(0.3) {
        result = result.with_notes(FOLLOWUP_NOTE);
    }
    result
}

/// Storage temperature by sample kind: reagents and buffers sit on the
/// bench, cell cultures in the incubator, everything else in the freezer.
fn storage_temperature(sample_type: SampleType) -> f64 {
    match sample_type {
        SampleType::Reagent | SampleType::Buffer => 20.0,
        SampleType::CellCulture => 37.0,
        _ => -20.0,
    }
}

fn pick<T: Copy>(values: &[T], rng: &mut StdRng) -> T {
    values[rng.random_range(0..values.len())]
}

/// A uniform duration up to `days` days, with hour granularity.
fn random_span(rng: &mut StdRng, days: i64) -> chrono::Duration {
    Duration::hours(rng.random_range(0..days * 24))
}

// =============================================================================
// TESTS
// =============================================================================
