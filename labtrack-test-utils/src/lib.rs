//! LabTrack Test Utilities
//!
//! Centralized test infrastructure for the LabTrack workspace:
//! - Proptest generators for entity types
//! - Fixtures for common scenarios

// Re-export core types for convenience
pub use labtrack_core::{
    Experiment, ExperimentResult, ExperimentStatus, ExperimentType, Metadata, MetadataValue,
    ResultData, ResultType, Sample, SampleStatus, SampleType, Timestamp,
};

pub mod generators {
    //! Proptest strategies for generating LabTrack entity types.

    use chrono::{Duration, Utc};
    use labtrack_core::{
        Experiment, ExperimentStatus, ExperimentType, Sample, SampleStatus, SampleType, Timestamp,
    };
    use proptest::prelude::*;
    use uuid::Uuid;

    // === Identity Type Generators ===

    /// Generate a random UUID.
    pub fn arb_uuid() -> impl Strategy<Value = Uuid> {
        any::<[u8; 16]>().prop_map(Uuid::from_bytes)
    }

    /// Generate a Timestamp within a reasonable range (2020-2030).
    pub fn arb_timestamp() -> impl Strategy<Value = Timestamp> {
        (1577836800i64..1893456000i64).prop_map(|secs| {
            chrono::DateTime::from_timestamp(secs, 0).unwrap_or_else(Utc::now)
        })
    }

    /// Generate a timestamp in the window around now that the dashboard
    /// charts care about: up to ~200 days old, occasionally a few days in
    /// the future.
    pub fn arb_recent_timestamp() -> impl Strategy<Value = Timestamp> {
        (-5i64..200, 0i64..24).prop_map(|(days_ago, hour)| {
            Utc::now() - Duration::days(days_ago) - Duration::hours(hour)
        })
    }

    // === Enum Generators ===

    pub fn arb_sample_type() -> impl Strategy<Value = SampleType> {
        prop::sample::select(SampleType::ALL.to_vec())
    }

    pub fn arb_sample_status() -> impl Strategy<Value = SampleStatus> {
        prop::sample::select(SampleStatus::ALL.to_vec())
    }

    pub fn arb_experiment_type() -> impl Strategy<Value = ExperimentType> {
        prop::sample::select(ExperimentType::ALL.to_vec())
    }

    pub fn arb_experiment_status() -> impl Strategy<Value = ExperimentStatus> {
        prop::sample::select(ExperimentStatus::ALL.to_vec())
    }

    // === Entity Generators ===

    /// Generate a sample with a fresh id and consistent fields. Parent
    /// references are left unset; relationships belong to the store.
    pub fn arb_sample() -> impl Strategy<Value = Sample> {
        (
            arb_sample_type(),
            arb_sample_status(),
            0u32..1000,
            arb_recent_timestamp(),
            prop::option::of(1i64..365),
            prop::sample::select(vec![
                "Freezer A",
                "Freezer B",
                "Refrigerator 1",
                "Cabinet 3",
                "Shelf 2",
                "Box 4",
            ]),
        )
            .prop_map(|(sample_type, status, number, created_at, expiry_days, location)| {
                let mut sample =
                    Sample::new(format!("{}-{}", sample_type.as_str(), number), sample_type)
                        .with_location(location)
                        .with_created_at(created_at);
                sample.set_status(status);
                sample.expires_at = expiry_days.map(|days| created_at + Duration::days(days));
                sample
            })
    }

    /// Generate an experiment whose `ended_at` is consistent with its
    /// status: present for COMPLETED and FAILED, absent otherwise.
    pub fn arb_experiment() -> impl Strategy<Value = Experiment> {
        (
            arb_experiment_type(),
            arb_experiment_status(),
            0u32..1000,
            arb_recent_timestamp(),
            1i64..30,
        )
            .prop_map(|(experiment_type, status, number, started_at, run_days)| {
                let mut experiment = Experiment::new(
                    format!("{}-EXP-{}", experiment_type.as_str(), number),
                    experiment_type,
                )
                .with_description(format!(
                    "{} experiment to analyze sample properties.",
                    experiment_type.as_str()
                ))
                .with_started_at(started_at);
                experiment.set_status(status, started_at + Duration::days(run_days));
                experiment
            })
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::generators::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Generated experiments satisfy the end-timestamp invariant.
        #[test]
        fn prop_generated_experiments_are_consistent(experiment in arb_experiment()) {
            prop_assert_eq!(
                experiment.ended_at.is_some(),
                experiment.status.requires_end_date()
            );
            if let Some(ended_at) = experiment.ended_at {
                prop_assert!(ended_at >= experiment.started_at);
            }
        }

        /// Generated samples expire after they were created, when they
        /// expire at all.
        #[test]
        fn prop_generated_samples_expire_after_creation(sample in arb_sample()) {
            if let Some(expires_at) = sample.expires_at {
                prop_assert!(expires_at > sample.created_at);
            }
        }
    }
}
