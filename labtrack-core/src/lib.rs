//! LabTrack Core - Entity Types
//!
//! Pure data structures with no behavior beyond constructors and lifecycle
//! mutators. All other crates depend on this. Samples and experiments live
//! in memory only; there is no persistence layer.

mod config;
mod entities;
mod enums;
mod error;
mod identity;
mod metadata;

pub use config::DashboardConfig;
pub use entities::{Experiment, ExperimentResult, ResultData, Sample};
pub use enums::{
    EntityKind, ExperimentStatus, ExperimentStatusParseError, ExperimentType,
    ExperimentTypeParseError, ResultType, SampleStatus, SampleStatusParseError, SampleType,
    SampleTypeParseError,
};
pub use error::{ConfigError, LabTrackError, LabTrackResult, StoreError};
pub use identity::{new_entity_id, ExperimentId, ResultId, SampleId, Timestamp};
pub use metadata::{Metadata, MetadataValue};

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Generated entity ids are UUIDv7 and therefore timestamp-sortable.
        #[test]
        fn prop_entity_ids_are_v7(_iteration in 0..100u32) {
            let id = new_entity_id();
            prop_assert_eq!(id.get_version_num(), 7);
        }

        /// Enum labels survive a parse round trip for every variant.
        #[test]
        fn prop_sample_type_labels_roundtrip(idx in 0..SampleType::ALL.len()) {
            let t = SampleType::ALL[idx];
            prop_assert_eq!(t.as_str().parse::<SampleType>().unwrap(), t);
        }

        /// Serde and as_str agree on the canonical label.
        #[test]
        fn prop_status_serde_matches_label(idx in 0..ExperimentStatus::ALL.len()) {
            let s = ExperimentStatus::ALL[idx];
            let json = serde_json::to_string(&s).unwrap();
            prop_assert_eq!(json, format!("\"{}\"", s.as_str()));
        }
    }
}
