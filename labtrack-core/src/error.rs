//! Error types for LabTrack operations

use crate::{EntityKind, ExperimentId, ExperimentStatus, SampleId};
use thiserror::Error;
use uuid::Uuid;

/// Inventory layer errors.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("Entity not found: {kind:?} with id {id}")]
    NotFound { kind: EntityKind, id: Uuid },

    #[error("Duplicate id for {kind:?}: {id}")]
    DuplicateId { kind: EntityKind, id: Uuid },

    #[error("Sample {sample_id} references unknown parent {parent_id}")]
    UnknownParent {
        sample_id: SampleId,
        parent_id: SampleId,
    },

    #[error("Experiment {experiment_id} references unknown sample {sample_id}")]
    UnknownSampleRef {
        experiment_id: ExperimentId,
        sample_id: SampleId,
    },

    #[error("Cycle detected in sample parent chain: {ids:?}")]
    ParentCycle { ids: Vec<SampleId> },

    #[error("Results can only be attached to completed experiments, {id} is {status}")]
    ResultsNotAccepted {
        id: ExperimentId,
        status: ExperimentStatus,
    },
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Master error type for all LabTrack errors.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LabTrackError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for LabTrack operations.
pub type LabTrackResult<T> = Result<T, LabTrackError>;

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display_not_found() {
        let err = StoreError::NotFound {
            kind: EntityKind::Sample,
            id: Uuid::nil(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Entity not found"));
        assert!(msg.contains("Sample"));
        assert!(msg.contains("00000000-0000-0000-0000-000000000000"));
    }

    #[test]
    fn test_store_error_display_unknown_parent() {
        let err = StoreError::UnknownParent {
            sample_id: Uuid::nil(),
            parent_id: Uuid::nil(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("unknown parent"));
    }

    #[test]
    fn test_store_error_display_results_not_accepted() {
        let err = StoreError::ResultsNotAccepted {
            id: Uuid::nil(),
            status: ExperimentStatus::Planned,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("completed experiments"));
        assert!(msg.contains("PLANNED"));
    }

    #[test]
    fn test_config_error_display_invalid_value() {
        let err = ConfigError::InvalidValue {
            field: "timeline_windows".to_string(),
            value: "0".to_string(),
            reason: "must be positive".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("timeline_windows"));
        assert!(msg.contains("must be positive"));
    }

    #[test]
    fn test_labtrack_error_from_variants() {
        let store = LabTrackError::from(StoreError::ParentCycle { ids: vec![] });
        assert!(matches!(store, LabTrackError::Store(_)));

        let config = LabTrackError::from(ConfigError::InvalidValue {
            field: "expiry_warning_days".to_string(),
            value: "-1".to_string(),
            reason: "must not be negative".to_string(),
        });
        assert!(matches!(config, LabTrackError::Config(_)));
    }
}
