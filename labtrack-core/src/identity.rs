//! Identity types for LabTrack entities

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Sample identifier. Opaque and unique within a collection.
pub type SampleId = Uuid;

/// Experiment identifier.
pub type ExperimentId = Uuid;

/// Identifier of a result record attached to an experiment.
pub type ResultId = Uuid;

/// All timestamps are UTC.
pub type Timestamp = DateTime<Utc>;

/// Generate a fresh entity identifier. UUIDv7 carries the creation time in
/// its high bits, so ids sort chronologically.
pub fn new_entity_id() -> Uuid {
    Uuid::now_v7()
}
