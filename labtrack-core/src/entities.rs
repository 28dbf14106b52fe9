//! Core entity structures

use crate::{
    new_entity_id, ExperimentId, ExperimentStatus, ExperimentType, Metadata, MetadataValue,
    ResultId, ResultType, SampleId, SampleStatus, SampleType, Timestamp,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Sample - a tracked physical specimen.
/// Samples are never deleted; they leave circulation through status changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub id: SampleId,
    pub name: String,
    pub sample_type: SampleType,
    pub status: SampleStatus,
    pub created_at: Timestamp,
    pub expires_at: Option<Timestamp>,
    /// Storage temperature in degrees Celsius.
    pub temperature_c: Option<f64>,
    pub location: String,
    pub metadata: Metadata,
    pub tags: Vec<String>,
    pub notes: String,
    /// Sample this one was derived from, if any.
    pub parent_id: Option<SampleId>,
    /// Experiments this sample participates in.
    pub experiment_ids: Vec<ExperimentId>,
}

impl Sample {
    /// Create a new sample with a generated id, status ACTIVE, created now.
    pub fn new(name: impl Into<String>, sample_type: SampleType) -> Self {
        Self {
            id: new_entity_id(),
            name: name.into(),
            sample_type,
            status: SampleStatus::default(),
            created_at: Utc::now(),
            expires_at: None,
            temperature_c: None,
            location: String::new(),
            metadata: Metadata::new(),
            tags: Vec::new(),
            notes: String::new(),
            parent_id: None,
            experiment_ids: Vec::new(),
        }
    }

    /// Set the storage location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Set the expiration timestamp.
    pub fn with_expiry(mut self, expires_at: Timestamp) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Set the storage temperature in degrees Celsius.
    pub fn with_temperature(mut self, temperature_c: f64) -> Self {
        self.temperature_c = Some(temperature_c);
        self
    }

    /// Set the parent sample this one was derived from.
    pub fn with_parent(mut self, parent_id: SampleId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Set tags.
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Set free-text notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Set the creation timestamp (generators and tests backdate samples).
    pub fn with_created_at(mut self, created_at: Timestamp) -> Self {
        self.created_at = created_at;
        self
    }

    /// Change the sample status.
    pub fn set_status(&mut self, status: SampleStatus) {
        self.status = status;
    }

    /// Record participation in an experiment. Idempotent.
    pub fn link_experiment(&mut self, experiment_id: ExperimentId) {
        if !self.experiment_ids.contains(&experiment_id) {
            self.experiment_ids.push(experiment_id);
        }
    }

    /// Insert or replace a metadata entry.
    pub fn insert_metadata(&mut self, key: impl Into<String>, value: impl Into<MetadataValue>) {
        self.metadata.insert(key.into(), value.into());
    }
}

/// Experiment - a unit of laboratory work over one or more samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experiment {
    pub id: ExperimentId,
    pub name: String,
    pub experiment_type: ExperimentType,
    pub status: ExperimentStatus,
    pub started_at: Timestamp,
    /// Present exactly when the experiment COMPLETED or FAILED.
    pub ended_at: Option<Timestamp>,
    pub description: String,
    /// Reference to the protocol followed, free text.
    pub protocol: String,
    /// Samples consumed by this experiment.
    pub sample_ids: Vec<SampleId>,
    /// Outcomes recorded once the experiment completed.
    pub results: Vec<ExperimentResult>,
    pub metadata: Metadata,
    pub tags: Vec<String>,
    pub notes: String,
}

impl Experiment {
    /// Create a new experiment with a generated id, status PLANNED, started now.
    pub fn new(name: impl Into<String>, experiment_type: ExperimentType) -> Self {
        Self {
            id: new_entity_id(),
            name: name.into(),
            experiment_type,
            status: ExperimentStatus::default(),
            started_at: Utc::now(),
            ended_at: None,
            description: String::new(),
            protocol: String::new(),
            sample_ids: Vec::new(),
            results: Vec::new(),
            metadata: Metadata::new(),
            tags: Vec::new(),
            notes: String::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the protocol reference.
    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = protocol.into();
        self
    }

    /// Set the samples this experiment consumes.
    pub fn with_samples(mut self, sample_ids: Vec<SampleId>) -> Self {
        self.sample_ids = sample_ids;
        self
    }

    /// Set tags.
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Set the start timestamp (generators and tests backdate experiments).
    pub fn with_started_at(mut self, started_at: Timestamp) -> Self {
        self.started_at = started_at;
        self
    }

    /// Insert or replace a metadata entry.
    pub fn insert_metadata(&mut self, key: impl Into<String>, value: impl Into<MetadataValue>) {
        self.metadata.insert(key.into(), value.into());
    }

    /// Move the experiment into a new status, keeping the end timestamp
    /// consistent: COMPLETED and FAILED stamp `ended_at`, every other status
    /// clears it.
    pub fn set_status(&mut self, status: ExperimentStatus, at: Timestamp) {
        self.status = status;
        self.ended_at = if status.requires_end_date() {
            Some(at)
        } else {
            None
        };
    }

    /// Begin running a planned experiment.
    pub fn start(&mut self) {
        self.set_status(ExperimentStatus::InProgress, Utc::now());
    }

    /// Mark the experiment completed at the given time.
    pub fn complete(&mut self, at: Timestamp) {
        self.set_status(ExperimentStatus::Completed, at);
    }

    /// Mark the experiment failed at the given time.
    pub fn fail(&mut self, at: Timestamp) {
        self.set_status(ExperimentStatus::Failed, at);
    }

    /// Abandon the experiment. Cancelled experiments carry no end timestamp.
    pub fn cancel(&mut self) {
        self.set_status(ExperimentStatus::Cancelled, Utc::now());
    }

    /// Whether the experiment reached a terminal outcome with an end date.
    pub fn is_finished(&self) -> bool {
        self.ended_at.is_some()
    }

    /// Attach a result record. Callers enforce that the experiment has
    /// completed; the inventory store is the enforcing boundary.
    pub fn push_result(&mut self, result: ExperimentResult) {
        self.results.push(result);
    }
}

/// Payload of a result record. The shape follows the result type: NUMERIC
/// results carry a magnitude, everything else carries text (an observation,
/// a path, or a dataset label).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResultData {
    Numeric(f64),
    Text(String),
}

/// A recorded outcome of an experiment. Immutable once attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentResult {
    pub id: ResultId,
    pub name: String,
    pub result_type: ResultType,
    pub recorded_at: Timestamp,
    pub data: ResultData,
    pub notes: String,
}

impl ExperimentResult {
    /// Create a result record with a generated id.
    pub fn new(
        name: impl Into<String>,
        result_type: ResultType,
        recorded_at: Timestamp,
        data: ResultData,
    ) -> Self {
        Self {
            id: new_entity_id(),
            name: name.into(),
            result_type,
            recorded_at,
            data,
            notes: String::new(),
        }
    }

    /// Set free-text notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sample_defaults() {
        let sample = Sample::new("BLOOD-42", SampleType::Blood);
        assert_eq!(sample.status, SampleStatus::Active);
        assert!(sample.expires_at.is_none());
        assert!(sample.parent_id.is_none());
        assert!(sample.experiment_ids.is_empty());
        assert_eq!(sample.id.get_version_num(), 7);
    }

    #[test]
    fn test_sample_builders() {
        let parent = Sample::new("TISSUE-1", SampleType::Tissue);
        let sample = Sample::new("DNA-7", SampleType::Dna)
            .with_location("Freezer A")
            .with_temperature(-20.0)
            .with_parent(parent.id)
            .with_tags(vec!["research".to_string()]);
        assert_eq!(sample.location, "Freezer A");
        assert_eq!(sample.temperature_c, Some(-20.0));
        assert_eq!(sample.parent_id, Some(parent.id));
    }

    #[test]
    fn test_link_experiment_is_idempotent() {
        let mut sample = Sample::new("RNA-3", SampleType::Rna);
        let experiment_id = new_entity_id();
        sample.link_experiment(experiment_id);
        sample.link_experiment(experiment_id);
        assert_eq!(sample.experiment_ids, vec![experiment_id]);
    }

    #[test]
    fn test_new_experiment_defaults() {
        let experiment = Experiment::new("PCR-EXP-1", ExperimentType::Pcr);
        assert_eq!(experiment.status, ExperimentStatus::Planned);
        assert!(experiment.ended_at.is_none());
        assert!(experiment.results.is_empty());
    }

    #[test]
    fn test_complete_stamps_end_date() {
        let mut experiment = Experiment::new("SEQ-EXP-2", ExperimentType::Sequencing);
        let finished = Utc::now();
        experiment.complete(finished);
        assert_eq!(experiment.status, ExperimentStatus::Completed);
        assert_eq!(experiment.ended_at, Some(finished));
        assert!(experiment.is_finished());
    }

    #[test]
    fn test_reopening_clears_end_date() {
        let mut experiment = Experiment::new("MIC-EXP-3", ExperimentType::Microscopy);
        experiment.fail(Utc::now());
        assert!(experiment.is_finished());

        experiment.start();
        assert_eq!(experiment.status, ExperimentStatus::InProgress);
        assert!(experiment.ended_at.is_none());
    }

    #[test]
    fn test_cancel_carries_no_end_date() {
        let mut experiment = Experiment::new("FC-EXP-4", ExperimentType::FlowCytometry);
        experiment.start();
        experiment.cancel();
        assert_eq!(experiment.status, ExperimentStatus::Cancelled);
        assert!(experiment.ended_at.is_none());
    }

    #[test]
    fn test_result_record() {
        let recorded = Utc::now();
        let result = ExperimentResult::new(
            "Result 1",
            ResultType::Numeric,
            recorded,
            ResultData::Numeric(42.5),
        )
        .with_notes("Further analysis may be required.");
        assert_eq!(result.recorded_at, recorded);
        assert_eq!(result.data, ResultData::Numeric(42.5));
    }
}
