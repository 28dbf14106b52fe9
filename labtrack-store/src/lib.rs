//! LabTrack Store - In-Memory Inventory
//!
//! The application's top-level state: the sample and experiment collections,
//! id lookup, referential validation, status transitions, and the
//! parent/child sample relationships. Everything lives in memory and is
//! discarded when the process exits; there is no persistence layer.
//!
//! Listing methods return snapshots in insertion order. The query engine's
//! "no sort key preserves input order" contract depends on that ordering
//! being deterministic.

use labtrack_core::{
    EntityKind, Experiment, ExperimentId, ExperimentResult, ExperimentStatus, ResultId, Sample,
    SampleId, SampleStatus, StoreError, Timestamp,
};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// In-memory inventory of samples and experiments.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    samples: HashMap<SampleId, Sample>,
    sample_order: Vec<SampleId>,
    experiments: HashMap<ExperimentId, Experiment>,
    experiment_order: Vec<ExperimentId>,
}

impl Inventory {
    /// Create an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of samples held.
    pub fn sample_count(&self) -> usize {
        self.sample_order.len()
    }

    /// Number of experiments held.
    pub fn experiment_count(&self) -> usize {
        self.experiment_order.len()
    }

    // === Insertion ===

    /// Insert a sample.
    ///
    /// Rejects duplicate ids and parent references that do not name an
    /// already-inserted sample. Parents must exist before their children,
    /// which keeps parent chains acyclic as long as samples enter through
    /// this method.
    pub fn add_sample(&mut self, sample: Sample) -> Result<SampleId, StoreError> {
        if self.samples.contains_key(&sample.id) {
            return Err(StoreError::DuplicateId {
                kind: EntityKind::Sample,
                id: sample.id,
            });
        }
        if let Some(parent_id) = sample.parent_id {
            if !self.samples.contains_key(&parent_id) {
                return Err(StoreError::UnknownParent {
                    sample_id: sample.id,
                    parent_id,
                });
            }
        }

        debug!(sample = %sample.id, name = %sample.name, "sample added");
        let id = sample.id;
        self.sample_order.push(id);
        self.samples.insert(id, sample);
        Ok(id)
    }

    /// Insert an experiment.
    ///
    /// Rejects duplicate ids and references to unknown samples. On success
    /// the experiment id is back-linked into every referenced sample.
    pub fn add_experiment(&mut self, experiment: Experiment) -> Result<ExperimentId, StoreError> {
        if self.experiments.contains_key(&experiment.id) {
            return Err(StoreError::DuplicateId {
                kind: EntityKind::Experiment,
                id: experiment.id,
            });
        }
        for sample_id in &experiment.sample_ids {
            if !self.samples.contains_key(sample_id) {
                return Err(StoreError::UnknownSampleRef {
                    experiment_id: experiment.id,
                    sample_id: *sample_id,
                });
            }
        }

        for sample_id in &experiment.sample_ids {
            if let Some(sample) = self.samples.get_mut(sample_id) {
                sample.link_experiment(experiment.id);
            }
        }

        debug!(
            experiment = %experiment.id,
            name = %experiment.name,
            samples = experiment.sample_ids.len(),
            "experiment added"
        );
        self.experiment_order.push(experiment.id);
        let id = experiment.id;
        self.experiments.insert(id, experiment);
        Ok(id)
    }

    // === Lookup ===

    /// Sample by id.
    pub fn sample(&self, id: SampleId) -> Option<&Sample> {
        self.samples.get(&id)
    }

    /// Experiment by id.
    pub fn experiment(&self, id: ExperimentId) -> Option<&Experiment> {
        self.experiments.get(&id)
    }

    /// Snapshot of all samples, in insertion order.
    pub fn samples(&self) -> Vec<Sample> {
        self.iter_samples().cloned().collect()
    }

    /// Snapshot of all experiments, in insertion order.
    pub fn experiments(&self) -> Vec<Experiment> {
        self.iter_experiments().cloned().collect()
    }

    /// Borrowing iterator over samples, in insertion order.
    pub fn iter_samples(&self) -> impl Iterator<Item = &Sample> {
        self.sample_order
            .iter()
            .filter_map(move |id| self.samples.get(id))
    }

    /// Borrowing iterator over experiments, in insertion order.
    pub fn iter_experiments(&self) -> impl Iterator<Item = &Experiment> {
        self.experiment_order
            .iter()
            .filter_map(move |id| self.experiments.get(id))
    }

    // === Mutation ===

    /// Change a sample's status. Any transition is allowed; samples leave
    /// circulation through status changes, never deletion.
    pub fn set_sample_status(
        &mut self,
        id: SampleId,
        status: SampleStatus,
    ) -> Result<(), StoreError> {
        let sample = self.samples.get_mut(&id).ok_or(StoreError::NotFound {
            kind: EntityKind::Sample,
            id,
        })?;
        sample.set_status(status);
        Ok(())
    }

    /// Change an experiment's status, keeping the end-timestamp invariant:
    /// COMPLETED and FAILED stamp `ended_at = at`, every other status clears
    /// it.
    pub fn set_experiment_status(
        &mut self,
        id: ExperimentId,
        status: ExperimentStatus,
        at: Timestamp,
    ) -> Result<(), StoreError> {
        let experiment = self.experiments.get_mut(&id).ok_or(StoreError::NotFound {
            kind: EntityKind::Experiment,
            id,
        })?;
        experiment.set_status(status, at);
        Ok(())
    }

    /// Attach a result record to a completed experiment.
    pub fn add_result(
        &mut self,
        experiment_id: ExperimentId,
        result: ExperimentResult,
    ) -> Result<ResultId, StoreError> {
        let experiment = self
            .experiments
            .get_mut(&experiment_id)
            .ok_or(StoreError::NotFound {
                kind: EntityKind::Experiment,
                id: experiment_id,
            })?;
        if experiment.status != ExperimentStatus::Completed {
            return Err(StoreError::ResultsNotAccepted {
                id: experiment_id,
                status: experiment.status,
            });
        }

        debug!(experiment = %experiment_id, result = %result.id, "result attached");
        let result_id = result.id;
        experiment.push_result(result);
        Ok(result_id)
    }

    // === Relationships ===

    /// Parent id -> ordered child ids, built on demand from the flat
    /// collection. Children appear in insertion order.
    pub fn children_index(&self) -> BTreeMap<SampleId, Vec<SampleId>> {
        let mut index: BTreeMap<SampleId, Vec<SampleId>> = BTreeMap::new();
        for sample in self.iter_samples() {
            if let Some(parent_id) = sample.parent_id {
                index.entry(parent_id).or_default().push(sample.id);
            }
        }
        index
    }

    /// Samples derived from the given sample, in insertion order.
    pub fn children_of(&self, id: SampleId) -> Vec<Sample> {
        self.iter_samples()
            .filter(|s| s.parent_id == Some(id))
            .cloned()
            .collect()
    }

    /// The sample the given sample was derived from, if any.
    pub fn parent_of(&self, id: SampleId) -> Option<&Sample> {
        let parent_id = self.samples.get(&id)?.parent_id?;
        self.samples.get(&parent_id)
    }

    /// Walk the parent chain upward from a sample, nearest ancestor first.
    ///
    /// The chain is expected to be acyclic because insertion requires
    /// parents to exist first, but collections assembled outside the store
    /// carry no such guarantee; a repeated id reports `ParentCycle` instead
    /// of looping forever.
    pub fn ancestry(&self, id: SampleId) -> Result<Vec<SampleId>, StoreError> {
        let mut sample = self.samples.get(&id).ok_or(StoreError::NotFound {
            kind: EntityKind::Sample,
            id,
        })?;

        let mut seen = vec![id];
        let mut chain = Vec::new();
        while let Some(parent_id) = sample.parent_id {
            if seen.contains(&parent_id) {
                seen.push(parent_id);
                return Err(StoreError::ParentCycle { ids: seen });
            }
            seen.push(parent_id);
            chain.push(parent_id);
            match self.samples.get(&parent_id) {
                Some(parent) => sample = parent,
                None => break,
            }
        }
        Ok(chain)
    }

    /// Experiments that consume the given sample, in insertion order.
    pub fn experiments_for_sample(&self, id: SampleId) -> Vec<Experiment> {
        self.iter_experiments()
            .filter(|e| e.sample_ids.contains(&id))
            .cloned()
            .collect()
    }

    /// Samples consumed by the given experiment, in sample insertion order.
    pub fn samples_for_experiment(&self, id: ExperimentId) -> Vec<Sample> {
        let Some(experiment) = self.experiments.get(&id) else {
            return Vec::new();
        };
        self.iter_samples()
            .filter(|s| experiment.sample_ids.contains(&s.id))
            .cloned()
            .collect()
    }
}

// =============================================================================
// TESTS
// =============================================================================
