//! LabTrack Query - Collection Query Engine
//!
//! Transforms an entity collection into the exact ordered subset a view
//! should display: free-text search, categorical filters, and a stable sort
//! on a typed key. Every operation is pure; the input collection is never
//! mutated and the output is always a subset of the input.
//!
//! Filtering runs before sorting, always. Sortable fields are an explicit
//! enumeration per entity, resolved at compile time; there are no runtime
//! field-name lookups.

use labtrack_core::{
    Experiment, ExperimentStatus, ExperimentType, Sample, SampleStatus, SampleType,
};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

// ============================================================================
// SORT PRIMITIVES
// ============================================================================

/// Direction of a sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Apply this direction to a comparison computed in ascending order.
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// A sort key paired with a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec<K> {
    pub key: K,
    pub direction: SortDirection,
}

impl<K: Copy + PartialEq> SortSpec<K> {
    /// Sort ascending on the given key.
    pub fn ascending(key: K) -> Self {
        Self {
            key,
            direction: SortDirection::Ascending,
        }
    }

    /// Sort descending on the given key.
    pub fn descending(key: K) -> Self {
        Self {
            key,
            direction: SortDirection::Descending,
        }
    }

    /// Column-header toggle: selecting a new key sorts ascending; selecting
    /// the key already sorted on flips the direction.
    pub fn toggle(current: Option<SortSpec<K>>, key: K) -> SortSpec<K> {
        match current {
            Some(spec) if spec.key == key => SortSpec {
                key,
                direction: spec.direction.flipped(),
            },
            _ => SortSpec::ascending(key),
        }
    }
}

/// Categorical filter. `All` is the sentinel that retains everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Filter<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Filter<T> {
    /// Whether an entity with the given field value passes this filter.
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Filter::All => true,
            Filter::Only(wanted) => wanted == value,
        }
    }
}

// ============================================================================
// COMPARISON HELPERS
// ============================================================================

/// Case-insensitive string ordering with a case-sensitive tiebreak, the
/// collation used for every string-valued sort key.
pub fn compare_str(a: &str, b: &str) -> Ordering {
    let folded = a.to_lowercase().cmp(&b.to_lowercase());
    if folded != Ordering::Equal {
        return folded;
    }
    a.cmp(b)
}

/// Ordering on optional values: an absent value compares less than any
/// present value, and two absent values are equal. Direction reversal is
/// applied after this rule, so `None` sorts first ascending and last
/// descending.
pub fn compare_opt<T>(a: Option<&T>, b: Option<&T>, cmp: impl Fn(&T, &T) -> Ordering) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => cmp(x, y),
    }
}

// ============================================================================
// QUERYABLE ENTITIES
// ============================================================================

/// An entity collection the query engine can run over.
pub trait Queryable: Clone {
    /// Categorical "type" field.
    type Kind: Copy + PartialEq + std::fmt::Debug;
    /// Categorical "status" field.
    type Status: Copy + PartialEq + std::fmt::Debug;
    /// Enumeration of sortable fields.
    type SortKey: Copy + PartialEq + std::fmt::Debug;

    /// Whether any searchable field contains `needle`. The needle arrives
    /// lowercased and non-empty.
    fn matches_search(&self, needle: &str) -> bool;

    fn kind(&self) -> Self::Kind;

    fn status(&self) -> Self::Status;

    /// Ascending comparison on the given sort key.
    fn compare_by(&self, other: &Self, key: Self::SortKey) -> Ordering;
}

/// Sortable fields of a sample list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SampleSortKey {
    Name,
    Type,
    Status,
    CreatedAt,
    ExpiresAt,
    Temperature,
    Location,
}

impl Queryable for Sample {
    type Kind = SampleType;
    type Status = SampleStatus;
    type SortKey = SampleSortKey;

    /// Samples are searched by name, id, and storage location.
    fn matches_search(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.id.to_string().contains(needle)
            || self.location.to_lowercase().contains(needle)
    }

    fn kind(&self) -> SampleType {
        self.sample_type
    }

    fn status(&self) -> SampleStatus {
        self.status
    }

    fn compare_by(&self, other: &Self, key: SampleSortKey) -> Ordering {
        match key {
            SampleSortKey::Name => compare_str(&self.name, &other.name),
            SampleSortKey::Type => {
                compare_str(self.sample_type.as_str(), other.sample_type.as_str())
            }
            SampleSortKey::Status => compare_str(self.status.as_str(), other.status.as_str()),
            SampleSortKey::CreatedAt => self.created_at.cmp(&other.created_at),
            SampleSortKey::ExpiresAt => compare_opt(
                self.expires_at.as_ref(),
                other.expires_at.as_ref(),
                |a, b| a.cmp(b),
            ),
            SampleSortKey::Temperature => compare_opt(
                self.temperature_c.as_ref(),
                other.temperature_c.as_ref(),
                |a, b| a.total_cmp(b),
            ),
            SampleSortKey::Location => compare_str(&self.location, &other.location),
        }
    }
}

/// Sortable fields of an experiment list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExperimentSortKey {
    Name,
    Type,
    Status,
    StartedAt,
    EndedAt,
}

impl Queryable for Experiment {
    type Kind = ExperimentType;
    type Status = ExperimentStatus;
    type SortKey = ExperimentSortKey;

    /// Experiments are searched by name, id, and description.
    fn matches_search(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.id.to_string().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }

    fn kind(&self) -> ExperimentType {
        self.experiment_type
    }

    fn status(&self) -> ExperimentStatus {
        self.status
    }

    fn compare_by(&self, other: &Self, key: ExperimentSortKey) -> Ordering {
        match key {
            ExperimentSortKey::Name => compare_str(&self.name, &other.name),
            ExperimentSortKey::Type => {
                compare_str(self.experiment_type.as_str(), other.experiment_type.as_str())
            }
            ExperimentSortKey::Status => compare_str(self.status.as_str(), other.status.as_str()),
            ExperimentSortKey::StartedAt => self.started_at.cmp(&other.started_at),
            ExperimentSortKey::EndedAt => compare_opt(
                self.ended_at.as_ref(),
                other.ended_at.as_ref(),
                |a, b| a.cmp(b),
            ),
        }
    }
}

// ============================================================================
// QUERY
// ============================================================================

/// A view's query state: search term, categorical filters, sort.
#[derive(Debug, Clone, PartialEq)]
pub struct Query<E: Queryable> {
    /// Free-text search term. Empty retains everything.
    pub search: String,
    /// Type filter.
    pub kind_filter: Filter<E::Kind>,
    /// Status filter.
    pub status_filter: Filter<E::Status>,
    /// Sort specification. `None` preserves input order.
    pub sort: Option<SortSpec<E::SortKey>>,
}

impl<E: Queryable> Default for Query<E> {
    fn default() -> Self {
        Self {
            search: String::new(),
            kind_filter: Filter::All,
            status_filter: Filter::All,
            sort: None,
        }
    }
}

impl<E: Queryable> Query<E> {
    /// An unfiltered, unsorted query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search term.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Restrict to one type.
    pub fn with_kind(mut self, kind: E::Kind) -> Self {
        self.kind_filter = Filter::Only(kind);
        self
    }

    /// Restrict to one status.
    pub fn with_status(mut self, status: E::Status) -> Self {
        self.status_filter = Filter::Only(status);
        self
    }

    /// Sort on a key.
    pub fn with_sort(mut self, sort: SortSpec<E::SortKey>) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Column-header click: toggle the sort as described on [`SortSpec::toggle`].
    pub fn toggle_sort(&mut self, key: E::SortKey) {
        self.sort = Some(SortSpec::toggle(self.sort, key));
    }

    /// Clear every filter and the sort.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Run the query: filter (search, then type, then status), then sort.
    ///
    /// The sort is stable, so entities with equal keys keep their input
    /// order, and with no sort key the input order is preserved outright.
    /// An empty or no-match result is an empty vector, never an error.
    pub fn run(&self, entities: &[E]) -> Vec<E> {
        let needle = self.search.to_lowercase();

        let mut filtered: Vec<E> = entities
            .iter()
            .filter(|e| needle.is_empty() || e.matches_search(&needle))
            .filter(|e| self.kind_filter.matches(&e.kind()))
            .filter(|e| self.status_filter.matches(&e.status()))
            .cloned()
            .collect();

        if let Some(spec) = self.sort {
            filtered.sort_by(|a, b| spec.direction.apply(a.compare_by(b, spec.key)));
        }

        filtered
    }
}

// =============================================================================
// TESTS
// =============================================================================


#[cfg(test)]
mod prop_tests {
    use super::*;
    use labtrack_core::{Sample, SampleStatus, SampleType};
    use proptest::prelude::*;

    fn arb_sample_type() -> impl Strategy<Value = SampleType> {
        prop::sample::select(SampleType::ALL.to_vec())
    }

    fn arb_sample_status() -> impl Strategy<Value = SampleStatus> {
        prop::sample::select(SampleStatus::ALL.to_vec())
    }

    fn arb_sample() -> impl Strategy<Value = Sample> {
        (
            "[a-z]{1,6}",
            arb_sample_type(),
            arb_sample_status(),
            prop::option::of(-80.0f64..40.0),
        )
            .prop_map(|(name, sample_type, status, temperature)| {
                let mut sample = Sample::new(name, sample_type).with_location("Box 4");
                sample.set_status(status);
                sample.temperature_c = temperature;
                sample
            })
    }

    fn arb_query() -> impl Strategy<Value = Query<Sample>> {
        (
            "[a-z]{0,3}",
            prop::option::of(arb_sample_type()),
            prop::option::of(arb_sample_status()),
            prop::option::of((
                prop::sample::select(vec![
                    SampleSortKey::Name,
                    SampleSortKey::Type,
                    SampleSortKey::Status,
                    SampleSortKey::CreatedAt,
                    SampleSortKey::Temperature,
                ]),
                prop::bool::ANY,
            )),
        )
            .prop_map(|(search, kind, status, sort)| {
                let mut query = Query::new().with_search(search);
                if let Some(kind) = kind {
                    query = query.with_kind(kind);
                }
                if let Some(status) = status {
                    query = query.with_status(status);
                }
                if let Some((key, descending)) = sort {
                    query = query.with_sort(if descending {
                        SortSpec::descending(key)
                    } else {
                        SortSpec::ascending(key)
                    });
                }
                query
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// The result is a subset of the input: every returned entity is an
        /// unmodified member of the collection, and ids are not duplicated.
        #[test]
        fn prop_query_output_is_a_subset(
            samples in prop::collection::vec(arb_sample(), 0..20),
            query in arb_query(),
        ) {
            let result = query.run(&samples);
            prop_assert!(result.len() <= samples.len());
            for entity in &result {
                prop_assert!(samples.contains(entity));
            }
            let mut ids: Vec<_> = result.iter().map(|s| s.id).collect();
            ids.sort();
            ids.dedup();
            prop_assert_eq!(ids.len(), result.len());
        }

        /// Running a query on its own output changes nothing.
        #[test]
        fn prop_query_is_idempotent(
            samples in prop::collection::vec(arb_sample(), 0..20),
            query in arb_query(),
        ) {
            let once = query.run(&samples);
            let twice = query.run(&once);
            prop_assert_eq!(once, twice);
        }

        /// With no sort key the input order is preserved.
        #[test]
        fn prop_unsorted_query_preserves_order(
            samples in prop::collection::vec(arb_sample(), 0..20),
        ) {
            let query: Query<Sample> = Query::new();
            prop_assert_eq!(query.run(&samples), samples);
        }

        /// Equal sort keys keep their relative input order (stability).
        #[test]
        fn prop_sort_is_stable(
            samples in prop::collection::vec(arb_sample(), 0..20),
        ) {
            let query = Query::new().with_sort(SortSpec::ascending(SampleSortKey::Status));
            let sorted = query.run(&samples);

            let positions = |id| samples.iter().position(|s| s.id == id).unwrap();
            for pair in sorted.windows(2) {
                if pair[0].status == pair[1].status {
                    prop_assert!(positions(pair[0].id) < positions(pair[1].id));
                }
            }
        }

        /// On a tie-free key, flipping the direction reverses the list exactly.
        #[test]
        fn prop_direction_toggle_reverses_tie_free_sort(
            samples in prop::collection::vec(arb_sample(), 0..20),
        ) {
            // Names are made unique so the Name key has no ties.
            let samples: Vec<Sample> = samples
                .into_iter()
                .enumerate()
                .map(|(i, mut s)| {
                    s.name = format!("{}-{i}", s.name);
                    s
                })
                .collect();

            let asc = Query::new()
                .with_sort(SortSpec::ascending(SampleSortKey::Name))
                .run(&samples);
            let mut desc = Query::new()
                .with_sort(SortSpec::descending(SampleSortKey::Name))
                .run(&samples);
            desc.reverse();
            prop_assert_eq!(asc, desc);
        }
    }
}
