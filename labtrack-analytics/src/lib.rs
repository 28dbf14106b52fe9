//! LabTrack Analytics - Aggregation Engine
//!
//! Pure functions that reduce entity collections to labeled numeric series
//! for chart and dashboard consumption: category counts, trailing
//! time-window counts, success-rate ratios, the dashboard summary, the
//! recent-activity feed, and expiry alerts.
//!
//! Every operation is total: empty collections, zero matches, and zero
//! denominators all produce well-defined values, never errors. Callers pass
//! `now` explicitly; nothing in here reads the clock.

use chrono::Duration;
use labtrack_core::{
    DashboardConfig, EntityKind, Experiment, ExperimentStatus, Sample, SampleId, Timestamp,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// CATEGORY SERIES
// ============================================================================

/// An ordered label/value series. Labels appear in first-observed order;
/// values are counts or whole-number percentages depending on the producer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CategorySeries {
    pub entries: Vec<(String, u64)>,
}

impl CategorySeries {
    /// Labels, in series order.
    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|(label, _)| label.as_str()).collect()
    }

    /// Values, in series order.
    pub fn values(&self) -> Vec<u64> {
        self.entries.iter().map(|(_, value)| *value).collect()
    }

    /// Value for a label, if the label is present.
    pub fn get(&self, label: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, value)| *value)
    }

    /// Sum of all values.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, value)| value).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn bump(&mut self, label: &str, amount: u64) {
        match self.entries.iter_mut().find(|(l, _)| l == label) {
            Some((_, value)) => *value += amount,
            None => self.entries.push((label.to_string(), amount)),
        }
    }
}

/// Partition a collection by a categorical label and count membership.
///
/// Labels occur in first-observed order. Values observed zero times are
/// absent, not present with a zero. The counts sum to the collection size.
pub fn count_by_label<E>(entities: &[E], label_fn: impl Fn(&E) -> &str) -> CategorySeries {
    let mut series = CategorySeries::default();
    for entity in entities {
        series.bump(label_fn(entity), 1);
    }
    series
}

/// Per-category ratio as a whole-number percentage.
///
/// For each first-observed label the value is
/// `round(numerator / denominator * 100)`, counting entities that satisfy
/// each predicate. A category with a zero denominator reports 0 rather than
/// an error or NaN. Every label observed in the collection is present, even
/// when its denominator is empty.
pub fn rate_by_label<E>(
    entities: &[E],
    label_fn: impl Fn(&E) -> &str,
    numerator: impl Fn(&E) -> bool,
    denominator: impl Fn(&E) -> bool,
) -> CategorySeries {
    let mut numerators = CategorySeries::default();
    let mut denominators = CategorySeries::default();
    for entity in entities {
        let label = label_fn(entity);
        numerators.bump(label, 0);
        denominators.bump(label, 0);
        if numerator(entity) {
            numerators.bump(label, 1);
        }
        if denominator(entity) {
            denominators.bump(label, 1);
        }
    }

    let entries = numerators
        .entries
        .into_iter()
        .map(|(label, numer)| {
            let denom = denominators.get(&label).unwrap_or(0);
            let rate = if denom == 0 {
                0
            } else {
                (numer as f64 / denom as f64 * 100.0).round() as u64
            };
            (label, rate)
        })
        .collect();

    CategorySeries { entries }
}

// ============================================================================
// TIME WINDOWS
// ============================================================================

/// Counts over equal-length trailing time windows ending at `now`,
/// indexed oldest (0) to newest (len - 1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowCounts {
    /// Newest whole-day mark of each window, oldest window first. Charts
    /// use these as axis labels.
    pub marks: Vec<Timestamp>,
    pub counts: Vec<u64>,
}

/// Count entities whose date falls within each of `windows` trailing
/// windows of `window_days` days ending at `now`.
///
/// An entity `d` whole days old (floor of the elapsed time) lands in the
/// bucket `windows - 1 - d / window_days`; integer division puts a date
/// exactly `k * window_days` days old in the window opening at that
/// boundary. Future dates and dates older than the full span are excluded
/// from every bucket, so the counts sum to at most the collection size.
pub fn count_by_window<E>(
    entities: &[E],
    date_fn: impl Fn(&E) -> Timestamp,
    now: Timestamp,
    windows: usize,
    window_days: i64,
) -> WindowCounts {
    let mut counts = vec![0u64; windows];
    let span_days = windows as i64 * window_days;

    for entity in entities {
        let date = date_fn(entity);
        if date > now {
            continue;
        }
        let days_old = (now - date).num_days();
        if days_old >= span_days {
            continue;
        }
        let index = windows - 1 - (days_old / window_days) as usize;
        counts[index] += 1;
    }

    let marks = (0..windows)
        .map(|i| now - Duration::days((windows as i64 - 1 - i as i64) * window_days))
        .collect();

    WindowCounts { marks, counts }
}

// ============================================================================
// CHART WRAPPERS
// ============================================================================

/// Samples-by-type doughnut data.
pub fn samples_by_type(samples: &[Sample]) -> CategorySeries {
    count_by_label(samples, |s| s.sample_type.as_str())
}

/// Samples-by-status bar data.
pub fn samples_by_status(samples: &[Sample]) -> CategorySeries {
    count_by_label(samples, |s| s.status.as_str())
}

/// Experiments-by-type bar data.
pub fn experiments_by_type(experiments: &[Experiment]) -> CategorySeries {
    count_by_label(experiments, |e| e.experiment_type.as_str())
}

/// Experiments-by-status doughnut data.
pub fn experiments_by_status(experiments: &[Experiment]) -> CategorySeries {
    count_by_label(experiments, |e| e.status.as_str())
}

/// Success rate per experiment type: COMPLETED over COMPLETED + FAILED,
/// as whole-number percentages.
pub fn experiment_success_rates(experiments: &[Experiment]) -> CategorySeries {
    rate_by_label(
        experiments,
        |e| e.experiment_type.as_str(),
        |e| e.status == ExperimentStatus::Completed,
        |e| matches!(
            e.status,
            ExperimentStatus::Completed | ExperimentStatus::Failed
        ),
    )
}

/// Experiments-started timeline over the configured trailing windows.
pub fn experiments_timeline(
    experiments: &[Experiment],
    config: &DashboardConfig,
    now: Timestamp,
) -> WindowCounts {
    count_by_window(
        experiments,
        |e| e.started_at,
        now,
        config.timeline_windows,
        config.timeline_window_days,
    )
}

/// Samples-created timeline over the configured trailing windows.
pub fn samples_timeline(
    samples: &[Sample],
    config: &DashboardConfig,
    now: Timestamp,
) -> WindowCounts {
    count_by_window(
        samples,
        |s| s.created_at,
        now,
        config.monthly_windows,
        config.monthly_window_days,
    )
}

// ============================================================================
// DASHBOARD SUMMARY
// ============================================================================

/// Headline metrics shown at the top of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DashboardSummary {
    pub total_samples: u64,
    pub active_samples: u64,
    pub total_experiments: u64,
    pub experiments_in_progress: u64,
    pub completed_experiments: u64,
    pub failed_experiments: u64,
    /// round(completed / (completed + failed) * 100); 0 when nothing has
    /// finished yet.
    pub overall_success_rate: u64,
}

impl DashboardSummary {
    /// Compute the summary for the current collections.
    pub fn compute(samples: &[Sample], experiments: &[Experiment]) -> Self {
        let count_status = |status: ExperimentStatus| {
            experiments.iter().filter(|e| e.status == status).count() as u64
        };
        let completed = count_status(ExperimentStatus::Completed);
        let failed = count_status(ExperimentStatus::Failed);
        let finished = completed + failed;
        let overall_success_rate = if finished == 0 {
            0
        } else {
            (completed as f64 / finished as f64 * 100.0).round() as u64
        };

        Self {
            total_samples: samples.len() as u64,
            active_samples: samples
                .iter()
                .filter(|s| s.status == labtrack_core::SampleStatus::Active)
                .count() as u64,
            total_experiments: experiments.len() as u64,
            experiments_in_progress: count_status(ExperimentStatus::InProgress),
            completed_experiments: completed,
            failed_experiments: failed,
            overall_success_rate,
        }
    }
}

// ============================================================================
// RECENT ACTIVITY
// ============================================================================

/// One row of the recent-activity feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub kind: EntityKind,
    pub id: Uuid,
    pub name: String,
    pub occurred_at: Timestamp,
    pub status_label: String,
}

/// Merge sample creations and experiment starts into one feed, newest
/// first, truncated to `limit`. The merge sort is stable, so entries with
/// identical timestamps keep samples before experiments.
pub fn recent_activity(
    samples: &[Sample],
    experiments: &[Experiment],
    limit: usize,
) -> Vec<ActivityEntry> {
    let mut entries: Vec<ActivityEntry> = samples
        .iter()
        .map(|s| ActivityEntry {
            kind: EntityKind::Sample,
            id: s.id,
            name: s.name.clone(),
            occurred_at: s.created_at,
            status_label: s.status.as_str().to_string(),
        })
        .chain(experiments.iter().map(|e| ActivityEntry {
            kind: EntityKind::Experiment,
            id: e.id,
            name: e.name.clone(),
            occurred_at: e.started_at,
            status_label: e.status.as_str().to_string(),
        }))
        .collect();

    entries.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
    entries.truncate(limit);
    entries
}

// ============================================================================
// EXPIRY ALERTS
// ============================================================================

/// A sample approaching its expiration date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpiryAlert {
    pub sample_id: SampleId,
    pub name: String,
    pub expires_at: Timestamp,
    /// Whole days until expiry, measured from `now`.
    pub days_left: i64,
}

/// Samples still in circulation whose expiry falls within `within_days`
/// days of `now`, soonest first. Already-expired dates (before `now`) are
/// not alerts; the status pass is expected to have marked those EXPIRED.
pub fn expiring_samples(samples: &[Sample], now: Timestamp, within_days: i64) -> Vec<ExpiryAlert> {
    let horizon = now + Duration::days(within_days);
    let mut alerts: Vec<ExpiryAlert> = samples
        .iter()
        .filter(|s| s.status.in_circulation())
        .filter_map(|s| {
            let expires_at = s.expires_at?;
            if expires_at < now || expires_at > horizon {
                return None;
            }
            Some(ExpiryAlert {
                sample_id: s.id,
                name: s.name.clone(),
                expires_at,
                days_left: (expires_at - now).num_days(),
            })
        })
        .collect();

    alerts.sort_by(|a, b| a.expires_at.cmp(&b.expires_at));
    alerts
}

// =============================================================================
// TESTS
// =============================================================================
