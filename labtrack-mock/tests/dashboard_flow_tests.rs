//! End-to-end tests for the dashboard data flow: generate an inventory,
//! then run the same queries and aggregations the views run.

use chrono::Utc;
use labtrack_analytics::{
    expiring_samples, experiment_success_rates, experiments_by_status, experiments_timeline,
    recent_activity, samples_by_type, samples_timeline, DashboardSummary,
};
use labtrack_core::{DashboardConfig, ExperimentStatus, Sample, SampleStatus, SampleType};
use labtrack_mock::MockDataBuilder;
use labtrack_query::{Query, SampleSortKey, SortSpec};

fn seeded_inventory() -> labtrack_store::Inventory {
    MockDataBuilder::new().with_seed(1234).build()
}

#[test]
fn samples_page_filters_and_sorts() {
    let inventory = seeded_inventory();
    let samples = inventory.samples();

    // Default view: newest first, everything visible.
    let view = Query::<Sample>::new()
        .with_sort(SortSpec::descending(SampleSortKey::CreatedAt))
        .run(&samples);
    assert_eq!(view.len(), samples.len());
    for pair in view.windows(2) {
        assert!(pair[0].created_at >= pair[1].created_at);
    }

    // Narrowing by type and status only ever shrinks the view.
    let narrowed = Query::<Sample>::new()
        .with_kind(SampleType::Blood)
        .with_status(SampleStatus::Active)
        .run(&samples);
    assert!(narrowed.len() <= view.len());
    for sample in &narrowed {
        assert_eq!(sample.sample_type, SampleType::Blood);
        assert_eq!(sample.status, SampleStatus::Active);
    }
}

#[test]
fn dashboard_metrics_agree_with_collections() {
    let inventory = seeded_inventory();
    let samples = inventory.samples();
    let experiments = inventory.experiments();

    let summary = DashboardSummary::compute(&samples, &experiments);
    assert_eq!(summary.total_samples as usize, samples.len());
    assert_eq!(summary.total_experiments as usize, experiments.len());
    assert!(summary.overall_success_rate <= 100);

    let by_type = samples_by_type(&samples);
    assert_eq!(by_type.total() as usize, samples.len());

    let by_status = experiments_by_status(&experiments);
    assert_eq!(by_status.total() as usize, experiments.len());

    let rates = experiment_success_rates(&experiments);
    for (_, rate) in &rates.entries {
        assert!(*rate <= 100);
    }
}

#[test]
fn timeline_charts_cover_the_generated_span() {
    let inventory = seeded_inventory();
    let config = DashboardConfig::default();
    let now = Utc::now();

    // Experiments start within the trailing 60 days, well inside the
    // 12-week timeline, so every start lands in a bucket.
    let experiments = inventory.experiments();
    let timeline = experiments_timeline(&experiments, &config, now);
    assert_eq!(
        timeline.counts.iter().sum::<u64>() as usize,
        experiments.len()
    );

    // Samples are created within the trailing 100 days; the monthly chart
    // spans 360 days, so the same holds.
    let samples = inventory.samples();
    let timeline = samples_timeline(&samples, &config, now);
    assert_eq!(timeline.counts.iter().sum::<u64>() as usize, samples.len());
}

#[test]
fn activity_feed_and_alerts_are_well_formed() {
    let inventory = seeded_inventory();
    let config = DashboardConfig::default();
    let samples = inventory.samples();
    let experiments = inventory.experiments();

    let feed = recent_activity(&samples, &experiments, config.recent_activity_limit);
    assert_eq!(feed.len(), config.recent_activity_limit);
    for pair in feed.windows(2) {
        assert!(pair[0].occurred_at >= pair[1].occurred_at);
    }

    let now = Utc::now();
    let alerts = expiring_samples(&samples, now, config.expiry_warning_days);
    for alert in &alerts {
        assert!(alert.days_left >= 0);
        assert!(alert.days_left <= config.expiry_warning_days);
        let sample = inventory.sample(alert.sample_id).unwrap();
        assert!(sample.status.in_circulation());
    }
}

#[test]
fn detail_pages_resolve_relationships() {
    let inventory = seeded_inventory();

    for experiment in inventory.iter_experiments() {
        let related = inventory.samples_for_experiment(experiment.id);
        assert_eq!(related.len(), experiment.sample_ids.len());
    }

    for sample in inventory.iter_samples() {
        let experiments = inventory.experiments_for_sample(sample.id);
        assert_eq!(experiments.len(), sample.experiment_ids.len());
        if sample.parent_id.is_some() {
            assert!(inventory.parent_of(sample.id).is_some());
            assert!(inventory.ancestry(sample.id).is_ok());
        }
    }
}

#[test]
fn completed_experiments_carry_results_with_consistent_payloads() {
    let inventory = seeded_inventory();
    for experiment in inventory.iter_experiments() {
        for result in &experiment.results {
            assert_eq!(experiment.status, ExperimentStatus::Completed);
            match result.result_type {
                labtrack_core::ResultType::Numeric => {
                    assert!(matches!(result.data, labtrack_core::ResultData::Numeric(_)));
                }
                _ => {
                    assert!(matches!(result.data, labtrack_core::ResultData::Text(_)));
                }
            }
        }
    }
}
