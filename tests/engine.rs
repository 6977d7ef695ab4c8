//! End-to-end tests of the recovery estimation pipeline.

use florec::prelude::*;
use florec::rayon::prelude::*;
use florec::sensitivity::{self, DEFAULT_STEPS_PER_MEAN, DEFAULT_STEPS_PER_STD};
use florec::{economic, simulation};
use itertools::Itertools;

fn chuquicamata() -> CurveModel {
    CurveModel::build(ControlCurve::chuquicamata()).unwrap()
}

#[test]
fn curve_reproduces_every_control_point() {
    for curve in [
        ControlCurve::chuquicamata(),
        ControlCurve::el_salvador(),
        ControlCurve::disputada(),
    ] {
        let model = CurveModel::build(curve.clone()).unwrap();
        for point in curve.points() {
            assert!(
                (model.recovery_at(point.p80) - point.recovery).abs() < 1e-9,
                "recovery_at({}) diverged from the lab table",
                point.p80
            );
        }
    }
}

#[test]
fn chuquicamata_anchor_values() {
    let model = chuquicamata();
    assert_eq!(model.recovery_at(100.0), 90.0);
    assert_eq!(model.recovery_at(20.0), 30.0);
}

#[test]
fn non_increasing_points_are_rejected() {
    let err = ControlCurve::from_pairs([(20.0, 30.0), (15.0, 40.0), (50.0, 66.0)]).unwrap_err();
    assert!(matches!(err, Error::InvalidCurve(_)));
}

#[test]
fn malformed_params_are_rejected() {
    assert!(matches!(
        DistributionParams::new(200.0, 15.0, 0).unwrap_err(),
        Error::InvalidParams(_)
    ));
    assert!(matches!(
        DistributionParams::new(200.0, -1.0, 1000).unwrap_err(),
        Error::InvalidParams(_)
    ));
}

#[test]
fn tight_distribution_converges_to_the_point_estimate() {
    let model = chuquicamata();
    let expected = model.recovery_at(150.0);
    let params = DistributionParams::new(150.0, 1e-6, 10_000).unwrap();
    let result = simulation::simulate_seeded(&model, &params, 42);
    assert!(
        (result.mean_recovery.unwrap() - expected).abs() < 0.01,
        "mean recovery {:?} should converge to {expected}",
        result.mean_recovery
    );
}

#[test]
fn narrower_dispersion_beats_wider_at_the_peak() {
    // At a mean on the flat top of the curve, spreading mass into the
    // falling flanks can only lose recovery.
    let model = chuquicamata();
    let narrow = DistributionParams::new(125.0, 2.0, 20_000).unwrap();
    let wide = DistributionParams::new(125.0, 60.0, 20_000).unwrap();
    let r_narrow = simulation::simulate_seeded(&model, &narrow, 42)
        .mean_recovery
        .unwrap();
    let r_wide = simulation::simulate_seeded(&model, &wide, 42)
        .mean_recovery
        .unwrap();
    assert!(
        r_narrow > r_wide,
        "narrow {r_narrow} should beat wide {r_wide}"
    );
}

#[test]
fn sweep_grid_order_supports_grouping_by_mean() {
    let model = chuquicamata();
    let params = SweepParams::new((100.0, 250.0), (1.0, 30.0), 500);
    let table = sensitivity::sweep(&model, &params, 42).unwrap();

    assert_eq!(table.len(), DEFAULT_STEPS_PER_MEAN * DEFAULT_STEPS_PER_STD);

    // Exactly 4 distinct means, each a contiguous run of steps_per_std rows.
    let group_sizes: Vec<usize> = table
        .iter()
        .chunk_by(|row| row.mean.to_bits())
        .into_iter()
        .map(|(_, group)| group.count())
        .collect();
    assert_eq!(group_sizes, vec![DEFAULT_STEPS_PER_STD; DEFAULT_STEPS_PER_MEAN]);

    let means: Vec<f64> = table
        .iter()
        .map(|row| row.mean)
        .dedup()
        .collect();
    assert_eq!(means, vec![100.0, 150.0, 200.0, 250.0]);
}

#[test]
fn economic_revenue_sign_tracks_recovery_delta() {
    let model = chuquicamata();
    let inputs = EconomicInputs {
        mean: 180.0,
        std_a: 35.0,
        std_b: 15.0,
        sample_count: 10_000,
        throughput_tpd: 180_000.0,
        grade_pct: 0.9,
        price_per_lb: 4.86,
    };
    let delta = economic::compare(&model, &inputs, 42).unwrap();
    let rec = delta.recovery_delta.unwrap();
    let day = delta.incremental_revenue_per_day.unwrap();
    assert_eq!(day.signum(), rec.signum());

    // Same seed, same figures.
    let again = economic::compare(&model, &inputs, 42).unwrap();
    assert_eq!(delta, again);
}

#[test]
fn curve_model_is_shared_across_threads() {
    let model = chuquicamata();
    let params = DistributionParams::new(180.0, 20.0, 2000).unwrap();

    // Unsynchronized concurrent reads of one immutable model.
    let recoveries: Vec<Option<f64>> = (0u64..8)
        .into_par_iter()
        .map(|seed| simulation::simulate_seeded(&model, &params, seed).mean_recovery)
        .collect();

    assert_eq!(recoveries.len(), 8);
    assert!(recoveries.iter().all(|r| r.is_some()));
}

#[test]
fn zero_valid_samples_is_not_an_error() {
    let model = chuquicamata();
    let upper = model.upper_domain_limit();
    let params = DistributionParams::new(upper + 500.0, 1.0, 1000).unwrap();
    let result = simulation::simulate_seeded(&model, &params, 42);
    assert_eq!(result.mean_recovery, None);
    assert_eq!(result.valid_count, 0);
}

#[test]
fn default_nodes_feed_the_full_pipeline() {
    for n in 3..=8 {
        let model = CurveModel::from_points(default_nodes(n)).unwrap();
        let params = DistributionParams::new(120.0, 10.0, 1000).unwrap();
        let result = simulation::simulate_seeded(&model, &params, 1);
        assert!(
            result.mean_recovery.is_some(),
            "defaults for {n} nodes should simulate cleanly"
        );
    }
}
