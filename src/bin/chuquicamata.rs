//! Monte Carlo recovery evaluation of the Chuquicamata laboratory curve.
//!
//! Runs the full analysis pipeline on the bundled template: curve fit,
//! single simulation with the historical plant defaults, sensitivity sweep,
//! and the two-scenario economic comparison.

use florec::prelude::*;
use florec::sensitivity::mean_groups;
use florec::{economic, sensitivity, simulation};

const SEED: u64 = 42;

fn main() -> florec::Result<()> {
    florec::init_logger();

    let curve = CurveModel::build(ControlCurve::chuquicamata())?;
    let (lo, hi) = curve.knot_span();
    println!("=== Chuquicamata recovery model ===");
    println!("knot span:          [{lo}, {hi}]");
    println!("lower domain root:  {:.2}", curve.lower_domain_limit());
    println!("upper domain limit: {:.2}", curve.upper_domain_limit());
    println!();

    // Flotation model: one run with the historical plant defaults.
    let params = DistributionParams::new(200.0, 15.0, 1000)?;
    let result = simulation::simulate_seeded(&curve, &params, SEED);
    println!("=== Simulation (mean 200, std 15, n 1000) ===");
    println!("valid samples:      {}", result.valid_count);
    match result.mean_recovery {
        Some(mean) => println!("simulated recovery: {mean}%"),
        None => println!("simulated recovery: undefined (no valid samples)"),
    }
    println!();

    // Sensitivity surface over the default analysis ranges.
    let sweep_params = SweepParams::new((100.0, 250.0), (1.0, 30.0), 1000);
    let table = sensitivity::sweep(&curve, &sweep_params, SEED)?;
    println!("=== Sensitivity (recovery vs P80 std, per mean) ===");
    for group in mean_groups(&table, sweep_params.steps_per_std) {
        let first = &group[0];
        let last = &group[group.len() - 1];
        println!(
            "P80 mean {:>5.0}: recovery {:?} at std {:>4.1} -> {:?} at std {:>4.1}",
            first.mean, first.mean_recovery, first.std, last.mean_recovery, last.std
        );
    }
    let json = serde_json::to_string_pretty(&table).expect("sensitivity table serializes");
    println!("{json}");
    println!();

    // Economic comparison of a dispersion-reduction strategy.
    let inputs = EconomicInputs {
        mean: 180.0,
        std_a: 35.0,
        std_b: 15.0,
        sample_count: 1000,
        throughput_tpd: 180_000.0,
        grade_pct: 0.9,
        price_per_lb: 4.86,
    };
    let delta = economic::compare(&curve, &inputs, SEED)?;
    println!("=== Economic evaluation (std {} -> {}) ===", inputs.std_a, inputs.std_b);
    match (
        delta.recovery_delta,
        delta.incremental_metal_tpd,
        delta.incremental_revenue_per_day,
        delta.incremental_revenue_per_year,
    ) {
        (Some(rec), Some(metal), Some(day), Some(year)) => {
            println!("recovery difference:     {rec:.2} pp");
            println!("additional fine copper:  {metal:.2} tpd");
            println!("additional daily income: {day:.0} US$/day");
            println!("additional yearly income:{year:.0} US$/year");
            println!(
                "outcome:                 {}",
                if delta.is_favorable() { "favorable" } else { "unfavorable" }
            );
        }
        _ => println!("comparison undefined: a scenario produced no valid samples"),
    }

    Ok(())
}
