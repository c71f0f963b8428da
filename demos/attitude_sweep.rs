use attitude_sim::dynamics::AnalyticRates;
use attitude_sim::io::SweepSummary;
use attitude_sim::sim;
use attitude_sim::types::{InitialConditions, DEFAULT_HORIZON, REFERENCE_STEPS};

fn main() {
    let ic = InitialConditions::default();
    println!("Sweeping dt over {:?} ...", REFERENCE_STEPS);

    let runs = sim::sweep(&REFERENCE_STEPS, DEFAULT_HORIZON, &ic, &AnalyticRates, true)
        .expect("Simulation failed");
    let summary = SweepSummary::from_runs(DEFAULT_HORIZON, &runs);

    for s in &summary.runs {
        let [n, e, d] = s.final_pos_ned_ft;
        let dcm = s.dcm.expect("sweep runs carry DCM health");
        println!(
            "dt={:<7} steps={:<5} pos=({:>9.2}, {:>9.2}, {:>9.2}) ft  Δfine={:>8.3} ft  ortho err={:.2e}",
            s.dt,
            s.steps,
            n,
            e,
            d,
            s.pos_diff_vs_finest_ft.unwrap_or(0.0),
            dcm.max_orthogonality_error,
        );
    }
}
