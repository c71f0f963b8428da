use approx::assert_relative_eq;

use attitude_sim::dynamics::{AnalyticRates, BodyRates, ConstantRates};
use attitude_sim::io::{csv, json, SweepSummary};
use attitude_sim::sim;
use attitude_sim::types::{InitialConditions, SimConfig, DEFAULT_HORIZON, REFERENCE_STEPS};

#[test]
fn reference_sweep_writes_one_file_per_step() {
    let dir = tempfile::tempdir().unwrap();
    let runs = sim::sweep(
        &REFERENCE_STEPS,
        DEFAULT_HORIZON,
        &InitialConditions::default(),
        &AnalyticRates,
        true,
    )
    .unwrap();

    for run in &runs {
        let path = dir.path().join(format!("attitude_dt{}.csv", run.config.dt));
        csv::write_records_file(&path, &run.records).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), run.config.total_steps() + 1);
        assert!(lines[0].starts_with("time,phi_deg,theta_deg,psi_deg,"));
        assert!(lines[1].starts_with("0.000000,0.000000,0.000000,0.000000,900.000000,"));
    }

    let summary = SweepSummary::from_runs(DEFAULT_HORIZON, &runs);
    let path = dir.path().join("summary.json");
    json::write_summary_file(&path, &summary).unwrap();
    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["runs"].as_array().unwrap().len(), REFERENCE_STEPS.len());
}

#[test]
fn last_row_at_fifty_nine_point_nine() {
    let traj = sim::simulate(&SimConfig::new(0.1)).unwrap();
    assert_eq!(traj.len(), 600);
    assert_relative_eq!(traj[599].time, 59.9, epsilon = 1e-9);

    let mut buf = Vec::new();
    csv::write_records(&mut buf, &traj).unwrap();
    let text = String::from_utf8(buf).unwrap();
    assert!(text.lines().last().unwrap().starts_with("59.900000,"));
}

#[test]
fn final_position_converges_as_dt_shrinks() {
    // Smooth, bounded rates keep the Euler path well away from gimbal lock.
    let profile = ConstantRates(BodyRates::new(0.0, 0.0, 0.1));
    let ic = InitialConditions::default();
    let steps = [0.1, 0.05, 0.025, 0.0125];
    let runs = sim::sweep(&steps, DEFAULT_HORIZON, &ic, &profile, false).unwrap();

    let finals: Vec<_> = runs
        .iter()
        .map(|r| r.records.last().unwrap().pos_ned)
        .collect();
    let gap = |a: usize, b: usize| (finals[a] - finals[b]).norm();

    assert!(gap(0, 3) > gap(1, 3), "{} vs {}", gap(0, 3), gap(1, 3));
    assert!(gap(1, 3) > gap(2, 3), "{} vs {}", gap(1, 3), gap(2, 3));
}

#[test]
fn halving_dt_keeps_trajectory_shape() {
    // A slow banked climbing turn, so both step sizes resolve the motion
    let profile = ConstantRates(BodyRates::new(0.05, 0.02, 0.1));
    let ic = InitialConditions::default();
    let runs = sim::sweep(&[0.1, 0.05], DEFAULT_HORIZON, &ic, &profile, false).unwrap();
    let (coarse, fine) = (&runs[0].records, &runs[1].records);
    assert_eq!(fine.len(), 2 * coarse.len());

    let mut max_heading_deg = 0.0_f64;
    for (i, c) in coarse.iter().enumerate() {
        let f = &fine[2 * i];
        assert_relative_eq!(c.time, f.time, epsilon = 1e-9);
        // Euler angles come from RK4 with constant rates: agree to well under a microdegree
        for k in 0..3 {
            assert!(
                (c.euler_deg[k] - f.euler_deg[k]).abs() < 1e-6,
                "t={} axis {}: {} vs {}",
                c.time,
                k,
                c.euler_deg[k],
                f.euler_deg[k]
            );
        }
        // First-order DCM: direction of travel agrees within a degree
        let cos = c.vel_ned.dot(&f.vel_ned) / (c.vel_ned.norm() * f.vel_ned.norm());
        max_heading_deg = max_heading_deg.max(cos.clamp(-1.0, 1.0).acos().to_degrees());
    }
    assert!(max_heading_deg < 1.0, "heading gap {} deg", max_heading_deg);

    // The turn is real: at some point the vehicle flies back toward its start
    let v0 = coarse[0].vel_ned;
    assert!(coarse.iter().any(|r| r.vel_ned.dot(&v0) < 0.0));

    // Final positions within 1% of the displacement
    let end_c = coarse.last().unwrap().pos_ned;
    let end_f = fine.last().unwrap().pos_ned;
    assert!(
        (end_c - end_f).norm() < 0.01 * end_f.norm(),
        "{} ft apart over {} ft",
        (end_c - end_f).norm(),
        end_f.norm()
    );
}
