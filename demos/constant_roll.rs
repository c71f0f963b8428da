use attitude_sim::dynamics::{dcm, RateProfile};
use attitude_sim::sim::Simulation;
use attitude_sim::types::{BodyRates, InitialConditions, SimConfig};

/// Steady roll with a small pitch wobble.
struct RollWobble {
    roll_rate: f64,
    wobble: f64,
}

impl RateProfile for RollWobble {
    fn rates(&self, t: f64) -> BodyRates {
        BodyRates::new(self.roll_rate, self.wobble * t.sin(), 0.0)
    }

    fn name(&self) -> &str {
        "roll-wobble"
    }
}

fn main() {
    let profile = RollWobble { roll_rate: 0.5, wobble: 0.1 };
    let config = SimConfig { dt: 0.05, horizon: 30.0 };
    let ic = InitialConditions::default();

    println!("Simulating with {} profile...", profile.name());
    let mut sim = Simulation::new(&config, &ic, &profile).expect("Invalid config");

    while let Some(rec) = sim.next() {
        let rec = rec.expect("Step failed");
        let step = sim.state().step;
        if step % 100 == 0 {
            let c = &sim.state().dcm;
            println!(
                "t={:>5.1}s  φ={:>8.2}°  θ={:>7.2}°  ψ={:>8.2}°  ortho err={:.2e}",
                rec.time,
                rec.euler_deg.x,
                rec.euler_deg.y,
                rec.euler_deg.z,
                dcm::orthogonality_error(c),
            );
        }
    }
}
