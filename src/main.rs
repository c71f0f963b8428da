use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use rayon::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use attitude_sim::dynamics::AnalyticRates;
use attitude_sim::io::{csv, json, SweepSummary};
use attitude_sim::sim::{self, SweepRun};
use attitude_sim::types::{InitialConditions, DEFAULT_HORIZON, DEFAULT_SPEED_KNOTS, REFERENCE_STEPS};

#[derive(Parser, Debug)]
#[command(name = "attitude-sim")]
#[command(about = "Rigid-body attitude kinematics: Euler angles, strapdown DCM and NED position")]
#[command(version)]
struct Args {
    /// Time step(s) to run, seconds. Repeat for a sweep.
    #[arg(long = "dt", num_args = 1.., default_values_t = REFERENCE_STEPS)]
    dts: Vec<f64>,

    /// Simulated horizon, seconds
    #[arg(long, default_value_t = DEFAULT_HORIZON)]
    horizon: f64,

    /// Forward speed along body x, knots
    #[arg(long, default_value_t = DEFAULT_SPEED_KNOTS)]
    speed_knots: f64,

    /// Output directory
    #[arg(short, long, default_value = "output")]
    output_dir: PathBuf,

    /// File stem for per-run CSV files
    #[arg(long, default_value = "attitude")]
    prefix: String,

    /// Run the step sizes in parallel
    #[arg(long)]
    parallel: bool,

    /// Also write summary.json
    #[arg(long)]
    summary: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let ic = InitialConditions::with_speed_knots(args.speed_knots);

    // One CSV per step size; repeats would race on the same file
    let dts = sim::unique_steps(&args.dts);
    if dts.len() < args.dts.len() {
        warn!(given = args.dts.len(), kept = dts.len(), "dropped repeated --dt values");
    }

    let runs = sim::sweep(&dts, args.horizon, &ic, &AnalyticRates, args.parallel)
        .context("simulation failed")?;

    std::fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("creating {}", args.output_dir.display()))?;

    let write = |run: &SweepRun| -> Result<PathBuf> {
        let path = run_path(&args.output_dir, &args.prefix, run.config.dt);
        csv::write_records_file(&path, &run.records)
            .with_context(|| format!("writing {}", path.display()))?;
        info!(dt = run.config.dt, rows = run.records.len(), path = %path.display(), "wrote run");
        Ok(path)
    };
    let paths: Vec<PathBuf> = if args.parallel {
        runs.par_iter().map(write).collect::<Result<_>>()?
    } else {
        runs.iter().map(write).collect::<Result<_>>()?
    };

    let summary = SweepSummary::from_runs(args.horizon, &runs);
    if args.summary {
        let path = args.output_dir.join("summary.json");
        json::write_summary_file(&path, &summary)
            .with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "wrote summary");
    }

    print_report(&summary, &paths);
    Ok(())
}

fn run_path(dir: &Path, prefix: &str, dt: f64) -> PathBuf {
    dir.join(format!("{}_dt{}.csv", prefix, dt))
}

fn print_report(summary: &SweepSummary, paths: &[PathBuf]) {
    println!();
    println!("====================================================================");
    println!("  ATTITUDE KINEMATICS SWEEP  (horizon {:.1} s)", summary.horizon);
    println!("====================================================================");
    println!(
        "  {:>8}  {:>6}  {:>11}  {:>11}  {:>11}  {:>10}",
        "dt (s)", "steps", "N (ft)", "E (ft)", "D (ft)", "Δ fine(ft)"
    );
    println!("  {}", "─".repeat(66));
    for s in &summary.runs {
        let [n, e, d] = s.final_pos_ned_ft;
        println!(
            "  {:>8.4}  {:>6}  {:>11.2}  {:>11.2}  {:>11.2}  {:>10.3}",
            s.dt,
            s.steps,
            n,
            e,
            d,
            s.pos_diff_vs_finest_ft.unwrap_or(f64::NAN),
        );
    }
    println!();
    for p in paths {
        println!("  -> {}", p.display());
    }
    println!("====================================================================");
    println!();
}
