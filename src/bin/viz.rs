use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotPoints};

use attitude_sim::dynamics::AnalyticRates;
use attitude_sim::sim::{self, SweepRun};
use attitude_sim::types::{InitialConditions, StateRecord, DEFAULT_HORIZON, REFERENCE_STEPS};

fn main() -> eframe::Result {
    let runs = match sim::sweep(
        &REFERENCE_STEPS,
        DEFAULT_HORIZON,
        &InitialConditions::default(),
        &AnalyticRates,
        true,
    ) {
        Ok(runs) => runs,
        Err(e) => {
            eprintln!("simulation failed: {}", e);
            std::process::exit(1);
        }
    };

    let app = SimViz { runs };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native("Attitude Kinematics", options, Box::new(|_| Ok(Box::new(app))))
}

struct SimViz {
    runs: Vec<SweepRun>,
}

impl SimViz {
    /// One line per run, decimated to ~2000 points.
    fn lines(&self, f: impl Fn(&StateRecord) -> [f64; 2]) -> Vec<(String, Vec<[f64; 2]>)> {
        self.runs
            .iter()
            .map(|run| {
                let step = (run.records.len() / 2000).max(1);
                let pts = run.records.iter().step_by(step).map(&f).collect();
                (format!("dt={}", run.config.dt), pts)
            })
            .collect()
    }

    fn plot(ui: &mut egui::Ui, id: &str, x_label: &str, w: f32, h: f32, lines: Vec<(String, Vec<[f64; 2]>)>) {
        Plot::new(id)
            .width(w)
            .height(h)
            .x_axis_label(x_label)
            .legend(Legend::default())
            .show(ui, |plot_ui| {
                for (name, pts) in lines {
                    plot_ui.line(Line::new(name, PlotPoints::from(pts)));
                }
            });
    }
}

impl eframe::App for SimViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.heading("Attitude kinematics sweep");
            let text: Vec<String> = self
                .runs
                .iter()
                .map(|r| format!("dt={} ({} steps)", r.config.dt, r.records.len()))
                .collect();
            ui.label(text.join("  |  "));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_size();
            let half_w = available.x / 2.0 - 8.0;
            let half_h = available.y / 2.0 - 24.0;

            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label("Pitch θ (deg)");
                    Self::plot(ui, "pitch", "Time (s)", half_w, half_h, self.lines(|r| [r.time, r.euler_deg.y]));
                });
                ui.vertical(|ui| {
                    ui.label("Roll φ (deg)");
                    Self::plot(ui, "roll", "Time (s)", half_w, half_h, self.lines(|r| [r.time, r.euler_deg.x]));
                });
            });

            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label("Yaw ψ (deg)");
                    Self::plot(ui, "yaw", "Time (s)", half_w, half_h, self.lines(|r| [r.time, r.euler_deg.z]));
                });
                ui.vertical(|ui| {
                    ui.label("Ground track, East vs North (ft)");
                    Self::plot(ui, "track", "East (ft)", half_w, half_h, self.lines(|r| [r.pos_ned.y, r.pos_ned.x]));
                });
            });
        });
    }
}
