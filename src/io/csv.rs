use std::io::Write;
use std::path::Path;

use crate::dynamics::state::StateRecord;
use crate::error::SimError;

pub const HEADER: [&str; 16] = [
    "time",
    "phi_deg",
    "theta_deg",
    "psi_deg",
    "p_dps",
    "q_dps",
    "r_dps",
    "phi_dot_dps",
    "theta_dot_dps",
    "psi_dot_dps",
    "vel_n_fps",
    "vel_e_fps",
    "vel_d_fps",
    "pos_n_ft",
    "pos_e_ft",
    "pos_d_ft",
];

/// Write records as CSV: one header row, then one row per step.
///
/// Every value is fixed-point with 6 decimals, columns in `HEADER` order.
pub fn write_records<W: Write>(writer: W, records: &[StateRecord]) -> Result<(), SimError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADER)?;

    for rec in records {
        let row = std::iter::once(rec.time)
            .chain(rec.euler_deg.iter().copied())
            .chain(rec.rates_deg.iter().copied())
            .chain(rec.euler_rate_deg.iter().copied())
            .chain(rec.vel_ned.iter().copied())
            .chain(rec.pos_ned.iter().copied())
            .map(|v| format!("{:.6}", v));
        wtr.write_record(row)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write records to a CSV file at the given path.
pub fn write_records_file(path: impl AsRef<Path>, records: &[StateRecord]) -> Result<(), SimError> {
    let file = std::fs::File::create(path)?;
    write_records(std::io::BufWriter::new(file), records)
}
