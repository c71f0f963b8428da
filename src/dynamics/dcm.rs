use nalgebra::Matrix3;

use crate::dynamics::state::BodyRates;

// ---------------------------------------------------------------------------
// Strapdown DCM kinematics
// ---------------------------------------------------------------------------

/// A DCM row with zero norm cannot be renormalized.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("DCM row {row} has zero norm")]
pub struct DegenerateRow {
    pub row: usize,
}

/// Cross-product operator for the body rate vector:
///
///   [  0  -r   q ]
///   [  r   0  -p ]
///   [ -q   p   0 ]
pub fn skew(w: &BodyRates) -> Matrix3<f64> {
    Matrix3::new(
        0.0, -w.r, w.q,
        w.r, 0.0, -w.p,
        -w.q, w.p, 0.0,
    )
}

pub fn mat_mul(a: &Matrix3<f64>, b: &Matrix3<f64>) -> Matrix3<f64> {
    a * b
}

/// One strapdown update: Ċ = C·S, C' = C + Ċ·dt, then row renormalization.
///
/// First-order in dt (not RK4).
pub fn step(c: &Matrix3<f64>, w: &BodyRates, dt: f64) -> Result<Matrix3<f64>, DegenerateRow> {
    let c_dot = mat_mul(c, &skew(w));
    normalize(&(c + c_dot * dt))
}

/// Rescale each row to unit length independently.
///
/// Rows are not re-orthogonalized against each other, so this only
/// approximates an orthonormal matrix; cross-row drift accumulates over
/// many steps (see [`orthogonality_error`]).
pub fn normalize(c: &Matrix3<f64>) -> Result<Matrix3<f64>, DegenerateRow> {
    let mut out = *c;
    for i in 0..3 {
        let n = out.row(i).norm();
        if n == 0.0 {
            return Err(DegenerateRow { row: i });
        }
        out.row_mut(i).unscale_mut(n);
    }
    Ok(out)
}

/// Largest deviation of a row norm from 1.
pub fn row_norm_error(c: &Matrix3<f64>) -> f64 {
    (0..3)
        .map(|i| (c.row(i).norm() - 1.0).abs())
        .fold(0.0_f64, f64::max)
}

/// Largest |rᵢ·rⱼ| over distinct rows; zero for an orthonormal matrix.
pub fn orthogonality_error(c: &Matrix3<f64>) -> f64 {
    [(0, 1), (0, 2), (1, 2)]
        .iter()
        .map(|&(i, j)| c.row(i).dot(&c.row(j)).abs())
        .fold(0.0_f64, f64::max)
}
