//! Rotation matrix to device orientation conversion
//!
//! Decomposes a rotation matrix into the alpha/beta/gamma angles used for
//! device orientation (Z-X'-Y'' intrinsic rotations), taking care of the
//! cases where cos(beta) is negative, zero, or the matrix is in gimbal lock.

use core::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::error::SolverError;
use crate::math::{RAD_TO_DEG, RotationMatrix};
use crate::types::OrientationAngles;

/// Convert a rotation matrix into orientation angles in degrees
///
/// The branch order matters: the sign of `R[8]` (cos(beta) proxy) picks the
/// hemisphere, and when it is exactly zero the sign of `R[6]` decides
/// between the two gimbal-adjacent cases and true gimbal lock.
///
/// # Example
/// ```
/// use device_rotation_vector::{RotationMatrix, solve};
///
/// let angles = solve(&RotationMatrix::identity());
/// assert_eq!((angles.alpha, angles.beta, angles.gamma), (0.0, 0.0, 0.0));
/// ```
pub fn solve(matrix: &RotationMatrix) -> OrientationAngles {
    let r = matrix.as_row_major().map(f64::from);
    // Rounding can push a unit element just past 1 and make asin return NaN
    let sin_beta = r[7].clamp(-1.0, 1.0);

    let (mut alpha, beta, gamma);
    if r[8] > 0.0 {
        // cos(beta) > 0
        alpha = (-r[1]).atan2(r[4]);
        beta = sin_beta.asin();
        gamma = (-r[6]).atan2(r[8]);
    } else if r[8] < 0.0 {
        // cos(beta) < 0
        alpha = r[1].atan2(-r[4]);
        beta = reflect_beta(-sin_beta.asin());
        gamma = r[6].atan2(-r[8]);
    } else if r[6] > 0.0 {
        // cos(gamma) == 0, cos(beta) > 0
        alpha = (-r[1]).atan2(r[4]);
        beta = sin_beta.asin();
        gamma = -FRAC_PI_2;
    } else if r[6] < 0.0 {
        // cos(gamma) == 0, cos(beta) < 0
        alpha = r[1].atan2(-r[4]);
        beta = reflect_beta(-sin_beta.asin());
        gamma = -FRAC_PI_2;
    } else {
        // gimbal lock: cos(beta) == 0
        alpha = r[3].atan2(r[0]);
        beta = if r[7] > 0.0 { FRAC_PI_2 } else { -FRAC_PI_2 };
        gamma = 0.0;
    }

    // alpha is in [-pi, pi], bring it into [0, 2pi)
    if alpha < 0.0 {
        alpha += TAU;
    }

    OrientationAngles {
        alpha: wrap_degrees(alpha * RAD_TO_DEG, 360.0),
        beta: wrap_degrees(beta * RAD_TO_DEG, 180.0),
        gamma: gamma * RAD_TO_DEG,
    }
}

/// Convert 9 row-major elements into orientation angles in degrees
pub fn solve_row_major(elements: &[f32]) -> Result<OrientationAngles, SolverError> {
    RotationMatrix::from_row_major(elements).map(|matrix| solve(&matrix))
}

/// Move beta into [-pi, -pi/2) U (pi/2, pi]
fn reflect_beta(beta: f64) -> f64 {
    if beta >= 0.0 { beta - PI } else { beta + PI }
}

/// Keep a value that rounded onto its exclusive upper bound inside the range
fn wrap_degrees(angle: f64, upper: f64) -> f64 {
    if angle >= upper { angle - 360.0 } else { angle }
}
