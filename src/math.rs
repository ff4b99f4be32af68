//! Mathematical utilities and the rotation matrix type

use nalgebra::Matrix3;

use crate::error::SolverError;

/// Mathematical constants
pub const DEG_TO_RAD: f64 = core::f64::consts::PI / 180.0;
pub const RAD_TO_DEG: f64 = 180.0 / core::f64::consts::PI;

/// 3x3 rotation matrix describing device orientation
///
/// Stored as an nalgebra [`Matrix3`]. Element indices used throughout the
/// crate (`R[0]..R[8]`) are row-major.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationMatrix(Matrix3<f32>);

impl RotationMatrix {
    pub fn identity() -> Self {
        Self(Matrix3::identity())
    }

    /// Build a matrix from 9 row-major elements
    ///
    /// # Example
    /// ```
    /// use device_rotation_vector::{RotationMatrix, SolverError};
    ///
    /// let r = RotationMatrix::from_row_major(&[1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
    /// assert_eq!(r, Ok(RotationMatrix::identity()));
    ///
    /// let err = RotationMatrix::from_row_major(&[1.0, 0.0, 0.0]);
    /// assert_eq!(err, Err(SolverError::InvalidMatrixShape { len: 3 }));
    /// ```
    pub fn from_row_major(elements: &[f32]) -> Result<Self, SolverError> {
        if elements.len() != 9 {
            return Err(SolverError::InvalidMatrixShape {
                len: elements.len(),
            });
        }
        Ok(Self(Matrix3::from_row_slice(elements)))
    }

    /// Build a matrix from a rotation vector `[x, y, z, (w), (heading accuracy)]`
    ///
    /// When the scalar part `w` is missing it is reconstructed from the unit
    /// norm constraint. The quaternion is used as given, not renormalised.
    pub fn from_rotation_vector(values: &[f32]) -> Result<Self, SolverError> {
        if !(3..=5).contains(&values.len()) {
            return Err(SolverError::InvalidRotationVector { len: values.len() });
        }

        let (q1, q2, q3) = (values[0], values[1], values[2]);
        let q0 = match values.get(3) {
            Some(&w) => w,
            None => {
                let w_squared = 1.0 - q1 * q1 - q2 * q2 - q3 * q3;
                if w_squared > 0.0 { w_squared.sqrt() } else { 0.0 }
            }
        };

        let sq_q1 = 2.0 * q1 * q1;
        let sq_q2 = 2.0 * q2 * q2;
        let sq_q3 = 2.0 * q3 * q3;
        let q1_q2 = 2.0 * q1 * q2;
        let q3_q0 = 2.0 * q3 * q0;
        let q1_q3 = 2.0 * q1 * q3;
        let q2_q0 = 2.0 * q2 * q0;
        let q2_q3 = 2.0 * q2 * q3;
        let q1_q0 = 2.0 * q1 * q0;

        // Matrix3::new takes its arguments row by row
        Ok(Self(Matrix3::new(
            1.0 - sq_q2 - sq_q3,
            q1_q2 - q3_q0,
            q1_q3 + q2_q0,
            q1_q2 + q3_q0,
            1.0 - sq_q1 - sq_q3,
            q2_q3 - q1_q0,
            q1_q3 - q2_q0,
            q2_q3 + q1_q0,
            1.0 - sq_q1 - sq_q2,
        )))
    }

    /// Row-major elements `R[0]..R[8]`
    pub fn as_row_major(&self) -> [f32; 9] {
        let m = &self.0;
        [
            m[(0, 0)],
            m[(0, 1)],
            m[(0, 2)],
            m[(1, 0)],
            m[(1, 1)],
            m[(1, 2)],
            m[(2, 0)],
            m[(2, 1)],
            m[(2, 2)],
        ]
    }

    pub fn matrix(&self) -> &Matrix3<f32> {
        &self.0
    }
}

impl From<Matrix3<f32>> for RotationMatrix {
    fn from(matrix: Matrix3<f32>) -> Self {
        Self(matrix)
    }
}
