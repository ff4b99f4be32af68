//! Device Rotation Vector - orientation angles from a rotation-vector sensor
//!
//! This library turns the readings of a platform rotation-vector sensor into
//! device orientation angles (alpha, beta, gamma in degrees) and wraps the
//! sensor in a start/stop listener that reports results and start-up
//! failures through callbacks.
//!
//! # Features
//!
//! - Rotation vector to rotation matrix conversion
//! - Rotation matrix to alpha/beta/gamma decomposition, including the
//!   gimbal-lock and cos(beta) <= 0 cases
//! - Listener state machine with an accuracy gate and a start timeout
//! - Pluggable sensor subsystem, timer and event sink traits
//! - Mutex-guarded handle for hosts that deliver callbacks on several threads
//!
//! # Quick Start
//!
//! ```rust
//! use device_rotation_vector::{RotationMatrix, solve};
//!
//! // Rotation vector reading: 90 degrees about Z
//! let half_angle = std::f32::consts::FRAC_PI_4;
//! let matrix = RotationMatrix::from_rotation_vector(&[0.0, 0.0, half_angle.sin()]).unwrap();
//!
//! let angles = solve(&matrix);
//! assert!((angles.alpha - 90.0).abs() < 1e-4);
//! assert!(angles.beta.abs() < 1e-4);
//! assert!(angles.gamma.abs() < 1e-4);
//! ```

mod command;
mod error;
mod listener;
mod math;
mod shared;
mod solver;
mod types;

// Re-export all public types and functions
pub use command::{Acknowledgement, Command};
pub use error::{ListenerError, SolverError};
pub use listener::{
    EventSink, OrientationListener, SensorEventListener, SensorManager, Timer, TimerHandle,
};
pub use math::{DEG_TO_RAD, RAD_TO_DEG, RotationMatrix};
pub use shared::SharedListener;
pub use solver::{solve, solve_row_major};
pub use types::*;
