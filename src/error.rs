//! Error types

use thiserror::Error;

/// Errors raised while turning sensor values into orientation angles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SolverError {
    #[error("rotation matrix must have 9 elements, got {len}")]
    InvalidMatrixShape { len: usize },

    #[error("rotation vector must have 3 to 5 components, got {len}")]
    InvalidRotationVector { len: usize },
}

/// Errors raised by the listener's command surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ListenerError {
    #[error("unsupported command")]
    UnsupportedCommand,
}
