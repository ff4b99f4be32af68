//! Core types and settings for the rotation-vector listener

use serde::{Deserialize, Serialize};

/// Sensor accuracy reported alongside rotation-vector readings
///
/// Ordered from least to most trustworthy, so levels can be compared
/// directly (`accuracy >= Accuracy::Medium`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum Accuracy {
    /// Readings cannot be trusted
    #[default]
    Unreliable,
    /// Low accuracy, calibration with the environment is needed
    Low,
    /// Average accuracy, calibration may improve readings
    Medium,
    /// Maximum accuracy
    High,
}

/// Kind of sensor a descriptor or event refers to
///
/// Only [`SensorKind::GameRotationVector`] is tracked by default; the other
/// kinds exist so events from unrelated sensors can be told apart and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SensorKind {
    /// Rotation vector without magnetometer input
    #[default]
    GameRotationVector,
    /// Rotation vector fused with the magnetometer
    RotationVector,
    Accelerometer,
    Gyroscope,
    MagneticField,
}

/// Requested delivery rate when registering with the sensor subsystem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SamplingRate {
    /// As fast as possible
    Fastest,
    /// Suitable for games
    Game,
    /// Suitable for user interface updates
    #[default]
    Ui,
    /// Suitable for screen orientation changes
    Normal,
}

impl SamplingRate {
    /// Nominal delay between samples in microseconds
    pub fn delay_us(self) -> u32 {
        match self {
            SamplingRate::Fastest => 0,
            SamplingRate::Game => 20_000,
            SamplingRate::Ui => 66_667,
            SamplingRate::Normal => 200_000,
        }
    }
}

/// Lifecycle state of an [`OrientationListener`](crate::OrientationListener)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ListenerStatus {
    #[default]
    Stopped,
    /// Registered with the sensor, waiting for the first sample
    Starting,
    /// At least one sample has arrived since the last start
    Running,
    /// No sensor was found, or none reported within the start timeout
    ErrorFailedToStart,
}

/// Description of a sensor offered by the sensor subsystem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorDescriptor {
    pub kind: SensorKind,
    pub name: String,
    pub vendor: String,
}

impl SensorDescriptor {
    pub fn new(kind: SensorKind, name: impl Into<String>, vendor: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            vendor: vendor.into(),
        }
    }
}

/// A raw reading delivered by the sensor subsystem
///
/// `values` holds the rotation vector `[x, y, z, (w), (heading accuracy)]`.
/// When `accuracy` is `Some`, it replaces the accuracy last reported through
/// `on_accuracy_changed` before the reading is gated.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorEvent {
    pub kind: SensorKind,
    pub values: Vec<f32>,
    pub accuracy: Option<Accuracy>,
}

impl SensorEvent {
    pub fn new(kind: SensorKind, values: &[f32]) -> Self {
        Self {
            kind,
            values: values.to_vec(),
            accuracy: None,
        }
    }

    /// Attach an accuracy level to the reading
    pub fn with_accuracy(mut self, accuracy: Accuracy) -> Self {
        self.accuracy = Some(accuracy);
        self
    }
}

/// Device orientation in degrees
///
/// - `alpha` (azimuth) in [0, 360)
/// - `beta` (pitch) in [-180, 180)
/// - `gamma` (roll) in [-90, 90]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OrientationAngles {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

/// Orientation payload handed to the [`EventSink`](crate::EventSink)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OrientationEvent {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
    /// Milliseconds reported by the timer's clock when the sample arrived
    pub timestamp: u64,
}

impl OrientationEvent {
    pub fn new(angles: OrientationAngles, timestamp: u64) -> Self {
        Self {
            alpha: angles.alpha,
            beta: angles.beta,
            gamma: angles.gamma,
            timestamp,
        }
    }

    pub fn angles(&self) -> OrientationAngles {
        OrientationAngles {
            alpha: self.alpha,
            beta: self.beta,
            gamma: self.gamma,
        }
    }
}

/// Failure codes reported to the [`EventSink`](crate::EventSink)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureCode {
    ErrorFailedToStart,
}

impl FailureCode {
    /// Numeric code understood by the script side of the bridge
    pub fn code(self) -> i32 {
        match self {
            FailureCode::ErrorFailedToStart => 3,
        }
    }
}

/// Failure payload handed to the [`EventSink`](crate::EventSink)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub code: FailureCode,
    pub message: String,
}

impl Failure {
    pub fn new(code: FailureCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Listener settings
///
/// # Example
/// ```
/// use device_rotation_vector::{Accuracy, ListenerSettings, SamplingRate};
///
/// let settings = ListenerSettings {
///     sampling_rate: SamplingRate::Game,
///     minimum_accuracy: Accuracy::High,
///     ..Default::default()
/// };
/// assert_eq!(settings.start_timeout_ms, 2000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListenerSettings {
    /// Sensor the listener registers with
    pub sensor_kind: SensorKind,
    /// Delivery rate requested at registration
    pub sampling_rate: SamplingRate,
    /// Milliseconds to wait for the first sample before reporting a failure
    pub start_timeout_ms: u32,
    /// Readings below this accuracy are not converted into angles
    pub minimum_accuracy: Accuracy,
}

impl Default for ListenerSettings {
    fn default() -> Self {
        Self {
            sensor_kind: SensorKind::GameRotationVector,
            sampling_rate: SamplingRate::Ui,
            start_timeout_ms: 2000,
            minimum_accuracy: Accuracy::Medium,
        }
    }
}
