//! Rotation-vector listener
//!
//! [`OrientationListener`] owns the start/stop lifecycle of a single
//! rotation-vector sensor. It registers with a [`SensorManager`], arms a
//! start timeout on a [`Timer`], converts qualifying readings into
//! orientation angles and reports results or failures to an [`EventSink`].
//!
//! All entry points take `&mut self`, so callbacks must be serialised by the
//! host. [`SharedListener`](crate::SharedListener) does this with a mutex
//! when the sensor and timer callbacks arrive on different threads.

use log::{debug, trace, warn};

use crate::math::RotationMatrix;
use crate::solver::solve;
use crate::types::{
    Accuracy, Failure, FailureCode, ListenerSettings, ListenerStatus, OrientationEvent,
    SamplingRate, SensorDescriptor, SensorEvent, SensorKind,
};

const NO_SENSOR_MESSAGE: &str = "No sensors found to register rotation-vector listening to.";
const START_TIMEOUT_MESSAGE: &str = "rotation-vector could not be started.";

/// Platform sensor subsystem
pub trait SensorManager {
    /// Sensors of the given kind, best match first
    fn sensors(&self, kind: SensorKind) -> &[SensorDescriptor];

    /// Start delivering readings from `sensor` to the listener
    fn register(&mut self, sensor: &SensorDescriptor, rate: SamplingRate);

    /// Stop delivering readings to the listener
    fn unregister(&mut self);
}

/// Identifies one scheduled timeout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub u64);

/// One-shot timer and clock
///
/// When a scheduled timer expires the host calls
/// [`OrientationListener::on_timeout`] with the handle returned by
/// [`Timer::schedule`].
pub trait Timer {
    fn schedule(&mut self, delay_ms: u32) -> TimerHandle;

    /// Cancelling an unknown or already fired handle must be a no-op
    fn cancel(&mut self, handle: TimerHandle);

    /// Current time in milliseconds, used to timestamp readings
    fn now_ms(&self) -> u64;
}

/// Receives results on behalf of the script side of the bridge
///
/// `keep_open` asks the bridge to keep the callback channel alive for
/// further events.
pub trait EventSink {
    fn success(&mut self, event: &OrientationEvent, keep_open: bool);

    fn failure(&mut self, failure: &Failure, keep_open: bool);
}

/// Callbacks delivered by the sensor subsystem
pub trait SensorEventListener {
    fn on_accuracy_changed(&mut self, kind: SensorKind, accuracy: Accuracy);

    fn on_sensor_changed(&mut self, event: &SensorEvent);
}

/// Rotation-vector listener
///
/// # Example
/// ```
/// use device_rotation_vector::*;
///
/// struct NoSensors;
/// impl SensorManager for NoSensors {
///     fn sensors(&self, _kind: SensorKind) -> &[SensorDescriptor] { &[] }
///     fn register(&mut self, _sensor: &SensorDescriptor, _rate: SamplingRate) {}
///     fn unregister(&mut self) {}
/// }
///
/// struct NeverFires;
/// impl Timer for NeverFires {
///     fn schedule(&mut self, _delay_ms: u32) -> TimerHandle { TimerHandle(0) }
///     fn cancel(&mut self, _handle: TimerHandle) {}
///     fn now_ms(&self) -> u64 { 0 }
/// }
///
/// #[derive(Default)]
/// struct Failures(Vec<Failure>);
/// impl EventSink for Failures {
///     fn success(&mut self, _event: &OrientationEvent, _keep_open: bool) {}
///     fn failure(&mut self, failure: &Failure, _keep_open: bool) { self.0.push(failure.clone()) }
/// }
///
/// let mut listener = OrientationListener::new(NoSensors, NeverFires, Failures::default());
/// assert_eq!(listener.start(), ListenerStatus::ErrorFailedToStart);
/// assert_eq!(listener.sink().0.len(), 1);
/// ```
pub struct OrientationListener<S, T, E> {
    settings: ListenerSettings,
    sensor_manager: S,
    timer: T,
    sink: E,
    status: ListenerStatus,
    accuracy: Accuracy,
    /// Sensor currently registered with the sensor manager
    sensor: Option<SensorDescriptor>,
    pending_timeout: Option<TimerHandle>,
    last_event: Option<OrientationEvent>,
}

impl<S, T, E> OrientationListener<S, T, E>
where
    S: SensorManager,
    T: Timer,
    E: EventSink,
{
    /// Create a listener with default settings
    pub fn new(sensor_manager: S, timer: T, sink: E) -> Self {
        Self::with_settings(sensor_manager, timer, sink, ListenerSettings::default())
    }

    /// Create a listener with the given settings
    pub fn with_settings(sensor_manager: S, timer: T, sink: E, settings: ListenerSettings) -> Self {
        Self {
            settings,
            sensor_manager,
            timer,
            sink,
            status: ListenerStatus::Stopped,
            accuracy: Accuracy::Unreliable,
            sensor: None,
            pending_timeout: None,
            last_event: None,
        }
    }

    /// Start listening to the rotation-vector sensor
    ///
    /// Returns immediately; the outcome arrives later through the sink. A
    /// call while already starting or running changes nothing.
    pub fn start(&mut self) -> ListenerStatus {
        if matches!(
            self.status,
            ListenerStatus::Starting | ListenerStatus::Running
        ) {
            return self.status;
        }

        // A failed attempt may have left the sensor registered
        if self.sensor.take().is_some() {
            self.sensor_manager.unregister();
        }

        self.set_status(ListenerStatus::Starting);

        let kind = self.settings.sensor_kind;
        let Some(sensor) = self.sensor_manager.sensors(kind).first().cloned() else {
            warn!("no {:?} sensor available", kind);
            self.set_status(ListenerStatus::ErrorFailedToStart);
            self.fail(FailureCode::ErrorFailedToStart, NO_SENSOR_MESSAGE);
            return self.status;
        };

        let rate = self.settings.sampling_rate;
        debug!(
            "registering with {:?} ({}) every {} us",
            sensor.name,
            sensor.vendor,
            rate.delay_us()
        );
        self.sensor_manager.register(&sensor, rate);
        self.sensor = Some(sensor);

        self.cancel_timeout();
        self.pending_timeout = Some(self.timer.schedule(self.settings.start_timeout_ms));

        self.status
    }

    /// Stop listening; safe to call in any state and more than once
    pub fn stop(&mut self) {
        self.cancel_timeout();
        if self.status != ListenerStatus::Stopped {
            self.sensor_manager.unregister();
        }
        self.sensor = None;
        self.set_status(ListenerStatus::Stopped);
        self.accuracy = Accuracy::Unreliable;
    }

    /// Called by the host when a timer scheduled by this listener expires
    pub fn on_timeout(&mut self, handle: TimerHandle) {
        if self.pending_timeout != Some(handle) {
            trace!("ignoring stale timeout {:?}", handle);
            return;
        }
        self.pending_timeout = None;

        if self.status == ListenerStatus::Starting {
            warn!(
                "no reading within {} ms of start",
                self.settings.start_timeout_ms
            );
            self.set_status(ListenerStatus::ErrorFailedToStart);
            self.fail(FailureCode::ErrorFailedToStart, START_TIMEOUT_MESSAGE);
        }
    }

    /// Called when the host view navigates away
    pub fn on_reset(&mut self) {
        if self.status == ListenerStatus::Running {
            self.stop();
        }
    }

    /// Called when the host shuts the listener down
    pub fn on_dispose(&mut self) {
        self.stop();
    }

    pub fn status(&self) -> ListenerStatus {
        self.status
    }

    pub fn accuracy(&self) -> Accuracy {
        self.accuracy
    }

    pub fn settings(&self) -> ListenerSettings {
        self.settings
    }

    /// Most recent orientation delivered to the sink
    pub fn last_event(&self) -> Option<OrientationEvent> {
        self.last_event
    }

    pub fn sensor_manager(&self) -> &S {
        &self.sensor_manager
    }

    pub fn sensor_manager_mut(&mut self) -> &mut S {
        &mut self.sensor_manager
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    pub fn sink(&self) -> &E {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut E {
        &mut self.sink
    }

    fn is_active(&self) -> bool {
        matches!(
            self.status,
            ListenerStatus::Starting | ListenerStatus::Running
        )
    }

    fn cancel_timeout(&mut self) {
        if let Some(handle) = self.pending_timeout.take() {
            self.timer.cancel(handle);
        }
    }

    fn set_status(&mut self, status: ListenerStatus) {
        if self.status != status {
            debug!("status {:?} -> {:?}", self.status, status);
            self.status = status;
        }
    }

    fn fail(&mut self, code: FailureCode, message: &str) {
        self.sink.failure(&Failure::new(code, message), true);
    }
}

impl<S, T, E> SensorEventListener for OrientationListener<S, T, E>
where
    S: SensorManager,
    T: Timer,
    E: EventSink,
{
    fn on_accuracy_changed(&mut self, kind: SensorKind, accuracy: Accuracy) {
        if kind != self.settings.sensor_kind || self.status == ListenerStatus::Stopped {
            return;
        }
        self.accuracy = accuracy;
    }

    fn on_sensor_changed(&mut self, event: &SensorEvent) {
        if event.kind != self.settings.sensor_kind || !self.is_active() {
            trace!("ignoring {:?} reading while {:?}", event.kind, self.status);
            return;
        }

        // First reading wins the race against the start timeout
        self.cancel_timeout();
        self.set_status(ListenerStatus::Running);

        if let Some(accuracy) = event.accuracy {
            self.accuracy = accuracy;
        }
        if self.accuracy < self.settings.minimum_accuracy {
            trace!("skipping reading with {:?} accuracy", self.accuracy);
            return;
        }

        let timestamp = self.timer.now_ms();
        let matrix = match RotationMatrix::from_rotation_vector(&event.values) {
            Ok(matrix) => matrix,
            Err(err) => {
                warn!("dropping reading: {}", err);
                return;
            }
        };

        let event = OrientationEvent::new(solve(&matrix), timestamp);
        self.last_event = Some(event);
        self.sink.success(&event, true);
    }
}
