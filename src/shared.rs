//! Thread-safe handle to a listener
//!
//! Sensor callbacks and timer expiries often arrive on different threads.
//! [`SharedListener`] puts the listener behind one mutex so the state change
//! and the timer handle it owns always move together.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::command::{Acknowledgement, Command};
use crate::listener::{
    EventSink, OrientationListener, SensorEventListener, SensorManager, Timer, TimerHandle,
};
use crate::types::{Accuracy, ListenerStatus, OrientationEvent, SensorEvent, SensorKind};

/// Cloneable, mutex-guarded [`OrientationListener`]
pub struct SharedListener<S, T, E> {
    inner: Arc<Mutex<OrientationListener<S, T, E>>>,
}

impl<S, T, E> Clone for SharedListener<S, T, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S, T, E> SharedListener<S, T, E>
where
    S: SensorManager,
    T: Timer,
    E: EventSink,
{
    pub fn new(listener: OrientationListener<S, T, E>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(listener)),
        }
    }

    /// Run `f` with exclusive access to the listener
    pub fn with<R>(&self, f: impl FnOnce(&mut OrientationListener<S, T, E>) -> R) -> R {
        f(&mut self.lock())
    }

    pub fn start(&self) -> ListenerStatus {
        self.lock().start()
    }

    pub fn stop(&self) {
        self.lock().stop()
    }

    pub fn execute(&self, command: Command) -> Acknowledgement {
        self.lock().execute(command)
    }

    pub fn on_timeout(&self, handle: TimerHandle) {
        self.lock().on_timeout(handle)
    }

    pub fn on_reset(&self) {
        self.lock().on_reset()
    }

    pub fn on_dispose(&self) {
        self.lock().on_dispose()
    }

    pub fn status(&self) -> ListenerStatus {
        self.lock().status()
    }

    pub fn last_event(&self) -> Option<OrientationEvent> {
        self.lock().last_event()
    }

    // Every transition leaves the listener consistent, so a panic in a
    // collaborator does not poison it for good
    fn lock(&self) -> MutexGuard<'_, OrientationListener<S, T, E>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S, T, E> SensorEventListener for SharedListener<S, T, E>
where
    S: SensorManager,
    T: Timer,
    E: EventSink,
{
    fn on_accuracy_changed(&mut self, kind: SensorKind, accuracy: Accuracy) {
        self.lock().on_accuracy_changed(kind, accuracy)
    }

    fn on_sensor_changed(&mut self, event: &SensorEvent) {
        self.lock().on_sensor_changed(event)
    }
}
