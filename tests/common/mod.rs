//! Fake collaborators shared by the integration tests
#![allow(dead_code)]

use device_rotation_vector::{
    EventSink, Failure, OrientationEvent, OrientationListener, SamplingRate, SensorDescriptor,
    SensorKind, SensorManager, Timer, TimerHandle,
};

/// Sensor subsystem offering a fixed list of sensors
#[derive(Debug, Default)]
pub struct FakeSensorManager {
    pub available: Vec<SensorDescriptor>,
    pub registrations: Vec<(SensorDescriptor, SamplingRate)>,
    pub registered: bool,
    pub unregister_calls: usize,
}

impl FakeSensorManager {
    pub fn with_rotation_vector() -> Self {
        Self {
            available: vec![SensorDescriptor::new(
                SensorKind::GameRotationVector,
                "Game Rotation Vector Sensor",
                "AOSP",
            )],
            ..Default::default()
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

impl SensorManager for FakeSensorManager {
    fn sensors(&self, kind: SensorKind) -> &[SensorDescriptor] {
        let end = self
            .available
            .iter()
            .position(|s| s.kind != kind)
            .unwrap_or(self.available.len());
        &self.available[..end]
    }

    fn register(&mut self, sensor: &SensorDescriptor, rate: SamplingRate) {
        self.registrations.push((sensor.clone(), rate));
        self.registered = true;
    }

    fn unregister(&mut self) {
        self.unregister_calls += 1;
        self.registered = false;
    }
}

/// Manually advanced clock with one-shot timers
#[derive(Debug, Default)]
pub struct FakeTimer {
    pub now: u64,
    next_id: u64,
    pending: Vec<(TimerHandle, u64)>,
    pub cancelled: Vec<TimerHandle>,
}

impl FakeTimer {
    /// Move the clock forward, returning the timers that expired in order
    pub fn advance(&mut self, ms: u64) -> Vec<TimerHandle> {
        self.now += ms;
        let now = self.now;
        let mut fired: Vec<(TimerHandle, u64)> =
            self.pending.iter().copied().filter(|&(_, due)| due <= now).collect();
        fired.sort_by_key(|&(_, due)| due);
        self.pending.retain(|&(_, due)| due > now);
        fired.into_iter().map(|(handle, _)| handle).collect()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl Timer for FakeTimer {
    fn schedule(&mut self, delay_ms: u32) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.pending.push((handle, self.now + u64::from(delay_ms)));
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.pending.retain(|&(h, _)| h != handle);
        self.cancelled.push(handle);
    }

    fn now_ms(&self) -> u64 {
        self.now
    }
}

/// Sink recording everything sent to the script side
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub successes: Vec<OrientationEvent>,
    pub failures: Vec<Failure>,
    pub closed_channel: bool,
}

impl EventSink for RecordingSink {
    fn success(&mut self, event: &OrientationEvent, keep_open: bool) {
        self.closed_channel |= !keep_open;
        self.successes.push(*event);
    }

    fn failure(&mut self, failure: &Failure, keep_open: bool) {
        self.closed_channel |= !keep_open;
        self.failures.push(failure.clone());
    }
}

pub type TestListener = OrientationListener<FakeSensorManager, FakeTimer, RecordingSink>;

pub fn listener() -> TestListener {
    OrientationListener::new(
        FakeSensorManager::with_rotation_vector(),
        FakeTimer::default(),
        RecordingSink::default(),
    )
}

/// Advance the fake clock and deliver expired timers to the listener
pub fn advance(listener: &mut TestListener, ms: u64) {
    let fired = listener.timer_mut().advance(ms);
    for handle in fired {
        listener.on_timeout(handle);
    }
}
