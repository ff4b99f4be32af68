use std::time::{Duration, Instant};

use device_rotation_vector::{
    Accuracy, EventSink, Failure, OrientationEvent, OrientationListener, SamplingRate,
    SensorDescriptor, SensorEvent, SensorEventListener, SensorKind, SensorManager, Timer,
    TimerHandle,
};

const SAMPLE_PERIOD: Duration = Duration::from_millis(66); // UI delivery rate

/// Sensor subsystem with a single simulated rotation-vector sensor
struct SimulatedSensors {
    sensors: Vec<SensorDescriptor>,
    active: bool,
}

impl SensorManager for SimulatedSensors {
    fn sensors(&self, kind: SensorKind) -> &[SensorDescriptor] {
        if kind == SensorKind::GameRotationVector {
            &self.sensors[..]
        } else {
            &[]
        }
    }

    fn register(&mut self, _sensor: &SensorDescriptor, _rate: SamplingRate) {
        self.active = true;
    }

    fn unregister(&mut self) {
        self.active = false;
    }
}

/// Timer polled by the main loop
struct PolledTimer {
    epoch: Instant,
    next_id: u64,
    pending: Option<(TimerHandle, Instant)>,
}

impl PolledTimer {
    fn expired(&mut self) -> Option<TimerHandle> {
        match self.pending {
            Some((handle, due)) if Instant::now() >= due => {
                self.pending = None;
                Some(handle)
            }
            _ => None,
        }
    }
}

impl Timer for PolledTimer {
    fn schedule(&mut self, delay_ms: u32) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        let due = Instant::now() + Duration::from_millis(u64::from(delay_ms));
        self.pending = Some((handle, due));
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if matches!(self.pending, Some((pending, _)) if pending == handle) {
            self.pending = None;
        }
    }

    fn now_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }
}

/// Prints what would be sent to the script side
struct ConsoleSink;

impl EventSink for ConsoleSink {
    fn success(&mut self, event: &OrientationEvent, _keep_open: bool) {
        println!(
            "[{:>5} ms] Alpha: {:7.2}, Beta: {:7.2}, Gamma: {:7.2}",
            event.timestamp, event.alpha, event.beta, event.gamma
        );
    }

    fn failure(&mut self, failure: &Failure, _keep_open: bool) {
        println!("error {}: {}", failure.code.code(), failure.message);
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();

    let sensors = SimulatedSensors {
        sensors: vec![SensorDescriptor::new(
            SensorKind::GameRotationVector,
            "Simulated Game Rotation Vector",
            "demo",
        )],
        active: false,
    };
    let timer = PolledTimer {
        epoch: Instant::now(),
        next_id: 0,
        pending: None,
    };
    let mut listener = OrientationListener::new(sensors, timer, ConsoleSink);

    listener.start();
    listener.on_accuracy_changed(SensorKind::GameRotationVector, Accuracy::High);

    // Rotate slowly about Z while pitching up and down
    for i in 0..30 {
        if let Some(handle) = listener.timer_mut().expired() {
            listener.on_timeout(handle);
        }
        if listener.sensor_manager().active {
            let yaw = (i as f32 * 12.0).to_radians();
            let pitch = (i as f32 * 0.4).sin() * 0.5;
            let (sy, cy) = (yaw / 2.0).sin_cos();
            let (sp, cp) = (pitch / 2.0).sin_cos();
            // q = q_z(yaw) * q_x(pitch)
            let values = [cy * sp, sy * sp, sy * cp];
            listener.on_sensor_changed(&SensorEvent::new(SensorKind::GameRotationVector, &values));
        }
        std::thread::sleep(SAMPLE_PERIOD);
    }

    listener.on_dispose();
}
