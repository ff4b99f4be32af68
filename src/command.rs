//! Command surface exposed to the script side of the bridge

use core::str::FromStr;

use crate::error::ListenerError;
use crate::listener::{EventSink, OrientationListener, SensorManager, Timer};
use crate::types::ListenerStatus;

/// Actions the script side can request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Stop,
}

impl FromStr for Command {
    type Err = ListenerError;

    fn from_str(action: &str) -> Result<Self, Self::Err> {
        match action {
            "start" => Ok(Command::Start),
            "stop" => Ok(Command::Stop),
            _ => Err(ListenerError::UnsupportedCommand),
        }
    }
}

/// Immediate reply to a command
///
/// Carries no result; the outcome of a command arrives later through the
/// [`EventSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Acknowledgement {
    pub keep_open: bool,
}

impl<S, T, E> OrientationListener<S, T, E>
where
    S: SensorManager,
    T: Timer,
    E: EventSink,
{
    /// Run a bridge command
    ///
    /// Start is skipped while running. Stop goes through in every state.
    pub fn execute(&mut self, command: Command) -> Acknowledgement {
        match command {
            Command::Start => {
                if self.status() != ListenerStatus::Running {
                    self.start();
                }
            }
            Command::Stop => self.stop(),
        }
        Acknowledgement { keep_open: true }
    }
}
