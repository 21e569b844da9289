use livescore_core::types::SimulationState;
use tracing::info;

use crate::clock::SimulationClock;

/// The externally triggered operations. Each call runs synchronously and
/// reports the resulting simulation state.
#[derive(Clone)]
pub struct ControlSurface {
    clock: SimulationClock,
}

impl ControlSurface {
    pub fn new(clock: SimulationClock) -> Self {
        Self { clock }
    }

    pub fn start(&self) -> SimulationState {
        info!("control: start");
        self.clock.start()
    }

    /// Same behaviour as [`start`](Self::start); kept as its own entry point
    /// for callers.
    pub fn restart(&self) -> SimulationState {
        info!("control: restart");
        self.clock.start()
    }

    pub fn stop(&self) -> SimulationState {
        info!("control: stop");
        self.clock.stop()
    }

    /// Number of open viewer streams.
    pub fn status(&self) -> usize {
        self.clock.registry().len()
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }
}
