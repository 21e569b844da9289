use livescore_core::config::SimulationConfig;
use livescore_core::types::{Match, SimulationState};
use livescore_protocol::frames::ScoreUpdate;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::draw::{GoalDraw, RandomGoals};
use crate::registry::{Connection, ConnectionRegistry, Sink};
use crate::store::MatchStore;

/// Timing parameters of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockSettings {
    pub interval: Duration,
    /// Scoring-eligible ticks per run. The tick after the last one ends the run.
    pub max_ticks: u32,
}

impl From<&SimulationConfig> for ClockSettings {
    fn from(config: &SimulationConfig) -> Self {
        Self {
            interval: Duration::from_millis(config.tick_interval_ms),
            max_ticks: config.max_ticks,
        }
    }
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self::from(&SimulationConfig::default())
    }
}

/// Drives the single repeating tick loop and owns every piece of mutable
/// simulation state.
///
/// Cloning is cheap; all clones share one state behind one mutex. Ticks,
/// control operations, and viewer attaches each run to completion under that
/// lock and never await while holding it.
#[derive(Clone)]
pub struct SimulationClock {
    shared: Arc<Shared>,
}

struct Shared {
    inner: Mutex<ClockInner>,
    registry: Arc<ConnectionRegistry>,
    settings: ClockSettings,
}

struct ClockInner {
    store: MatchStore,
    state: SimulationState,
    ticks: u32,
    /// Bumped on every start/stop. A loop whose epoch is stale must not tick.
    epoch: u64,
    tick_loop: Option<JoinHandle<()>>,
    draw: Box<dyn GoalDraw>,
}

impl ClockInner {
    fn cancel_loop(&mut self) {
        self.epoch += 1;
        if let Some(handle) = self.tick_loop.take() {
            handle.abort();
        }
    }
}

impl SimulationClock {
    pub fn new(
        registry: Arc<ConnectionRegistry>,
        settings: ClockSettings,
        draw: Box<dyn GoalDraw>,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                inner: Mutex::new(ClockInner {
                    store: MatchStore::new(),
                    state: SimulationState::Pristine,
                    ticks: 0,
                    epoch: 0,
                    tick_loop: None,
                    draw,
                }),
                registry,
                settings,
            }),
        }
    }

    /// Build from config: seeded draw when `simulation.seed` is set.
    pub fn from_config(registry: Arc<ConnectionRegistry>, config: &SimulationConfig) -> Self {
        let draw: Box<dyn GoalDraw> = match config.seed {
            Some(seed) => Box::new(RandomGoals::from_seed(seed)),
            None => Box::new(RandomGoals::from_entropy()),
        };
        Self::new(registry, ClockSettings::from(config), draw)
    }

    /// Begin a fresh run: cancel any scheduled loop, zero the tick counter
    /// and all goals, then schedule a new loop. Must be called inside a
    /// Tokio runtime.
    pub fn start(&self) -> SimulationState {
        let mut inner = self.lock();
        inner.cancel_loop();
        inner.ticks = 0;
        inner.store.reset_all_goals();
        inner.state = SimulationState::InProgress;

        let epoch = inner.epoch;
        let shared = Arc::clone(&self.shared);
        inner.tick_loop = Some(tokio::spawn(run_loop(shared, epoch)));

        info!(
            epoch,
            interval_ms = self.shared.settings.interval.as_millis() as u64,
            "simulation started"
        );
        inner.state
    }

    /// Cancel the scheduled loop (if any) and end the run now, pushing a
    /// final `FINISHED` frame regardless of how far the run got.
    pub fn stop(&self) -> SimulationState {
        let mut inner = self.lock();
        inner.cancel_loop();
        inner.state = SimulationState::Finished;
        self.shared
            .registry
            .broadcast(&ScoreUpdate::finished(inner.store.list_matches()));

        info!(ticks = inner.ticks, "simulation stopped");
        inner.state
    }

    /// Register a new viewer. The current roster is queued on `sink` before
    /// the sink becomes visible to broadcasts, so it is always the first
    /// frame the viewer sees.
    pub fn attach(&self, sink: Sink) -> Connection {
        let inner = self.lock();
        match serde_json::to_string(inner.store.list_matches()) {
            Ok(snapshot) => {
                if sink.send(snapshot).is_err() {
                    debug!("viewer closed before initial snapshot");
                }
            }
            Err(e) => warn!(error = %e, "initial snapshot not serializable"),
        }
        self.shared.registry.register(sink)
    }

    pub fn state(&self) -> SimulationState {
        self.lock().state
    }

    pub fn ticks(&self) -> u32 {
        self.lock().ticks
    }

    /// Copy of the current roster.
    pub fn snapshot(&self) -> Vec<Match> {
        self.lock().store.list_matches().to_vec()
    }

    /// True while a tick loop is scheduled.
    pub fn is_running(&self) -> bool {
        self.lock().tick_loop.is_some()
    }

    pub fn registry(&self) -> &Arc<ConnectionRegistry> {
        &self.shared.registry
    }

    fn lock(&self) -> MutexGuard<'_, ClockInner> {
        self.shared.lock()
    }
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, ClockInner> {
        // every critical section leaves the state consistent, so a panic
        // elsewhere must not take the simulation down with it
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// One scheduled tick. Returns false when the loop must exit.
    fn tick(&self, epoch: u64) -> bool {
        let mut guard = self.lock();
        let inner = &mut *guard;

        if inner.epoch != epoch {
            debug!(epoch, current = inner.epoch, "stale tick discarded");
            return false;
        }

        if inner.ticks >= self.settings.max_ticks {
            // the running task is this loop; dropping the handle detaches it
            inner.tick_loop = None;
            inner.state = SimulationState::Finished;
            self.registry
                .broadcast(&ScoreUpdate::finished(inner.store.list_matches()));
            info!(ticks = inner.ticks, "simulation finished");
            return false;
        }

        if let Some(goal) = inner.draw.draw() {
            if inner.store.score(goal) {
                debug!(match_index = goal.match_index, side = ?goal.side, "goal");
            }
        }
        inner.ticks += 1;

        debug!(
            tick = inner.ticks,
            state = %inner.state,
            standings = ?inner.store.list_matches(),
            "tick"
        );
        self.registry
            .broadcast(&ScoreUpdate::new(inner.state, inner.store.list_matches()));
        true
    }
}

async fn run_loop(shared: Arc<Shared>, epoch: u64) {
    let period = shared.settings.interval;
    // first tick fires one full period after start
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;
        if !shared.tick(epoch) {
            break;
        }
    }
}
