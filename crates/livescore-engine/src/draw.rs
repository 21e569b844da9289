use livescore_core::types::SideKind;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::store::ROSTER_SIZE;

/// A goal to credit: which match, which side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Goal {
    pub match_index: usize,
    pub side: SideKind,
}

impl Goal {
    pub fn new(match_index: usize, side: SideKind) -> Self {
        Self { match_index, side }
    }
}

/// Source of per-tick scoring decisions. `None` means no goal this tick.
pub trait GoalDraw: Send {
    fn draw(&mut self) -> Option<Goal>;
}

/// Production draw: three independent fair uniform draws per tick.
///
/// 1. `{0, 1, 2}`: a goal is scored only on `1` (p = 1/3).
/// 2. `{0, 1, 2}`: match index.
/// 3. `{0, 1}`: side selector, 0 = home.
pub struct RandomGoals<R> {
    rng: R,
}

impl<R: Rng> RandomGoals<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomGoals<StdRng> {
    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng + Send> GoalDraw for RandomGoals<R> {
    fn draw(&mut self) -> Option<Goal> {
        if self.rng.gen_range(0..=2u32) != 1 {
            return None;
        }
        let match_index = self.rng.gen_range(0..ROSTER_SIZE);
        let side = SideKind::from_index(self.rng.gen_range(0..=1u32));
        Some(Goal::new(match_index, side))
    }
}
