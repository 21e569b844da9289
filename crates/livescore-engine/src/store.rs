use livescore_core::types::Match;

use crate::draw::Goal;

/// Home/away pairs seeded at process start. Order is part of the wire contract.
pub const ROSTER: [(&str, &str); 3] = [
    ("Germany", "Poland"),
    ("Brazil", "Mexico"),
    ("Argentina", "Uruguay"),
];

pub const ROSTER_SIZE: usize = ROSTER.len();

/// In-memory scores for the fixed roster. Entries are mutated in place and
/// never added or removed.
#[derive(Debug, Clone)]
pub struct MatchStore {
    matches: Vec<Match>,
}

impl MatchStore {
    pub fn new() -> Self {
        Self {
            matches: ROSTER
                .iter()
                .map(|(home, away)| Match::new(*home, *away))
                .collect(),
        }
    }

    pub fn list_matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn reset_all_goals(&mut self) {
        for m in &mut self.matches {
            m.home.goals = 0;
            m.away.goals = 0;
        }
    }

    /// Credit one goal. Returns false if the index is outside the roster.
    pub(crate) fn score(&mut self, goal: Goal) -> bool {
        match self.matches.get_mut(goal.match_index) {
            Some(m) => {
                m.side_mut(goal.side).goals += 1;
                true
            }
            None => false,
        }
    }
}

impl Default for MatchStore {
    fn default() -> Self {
        Self::new()
    }
}
