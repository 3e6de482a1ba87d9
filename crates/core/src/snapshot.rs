use serde::{Deserialize, Serialize};

use crate::problem::Problem;
use crate::session::GameSession;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemSnapshot {
    pub id: u64,
    pub question: String,
    pub vertical_position: u32,
    pub is_special: bool,
}

impl From<&Problem> for ProblemSnapshot {
    fn from(value: &Problem) -> Self {
        Self {
            id: value.id,
            question: value.question.clone(),
            vertical_position: value.vertical_position,
            is_special: value.is_special,
        }
    }
}

/// Everything a presentation layer needs to draw one frame.
///
/// Answers are deliberately not included.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub episode_id: u32,
    pub problems: Vec<ProblemSnapshot>,
    pub score: u32,
    pub missed_count: u32,
    pub miss_limit: u32,
    pub lane_height: u32,
    pub elapsed_ms: u64,
    pub started: bool,
    pub game_over: bool,
    /// Digits typed but not yet submitted
    pub answer_input: String,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.episode_id = 0;
        self.problems.clear();
        self.score = 0;
        self.missed_count = 0;
        self.miss_limit = 0;
        self.lane_height = 0;
        self.elapsed_ms = 0;
        self.started = false;
        self.game_over = false;
        self.answer_input.clear();
    }

    pub fn playable(&self) -> bool {
        self.started && !self.game_over
    }
}

impl GameSession {
    /// Fill `out` in place, reusing its allocations.
    pub fn snapshot_into(&self, now_ms: u64, out: &mut GameSnapshot) {
        out.episode_id = self.episode_id();
        out.problems.clear();
        out.problems
            .extend(self.active_problems().iter().map(ProblemSnapshot::from));
        out.score = self.score();
        out.missed_count = self.missed_count();
        out.miss_limit = self.config().miss_limit;
        out.lane_height = self.config().lane_height;
        out.elapsed_ms = self.elapsed_ms(now_ms);
        out.started = self.started();
        out.game_over = self.is_over();
    }

    pub fn snapshot(&self, now_ms: u64) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(now_ms, &mut s);
        s
    }
}
