//! Session module - the complete state of one Raindrop run
//!
//! This module ties together problem generation, falling, miss detection,
//! answer matching and scoring. It is driven from outside by three inputs:
//!
//! - [`GameSession::spawn_tick`] on every spawn period
//! - [`GameSession::physics_tick`] on every physics period
//! - [`GameSession::submit_answer`] whenever the player submits
//!
//! Timestamps are milliseconds on whatever clock the driver uses; the session
//! only ever subtracts them.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::problem::{generate, Problem};
use crate::rng::SimpleRng;
use crate::scoring::SurvivalTime;
use crate::types::{Operator, SubmitOutcome};

/// Result of one physics tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PhysicsOutcome {
    /// Problems that fell past the boundary in this tick
    pub missed: u32,
    /// The session ended in this tick
    pub ended: bool,
}

/// Final numbers of a finished (or abandoned) run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionResult {
    pub score: u32,
    pub survival: SurvivalTime,
    pub over: bool,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    rng: SimpleRng,
    problems: Vec<Problem>,
    /// Id handed to the next spawned problem.
    next_problem_id: u64,
    /// Monotonic episode id (increments on restart).
    episode_id: u32,
    score: u32,
    missed_count: u32,
    /// One-shot guards, one per entry of `config.special_milestones`.
    milestone_spawned: [bool; 2],
    started: bool,
    over: bool,
    start_ms: u64,
    end_ms: Option<u64>,
}

impl GameSession {
    pub fn new(config: GameConfig, seed: u32) -> Self {
        Self {
            config: config.sanitized(),
            rng: SimpleRng::new(seed),
            problems: Vec::new(),
            next_problem_id: 1,
            episode_id: 0,
            score: 0,
            missed_count: 0,
            milestone_spawned: [false; 2],
            started: false,
            over: false,
            start_ms: 0,
            end_ms: None,
        }
    }

    /// Start the session clock. Calling it again has no effect.
    pub fn start(&mut self, now_ms: u64) {
        if self.started {
            return;
        }
        self.started = true;
        self.start_ms = now_ms;
        info!(episode = self.episode_id, "raindrop session started");
    }

    /// Reset every per-run field and start again at `now_ms`.
    ///
    /// The RNG keeps its state so the next run does not replay the last one.
    pub fn restart(&mut self, now_ms: u64) {
        let rng = self.rng.clone();
        let next_episode = self.episode_id.wrapping_add(1);
        *self = Self::new(self.config.clone(), 1);
        self.rng = rng;
        self.episode_id = next_episode;
        self.start(now_ms);
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    /// Started and not over.
    pub fn is_running(&self) -> bool {
        self.started && !self.over
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn missed_count(&self) -> u32 {
        self.missed_count
    }

    pub fn active_problems(&self) -> &[Problem] {
        &self.problems
    }

    pub fn milestone_spawned(&self) -> [bool; 2] {
        self.milestone_spawned
    }

    pub fn start_ms(&self) -> u64 {
        self.start_ms
    }

    pub fn end_ms(&self) -> Option<u64> {
        self.end_ms
    }

    pub fn seed(&self) -> u32 {
        self.rng.seed()
    }

    /// Milliseconds survived so far (frozen once the session is over).
    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        if !self.started {
            return 0;
        }
        self.end_ms.unwrap_or(now_ms).saturating_sub(self.start_ms)
    }

    pub fn result(&self, now_ms: u64) -> SessionResult {
        SessionResult {
            score: self.score,
            survival: SurvivalTime::from_millis(self.elapsed_ms(now_ms)),
            over: self.over,
        }
    }

    /// Spawn one random problem. Returns its id, or `None` if not running.
    pub fn spawn_tick(&mut self) -> Option<u64> {
        if !self.is_running() {
            return None;
        }

        let is_special = self.claim_milestone();
        let id = self.take_id();
        let problem = generate(&mut self.rng, id, is_special, &self.config);
        debug!(id, question = %problem.question, is_special, "spawned problem");
        self.problems.push(problem);
        Some(id)
    }

    /// Append a specific problem, e.g. for scripted scenarios or replays.
    ///
    /// Returns `None` when the session is not running or the expression is
    /// not an exact non-negative integer.
    pub fn push_problem(
        &mut self,
        operator: Operator,
        left: u32,
        right: u32,
        is_special: bool,
    ) -> Option<u64> {
        if !self.is_running() {
            return None;
        }
        let problem = Problem::new(self.next_problem_id, operator, left, right, is_special)?;
        let id = self.take_id();
        self.problems.push(problem);
        Some(id)
    }

    /// Advance every problem and remove those past the boundary.
    ///
    /// Each removal counts one miss. The miss limit is checked right after each
    /// increment, so the session ends in the same tick that reaches it and the
    /// count never exceeds the limit.
    pub fn physics_tick(&mut self, now_ms: u64) -> PhysicsOutcome {
        let mut outcome = PhysicsOutcome::default();
        if !self.is_running() {
            return outcome;
        }

        let step = self.config.fall_step;
        for p in &mut self.problems {
            p.vertical_position = p.vertical_position.saturating_add(step);
        }

        let lane = self.config.lane_height;
        let mut i = 0;
        while i < self.problems.len() {
            if !self.problems[i].has_fallen_past(lane) {
                i += 1;
                continue;
            }

            let missed = self.problems.remove(i);
            self.missed_count += 1;
            outcome.missed += 1;
            debug!(id = missed.id, missed_count = self.missed_count, "problem missed");

            if self.missed_count >= self.config.miss_limit {
                self.finish(now_ms);
                outcome.ended = true;
                break;
            }
        }

        outcome
    }

    /// Parse and submit the player's input.
    ///
    /// Anything that is not a non-negative integer matches nothing.
    pub fn submit_answer(&mut self, input: &str) -> SubmitOutcome {
        if !self.is_running() {
            return SubmitOutcome::Ignored;
        }
        match input.trim().parse::<u32>() {
            Ok(v) => self.submit_value(v),
            Err(_) => SubmitOutcome::NoMatch,
        }
    }

    /// Match `value` against the active problems in spawn order.
    pub fn submit_value(&mut self, value: u32) -> SubmitOutcome {
        if !self.is_running() {
            return SubmitOutcome::Ignored;
        }

        let Some(idx) = self.problems.iter().position(|p| p.answer == value) else {
            return SubmitOutcome::NoMatch;
        };

        if self.problems[idx].is_special {
            let cleared = self.problems.len() as u32;
            self.problems.clear();
            debug!(cleared, "special problem matched");
            return SubmitOutcome::ClearAll { cleared };
        }

        let hit = self.problems.remove(idx);
        let reward = self.config.hit_reward;
        self.score = self.score.saturating_add(reward);
        debug!(id = hit.id, score = self.score, "problem matched");
        SubmitOutcome::Hit {
            problem_id: hit.id,
            reward,
        }
    }

    /// Set the special flag for a milestone equal to the current score, once.
    fn claim_milestone(&mut self) -> bool {
        for (i, &milestone) in self.config.special_milestones.iter().enumerate() {
            if self.score == milestone && !self.milestone_spawned[i] {
                self.milestone_spawned[i] = true;
                return true;
            }
        }
        false
    }

    fn take_id(&mut self) -> u64 {
        let id = self.next_problem_id;
        self.next_problem_id += 1;
        id
    }

    fn finish(&mut self, now_ms: u64) {
        self.over = true;
        self.end_ms = Some(now_ms.max(self.start_ms));
        info!(
            episode = self.episode_id,
            score = self.score,
            survived_ms = self.elapsed_ms(now_ms),
            "raindrop session over"
        );
    }

    #[cfg(test)]
    pub(crate) fn problems_mut(&mut self) -> &mut Vec<Problem> {
        &mut self.problems
    }

    #[cfg(test)]
    pub(crate) fn set_score(&mut self, score: u32) {
        self.score = score;
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(GameConfig::default(), 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running() -> GameSession {
        let mut s = GameSession::new(GameConfig::default(), 12345);
        s.start(0);
        s
    }

    #[test]
    fn test_new_session_state() {
        let s = GameSession::new(GameConfig::default(), 12345);
        assert!(!s.started());
        assert!(!s.is_over());
        assert_eq!(s.score(), 0);
        assert_eq!(s.missed_count(), 0);
        assert!(s.active_problems().is_empty());
        assert_eq!(s.milestone_spawned(), [false, false]);
    }

    #[test]
    fn test_not_started_ignores_everything() {
        let mut s = GameSession::default();
        assert_eq!(s.spawn_tick(), None);
        assert_eq!(s.physics_tick(500), PhysicsOutcome::default());
        assert_eq!(s.submit_answer("7"), SubmitOutcome::Ignored);
    }

    #[test]
    fn test_spawn_appends_in_order_with_unique_ids() {
        let mut s = running();
        let ids: Vec<u64> = (0..50).filter_map(|_| s.spawn_tick()).collect();
        assert_eq!(ids.len(), 50);
        let active: Vec<u64> = s.active_problems().iter().map(|p| p.id).collect();
        assert_eq!(active, ids);
        let mut dedup = ids.clone();
        dedup.dedup();
        assert_eq!(dedup, ids);
    }

    #[test]
    fn test_basic_hit() {
        let mut s = running();
        let id = s.push_problem(Operator::Add, 3, 4, false).unwrap();
        assert_eq!(s.active_problems()[0].question, "3 + 4");

        let outcome = s.submit_answer("7");
        assert_eq!(
            outcome,
            SubmitOutcome::Hit {
                problem_id: id,
                reward: 500
            }
        );
        assert_eq!(s.score(), 500);
        assert!(s.active_problems().is_empty());
    }

    #[test]
    fn test_first_match_in_spawn_order_wins() {
        let mut s = running();
        let first = s.push_problem(Operator::Add, 2, 2, false).unwrap();
        let second = s.push_problem(Operator::Mul, 2, 2, false).unwrap();

        s.submit_value(4);
        assert_eq!(s.active_problems().len(), 1);
        assert_eq!(s.active_problems()[0].id, second);
        assert_ne!(first, second);
    }

    #[test]
    fn test_no_match_and_garbage_are_ignored() {
        let mut s = running();
        s.push_problem(Operator::Add, 3, 4, false);
        assert_eq!(s.submit_answer("8"), SubmitOutcome::NoMatch);
        assert_eq!(s.submit_answer("seven"), SubmitOutcome::NoMatch);
        assert_eq!(s.submit_answer(""), SubmitOutcome::NoMatch);
        assert_eq!(s.submit_answer("-7"), SubmitOutcome::NoMatch);
        assert_eq!(s.score(), 0);
        assert_eq!(s.active_problems().len(), 1);
    }

    #[test]
    fn test_special_clears_everything_without_reward() {
        let mut s = running();
        s.push_problem(Operator::Add, 1, 1, false);
        s.push_problem(Operator::Mul, 3, 3, true);
        s.push_problem(Operator::Sub, 9, 4, false);

        assert_eq!(s.submit_value(9), SubmitOutcome::ClearAll { cleared: 3 });
        assert!(s.active_problems().is_empty());
        assert_eq!(s.score(), 0);
        assert_eq!(s.missed_count(), 0);
    }

    #[test]
    fn test_fall_and_single_miss() {
        let mut s = running();
        s.push_problem(Operator::Add, 1, 1, false);

        for tick in 1..77 {
            let out = s.physics_tick(tick * 500);
            assert_eq!(out.missed, 0, "tick {tick}");
        }
        assert_eq!(s.active_problems()[0].vertical_position, 380);

        let out = s.physics_tick(77 * 500);
        assert_eq!(
            out,
            PhysicsOutcome {
                missed: 1,
                ended: false
            }
        );
        assert_eq!(s.missed_count(), 1);
        assert!(s.active_problems().is_empty());
        assert!(!s.is_over());
    }

    #[test]
    fn test_two_misses_in_one_tick_end_the_session() {
        let mut s = running();
        s.push_problem(Operator::Add, 1, 1, false);
        s.push_problem(Operator::Add, 2, 2, false);
        s.push_problem(Operator::Add, 3, 3, false);
        for p in s.problems_mut().iter_mut() {
            p.vertical_position = 379;
        }

        let out = s.physics_tick(10_000);
        assert_eq!(out, PhysicsOutcome { missed: 2, ended: true });
        assert_eq!(s.missed_count(), 2);
        assert!(s.is_over());
        assert_eq!(s.end_ms(), Some(10_000));

        // Frozen: the third problem is neither missed nor advanced.
        assert_eq!(s.active_problems().len(), 1);
        assert_eq!(s.physics_tick(10_500), PhysicsOutcome::default());
        assert_eq!(s.active_problems()[0].vertical_position, 384);
        assert_eq!(s.spawn_tick(), None);
        assert_eq!(s.submit_value(6), SubmitOutcome::Ignored);
    }

    #[test]
    fn test_position_is_monotonic() {
        let mut s = running();
        s.push_problem(Operator::Add, 1, 1, false);
        let mut last = 0;
        for tick in 1..=70 {
            s.physics_tick(tick * 500);
            let pos = s.active_problems()[0].vertical_position;
            assert!(pos >= last);
            last = pos;
        }
    }

    #[test]
    fn test_special_milestones_fire_once_each() {
        let mut s = running();
        s.set_score(10_000);
        for _ in 0..20 {
            s.spawn_tick();
        }
        let specials = s.active_problems().iter().filter(|p| p.is_special).count();
        assert_eq!(specials, 1);
        assert!(s.active_problems()[0].is_special);
        assert_eq!(s.milestone_spawned(), [true, false]);

        s.set_score(11_000);
        for _ in 0..20 {
            s.spawn_tick();
        }
        let specials = s.active_problems().iter().filter(|p| p.is_special).count();
        assert_eq!(specials, 2);
        assert_eq!(s.milestone_spawned(), [true, true]);

        // Dropping back to a milestone score does not re-arm it.
        s.set_score(10_000);
        s.spawn_tick();
        let specials = s.active_problems().iter().filter(|p| p.is_special).count();
        assert_eq!(specials, 2);
    }

    #[test]
    fn test_no_special_away_from_milestones() {
        let mut s = running();
        s.set_score(9_500);
        for _ in 0..10 {
            s.spawn_tick();
        }
        assert!(s.active_problems().iter().all(|p| !p.is_special));
    }

    #[test]
    fn test_survival_time_of_finished_session() {
        let mut s = GameSession::default();
        s.start(1_000);
        s.push_problem(Operator::Add, 1, 1, false);
        s.push_problem(Operator::Add, 2, 2, false);
        for p in s.problems_mut().iter_mut() {
            p.vertical_position = 380;
        }
        s.physics_tick(126_000);
        assert!(s.is_over());

        let r = s.result(999_999);
        assert_eq!(r.survival.to_string(), "2.05");
        assert_eq!(s.elapsed_ms(999_999), 125_000);
    }

    #[test]
    fn test_restart_resets_run_and_bumps_episode() {
        let mut s = running();
        s.push_problem(Operator::Add, 3, 4, false);
        s.submit_value(7);
        s.set_score(10_000);
        s.spawn_tick();
        assert_eq!(s.milestone_spawned(), [true, false]);

        s.restart(5_000);
        assert_eq!(s.episode_id(), 1);
        assert_eq!(s.score(), 0);
        assert_eq!(s.missed_count(), 0);
        assert!(s.active_problems().is_empty());
        assert_eq!(s.milestone_spawned(), [false, false]);
        assert_eq!(s.start_ms(), 5_000);
        assert!(s.is_running());
    }

    #[test]
    fn test_restart_continues_the_rng_sequence() {
        let mut a = running();
        let mut b = running();
        a.spawn_tick();
        b.spawn_tick();
        b.restart(0);
        a.spawn_tick();
        b.spawn_tick();
        assert_eq!(a.active_problems()[1].question, b.active_problems()[0].question);
    }
}
