//! RaindropGame: one playable session wired to its collaborators.
//!
//! Owns the session state, the two-task schedule, the answer buffer, the
//! key-value store and the navigator. Persistence happens here, right after
//! the state change that requires it:
//!
//! - score change: `Rain_drops_score` + ratchet of `p_M`
//! - game over: score, `Rain_Drops_Time`, ratchet of `p_M`
//! - return to assessment: ratchet of `p_M`, then navigate
//!
//! Store failures are logged and swallowed; the game never surfaces them.

use tracing::{info, warn};

use crate::core::{format_survival, GameConfig, GameSession, GameSnapshot, SessionResult};
use crate::input::AnswerBuffer;
use crate::navigate::Navigator;
use crate::schedule::Schedule;
use crate::store::{record_final, record_score, ratchet_math_score, KeyValueStore};
use crate::types::{GameAction, SubmitOutcome, TaskKind};

/// What one call to [`RaindropGame::advance`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AdvanceReport {
    pub spawned: u32,
    pub missed: u32,
    pub ended: bool,
}

pub struct RaindropGame<S, N> {
    session: GameSession,
    schedule: Schedule,
    buffer: AnswerBuffer,
    store: S,
    navigator: N,
    torn_down: bool,
}

impl<S: KeyValueStore, N: Navigator> RaindropGame<S, N> {
    pub fn new(config: GameConfig, seed: u32, store: S, navigator: N) -> Self {
        let session = GameSession::new(config, seed);
        let schedule = Schedule::from_config(session.config());
        Self {
            session,
            schedule,
            buffer: AnswerBuffer::new(),
            store,
            navigator,
            torn_down: false,
        }
    }

    /// Start the session and arm both tasks. No effect once started.
    pub fn start(&mut self) {
        if self.torn_down || self.session.started() {
            return;
        }
        self.session.start(self.schedule.now_ms());
        self.schedule.arm();
        persist_score(&mut self.store, self.session.score());
    }

    /// Begin a fresh run (score reset) on the same clock.
    pub fn restart(&mut self) {
        if self.torn_down {
            return;
        }
        self.session.restart(self.schedule.now_ms());
        self.buffer.clear();
        self.schedule.arm();
        persist_score(&mut self.store, self.session.score());
    }

    /// Advance the clock, running every spawn and physics tick that came due.
    pub fn advance(&mut self, elapsed_ms: u64) -> AdvanceReport {
        let mut report = AdvanceReport::default();
        if self.torn_down {
            return report;
        }

        let Self {
            session,
            schedule,
            store,
            ..
        } = self;

        schedule.advance(elapsed_ms, |kind, at| match kind {
            TaskKind::Spawn => {
                if session.spawn_tick().is_some() {
                    report.spawned += 1;
                }
                true
            }
            TaskKind::Physics => {
                let outcome = session.physics_tick(at);
                report.missed += outcome.missed;
                if outcome.ended {
                    report.ended = true;
                    persist_final(store, session, at);
                    return false;
                }
                true
            }
        });

        report
    }

    /// Advance to an absolute time on the game clock. Times already passed
    /// are a no-op.
    ///
    /// Hosts that sample a wall clock should pass time since start here
    /// instead of summing per-frame deltas, which lose the rounding remainder.
    pub fn advance_to(&mut self, now_ms: u64) -> AdvanceReport {
        let elapsed = now_ms.saturating_sub(self.schedule.now_ms());
        self.advance(elapsed)
    }

    /// Apply a player action. Returns whether it changed anything.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        if self.torn_down {
            return false;
        }
        match action {
            GameAction::Digit(d) => self.session.is_running() && self.buffer.push_digit(d),
            GameAction::Backspace => self.session.is_running() && self.buffer.backspace(),
            GameAction::Submit => !matches!(
                self.submit(),
                SubmitOutcome::NoMatch | SubmitOutcome::Ignored
            ),
            GameAction::Restart => {
                self.restart();
                true
            }
            GameAction::ReturnToAssessment => {
                self.return_to_assessment();
                true
            }
        }
    }

    /// Submit the typed answer. The buffer is cleared whatever the outcome.
    pub fn submit(&mut self) -> SubmitOutcome {
        let text = self.buffer.take();
        self.submit_text(&text)
    }

    /// Submit arbitrary text as the answer, clearing the typed buffer.
    pub fn submit_text(&mut self, text: &str) -> SubmitOutcome {
        self.buffer.clear();
        if self.torn_down {
            return SubmitOutcome::Ignored;
        }
        let outcome = self.session.submit_answer(text);
        if let SubmitOutcome::Hit { .. } = outcome {
            persist_score(&mut self.store, self.session.score());
        }
        outcome
    }

    /// Flush the math score and hand control back to the assessment screen.
    ///
    /// The ratchet write completes before the navigator runs, and both tasks
    /// are cancelled so nothing fires once the screen is left.
    pub fn return_to_assessment(&mut self) {
        if self.torn_down {
            return;
        }
        let result = self.result();
        if let Err(e) = ratchet_math_score(&mut self.store, result.score) {
            warn!("Failed to flush math score before navigation: {e}");
        }
        self.teardown();
        info!(score = result.score, "returning to assessment");
        self.navigator.return_to_assessment(&result);
    }

    /// Cancel both tasks and drop pending input. Final; nothing runs after.
    pub fn teardown(&mut self) {
        self.schedule.cancel();
        self.buffer.clear();
        self.torn_down = true;
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Whether the driver should keep advancing time.
    pub fn is_running(&self) -> bool {
        !self.torn_down && self.session.is_running()
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn answer_input(&self) -> &str {
        self.buffer.as_str()
    }

    pub fn now_ms(&self) -> u64 {
        self.schedule.now_ms()
    }

    pub fn result(&self) -> SessionResult {
        self.session.result(self.schedule.now_ms())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.session.snapshot_into(self.schedule.now_ms(), out);
        out.answer_input.clear();
        out.answer_input.push_str(self.buffer.as_str());
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

fn persist_score<S: KeyValueStore>(store: &mut S, score: u32) {
    if let Err(e) = record_score(store, score) {
        warn!("Failed to persist score {score}: {e}");
    }
}

fn persist_final<S: KeyValueStore>(store: &mut S, session: &GameSession, now_ms: u64) {
    let survival = format_survival(session.elapsed_ms(now_ms));
    if let Err(e) = record_final(store, session.score(), &survival) {
        warn!("Failed to persist final result: {e}");
    }
}
