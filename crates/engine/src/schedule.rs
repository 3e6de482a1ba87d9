//! Schedule module - the two repeating tasks of a session
//!
//! Time is virtual: the driver reports elapsed milliseconds and the schedule
//! fires every task that came due in between, in chronological order. When a
//! spawn and a physics tick are due at the same instant the physics tick goes
//! first, so a miss that ends the session also suppresses that spawn.

use crate::core::GameConfig;
use crate::types::TaskKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepeatingTask {
    kind: TaskKind,
    period_ms: u64,
    next_due_ms: u64,
}

impl RepeatingTask {
    pub fn new(kind: TaskKind, period_ms: u64) -> Self {
        Self {
            kind,
            period_ms: period_ms.max(1),
            next_due_ms: 0,
        }
    }

    pub fn kind(&self) -> TaskKind {
        self.kind
    }

    pub fn period_ms(&self) -> u64 {
        self.period_ms
    }

    pub fn next_due_ms(&self) -> u64 {
        self.next_due_ms
    }

    fn arm(&mut self, now_ms: u64) {
        self.next_due_ms = now_ms + self.period_ms;
    }

    fn reschedule(&mut self) {
        self.next_due_ms += self.period_ms;
    }
}

#[derive(Debug, Clone)]
pub struct Schedule {
    now_ms: u64,
    physics: RepeatingTask,
    spawn: RepeatingTask,
    armed: bool,
}

impl Schedule {
    pub fn new(spawn_period_ms: u64, physics_period_ms: u64) -> Self {
        Self {
            now_ms: 0,
            physics: RepeatingTask::new(TaskKind::Physics, physics_period_ms),
            spawn: RepeatingTask::new(TaskKind::Spawn, spawn_period_ms),
            armed: false,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(
            config.spawn_interval_ms as u64,
            config.physics_interval_ms as u64,
        )
    }

    /// Start both tasks; each first fires one full period from now.
    pub fn arm(&mut self) {
        self.physics.arm(self.now_ms);
        self.spawn.arm(self.now_ms);
        self.armed = true;
    }

    /// Cancel both tasks at once.
    pub fn cancel(&mut self) {
        self.armed = false;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// The task that fires next and when, physics first on ties.
    pub fn next_due(&self) -> Option<(TaskKind, u64)> {
        if !self.armed {
            return None;
        }
        let task = if self.physics.next_due_ms <= self.spawn.next_due_ms {
            &self.physics
        } else {
            &self.spawn
        };
        Some((task.kind, task.next_due_ms))
    }

    /// Move the clock forward, firing due tasks in order.
    ///
    /// `on_fire` receives the task and its due time; returning `false` cancels
    /// the schedule and nothing else fires. Returns the number of firings.
    pub fn advance(&mut self, elapsed_ms: u64, mut on_fire: impl FnMut(TaskKind, u64) -> bool) -> u32 {
        let target = self.now_ms.saturating_add(elapsed_ms);
        let mut fired = 0;

        while let Some((kind, due)) = self.next_due() {
            if due > target {
                break;
            }
            self.now_ms = due;
            match kind {
                TaskKind::Physics => self.physics.reschedule(),
                TaskKind::Spawn => self.spawn.reschedule(),
            }
            fired += 1;
            if !on_fire(kind, due) {
                self.cancel();
                break;
            }
        }

        self.now_ms = target;
        fired
    }
}
