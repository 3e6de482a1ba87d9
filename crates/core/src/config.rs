//! Game configuration.
//!
//! Every tunable of a session lives here. Defaults come from
//! `raindrop_types`; `from_env` overrides individual values from `RAINDROP_*`
//! environment variables.

use std::env;
use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::types::*;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub spawn_interval_ms: u32,
    pub physics_interval_ms: u32,
    pub fall_step: u32,
    pub lane_height: u32,
    pub hit_reward: u32,
    pub miss_limit: u32,
    pub special_milestones: [u32; 2],
    pub operand_min: u32,
    pub operand_max: u32,
    pub divisor_max: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            physics_interval_ms: PHYSICS_INTERVAL_MS,
            fall_step: FALL_STEP,
            lane_height: LANE_HEIGHT,
            hit_reward: HIT_REWARD,
            miss_limit: MISS_LIMIT,
            special_milestones: SPECIAL_MILESTONES,
            operand_min: OPERAND_MIN,
            operand_max: OPERAND_MAX,
            divisor_max: DIVISOR_MAX,
        }
    }
}

impl GameConfig {
    /// Load overrides from the environment.
    ///
    /// Recognized variables: `RAINDROP_SPAWN_MS`, `RAINDROP_PHYSICS_MS`,
    /// `RAINDROP_FALL_STEP`, `RAINDROP_LANE_HEIGHT`, `RAINDROP_HIT_REWARD`.
    /// Unparseable values are logged and the default is kept.
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            spawn_interval_ms: env_or("RAINDROP_SPAWN_MS", d.spawn_interval_ms),
            physics_interval_ms: env_or("RAINDROP_PHYSICS_MS", d.physics_interval_ms),
            fall_step: env_or("RAINDROP_FALL_STEP", d.fall_step),
            lane_height: env_or("RAINDROP_LANE_HEIGHT", d.lane_height),
            hit_reward: env_or("RAINDROP_HIT_REWARD", d.hit_reward),
            ..d
        }
        .sanitized()
    }

    /// Clamp values that would stall or break a session.
    ///
    /// Zero periods would make a repeating task fire forever within one
    /// advance; a zero miss limit would end the session before it starts.
    pub fn sanitized(mut self) -> Self {
        self.spawn_interval_ms = self.spawn_interval_ms.max(1);
        self.physics_interval_ms = self.physics_interval_ms.max(1);
        self.miss_limit = self.miss_limit.max(1);
        self.operand_min = self.operand_min.max(1);
        self.operand_max = self.operand_max.max(self.operand_min);
        self.divisor_max = self.divisor_max.max(self.operand_min);
        self
    }

    /// Physics ticks a freshly spawned problem survives before it is missed.
    pub fn ticks_to_miss(&self) -> u32 {
        if self.fall_step == 0 {
            return u32::MAX;
        }
        self.lane_height / self.fall_step + 1
    }
}

/// Read `key` from the environment, keeping `default` when unset or invalid.
pub fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr + Copy,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => match raw.trim().parse() {
            Ok(v) => v,
            Err(e) => {
                warn!("Invalid {key} value {raw:?}: {e}; using default");
                default
            }
        },
        Err(_) => default,
    }
}
