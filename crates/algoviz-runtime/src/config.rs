#![forbid(unsafe_code)]

//! Playback and engine configuration.
//!
//! Both structs deserialize with `#[serde(default)]`, so a host can supply a
//! partial document and inherit the remaining defaults.

use serde::{Deserialize, Serialize};
use web_time::Duration;

use algoviz_core::InputConfig;

/// Step cadence of a [`Player`](crate::Player).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Delay between two applied steps.
    pub speed_ms: u64,
    pub min_speed_ms: u64,
    pub max_speed_ms: u64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed_ms: 50,
            min_speed_ms: 5,
            max_speed_ms: 2000,
        }
    }
}

impl PlayerConfig {
    #[must_use]
    pub fn with_speed_ms(mut self, speed_ms: u64) -> Self {
        self.speed_ms = speed_ms;
        self
    }

    /// Set the accepted speed range. Bounds are reordered if reversed.
    #[must_use]
    pub fn with_speed_range(mut self, min_ms: u64, max_ms: u64) -> Self {
        self.min_speed_ms = min_ms.min(max_ms);
        self.max_speed_ms = min_ms.max(max_ms);
        self
    }

    /// Clamp a requested speed into the configured range.
    #[must_use]
    pub fn clamp_speed(&self, speed_ms: u64) -> u64 {
        let lo = self.min_speed_ms.min(self.max_speed_ms);
        let hi = self.min_speed_ms.max(self.max_speed_ms);
        speed_ms.clamp(lo, hi)
    }

    /// Initial step delay, clamped.
    #[must_use]
    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.clamp_speed(self.speed_ms))
    }
}

/// Everything a [`Visualizer`](crate::Visualizer) needs at construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub input: InputConfig,
    pub player: PlayerConfig,
}

impl EngineConfig {
    #[must_use]
    pub fn with_input(mut self, input: InputConfig) -> Self {
        self.input = input;
        self
    }

    #[must_use]
    pub fn with_player(mut self, player: PlayerConfig) -> Self {
        self.player = player;
        self
    }

    /// Shorthand for `with_input(self.input.with_seed(seed))`.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.input = self.input.with_seed(seed);
        self
    }
}
