#![forbid(unsafe_code)]

//! Host-facing control surface.
//!
//! [`Visualizer`] ties family selection, input resolution, trace generation,
//! and playback together. Invalid input is reported before anything about
//! the current session changes.

use std::sync::mpsc;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};
use web_time::Duration;

use algoviz_core::family;
use algoviz_core::{
    Algorithm, AlgorithmMetadata, EngineError, Family, PerformanceReport, Trace,
    UnsupportedFamilyError, UserParams, generate,
};

use crate::config::EngineConfig;
use crate::observer::{PlayerEvent, PlayerObserver};
use crate::player::{PlayState, Player};

/// One host request: which algorithm entry, and its parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizerRequest {
    pub metadata: AlgorithmMetadata,
    pub params: UserParams,
}

impl VisualizerRequest {
    #[must_use]
    pub fn new(metadata: AlgorithmMetadata, params: UserParams) -> Self {
        Self { metadata, params }
    }
}

#[derive(Debug)]
pub struct Visualizer {
    config: EngineConfig,
    rng: SmallRng,
    family: Family,
    algorithm: Algorithm,
    metadata: Option<AlgorithmMetadata>,
    player: Player,
}

impl Default for Visualizer {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Visualizer {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let family = Family::Sorting;
        Self {
            rng: SmallRng::seed_from_u64(config.input.seed),
            player: Player::new(config.player.clone()),
            config,
            family,
            algorithm: family.default_algorithm(),
            metadata: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn family(&self) -> Family {
        self.family
    }

    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    #[must_use]
    pub fn metadata(&self) -> Option<&AlgorithmMetadata> {
        self.metadata.as_ref()
    }

    #[must_use]
    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    // -- selection ---------------------------------------------------------

    /// Classify `metadata` and switch to its family and algorithm.
    pub fn select(&mut self, metadata: AlgorithmMetadata) -> (Family, Algorithm) {
        let (family, algorithm) = family::resolve(&metadata);
        tracing::info!(
            visualizer_event = "select",
            name = %metadata.name,
            family = family.label(),
            algorithm = algorithm.key(),
        );
        self.family = family;
        self.algorithm = algorithm;
        self.metadata = Some(metadata);
        (family, algorithm)
    }

    /// Switch family, falling back to its default algorithm when the current
    /// one belongs elsewhere.
    pub fn set_family(&mut self, family: Family) {
        self.family = family;
        if !family.supports(self.algorithm) {
            self.algorithm = family.default_algorithm();
        }
    }

    /// Pick an algorithm inside the current family.
    pub fn set_algorithm(&mut self, algorithm: Algorithm) -> Result<(), UnsupportedFamilyError> {
        self.family.ensure_supports(algorithm)?;
        self.algorithm = algorithm;
        Ok(())
    }

    // -- runs --------------------------------------------------------------

    /// Resolve `params` and generate a trace without touching playback.
    pub fn prepare(&mut self, params: &UserParams) -> Result<Trace, EngineError> {
        let input = params.resolve(self.algorithm, &self.config.input, &mut self.rng)?;
        Ok(generate(self.algorithm, &input)?)
    }

    /// Generate a trace for the selected algorithm and start playing it.
    ///
    /// On error the current session is left as it was.
    pub fn start(&mut self, params: &UserParams) -> Result<(), EngineError> {
        let trace = self.prepare(params).inspect_err(|err| {
            tracing::warn!(
                visualizer_event = "start_rejected",
                algorithm = self.algorithm.key(),
                error = %err,
            );
        })?;
        self.player.start(trace);
        Ok(())
    }

    /// `select` followed by `start`.
    pub fn submit(&mut self, request: VisualizerRequest) -> Result<(), EngineError> {
        self.select(request.metadata);
        self.start(&request.params)
    }

    pub fn pause(&mut self) {
        self.player.pause();
    }

    pub fn resume(&mut self) {
        self.player.resume();
    }

    pub fn stop(&mut self) {
        self.player.stop();
    }

    pub fn reset(&mut self) {
        self.player.reset();
    }

    pub fn set_speed(&mut self, speed_ms: u64) -> u64 {
        self.player.set_speed(speed_ms)
    }

    pub fn seek(&mut self, index: usize) {
        self.player.seek(index);
    }

    pub fn step_forward(&mut self) -> bool {
        self.player.step_forward()
    }

    pub fn tick(&mut self, dt: Duration) -> usize {
        self.player.tick(dt)
    }

    #[must_use]
    pub fn state(&self) -> PlayState {
        self.player.state()
    }

    pub fn subscribe(&mut self) -> mpsc::Receiver<PlayerEvent> {
        self.player.subscribe()
    }

    pub fn add_observer(&mut self, observer: impl PlayerObserver + 'static) {
        self.player.add_observer(observer);
    }

    /// Counters and complexity for the loaded trace.
    #[must_use]
    pub fn report(&self) -> Option<PerformanceReport> {
        let trace = self.player.trace()?;
        Some(PerformanceReport::new(
            trace.algorithm(),
            self.player.counters(),
            self.player.cursor(),
            trace.len(),
        ))
    }
}
