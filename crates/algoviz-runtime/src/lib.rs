#![forbid(unsafe_code)]

//! Playback runtime for algoviz traces.
//!
//! The host owns the clock. It calls [`Player::tick`] (or
//! [`Visualizer::tick`]) with elapsed time and receives [`PlayerEvent`]s
//! through observers or channel subscriptions. Every scheduling epoch is
//! tagged with a [`Generation`], so work queued before a `stop`, `reset`,
//! `pause`, `seek`, or new `start` can never land in the new session.
//!
//! # Example
//!
//! ```
//! use algoviz_core::{AlgorithmMetadata, UserParams};
//! use algoviz_runtime::{PlayState, PlayerEvent, Visualizer};
//! use web_time::Duration;
//!
//! let mut viz = Visualizer::default();
//! viz.select(AlgorithmMetadata::new("Bubble Sort"));
//! let events = viz.subscribe();
//! viz.start(&UserParams::default().with_values(vec![5, 3, 4, 1, 2])).unwrap();
//! viz.tick(Duration::from_secs(10));
//!
//! assert_eq!(viz.state(), PlayState::Completed);
//! let completed = events
//!     .try_iter()
//!     .filter(|e| matches!(e, PlayerEvent::Completed(_)))
//!     .count();
//! assert_eq!(completed, 1);
//! ```

pub mod config;
pub mod observer;
pub mod player;
pub mod ticket;
pub mod visualizer;

pub use config::{EngineConfig, PlayerConfig};
pub use observer::{PlayerEvent, PlayerObserver, PlayerUpdate};
pub use player::{MAX_STEPS_PER_TICK, PlayState, Player};
pub use ticket::{Generation, GenerationSource, GenerationToken, Ticket};
pub use visualizer::{Visualizer, VisualizerRequest};
