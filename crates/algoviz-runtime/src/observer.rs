#![forbid(unsafe_code)]

//! Player output: events, callback observers, and channel subscriptions.
//!
//! Events are delivered synchronously from inside player calls. Channel
//! subscribers whose receiver has been dropped are pruned on the next send.

use std::sync::mpsc;

use serde::{Deserialize, Serialize};

use algoviz_core::{PerformanceCounters, TraceResult, ViewState};

use crate::player::PlayState;

/// Snapshot published after every applied step and every state transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerUpdate {
    pub view: ViewState,
    pub counters: PerformanceCounters,
    pub state: PlayState,
    /// Number of steps applied.
    pub cursor: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum PlayerEvent {
    Update(PlayerUpdate),
    /// Sent once per run, when the last step has been applied.
    Completed(TraceResult),
    /// The reducer rejected a step and the session was abandoned.
    Aborted(String),
}

impl PlayerEvent {
    #[must_use]
    pub fn as_update(&self) -> Option<&PlayerUpdate> {
        match self {
            Self::Update(update) => Some(update),
            _ => None,
        }
    }
}

/// Callback interface for player output.
///
/// Closures taking `&PlayerEvent` implement this automatically.
pub trait PlayerObserver: Send {
    fn on_event(&mut self, event: &PlayerEvent);
}

impl<F> PlayerObserver for F
where
    F: FnMut(&PlayerEvent) + Send,
{
    fn on_event(&mut self, event: &PlayerEvent) {
        self(event);
    }
}

#[derive(Default)]
pub(crate) struct Observers {
    callbacks: Vec<Box<dyn PlayerObserver>>,
    channels: Vec<mpsc::Sender<PlayerEvent>>,
}

impl Observers {
    pub(crate) fn add(&mut self, observer: Box<dyn PlayerObserver>) {
        self.callbacks.push(observer);
    }

    pub(crate) fn subscribe(&mut self) -> mpsc::Receiver<PlayerEvent> {
        let (tx, rx) = mpsc::channel();
        self.channels.push(tx);
        rx
    }

    pub(crate) fn len(&self) -> usize {
        self.callbacks.len() + self.channels.len()
    }

    pub(crate) fn emit(&mut self, event: PlayerEvent) {
        for observer in &mut self.callbacks {
            observer.on_event(&event);
        }
        let before = self.channels.len();
        self.channels.retain(|tx| tx.send(event.clone()).is_ok());
        let dropped = before - self.channels.len();
        if dropped > 0 {
            tracing::debug!(
                player_event = "subscriber_dropped",
                dropped,
                remaining = self.channels.len(),
            );
        }
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("callbacks", &self.callbacks.len())
            .field("channels", &self.channels.len())
            .finish()
    }
}
