#![forbid(unsafe_code)]

//! Host-driven trace playback.
//!
//! A [`Player`] owns at most one playback session: a [`Trace`], a cursor into
//! it, the live [`ViewState`], and the run's [`PerformanceCounters`]. Time is
//! virtual. The host advances it with [`Player::tick`] (or delivers tickets
//! from its own timers with [`Player::fire`]); nothing happens between calls.
//!
//! # Scheduling
//!
//! Exactly one step is pending at a time, as a [`Ticket`] tagged with the
//! current [`Generation`]. Applying step `i` schedules step `i + 1` at
//! `due_at(i) + speed`, so cadence does not depend on tick granularity.
//! `start`, `stop`, `reset`, `pause`, and `seek` open a new generation and
//! drop the pending ticket; stale tickets are ignored by `fire`.
//!
//! # Invariants
//!
//! - After any call, the live view equals `replay(trace, cursor)`.
//! - Steps are applied strictly in trace order, each at most once per pass.
//! - `set_speed` never moves the pending ticket; only later steps use the
//!   new delay.
//! - `PlayerEvent::Completed` is sent once per run.
//!
//! # Failure Modes
//!
//! | Condition | Behavior |
//! |-----------|----------|
//! | Reducer rejects a step | Session aborted, view restored to baseline, state `Idle`, `Aborted` event |
//! | Stale ticket delivered | Ignored, logged at debug |
//! | Huge `dt` | At most `MAX_STEPS_PER_TICK` steps applied per tick; the rest stay due |

use std::fmt;
use std::sync::mpsc;

use serde::{Deserialize, Serialize};
use web_time::Duration;

use algoviz_core::{PerformanceCounters, ReducerError, Trace, ViewState, replay};

use crate::config::PlayerConfig;
use crate::observer::{Observers, PlayerEvent, PlayerObserver, PlayerUpdate};
use crate::ticket::{Generation, GenerationSource, GenerationToken, Ticket};

/// Upper bound on steps applied by one [`Player::tick`].
pub const MAX_STEPS_PER_TICK: usize = 4096;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayState {
    #[default]
    Idle,
    Playing,
    Paused,
    Stopped,
    Completed,
}

impl PlayState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Playing => "playing",
            Self::Paused => "paused",
            Self::Stopped => "stopped",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for PlayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct Session {
    trace: Trace,
    baseline: ViewState,
    view: ViewState,
    cursor: usize,
    counters: PerformanceCounters,
    /// Virtual time spent in `Playing` since the run started.
    elapsed: Duration,
    completion_sent: bool,
}

impl Session {
    fn new(trace: Trace) -> Self {
        let baseline = ViewState::initial(&trace);
        Self {
            view: baseline.clone(),
            baseline,
            trace,
            cursor: 0,
            counters: PerformanceCounters::new(),
            elapsed: Duration::ZERO,
            completion_sent: false,
        }
    }

    fn rewind(&mut self) {
        self.view = self.baseline.clone();
        self.cursor = 0;
        self.counters.reset();
        self.elapsed = Duration::ZERO;
    }

    fn is_exhausted(&self) -> bool {
        self.cursor >= self.trace.len()
    }

    /// Apply the step under the cursor.
    fn apply_next(&mut self) -> Result<bool, ReducerError> {
        let Some(step) = self.trace.step(self.cursor) else {
            return Ok(false);
        };
        self.view.apply(step)?;
        self.counters.record(step);
        self.counters.set_elapsed(duration_ms(self.elapsed));
        self.cursor += 1;
        tracing::debug!(
            player_event = "step_applied",
            kind = step.kind.name(),
            ordinal = step.ordinal,
            cursor = self.cursor,
        );
        Ok(true)
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// Plays one trace at a time against a virtual clock.
#[derive(Debug)]
pub struct Player {
    config: PlayerConfig,
    speed: Duration,
    state: PlayState,
    session: Option<Session>,
    generations: GenerationSource,
    now: Duration,
    pending: Option<Ticket>,
    observers: Observers,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(PlayerConfig::default())
    }
}

impl Player {
    #[must_use]
    pub fn new(config: PlayerConfig) -> Self {
        Self {
            speed: config.step_delay(),
            config,
            state: PlayState::Idle,
            session: None,
            generations: GenerationSource::new(),
            now: Duration::ZERO,
            pending: None,
            observers: Observers::default(),
        }
    }

    // -- accessors ---------------------------------------------------------

    #[must_use]
    pub fn state(&self) -> PlayState {
        self.state
    }

    #[must_use]
    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    #[must_use]
    pub fn trace(&self) -> Option<&Trace> {
        self.session.as_ref().map(|s| &s.trace)
    }

    #[must_use]
    pub fn view(&self) -> Option<&ViewState> {
        self.session.as_ref().map(|s| &s.view)
    }

    /// Steps applied so far.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.session.as_ref().map_or(0, |s| s.cursor)
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.session.as_ref().map_or(0, |s| s.trace.len())
    }

    #[must_use]
    pub fn counters(&self) -> PerformanceCounters {
        self.session
            .as_ref()
            .map_or_else(PerformanceCounters::new, |s| s.counters)
    }

    #[must_use]
    pub fn speed(&self) -> Duration {
        self.speed
    }

    #[must_use]
    pub fn speed_ms(&self) -> u64 {
        duration_ms(self.speed)
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generations.current()
    }

    /// A token that goes stale when the current epoch ends.
    #[must_use]
    pub fn token(&self) -> GenerationToken {
        self.generations.token()
    }

    #[must_use]
    pub fn pending_ticket(&self) -> Option<Ticket> {
        self.pending
    }

    /// Virtual time at which the host should call back, if anything is due.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.map(|t| t.due_at)
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    // -- observers ---------------------------------------------------------

    pub fn add_observer(&mut self, observer: impl PlayerObserver + 'static) {
        self.observers.add(Box::new(observer));
    }

    pub fn subscribe(&mut self) -> mpsc::Receiver<PlayerEvent> {
        self.observers.subscribe()
    }

    // -- lifecycle ---------------------------------------------------------

    /// Replace any current session with `trace` and begin playing.
    ///
    /// Step 0 is due immediately and is applied by the next `tick`.
    pub fn start(&mut self, trace: Trace) {
        let generation = self.generations.advance();
        tracing::info!(
            player_event = "playback_start",
            algorithm = trace.algorithm().key(),
            steps = trace.len(),
            generation = generation.get(),
            speed_ms = self.speed_ms(),
        );
        self.session = Some(Session::new(trace));
        self.pending = None;
        self.state = PlayState::Playing;
        self.publish();
        self.schedule(Duration::ZERO);
    }

    /// Suspend playback, keeping the cursor.
    pub fn pause(&mut self) {
        if self.state != PlayState::Playing {
            tracing::debug!(player_event = "pause_ignored", state = %self.state);
            return;
        }
        self.invalidate();
        self.transition(PlayState::Paused);
    }

    /// Continue a paused run; the step at the cursor is due after `speed`.
    pub fn resume(&mut self) {
        if self.state != PlayState::Paused {
            tracing::debug!(player_event = "resume_ignored", state = %self.state);
            return;
        }
        self.transition(PlayState::Playing);
        self.schedule(self.speed);
    }

    /// Abandon the run and restore the baseline view.
    pub fn stop(&mut self) {
        self.rewind_to(PlayState::Stopped);
    }

    /// Like [`stop`](Self::stop), but back to `Idle`.
    pub fn reset(&mut self) {
        self.rewind_to(PlayState::Idle);
    }

    /// Change the delay between steps, clamped to the configured range.
    ///
    /// The pending ticket keeps its due time. Returns the delay in effect.
    pub fn set_speed(&mut self, speed_ms: u64) -> u64 {
        let clamped = self.config.clamp_speed(speed_ms);
        self.speed = Duration::from_millis(clamped);
        tracing::debug!(
            player_event = "speed_changed",
            requested_ms = speed_ms,
            speed_ms = clamped,
        );
        clamped
    }

    /// Jump to `index` applied steps, re-deriving view and counters.
    ///
    /// A playing run keeps playing from the new cursor; any other state with
    /// a trace becomes `Paused`.
    pub fn seek(&mut self, index: usize) {
        let Some(session) = self.session.as_mut() else {
            tracing::debug!(player_event = "seek_ignored", reason = "no_session");
            return;
        };
        let target = index.min(session.trace.len());
        let view = match replay(&session.trace, target) {
            Ok(view) => view,
            Err(err) => {
                self.abort(&err);
                return;
            }
        };
        session.view = view;
        session.cursor = target;
        session.counters = PerformanceCounters::from_steps(&session.trace.steps()[..target]);
        session.counters.set_elapsed(duration_ms(session.elapsed));
        let was_playing = self.state == PlayState::Playing;
        self.invalidate();
        tracing::debug!(player_event = "seek", cursor = target, resume = was_playing);
        if was_playing {
            self.publish();
            self.schedule(self.speed);
        } else if self.state == PlayState::Paused {
            self.publish();
        } else {
            self.transition(PlayState::Paused);
        }
    }

    /// Apply exactly one step of a paused run.
    ///
    /// Returns `true` if a step was applied.
    pub fn step_forward(&mut self) -> bool {
        if self.state != PlayState::Paused {
            return false;
        }
        match self.apply_current() {
            Some(true) => {
                self.publish();
                if self.session.as_ref().is_some_and(Session::is_exhausted) {
                    self.complete();
                }
                true
            }
            _ => false,
        }
    }

    // -- time --------------------------------------------------------------

    /// Advance the virtual clock by `dt`, applying every step that falls due.
    ///
    /// Returns the number of steps applied.
    pub fn tick(&mut self, dt: Duration) -> usize {
        let target = self.now.saturating_add(dt);
        let mut applied = 0;
        while applied < MAX_STEPS_PER_TICK {
            let Some(ticket) = self.pending else { break };
            if !ticket.is_due(target) || !self.fire(ticket) {
                break;
            }
            applied += 1;
        }
        if applied == MAX_STEPS_PER_TICK {
            tracing::warn!(
                player_event = "tick_saturated",
                applied,
                cursor = self.cursor(),
            );
        }
        self.advance_clock(target);
        applied
    }

    /// Deliver a ticket from a host-owned timer.
    ///
    /// Advances the clock to the ticket's due time. Returns `false` for a
    /// stale or unknown ticket, which is otherwise ignored.
    pub fn fire(&mut self, ticket: Ticket) -> bool {
        let live = self.state == PlayState::Playing
            && self.generations.is_current(ticket.generation)
            && self.pending.is_some_and(|p| {
                p.generation == ticket.generation && p.step_index == ticket.step_index
            });
        if !live {
            tracing::debug!(
                player_event = "ticket_discarded",
                generation = ticket.generation.get(),
                current = self.generation().get(),
                step_index = ticket.step_index,
            );
            return false;
        }
        self.pending = None;
        self.advance_clock(ticket.due_at);
        match self.apply_current() {
            Some(true) => {
                self.publish();
                if self.session.as_ref().is_some_and(Session::is_exhausted) {
                    self.complete();
                } else {
                    self.pending = Some(Ticket {
                        generation: ticket.generation,
                        step_index: ticket.step_index + 1,
                        due_at: ticket.due_at.saturating_add(self.speed),
                    });
                }
                true
            }
            _ => false,
        }
    }

    /// Drive a playing run to the end, sleeping between steps.
    ///
    /// `sleep` receives each wait; the clock then advances by exactly that
    /// amount. Returns the number of steps applied.
    pub fn run_with_sleeper<F>(&mut self, mut sleep: F) -> usize
    where
        F: FnMut(Duration),
    {
        let mut applied = 0;
        while self.state == PlayState::Playing {
            let Some(deadline) = self.next_deadline() else {
                break;
            };
            let wait = deadline.saturating_sub(self.now);
            if !wait.is_zero() {
                sleep(wait);
            }
            applied += self.tick(wait);
        }
        applied
    }

    // -- internals ---------------------------------------------------------

    fn advance_clock(&mut self, to: Duration) {
        if to <= self.now {
            return;
        }
        if self.state == PlayState::Playing
            && let Some(session) = self.session.as_mut()
        {
            session.elapsed = session.elapsed.saturating_add(to - self.now);
            session.counters.set_elapsed(duration_ms(session.elapsed));
        }
        self.now = to;
    }

    /// Schedule the step under the cursor after `delay`, or complete.
    fn schedule(&mut self, delay: Duration) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        if session.is_exhausted() {
            self.complete();
            return;
        }
        self.pending = Some(Ticket {
            generation: self.generations.current(),
            step_index: session.cursor,
            due_at: self.now.saturating_add(delay),
        });
    }

    /// Open a new generation and drop the pending ticket.
    fn invalidate(&mut self) {
        let generation = self.generations.advance();
        if let Some(ticket) = self.pending.take() {
            tracing::debug!(
                player_event = "ticket_cancelled",
                generation = generation.get(),
                step_index = ticket.step_index,
            );
        }
    }

    /// Apply one step. `None` when there is no session or it was aborted.
    fn apply_current(&mut self) -> Option<bool> {
        let result = self.session.as_mut()?.apply_next();
        match result {
            Ok(applied) => Some(applied),
            Err(err) => {
                self.abort(&err);
                None
            }
        }
    }

    fn rewind_to(&mut self, state: PlayState) {
        self.invalidate();
        if let Some(session) = self.session.as_mut() {
            session.rewind();
        }
        tracing::info!(
            player_event = "playback_stop",
            reason = state.as_str(),
            generation = self.generation().get(),
        );
        self.transition(state);
    }

    fn complete(&mut self) {
        self.pending = None;
        self.transition(PlayState::Completed);
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.completion_sent {
            return;
        }
        session.completion_sent = true;
        tracing::info!(
            player_event = "playback_complete",
            algorithm = session.trace.algorithm().key(),
            steps = session.trace.len(),
            operations = session.counters.operations,
            elapsed_ms = session.counters.elapsed_ms,
        );
        let result = session.trace.result().clone();
        self.observers.emit(PlayerEvent::Completed(result));
    }

    fn abort(&mut self, err: &ReducerError) {
        self.invalidate();
        let algorithm = self.session.as_ref().map(|s| s.trace.algorithm().key());
        tracing::error!(
            player_event = "playback_aborted",
            algorithm = algorithm.unwrap_or("none"),
            ordinal = err.ordinal(),
            error = %err,
        );
        if let Some(session) = self.session.as_mut() {
            session.rewind();
        }
        self.observers.emit(PlayerEvent::Aborted(err.to_string()));
        self.transition(PlayState::Idle);
    }

    fn transition(&mut self, state: PlayState) {
        if self.state != state {
            tracing::debug!(player_event = "state", from = %self.state, to = %state);
        }
        self.state = state;
        self.publish();
    }

    fn publish(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let update = PlayerUpdate {
            view: session.view.clone(),
            counters: session.counters,
            state: self.state,
            cursor: session.cursor,
            total: session.trace.len(),
        };
        self.observers.emit(PlayerEvent::Update(update));
    }
}
