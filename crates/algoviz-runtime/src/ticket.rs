#![forbid(unsafe_code)]

//! Generation tokens and scheduled step tickets.
//!
//! Each scheduling epoch of a [`Player`](crate::Player) has a [`Generation`].
//! Starting, stopping, resetting, pausing, or seeking opens a new epoch, so
//! tickets issued before it are recognized as stale and dropped without
//! touching the session.
//!
//! [`GenerationToken`] is the cloneable observer half, the same split as a
//! cancellation source and its tokens: a host timer thread can hold one and
//! skip delivering a ticket once the epoch has moved on.
//!
//! # Invariants
//!
//! - Generations issued by one source are strictly increasing.
//! - A ticket is live only while its generation equals the source's current
//!   generation.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use web_time::Duration;

/// A scheduling epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Generation(u64);

impl Generation {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gen#{}", self.0)
    }
}

/// Issues generations. Owned by the player.
#[derive(Debug)]
pub struct GenerationSource {
    current: Arc<AtomicU64>,
}

impl GenerationSource {
    #[must_use]
    pub fn new() -> Self {
        Self {
            current: Arc::new(AtomicU64::new(0)),
        }
    }

    #[must_use]
    pub fn current(&self) -> Generation {
        Generation(self.current.load(Ordering::Acquire))
    }

    /// Open a new epoch, invalidating every outstanding ticket and token.
    pub fn advance(&self) -> Generation {
        Generation(self.current.fetch_add(1, Ordering::AcqRel) + 1)
    }

    #[must_use]
    pub fn is_current(&self, generation: Generation) -> bool {
        self.current() == generation
    }

    /// A token bound to the current epoch.
    #[must_use]
    pub fn token(&self) -> GenerationToken {
        GenerationToken {
            issued: self.current(),
            current: Arc::clone(&self.current),
        }
    }
}

impl Default for GenerationSource {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloneable view of one epoch. Cheap to send across threads.
#[derive(Debug, Clone)]
pub struct GenerationToken {
    issued: Generation,
    current: Arc<AtomicU64>,
}

impl GenerationToken {
    #[must_use]
    pub fn generation(&self) -> Generation {
        self.issued
    }

    /// `true` once the source has advanced past this token's epoch.
    #[inline]
    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.current.load(Ordering::Acquire) != self.issued.0
    }
}

/// A pending application of one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub generation: Generation,
    /// Index of the step this ticket applies.
    pub step_index: usize,
    /// Virtual time at which the step becomes due.
    pub due_at: Duration,
}

impl Ticket {
    #[must_use]
    pub fn is_due(&self, now: Duration) -> bool {
        self.due_at <= now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generations_increase() {
        let source = GenerationSource::new();
        let a = source.current();
        let b = source.advance();
        let c = source.advance();
        assert!(a < b && b < c);
        assert!(source.is_current(c));
        assert!(!source.is_current(b));
        assert_eq!(c.to_string(), "gen#2");
    }

    #[test]
    fn tokens_go_stale_on_advance() {
        let source = GenerationSource::new();
        let token = source.token();
        let clone = token.clone();
        assert!(!token.is_stale());
        source.advance();
        assert!(token.is_stale());
        assert!(clone.is_stale());
        assert!(!source.token().is_stale());
    }

    #[test]
    fn token_observed_from_another_thread() {
        let source = GenerationSource::new();
        let token = source.token();
        source.advance();
        let stale = std::thread::spawn(move || token.is_stale()).join().unwrap();
        assert!(stale);
    }

    #[test]
    fn ticket_due() {
        let ticket = Ticket {
            generation: Generation(1),
            step_index: 0,
            due_at: Duration::from_millis(100),
        };
        assert!(!ticket.is_due(Duration::from_millis(99)));
        assert!(ticket.is_due(Duration::from_millis(100)));
    }
}
