//! Error taxonomy for the engine.
//!
//! - [`ValidationError`]: user input rejected before any trace exists.
//! - [`UnsupportedFamilyError`]: an algorithm was paired with a family it
//!   does not belong to.
//! - [`ReducerError`]: a step could not be applied to a view. This is a
//!   programming defect, never a user error.

use thiserror::Error;

use crate::family::{Algorithm, Family};

pub type Result<T> = std::result::Result<T, EngineError>;

/// Umbrella error for callers that cross several engine boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    UnsupportedFamily(#[from] UnsupportedFamilyError),

    #[error(transparent)]
    Reducer(#[from] ReducerError),
}

/// Rejected user input. No trace is produced when this is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{what} must not be empty")]
    Empty { what: &'static str },

    #[error("{what} out of range: {value} (allowed {min}..={max})")]
    OutOfRange {
        what: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("missing required parameter: {what}")]
    Missing { what: &'static str },

    #[error("unknown node label: {label}")]
    UnknownNode { label: String },

    #[error("invalid {what}: {message}")]
    Invalid { what: &'static str, message: String },

    #[error("{algorithm} expects {expected} input")]
    WrongInput {
        algorithm: Algorithm,
        expected: &'static str,
    },
}

impl ValidationError {
    #[must_use]
    pub fn empty(what: &'static str) -> Self {
        Self::Empty { what }
    }

    #[must_use]
    pub fn missing(what: &'static str) -> Self {
        Self::Missing { what }
    }

    #[must_use]
    pub fn invalid(what: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            what,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn out_of_range(what: &'static str, value: impl Into<i64>, min: i64, max: i64) -> Self {
        Self::OutOfRange {
            what,
            value: value.into(),
            min,
            max,
        }
    }

    /// Check `value` against an inclusive range.
    pub fn check_range(
        what: &'static str,
        value: i64,
        min: i64,
        max: i64,
    ) -> std::result::Result<(), Self> {
        if (min..=max).contains(&value) {
            Ok(())
        } else {
            Err(Self::out_of_range(what, value, min, max))
        }
    }
}

/// An algorithm was requested under a family that cannot visualize it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{algorithm} is not a {family} algorithm")]
pub struct UnsupportedFamilyError {
    pub algorithm: Algorithm,
    pub family: Family,
}

/// A step that the reducer cannot apply. Aborts the playback session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReducerError {
    #[error("step #{ordinal} ({kind}) does not apply to a {view} view")]
    ForeignStep {
        ordinal: u64,
        kind: &'static str,
        view: &'static str,
    },

    #[error("step #{ordinal} ({kind}) references position {position}, bound is {bound}")]
    OutOfBounds {
        ordinal: u64,
        kind: &'static str,
        position: usize,
        bound: usize,
    },

    #[error("step #{ordinal} returns from call {frame} but the active call is {active:?}")]
    CallMismatch {
        ordinal: u64,
        frame: usize,
        active: Option<usize>,
    },
}

/// Name used by hosts that surface reducer failures as internal errors.
pub type InternalReducerError = ReducerError;

impl ReducerError {
    /// Ordinal of the offending step.
    #[must_use]
    pub fn ordinal(&self) -> u64 {
        match self {
            Self::ForeignStep { ordinal, .. }
            | Self::OutOfBounds { ordinal, .. }
            | Self::CallMismatch { ordinal, .. } => *ordinal,
        }
    }
}
