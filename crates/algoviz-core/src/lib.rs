#![forbid(unsafe_code)]

//! Core of the algoviz engine: traces, generators, and view state.
//!
//! Everything in this crate is pure. A generator turns validated input into
//! an immutable [`Trace`]; the reducer in [`view`] folds trace steps into a
//! renderer-facing [`ViewState`]. Timing and playback live in
//! `algoviz-runtime`.
//!
//! # Data flow
//!
//! ```text
//! UserParams --resolve--> TraceInput --generate--> Trace --replay--> ViewState
//! ```
//!
//! # Example
//!
//! ```
//! use algoviz_core::generate::sort::bubble_sort;
//! use algoviz_core::view::replay;
//!
//! let trace = bubble_sort(&[5, 3, 4, 1, 2]).unwrap();
//! let view = replay(&trace, trace.len()).unwrap();
//! assert!(view.result_matches(trace.result()));
//! ```

pub mod call_tree;
pub mod complexity;
pub mod config;
pub mod counters;
pub mod error;
pub mod family;
pub mod generate;
pub mod graph;
pub mod input;
pub mod step;
pub mod trace;
pub mod view;

pub use call_tree::{CallFrame, CallTree, FrameId};
pub use complexity::{ComplexityInfo, PerformanceReport};
pub use config::InputConfig;
pub use counters::{CounterDelta, PerformanceCounters};
pub use error::{
    EngineError, InternalReducerError, ReducerError, Result, UnsupportedFamilyError,
    ValidationError,
};
pub use family::{Algorithm, AlgorithmMetadata, Family};
pub use generate::generate;
pub use graph::{Edge, GraphSpec, NodeId};
pub use input::{ArrayMode, Item, TraceInput, UserParams};
pub use step::{Cell, Step, StepKind};
pub use trace::{Baseline, Trace, TraceBuilder, TraceResult};
pub use view::{ViewState, reduce, replay};
