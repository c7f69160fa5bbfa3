#![forbid(unsafe_code)]

//! algoviz public facade.
//!
//! Re-exports the trace model and generators from `algoviz-core` and, with
//! the default `runtime` feature, the player and [`Visualizer`] control
//! surface from `algoviz-runtime`. Most hosts only need the [`prelude`].

// --- Core re-exports -------------------------------------------------------

pub use algoviz_core::{
    Algorithm, AlgorithmMetadata, ArrayMode, Baseline, Cell, ComplexityInfo, EngineError, Family,
    PerformanceCounters, PerformanceReport, ReducerError, Result, Step, StepKind, Trace,
    TraceInput, TraceResult, UnsupportedFamilyError, UserParams, ValidationError, ViewState,
    generate, reduce, replay,
};

// --- Runtime re-exports ----------------------------------------------------

#[cfg(feature = "runtime")]
pub use algoviz_runtime::{
    EngineConfig, PlayState, Player, PlayerConfig, PlayerEvent, PlayerObserver, PlayerUpdate,
    Ticket, Visualizer, VisualizerRequest,
};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Algorithm, AlgorithmMetadata, EngineError, Family, Result, StepKind, Trace, TraceResult,
        UserParams, ViewState, generate, replay,
    };

    #[cfg(feature = "runtime")]
    pub use crate::{PlayState, Player, PlayerEvent, Visualizer, VisualizerRequest};

    pub use crate::core;
    #[cfg(feature = "runtime")]
    pub use crate::runtime;
}

pub use algoviz_core as core;
#[cfg(feature = "runtime")]
pub use algoviz_runtime as runtime;
