//! Performance counters for a playback run.
//!
//! Counter deltas are a pure function of the step kind, so counters at step
//! `k` can be recomputed by folding steps `0..k` just like the view.

use serde::{Deserialize, Serialize};

use crate::step::{Step, StepKind};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceCounters {
    pub operations: u64,
    pub comparisons: u64,
    pub swaps: u64,
    /// Virtual time spent playing since the run started. The player refreshes
    /// it on every clock advance, not only when a step is applied.
    pub elapsed_ms: u64,
}

/// Increment contributed by one applied step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CounterDelta {
    pub operations: u64,
    pub comparisons: u64,
    pub swaps: u64,
}

impl CounterDelta {
    /// Every step is one operation. `Compare` and single-element probes
    /// count as comparisons; `Swap` counts as a swap.
    #[must_use]
    pub fn for_step(kind: &StepKind) -> Self {
        let (comparisons, swaps) = match kind {
            StepKind::Compare { .. } | StepKind::MarkCurrent { .. } => (1, 0),
            StepKind::Swap { .. } => (0, 1),
            _ => (0, 0),
        };
        Self {
            operations: 1,
            comparisons,
            swaps,
        }
    }
}

impl PerformanceCounters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, delta: CounterDelta) {
        self.operations = self.operations.saturating_add(delta.operations);
        self.comparisons = self.comparisons.saturating_add(delta.comparisons);
        self.swaps = self.swaps.saturating_add(delta.swaps);
    }

    pub fn record(&mut self, step: &Step) {
        self.apply(CounterDelta::for_step(&step.kind));
    }

    /// Counters after applying `steps` from zero. `elapsed_ms` stays zero.
    #[must_use]
    pub fn from_steps(steps: &[Step]) -> Self {
        let mut counters = Self::new();
        for step in steps {
            counters.record(step);
        }
        counters
    }

    /// Elapsed time never moves backwards.
    pub fn set_elapsed(&mut self, elapsed_ms: u64) {
        self.elapsed_ms = self.elapsed_ms.max(elapsed_ms);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::sort::bubble_sort;

    #[test]
    fn deltas_by_kind() {
        let compare = CounterDelta::for_step(&StepKind::Compare { i: 0, j: 1 });
        assert_eq!((compare.operations, compare.comparisons, compare.swaps), (1, 1, 0));
        let swap = CounterDelta::for_step(&StepKind::Swap { i: 0, j: 1 });
        assert_eq!((swap.operations, swap.comparisons, swap.swaps), (1, 0, 1));
        let probe = CounterDelta::for_step(&StepKind::MarkCurrent { index: 2 });
        assert_eq!(probe.comparisons, 1);
        let visit = CounterDelta::for_step(&StepKind::Visit { node: 0, from: None });
        assert_eq!((visit.operations, visit.comparisons, visit.swaps), (1, 0, 0));
    }

    #[test]
    fn folding_a_sort_counts_every_step() {
        let trace = bubble_sort(&[5, 3, 4, 1, 2]).unwrap();
        let counters = PerformanceCounters::from_steps(trace.steps());
        assert_eq!(counters.operations, trace.len() as u64);
        assert_eq!(counters.comparisons, 10);
        assert_eq!(counters.swaps, 8);
    }

    #[test]
    fn elapsed_is_monotonic() {
        let mut counters = PerformanceCounters::new();
        counters.set_elapsed(100);
        counters.set_elapsed(40);
        assert_eq!(counters.elapsed_ms, 100);
        counters.reset();
        assert_eq!(counters, PerformanceCounters::default());
    }
}
