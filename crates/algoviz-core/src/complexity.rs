//! Static complexity catalog and end-of-run performance reports.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::counters::PerformanceCounters;
use crate::family::Algorithm;

/// Asymptotic costs and a one-line summary for an algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComplexityInfo {
    pub time: &'static str,
    pub space: &'static str,
    pub description: &'static str,
}

impl Algorithm {
    #[must_use]
    pub fn complexity(self) -> ComplexityInfo {
        use Algorithm::*;
        let (time, space, description) = match self {
            BubbleSort => (
                "O(n²)",
                "O(1)",
                "Repeatedly steps through the list, compares adjacent elements, and swaps them if they are in the wrong order.",
            ),
            SelectionSort => (
                "O(n²)",
                "O(1)",
                "Finds the minimum element of the unsorted part and moves it to the front.",
            ),
            InsertionSort => (
                "O(n²)",
                "O(1)",
                "Grows a sorted prefix by shifting each new element left into place.",
            ),
            QuickSort => (
                "O(n log n)",
                "O(log n)",
                "Partitions around a pivot so smaller elements precede it, then sorts each side.",
            ),
            MergeSort => (
                "O(n log n)",
                "O(n)",
                "Splits the array in halves, sorts each, and merges the sorted halves.",
            ),
            HeapSort => (
                "O(n log n)",
                "O(1)",
                "Builds a max-heap and repeatedly moves the largest element to the end.",
            ),
            LinearSearch => (
                "O(n)",
                "O(1)",
                "Checks each element in order until the target is found or the array ends.",
            ),
            BinarySearch => (
                "O(log n)",
                "O(1)",
                "Halves the search interval of a sorted array on every comparison.",
            ),
            JumpSearch => (
                "O(√n)",
                "O(1)",
                "Jumps ahead in fixed blocks, then scans the block that can hold the target.",
            ),
            ExponentialSearch => (
                "O(log n)",
                "O(1)",
                "Doubles a bound until it passes the target, then binary searches that range.",
            ),
            Bfs => (
                "O(V + E)",
                "O(V)",
                "Explores the graph level by level from the start node using a queue.",
            ),
            Dijkstra => (
                "O(V²)",
                "O(V)",
                "Settles the closest unsettled node and relaxes its edges until the target is settled.",
            ),
            FibonacciRecursion => (
                "O(2ⁿ)",
                "O(n)",
                "Computes F(n) as F(n-1) + F(n-2), recomputing shared subproblems.",
            ),
            FactorialRecursion => (
                "O(n)",
                "O(n)",
                "Computes n! as n × (n-1)!, one call per level.",
            ),
            FibonacciTable => (
                "O(n)",
                "O(n)",
                "Fills F(0..=n) left to right from the two base cases.",
            ),
            Knapsack => (
                "O(n·W)",
                "O(n·W)",
                "Chooses for every item and capacity whether taking the item improves the best value.",
            ),
            Lcs => (
                "O(m·n)",
                "O(m·n)",
                "Extends the diagonal on matching characters, otherwise keeps the better neighbor.",
            ),
        };
        ComplexityInfo {
            time,
            space,
            description,
        }
    }
}

/// Counters plus complexity, for a run summary panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub algorithm: Algorithm,
    pub counters: PerformanceCounters,
    pub steps_applied: usize,
    pub steps_total: usize,
    pub time_complexity: String,
    pub space_complexity: String,
}

impl PerformanceReport {
    #[must_use]
    pub fn new(
        algorithm: Algorithm,
        counters: PerformanceCounters,
        steps_applied: usize,
        steps_total: usize,
    ) -> Self {
        let info = algorithm.complexity();
        Self {
            algorithm,
            counters,
            steps_applied,
            steps_total,
            time_complexity: info.time.to_string(),
            space_complexity: info.space.to_string(),
        }
    }

    /// Replace catalog complexities with host-supplied ones.
    #[must_use]
    pub fn with_complexity(mut self, time: impl Into<String>, space: impl Into<String>) -> Self {
        self.time_complexity = time.into();
        self.space_complexity = space.into();
        self
    }

    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.steps_total == 0 {
            1.0
        } else {
            self.steps_applied as f64 / self.steps_total as f64
        }
    }
}

impl fmt::Display for PerformanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} ops, {} comparisons, {} swaps in {} ms (time {}, space {})",
            self.algorithm,
            self.counters.operations,
            self.counters.comparisons,
            self.counters.swaps,
            self.counters.elapsed_ms,
            self.time_complexity,
            self.space_complexity
        )
    }
}
