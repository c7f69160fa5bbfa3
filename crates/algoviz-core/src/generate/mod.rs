//! Trace generators.
//!
//! One pure function per algorithm. Each validates its input, works on a
//! private copy, and records every intermediate mutation as a step. A
//! [`ValidationError`] means no trace was produced at all.

pub mod dp;
pub mod graph;
pub mod recursion;
pub mod search;
pub mod sort;

use crate::error::ValidationError;
use crate::family::Algorithm;
use crate::input::{TraceInput, limits};
use crate::trace::Trace;

/// Generate the trace for `algorithm` over `input`.
pub fn generate(algorithm: Algorithm, input: &TraceInput) -> Result<Trace, ValidationError> {
    use Algorithm::*;

    let result = match (algorithm, input) {
        (BubbleSort, TraceInput::Array { values, .. }) => sort::bubble_sort(values),
        (SelectionSort, TraceInput::Array { values, .. }) => sort::selection_sort(values),
        (InsertionSort, TraceInput::Array { values, .. }) => sort::insertion_sort(values),
        (QuickSort, TraceInput::Array { values, .. }) => sort::quick_sort(values),
        (MergeSort, TraceInput::Array { values, .. }) => sort::merge_sort(values),
        (HeapSort, TraceInput::Array { values, .. }) => sort::heap_sort(values),
        (LinearSearch, TraceInput::Array { values, target }) => {
            search::linear_search(values, require_target(*target)?)
        }
        (BinarySearch, TraceInput::Array { values, target }) => {
            search::binary_search(values, require_target(*target)?)
        }
        (JumpSearch, TraceInput::Array { values, target }) => {
            search::jump_search(values, require_target(*target)?)
        }
        (ExponentialSearch, TraceInput::Array { values, target }) => {
            search::exponential_search(values, require_target(*target)?)
        }
        (Bfs, TraceInput::Graph { graph, start, end }) => graph::bfs(graph, *start, *end),
        (Dijkstra, TraceInput::Graph { graph, start, end }) => graph::dijkstra(graph, *start, *end),
        (FibonacciRecursion, TraceInput::Number { n }) => recursion::fibonacci(*n),
        (FactorialRecursion, TraceInput::Number { n }) => recursion::factorial(*n),
        (FibonacciTable, TraceInput::Number { n }) => dp::fibonacci_table(*n),
        (Knapsack, TraceInput::Knapsack { capacity, items }) => dp::knapsack(*capacity, items),
        (Lcs, TraceInput::Strings { strings }) => dp::lcs(strings),
        (algorithm, _) => Err(ValidationError::WrongInput {
            algorithm,
            expected: expected_input(algorithm),
        }),
    };

    if let Err(err) = &result {
        tracing::debug!(algorithm = algorithm.key(), error = %err, "input rejected");
    }
    result
}

/// Input shape each algorithm consumes (see [`TraceInput::shape`]).
#[must_use]
pub fn expected_input(algorithm: Algorithm) -> &'static str {
    use crate::family::Family;
    match (algorithm.family(), algorithm) {
        (Family::Sorting | Family::Searching, _) => "array",
        (Family::Graph, _) => "graph",
        (_, Algorithm::Knapsack) => "knapsack",
        (_, Algorithm::Lcs) => "strings",
        _ => "number",
    }
}

fn require_target(target: Option<i64>) -> Result<i64, ValidationError> {
    target.ok_or_else(|| ValidationError::missing("target"))
}

/// Arrays must hold `1..=MAX_ARRAY_LEN` elements.
pub(crate) fn check_array(values: &[i64]) -> Result<(), ValidationError> {
    if values.is_empty() {
        return Err(ValidationError::empty("array"));
    }
    ValidationError::check_range(
        "array length",
        values.len() as i64,
        1,
        limits::MAX_ARRAY_LEN as i64,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatched_input_shape_is_rejected() {
        let err = generate(Algorithm::Dijkstra, &TraceInput::array(vec![1, 2])).unwrap_err();
        assert_eq!(
            err,
            ValidationError::WrongInput {
                algorithm: Algorithm::Dijkstra,
                expected: "graph"
            }
        );
    }

    #[test]
    fn search_without_target_is_rejected() {
        let err = generate(Algorithm::LinearSearch, &TraceInput::array(vec![1, 2])).unwrap_err();
        assert_eq!(err, ValidationError::missing("target"));
    }

    #[test]
    fn expected_input_matches_shape_names() {
        assert_eq!(expected_input(Algorithm::HeapSort), "array");
        assert_eq!(expected_input(Algorithm::Bfs), "graph");
        assert_eq!(expected_input(Algorithm::FactorialRecursion), "number");
        assert_eq!(expected_input(Algorithm::FibonacciTable), "number");
        assert_eq!(expected_input(Algorithm::Lcs), "strings");
    }

    #[test]
    fn oversized_array_is_rejected() {
        let values = vec![1; limits::MAX_ARRAY_LEN + 1];
        assert!(generate(Algorithm::BubbleSort, &TraceInput::array(values)).is_err());
    }
}
