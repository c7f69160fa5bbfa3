#![forbid(unsafe_code)]

//! Reference scenarios driven through the public facade.
//!
//! Each test submits a host request (often as JSON), plays it to the end on
//! the virtual clock, and checks the final view against known answers.
//!
//! Run:
//!   cargo test -p algoviz --test reference_scenarios

use algoviz::prelude::*;
use algoviz::{ArrayMode, PerformanceCounters};
use web_time::Duration;

fn play(request: VisualizerRequest) -> Visualizer {
    let mut viz = Visualizer::default();
    viz.submit(request).expect("valid request");
    viz.tick(Duration::from_secs(3600));
    assert_eq!(viz.state(), PlayState::Completed);
    viz
}

fn from_json(json: &str) -> VisualizerRequest {
    serde_json::from_str(json).expect("request json")
}

#[test]
fn bubble_sort_custom_array() {
    let viz = play(VisualizerRequest::new(
        AlgorithmMetadata::new("Bubble Sort"),
        UserParams::default().with_custom_array("5, 3, 4, 1, 2"),
    ));
    assert_eq!(viz.algorithm(), Algorithm::BubbleSort);
    match viz.player().view() {
        Some(ViewState::Array(view)) => {
            assert_eq!(view.values, vec![1, 2, 3, 4, 5]);
            assert_eq!(view.marked.len(), 5);
            assert!(view.complete);
        }
        other => panic!("unexpected view {other:?}"),
    }
    let counters: PerformanceCounters = viz.player().counters();
    assert_eq!(counters.swaps, 8);
    assert_eq!(counters.comparisons, 10);
}

#[test]
fn binary_search_from_json() {
    let viz = play(from_json(
        r#"{
            "metadata": {"name": "Binary Search", "category": "Searching"},
            "params": {"values": [1, 3, 5, 7, 9, 11], "target": 7}
        }"#,
    ));
    let trace = viz.player().trace().unwrap();
    assert_eq!(trace.count("found"), 1);
    assert_eq!(trace.result(), &TraceResult::Search { index: Some(3) });
}

#[test]
fn dijkstra_takes_the_cheaper_detour() {
    let viz = play(from_json(
        r#"{
            "metadata": {"name": "Dijkstra's Algorithm"},
            "params": {"graph": "A-B:4,A-C:1,C-B:2,B-D:1", "start": "A", "end": "D"}
        }"#,
    ));
    assert_eq!(viz.family(), Family::Graph);
    assert_eq!(
        viz.player().trace().unwrap().result(),
        &TraceResult::Traversal {
            visit_order: vec![0, 1, 2, 3],
            path: Some(vec![0, 2, 1, 3]),
            distance: Some(4),
        }
    );
    match viz.player().view() {
        Some(ViewState::Graph(view)) => assert_eq!(view.path, Some(vec![0, 2, 1, 3])),
        other => panic!("unexpected view {other:?}"),
    }
}

#[test]
fn lcs_fills_the_whole_table() {
    let viz = play(from_json(
        r#"{
            "metadata": {"name": "Longest Common Subsequence", "category": "Dynamic Programming"},
            "params": {"strings": ["ABCBDAB", "BDCABA"]}
        }"#,
    ));
    match viz.player().view() {
        Some(ViewState::Table(view)) => {
            assert_eq!((view.rows(), view.cols()), (8, 7));
            assert_eq!(view.bottom_right(), Some(4));
            assert!(view.grid.iter().flatten().all(Option::is_some));
        }
        other => panic!("unexpected view {other:?}"),
    }
}

#[test]
fn recursion_tree_resolves_root() {
    let viz = play(VisualizerRequest::new(
        AlgorithmMetadata::new("Recursive Fibonacci"),
        UserParams::default().with_n(6),
    ));
    assert_eq!(viz.algorithm(), Algorithm::FibonacciRecursion);
    match viz.player().view() {
        Some(ViewState::Recursion(view)) => {
            assert_eq!(view.root_result(), Some(8));
            assert!(view.call_stack.is_empty());
        }
        other => panic!("unexpected view {other:?}"),
    }
}

#[test]
fn sorted_mode_generates_sorted_input() {
    let mut params = UserParams::default();
    params.array_mode = ArrayMode::Sorted;
    let mut viz = Visualizer::default();
    viz.select(AlgorithmMetadata::new("Jump Search"));
    let trace = viz.prepare(&params).unwrap();
    match trace.baseline() {
        algoviz::Baseline::Array { values } => {
            assert_eq!(values.len(), 30);
            assert!(values.windows(2).all(|w| w[0] <= w[1]));
        }
        other => panic!("unexpected baseline {other:?}"),
    }
}

#[test]
fn free_functions_are_reachable_from_the_prelude() {
    let trace = algoviz::core::generate::sort::insertion_sort(&[3, 2, 1]).unwrap();
    let view = replay(&trace, trace.len()).unwrap();
    assert!(view.result_matches(trace.result()));
    let again = generate(Algorithm::InsertionSort, &algoviz::TraceInput::array(vec![3, 2, 1]));
    assert_eq!(again.unwrap(), trace);
}
