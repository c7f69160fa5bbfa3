//! Recursive call trees.
//!
//! The whole tree is built before replay. The trace is a depth-first walk
//! of it: one `CallPush` and one `CallReturn` per frame, `2 * frames` steps
//! in total, with no terminal `Complete`.

use crate::call_tree::{CallTree, Expansion, FrameId};
use crate::error::ValidationError;
use crate::family::Algorithm;
use crate::input::limits::MAX_RECURSION_N;
use crate::step::StepKind;
use crate::trace::{Baseline, Trace, TraceBuilder, TraceResult};

fn fib_expansion(n: u32) -> Expansion {
    if n <= 1 {
        Expansion::Leaf(i64::from(n))
    } else {
        Expansion::Branch {
            args: vec![n - 1, n - 2],
            combine: |_, results| results.iter().sum(),
        }
    }
}

fn factorial_expansion(n: u32) -> Expansion {
    if n <= 1 {
        Expansion::Leaf(1)
    } else {
        Expansion::Branch {
            args: vec![n - 1],
            combine: |n, results| i64::from(n) * results[0],
        }
    }
}

fn check_n(n: u32) -> Result<(), ValidationError> {
    ValidationError::check_range("n", i64::from(n), 0, i64::from(MAX_RECURSION_N))
}

pub fn fibonacci(n: u32) -> Result<Trace, ValidationError> {
    check_n(n)?;
    let tree = CallTree::build("fib", n, fib_expansion);
    Ok(walk(Algorithm::FibonacciRecursion, tree))
}

pub fn factorial(n: u32) -> Result<Trace, ValidationError> {
    check_n(n)?;
    let tree = CallTree::build("fact", n, factorial_expansion);
    Ok(walk(Algorithm::FactorialRecursion, tree))
}

fn walk(algorithm: Algorithm, tree: CallTree) -> Trace {
    let mut steps = TraceBuilder::new();
    if !tree.is_empty() {
        emit(&tree, 0, &mut steps);
    }
    let value = tree.root().map_or(0, |f| f.result);
    steps.finish(
        algorithm,
        Baseline::Recursion { tree },
        TraceResult::Value { value },
    )
}

fn emit(tree: &CallTree, id: FrameId, steps: &mut TraceBuilder) {
    steps.push(StepKind::CallPush { frame: id });
    let Some(frame) = tree.frame(id) else { return };
    for &child in &frame.children {
        emit(tree, child, steps);
    }
    steps.push(StepKind::CallReturn {
        frame: id,
        result: frame.result,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames_of(trace: &Trace) -> usize {
        match trace.baseline() {
            Baseline::Recursion { tree } => tree.len(),
            other => panic!("unexpected baseline {other:?}"),
        }
    }

    #[test]
    fn fib_four_has_nine_frames() {
        let trace = fibonacci(4).unwrap();
        assert_eq!(frames_of(&trace), 9);
        assert_eq!(trace.len(), 18);
        assert_eq!(trace.result(), &TraceResult::Value { value: 3 });
        assert_eq!(trace.steps()[0].kind, StepKind::CallPush { frame: 0 });
        assert_eq!(
            trace.steps().last().unwrap().kind,
            StepKind::CallReturn {
                frame: 0,
                result: 3
            }
        );
    }

    #[test]
    fn fib_zero_is_a_single_leaf() {
        let trace = fibonacci(0).unwrap();
        assert_eq!(trace.len(), 2);
        assert_eq!(trace.result(), &TraceResult::Value { value: 0 });
    }

    #[test]
    fn factorial_is_a_chain() {
        let trace = factorial(5).unwrap();
        assert_eq!(frames_of(&trace), 5);
        assert_eq!(trace.result(), &TraceResult::Value { value: 120 });
        let pushes: Vec<_> = trace.steps()[..5].iter().map(|s| s.kind.clone()).collect();
        assert!(pushes.iter().all(|k| matches!(k, StepKind::CallPush { .. })));
        assert_eq!(factorial(0).unwrap().result(), &TraceResult::Value { value: 1 });
    }

    #[test]
    fn no_terminal_step() {
        assert_eq!(fibonacci(5).unwrap().count("complete"), 0);
    }

    #[test]
    fn bounds_are_enforced() {
        assert!(fibonacci(10).is_ok());
        assert_eq!(
            fibonacci(11).unwrap_err(),
            ValidationError::out_of_range("n", 11, 0, 10)
        );
        assert!(factorial(11).is_err());
    }

    #[test]
    fn returns_are_balanced() {
        let trace = fibonacci(6).unwrap();
        let mut depth = 0i64;
        for step in trace.steps() {
            match step.kind {
                StepKind::CallPush { .. } => depth += 1,
                StepKind::CallReturn { .. } => depth -= 1,
                _ => unreachable!(),
            }
            assert!(depth >= 0);
        }
        assert_eq!(depth, 0);
    }
}
