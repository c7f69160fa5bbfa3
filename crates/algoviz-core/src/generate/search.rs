//! Search strategies.
//!
//! Binary, jump, and exponential search sort a private copy first; their
//! baseline is that sorted copy, so every index in the trace refers to it.
//! Each probe of one element is a `MarkCurrent`, each window is a
//! `MarkRange` (only emitted when non-empty), a hit emits exactly one
//! `Found`, and every trace ends with `Complete`.

use crate::error::ValidationError;
use crate::family::Algorithm;
use crate::step::StepKind;
use crate::trace::{Baseline, Trace, TraceBuilder, TraceResult};

use super::check_array;

struct Prober {
    values: Vec<i64>,
    target: i64,
    steps: TraceBuilder,
}

impl Prober {
    fn new(values: &[i64], target: i64, sort: bool) -> Result<Self, ValidationError> {
        check_array(values)?;
        let mut values = values.to_vec();
        if sort {
            values.sort();
        }
        Ok(Self {
            values,
            target,
            steps: TraceBuilder::new(),
        })
    }

    fn probe(&mut self, index: usize) -> i64 {
        self.steps.push(StepKind::MarkCurrent { index });
        self.values[index]
    }

    fn window(&mut self, lo: usize, hi: usize) {
        self.steps.push(StepKind::MarkRange { lo, hi });
    }

    fn found(mut self, algorithm: Algorithm, index: usize) -> Trace {
        let target = self.target;
        self.steps.push(StepKind::Found { index });
        self.steps.complete(Some(index), format!("Found {target} at index {index}"));
        self.finish(algorithm, Some(index))
    }

    fn not_found(mut self, algorithm: Algorithm) -> Trace {
        let target = self.target;
        self.steps.complete(None, format!("{target} not found in the array"));
        self.finish(algorithm, None)
    }

    fn finish(self, algorithm: Algorithm, index: Option<usize>) -> Trace {
        self.steps.finish(
            algorithm,
            Baseline::Array {
                values: self.values,
            },
            TraceResult::Search { index },
        )
    }

    /// Binary search inside `lo..=hi`, recording each window and probe.
    fn bisect(&mut self, lo: usize, hi: usize) -> Option<usize> {
        let (mut lo, mut hi) = (lo as i64, hi as i64);
        while lo <= hi {
            self.window(lo as usize, hi as usize);
            let mid = ((lo + hi) / 2) as usize;
            let value = self.probe(mid);
            if value == self.target {
                return Some(mid);
            } else if value < self.target {
                lo = mid as i64 + 1;
            } else {
                hi = mid as i64 - 1;
            }
        }
        None
    }
}

/// Scan left to right over the array as given.
pub fn linear_search(values: &[i64], target: i64) -> Result<Trace, ValidationError> {
    let mut p = Prober::new(values, target, false)?;
    for i in 0..p.values.len() {
        if p.probe(i) == target {
            return Ok(p.found(Algorithm::LinearSearch, i));
        }
    }
    Ok(p.not_found(Algorithm::LinearSearch))
}

pub fn binary_search(values: &[i64], target: i64) -> Result<Trace, ValidationError> {
    let mut p = Prober::new(values, target, true)?;
    let hi = p.values.len() - 1;
    Ok(match p.bisect(0, hi) {
        Some(index) => p.found(Algorithm::BinarySearch, index),
        None => p.not_found(Algorithm::BinarySearch),
    })
}

/// Jump ahead in blocks of `floor(sqrt(n))`, then scan the block that may
/// hold the target.
pub fn jump_search(values: &[i64], target: i64) -> Result<Trace, ValidationError> {
    let mut p = Prober::new(values, target, true)?;
    let n = p.values.len();
    let block = ((n as f64).sqrt().floor() as usize).max(1);

    let mut prev = 0;
    let mut step = block;
    while p.probe(step.min(n) - 1) < target {
        prev = step;
        step += block;
        if prev >= n {
            return Ok(p.not_found(Algorithm::JumpSearch));
        }
    }

    let end = step.min(n);
    p.window(prev, end - 1);
    for i in prev..end {
        let value = p.probe(i);
        if value == target {
            return Ok(p.found(Algorithm::JumpSearch, i));
        }
        if value > target {
            break;
        }
    }
    Ok(p.not_found(Algorithm::JumpSearch))
}

/// Probe index 0, double the bound while it stays at or below the target,
/// then bisect `[bound / 2, min(bound, n - 1)]`.
pub fn exponential_search(values: &[i64], target: i64) -> Result<Trace, ValidationError> {
    let mut p = Prober::new(values, target, true)?;
    let n = p.values.len();
    if p.probe(0) == target {
        return Ok(p.found(Algorithm::ExponentialSearch, 0));
    }

    let mut bound = 1;
    while bound < n {
        if p.probe(bound) > target {
            break;
        }
        bound *= 2;
    }

    Ok(match p.bisect(bound / 2, bound.min(n - 1)) {
        Some(index) => p.found(Algorithm::ExponentialSearch, index),
        None => p.not_found(Algorithm::ExponentialSearch),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    type SearchFn = fn(&[i64], i64) -> Result<Trace, ValidationError>;

    const SEARCHES: [(&str, SearchFn); 4] = [
        ("linear", linear_search),
        ("binary", binary_search),
        ("jump", jump_search),
        ("exponential", exponential_search),
    ];

    fn kinds(trace: &Trace) -> Vec<StepKind> {
        trace.steps().iter().map(|s| s.kind.clone()).collect()
    }

    #[test]
    fn binary_search_reference_trace() {
        let trace = binary_search(&[1, 3, 5, 7, 9, 11], 7).unwrap();
        assert_eq!(
            kinds(&trace),
            vec![
                StepKind::MarkRange { lo: 0, hi: 5 },
                StepKind::MarkCurrent { index: 2 },
                StepKind::MarkRange { lo: 3, hi: 5 },
                StepKind::MarkCurrent { index: 4 },
                StepKind::MarkRange { lo: 3, hi: 3 },
                StepKind::MarkCurrent { index: 3 },
                StepKind::Found { index: 3 },
                StepKind::Complete {
                    index: Some(3),
                    note: Some("Found 7 at index 3".into())
                },
            ]
        );
        assert_eq!(trace.count("found"), 1);
        assert_eq!(trace.result(), &TraceResult::Search { index: Some(3) });
    }

    #[test]
    fn linear_search_uses_unsorted_input() {
        let trace = linear_search(&[9, 4, 7], 7).unwrap();
        assert_eq!(trace.result(), &TraceResult::Search { index: Some(2) });
        assert_eq!(trace.baseline(), &Baseline::Array { values: vec![9, 4, 7] });
        assert_eq!(trace.count("mark_current"), 3);
    }

    #[test]
    fn sorted_searches_use_sorted_baseline() {
        let trace = binary_search(&[9, 4, 7], 9).unwrap();
        assert_eq!(trace.baseline(), &Baseline::Array { values: vec![4, 7, 9] });
        assert_eq!(trace.result(), &TraceResult::Search { index: Some(2) });
    }

    #[test]
    fn every_search_finds_each_present_value() {
        let values: Vec<i64> = (0..17).map(|i| i * 3).collect();
        for (name, search) in SEARCHES {
            for (i, v) in values.iter().enumerate() {
                let trace = search(&values, *v).unwrap();
                assert_eq!(trace.result(), &TraceResult::Search { index: Some(i) }, "{name} {v}");
                assert_eq!(trace.count("found"), 1, "{name} {v}");
                assert!(trace.validate_bounds().is_ok(), "{name} {v}");
            }
        }
    }

    #[test]
    fn every_search_reports_absent_values() {
        let values = [2, 4, 6, 8, 10];
        for (name, search) in SEARCHES {
            for target in [1, 5, 11] {
                let trace = search(&values, target).unwrap();
                assert_eq!(trace.result(), &TraceResult::Search { index: None }, "{name} {target}");
                assert_eq!(trace.count("found"), 0, "{name}");
                assert!(matches!(
                    trace.steps().last().map(|s| &s.kind),
                    Some(StepKind::Complete { index: None, .. })
                ));
            }
        }
    }

    #[test]
    fn jump_search_probes_block_ends() {
        // n = 9, block = 3: probes 2, 5, then scans [3, 5].
        let values: Vec<i64> = (1..=9).collect();
        let trace = jump_search(&values, 5).unwrap();
        let ks = kinds(&trace);
        assert_eq!(ks[0], StepKind::MarkCurrent { index: 2 });
        assert_eq!(ks[1], StepKind::MarkCurrent { index: 5 });
        assert_eq!(ks[2], StepKind::MarkRange { lo: 3, hi: 5 });
        assert_eq!(trace.result(), &TraceResult::Search { index: Some(4) });
    }

    #[test]
    fn exponential_search_doubles_bound() {
        let values: Vec<i64> = (0..16).collect();
        let trace = exponential_search(&values, 11).unwrap();
        let probes: Vec<usize> = trace
            .steps()
            .iter()
            .filter_map(|s| match s.kind {
                StepKind::MarkCurrent { index } => Some(index),
                _ => None,
            })
            .collect();
        // Bound reaches 16 == n, so the window is [8, 15] and 11 is its midpoint.
        assert_eq!(probes, vec![0, 1, 2, 4, 8, 11]);
        assert!(kinds(&trace).contains(&StepKind::MarkRange { lo: 8, hi: 15 }));
    }

    #[test]
    fn single_element_searches() {
        for (name, search) in SEARCHES {
            assert_eq!(
                search(&[4], 4).unwrap().result(),
                &TraceResult::Search { index: Some(0) },
                "{name}"
            );
            assert_eq!(
                search(&[4], 5).unwrap().result(),
                &TraceResult::Search { index: None },
                "{name}"
            );
        }
    }

    #[test]
    fn empty_array_is_rejected() {
        for (name, search) in SEARCHES {
            assert!(search(&[], 1).is_err(), "{name}");
        }
    }
}
