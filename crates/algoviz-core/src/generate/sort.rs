//! Comparison sorts.
//!
//! Every comparison is emitted before the swap it justifies, and every index
//! is marked sorted exactly once, as soon as it is known to be final. Each
//! trace ends with a `Complete` step.

use crate::error::ValidationError;
use crate::family::Algorithm;
use crate::step::StepKind;
use crate::trace::{Baseline, Trace, TraceBuilder, TraceResult};

use super::check_array;

/// Working copy plus the steps recorded against it.
struct Sorter {
    values: Vec<i64>,
    steps: TraceBuilder,
}

impl Sorter {
    fn new(values: &[i64]) -> Result<Self, ValidationError> {
        check_array(values)?;
        Ok(Self {
            values: values.to_vec(),
            steps: TraceBuilder::new(),
        })
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    fn compare(&mut self, i: usize, j: usize) {
        self.steps.push(StepKind::Compare { i, j });
    }

    /// Emit a comparison and report `values[i] > values[j]`.
    fn greater(&mut self, i: usize, j: usize) -> bool {
        self.steps.push(StepKind::Compare { i, j });
        self.values[i] > self.values[j]
    }

    /// Emit a comparison and report `values[i] < values[j]`.
    fn less(&mut self, i: usize, j: usize) -> bool {
        self.steps.push(StepKind::Compare { i, j });
        self.values[i] < self.values[j]
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.steps.push(StepKind::Swap { i, j });
        self.values.swap(i, j);
    }

    fn set(&mut self, index: usize, value: i64) {
        self.steps.push(StepKind::SetValue { index, value });
        self.values[index] = value;
    }

    fn sorted(&mut self, index: usize) {
        self.steps.push(StepKind::MarkSorted { index });
    }

    fn finish(mut self, algorithm: Algorithm, input: &[i64]) -> Trace {
        let n = self.values.len();
        self.steps.complete(None, format!("Sorted {n} elements"));
        self.steps.finish(
            algorithm,
            Baseline::Array {
                values: input.to_vec(),
            },
            TraceResult::Sorted {
                values: self.values,
            },
        )
    }
}

/// Adjacent compare-and-swap passes. No early exit: every pass runs and
/// marks its last index.
pub fn bubble_sort(values: &[i64]) -> Result<Trace, ValidationError> {
    let mut s = Sorter::new(values)?;
    let n = s.len();
    for i in 0..n {
        for j in 0..n - i - 1 {
            if s.greater(j, j + 1) {
                s.swap(j, j + 1);
            }
        }
        s.sorted(n - i - 1);
    }
    Ok(s.finish(Algorithm::BubbleSort, values))
}

pub fn selection_sort(values: &[i64]) -> Result<Trace, ValidationError> {
    let mut s = Sorter::new(values)?;
    let n = s.len();
    for i in 0..n {
        let mut min = i;
        for j in i + 1..n {
            if s.greater(min, j) {
                min = j;
            }
        }
        if min != i {
            s.swap(i, min);
        }
        s.sorted(i);
    }
    Ok(s.finish(Algorithm::SelectionSort, values))
}

/// Insertion by adjacent swaps. Positions are only final once the whole
/// array has been scanned, so all marks come at the end.
pub fn insertion_sort(values: &[i64]) -> Result<Trace, ValidationError> {
    let mut s = Sorter::new(values)?;
    let n = s.len();
    for i in 1..n {
        let mut j = i;
        while j > 0 && s.greater(j - 1, j) {
            s.swap(j - 1, j);
            j -= 1;
        }
    }
    for i in 0..n {
        s.sorted(i);
    }
    Ok(s.finish(Algorithm::InsertionSort, values))
}

/// Lomuto partition with the last element as pivot.
pub fn quick_sort(values: &[i64]) -> Result<Trace, ValidationError> {
    let mut s = Sorter::new(values)?;
    let n = s.len();
    quick_partition(&mut s, 0, n - 1);
    Ok(s.finish(Algorithm::QuickSort, values))
}

fn quick_partition(s: &mut Sorter, lo: usize, hi: usize) {
    if lo == hi {
        s.sorted(lo);
        return;
    }
    s.steps.push(StepKind::MarkRange { lo, hi });
    s.steps.push(StepKind::MarkPivot { index: hi });
    let mut store = lo;
    for j in lo..hi {
        if s.less(j, hi) {
            if store != j {
                s.swap(store, j);
            }
            store += 1;
        }
    }
    if store != hi {
        s.swap(store, hi);
    }
    s.sorted(store);
    if store > lo {
        quick_partition(s, lo, store - 1);
    }
    if store < hi {
        quick_partition(s, store + 1, hi);
    }
}

/// Top-down merge sort. Merged values are written back with `SetValue`;
/// nothing is final until the last merge completes.
pub fn merge_sort(values: &[i64]) -> Result<Trace, ValidationError> {
    let mut s = Sorter::new(values)?;
    let n = s.len();
    merge_range(&mut s, 0, n);
    for i in 0..n {
        s.sorted(i);
    }
    Ok(s.finish(Algorithm::MergeSort, values))
}

fn merge_range(s: &mut Sorter, lo: usize, hi: usize) {
    if hi - lo <= 1 {
        return;
    }
    let mid = (lo + hi) / 2;
    merge_range(s, lo, mid);
    merge_range(s, mid, hi);

    s.steps.push(StepKind::MarkRange { lo, hi: hi - 1 });
    let aux = s.values[lo..hi].to_vec();
    let (mut i, mut j, mut k) = (lo, mid, lo);
    while i < mid && j < hi {
        s.steps.push(StepKind::Compare { i, j });
        let (left, right) = (aux[i - lo], aux[j - lo]);
        if left <= right {
            s.set(k, left);
            i += 1;
        } else {
            s.set(k, right);
            j += 1;
        }
        k += 1;
    }
    // A leftover right run is already in place.
    while i < mid {
        s.set(k, aux[i - lo]);
        i += 1;
        k += 1;
    }
}

pub fn heap_sort(values: &[i64]) -> Result<Trace, ValidationError> {
    let mut s = Sorter::new(values)?;
    let n = s.len();
    for root in (0..n / 2).rev() {
        sift_down(&mut s, root, n);
    }
    for end in (1..n).rev() {
        // Root holds the heap maximum.
        s.compare(0, end);
        s.swap(0, end);
        s.sorted(end);
        sift_down(&mut s, 0, end);
    }
    s.sorted(0);
    Ok(s.finish(Algorithm::HeapSort, values))
}

fn sift_down(s: &mut Sorter, mut root: usize, size: usize) {
    loop {
        let left = 2 * root + 1;
        if left >= size {
            return;
        }
        let mut child = left;
        if left + 1 < size && s.less(left, left + 1) {
            child = left + 1;
        }
        if s.less(root, child) {
            s.swap(root, child);
            root = child;
        } else {
            return;
        }
    }
}
