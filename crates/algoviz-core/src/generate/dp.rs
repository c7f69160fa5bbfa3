//! Tabular dynamic programming.
//!
//! Base cells are revealed with `TableVisit`, each exactly once. Every other
//! cell receives exactly one `TableFill` whose note explains the transition.
//! The answer is always the bottom-right cell, announced by a final
//! `Complete`.

use crate::error::ValidationError;
use crate::family::Algorithm;
use crate::input::{Item, limits};
use crate::step::{Cell, StepKind};
use crate::trace::{Baseline, Trace, TraceBuilder, TraceResult};

struct Table {
    grid: Vec<Vec<i64>>,
    row_labels: Vec<String>,
    col_labels: Vec<String>,
    steps: TraceBuilder,
}

impl Table {
    fn new(row_labels: Vec<String>, col_labels: Vec<String>) -> Self {
        Self {
            grid: vec![vec![0; col_labels.len()]; row_labels.len()],
            row_labels,
            col_labels,
            steps: TraceBuilder::new(),
        }
    }

    fn get(&self, row: usize, col: usize) -> i64 {
        self.grid[row][col]
    }

    fn visit(&mut self, row: usize, col: usize, value: i64) {
        self.grid[row][col] = value;
        self.steps.push(StepKind::TableVisit {
            cell: Cell::new(row, col),
            value,
        });
    }

    fn fill(&mut self, row: usize, col: usize, value: i64, note: String) {
        self.grid[row][col] = value;
        self.steps.push(StepKind::TableFill {
            cell: Cell::new(row, col),
            value,
            note: Some(note),
        });
    }

    fn finish(mut self, algorithm: Algorithm) -> Trace {
        let rows = self.grid.len();
        let cols = self.col_labels.len();
        let value = self.grid[rows - 1][cols - 1];
        self.steps.complete(None, format!("result = {value}"));
        self.steps.finish(
            algorithm,
            Baseline::Table {
                rows,
                cols,
                row_labels: self.row_labels,
                col_labels: self.col_labels,
            },
            TraceResult::Value { value },
        )
    }
}

fn numbered(range: std::ops::RangeInclusive<usize>) -> Vec<String> {
    range.map(|i| i.to_string()).collect()
}

/// `F(i) = F(i-1) + F(i-2)` over a single-row table `0..=n`.
pub fn fibonacci_table(n: u32) -> Result<Trace, ValidationError> {
    ValidationError::check_range("n", i64::from(n), 0, i64::from(limits::MAX_FIB_TABLE_N))?;
    let n = n as usize;
    let mut t = Table::new(vec!["F".to_string()], numbered(0..=n));
    t.visit(0, 0, 0);
    if n >= 1 {
        t.visit(0, 1, 1);
    }
    for i in 2..=n {
        let (a, b) = (t.get(0, i - 1), t.get(0, i - 2));
        let value = a + b;
        t.fill(
            0,
            i,
            value,
            format!("F({i}) = F({}) + F({}) = {a} + {b} = {value}", i - 1, i - 2),
        );
    }
    Ok(t.finish(Algorithm::FibonacciTable))
}

/// 0/1 knapsack. Rows are items `0..=m` (row 0 is "no items"), columns are
/// capacities `0..=capacity`.
pub fn knapsack(capacity: u32, items: &[Item]) -> Result<Trace, ValidationError> {
    ValidationError::check_range(
        "capacity",
        i64::from(capacity),
        i64::from(limits::MIN_CAPACITY),
        i64::from(limits::MAX_CAPACITY),
    )?;
    if items.is_empty() {
        return Err(ValidationError::empty("items"));
    }
    ValidationError::check_range("item count", items.len() as i64, 1, limits::MAX_ITEMS as i64)?;
    for item in items {
        if item.weight == 0 {
            return Err(ValidationError::invalid("item", "weight must be at least 1"));
        }
        ValidationError::check_range("item value", item.value, 0, limits::MAX_ITEM_VALUE)?;
    }

    let cap = capacity as usize;
    let mut row_labels = vec!["-".to_string()];
    row_labels.extend(
        items
            .iter()
            .enumerate()
            .map(|(i, it)| format!("{} (w{} v{})", i + 1, it.weight, it.value)),
    );
    let mut t = Table::new(row_labels, numbered(0..=cap));

    for i in 0..=items.len() {
        t.visit(i, 0, 0);
    }
    for w in 1..=cap {
        t.visit(0, w, 0);
    }

    for (idx, item) in items.iter().enumerate() {
        let i = idx + 1;
        let weight = item.weight as usize;
        for w in 1..=cap {
            let without = t.get(i - 1, w);
            if weight > w {
                t.fill(
                    i,
                    w,
                    without,
                    format!(
                        "Item {i} (weight {weight}) is too heavy for capacity {w}, using previous value."
                    ),
                );
                continue;
            }
            let with = t.get(i - 1, w - weight).saturating_add(item.value);
            let (value, note) = if with > without {
                (
                    with,
                    format!(
                        "Taking item {i} (value {}) gives better value: {with} > {without}",
                        item.value
                    ),
                )
            } else {
                (
                    without,
                    format!("Not taking item {i} gives better value: {without} >= {with}"),
                )
            };
            t.fill(i, w, value, note);
        }
    }
    Ok(t.finish(Algorithm::Knapsack))
}

/// Longest common subsequence of exactly two non-empty strings.
pub fn lcs(strings: &[String]) -> Result<Trace, ValidationError> {
    let [a, b] = strings else {
        return Err(ValidationError::invalid(
            "strings",
            format!("expected exactly 2 strings, got {}", strings.len()),
        ));
    };
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    for s in [&a, &b] {
        if s.is_empty() {
            return Err(ValidationError::empty("string"));
        }
        ValidationError::check_range(
            "string length",
            s.len() as i64,
            1,
            limits::MAX_LCS_LEN as i64,
        )?;
    }

    let labels = |s: &[char]| {
        std::iter::once(String::new())
            .chain(s.iter().map(char::to_string))
            .collect::<Vec<_>>()
    };
    let mut t = Table::new(labels(a.as_slice()), labels(b.as_slice()));

    for i in 0..=a.len() {
        t.visit(i, 0, 0);
    }
    for j in 1..=b.len() {
        t.visit(0, j, 0);
    }

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let (ca, cb) = (a[i - 1], b[j - 1]);
            if ca == cb {
                let value = t.get(i - 1, j - 1) + 1;
                t.fill(
                    i,
                    j,
                    value,
                    format!("Characters match: {ca} = {cb}, adding 1 to diagonal."),
                );
            } else {
                let (left, top) = (t.get(i, j - 1), t.get(i - 1, j));
                t.fill(
                    i,
                    j,
                    left.max(top),
                    format!(
                        "Characters don't match: {ca} \u{2260} {cb}, taking max of left ({left}) or top ({top})."
                    ),
                );
            }
        }
    }
    Ok(t.finish(Algorithm::Lcs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{DEFAULT_CAPACITY, DEFAULT_ITEMS};

    fn table_dims(trace: &Trace) -> (usize, usize) {
        match trace.baseline() {
            Baseline::Table { rows, cols, .. } => (*rows, *cols),
            other => panic!("unexpected baseline {other:?}"),
        }
    }

    /// Every cell is touched exactly once.
    fn assert_each_cell_once(trace: &Trace) {
        let (rows, cols) = table_dims(trace);
        let mut seen = vec![vec![0u32; cols]; rows];
        for step in trace.steps() {
            match &step.kind {
                StepKind::TableVisit { cell, .. } | StepKind::TableFill { cell, .. } => {
                    seen[cell.row][cell.col] += 1;
                }
                StepKind::Complete { .. } => {}
                other => panic!("unexpected step {other:?}"),
            }
        }
        assert!(seen.iter().flatten().all(|&c| c == 1), "{seen:?}");
    }

    #[test]
    fn lcs_reference() {
        let trace = lcs(&["ABCBDAB".to_string(), "BDCABA".to_string()]).unwrap();
        assert_eq!(table_dims(&trace), (8, 7));
        assert_eq!(trace.result(), &TraceResult::Value { value: 4 });
        assert_each_cell_once(&trace);
        assert!(matches!(
            &trace.steps().last().unwrap().kind,
            StepKind::Complete { note: Some(n), .. } if n == "result = 4"
        ));
    }

    #[test]
    fn lcs_requires_two_non_empty_strings() {
        assert!(lcs(&["ABC".to_string()]).is_err());
        assert!(lcs(&["A".into(), "B".into(), "C".into()]).is_err());
        assert_eq!(
            lcs(&["".into(), "B".into()]).unwrap_err(),
            ValidationError::empty("string")
        );
        assert!(lcs(&["A".repeat(21), "B".into()]).is_err());
    }

    #[test]
    fn knapsack_default_items() {
        let trace = knapsack(DEFAULT_CAPACITY, &DEFAULT_ITEMS).unwrap();
        assert_eq!(table_dims(&trace), (5, 11));
        // (2,6)+(3,10)+(5,15) = 31 at weight 10.
        assert_eq!(trace.result(), &TraceResult::Value { value: 31 });
        assert_each_cell_once(&trace);
    }

    #[test]
    fn knapsack_notes_explain_choices() {
        let trace = knapsack(3, &[Item::new(2, 5)]).unwrap();
        let notes: Vec<String> = trace
            .steps()
            .iter()
            .filter_map(|s| match &s.kind {
                StepKind::TableFill { note: Some(n), .. } => Some(n.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(
            notes,
            vec![
                "Item 1 (weight 2) is too heavy for capacity 1, using previous value.".to_string(),
                "Taking item 1 (value 5) gives better value: 5 > 0".to_string(),
                "Taking item 1 (value 5) gives better value: 5 > 0".to_string(),
            ]
        );
    }

    #[test]
    fn knapsack_bounds() {
        assert!(knapsack(0, &DEFAULT_ITEMS).is_err());
        assert!(knapsack(21, &DEFAULT_ITEMS).is_err());
        assert!(knapsack(5, &[]).is_err());
        assert!(knapsack(5, &[Item::new(0, 1)]).is_err());
        assert!(knapsack(5, &[Item::new(1, 1); 11]).is_err());
        assert!(knapsack(5, &[Item::new(1, -1)]).is_err());
    }

    #[test]
    fn knapsack_item_value_is_bounded() {
        let max = limits::MAX_ITEM_VALUE;
        let trace = knapsack(2, &[Item::new(1, max), Item::new(1, max)]).unwrap();
        assert_eq!(trace.result(), &TraceResult::Value { value: 2 * max });
        assert_eq!(
            knapsack(2, &[Item::new(1, i64::MAX), Item::new(1, i64::MAX)]).unwrap_err(),
            ValidationError::out_of_range("item value", i64::MAX, 0, max)
        );
    }

    #[test]
    fn fibonacci_table_values() {
        let trace = fibonacci_table(10).unwrap();
        assert_eq!(table_dims(&trace), (1, 11));
        assert_eq!(trace.result(), &TraceResult::Value { value: 55 });
        assert_each_cell_once(&trace);
        assert_eq!(trace.count("table_visit"), 2);
        assert_eq!(trace.count("table_fill"), 9);
    }

    #[test]
    fn fibonacci_table_small_n() {
        let zero = fibonacci_table(0).unwrap();
        assert_eq!(zero.result(), &TraceResult::Value { value: 0 });
        assert_each_cell_once(&zero);
        let one = fibonacci_table(1).unwrap();
        assert_eq!(one.result(), &TraceResult::Value { value: 1 });
        assert!(fibonacci_table(31).is_err());
        assert_eq!(
            fibonacci_table(30).unwrap().result(),
            &TraceResult::Value { value: 832_040 }
        );
    }
}
