use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{bounded, foreign};
use crate::error::ReducerError;
use crate::step::{Cell, Step, StepKind};

pub(super) const NAME: &str = "table";

/// DP table view. Cells stay `None` until revealed or filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableView {
    pub row_labels: Vec<String>,
    pub col_labels: Vec<String>,
    pub grid: Vec<Vec<Option<i64>>>,
    pub current: Option<Cell>,
    /// Base cells revealed so far.
    pub visited: BTreeSet<Cell>,
    pub complete: bool,
    pub note: Option<String>,
}

impl TableView {
    #[must_use]
    pub fn new(rows: usize, cols: usize, row_labels: Vec<String>, col_labels: Vec<String>) -> Self {
        Self {
            row_labels,
            col_labels,
            grid: vec![vec![None; cols]; rows],
            current: None,
            visited: BTreeSet::new(),
            complete: false,
            note: None,
        }
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.grid.len()
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.grid.first().map_or(0, Vec::len)
    }

    #[must_use]
    pub fn get(&self, cell: Cell) -> Option<i64> {
        self.grid.get(cell.row)?.get(cell.col).copied().flatten()
    }

    /// Value of the answer cell, once filled.
    #[must_use]
    pub fn bottom_right(&self) -> Option<i64> {
        let last = self.grid.last()?;
        last.last().copied().flatten()
    }

    fn check(&self, step: &Step, cell: Cell) -> Result<(), ReducerError> {
        bounded(step, cell.row, self.rows())?;
        bounded(step, cell.col, self.cols())
    }

    pub(super) fn apply(&mut self, step: &Step) -> Result<(), ReducerError> {
        match &step.kind {
            StepKind::TableVisit { cell, value } => {
                self.check(step, *cell)?;
                self.grid[cell.row][cell.col] = Some(*value);
                self.visited.insert(*cell);
                self.current = Some(*cell);
            }
            StepKind::TableFill { cell, value, .. } => {
                self.check(step, *cell)?;
                self.grid[cell.row][cell.col] = Some(*value);
                self.current = Some(*cell);
            }
            StepKind::Complete { .. } => {
                self.current = None;
                self.complete = true;
            }
            _ => return Err(foreign(step, NAME)),
        }
        self.note = Some(step.describe());
        Ok(())
    }
}
