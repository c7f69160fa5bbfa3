use serde::{Deserialize, Serialize};

use super::{bounded, foreign};
use crate::error::ReducerError;
use crate::step::{Step, StepKind};

pub(super) const NAME: &str = "array";

/// Bars view shared by sorts and searches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrayView {
    pub values: Vec<i64>,
    pub current: Option<usize>,
    pub compare: Option<usize>,
    pub pivot: Option<usize>,
    /// Active window, inclusive.
    pub range: Option<(usize, usize)>,
    /// Sorted or found indices in the order they were first marked.
    pub marked: Vec<usize>,
    pub found: Option<usize>,
    pub complete: bool,
    pub note: Option<String>,
}

impl ArrayView {
    #[must_use]
    pub fn new(values: Vec<i64>) -> Self {
        Self {
            values,
            current: None,
            compare: None,
            pivot: None,
            range: None,
            marked: Vec::new(),
            found: None,
            complete: false,
            note: None,
        }
    }

    #[must_use]
    pub fn is_marked(&self, index: usize) -> bool {
        self.marked.contains(&index)
    }

    fn mark(&mut self, index: usize) {
        if !self.is_marked(index) {
            self.marked.push(index);
        }
    }

    pub(super) fn apply(&mut self, step: &Step) -> Result<(), ReducerError> {
        let len = self.values.len();
        match &step.kind {
            StepKind::Compare { i, j } => {
                bounded(step, *i, len)?;
                bounded(step, *j, len)?;
                self.current = Some(*i);
                self.compare = Some(*j);
            }
            StepKind::Swap { i, j } => {
                bounded(step, *i, len)?;
                bounded(step, *j, len)?;
                self.values.swap(*i, *j);
                self.current = Some(*i);
                self.compare = Some(*j);
            }
            StepKind::SetValue { index, value } => {
                bounded(step, *index, len)?;
                self.values[*index] = *value;
                self.current = Some(*index);
                self.compare = None;
            }
            StepKind::MarkSorted { index } => {
                bounded(step, *index, len)?;
                self.mark(*index);
            }
            StepKind::MarkCurrent { index } => {
                bounded(step, *index, len)?;
                self.current = Some(*index);
                self.compare = None;
            }
            StepKind::MarkRange { lo, hi } => {
                bounded(step, *hi, len)?;
                bounded(step, *lo, hi + 1)?;
                self.range = Some((*lo, *hi));
            }
            StepKind::MarkPivot { index } => {
                bounded(step, *index, len)?;
                self.pivot = Some(*index);
            }
            StepKind::Found { index } => {
                bounded(step, *index, len)?;
                self.found = Some(*index);
                self.current = Some(*index);
                self.mark(*index);
            }
            StepKind::Complete { index, .. } => {
                if let Some(index) = index {
                    bounded(step, *index, len)?;
                }
                self.current = None;
                self.compare = None;
                self.pivot = None;
                self.complete = true;
            }
            _ => return Err(foreign(step, NAME)),
        }
        self.note = Some(step.describe());
        Ok(())
    }
}
