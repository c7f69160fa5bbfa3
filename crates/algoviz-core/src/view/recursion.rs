use serde::{Deserialize, Serialize};

use super::{bounded, foreign};
use crate::call_tree::{CallTree, FrameId};
use crate::error::ReducerError;
use crate::step::{Step, StepKind};

pub(super) const NAME: &str = "recursion";

/// Call-tree view. Results appear as returns are replayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecursionView {
    pub tree: CallTree,
    pub results: Vec<Option<i64>>,
    pub call_stack: Vec<FrameId>,
    /// Every frame in the order it was entered.
    pub call_history: Vec<FrameId>,
    pub current: Option<FrameId>,
    pub note: Option<String>,
}

impl RecursionView {
    #[must_use]
    pub fn new(tree: CallTree) -> Self {
        Self {
            results: vec![None; tree.len()],
            tree,
            call_stack: Vec::new(),
            call_history: Vec::new(),
            current: None,
            note: None,
        }
    }

    #[must_use]
    pub fn root_result(&self) -> Option<i64> {
        self.results.first().copied().flatten()
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.call_stack.len()
    }

    pub(super) fn apply(&mut self, step: &Step) -> Result<(), ReducerError> {
        let n = self.tree.len();
        match &step.kind {
            StepKind::CallPush { frame } => {
                bounded(step, *frame, n)?;
                let parent = self.tree.frame(*frame).and_then(|f| f.parent);
                let active = self.call_stack.last().copied();
                if parent != active {
                    return Err(ReducerError::CallMismatch {
                        ordinal: step.ordinal,
                        frame: *frame,
                        active,
                    });
                }
                self.call_stack.push(*frame);
                self.call_history.push(*frame);
                self.current = Some(*frame);
            }
            StepKind::CallReturn { frame, result } => {
                bounded(step, *frame, n)?;
                let active = self.call_stack.last().copied();
                if active != Some(*frame) {
                    return Err(ReducerError::CallMismatch {
                        ordinal: step.ordinal,
                        frame: *frame,
                        active,
                    });
                }
                self.call_stack.pop();
                self.results[*frame] = Some(*result);
                self.current = self.call_stack.last().copied();
            }
            StepKind::Complete { .. } => {
                self.current = None;
            }
            _ => return Err(foreign(step, NAME)),
        }
        self.note = Some(self.narrate(step));
        Ok(())
    }

    fn narrate(&self, step: &Step) -> String {
        let label = |id: FrameId| self.tree.frame(id).map_or("?", |f| f.label.as_str());
        match &step.kind {
            StepKind::CallPush { frame } => format!("Calling {}", label(*frame)),
            StepKind::CallReturn { frame, result } => {
                format!("{} returns {result}", label(*frame))
            }
            other => other.describe(),
        }
    }
}
