//! Arena-backed recursion call tree.
//!
//! Frames are numbered in pre-order with the left child first, so a
//! depth-first walk visits ids in ascending order. Results are fixed at
//! build time; the view fills them in as returns are replayed.

use serde::{Deserialize, Serialize};

pub type FrameId = usize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallFrame {
    pub id: FrameId,
    /// Display label such as `fib(4)`.
    pub label: String,
    pub arg: u32,
    pub parent: Option<FrameId>,
    pub children: Vec<FrameId>,
    pub depth: usize,
    pub result: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallTree {
    frames: Vec<CallFrame>,
}

impl CallTree {
    /// Build a tree by expanding `root`. `expand(arg)` returns either the
    /// base-case result or the child arguments plus a combiner.
    pub fn build<F>(name: &str, root: u32, expand: F) -> Self
    where
        F: Fn(u32) -> Expansion,
    {
        let mut tree = Self::default();
        tree.grow(name, root, None, 0, &expand);
        tree
    }

    fn grow<F>(
        &mut self,
        name: &str,
        arg: u32,
        parent: Option<FrameId>,
        depth: usize,
        expand: &F,
    ) -> i64
    where
        F: Fn(u32) -> Expansion,
    {
        let id = self.frames.len();
        self.frames.push(CallFrame {
            id,
            label: format!("{name}({arg})"),
            arg,
            parent,
            children: Vec::new(),
            depth,
            result: 0,
        });
        let result = match expand(arg) {
            Expansion::Leaf(value) => value,
            Expansion::Branch { args, combine } => {
                let mut values = Vec::with_capacity(args.len());
                for child_arg in args {
                    let child = self.frames.len();
                    self.frames[id].children.push(child);
                    values.push(self.grow(name, child_arg, Some(id), depth + 1, expand));
                }
                combine(arg, &values)
            }
        };
        self.frames[id].result = result;
        result
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[must_use]
    pub fn frames(&self) -> &[CallFrame] {
        &self.frames
    }

    #[must_use]
    pub fn frame(&self, id: FrameId) -> Option<&CallFrame> {
        self.frames.get(id)
    }

    #[must_use]
    pub fn root(&self) -> Option<&CallFrame> {
        self.frames.first()
    }

    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.frames.iter().map(|f| f.depth).max().unwrap_or(0)
    }
}

/// How one call expands.
pub enum Expansion {
    Leaf(i64),
    Branch {
        args: Vec<u32>,
        combine: fn(u32, &[i64]) -> i64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fib(n: u32) -> Expansion {
        if n <= 1 {
            Expansion::Leaf(i64::from(n))
        } else {
            Expansion::Branch {
                args: vec![n - 1, n - 2],
                combine: |_, v| v.iter().sum(),
            }
        }
    }

    #[test]
    fn fib_tree_is_preorder_left_first() {
        let tree = CallTree::build("fib", 3, fib);
        let labels: Vec<_> = tree.frames().iter().map(|f| f.label.as_str()).collect();
        assert_eq!(labels, ["fib(3)", "fib(2)", "fib(1)", "fib(0)", "fib(1)"]);
        assert_eq!(tree.frames()[0].children, vec![1, 4]);
        assert_eq!(tree.root().map(|f| f.result), Some(2));
        assert_eq!(tree.max_depth(), 2);
    }

    #[test]
    fn single_leaf_tree() {
        let tree = CallTree::build("fib", 0, fib);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.frames()[0].parent, None);
        assert!(tree.frames()[0].children.is_empty());
    }
}
