// Copyright 2020 Xavier Gillard
//
// Permission is hereby granted, free of charge, to any person obtaining a copy of
// this software and associated documentation files (the "Software"), to deal in
// the Software without restriction, including without limitation the rights to
// use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
// FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
// COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
// IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! This module provides the `SearchPath`: the plan telling how to move the
//! partial assignment from one node of the search tree to another one.

use crate::{Assignment, NodeId, SearchTree};

/// A path between two nodes of the search tree. It goes up from `from` until
/// it reaches `via` (the lowest common ancestor of both ends) and then down
/// from `via` until it reaches `to`. Paths are transient: they are computed
/// whenever the solver jumps to the next node and are never stored.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct SearchPath {
    pub from: NodeId,
    pub via: NodeId,
    pub to: NodeId,
}
impl SearchPath {
    pub fn new(tree: &SearchTree, from: NodeId, to: NodeId) -> Self {
        let via = tree.lowest_common_ancestor(from, to);
        SearchPath { from, via, to }
    }
    /// The assignments that must be reverted to go from `from` up to `via`,
    /// in the order they must be reverted (bottom-up).
    pub fn to_revert(&self, tree: &SearchTree) -> Vec<Assignment> {
        Self::decisions_between(tree, self.from, self.via)
    }
    /// The assignments that must be applied to go from `via` down to `to`,
    /// in the order they must be applied (root to leaf).
    pub fn to_apply(&self, tree: &SearchTree) -> Vec<Assignment> {
        let mut decisions = Self::decisions_between(tree, self.to, self.via);
        decisions.reverse();
        decisions
    }
    /// Replays this path: `update` is called with `revert == true` for each of
    /// the assignments to revert, and then with `revert == false` for each of
    /// the assignments to apply. All the updates are carried out, even when
    /// some of them fail. The return value is true iff all of them succeeded.
    pub fn replay<F>(&self, tree: &SearchTree, mut update: F) -> bool
        where F: FnMut(bool, Assignment) -> bool
    {
        let mut feasible = true;
        for assignment in self.to_revert(tree) {
            feasible &= update(true, assignment);
        }
        for assignment in self.to_apply(tree) {
            feasible &= update(false, assignment);
        }
        feasible
    }
    /// Collects the decisions on the edges from `node` up to `ancestor`
    /// (excluded), bottom-up.
    fn decisions_between(tree: &SearchTree, node: NodeId, ancestor: NodeId) -> Vec<Assignment> {
        let mut decisions = vec![];
        let mut current = node;
        while current != ancestor {
            let n = tree.node(current);
            match n.edge {
                Some(edge) => {
                    decisions.push(edge.assignment);
                    current = edge.parent;
                }
                None => unreachable!("{:?} is not an ancestor of {:?}", ancestor, node),
            }
        }
        decisions
    }
}
