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

//! This module provides the fringe (aka open set) of the branch-and-bound:
//! the priority queue of the nodes that have been created but not yet
//! expanded.

use std::cmp::Ordering;

use binary_heap_plus::BinaryHeap;
use compare::Compare;

use crate::NodeId;

/// An entry of the fringe: a node of the search tree along with the
/// aggregated upper bound it was given when it was created.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct OpenNode {
    pub node: NodeId,
    pub upper_bound: i64,
}

/// The ordering of the fringe: the node having the largest upper bound is
/// popped first. Ties are broken in favor of the oldest node (the one having
/// the smallest id).
#[derive(Debug, Default, Clone, Copy)]
pub struct MaxUpperBound;
impl Compare<OpenNode> for MaxUpperBound {
    fn compare(&self, l: &OpenNode, r: &OpenNode) -> Ordering {
        l.upper_bound.cmp(&r.upper_bound)
            .then_with(|| r.node.cmp(&l.node))
    }
}

/// A binary heap that pushes and pops open nodes in `MaxUpperBound` order
#[derive(Debug, Clone)]
pub struct Fringe {
    heap: BinaryHeap<OpenNode, MaxUpperBound>,
}
impl Default for Fringe {
    fn default() -> Self {
        Self::new()
    }
}
impl Fringe {
    pub fn new() -> Self {
        Self { heap: BinaryHeap::from_vec_cmp(vec![], MaxUpperBound) }
    }
    pub fn push(&mut self, node: OpenNode) {
        self.heap.push(node)
    }
    pub fn pop(&mut self) -> Option<OpenNode> {
        self.heap.pop()
    }
    /// Returns the node that would be popped next, without removing it
    pub fn peek(&self) -> Option<&OpenNode> {
        self.heap.peek()
    }
    pub fn clear(&mut self) {
        self.heap.clear()
    }
    pub fn len(&self) -> usize {
        self.heap.len()
    }
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod test_fringe {
    use crate::*;
    use compare::Compare;
    use std::cmp::Ordering;

    fn open(node: usize, upper_bound: i64) -> OpenNode {
        OpenNode { node: NodeId(node), upper_bound }
    }

    #[test]
    fn by_default_it_is_empty() {
        let fringe = Fringe::new();
        assert!(fringe.is_empty());
        assert_eq!(0, fringe.len());
        assert_eq!(None, fringe.peek());
    }
    #[test]
    fn when_i_push_a_node_onto_the_fringe_then_the_length_increases() {
        let mut fringe = Fringe::new();
        fringe.push(open(0, 10));
        fringe.push(open(1, 10));
        assert_eq!(2, fringe.len());
        assert!(!fringe.is_empty());
    }
    #[test]
    fn when_i_pop_a_node_off_the_fringe_then_the_length_decreases() {
        let mut fringe = Fringe::new();
        fringe.push(open(0, 10));
        fringe.push(open(1, 10));
        fringe.pop();
        assert_eq!(1, fringe.len());
    }
    #[test]
    fn when_i_try_to_pop_a_node_off_an_empty_fringe_i_get_none() {
        let mut fringe = Fringe::new();
        assert_eq!(None, fringe.pop());
    }
    #[test]
    fn when_i_clear_the_fringe_it_becomes_empty() {
        let mut fringe = Fringe::new();
        fringe.push(open(0, 10));
        fringe.push(open(1, 12));
        fringe.clear();
        assert!(fringe.is_empty());
    }
    #[test]
    fn nodes_are_popped_by_decreasing_upper_bound() {
        let mut fringe = Fringe::new();
        fringe.push(open(0, 3));
        fringe.push(open(1, 12));
        fringe.push(open(2, 7));
        fringe.push(open(3, 9));
        assert_eq!(Some(&open(1, 12)), fringe.peek());
        assert_eq!(Some(open(1, 12)), fringe.pop());
        assert_eq!(Some(open(3, 9)), fringe.pop());
        assert_eq!(Some(open(2, 7)), fringe.pop());
        assert_eq!(Some(open(0, 3)), fringe.pop());
        assert_eq!(None, fringe.pop());
    }
    #[test]
    fn ties_are_broken_in_favor_of_the_oldest_node() {
        let mut fringe = Fringe::new();
        fringe.push(open(5, 10));
        fringe.push(open(2, 10));
        fringe.push(open(9, 10));
        assert_eq!(Some(open(2, 10)), fringe.pop());
        assert_eq!(Some(open(5, 10)), fringe.pop());
        assert_eq!(Some(open(9, 10)), fringe.pop());
    }
    #[test]
    fn the_comparator_ranks_larger_bounds_higher() {
        let cmp = MaxUpperBound;
        assert_eq!(Ordering::Greater, cmp.compare(&open(0, 10), &open(1, 5)));
        assert_eq!(Ordering::Less, cmp.compare(&open(0, 5), &open(1, 10)));
        assert_eq!(Ordering::Greater, cmp.compare(&open(0, 5), &open(1, 5)));
        assert_eq!(Ordering::Equal, cmp.compare(&open(1, 5), &open(1, 5)));
    }
}
