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

//! This module provides the implementation of the partial assignment which
//! is explored by the branch-and-bound engine.

use bit_vec::BitVec;

use crate::{Assignment, ItemId};

/// The partial assignment of the items of a knapsack instance. Each item is
/// either unbound, or bound in or out of the sack.
///
/// The state is only ever modified through `update`, which enforces a strict
/// symmetry between applying and reverting an assignment: reverting is only
/// ever accepted for an assignment which is currently in effect. This is what
/// allows the solver to move from one search node to another by replaying the
/// decisions along a path of the search tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    bound: BitVec,
    is_in: BitVec,
}
impl State {
    /// Creates a state where all `nb_items` are unbound
    pub fn new(nb_items: usize) -> Self {
        State {
            bound: BitVec::from_elem(nb_items, false),
            is_in: BitVec::from_elem(nb_items, false),
        }
    }
    /// Returns the number of items covered by this state
    pub fn nb_items(&self) -> usize {
        self.bound.len()
    }
    #[inline]
    pub fn is_bound(&self, item: ItemId) -> bool {
        self.bound[item.id()]
    }
    /// Returns true iff the item is bound in the sack. (An unbound item is
    /// never considered to be in).
    #[inline]
    pub fn is_in(&self, item: ItemId) -> bool {
        self.is_in[item.id()]
    }
    /// Applies (`revert == false`) or reverts (`revert == true`) the given
    /// assignment. It returns false when the operation is not permitted:
    ///
    /// * applying fails if the item is already bound to the opposite value,
    /// * reverting fails unless the item is bound to exactly that value.
    pub fn update(&mut self, revert: bool, assignment: Assignment) -> bool {
        let id = assignment.item.id();
        if revert {
            if !self.bound[id] || self.is_in[id] != assignment.is_in {
                return false;
            }
            self.bound.set(id, false);
            self.is_in.set(id, false);
        } else {
            if self.bound[id] && self.is_in[id] != assignment.is_in {
                return false;
            }
            self.bound.set(id, true);
            self.is_in.set(id, assignment.is_in);
        }
        true
    }
    /// Returns the number of items that are currently bound
    pub fn nb_bound(&self) -> usize {
        self.bound.iter().filter(|b| *b).count()
    }
}
impl Default for State {
    fn default() -> Self {
        State::new(0)
    }
}

#[cfg(test)]
mod test_state {
    use crate::*;

    #[test]
    fn all_items_are_unbound_initially() {
        let state = State::new(4);
        assert_eq!(4, state.nb_items());
        assert_eq!(0, state.nb_bound());
        for i in 0..4 {
            assert!(!state.is_bound(ItemId(i)));
            assert!(!state.is_in(ItemId(i)));
        }
    }
    #[test]
    fn applying_an_assignment_binds_the_item() {
        let mut state = State::new(3);
        assert!(state.update(false, Assignment::new(ItemId(1), true)));
        assert!(state.is_bound(ItemId(1)));
        assert!(state.is_in(ItemId(1)));

        assert!(state.update(false, Assignment::new(ItemId(2), false)));
        assert!(state.is_bound(ItemId(2)));
        assert!(!state.is_in(ItemId(2)));
    }
    #[test]
    fn applying_the_same_value_twice_is_accepted() {
        let mut state = State::new(3);
        assert!(state.update(false, Assignment::new(ItemId(0), true)));
        assert!(state.update(false, Assignment::new(ItemId(0), true)));
        assert!(state.is_in(ItemId(0)));
    }
    #[test]
    fn applying_the_opposite_value_fails() {
        let mut state = State::new(3);
        assert!(state.update(false, Assignment::new(ItemId(0), true)));
        assert!(!state.update(false, Assignment::new(ItemId(0), false)));
        assert!(state.is_in(ItemId(0)));
    }
    #[test]
    fn reverting_an_unbound_item_fails() {
        let mut state = State::new(3);
        assert!(!state.update(true, Assignment::new(ItemId(0), false)));
        assert!(!state.is_bound(ItemId(0)));
    }
    #[test]
    fn reverting_the_wrong_value_fails() {
        let mut state = State::new(3);
        assert!(state.update(false, Assignment::new(ItemId(0), false)));
        assert!(!state.update(true, Assignment::new(ItemId(0), true)));
        assert!(state.is_bound(ItemId(0)));
    }
    #[test]
    fn apply_then_revert_restores_the_initial_state() {
        let initial = State::new(5);
        let mut state = initial.clone();
        let decisions = [
            Assignment::new(ItemId(3), true),
            Assignment::new(ItemId(0), false),
            Assignment::new(ItemId(4), true),
        ];
        for d in decisions.iter() {
            assert!(state.update(false, *d));
        }
        assert_eq!(3, state.nb_bound());
        for d in decisions.iter().rev() {
            assert!(state.update(true, *d));
        }
        assert_eq!(initial, state);
    }
}
