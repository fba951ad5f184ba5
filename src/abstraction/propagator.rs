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

//! This module defines the `Propagator` trait: the abstraction of a component
//! which watches the partial assignment explored by the solver and derives
//! feasibility information as well as profit bounds for one dimension (one
//! constraint) of the problem.

use crate::{Assignment, Item, ItemId, State};

/// The bookkeeping which is common to all propagators. It comprises the items
/// of the dimension, a private mirror of the solver state (only ever fed by
/// the notifications the propagator receives) and the incremental profit
/// information.
#[derive(Debug, Clone, Default)]
pub struct PropagatorBase {
    items: Vec<Item>,
    state: State,
    current_profit: i64,
    profit_lower_bound: i64,
    profit_upper_bound: i64,
}
impl PropagatorBase {
    /// All the items of this dimension, indexed by item id
    pub fn items(&self) -> &[Item] {
        &self.items
    }
    /// The partial assignment, as the propagator knows it
    pub fn state(&self) -> &State {
        &self.state
    }
    /// Sum of the profits of the items that are bound in the sack
    pub fn current_profit(&self) -> i64 {
        self.current_profit
    }
    pub fn profit_lower_bound(&self) -> i64 {
        self.profit_lower_bound
    }
    pub fn profit_upper_bound(&self) -> i64 {
        self.profit_upper_bound
    }
    pub fn set_profit_lower_bound(&mut self, bound: i64) {
        self.profit_lower_bound = bound;
    }
    pub fn set_profit_upper_bound(&mut self, bound: i64) {
        self.profit_upper_bound = bound;
    }
}

/// This is the contract every propagator must fulfill. The provided methods
/// (`init`, `update`, `copy_state_to_solution`) take care of the bookkeeping
/// that is shared by all propagators and delegate the dimension specific work
/// to the hooks `init_propagator`, `update_propagator` and
/// `copy_current_completion`.
///
/// # Note:
/// Bounds must be *sound*: whatever the current partial assignment is, the
/// lower bound must be the value of an actual completion and the upper bound
/// must never under-estimate the best completion of the dimension. The
/// correctness of the branch-and-bound depends on it. How tight these bounds
/// are is only a performance concern.
pub trait Propagator {
    /// Gives access to the shared bookkeeping
    fn base(&self) -> &PropagatorBase;
    /// Gives mutable access to the shared bookkeeping
    fn base_mut(&mut self) -> &mut PropagatorBase;

    /// Dimension specific initialization. It is called once the items have
    /// been created (and the state reset).
    fn init_propagator(&mut self);
    /// Dimension specific part of an update. It returns false iff the
    /// dimension is infeasible after the update.
    fn update_propagator(&mut self, revert: bool, assignment: Assignment) -> bool;
    /// Returns true iff the current partial assignment satisfies the
    /// constraint of this dimension.
    fn is_feasible(&self) -> bool;
    /// Recomputes the profit lower and upper bounds of the dimension given the
    /// current partial assignment.
    fn compute_profit_bounds(&mut self);
    /// The item this propagator would like to branch on next. It returns
    /// `None` once all items are bound.
    fn next_branch_item(&self) -> Option<ItemId>;
    /// Completes `solution` with the completion that was used to compute the
    /// profit lower bound. Only the unbound items are written.
    fn copy_current_completion(&self, solution: &mut [bool]);

    /// Creates the items of the dimension, resets the state and then calls
    /// the `init_propagator` hook.
    fn init(&mut self, profits: &[i64], weights: &[i64]) {
        debug_assert_eq!(profits.len(), weights.len());
        let base = self.base_mut();
        base.items = profits.iter().zip(weights.iter())
            .enumerate()
            .map(|(id, (p, w))| Item::new(ItemId(id), *w, *p))
            .collect();
        base.state = State::new(profits.len());
        base.current_profit = 0;
        base.profit_lower_bound = 0;
        base.profit_upper_bound = i64::MAX;
        self.init_propagator();
    }
    /// Notifies the propagator that the given assignment has been applied
    /// (or reverted when `revert` is true). It returns false when the
    /// resulting partial assignment is infeasible for this dimension. Even in
    /// that case, the bookkeeping is left consistent so that reverting the same
    /// assignment restores the previous situation.
    fn update(&mut self, revert: bool, assignment: Assignment) -> bool {
        let base = self.base_mut();
        let was_bound = base.state.is_bound(assignment.item);
        assert!(!(was_bound && !revert), "item {} bound twice", assignment.item.id());
        assert!(base.state.update(revert, assignment),
            "reverting {:?} which is not in effect", assignment);

        if assignment.is_in {
            let profit = base.items[assignment.item.id()].profit;
            if revert {
                base.current_profit -= profit;
            } else {
                base.current_profit += profit;
            }
        }
        self.update_propagator(revert, assignment)
    }
    /// Writes the value of every item of the dimension into `solution`.
    /// Unbound items are set to false, unless `single_propagator_mode` is set.
    /// In that case the propagator completes the partial assignment with the
    /// completion it used to compute its lower bound (which is optimal for the
    /// problem as a whole when there is only one dimension).
    fn copy_state_to_solution(&self, single_propagator_mode: bool, solution: &mut [bool]) {
        let state = &self.base().state;
        for (id, value) in solution.iter_mut().enumerate() {
            *value = state.is_in(ItemId(id));
        }
        if single_propagator_mode {
            self.copy_current_completion(solution);
        }
    }

    fn items(&self) -> &[Item] {
        self.base().items()
    }
    fn current_profit(&self) -> i64 {
        self.base().current_profit()
    }
    fn profit_lower_bound(&self) -> i64 {
        self.base().profit_lower_bound()
    }
    fn profit_upper_bound(&self) -> i64 {
        self.base().profit_upper_bound()
    }
}
