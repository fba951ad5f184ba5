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

//! This module defines the `Solver` trait.

use crate::{Completion, Cutoff, ItemId};

/// This is the solver abstraction. It is implemented by the structures that
/// are able to find the subset of items which maximizes the total profit of
/// a knapsack instance without exceeding any of its capacities.
pub trait Solver {
    /// This method orders the solver to search for the optimal solution among
    /// all possibilities. It returns a structure standing for the outcome of
    /// the attempted maximization. Such a `Completion` may either be marked
    /// **exact** if the maximization has been carried out until optimality was
    /// proved. Or it can be inexact, in which case it means that the
    /// maximization process was stopped because of the satisfaction of the
    /// cutoff criterion (or because the node budget of the call is exhausted).
    ///
    /// The `status` of the completion tells why the search stopped. When the
    /// status is `LimitReached`, `Continue` or `ImprovedSolutionFound`, calling
    /// `maximize` again resumes the search where it was interrupted.
    fn maximize(&mut self, cutoff: &dyn Cutoff) -> Completion;
    /// This method returns the value of the best solution that has been found.
    /// It returns `None` when the problem admits no feasible solution.
    fn best_value(&self) -> Option<i64>;
    /// Returns the tightest upper bound that can be guaranteed so far.
    /// In case where no upper bound has been computed, it returns `i64::MAX`.
    fn best_upper_bound(&self) -> i64;
    /// Returns true iff the given item is part of the best solution
    fn contains(&self, item: ItemId) -> bool;
    /// Returns true iff the best solution has been proven optimal
    fn is_optimal(&self) -> bool;
    /// Sets a primal (best known value and solution) of the problem. It is
    /// only retained when it improves the best solution known so far.
    fn set_primal(&mut self, value: i64, solution: &[bool]);

    /// Computes the optimality gap
    fn gap(&self) -> f32 {
        let ub = self.best_upper_bound();
        match self.best_value() {
            None => 1.0,
            Some(_) if ub == i64::MAX => 1.0,
            Some(lb) => {
                let aub = ub.abs();
                let alb = lb.abs();
                let u = aub.max(alb);
                let l = aub.min(alb);
                if u == 0 {
                    0.0
                } else {
                    (u - l) as f32 / u as f32
                }
            }
        }
    }
}
