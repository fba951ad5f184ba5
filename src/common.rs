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

//! This module defines the most basic data types that are used throughout all
//! the code of our library (both at the abstraction and implementation levels).
//! These are also the types your client code is likely to work with.

/// This type denotes an item of the knapsack instance at hand. Each item is
/// identified with an integer ranging from 0 until the number of items.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ItemId(pub usize);
impl ItemId {
    #[inline]
    /// This function returns the id (numeric value) of the item.
    ///
    /// # Examples:
    /// ```
    /// # use knapsack_bnb::ItemId;
    /// assert_eq!(0, ItemId(0).id());
    /// assert_eq!(7, ItemId(7).id());
    /// ```
    pub fn id(self) -> usize {
        self.0
    }
}

/// An item as it is seen by one single dimension of the problem: it has an
/// identifier, a weight (in that dimension) and a profit.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Item {
    pub id     : ItemId,
    pub weight : i64,
    pub profit : i64,
}
impl Item {
    pub fn new(id: ItemId, weight: i64, profit: i64) -> Self {
        Item { id, weight, profit }
    }
    /// Returns the profit per unit of weight of this item. Items having a zero
    /// weight are considered to be maximally efficient: they are given the
    /// efficiency `profit_max` which must be at least as large as the profit
    /// of any item in the dimension.
    ///
    /// # Examples:
    /// ```
    /// # use knapsack_bnb::{Item, ItemId};
    /// assert_eq!(1.5, Item::new(ItemId(0), 2, 3).efficiency(10));
    /// assert_eq!(10.0, Item::new(ItemId(1), 0, 3).efficiency(10));
    /// ```
    pub fn efficiency(&self, profit_max: i64) -> f64 {
        if self.weight > 0 {
            self.profit as f64 / self.weight as f64
        } else {
            profit_max as f64
        }
    }
}

/// This denotes a decision that was made during the search. It either puts
/// the given `item` in the sack (`is_in == true`) or leaves it out.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Assignment {
    pub item  : ItemId,
    pub is_in : bool,
}
impl Assignment {
    pub fn new(item: ItemId, is_in: bool) -> Self {
        Assignment { item, is_in }
    }
}

/// The status reported by a solver at the end of a call to `maximize`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Status {
    /// The search was carried out until the best solution was proven optimal.
    OptimalSolutionFound,
    /// The search was interrupted, but it improved the best known solution
    /// before stopping. Calling `maximize` again resumes the search.
    ImprovedSolutionFound,
    /// The problem is proven to admit no feasible solution.
    Infeasible,
    /// The time budget was exhausted before the best solution could be
    /// improved or proven optimal.
    LimitReached,
    /// The per-call node budget was exhausted without improving the best
    /// solution. Calling `maximize` again resumes the search.
    Continue,
    /// The solver declines to work on its current state: it must be
    /// re-initialized before it can run again.
    Abort,
}

/// The outcome of a call to `maximize`
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Completion {
    /// Why did the search stop ?
    pub status: Status,
    /// is the given solution exact (proved optimal) or is it an approximation ?
    pub is_exact: bool,
    /// if present, the value of the best solution known when the search stopped
    pub best_value: Option<i64>,
}

/// A couple of counters describing the work that has been carried out by a
/// branch-and-bound engine.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub struct Statistics {
    /// Number of nodes that have been popped from the fringe and expanded
    pub explored: usize,
    /// Number of nodes that have been created (root included)
    pub created: usize,
    /// Number of child nodes discarded because of their upper bound
    pub pruned: usize,
    /// Number of child nodes discarded because they violate some capacity
    pub infeasible: usize,
}
