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

//! # Knapsack BnB
//! This crate provides an incremental branch-and-bound solver for the
//! multi-dimensional 0/1 knapsack problem. Given a set of items, each of which
//! has a profit and a weight in every dimension, and given one capacity per
//! dimension, it finds the subset of items maximizing the total profit
//! without exceeding any of the capacities.
//!
//! ## How it works
//! Each dimension (capacity constraint) of the problem is watched by a
//! `Propagator` which maintains, incrementally, the bounds on the profit that
//! can be reached from the current partial assignment. The solver keeps one
//! single partial assignment (`State`) which it moves around the search tree
//! by reverting and applying the decisions on the `SearchPath` connecting the
//! node it visited last to the next one. The nodes of the tree are explored
//! best upper bound first, and the nodes which cannot improve on the best
//! solution found so far are pruned.
//!
//! Before the search starts, the `KnapsackSolver` drops the dimensions that
//! can never be binding and fixes the items whose value can be decided from
//! their bounds alone.
//!
//! ## Quick Example
//! ```
//! use knapsack_bnb::*;
//! use std::time::Duration;
//!
//! let profits    = [3, 4, 5, 6];
//! let weights    = [vec![2, 3, 4, 5]];
//! let capacities = [5];
//!
//! let mut solver = KnapsackSolver::new(&profits, &weights, &capacities)
//!     .expect("the instance is well formed");
//! let outcome = solver.maximize(&TimeBudget::new(Duration::from_secs(10)));
//!
//! assert_eq!(Status::OptimalSolutionFound, outcome.status);
//! assert_eq!(Some(7), outcome.best_value);
//! assert!(solver.contains(ItemId(0)));
//! assert!(solver.contains(ItemId(1)));
//! assert!(!solver.contains(ItemId(2)));
//! assert!(!solver.contains(ItemId(3)));
//! ```
//!
//! ## Logging
//! The solvers report their progress through the `tracing` facade: `info`
//! for the outcome of a resolution, `debug` for the reduction and the end of
//! the search, `trace` for each node. No subscriber is installed by this
//! crate.

mod common;
mod error;
mod abstraction;
mod implementation;

pub use common::*;
pub use error::*;
pub use abstraction::*;
pub use implementation::*;

#[cfg(test)]
mod test_utils;
