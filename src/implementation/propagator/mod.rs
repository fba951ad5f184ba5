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

//! This module provides the implementations of the `Propagator` trait.
mod capacity;

pub use capacity::*;

use crate::{Assignment, ItemId, Propagator, PropagatorBase};

/// The closed set of propagators a solver can be made of. Each dimension of
/// the problem is watched by exactly one of them.
///
/// # Note:
/// Only capacity constraints are supported at the moment. Pairwise conflict
/// constraints (two items that cannot be both in the sack) would be another
/// variant of this enum.
#[derive(Debug, Clone)]
pub enum DimensionPropagator {
    Capacity(CapacityPropagator),
}

impl DimensionPropagator {
    pub fn capacity(capacity: i64) -> Self {
        DimensionPropagator::Capacity(CapacityPropagator::new(capacity))
    }
}

impl Propagator for DimensionPropagator {
    fn base(&self) -> &PropagatorBase {
        match self {
            DimensionPropagator::Capacity(p) => p.base(),
        }
    }
    fn base_mut(&mut self) -> &mut PropagatorBase {
        match self {
            DimensionPropagator::Capacity(p) => p.base_mut(),
        }
    }
    fn init_propagator(&mut self) {
        match self {
            DimensionPropagator::Capacity(p) => p.init_propagator(),
        }
    }
    fn update_propagator(&mut self, revert: bool, assignment: Assignment) -> bool {
        match self {
            DimensionPropagator::Capacity(p) => p.update_propagator(revert, assignment),
        }
    }
    fn is_feasible(&self) -> bool {
        match self {
            DimensionPropagator::Capacity(p) => p.is_feasible(),
        }
    }
    fn compute_profit_bounds(&mut self) {
        match self {
            DimensionPropagator::Capacity(p) => p.compute_profit_bounds(),
        }
    }
    fn next_branch_item(&self) -> Option<ItemId> {
        match self {
            DimensionPropagator::Capacity(p) => p.next_branch_item(),
        }
    }
    fn copy_current_completion(&self, solution: &mut [bool]) {
        match self {
            DimensionPropagator::Capacity(p) => p.copy_current_completion(solution),
        }
    }
}
