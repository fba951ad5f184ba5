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

//! This module provides some utilities to write tests, the most notable of
//! which are a random instance generator and a brute force solver which
//! serves as an oracle. The integration tests include this very file (see
//! `tests/common/mod.rs`) since they cannot see the `cfg(test)` items of the
//! crate.
#![cfg(test)]

use rand::Rng;

/// A complete multi-dimensional knapsack instance
#[derive(Debug, Clone)]
pub struct Instance {
    pub profits: Vec<i64>,
    pub weights: Vec<Vec<i64>>,
    pub capacities: Vec<i64>,
}
impl Instance {
    pub fn nb_items(&self) -> usize {
        self.profits.len()
    }
    /// Returns true iff the given selection respects all capacities
    pub fn is_feasible(&self, selection: &[bool]) -> bool {
        self.weights.iter().zip(self.capacities.iter())
            .all(|(row, capa)| total(row, selection) <= *capa)
    }
    pub fn profit_of(&self, selection: &[bool]) -> i64 {
        total(&self.profits, selection)
    }
}

fn total(row: &[i64], selection: &[bool]) -> i64 {
    row.iter().zip(selection.iter())
        .filter(|(_, taken)| **taken)
        .map(|(v, _)| *v)
        .sum()
}

/// Generates a random instance. Zero profits and zero weights are allowed,
/// and the capacity of each dimension is a random fraction of its total
/// weight (anywhere from nothing fits to everything fits).
pub fn random_instance<R: Rng>(rng: &mut R, nb_items: usize, nb_dims: usize) -> Instance {
    let profits = (0..nb_items).map(|_| rng.gen_range(0..=50)).collect();
    let weights: Vec<Vec<i64>> = (0..nb_dims)
        .map(|_| (0..nb_items).map(|_| rng.gen_range(0..=30)).collect())
        .collect();
    let capacities = weights.iter()
        .map(|row| {
            let sum = row.iter().sum::<i64>();
            rng.gen_range(0..=sum)
        })
        .collect();
    Instance { profits, weights, capacities }
}

/// Computes the optimum of the instance by enumerating all subsets of items
pub fn brute_force(instance: &Instance) -> i64 {
    let n = instance.nb_items();
    assert!(n <= 20, "too many items to enumerate");
    let mut best = 0;
    let mut selection = vec![false; n];
    for mask in 0_u32..(1 << n) {
        for (i, taken) in selection.iter_mut().enumerate() {
            *taken = mask & (1 << i) != 0;
        }
        if instance.is_feasible(&selection) {
            best = best.max(instance.profit_of(&selection));
        }
    }
    best
}
