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

//! This module provides the implementation of the capacity propagator: the
//! propagator which enforces that the total weight of the items put in the
//! sack does not exceed the capacity of one dimension.

use std::cmp::Ordering;

use ordered_float::OrderedFloat;

use crate::{Assignment, Item, ItemId, Propagator, PropagatorBase};

/// The capacity propagator derives its bounds from the greedy solution of the
/// dimension: it considers the unbound items by decreasing efficiency and
/// accepts them until one (the *break item*) would overflow the remaining
/// capacity.
///
/// * The profit of the items accepted before the break item is the profit of
///   an actual completion, hence a valid lower bound.
/// * The upper bound is the linear relaxation of the dimension (Dantzig),
///   tightened by comparing what would happen if the break item were forced
///   out of or into the sack (Martello-Toth).
///
/// The greedy scan is incremental. The propagator keeps the prefix sums of
/// the weight and profit of the unbound items in efficiency order, together
/// with the position up to which these sums are still valid. An update only
/// invalidates the positions that follow the updated item; the next bound
/// computation finds the break item with a binary search over the valid part
/// of the prefix and only extends it when needed.
#[derive(Debug, Clone)]
pub struct CapacityPropagator {
    base: PropagatorBase,
    capacity: i64,
    consumed_capacity: i64,
    /// All items of the dimension sorted by decreasing efficiency
    items_by_efficiency: Vec<Item>,
    /// position[i] is the position of item i in `items_by_efficiency`
    position: Vec<usize>,
    /// prefix_weight[k] is the weight of the unbound items at positions < k
    prefix_weight: Vec<i64>,
    /// prefix_profit[k] is the profit of the unbound items at positions < k
    prefix_profit: Vec<i64>,
    /// prefix_*[k] is up to date for every k <= valid_prefix
    valid_prefix: usize,
    break_item_id: Option<ItemId>,
}

impl CapacityPropagator {
    pub fn new(capacity: i64) -> Self {
        CapacityPropagator {
            base: PropagatorBase::default(),
            capacity,
            consumed_capacity: 0,
            items_by_efficiency: vec![],
            position: vec![],
            prefix_weight: vec![0],
            prefix_profit: vec![0],
            valid_prefix: 0,
            break_item_id: None,
        }
    }
    pub fn capacity(&self) -> i64 {
        self.capacity
    }
    /// The total weight of the items which are bound in the sack
    pub fn consumed_capacity(&self) -> i64 {
        self.consumed_capacity
    }
    pub fn items_by_efficiency(&self) -> &[Item] {
        &self.items_by_efficiency
    }
    pub fn break_item_id(&self) -> Option<ItemId> {
        self.break_item_id
    }

    /// Makes sure the prefix sums are valid up to position `k` (included).
    fn extend_prefix(&mut self, k: usize) {
        while self.valid_prefix < k {
            let pos = self.valid_prefix;
            let item = self.items_by_efficiency[pos];
            let (w, p) = if self.base.state().is_bound(item.id) {
                (0, 0)
            } else {
                (item.weight, item.profit)
            };
            self.prefix_weight[pos + 1] = self.prefix_weight[pos] + w;
            self.prefix_profit[pos + 1] = self.prefix_profit[pos] + p;
            self.valid_prefix += 1;
        }
    }
    /// Returns the position of the break item given the remaining capacity
    /// (if there is one such item).
    fn find_break_position(&mut self, remaining: i64) -> Option<usize> {
        let known = self.prefix_weight[1..=self.valid_prefix]
            .partition_point(|w| *w <= remaining);
        if known < self.valid_prefix {
            return Some(known);
        }
        let nb_items = self.items_by_efficiency.len();
        while self.valid_prefix < nb_items {
            let pos = self.valid_prefix;
            self.extend_prefix(pos + 1);
            if self.prefix_weight[pos + 1] > remaining {
                return Some(pos);
            }
        }
        None
    }
    fn is_unbound_at(&self, pos: usize) -> bool {
        !self.base.state().is_bound(self.items_by_efficiency[pos].id)
    }
    /// Profit that may be added on top of the greedy lower bound when the
    /// break item (at position `brk`) does not fit in the `residual` capacity.
    /// `remaining` is the capacity left by the bound items.
    fn additional_profit(&self, brk: usize, residual: i64, remaining: i64) -> i64 {
        let break_item = self.items_by_efficiency[brk];
        // Linear relaxation: fill the residual capacity with a fraction of
        // the break item.
        let dantzig = floor_ratio(residual, break_item.profit, break_item.weight);

        // Break item forced out: the residual capacity can at best be filled
        // at the efficiency of the next unbound item.
        let nb_items = self.items_by_efficiency.len();
        let when_out = match (brk + 1..nb_items).find(|pos| self.is_unbound_at(*pos)) {
            None => 0,
            Some(next) => {
                let next = self.items_by_efficiency[next];
                if next.weight > 0 {
                    floor_ratio(residual, next.profit, next.weight)
                } else {
                    dantzig
                }
            }
        };
        // Break item forced in: the overflow must be removed from the accepted
        // items, which costs at least the efficiency of the last accepted one.
        let when_in = if break_item.weight > remaining {
            None
        } else {
            (0..brk).rev()
                .filter(|pos| self.is_unbound_at(*pos))
                .map(|pos| self.items_by_efficiency[pos])
                .find(|item| item.weight > 0)
                .map(|prev| {
                    let overflow = break_item.weight - residual;
                    break_item.profit - ceil_ratio(overflow, prev.profit, prev.weight)
                })
        };

        let tightened = when_in.map_or(when_out, |v| v.max(when_out));
        dantzig.min(tightened)
    }
}

impl Propagator for CapacityPropagator {
    fn base(&self) -> &PropagatorBase {
        &self.base
    }
    fn base_mut(&mut self) -> &mut PropagatorBase {
        &mut self.base
    }

    fn init_propagator(&mut self) {
        let items = self.base.items();
        let profit_max = items.iter().map(|i| i.profit).max().unwrap_or(0);

        let mut sorted = items.to_vec();
        sorted.sort_by(|a, b| by_decreasing_efficiency(a, b, profit_max));

        let mut position = vec![0; sorted.len()];
        for (pos, item) in sorted.iter().enumerate() {
            position[item.id.id()] = pos;
        }

        self.items_by_efficiency = sorted;
        self.position = position;
        self.prefix_weight = vec![0; self.items_by_efficiency.len() + 1];
        self.prefix_profit = vec![0; self.items_by_efficiency.len() + 1];
        self.valid_prefix = 0;
        self.consumed_capacity = 0;
        self.break_item_id = None;
    }

    fn update_propagator(&mut self, revert: bool, assignment: Assignment) -> bool {
        let id = assignment.item.id();
        self.valid_prefix = self.valid_prefix.min(self.position[id]);
        if assignment.is_in {
            let weight = self.base.items()[id].weight;
            if revert {
                self.consumed_capacity -= weight;
            } else {
                self.consumed_capacity += weight;
            }
        }
        revert || self.is_feasible()
    }

    fn is_feasible(&self) -> bool {
        self.consumed_capacity <= self.capacity
    }

    fn compute_profit_bounds(&mut self) {
        let current = self.base.current_profit();
        let remaining = self.capacity - self.consumed_capacity;
        if remaining < 0 {
            self.break_item_id = None;
            self.base.set_profit_lower_bound(current);
            self.base.set_profit_upper_bound(current);
            return;
        }

        match self.find_break_position(remaining) {
            Some(brk) => {
                let lower = current + self.prefix_profit[brk];
                let residual = remaining - self.prefix_weight[brk];
                let additional = self.additional_profit(brk, residual, remaining);
                self.break_item_id = Some(self.items_by_efficiency[brk].id);
                self.base.set_profit_lower_bound(lower);
                self.base.set_profit_upper_bound(lower + additional);
            }
            None => {
                // all unbound items fit: the greedy completion is optimal
                let nb_items = self.items_by_efficiency.len();
                let total = current + self.prefix_profit[nb_items];
                self.break_item_id = (0..nb_items).rev()
                    .find(|pos| self.is_unbound_at(*pos))
                    .map(|pos| self.items_by_efficiency[pos].id);
                self.base.set_profit_lower_bound(total);
                self.base.set_profit_upper_bound(total);
            }
        }
    }

    fn next_branch_item(&self) -> Option<ItemId> {
        self.break_item_id
    }

    fn copy_current_completion(&self, solution: &mut [bool]) {
        let state = self.base.state();
        let mut remaining = self.capacity - self.consumed_capacity;
        for item in self.items_by_efficiency.iter() {
            if state.is_bound(item.id) {
                continue;
            }
            if item.weight > remaining {
                break;
            }
            remaining -= item.weight;
            solution[item.id.id()] = true;
        }
    }
}

/// Orders the items by decreasing efficiency. Among equally efficient items,
/// the lightest come first (so that zero weight items always precede the
/// others).
fn by_decreasing_efficiency(a: &Item, b: &Item, profit_max: i64) -> Ordering {
    let ea = OrderedFloat(a.efficiency(profit_max));
    let eb = OrderedFloat(b.efficiency(profit_max));
    eb.cmp(&ea)
        .then_with(|| a.weight.cmp(&b.weight))
        .then_with(|| a.id.cmp(&b.id))
}
/// floor(x * profit / weight) for non-negative x and positive weight
fn floor_ratio(x: i64, profit: i64, weight: i64) -> i64 {
    ((x as i128 * profit as i128) / weight as i128) as i64
}
/// ceil(x * profit / weight) for non-negative x and positive weight
fn ceil_ratio(x: i64, profit: i64, weight: i64) -> i64 {
    let num = x as i128 * profit as i128;
    let den = weight as i128;
    ((num + den - 1) / den) as i64
}

#[cfg(test)]
mod test_capacity_propagator {
    use crate::*;

    fn propagator(capacity: i64, profits: &[i64], weights: &[i64]) -> CapacityPropagator {
        let mut p = CapacityPropagator::new(capacity);
        p.init(profits, weights);
        p
    }
    fn best_completion(p: &CapacityPropagator) -> i64 {
        // exhaustive enumeration of the completions of the current state
        let state = p.base().state();
        let free = p.items().iter().filter(|i| !state.is_bound(i.id)).copied().collect::<Vec<_>>();
        let remaining = p.capacity() - p.consumed_capacity();
        let mut best = i64::MIN;
        for mask in 0_u32..(1 << free.len()) {
            let (mut w, mut v) = (0, 0);
            for (k, item) in free.iter().enumerate() {
                if mask & (1 << k) != 0 {
                    w += item.weight;
                    v += item.profit;
                }
            }
            if w <= remaining {
                best = best.max(v);
            }
        }
        p.current_profit() + best
    }

    #[test]
    fn items_are_sorted_by_decreasing_efficiency() {
        let p = propagator(10, &[3, 10, 4, 1], &[3, 2, 1, 0]);
        let order = p.items_by_efficiency().iter().map(|i| i.id.id()).collect::<Vec<_>>();
        assert_eq!(vec![3, 1, 2, 0], order);
    }
    #[test]
    fn zero_weight_items_come_first_even_on_ties() {
        // item 1 has efficiency 5 = profit max, exactly as the zero weight item 0
        let p = propagator(10, &[2, 5], &[0, 1]);
        assert_eq!(ItemId(0), p.items_by_efficiency()[0].id);
    }
    #[test]
    fn bounds_at_the_root_of_the_reference_example() {
        let mut p = propagator(5, &[3, 4, 5, 6], &[2, 3, 4, 5]);
        p.compute_profit_bounds();
        // greedy takes items 0 and 1, item 2 is the break item
        assert_eq!(7, p.profit_lower_bound());
        assert_eq!(Some(ItemId(2)), p.next_branch_item());
        assert!(p.profit_upper_bound() >= 7);
        assert!(p.profit_upper_bound() <= 7); // residual capacity is zero
    }
    #[test]
    fn upper_bound_is_tighter_than_the_linear_relaxation() {
        // greedy accepts item 0 (w=5), break item 1 (w=6), residual 4
        let mut p = propagator(9, &[10, 11, 1], &[5, 6, 4]);
        p.compute_profit_bounds();
        assert_eq!(10, p.profit_lower_bound());
        // Dantzig: 10 + floor(4 * 11 / 6) = 17
        // out: 10 + floor(4 * 1/4) = 11 ; in: 10 + 11 - ceil(2 * 10 / 5) = 17
        assert_eq!(17, p.profit_upper_bound());
        assert_eq!(11, best_completion(&p));

        let mut q = propagator(9, &[10, 11, 9], &[5, 6, 4]);
        q.compute_profit_bounds();
        // item 2 is the most efficient one: greedy takes items 2 and 0 which fills the sack
        assert_eq!(19, q.profit_lower_bound());
        assert_eq!(19, q.profit_upper_bound());
        assert_eq!(19, best_completion(&q));
    }
    #[test]
    fn forcing_the_break_item_in_may_tighten_the_bound() {
        // greedy accepts item 0 (w=4) and breaks on item 1 (w=10), residual 6.
        let mut p = propagator(10, &[8, 15, 1], &[4, 10, 6]);
        p.compute_profit_bounds();
        assert_eq!(8, p.profit_lower_bound());
        // Dantzig: 8 + 9 = 17 ; out: 8 + 1 = 9 ; in: 8 + 15 - ceil(4 * 8 / 4) = 15
        assert_eq!(15, p.profit_upper_bound());
        assert_eq!(15, best_completion(&p));
    }
    #[test]
    fn when_everything_fits_the_bounds_are_equal() {
        let mut p = propagator(100, &[3, 4, 5], &[2, 3, 4]);
        p.compute_profit_bounds();
        assert_eq!(12, p.profit_lower_bound());
        assert_eq!(12, p.profit_upper_bound());
        assert!(p.next_branch_item().is_some());
    }
    #[test]
    fn there_is_nothing_to_branch_on_once_everything_is_bound() {
        let mut p = propagator(100, &[3, 4], &[2, 3]);
        p.update(false, Assignment::new(ItemId(0), true));
        p.update(false, Assignment::new(ItemId(1), false));
        p.compute_profit_bounds();
        assert_eq!(None, p.next_branch_item());
        assert_eq!(3, p.profit_lower_bound());
        assert_eq!(3, p.profit_upper_bound());
    }
    #[test]
    fn putting_too_heavy_an_item_in_the_sack_is_infeasible() {
        let mut p = propagator(5, &[3, 4], &[2, 6]);
        assert!(p.update(false, Assignment::new(ItemId(0), true)));
        assert_eq!(2, p.consumed_capacity());
        assert!(!p.update(false, Assignment::new(ItemId(1), true)));
        assert_eq!(8, p.consumed_capacity());
        assert!(!p.is_feasible());
        // reverting restores feasibility
        assert!(p.update(true, Assignment::new(ItemId(1), true)));
        assert_eq!(2, p.consumed_capacity());
        assert!(p.is_feasible());
    }
    #[test]
    fn leaving_an_item_out_does_not_consume_capacity() {
        let mut p = propagator(5, &[3, 4], &[2, 6]);
        assert!(p.update(false, Assignment::new(ItemId(1), false)));
        assert_eq!(0, p.consumed_capacity());
    }
    #[test]
    fn a_negative_capacity_is_infeasible_from_the_start() {
        let mut p = propagator(-1, &[3, 4], &[2, 6]);
        assert!(!p.is_feasible());
        p.compute_profit_bounds();
        assert_eq!(p.profit_lower_bound(), p.profit_upper_bound());
    }
    #[test]
    fn single_propagator_completion_matches_the_lower_bound() {
        let mut p = propagator(9, &[10, 11, 1, 2], &[5, 6, 4, 1]);
        p.update(false, Assignment::new(ItemId(3), false));
        p.compute_profit_bounds();
        let mut solution = vec![false; 4];
        p.copy_state_to_solution(true, &mut solution);
        let value = solution.iter().zip(p.items())
            .filter(|(x, _)| **x)
            .map(|(_, i)| i.profit)
            .sum::<i64>();
        let weight = solution.iter().zip(p.items())
            .filter(|(x, _)| **x)
            .map(|(_, i)| i.weight)
            .sum::<i64>();
        assert_eq!(p.profit_lower_bound(), value);
        assert!(weight <= p.capacity());
    }
    #[test]
    fn break_item_moves_back_when_capacity_gets_consumed() {
        let mut p = propagator(10, &[9, 8, 7, 6], &[3, 3, 3, 3]);
        p.compute_profit_bounds();
        assert_eq!(Some(ItemId(3)), p.next_branch_item());
        // binding the last item in consumes 3 units: item 2 becomes the break
        p.update(false, Assignment::new(ItemId(3), true));
        p.compute_profit_bounds();
        assert_eq!(Some(ItemId(2)), p.next_branch_item());
        assert_eq!(6 + 9 + 8, p.profit_lower_bound());
        p.update(true, Assignment::new(ItemId(3), true));
        p.compute_profit_bounds();
        assert_eq!(Some(ItemId(3)), p.next_branch_item());
        assert_eq!(9 + 8 + 7, p.profit_lower_bound());
    }
    #[test]
    fn bounds_always_bracket_the_best_completion() {
        use rand::{Rng, SeedableRng, rngs::StdRng};
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let n = rng.gen_range(1..=8);
            let profits = (0..n).map(|_| rng.gen_range(0..=20)).collect::<Vec<i64>>();
            let weights = (0..n).map(|_| rng.gen_range(0..=10)).collect::<Vec<i64>>();
            let capacity = rng.gen_range(0..=30);
            let mut p = propagator(capacity, &profits, &weights);

            let mut applied = vec![];
            for id in 0..n {
                if rng.gen_bool(0.4) {
                    let a = Assignment::new(ItemId(id), rng.gen_bool(0.5));
                    let feasible = p.update(false, a);
                    applied.push(a);
                    if !feasible {
                        break;
                    }
                }
            }
            if p.is_feasible() {
                p.compute_profit_bounds();
                let best = best_completion(&p);
                assert!(p.profit_lower_bound() <= best);
                assert!(best <= p.profit_upper_bound());
            }
        }
    }
    #[test]
    fn apply_then_revert_restores_the_incremental_fields() {
        use rand::{Rng, SeedableRng, rngs::StdRng};
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let n = rng.gen_range(1..=10);
            let profits = (0..n).map(|_| rng.gen_range(0..=20)).collect::<Vec<i64>>();
            let weights = (0..n).map(|_| rng.gen_range(0..=10)).collect::<Vec<i64>>();
            let mut p = propagator(rng.gen_range(0..=25), &profits, &weights);
            p.compute_profit_bounds();
            let before = (p.current_profit(), p.consumed_capacity(), p.profit_lower_bound(),
                          p.profit_upper_bound(), p.next_branch_item());

            let mut applied = vec![];
            for id in 0..n {
                if rng.gen_bool(0.5) {
                    let a = Assignment::new(ItemId(id), rng.gen_bool(0.5));
                    p.update(false, a);
                    p.compute_profit_bounds();
                    applied.push(a);
                }
            }
            for a in applied.iter().rev() {
                assert!(p.update(true, *a));
            }
            p.compute_profit_bounds();
            let after = (p.current_profit(), p.consumed_capacity(), p.profit_lower_bound(),
                         p.profit_upper_bound(), p.next_branch_item());
            assert_eq!(before, after);
        }
    }
}
