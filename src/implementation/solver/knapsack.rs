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

//! This module provides the top-level knapsack solver. It wraps the
//! branch-and-bound engine and shrinks the problem before the search even
//! starts:
//!
//! * dimensions whose capacity can accommodate all items at once can never be
//!   binding, hence they are dropped;
//! * the items whose value can be decided from their bounds alone are fixed
//!   and removed from the instance (this is the *reduction*). Removing items
//!   tightens the bounds of the others, so the reduction is repeated until it
//!   fixes nothing more.
//!
//! All the results are reported in terms of the original instance.

use fxhash::FxHashMap;
use tracing::{debug, info};

use crate::{BranchAndBound, Completion, Cutoff, Error, ItemId, Result, Solver, SolverConfig,
    SolverConfigBuilder, Statistics, Status};

/// The solver you will want to use in order to solve a multi-dimensional
/// knapsack instance.
///
/// # Example
/// ```
/// # use knapsack_bnb::*;
/// let profits    = [3, 4, 5, 6];
/// let weights    = [vec![2, 3, 4, 5], vec![1, 1, 1, 4]];
/// let capacities = [5, 3];
///
/// let mut solver = KnapsackSolver::new(&profits, &weights, &capacities).unwrap();
/// let outcome = solver.maximize(&NoCutoff);
///
/// assert!(outcome.is_exact);
/// assert_eq!(Some(7), outcome.best_value);
/// assert!(solver.contains(ItemId(0)));
/// assert!(solver.contains(ItemId(1)));
/// assert!(!solver.contains(ItemId(2)));
/// ```
#[derive(Debug, Clone)]
pub struct KnapsackSolver {
    config: SolverConfig,
    /// The instance, restricted to the dimensions which are not eliminated.
    /// Rows and capacities are those of the original items.
    profits: Vec<i64>,
    weights: Vec<Vec<i64>>,
    capacities: Vec<i64>,
    /// The engine working on the reduced instance. There is none when all
    /// dimensions have been eliminated.
    engine: Option<BranchAndBound>,
    /// Index of the master propagator among the remaining dimensions
    master: usize,

    /// Has the reduction been carried out already ?
    reduced: bool,
    /// The items which were fixed by the reduction
    fixed: FxHashMap<ItemId, bool>,
    /// to_reduced[i] is the id of item i in the reduced instance (if any)
    to_reduced: Vec<Option<ItemId>>,
    /// The profit of the items fixed in the sack
    additional_profit: i64,
    /// Was the problem already solved without search ?
    solved_without_search: bool,
}

impl KnapsackSolver {
    /// Creates a solver with the default configuration
    pub fn new(profits: &[i64], weights: &[Vec<i64>], capacities: &[i64]) -> Result<Self> {
        Self::with_config(SolverConfig::default(), profits, weights, capacities)
    }
    /// Creates a solver whose configuration is described by the given builder
    pub fn with_builder(builder: &SolverConfigBuilder, profits: &[i64], weights: &[Vec<i64>], capacities: &[i64]) -> Result<Self> {
        Self::with_config(builder.build()?, profits, weights, capacities)
    }
    /// Creates a solver with the given configuration
    pub fn with_config(config: SolverConfig, profits: &[i64], weights: &[Vec<i64>], capacities: &[i64]) -> Result<Self> {
        crate::check_instance(profits, weights, capacities)?;
        let dimensions = capacities.len();
        if dimensions > 0 && config.master_propagator >= dimensions {
            return Err(Error::MasterPropagator { master: config.master_propagator, dimensions });
        }

        let kept = binding_dimensions(weights, capacities);
        debug!(dimensions, eliminated = dimensions - kept.len(), "dimension elimination");
        let master = kept.iter()
            .position(|d| *d == config.master_propagator)
            .unwrap_or(0);
        let weights: Vec<Vec<i64>> = kept.iter().map(|d| weights[*d].clone()).collect();
        let capacities: Vec<i64> = kept.iter().map(|d| capacities[*d]).collect();

        let engine = if kept.is_empty() {
            None
        } else {
            Some(BranchAndBound::unchecked(profits, &weights, &capacities, master)
                .with_node_limit(config.node_limit))
        };

        Ok(KnapsackSolver {
            config,
            profits: profits.to_vec(),
            weights,
            capacities,
            engine,
            master,
            reduced: false,
            fixed: FxHashMap::default(),
            to_reduced: (0..profits.len()).map(|i| Some(ItemId(i))).collect(),
            additional_profit: 0,
            solved_without_search: false,
        })
    }

    pub fn nb_items(&self) -> usize {
        self.profits.len()
    }
    /// The number of dimensions which survived the dimension elimination
    pub fn nb_active_dimensions(&self) -> usize {
        self.capacities.len()
    }
    /// The items whose value was decided by the reduction
    pub fn fixed_items(&self) -> &FxHashMap<ItemId, bool> {
        &self.fixed
    }
    /// The profit brought by the items that were fixed in the sack
    pub fn additional_profit(&self) -> i64 {
        self.additional_profit
    }
    /// The counters of the branch-and-bound engine
    pub fn statistics(&self) -> Statistics {
        self.engine.as_ref().map(|e| e.statistics()).unwrap_or_default()
    }

    /// Computes the bounds of the problem when each item is forced in and out
    /// of the sack. With `best_lower` the best lower bound that was met, an
    /// item whose forced-in upper bound is below `best_lower` can only be
    /// out of the sack in an optimal solution (and conversely). The fixed
    /// items are then removed from the instance and the items that remain
    /// are examined again, until a pass fixes nothing.
    ///
    /// The cutoff is polled before each item is examined: the items which
    /// were not examined when it fires are simply left untouched. The
    /// reduction happens at most once, before the search starts: once the
    /// search has begun (or when the instance is infeasible) this method fixes
    /// nothing.
    pub fn reduce(&mut self, cutoff: &dyn Cutoff) -> &FxHashMap<ItemId, bool> {
        match self.engine.as_ref() {
            Some(engine) if !self.reduced && engine.is_ready() && engine.best_value().is_some() => (),
            _ => return &self.fixed,
        }
        self.reduced = true;

        // profit of the best solution met so far, in the original instance
        let mut best_lower = self.best_value().unwrap_or(0);
        let mut pass = 0;
        loop {
            let originals = self.unfixed_items();
            let additional_profit = self.additional_profit;
            let engine = match self.engine.as_mut() {
                Some(engine) => engine,
                None => break,
            };
            pass += 1;

            let mut interrupted = false;
            let mut upper_when_in = vec![i64::MAX; originals.len()];
            let mut upper_when_out = vec![i64::MAX; originals.len()];
            for r in 0..originals.len() {
                if cutoff.must_stop() {
                    debug!(pass, examined = r, "reduction interrupted");
                    interrupted = true;
                    break;
                }
                let (lower, upper) = engine.bounds_if_fixed(ItemId(r), false);
                upper_when_out[r] = upper.saturating_add(additional_profit);
                best_lower = best_lower.max(lower.saturating_add(additional_profit));

                let (lower, upper) = engine.bounds_if_fixed(ItemId(r), true);
                upper_when_in[r] = upper.saturating_add(additional_profit);
                best_lower = best_lower.max(lower.saturating_add(additional_profit));
            }

            let newly_fixed: Vec<(ItemId, bool)> = (0..originals.len())
                .filter_map(|r| {
                    let item = ItemId(originals[r]);
                    if upper_when_in[r] < best_lower {
                        Some((item, false))
                    } else if upper_when_out[r] < best_lower {
                        Some((item, true))
                    } else {
                        None
                    }
                })
                .collect();
            debug!(pass, fixed = newly_fixed.len(), items = originals.len(), best_lower, "reduction");
            if newly_fixed.is_empty() {
                break;
            }
            self.fixed.extend(newly_fixed);
            self.shrink();
            if interrupted {
                break;
            }
        }
        &self.fixed
    }

    /// The original ids of the items which are not fixed, in the order of
    /// their ids in the reduced instance
    fn unfixed_items(&self) -> Vec<usize> {
        (0..self.profits.len())
            .filter(|i| self.to_reduced[*i].is_some())
            .collect()
    }

    /// Replaces the engine with one that only works on the items which are
    /// not fixed. The dimensions which cannot bind anymore are eliminated.
    fn shrink(&mut self) {
        // the incumbent of the engine, in terms of the original items
        let incumbent = self.engine.as_ref().and_then(|engine| {
            let value = engine.best_value()?;
            let solution = engine.best_solution()?;
            Some((value.saturating_add(self.additional_profit), self.lift_solution(solution)))
        });

        let nb_items = self.profits.len();
        let mut originals = vec![];
        self.to_reduced = vec![None; nb_items];
        for i in 0..nb_items {
            if !self.fixed.contains_key(&ItemId(i)) {
                self.to_reduced[i] = Some(ItemId(originals.len()));
                originals.push(i);
            }
        }
        let taken: Vec<usize> = (0..nb_items)
            .filter(|i| self.fixed.get(&ItemId(*i)) == Some(&true))
            .collect();
        self.additional_profit = saturating_sum(taken.iter().map(|i| self.profits[*i]));

        let profits: Vec<i64> = originals.iter().map(|i| self.profits[*i]).collect();
        let weights: Vec<Vec<i64>> = self.weights.iter()
            .map(|row| originals.iter().map(|i| row[*i]).collect())
            .collect();
        let capacities: Vec<i64> = self.weights.iter().zip(self.capacities.iter())
            .map(|(row, capa)| capa.saturating_sub(saturating_sum(taken.iter().map(|i| row[*i]))))
            .collect();

        let kept = binding_dimensions(&weights, &capacities);
        self.master = kept.iter().position(|d| *d == self.master).unwrap_or(0);
        self.weights = kept.iter().map(|d| self.weights[*d].clone()).collect();
        self.capacities = kept.iter().map(|d| self.capacities[*d]).collect();
        if kept.is_empty() {
            debug!(items = originals.len(), "no dimension binds the remaining items");
            self.engine = None;
            return;
        }

        let weights: Vec<Vec<i64>> = kept.iter().map(|d| weights[*d].clone()).collect();
        let capacities: Vec<i64> = kept.iter().map(|d| capacities[*d]).collect();
        let mut engine = BranchAndBound::unchecked(&profits, &weights, &capacities, self.master)
            .with_node_limit(self.config.node_limit);
        // an incumbent only carries over when it agrees with the fixed items
        if let Some((value, solution)) = incumbent {
            if self.agrees_with_fixed(&solution) {
                let projected: Vec<bool> = originals.iter().map(|i| solution[*i]).collect();
                engine.set_primal(value - self.additional_profit, &projected);
            }
        }
        self.engine = Some(engine);
    }

    /// Maps a solution of the engine onto the original items
    fn lift_solution(&self, solution: &[bool]) -> Vec<bool> {
        self.to_reduced.iter().enumerate()
            .map(|(i, reduced)| match reduced {
                Some(r) => solution[r.id()],
                None => self.fixed.get(&ItemId(i)).copied().unwrap_or(false),
            })
            .collect()
    }
    fn agrees_with_fixed(&self, solution: &[bool]) -> bool {
        self.fixed.iter().all(|(item, value)| solution[item.id()] == *value)
    }
    /// Maps the completion of the engine onto the original instance
    fn lift(&self, completion: Completion) -> Completion {
        Completion {
            best_value: completion.best_value.map(|v| v.saturating_add(self.additional_profit)),
            ..completion
        }
    }

    /// The profit of taking every item that is not fixed out of the sack.
    /// It is the optimum when no dimension binds.
    fn profit_without_search(&self) -> i64 {
        saturating_sum((0..self.profits.len())
            .filter(|i| self.fixed.get(&ItemId(*i)) != Some(&false))
            .map(|i| self.profits[i]))
    }
    fn solve_without_search(&mut self) -> Completion {
        let status = if self.solved_without_search {
            Status::Abort
        } else {
            self.solved_without_search = true;
            info!(best = self.profit_without_search(), fixed = self.fixed.len(), "no dimension binds");
            Status::OptimalSolutionFound
        };
        Completion { status, is_exact: status != Status::Abort, best_value: self.best_value() }
    }
}

impl Solver for KnapsackSolver {
    fn maximize(&mut self, cutoff: &dyn Cutoff) -> Completion {
        if self.config.use_reduction {
            self.reduce(cutoff);
        }
        let completion = match self.engine.as_mut() {
            Some(engine) => engine.maximize(cutoff),
            None => return self.solve_without_search(),
        };
        let completion = self.lift(completion);
        let stats = self.statistics();
        info!(status = ?completion.status, best = ?completion.best_value, fixed = self.fixed.len(),
            explored = stats.explored, created = stats.created, "knapsack solved");
        completion
    }

    fn best_value(&self) -> Option<i64> {
        match self.engine.as_ref() {
            None => Some(self.profit_without_search()),
            Some(engine) => engine.best_value().map(|v| v.saturating_add(self.additional_profit)),
        }
    }
    fn best_upper_bound(&self) -> i64 {
        match self.engine.as_ref() {
            None => self.profit_without_search(),
            Some(engine) => engine.best_upper_bound().saturating_add(self.additional_profit),
        }
    }
    fn contains(&self, item: ItemId) -> bool {
        if let Some(value) = self.fixed.get(&item) {
            return *value;
        }
        match self.engine.as_ref() {
            None => true,
            Some(engine) => self.to_reduced[item.id()].map_or(false, |r| engine.contains(r)),
        }
    }
    fn is_optimal(&self) -> bool {
        match self.engine.as_ref() {
            None => true,
            Some(engine) => engine.is_optimal(),
        }
    }
    fn set_primal(&mut self, value: i64, solution: &[bool]) {
        if !self.agrees_with_fixed(solution) {
            return;
        }
        let projected: Vec<bool> = self.to_reduced.iter().zip(solution.iter())
            .filter(|(r, _)| r.is_some())
            .map(|(_, taken)| *taken)
            .collect();
        let additional_profit = self.additional_profit;
        if let Some(engine) = self.engine.as_mut() {
            engine.set_primal(value - additional_profit, &projected);
        }
    }
}

/// Returns the dimensions that may constrain the problem. A dimension whose
/// total weight fits in its capacity can never be violated.
fn binding_dimensions(weights: &[Vec<i64>], capacities: &[i64]) -> Vec<usize> {
    weights.iter().zip(capacities.iter())
        .enumerate()
        .filter(|(_, (row, capa))| row.iter().map(|w| *w as i128).sum::<i128>() > **capa as i128)
        .map(|(d, _)| d)
        .collect()
}

fn saturating_sum(values: impl Iterator<Item = i64>) -> i64 {
    values.fold(0, i64::saturating_add)
}
