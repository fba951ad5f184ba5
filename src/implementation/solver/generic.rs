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

//! This module provides the implementation of the incremental branch-and-bound
//! engine. It solves the multi-dimensional knapsack problem using one
//! propagator per dimension (aka per capacity constraint).
//!
//! The engine owns one single partial assignment (the `State`). Rather than
//! storing a copy of the state in each node of the search tree, it moves the
//! state from the node it last visited to the next node it explores by
//! reverting and applying the decisions along the path that connects both
//! nodes in the tree. All propagators are notified of each of these updates,
//! which lets them maintain their bounds incrementally.

use tracing::{debug, trace};

use crate::{Assignment, Completion, Cutoff, DimensionPropagator, Error, Fringe, ItemId,
    NodeId, OpenNode, Propagator, Result, SearchPath, SearchTree, Solver, State, Statistics,
    Status};

/// Where the engine stands in its life cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// The engine has been initialized but the root was not processed yet
    Ready,
    /// The search has started and can be resumed
    Searching,
    /// The search is over: it ended with the given status
    Done(Status),
}

/// The branch-and-bound engine.
///
/// # Example
/// ```
/// # use knapsack_bnb::*;
/// let profits = [3, 4, 5, 6];
/// let weights = [vec![2, 3, 4, 5]];
/// let mut engine = BranchAndBound::new(&profits, &weights, &[5], 0).unwrap();
/// let outcome = engine.maximize(&NoCutoff);
///
/// assert_eq!(Status::OptimalSolutionFound, outcome.status);
/// assert_eq!(Some(7), outcome.best_value);
/// assert!(engine.contains(ItemId(0)));
/// assert!(engine.contains(ItemId(1)));
/// ```
#[derive(Debug, Clone)]
pub struct BranchAndBound {
    /// The partial assignment of the node that was visited last
    state: State,
    /// One propagator per dimension of the problem
    propagators: Vec<DimensionPropagator>,
    /// The index of the propagator deciding what item to branch on
    master: usize,
    /// Number of nodes a call to maximize is allowed to expand
    node_limit: Option<usize>,

    /// All the nodes created so far
    tree: SearchTree,
    /// The nodes that remain to be explored, best upper bound first
    fringe: Fringe,
    /// The node whose decisions are currently applied to the state
    current: NodeId,
    phase: Phase,

    /// The best solution found so far. It is only meaningful when
    /// `has_solution` is true.
    best_solution: Vec<bool>,
    /// Profit of the best solution found so far. It never decreases.
    best_solution_profit: i64,
    has_solution: bool,
    /// The tightest upper bound known so far
    best_upper_bound: i64,

    stats: Statistics,
}

impl BranchAndBound {
    /// Creates an engine for the given instance. There must be one row of
    /// `weights` per capacity and `master` must designate one of them.
    pub fn new(profits: &[i64], weights: &[Vec<i64>], capacities: &[i64], master: usize) -> Result<Self> {
        crate::check_instance(profits, weights, capacities)?;
        if master >= capacities.len() {
            return Err(Error::MasterPropagator { master, dimensions: capacities.len() });
        }
        Ok(Self::unchecked(profits, weights, capacities, master))
    }
    /// Creates an engine without validating the instance. This is meant to
    /// derive an engine from an instance which was validated beforehand.
    pub(crate) fn unchecked(profits: &[i64], weights: &[Vec<i64>], capacities: &[i64], master: usize) -> Self {
        let mut engine = BranchAndBound {
            state: State::new(0),
            propagators: vec![],
            master,
            node_limit: None,
            tree: SearchTree::new(),
            fringe: Fringe::new(),
            current: NodeId(0),
            phase: Phase::Ready,
            best_solution: vec![],
            best_solution_profit: 0,
            has_solution: false,
            best_upper_bound: i64::MAX,
            stats: Statistics::default(),
        };
        engine.init(profits, weights, capacities);
        engine
    }
    /// Limits the number of nodes that each call to `maximize` may expand
    pub fn with_node_limit(mut self, node_limit: Option<usize>) -> Self {
        self.node_limit = node_limit;
        self
    }

    /// (Re-)initializes the engine for the given instance. Everything that
    /// was learned about the previous instance is forgotten, the search tree
    /// included.
    pub fn init(&mut self, profits: &[i64], weights: &[Vec<i64>], capacities: &[i64]) {
        let nb_items = profits.len();
        self.state = State::new(nb_items);
        self.propagators = weights.iter().zip(capacities.iter())
            .map(|(row, capa)| {
                let mut propagator = DimensionPropagator::capacity(*capa);
                propagator.init(profits, row);
                propagator
            })
            .collect();

        self.tree.clear();
        self.fringe.clear();
        self.current = NodeId(0);
        self.phase = Phase::Ready;

        // leaving all items out is a solution unless some capacity is negative
        self.best_solution = vec![false; nb_items];
        self.best_solution_profit = 0;
        self.has_solution = capacities.iter().all(|c| *c >= 0);
        self.best_upper_bound = i64::MAX;
        self.stats = Statistics::default();
    }

    pub fn nb_items(&self) -> usize {
        self.state.nb_items()
    }
    pub fn nb_dimensions(&self) -> usize {
        self.propagators.len()
    }
    /// The counters describing the work that was carried out so far
    pub fn statistics(&self) -> Statistics {
        self.stats
    }
    /// The best solution found so far, indexed by item id
    pub fn best_solution(&self) -> Option<&[bool]> {
        if self.has_solution {
            Some(&self.best_solution)
        } else {
            None
        }
    }

    /// Returns the lower and upper bounds on the profit of the problem when
    /// the given item is forced in (`is_in == true`) or out of the sack. The
    /// item is bound temporarily: the engine is left in the state it was
    /// before the call. When forcing the item makes the problem infeasible,
    /// both bounds are zero.
    ///
    /// # Note:
    /// The item must not be bound by the node that was visited last.
    pub fn bounds_if_fixed(&mut self, item: ItemId, is_in: bool) -> (i64, i64) {
        let assignment = Assignment::new(item, is_in);
        let feasible = update_all(&mut self.state, &mut self.propagators, false, assignment);
        let bounds = if feasible {
            self.compute_profit_bounds();
            (self.aggregated_lower_bound(), self.aggregated_upper_bound())
        } else {
            (0, 0)
        };
        update_all(&mut self.state, &mut self.propagators, true, assignment);
        bounds
    }

    /// Returns true iff the search has not started yet. The state is then the
    /// one of the root node.
    pub(crate) fn is_ready(&self) -> bool {
        self.phase == Phase::Ready
    }

    fn is_single_propagator(&self) -> bool {
        self.propagators.len() == 1
    }
    fn master(&self) -> &DimensionPropagator {
        &self.propagators[self.master]
    }
    fn compute_profit_bounds(&mut self) {
        for propagator in self.propagators.iter_mut() {
            propagator.compute_profit_bounds();
        }
    }
    /// The profit of an actual solution which is compatible with the current
    /// state. In single propagator mode, it is the greedy completion of the
    /// dimension. Otherwise, the unbound items are simply left out.
    fn aggregated_lower_bound(&self) -> i64 {
        if self.is_single_propagator() {
            self.master().profit_lower_bound()
        } else {
            self.master().current_profit()
        }
    }
    /// Each dimension bounds the profit of the whole problem: the tightest
    /// bound is the one of the most constraining dimension.
    fn aggregated_upper_bound(&self) -> i64 {
        self.propagators.iter()
            .map(|p| p.profit_upper_bound())
            .min()
            .unwrap_or(i64::MAX)
    }
    /// Replaces the best solution with the solution compatible with the
    /// current state if it is better. It returns true iff the best solution
    /// was improved.
    fn update_best_solution(&mut self) -> bool {
        let lower_bound = self.aggregated_lower_bound();
        if self.has_solution && lower_bound <= self.best_solution_profit {
            return false;
        }
        let single = self.is_single_propagator();
        let master = &self.propagators[self.master];
        master.copy_state_to_solution(single, &mut self.best_solution);
        self.best_solution_profit = lower_bound;
        self.has_solution = true;
        trace!(profit = lower_bound, "improved solution");
        true
    }

    /// Processes the root of the search tree. It returns the completion of
    /// the search when the root suffices to solve the problem.
    fn process_root(&mut self) -> Option<Completion> {
        if self.propagators.iter().any(|p| !p.is_feasible()) {
            debug!("the root is infeasible");
            self.has_solution = false;
            return Some(self.finish(Status::Infeasible));
        }
        self.compute_profit_bounds();
        self.update_best_solution();

        let upper_bound = self.aggregated_upper_bound();
        let next_item = self.master().next_branch_item();
        let current_profit = self.master().current_profit();
        let root = self.tree.add_root(current_profit, upper_bound, next_item);
        self.stats.created += 1;
        self.current = root;
        self.best_upper_bound = upper_bound;

        if next_item.is_none() || upper_bound <= self.best_solution_profit {
            debug!(best = self.best_solution_profit, "the root is terminal");
            return Some(self.finish(Status::OptimalSolutionFound));
        }
        self.fringe.push(OpenNode { node: root, upper_bound });
        self.phase = Phase::Searching;
        None
    }

    /// Moves the state to the given node and creates its children
    fn expand(&mut self, node: NodeId) {
        self.stats.explored += 1;
        let path = SearchPath::new(&self.tree, self.current, node);
        let (tree, state, propagators) = (&self.tree, &mut self.state, &mut self.propagators);
        let feasible = path.replay(tree, |revert, assignment| update_all(state, propagators, revert, assignment));
        self.current = node;
        if !feasible {
            trace!(node = node.0, "infeasible node abandoned");
            return;
        }

        self.compute_profit_bounds();
        self.update_best_solution();
        if self.tree.node(node).next_item.is_none() {
            return;
        }
        trace!(node = node.0, depth = self.tree.node(node).depth, "expand");
        self.make_new_node(node, false);
        self.make_new_node(node, true);
    }

    /// Creates the child of `parent` which is reached by putting the branch
    /// item of `parent` in (or out of) the sack. The child is bounded right
    /// away and it is only pushed onto the fringe when it is feasible and its
    /// upper bound improves on the best solution.
    fn make_new_node(&mut self, parent: NodeId, is_in: bool) {
        let item = match self.tree.node(parent).next_item {
            Some(item) => item,
            None => unreachable!("branching on a node without branch item"),
        };
        let assignment = Assignment::new(item, is_in);

        let feasible = update_all(&mut self.state, &mut self.propagators, false, assignment);
        let bounded = if feasible {
            self.compute_profit_bounds();
            self.update_best_solution();
            let master = self.master();
            Some((master.current_profit(), self.aggregated_upper_bound(), master.next_branch_item()))
        } else {
            None
        };
        update_all(&mut self.state, &mut self.propagators, true, assignment);

        let (current_profit, upper_bound, next_item) = match bounded {
            Some(bounded) => bounded,
            None => {
                self.stats.infeasible += 1;
                return;
            }
        };
        if upper_bound <= self.best_solution_profit || next_item.is_none() {
            self.stats.pruned += 1;
            return;
        }
        let child = self.tree.add_child(parent, assignment);
        let node = self.tree.node_mut(child);
        node.current_profit = current_profit;
        node.profit_upper_bound = upper_bound;
        node.next_item = next_item;
        self.stats.created += 1;
        self.fringe.push(OpenNode { node: child, upper_bound });
    }

    /// Ends the search with the given status
    fn finish(&mut self, status: Status) -> Completion {
        self.fringe.clear();
        self.phase = Phase::Done(status);
        if status == Status::OptimalSolutionFound {
            self.best_upper_bound = self.best_solution_profit;
        }
        debug!(?status, best = self.best_solution_profit, explored = self.stats.explored,
            created = self.stats.created, "search complete");
        self.completion(status)
    }
    /// Interrupts the search, which may be resumed later on
    fn interrupt(&mut self, status: Status) -> Completion {
        if let Some(open) = self.fringe.peek() {
            self.best_upper_bound = open.upper_bound.max(self.best_solution_profit);
        }
        debug!(?status, best = self.best_solution_profit, bound = self.best_upper_bound,
            open = self.fringe.len(), "search interrupted");
        self.completion(status)
    }
    /// An interrupted search reports whether it improved the best solution
    /// since the beginning of the call.
    fn interrupted_status(&self, best_at_start: Option<i64>, otherwise: Status) -> Status {
        if self.best_value() > best_at_start {
            Status::ImprovedSolutionFound
        } else {
            otherwise
        }
    }
    fn completion(&self, status: Status) -> Completion {
        Completion {
            status,
            is_exact: matches!(status, Status::OptimalSolutionFound | Status::Infeasible),
            best_value: self.best_value(),
        }
    }
}

impl Solver for BranchAndBound {
    /// Explores the search tree until optimality is proven, the `cutoff`
    /// fires or the node budget of the call is exhausted. The cutoff is
    /// polled before each node is processed (the root included).
    fn maximize(&mut self, cutoff: &dyn Cutoff) -> Completion {
        if let Phase::Done(_) = self.phase {
            return self.completion(Status::Abort);
        }
        let best_at_start = self.best_value();
        if self.phase == Phase::Ready {
            if cutoff.must_stop() {
                return self.interrupt(Status::LimitReached);
            }
            if let Some(completion) = self.process_root() {
                return completion;
            }
        }

        let mut expanded = 0;
        loop {
            let upper_bound = match self.fringe.peek() {
                None => return self.finish(Status::OptimalSolutionFound),
                Some(open) => open.upper_bound,
            };
            if upper_bound <= self.best_solution_profit {
                return self.finish(Status::OptimalSolutionFound);
            }
            if cutoff.must_stop() {
                let status = self.interrupted_status(best_at_start, Status::LimitReached);
                return self.interrupt(status);
            }
            if self.node_limit.map_or(false, |limit| expanded >= limit) {
                let status = self.interrupted_status(best_at_start, Status::Continue);
                return self.interrupt(status);
            }
            if let Some(open) = self.fringe.pop() {
                self.expand(open.node);
                expanded += 1;
            }
        }
    }

    fn best_value(&self) -> Option<i64> {
        if self.has_solution {
            Some(self.best_solution_profit)
        } else {
            None
        }
    }
    fn best_upper_bound(&self) -> i64 {
        self.best_upper_bound
    }
    fn contains(&self, item: ItemId) -> bool {
        self.has_solution && self.best_solution[item.id()]
    }
    fn is_optimal(&self) -> bool {
        self.phase == Phase::Done(Status::OptimalSolutionFound)
    }
    fn set_primal(&mut self, value: i64, solution: &[bool]) {
        if !self.has_solution || value > self.best_solution_profit {
            self.best_solution.clear();
            self.best_solution.extend_from_slice(solution);
            self.best_solution_profit = value;
            self.has_solution = true;
        }
    }
}

/// Applies (or reverts) the given assignment to the state and notifies all
/// propagators. All propagators are notified even if one of them reports
/// an infeasibility. It returns true iff all of them remain feasible.
fn update_all(state: &mut State, propagators: &mut [DimensionPropagator], revert: bool, assignment: Assignment) -> bool {
    assert!(state.update(revert, assignment),
        "inconsistent {} of {:?}", if revert { "revert" } else { "apply" }, assignment);
    let mut feasible = true;
    for propagator in propagators.iter_mut() {
        feasible &= propagator.update(revert, assignment);
    }
    feasible
}
