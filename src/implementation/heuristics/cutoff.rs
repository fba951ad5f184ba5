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

//! This module provides the implementation of the cutoff criteria that can be
//! used to bound the time spent by a solver.

use std::time::{Duration, Instant};

use crate::Cutoff;

/// _This is the default cutoff heuristic._ It imposes that the search goes
/// on until it proves optimality.
#[derive(Debug, Default, Copy, Clone)]
pub struct NoCutoff;
impl Cutoff for NoCutoff {
    fn must_stop(&self) -> bool {false}
}

/// This cutoff allows one to specify a maximum time budget to solve the problem.
/// Once the time budget is elapsed, the optimization stops and the best solution
/// that has been found (so far) is returned.
///
/// # Example
/// ```
/// # use knapsack_bnb::*;
/// use std::time::Duration;
///
/// let mut solver = KnapsackSolver::new(&[2, 3, 4], &[vec![3, 4, 5]], &[7]).unwrap();
/// let outcome = solver.maximize(&TimeBudget::new(Duration::from_secs(10)));
/// assert_eq!(Some(5), outcome.best_value);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TimeBudget {
    deadline: Instant,
}
impl TimeBudget {
    pub fn new(budget: Duration) -> Self {
        // a budget so large it overflows the clock is as good as no budget
        let now = Instant::now();
        let deadline = now.checked_add(budget)
            .unwrap_or_else(|| now + Duration::from_secs(60 * 60 * 24 * 365 * 100));
        TimeBudget { deadline }
    }
}
impl Cutoff for TimeBudget {
    fn must_stop(&self) -> bool {
        Instant::now() >= self.deadline
    }
    fn remaining(&self) -> Option<Duration> {
        Some(self.deadline.saturating_duration_since(Instant::now()))
    }
}

#[cfg(test)]
mod test_cutoff {
    use crate::*;
    use std::time::Duration;

    #[test]
    fn no_cutoff_never_stops() {
        assert!(!NoCutoff.must_stop());
        assert_eq!(None, NoCutoff.remaining());
    }
    #[test]
    fn an_empty_time_budget_stops_immediately() {
        let cutoff = TimeBudget::new(Duration::from_secs(0));
        assert!(cutoff.must_stop());
        assert_eq!(Some(Duration::from_secs(0)), cutoff.remaining());
    }
    #[test]
    fn a_large_time_budget_does_not_stop_right_away() {
        let cutoff = TimeBudget::new(Duration::from_secs(3600));
        assert!(!cutoff.must_stop());
        assert!(cutoff.remaining().unwrap() > Duration::from_secs(3500));
    }
    #[test]
    fn a_huge_time_budget_does_not_overflow() {
        let cutoff = TimeBudget::new(Duration::MAX);
        assert!(!cutoff.must_stop());
    }
}
