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

//! This module provides the configuration of the solvers.

use derive_builder::Builder;

/// This is how you configure a solver, e.g. if you want it to skip the
/// reduction of the problem, or to branch on the items suggested by another
/// dimension than the first one.
///
/// # Example
/// ```
/// # use knapsack_bnb::*;
/// let config = SolverConfigBuilder::default()
///     .use_reduction(false)
///     .node_limit(1000)
///     .build()
///     .unwrap();
/// assert!(!config.use_reduction);
/// assert_eq!(0, config.master_propagator);
/// assert_eq!(Some(1000), config.node_limit);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Builder)]
pub struct SolverConfig {
    /// This flag must be true (default) if you want the items whose value can
    /// be decided from their bounds alone to be fixed before the search.
    #[builder(default="true")]
    pub use_reduction: bool,
    /// The dimension whose propagator decides what item to branch on
    /// (default: the first one).
    #[builder(default="0")]
    pub master_propagator: usize,
    /// The maximum number of nodes a call to `maximize` may expand before it
    /// returns. Unlimited by default.
    #[builder(default, setter(strip_option))]
    pub node_limit: Option<usize>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            use_reduction: true,
            master_propagator: 0,
            node_limit: None,
        }
    }
}
