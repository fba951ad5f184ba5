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

//! This module defines the errors that are reported when a solver is handed
//! an instance (or a configuration) that does not respect its contract.

use crate::SolverConfigBuilderError;

/// The errors one may get when creating a solver. There can be shape errors
/// (e.g. one row of weights is shorter than the list of profits), sign errors
/// (negative profit or weight) or configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// One row of the weight matrix does not have one weight per item
    #[error("weight row {dimension} has {actual} entries but there are {expected} items")]
    WeightRowLength { dimension: usize, expected: usize, actual: usize },
    /// There must be exactly one capacity per row of weights
    #[error("there are {weights} weight rows but {capacities} capacities")]
    CapacityCount { weights: usize, capacities: usize },
    /// Profits must be non-negative
    #[error("item {item} has a negative profit ({profit})")]
    NegativeProfit { item: usize, profit: i64 },
    /// Weights must be non-negative
    #[error("item {item} has a negative weight ({weight}) in dimension {dimension}")]
    NegativeWeight { dimension: usize, item: usize, weight: i64 },
    /// The master propagator must designate an actual dimension
    #[error("master propagator {master} does not exist ({dimensions} dimensions)")]
    MasterPropagator { master: usize, dimensions: usize },
    /// The solver configuration could not be built
    #[error("invalid configuration {0}")]
    Config(#[from] SolverConfigBuilderError),
}

/// The result of an operation that may fail because of a contract violation.
pub type Result<T> = std::result::Result<T, Error>;

/// Checks that the given instance has a consistent shape and that it only
/// comprises non-negative profits and weights.
pub fn check_instance(profits: &[i64], weights: &[Vec<i64>], capacities: &[i64]) -> Result<()> {
    if weights.len() != capacities.len() {
        return Err(Error::CapacityCount { weights: weights.len(), capacities: capacities.len() });
    }
    if let Some((item, profit)) = profits.iter().copied().enumerate().find(|(_, p)| *p < 0) {
        return Err(Error::NegativeProfit { item, profit });
    }
    for (dimension, row) in weights.iter().enumerate() {
        if row.len() != profits.len() {
            return Err(Error::WeightRowLength { dimension, expected: profits.len(), actual: row.len() });
        }
        if let Some((item, weight)) = row.iter().copied().enumerate().find(|(_, w)| *w < 0) {
            return Err(Error::NegativeWeight { dimension, item, weight });
        }
    }
    Ok(())
}

#[cfg(test)]
mod test_error {
    use crate::*;

    #[test]
    fn a_well_formed_instance_is_accepted() {
        assert!(check_instance(&[1, 2], &[vec![3, 4], vec![0, 1]], &[5, 6]).is_ok());
    }
    #[test]
    fn an_instance_without_dimension_is_accepted() {
        assert!(check_instance(&[1, 2], &[], &[]).is_ok());
    }
    #[test]
    fn there_must_be_one_capacity_per_weight_row() {
        let err = check_instance(&[1, 2], &[vec![3, 4]], &[5, 6]).unwrap_err();
        assert!(matches!(err, Error::CapacityCount { weights: 1, capacities: 2 }));
    }
    #[test]
    fn each_weight_row_must_cover_all_items() {
        let err = check_instance(&[1, 2], &[vec![3, 4], vec![3]], &[5, 6]).unwrap_err();
        assert!(matches!(err, Error::WeightRowLength { dimension: 1, expected: 2, actual: 1 }));
    }
    #[test]
    fn negative_profits_are_rejected() {
        let err = check_instance(&[1, -2], &[vec![3, 4]], &[5]).unwrap_err();
        assert!(matches!(err, Error::NegativeProfit { item: 1, profit: -2 }));
    }
    #[test]
    fn negative_weights_are_rejected() {
        let err = check_instance(&[1, 2], &[vec![-3, 4]], &[5]).unwrap_err();
        assert!(matches!(err, Error::NegativeWeight { dimension: 0, item: 0, weight: -3 }));
    }
    #[test]
    fn errors_have_a_readable_message() {
        let err = check_instance(&[1, 2], &[vec![3, 4]], &[5, 6]).unwrap_err();
        assert_eq!("there are 1 weight rows but 2 capacities", err.to_string());
    }
}
