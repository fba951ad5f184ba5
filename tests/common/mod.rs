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

//! Helpers shared by the integration tests: a couple of reference instances
//! and the logging setup. The random instance generator and the brute force
//! oracle are the ones of the unit tests.
#![allow(dead_code)]

#[path = "../../src/test_utils.rs"]
mod test_utils;
pub use test_utils::*;

/// Installs a subscriber printing the traces of the solver along with the
/// output of the test. It is fine to call it more than once.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .try_init();
}

/// A ten items instance whose optimum is 309 (items 0, 1, 2, 3 and 5)
pub fn p01() -> Instance {
    Instance {
        profits: vec![92, 57, 49, 68, 60, 43, 67, 84, 87, 72],
        weights: vec![vec![23, 31, 29, 44, 53, 38, 63, 85, 89, 82]],
        capacities: vec![165],
    }
}

/// A fifteen items instance whose optimum is 1458
pub fn p07() -> Instance {
    Instance {
        profits: vec![135, 139, 149, 150, 156, 163, 173, 184, 192, 201, 210, 214, 221, 229, 240],
        weights: vec![vec![70, 73, 77, 80, 82, 87, 90, 94, 98, 106, 110, 113, 115, 118, 120]],
        capacities: vec![750],
    }
}
