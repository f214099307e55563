//! Name filtering.
//!
//! A filter decides which tests from the input slice take part in the run at
//! all. Tests that do not match are removed before any study classification
//! happens, so a filtered out prerequisite is simply not part of its group.
//!
//! This is different to the study selection: tests of an unselected study
//! group still show up in the run as ignored, filtered out tests do not.
//!
//! Implement [`TestFilter`] to define a filter strategy.

use crate::test::Test;

mod no;
pub use no::*;

mod default;
pub use default::*;

/// The result of applying a [`TestFilter`].
#[derive(Debug)]
pub struct FilteredTests<'t, Extra> {
    /// The tests that are included in the run, in discovery order.
    pub tests: Vec<&'t Test<Extra>>,

    /// The number of tests that were filtered out.
    pub filtered_out: usize,
}

/// A strategy for selecting which tests are included in a test run.
pub trait TestFilter<Extra> {
    /// Filter the given slice of tests.
    ///
    /// The returned tests must be references into `tests` and keep their
    /// relative order.
    fn filter<'t>(&self, tests: &'t [Test<Extra>]) -> FilteredTests<'t, Extra>;
}
