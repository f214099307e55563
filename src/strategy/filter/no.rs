use crate::{
    filter::{FilteredTests, TestFilter},
    test::Test,
};

/// A [`TestFilter`] that does not filter out any tests.
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct NoFilter;

impl<Extra> TestFilter<Extra> for NoFilter {
    fn filter<'t>(&self, tests: &'t [Test<Extra>]) -> FilteredTests<'t, Extra> {
        FilteredTests {
            tests: tests.iter().collect(),
            filtered_out: 0,
        }
    }
}
