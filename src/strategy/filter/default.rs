use crate::{
    config::StudyConfig,
    filter::{FilteredTests, TestFilter},
    test::Test,
};

/// Filters by the qualified test name, like the built in Rust test harness.
///
/// Without filters every test is kept. With filters a test is kept if its
/// qualified name contains one of them (or equals one of them in exact
/// mode), and does not match any skip pattern.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DefaultFilter {
    exact: bool,
    filter: Vec<String>,
    skip: Vec<String>,
}

impl DefaultFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_exact(self, exact: bool) -> Self {
        Self { exact, ..self }
    }

    pub fn with_filter(self, filter: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            filter: filter.into_iter().map(Into::into).collect(),
            ..self
        }
    }

    pub fn with_skip(self, skip: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            skip: skip.into_iter().map(Into::into).collect(),
            ..self
        }
    }

    fn matches(&self, pattern: &str, name: &str) -> bool {
        match self.exact {
            true => name == pattern,
            false => name.contains(pattern),
        }
    }
}

impl From<&StudyConfig> for DefaultFilter {
    fn from(config: &StudyConfig) -> Self {
        DefaultFilter::new()
            .with_exact(config.exact)
            .with_filter(config.filters.iter().cloned())
            .with_skip(config.skip.iter().cloned())
    }
}

impl<Extra> TestFilter<Extra> for DefaultFilter {
    fn filter<'t>(&self, tests: &'t [Test<Extra>]) -> FilteredTests<'t, Extra> {
        let mut remaining = Vec::with_capacity(tests.len());
        let mut filtered_out = 0;
        for test in tests {
            let name = test.qualified_name();
            let in_filter = self.filter.is_empty()
                || self.filter.iter().any(|filter| self.matches(filter, &name));
            let skipped = self.skip.iter().any(|skip| self.matches(skip, &name));

            match in_filter && !skipped {
                true => remaining.push(test),
                false => filtered_out += 1,
            }
        }

        FilteredTests {
            tests: remaining,
            filtered_out,
        }
    }
}
