use std::{borrow::Cow, time::Duration};

use crate::test::TestResult;

#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct TestOutcome {
    pub status: TestStatus,
    pub duration: Duration,
}

impl TestOutcome {
    pub fn is_good(&self) -> bool {
        self.status.is_good()
    }

    pub fn is_bad(&self) -> bool {
        self.status.is_bad()
    }

    pub fn passed(&self) -> bool {
        self.status.passed()
    }

    pub fn ignored(&self) -> bool {
        self.status.ignored()
    }

    pub fn expected_failure(&self) -> bool {
        self.status.expected_failure()
    }

    pub fn failed(&self) -> bool {
        self.status.failed()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TestStatus {
    Passed,
    Ignored { reason: Option<Cow<'static, str>> },

    /// The test was not run because an earlier member of its incremental
    /// chain failed.
    ExpectedFailure { reason: String },

    Failed(TestFailure),
}

impl TestStatus {
    pub fn is_good(&self) -> bool {
        !self.is_bad()
    }

    pub fn is_bad(&self) -> bool {
        matches!(self, TestStatus::Failed(_))
    }

    pub fn passed(&self) -> bool {
        matches!(self, TestStatus::Passed)
    }

    pub fn ignored(&self) -> bool {
        matches!(self, TestStatus::Ignored { .. })
    }

    pub fn expected_failure(&self) -> bool {
        matches!(self, TestStatus::ExpectedFailure { .. })
    }

    pub fn failed(&self) -> bool {
        matches!(self, TestStatus::Failed(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TestFailure {
    Error(String),
    Panicked(String),
}

impl From<TestResult> for TestStatus {
    fn from(value: TestResult) -> Self {
        match value.0 {
            Ok(_) => TestStatus::Passed,
            Err(err) => TestStatus::Failed(TestFailure::Error(err)),
        }
    }
}
