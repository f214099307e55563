use std::{
    process::{ExitCode, Termination},
    time::Duration,
};

use crate::{formatter::FormatError, outcome::TestOutcome};

pub type TestOutcomes<'t> = Vec<(&'t str, TestOutcome)>;

/// Everything that happened in a run, in execution order.
#[derive(Debug)]
#[non_exhaustive]
pub struct TestReport<'t, FmtError: 't> {
    pub outcomes: TestOutcomes<'t>,
    pub duration: Duration,
    pub filtered_out: usize,
    pub fmt_errors: Vec<(FormatError, FmtError)>,
}

impl<FmtError> TestReport<'_, FmtError> {
    /// A run succeeds unless a test failed.
    ///
    /// Ignored tests and expected failures from short circuited chains do
    /// not fail the run.
    pub fn success(&self) -> bool {
        self.outcomes.iter().all(|(_, outcome)| outcome.is_good())
    }

    pub fn exit_code(&self) -> ExitCode {
        match self.success() {
            true => ExitCode::SUCCESS,
            false => ExitCode::FAILURE,
        }
    }
}

impl<FmtError> Termination for TestReport<'_, FmtError> {
    fn report(self) -> ExitCode {
        self.exit_code()
    }
}
