//! Panic handling.
//!
//! Tests fail by returning an error or by panicking. A panic handler runs the
//! test function and turns both into a [`TestStatus`], so the harness and the
//! failure chains only ever look at statuses.
//!
//! Implement [`TestPanicHandler`] to change how tests are executed.

use std::panic::UnwindSafe;

use crate::{
    outcome::TestStatus,
    test::{TestMeta, TestResult},
};

mod default;
pub use default::*;

/// A strategy for executing a test function and translating panics into a
/// [`TestStatus`].
pub trait TestPanicHandler<Extra> {
    /// Execute `f` and return the status of the test described by `meta`.
    fn handle<F: FnOnce() -> TestResult + UnwindSafe>(
        &self,
        f: F,
        meta: &TestMeta<Extra>,
    ) -> TestStatus;
}
