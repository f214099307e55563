//! Long running test studies.
//!
//! A study is a long running test that only makes sense once everything it
//! builds on works. Tests opt in with markers: a [`Marker::study`] marks the
//! study of a named group, [`Marker::pre`] marks a prerequisite of that
//! group.
//!
//! Before a run the harness
//! - keeps unmarked tests first, in discovery order
//! - sorts the prerequisites of every group by their `order`, the study last
//! - sorts the groups by the `order` of their study
//! - runs only the groups picked with `--runstudy`, all other grouped tests
//!   are reported as ignored
//!
//! While running, prerequisites and studies of one scope form a failure
//! chain. After the first failure, the rest of the chain is reported as an
//! expected failure and never executed.
//!
//! ```no_run
//! use kitest_study::{prelude::*, config::StudyConfig};
//!
//! fn tests() -> Vec<Test> {
//!     vec![
//!         Test::new(
//!             TestFnHandle::from_boxed(|| ()),
//!             TestMeta {
//!                 name: "gather_info".into(),
//!                 scope: "studies".into(),
//!                 markers: vec![Marker::pre().name("AI").order(5)].into(),
//!                 ..TestMeta::default()
//!             },
//!         ),
//!         Test::new(
//!             TestFnHandle::from_boxed(|| ()),
//!             TestMeta {
//!                 name: "study_ai".into(),
//!                 scope: "studies".into(),
//!                 markers: vec![Marker::study().name("AI")].into(),
//!                 ..TestMeta::default()
//!             },
//!         ),
//!     ]
//! }
//!
//! fn main() -> Result<(), kitest_study::Error> {
//!     let tests = tests();
//!     let config = StudyConfig::from_env()?;
//!     let report = kitest_study::harness(&tests).with_config(&config)?.run()?;
//!     std::process::exit(if report.success() { 0 } else { 1 });
//! }
//! ```
//!
//! [`Marker::study`]: marker::Marker::study
//! [`Marker::pre`]: marker::Marker::pre

pub mod config;
pub mod formatter;
pub mod marker;
pub mod outcome;
pub mod plan;

mod error;
pub use error::*;

mod strategy;
pub use strategy::*;

mod harness;
pub use harness::*;

mod report;
pub use report::*;

#[cfg(test)]
mod test_support;

pub mod prelude {
    pub use crate::{
        StudyHarness, TestReport,
        ignore::IgnoreStatus,
        marker::{Marker, MarkerArg, MarkerKind},
        outcome::{TestOutcome, TestStatus},
        select::SelectionMode,
        test::{Test, TestFnHandle, TestMeta},
    };
}
