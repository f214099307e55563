//! Output formatting.
//!
//! The harness never writes output itself. Every event of a run or a listing
//! is handed to a [`TestFormatter`] as a small data object (`Fmt*`), and the
//! formatter decides what to do with it. All methods have a default that does
//! nothing, so a formatter only implements the events it cares about.
//!
//! Formatter errors never abort a run. They are collected and returned with
//! the report, tagged with the name of the method that failed.

use std::time::Duration;

use crate::{outcome::TestOutcome, test::TestMeta};

pub mod color;
pub mod no;
pub mod pretty;

/// The name of the formatter method that produced an error.
pub type FormatError = &'static str;

/// One line of the execution order.
///
/// Emitted for every planned test when the order display is enabled, and
/// for every test when listing.
#[derive(Debug)]
pub struct FmtOrder<'p, 't, Extra> {
    /// Position in the execution order.
    pub index: usize,

    /// Width of the longest group name, for alignment.
    pub width: usize,

    /// The study group of the test, `None` for ungrouped tests.
    pub group: Option<&'p str>,

    pub meta: &'t TestMeta<Extra>,

    /// Whether the test runs, `false` for tests of unselected groups.
    pub selected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FmtListEnd {
    pub selected: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FmtRunStart {
    pub active: usize,
    pub filtered_out: usize,
}

#[derive(Debug)]
pub struct FmtTestOutcome<'t, Extra> {
    pub meta: &'t TestMeta<Extra>,
    pub outcome: TestOutcome,
}

#[derive(Debug)]
pub struct FmtRunOutcomes<'o, 't> {
    pub outcomes: &'o [(&'t str, TestOutcome)],
    pub filtered_out: usize,
    pub duration: Duration,
}

/// Receives the events of a run or a listing.
pub trait TestFormatter<'t, Extra: 't> {
    type Error;

    fn fmt_order(&mut self, data: FmtOrder<'_, 't, Extra>) -> Result<(), Self::Error> {
        let _ = data;
        Ok(())
    }

    fn fmt_list_end(&mut self, data: FmtListEnd) -> Result<(), Self::Error> {
        let _ = data;
        Ok(())
    }

    fn fmt_run_start(&mut self, data: FmtRunStart) -> Result<(), Self::Error> {
        let _ = data;
        Ok(())
    }

    fn fmt_test_outcome(&mut self, data: FmtTestOutcome<'t, Extra>) -> Result<(), Self::Error> {
        let _ = data;
        Ok(())
    }

    fn fmt_run_outcomes(&mut self, data: FmtRunOutcomes<'_, 't>) -> Result<(), Self::Error> {
        let _ = data;
        Ok(())
    }
}

pub(crate) trait FmtErrors<E> {
    fn push_on_error(&mut self, named: (FormatError, Result<(), E>));
}

impl<E> FmtErrors<E> for Vec<(FormatError, E)> {
    fn push_on_error(&mut self, (name, result): (FormatError, Result<(), E>)) {
        if let Err(err) = result {
            self.push((name, err));
        }
    }
}

macro_rules! named_fmt {
    ($formatter:ident.$method:ident($data:expr)) => {
        (stringify!($method), $formatter.$method($data))
    };
}

pub(crate) use named_fmt;
