//! Ignore status of tests.
//!
//! A test can come in already ignored from its declaration, and the study
//! selection ignores every grouped test whose group was not picked for the
//! run. Ignored tests stay part of the run: they are reported, but never
//! executed.

use std::borrow::Cow;

/// The reason attached to grouped tests whose group is not selected.
pub const NEEDS_RUNSTUDY: &str = "need --runstudy option to run";

#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub enum IgnoreStatus {
    #[default]
    Run,
    Ignore,
    IgnoreWithReason(Cow<'static, str>),
}

impl IgnoreStatus {
    pub fn is_ignored(&self) -> bool {
        !matches!(self, IgnoreStatus::Run)
    }

    pub fn reason(&self) -> Option<Cow<'static, str>> {
        match self {
            IgnoreStatus::IgnoreWithReason(reason) => Some(reason.clone()),
            IgnoreStatus::Run | IgnoreStatus::Ignore => None,
        }
    }
}

impl From<bool> for IgnoreStatus {
    fn from(value: bool) -> Self {
        match value {
            true => Self::Ignore,
            false => Self::Run,
        }
    }
}

impl From<&'static str> for IgnoreStatus {
    fn from(value: &'static str) -> Self {
        Self::IgnoreWithReason(value.into())
    }
}

impl From<String> for IgnoreStatus {
    fn from(value: String) -> Self {
        Self::IgnoreWithReason(value.into())
    }
}
