use crate::marker::DesignationError;

/// Errors that stop a run before any test executes.
///
/// Failing tests are not errors, they are reported as outcomes.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid study markers on `{test}`")]
    Designation {
        test: String,
        #[source]
        source: DesignationError,
    },

    #[error("invalid --runstudy expression `{expr}`")]
    InvalidSelection {
        expr: String,
        #[source]
        source: regex::Error,
    },

    #[error(transparent)]
    Args(#[from] clap::Error),
}
