//! Command line configuration.
//!
//! The harness understands a small set of flags on top of the usual name
//! filters:
//!
//! ```text
//! --runstudy [<EXPR>]   run study groups matching EXPR (`all` without a value)
//! --show-order          print the execution order before running
//! --exact               match filters exactly
//! --skip <PATTERN>      skip tests matching PATTERN
//! [FILTER]...           only run tests matching one of the filters
//! ```

use std::ffi::OsString;

use clap::Parser;

use crate::{Error, select::SelectionMode};

#[derive(Debug, Clone, Default, PartialEq, Eq, Parser)]
#[command(about = "Run tests, and studies once their prerequisites pass")]
pub struct StudyConfig {
    /// Run the study groups whose name matches EXPR (`all` for every group).
    #[arg(
        long,
        value_name = "EXPR",
        default_value = "",
        num_args = 0..=1,
        default_missing_value = "all"
    )]
    pub runstudy: String,

    /// Print the execution order before running.
    #[arg(long)]
    pub show_order: bool,

    /// Only run tests whose qualified name contains one of the filters.
    #[arg(value_name = "FILTER")]
    pub filters: Vec<String>,

    /// Match filters and skip patterns exactly.
    #[arg(long)]
    pub exact: bool,

    /// Skip tests whose qualified name contains PATTERN.
    #[arg(long, value_name = "PATTERN")]
    pub skip: Vec<String>,
}

impl StudyConfig {
    /// Parse the arguments of the current process.
    pub fn from_env() -> Result<Self, Error> {
        Self::try_from_args(std::env::args_os())
    }

    /// Parse the given arguments, the first one is the binary name.
    pub fn try_from_args<I, T>(args: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Ok(Self::try_parse_from(args)?)
    }

    /// Compile the `--runstudy` expression.
    pub fn selection(&self) -> Result<SelectionMode, Error> {
        SelectionMode::parse(&self.runstudy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> StudyConfig {
        StudyConfig::try_from_args(std::iter::once("studies").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_disable_studies() {
        let config = parse(&[]);
        assert_eq!(config, StudyConfig::default());
        assert!(matches!(config.selection().unwrap(), SelectionMode::None));
    }

    #[test]
    fn runstudy_without_value_means_all() {
        let config = parse(&["--runstudy"]);
        assert_eq!(config.runstudy, "all");
        assert!(matches!(config.selection().unwrap(), SelectionMode::All));
    }

    #[test]
    fn runstudy_takes_a_pattern() {
        let config = parse(&["--runstudy=ai", "--show-order", "foo"]);
        assert_eq!(config.runstudy, "ai");
        assert!(config.show_order);
        assert_eq!(config.filters, ["foo"]);
        assert!(matches!(config.selection().unwrap(), SelectionMode::Pattern(_)));
    }

    #[test]
    fn runstudy_takes_a_separate_value() {
        let config = parse(&["--runstudy", "AI"]);
        assert_eq!(config.runstudy, "AI");
        assert!(config.filters.is_empty());
        assert!(matches!(config.selection().unwrap(), SelectionMode::Pattern(_)));

        let config = parse(&["--runstudy", "--show-order"]);
        assert_eq!(config.runstudy, "all");
        assert!(config.show_order);
    }

    #[test]
    fn filters_and_skips() {
        let config = parse(&["--exact", "--skip", "slow", "studies:test_foo"]);
        assert!(config.exact);
        assert_eq!(config.skip, ["slow"]);
        assert_eq!(config.filters, ["studies:test_foo"]);
    }

    #[test]
    fn unknown_flags_are_errors() {
        let result = StudyConfig::try_from_args(["studies", "--no-such-flag"]);
        assert!(matches!(result, Err(Error::Args(_))));
    }
}
