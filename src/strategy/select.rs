//! Study selection.
//!
//! Studies are long running, so no group runs unless it is asked for. The
//! [`SelectionMode`] is decided once from the `--runstudy` expression and
//! then splits the sequenced groups into the ones that run and the ones that
//! are skipped. Prerequisites always share the fate of their study.

use std::str::FromStr;

use regex::{Regex, RegexBuilder};
use tracing::info;

use crate::{
    Error,
    group::{Sequence, SequencedGroup},
    test::Test,
};

/// Which study groups run.
#[derive(Debug, Clone, Default)]
pub enum SelectionMode {
    /// No group runs.
    #[default]
    None,

    /// Every group runs.
    All,

    /// Groups whose name matches the pattern anywhere run.
    Pattern(Regex),
}

impl SelectionMode {
    /// Decide the mode from a `--runstudy` expression.
    ///
    /// The empty expression selects nothing, `all` selects everything. Any
    /// other expression is compiled as a case insensitive regex where `.`
    /// also matches newlines.
    pub fn parse(expr: &str) -> Result<Self, Error> {
        match expr {
            "" => Ok(Self::None),
            "all" => Ok(Self::All),
            expr => RegexBuilder::new(expr)
                .case_insensitive(true)
                .dot_matches_new_line(true)
                .build()
                .map(Self::Pattern)
                .map_err(|source| Error::InvalidSelection {
                    expr: expr.to_string(),
                    source,
                }),
        }
    }

    pub fn matches(&self, group: &str) -> bool {
        match self {
            SelectionMode::None => false,
            SelectionMode::All => true,
            SelectionMode::Pattern(regex) => regex.is_match(group),
        }
    }
}

impl FromStr for SelectionMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// The result of [`select`].
#[derive(Debug)]
pub struct Selection<'t, Extra> {
    /// Every test in discovery order, with the name of the group it joined.
    pub discovered: Vec<(&'t Test<Extra>, Option<String>)>,

    /// Ungrouped tests always run.
    pub ungrouped: Vec<&'t Test<Extra>>,

    /// Groups that run, in sequence order.
    pub selected: Vec<SequencedGroup<'t, Extra>>,

    /// Groups that are skipped, in sequence order.
    pub skipped: Vec<SequencedGroup<'t, Extra>>,
}

impl<Extra> Selection<'_, Extra> {
    pub fn any_selected(&self) -> bool {
        !self.selected.is_empty()
    }
}

/// Split the sequenced groups by the selection mode.
pub fn select<'t, Extra>(sequence: Sequence<'t, Extra>, mode: &SelectionMode) -> Selection<'t, Extra> {
    let Sequence {
        discovered,
        ungrouped,
        groups,
    } = sequence;

    let (selected, skipped): (Vec<_>, Vec<_>) =
        groups.into_iter().partition(|group| mode.matches(&group.name));

    info!(
        selected = ?selected.iter().map(|group| group.name.as_str()).collect::<Vec<_>>(),
        skipped = skipped.len(),
        "selected study groups"
    );

    Selection {
        discovered,
        ungrouped,
        selected,
        skipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        group::{classify, sequence},
        marker::Marker,
        test::Test,
        test_support::*,
    };

    fn tests() -> [Test; 4] {
        [
            test! {name: "independent"},
            test! {name: "pre_ai", markers: vec![Marker::pre().name("AI")]},
            test! {name: "study_ai", markers: vec![Marker::study().name("AI")]},
            test! {name: "study_default", markers: vec![Marker::study().order(1)]},
        ]
    }

    fn group_names<'a>(groups: &'a [SequencedGroup<'_, ()>]) -> Vec<&'a str> {
        groups.iter().map(|group| group.name.as_str()).collect()
    }

    #[test]
    fn empty_expression_selects_nothing() {
        let tests = tests();
        let mode = SelectionMode::parse("").unwrap();
        let selection = select(sequence(classify(&tests).unwrap()), &mode);

        assert!(!selection.any_selected());
        assert_eq!(selection.ungrouped.len(), 1);
        assert_eq!(group_names(&selection.skipped), ["default", "AI"]);
    }

    #[test]
    fn all_selects_everything() {
        let tests = tests();
        let mode = SelectionMode::parse("all").unwrap();
        let selection = select(sequence(classify(&tests).unwrap()), &mode);

        assert_eq!(group_names(&selection.selected), ["default", "AI"]);
        assert!(selection.skipped.is_empty());
    }

    #[test]
    fn pattern_matches_case_insensitive_substring() {
        let tests = tests();
        let mode = SelectionMode::parse("ai").unwrap();
        let selection = select(sequence(classify(&tests).unwrap()), &mode);

        assert_eq!(group_names(&selection.selected), ["AI"]);
        assert_eq!(group_names(&selection.skipped), ["default"]);
        assert_eq!(selection.selected[0].tests.len(), 2);
    }

    #[test]
    fn pattern_is_a_regex() {
        let mode: SelectionMode = "^de.*t$".parse().unwrap();
        assert!(mode.matches("default"));
        assert!(!mode.matches("AI"));
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        let Err(Error::InvalidSelection { expr, .. }) = SelectionMode::parse("(unclosed") else {
            panic!("expected an invalid selection");
        };
        assert_eq!(expr, "(unclosed");
    }
}
