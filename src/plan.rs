//! The collection phase.
//!
//! Before anything runs, the discovered tests go through the whole pipeline
//! once: filter, classify, sequence, select. The result is a
//! [`CollectionPlan`], the final list of tests in the order they are
//! executed, each annotated with its group, whether it runs, and whether it
//! belongs to a failure chain.

use crate::{
    Error,
    filter::{FilteredTests, TestFilter},
    formatter::FmtOrder,
    group::{SequencedGroup, classify, sequence},
    ignore::{IgnoreStatus, NEEDS_RUNSTUDY},
    select::{Selection, SelectionMode, select},
    test::Test,
};

/// A test as it takes part in the run.
#[derive(Debug)]
pub struct PlannedTest<'t, Extra> {
    pub test: &'t Test<Extra>,

    /// The study group, `None` for ungrouped tests.
    pub group: Option<String>,

    /// `false` for tests of groups that were not selected.
    pub selected: bool,

    /// Member of the failure chain of its scope.
    pub incremental: bool,

    /// The declared ignore status, or the selection skip for unselected
    /// groups.
    pub ignore: IgnoreStatus,
}

impl<'t, Extra> PlannedTest<'t, Extra> {
    fn new(test: &'t Test<Extra>, group: Option<String>, selected: bool) -> Self {
        let grouped = group.is_some();
        let ignore = match (selected, &test.ignore) {
            (false, IgnoreStatus::Run) => IgnoreStatus::from(NEEDS_RUNSTUDY),
            (_, status) => status.clone(),
        };

        Self {
            test,
            group,
            selected,
            incremental: grouped || test.incremental,
            ignore,
        }
    }

    fn ungrouped(test: &'t Test<Extra>) -> Self {
        Self::new(test, None, true)
    }

    fn from_group(
        group: SequencedGroup<'t, Extra>,
        selected: bool,
    ) -> impl Iterator<Item = Self> {
        let SequencedGroup { name, tests, .. } = group;
        tests
            .into_iter()
            .map(move |test| Self::new(test, Some(name.clone()), selected))
    }

    /// Whether the test body is executed, chain gating aside.
    pub fn runs(&self) -> bool {
        !self.ignore.is_ignored()
    }
}

/// The ordered and annotated tests of one run.
#[derive(Debug)]
pub struct CollectionPlan<'t, Extra> {
    /// The tests of the run, in execution order.
    pub tests: Vec<PlannedTest<'t, Extra>>,

    /// Tests of unselected groups while another group is selected.
    ///
    /// They are not part of the run and only show up in the order display.
    pub skipped: Vec<PlannedTest<'t, Extra>>,

    pub filtered_out: usize,

    /// Width of the longest group name.
    pub width: usize,
}

impl<'t, Extra> CollectionPlan<'t, Extra> {
    /// Run the collection phase.
    ///
    /// When at least one group is selected, the run is the ungrouped tests
    /// followed by the selected groups in sequence order. The other groups
    /// are set aside in [`skipped`](Self::skipped). When no group is
    /// selected, the tests keep their discovery order and every grouped test
    /// is ignored with [`NEEDS_RUNSTUDY`].
    pub fn collect<Filter: TestFilter<Extra>>(
        tests: &'t [Test<Extra>],
        filter: &Filter,
        mode: &SelectionMode,
    ) -> Result<Self, Error> {
        let FilteredTests {
            tests,
            filtered_out,
        } = filter.filter(tests);

        let sequence = sequence(classify(tests)?);
        let width = sequence.name_width();
        let selection = select(sequence, mode);
        let (tests, skipped) = match selection.any_selected() {
            true => Self::reordered(selection),
            false => (Self::discovery_order(selection), Vec::new()),
        };

        Ok(Self {
            tests,
            skipped,
            filtered_out,
            width,
        })
    }

    fn reordered(
        selection: Selection<'t, Extra>,
    ) -> (Vec<PlannedTest<'t, Extra>>, Vec<PlannedTest<'t, Extra>>) {
        let Selection {
            ungrouped,
            selected,
            skipped,
            ..
        } = selection;

        let ungrouped = ungrouped.into_iter().map(PlannedTest::ungrouped);
        let selected = selected
            .into_iter()
            .flat_map(|group| PlannedTest::from_group(group, true));
        let skipped = skipped
            .into_iter()
            .flat_map(|group| PlannedTest::from_group(group, false))
            .collect();
        (ungrouped.chain(selected).collect(), skipped)
    }

    fn discovery_order(selection: Selection<'t, Extra>) -> Vec<PlannedTest<'t, Extra>> {
        selection
            .discovered
            .into_iter()
            .map(|(test, group)| {
                let selected = group.is_none();
                PlannedTest::new(test, group, selected)
            })
            .collect()
    }

    /// Number of tests in the order display, skipped ones included.
    pub fn len(&self) -> usize {
        self.tests.len() + self.skipped.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty() && self.skipped.is_empty()
    }

    /// Number of tests that belong to the run, ignored tests of selected
    /// groups included.
    pub fn selected(&self) -> usize {
        self.tests.iter().filter(|planned| planned.selected).count()
    }

    /// One order line per planned test, the run first, then the skipped
    /// tests.
    pub fn order(&self) -> impl Iterator<Item = FmtOrder<'_, 't, Extra>> {
        self.tests
            .iter()
            .chain(&self.skipped)
            .enumerate()
            .map(|(index, planned)| FmtOrder {
                index,
                width: self.width,
                group: planned.group.as_deref(),
                meta: &planned.test.meta,
                selected: planned.selected,
            })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{filter::NoFilter, marker::Marker, test_support::*};

    fn tests() -> Vec<Test> {
        vec![
            test! {name: "independent"},
            test! {name: "foo", markers: vec![Marker::pre().name("AI")]},
            test! {name: "gather_info", markers: vec![Marker::pre().name("AI").order(5)]},
            test! {name: "study_one", markers: vec![Marker::study().name("AI")]},
            test! {name: "bar", markers: vec![Marker::pre()]},
            test! {name: "prior_bar", markers: vec![Marker::pre().order(5)]},
            test! {name: "study_two", markers: vec![Marker::study().order(1)]},
        ]
    }

    fn collect<'t>(tests: &'t [Test], expr: &str) -> CollectionPlan<'t, ()> {
        let mode = SelectionMode::parse(expr).unwrap();
        CollectionPlan::collect(tests, &NoFilter, &mode).unwrap()
    }

    fn summary<'p>(plan: &'p CollectionPlan<'_, ()>) -> Vec<(&'p str, bool)> {
        plan.tests
            .iter()
            .map(|planned| (planned.test.name.as_ref(), planned.runs()))
            .collect()
    }

    #[test]
    fn nothing_selected_keeps_discovery_order() {
        let tests = tests();
        let plan = collect(&tests, "");

        assert_eq!(
            summary(&plan),
            [
                ("independent", true),
                ("foo", false),
                ("gather_info", false),
                ("study_one", false),
                ("bar", false),
                ("prior_bar", false),
                ("study_two", false),
            ]
        );
        assert_eq!(plan.selected(), 1);
        assert_eq!(
            plan.tests[1].ignore,
            IgnoreStatus::IgnoreWithReason(NEEDS_RUNSTUDY.into())
        );
    }

    #[test]
    fn all_runs_in_sequence_order() {
        let tests = tests();
        let plan = collect(&tests, "all");

        assert_eq!(
            summary(&plan),
            [
                ("independent", true),
                ("prior_bar", true),
                ("bar", true),
                ("study_two", true),
                ("gather_info", true),
                ("foo", true),
                ("study_one", true),
            ]
        );
        assert!(!plan.tests[0].incremental);
        assert!(plan.tests[1..].iter().all(|planned| planned.incremental));
    }

    #[test]
    fn selected_groups_replace_the_run() {
        let tests = tests();
        let plan = collect(&tests, "ai");

        assert_eq!(
            summary(&plan),
            [
                ("independent", true),
                ("gather_info", true),
                ("foo", true),
                ("study_one", true),
            ]
        );

        let skipped: Vec<_> = plan
            .skipped
            .iter()
            .map(|planned| planned.test.name.as_ref())
            .collect();
        assert_eq!(skipped, ["prior_bar", "bar", "study_two"]);
        assert_eq!(plan.skipped[0].group.as_deref(), Some("default"));
        assert!(plan.skipped.iter().all(|planned| !planned.selected));
        assert_eq!(plan.len(), 7);
        assert_eq!(plan.selected(), 4);
    }

    #[test]
    fn declared_ignore_is_kept() {
        let tests = [test! {
            name: "flaky",
            ignore: "broken on ci",
            markers: vec![Marker::pre()]
        }];
        let plan = collect(&tests, "all");
        assert_eq!(
            plan.tests[0].ignore,
            IgnoreStatus::IgnoreWithReason("broken on ci".into())
        );
    }

    #[test]
    fn order_lines_carry_groups() {
        let tests = tests();
        let plan = collect(&tests, "ai");
        let lines: Vec<_> = plan
            .order()
            .map(|line| (line.index, line.group, line.selected))
            .collect();

        assert_eq!(lines[0], (0, None, true));
        assert_eq!(lines[1], (1, Some("AI"), true));
        assert_eq!(lines[6], (6, Some("default"), false));
        assert_eq!(plan.width, 7);
    }
}
