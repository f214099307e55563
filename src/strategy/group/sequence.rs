use tracing::{debug, warn};

use crate::{
    group::{Classified, Ranked},
    test::Test,
};

/// One group in execution order: its prerequisites sorted by `order`,
/// followed by its study.
#[derive(Debug)]
pub struct SequencedGroup<'t, Extra> {
    pub name: String,

    /// The `order` of the group's study, `None` for groups without one.
    pub priority: Option<i64>,

    pub tests: Vec<&'t Test<Extra>>,
}

/// The execution order of all tests.
#[derive(Debug)]
pub struct Sequence<'t, Extra> {
    /// Every test in discovery order, with the name of the group it joined.
    pub discovered: Vec<(&'t Test<Extra>, Option<String>)>,

    pub ungrouped: Vec<&'t Test<Extra>>,
    pub groups: Vec<SequencedGroup<'t, Extra>>,
}

impl<'t, Extra> Sequence<'t, Extra> {
    /// Ungrouped tests first, then every group block in priority order.
    pub fn tests(&self) -> impl Iterator<Item = &'t Test<Extra>> + '_ {
        self.ungrouped.iter().copied().chain(
            self.groups
                .iter()
                .flat_map(|group| group.tests.iter().copied()),
        )
    }

    /// The width of the longest group name.
    pub fn name_width(&self) -> usize {
        self.groups
            .iter()
            .map(|group| group.name.chars().count())
            .max()
            .unwrap_or(0)
    }
}

/// Order tests inside every group and order the groups.
///
/// Inside a group the prerequisites are sorted by their `order`, the study
/// comes last. Groups are sorted by the `order` of their study, so changing
/// that single value moves the whole block. All sorts are stable, ties keep
/// discovery order.
///
/// A group with more than one study keeps all of them after its
/// prerequisites and takes its priority from the first. A group without a
/// study is placed after all groups that have one.
pub fn sequence<'t, Extra>(classified: Classified<'t, Extra>) -> Sequence<'t, Extra> {
    let Classified {
        discovered,
        ungrouped,
        groups,
    } = classified;

    let mut groups: Vec<_> = groups
        .into_iter()
        .map(|mut group| {
            if group.studies.len() > 1 {
                warn!(
                    group = %group.name,
                    studies = group.studies.len(),
                    "group declares more than one study"
                );
            }
            if group.studies.is_empty() {
                debug!(group = %group.name, "group has no study");
            }

            group.prerequisites.sort_by_key(|ranked| ranked.order);
            let priority = group.studies.first().map(|study| study.order);
            let tests = group
                .prerequisites
                .iter()
                .chain(group.studies.iter())
                .map(|&Ranked { test, .. }| test)
                .collect();

            SequencedGroup {
                name: group.name,
                priority,
                tests,
            }
        })
        .collect();

    groups.sort_by_key(|group| match group.priority {
        Some(order) => (false, order),
        None => (true, 0),
    });

    debug!(
        order = ?groups.iter().map(|group| group.name.as_str()).collect::<Vec<_>>(),
        "sequenced study groups"
    );

    Sequence {
        discovered,
        ungrouped,
        groups,
    }
}
