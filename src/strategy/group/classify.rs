use std::collections::HashMap;

use tracing::debug;

use crate::{
    Error,
    marker::{Designation, StudyMarker},
    test::Test,
};

/// A test together with the `order` it was declared with.
#[derive(Debug)]
pub struct Ranked<'t, Extra> {
    pub order: i64,
    pub test: &'t Test<Extra>,
}

// Manual impls, deriving would require `Extra: Clone`.
impl<Extra> Clone for Ranked<'_, Extra> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Extra> Copy for Ranked<'_, Extra> {}

/// All tests declared for one group name, in discovery order.
#[derive(Debug)]
pub struct StudyGroup<'t, Extra> {
    pub name: String,
    pub prerequisites: Vec<Ranked<'t, Extra>>,
    pub studies: Vec<Ranked<'t, Extra>>,
}

impl<'t, Extra> StudyGroup<'t, Extra> {
    fn new(name: String) -> Self {
        Self {
            name,
            prerequisites: Vec::new(),
            studies: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.prerequisites.len() + self.studies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The result of [`classify`].
#[derive(Debug)]
pub struct Classified<'t, Extra> {
    /// Every test in discovery order, with the name of the group it joined.
    pub discovered: Vec<(&'t Test<Extra>, Option<String>)>,

    /// Tests without a study or prerequisite marker, in discovery order.
    pub ungrouped: Vec<&'t Test<Extra>>,

    /// Groups in order of their first appearance.
    pub groups: Vec<StudyGroup<'t, Extra>>,
}

#[derive(Debug)]
struct StudyGroups<'t, Extra> {
    index: HashMap<String, usize>,
    groups: Vec<StudyGroup<'t, Extra>>,
}

impl<'t, Extra> StudyGroups<'t, Extra> {
    fn entry(&mut self, name: &str) -> &mut StudyGroup<'t, Extra> {
        let idx = match self.index.get(name) {
            Some(idx) => *idx,
            None => {
                let idx = self.groups.len();
                self.index.insert(name.to_string(), idx);
                self.groups.push(StudyGroup::new(name.to_string()));
                idx
            }
        };
        &mut self.groups[idx]
    }

    fn add_prerequisite(&mut self, marker: &StudyMarker, test: &'t Test<Extra>) {
        let order = marker.order;
        self.entry(&marker.name)
            .prerequisites
            .push(Ranked { order, test });
    }

    fn add_study(&mut self, marker: &StudyMarker, test: &'t Test<Extra>) {
        let order = marker.order;
        self.entry(&marker.name).studies.push(Ranked { order, test });
    }
}

/// Partition tests into ungrouped tests and study groups.
///
/// Fails on the first test whose markers cannot be resolved.
pub fn classify<'t, Extra: 't>(
    tests: impl IntoIterator<Item = &'t Test<Extra>>,
) -> Result<Classified<'t, Extra>, Error> {
    let mut discovered = Vec::new();
    let mut ungrouped = Vec::new();
    let mut groups = StudyGroups {
        index: HashMap::new(),
        groups: Vec::new(),
    };

    for test in tests {
        let designation =
            Designation::resolve(&test.markers).map_err(|source| Error::Designation {
                test: test.qualified_name().into_owned(),
                source,
            })?;

        let group = match designation {
            Designation::None => {
                ungrouped.push(test);
                None
            }
            Designation::Prerequisite(marker) => {
                groups.add_prerequisite(&marker, test);
                Some(marker.name)
            }
            Designation::Study(marker) => {
                groups.add_study(&marker, test);
                Some(marker.name)
            }
        };
        discovered.push((test, group));
    }

    let groups = groups.groups;
    debug!(
        ungrouped = ungrouped.len(),
        groups = groups.len(),
        "classified tests"
    );

    Ok(Classified {
        discovered,
        ungrouped,
        groups,
    })
}
