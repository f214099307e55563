//! Study and prerequisite markers.
//!
//! Tests opt into a study by carrying a [`Marker`]. A marker holds the raw
//! arguments it was declared with, the same way an attribute macro would see
//! them: a list of positional arguments and a list of keyword arguments.
//!
//! Before the harness can order anything, the raw markers of a test are
//! resolved into a [`Designation`], which carries a parsed [`StudyMarker`]
//! with the group `name` and the `order` priority.

use std::{borrow::Cow, fmt::Display};

/// The group name used when a marker does not name one.
pub const DEFAULT_NAME: &str = "default";

/// The order used when a marker does not set one. Lower runs first.
pub const DEFAULT_ORDER: i64 = 1000;

const POSITIONAL: [&str; 2] = ["name", "order"];

/// The role a marker gives to a test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    /// A setup test that has to pass before the study of its group runs.
    Prerequisite,

    /// The long running test of a group.
    Study,
}

impl Display for MarkerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarkerKind::Prerequisite => f.write_str("pre"),
            MarkerKind::Study => f.write_str("study"),
        }
    }
}

/// A single raw marker argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerArg {
    Str(Cow<'static, str>),
    Int(i64),
}

impl Display for MarkerArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarkerArg::Str(s) => write!(f, "{s:?}"),
            MarkerArg::Int(i) => write!(f, "{i}"),
        }
    }
}

impl From<&'static str> for MarkerArg {
    fn from(value: &'static str) -> Self {
        Self::Str(value.into())
    }
}

impl From<String> for MarkerArg {
    fn from(value: String) -> Self {
        Self::Str(value.into())
    }
}

impl From<i64> for MarkerArg {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for MarkerArg {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

/// A raw marker attached to a test at discovery time.
///
/// [`Marker::pre`] and [`Marker::study`] are const, so argument free markers
/// fit into static test tables. Arguments are added with the builder methods:
///
/// ```
/// use kitest_study::marker::Marker;
///
/// let marker = Marker::pre().name("AI").order(5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub kind: MarkerKind,
    pub args: Cow<'static, [MarkerArg]>,
    pub kwargs: Cow<'static, [(Cow<'static, str>, MarkerArg)]>,
}

impl Marker {
    pub const fn new(kind: MarkerKind) -> Self {
        Self {
            kind,
            args: Cow::Borrowed(&[]),
            kwargs: Cow::Borrowed(&[]),
        }
    }

    pub const fn pre() -> Self {
        Self::new(MarkerKind::Prerequisite)
    }

    pub const fn study() -> Self {
        Self::new(MarkerKind::Study)
    }

    /// Append a positional argument.
    pub fn arg(mut self, value: impl Into<MarkerArg>) -> Self {
        self.args.to_mut().push(value.into());
        self
    }

    /// Append a keyword argument.
    pub fn kwarg(mut self, key: impl Into<Cow<'static, str>>, value: impl Into<MarkerArg>) -> Self {
        self.kwargs.to_mut().push((key.into(), value.into()));
        self
    }

    pub fn name(self, name: impl Into<Cow<'static, str>>) -> Self {
        self.kwarg("name", MarkerArg::Str(name.into()))
    }

    pub fn order(self, order: i64) -> Self {
        self.kwarg("order", order)
    }

    /// Parse the arguments of this marker.
    pub fn parse(&self) -> Result<StudyMarker, MarkerError> {
        StudyMarker::parse(&self.args, &self.kwargs)
    }
}

/// The canonical form of a marker's arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StudyMarker {
    pub name: String,
    pub order: i64,
}

impl Default for StudyMarker {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            order: DEFAULT_ORDER,
        }
    }
}

impl StudyMarker {
    /// Bind positional and keyword arguments to `name` and `order`.
    ///
    /// The first positional argument is the `name`, the second the `order`.
    /// Keyword arguments win over positional ones for the same field.
    pub fn parse(
        args: &[MarkerArg],
        kwargs: &[(Cow<'static, str>, MarkerArg)],
    ) -> Result<Self, MarkerError> {
        if args.len() > POSITIONAL.len() {
            return Err(MarkerError::TooManyArguments { count: args.len() });
        }

        let mut name = None;
        let mut order = None;
        let positional = POSITIONAL.iter().copied().zip(args);
        let keyword = kwargs.iter().map(|(key, value)| (key.as_ref(), value));
        for (key, value) in positional.chain(keyword) {
            match key {
                "name" => name = Some(value),
                "order" => order = Some(value),
                other => {
                    return Err(MarkerError::UnknownKeyword {
                        keyword: other.to_string(),
                    });
                }
            }
        }

        let name = match name {
            None => DEFAULT_NAME.to_string(),
            Some(MarkerArg::Str(name)) => name.to_string(),
            Some(other) => return Err(MarkerError::InvalidName(other.clone())),
        };

        let order = match order {
            None => DEFAULT_ORDER,
            Some(MarkerArg::Int(order)) => *order,
            Some(other) => return Err(MarkerError::InvalidOrder(other.clone())),
        };

        Ok(Self { name, order })
    }
}

/// Failure to parse the arguments of a single marker.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarkerError {
    #[error("expected at most 2 positional arguments (name, order), got {count}")]
    TooManyArguments { count: usize },

    #[error("unknown keyword argument `{keyword}`")]
    UnknownKeyword { keyword: String },

    #[error("`name` must be a string, got {0}")]
    InvalidName(MarkerArg),

    #[error("`order` must be an integer, got {0}")]
    InvalidOrder(MarkerArg),
}

/// Failure to resolve the markers of a test into a [`Designation`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DesignationError {
    #[error("a test cannot be both a prerequisite and a study")]
    Conflicting,

    #[error("invalid `{kind}` marker")]
    Marker {
        kind: MarkerKind,
        #[source]
        source: MarkerError,
    },
}

/// The resolved role of a test.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Designation {
    #[default]
    None,
    Prerequisite(StudyMarker),
    Study(StudyMarker),
}

impl Designation {
    /// Resolve the raw markers of a test.
    ///
    /// Repeated markers of the same kind resolve to the first one.
    pub fn resolve(markers: &[Marker]) -> Result<Self, DesignationError> {
        let pre = markers
            .iter()
            .find(|marker| marker.kind == MarkerKind::Prerequisite);
        let study = markers
            .iter()
            .find(|marker| marker.kind == MarkerKind::Study);

        let parse = |marker: &Marker| {
            marker.parse().map_err(|source| DesignationError::Marker {
                kind: marker.kind,
                source,
            })
        };

        match (pre, study) {
            (None, None) => Ok(Designation::None),
            (Some(pre), None) => parse(pre).map(Designation::Prerequisite),
            (None, Some(study)) => parse(study).map(Designation::Study),
            (Some(_), Some(_)) => Err(DesignationError::Conflicting),
        }
    }

    pub fn marker(&self) -> Option<&StudyMarker> {
        match self {
            Designation::None => None,
            Designation::Prerequisite(marker) | Designation::Study(marker) => Some(marker),
        }
    }

    pub fn is_grouped(&self) -> bool {
        self.marker().is_some()
    }
}
