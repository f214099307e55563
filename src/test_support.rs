use std::{borrow::Cow, panic::RefUnwindSafe};

use crate::{
    StudyHarness,
    filter::NoFilter,
    formatter::no::NoFormatter,
    ignore::IgnoreStatus,
    marker::Marker,
    panic::DefaultPanicHandler,
    select::SelectionMode,
    test::{Test, TestFn, TestFnHandle, TestMeta},
};

pub struct BuildTest<Extra> {
    pub func: TestFnHandle,
    pub name: Cow<'static, str>,
    pub scope: Cow<'static, str>,
    pub ignore: IgnoreStatus,
    pub incremental: bool,
    pub markers: Cow<'static, [Marker]>,
    pub extra: Extra,
}

impl Default for BuildTest<()> {
    fn default() -> Self {
        Self {
            func: TestFnHandle::Static(&|| ()),
            name: Default::default(),
            scope: Default::default(),
            ignore: Default::default(),
            incremental: false,
            markers: Default::default(),
            extra: Default::default(),
        }
    }
}

impl<Extra> From<BuildTest<Extra>> for Test<Extra> {
    fn from(value: BuildTest<Extra>) -> Self {
        Test::new(
            value.func,
            TestMeta {
                name: value.name,
                scope: value.scope,
                ignore: value.ignore,
                incremental: value.incremental,
                markers: value.markers,
                extra: value.extra,
            },
        )
    }
}

impl<F> From<F> for TestFnHandle
where
    F: TestFn + Send + Sync + RefUnwindSafe + 'static,
{
    fn from(value: F) -> Self {
        TestFnHandle::Owned(Box::new(value))
    }
}

macro_rules! test {
    {$($field:ident: $value:expr),* $(,)?} => {
        $crate::test::Test::from($crate::test_support::BuildTest {
            $($field: From::from($value),)*
            ..($crate::test_support::BuildTest {
                name: concat!(module_path!(), "::", file!(), ":", line!(), ":", column!()).into(),
                ..Default::default()
            })
        })
    };
}

pub(crate) use test;

pub fn harness<'t>(
    tests: &'t [Test],
) -> StudyHarness<'t, (), NoFilter, DefaultPanicHandler, NoFormatter> {
    StudyHarness {
        tests,
        filter: NoFilter,
        selection: SelectionMode::None,
        show_order: false,
        panic_handler: DefaultPanicHandler,
        formatter: NoFormatter,
    }
}
