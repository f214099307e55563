use std::io;

mod study;
pub use study::StudyHarness;

use crate::{
    filter::DefaultFilter, formatter::pretty::PrettyFormatter, panic::DefaultPanicHandler,
    select::SelectionMode, test::Test,
};

/// Create a harness for `tests` with the default strategies.
///
/// Studies are disabled until a selection is configured, either with
/// [`StudyHarness::with_selection`] or from the command line with
/// [`StudyHarness::with_config`].
pub fn harness<'t, Extra>(
    tests: &'t [Test<Extra>],
) -> StudyHarness<'t, Extra, DefaultFilter, DefaultPanicHandler, PrettyFormatter<io::Stdout>> {
    StudyHarness {
        tests,
        filter: DefaultFilter::default(),
        selection: SelectionMode::None,
        show_order: false,
        panic_handler: DefaultPanicHandler,
        formatter: PrettyFormatter::default(),
    }
}
