use crate::formatter::TestFormatter;

/// A formatter that produces no output.
///
/// Useful when running studies from inside another system that does its own
/// reporting, and in tests.
#[derive(Debug, Default, Clone)]
pub struct NoFormatter;

impl<'t, Extra: 't> TestFormatter<'t, Extra> for NoFormatter {
    type Error = ();
}
