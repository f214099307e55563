use std::io::{self, IsTerminal};

use crate::{
    formatter::{
        FmtListEnd, FmtOrder, FmtRunOutcomes, FmtRunStart, FmtTestOutcome, TestFormatter,
        color::{ColorSetting, Paint},
    },
    outcome::{TestFailure, TestStatus},
};

/// A formatter that writes output close to the built in Rust test harness.
///
/// Order lines look like `+  3 [     AI] studies:test_foo`, where `+` marks a
/// test that runs and `-` one whose group was not selected.
#[derive(Debug)]
pub struct PrettyFormatter<W: io::Write> {
    target: W,
    color: ColorSetting,
    terminal: bool,
}

impl Default for PrettyFormatter<io::Stdout> {
    fn default() -> Self {
        let target = io::stdout();
        let terminal = target.is_terminal();
        Self {
            target,
            color: ColorSetting::default(),
            terminal,
        }
    }
}

impl<W: io::Write> PrettyFormatter<W> {
    /// Write to another target.
    ///
    /// The target is not treated as a terminal, so automatic color is off.
    pub fn with_target<T: io::Write>(self, target: T) -> PrettyFormatter<T> {
        PrettyFormatter {
            target,
            color: self.color,
            terminal: false,
        }
    }

    pub fn with_color(self, color: ColorSetting) -> Self {
        Self { color, ..self }
    }

    pub fn into_target(self) -> W {
        self.target
    }

    fn colored(&self) -> bool {
        self.color.enabled(self.terminal)
    }
}

fn plural(count: usize) -> &'static str {
    match count {
        1 => "",
        _ => "s",
    }
}

impl<'t, Extra: 't, W: io::Write> TestFormatter<'t, Extra> for PrettyFormatter<W> {
    type Error = io::Error;

    fn fmt_order(&mut self, data: FmtOrder<'_, 't, Extra>) -> Result<(), Self::Error> {
        let (marker, paint) = match data.selected {
            true => ('+', Paint::Warn),
            false => ('-', Paint::Dim),
        };
        let line = format!(
            "{marker}{:>3} [{:>width$}] {}",
            data.index,
            data.group.unwrap_or_default(),
            data.meta.qualified_name(),
            width = data.width,
        );
        writeln!(self.target, "{}", paint.apply(&line, self.colored()))
    }

    fn fmt_list_end(&mut self, data: FmtListEnd) -> Result<(), Self::Error> {
        writeln!(
            self.target,
            "\n{} test{}, {} skipped",
            data.selected,
            plural(data.selected),
            data.skipped
        )
    }

    fn fmt_run_start(&mut self, data: FmtRunStart) -> Result<(), Self::Error> {
        writeln!(self.target, "\nrunning {} test{}", data.active, plural(data.active))
    }

    fn fmt_test_outcome(&mut self, data: FmtTestOutcome<'t, Extra>) -> Result<(), Self::Error> {
        let colored = self.colored();
        let name = data.meta.qualified_name();
        match &data.outcome.status {
            TestStatus::Passed => {
                writeln!(self.target, "test {name} ... {}", Paint::Ok.apply("ok", colored))
            }
            TestStatus::Ignored { reason: None } => writeln!(
                self.target,
                "test {name} ... {}",
                Paint::Warn.apply("ignored", colored)
            ),
            TestStatus::Ignored {
                reason: Some(reason),
            } => writeln!(
                self.target,
                "test {name} ... {}, {reason}",
                Paint::Warn.apply("ignored", colored)
            ),
            TestStatus::ExpectedFailure { reason } => writeln!(
                self.target,
                "test {name} ... {}, {reason}",
                Paint::Warn.apply("xfail", colored)
            ),
            TestStatus::Failed(_) => writeln!(
                self.target,
                "test {name} ... {}",
                Paint::Failed.apply("FAILED", colored)
            ),
        }
    }

    fn fmt_run_outcomes(&mut self, data: FmtRunOutcomes<'_, 't>) -> Result<(), Self::Error> {
        let count = |predicate: fn(&TestStatus) -> bool| {
            data.outcomes
                .iter()
                .filter(|(_, outcome)| predicate(&outcome.status))
                .count()
        };
        let passed = count(TestStatus::passed);
        let failed = count(TestStatus::failed);
        let ignored = count(TestStatus::ignored);
        let xfailed = count(TestStatus::expected_failure);

        let failures: Vec<_> = data
            .outcomes
            .iter()
            .filter_map(|(name, outcome)| match &outcome.status {
                TestStatus::Failed(failure) => Some((name, failure)),
                _ => None,
            })
            .collect();

        if !failures.is_empty() {
            writeln!(self.target, "\nfailures:\n")?;
            for (name, failure) in &failures {
                let message = match failure {
                    TestFailure::Error(err) => format!("Error: {err}"),
                    TestFailure::Panicked(msg) => format!("panicked: {msg}"),
                };
                writeln!(self.target, "---- {name} ----\n{message}\n")?;
            }

            writeln!(self.target, "\nfailures:")?;
            for (name, _) in &failures {
                writeln!(self.target, "    {name}")?;
            }
        }

        let colored = self.colored();
        let result = match failed {
            0 => Paint::Ok.apply("ok", colored),
            _ => Paint::Failed.apply("FAILED", colored),
        };
        writeln!(
            self.target,
            "\ntest result: {result}. {passed} passed; {failed} failed; {ignored} ignored; \
             {xfailed} xfailed; {} filtered out; finished in {:.2}s\n",
            data.filtered_out,
            data.duration.as_secs_f64(),
        )
    }
}
