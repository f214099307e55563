use std::{
    panic::{self, RefUnwindSafe},
    thread,
    time::Instant,
};

use tracing::info;

use crate::{
    Error, TestReport,
    chain::ChainTracker,
    config::StudyConfig,
    filter::{DefaultFilter, TestFilter},
    formatter::*,
    outcome::{TestOutcome, TestStatus},
    panic::TestPanicHandler,
    plan::{CollectionPlan, PlannedTest},
    select::SelectionMode,
    test::Test,
};

const FMT_CHANNEL_CAPACITY: usize = 16;

pub struct StudyHarness<'t, Extra, Filter, PanicHandler, Formatter> {
    pub(crate) tests: &'t [Test<Extra>],
    pub(crate) filter: Filter,
    pub(crate) selection: SelectionMode,
    pub(crate) show_order: bool,
    pub(crate) panic_handler: PanicHandler,
    pub(crate) formatter: Formatter,
}

impl<'t, Extra, Filter, PanicHandler, Formatter>
    StudyHarness<'t, Extra, Filter, PanicHandler, Formatter>
where
    Extra: RefUnwindSafe + Sync,
    Filter: TestFilter<Extra>,
    PanicHandler: TestPanicHandler<Extra>,
    Formatter: TestFormatter<'t, Extra> + Send + 't,
    Formatter::Error: Send,
{
    /// Collect and run the tests.
    ///
    /// Tests run one after another on the calling thread, in plan order.
    /// Formatting happens on a separate thread so slow output does not skew
    /// test durations.
    ///
    /// Fails without running anything if the collection phase fails.
    pub fn run(self) -> Result<TestReport<'t, Formatter::Error>, Error> {
        let now = Instant::now();
        let plan = CollectionPlan::collect(self.tests, &self.filter, &self.selection)?;
        let filtered_out = plan.filtered_out;

        let mut formatter = self.formatter;
        let mut fmt_errors = Vec::new();
        if self.show_order {
            for line in plan.order() {
                fmt_errors.push_on_error(named_fmt!(formatter.fmt_order(line)));
            }
        }

        let active = plan.tests.iter().filter(|planned| planned.runs()).count();
        fmt_errors.push_on_error(named_fmt!(formatter.fmt_run_start(FmtRunStart {
            active,
            filtered_out
        })));

        let panic_handler = self.panic_handler;
        let (outcomes, mut formatter, mut fmt_errors) = thread::scope(move |scope| {
            let (ftx, frx) = crossbeam_channel::bounded(FMT_CHANNEL_CAPACITY);
            let fmt_thread = scope.spawn(move || {
                while let Ok(data) = frx.recv() {
                    fmt_errors.push_on_error(named_fmt!(formatter.fmt_test_outcome(data)));
                }
                (formatter, fmt_errors)
            });

            let mut chains = ChainTracker::new();
            let outcomes: Vec<_> = plan
                .tests
                .iter()
                .map(|planned| {
                    let test = planned.test;
                    let now = Instant::now();
                    let status = execute(planned, &mut chains, &panic_handler);
                    let outcome = TestOutcome {
                        status,
                        duration: now.elapsed(),
                    };
                    let _ = ftx.send(FmtTestOutcome {
                        meta: &test.meta,
                        outcome: outcome.clone(),
                    });
                    (test.name.as_ref(), outcome)
                })
                .collect();

            drop(ftx);
            let (formatter, fmt_errors) = fmt_thread
                .join()
                .unwrap_or_else(|payload| panic::resume_unwind(payload));

            (outcomes, formatter, fmt_errors)
        });

        let duration = now.elapsed();
        fmt_errors.push_on_error(named_fmt!(formatter.fmt_run_outcomes(FmtRunOutcomes {
            outcomes: &outcomes,
            filtered_out,
            duration
        })));

        info!(
            tests = outcomes.len(),
            failed = outcomes.iter().filter(|(_, outcome)| outcome.failed()).count(),
            "run finished"
        );

        Ok(TestReport {
            outcomes,
            duration,
            filtered_out,
            fmt_errors,
        })
    }
}

fn execute<Extra, PanicHandler>(
    planned: &PlannedTest<'_, Extra>,
    chains: &mut ChainTracker,
    panic_handler: &PanicHandler,
) -> TestStatus
where
    Extra: RefUnwindSafe,
    PanicHandler: TestPanicHandler<Extra>,
{
    let test = planned.test;
    if !planned.runs() {
        return TestStatus::Ignored {
            reason: planned.ignore.reason(),
        };
    }

    if planned.incremental {
        if let Some(reason) = chains.gate(&test.meta) {
            return TestStatus::ExpectedFailure { reason };
        }
    }

    let status = panic_handler.handle(|| test.call(), &test.meta);
    if planned.incremental {
        chains.record(&test.meta, &status);
    }
    status
}

impl<'t, Extra, Filter, PanicHandler, Formatter>
    StudyHarness<'t, Extra, Filter, PanicHandler, Formatter>
where
    Filter: TestFilter<Extra>,
    Formatter: TestFormatter<'t, Extra>,
{
    /// Collect the tests and print the execution order without running.
    ///
    /// Returns the formatter errors that occurred.
    pub fn list(self) -> Result<Vec<(FormatError, Formatter::Error)>, Error> {
        let plan = CollectionPlan::collect(self.tests, &self.filter, &self.selection)?;

        let mut formatter = self.formatter;
        let mut fmt_errors = Vec::new();
        for line in plan.order() {
            fmt_errors.push_on_error(named_fmt!(formatter.fmt_order(line)));
        }

        let selected = plan.selected();
        fmt_errors.push_on_error(named_fmt!(formatter.fmt_list_end(FmtListEnd {
            selected,
            skipped: plan.len() - selected,
        })));

        Ok(fmt_errors)
    }
}

impl<'t, Extra, Filter, PanicHandler, Formatter>
    StudyHarness<'t, Extra, Filter, PanicHandler, Formatter>
{
    /// Take filters, selection and order display from the command line.
    pub fn with_config(
        self,
        config: &StudyConfig,
    ) -> Result<StudyHarness<'t, Extra, DefaultFilter, PanicHandler, Formatter>, Error> {
        Ok(StudyHarness {
            tests: self.tests,
            filter: DefaultFilter::from(config),
            selection: config.selection()?,
            show_order: config.show_order,
            panic_handler: self.panic_handler,
            formatter: self.formatter,
        })
    }

    pub fn with_selection(self, selection: SelectionMode) -> Self {
        Self { selection, ..self }
    }

    pub fn with_show_order(self, show_order: bool) -> Self {
        Self { show_order, ..self }
    }

    pub fn with_filter<WithFilter: TestFilter<Extra>>(
        self,
        filter: WithFilter,
    ) -> StudyHarness<'t, Extra, WithFilter, PanicHandler, Formatter> {
        StudyHarness {
            tests: self.tests,
            filter,
            selection: self.selection,
            show_order: self.show_order,
            panic_handler: self.panic_handler,
            formatter: self.formatter,
        }
    }

    pub fn with_panic_handler<WithPanicHandler: TestPanicHandler<Extra>>(
        self,
        panic_handler: WithPanicHandler,
    ) -> StudyHarness<'t, Extra, Filter, WithPanicHandler, Formatter> {
        StudyHarness {
            tests: self.tests,
            filter: self.filter,
            selection: self.selection,
            show_order: self.show_order,
            panic_handler,
            formatter: self.formatter,
        }
    }

    pub fn with_formatter<WithFormatter>(
        self,
        formatter: WithFormatter,
    ) -> StudyHarness<'t, Extra, Filter, PanicHandler, WithFormatter> {
        StudyHarness {
            tests: self.tests,
            filter: self.filter,
            selection: self.selection,
            show_order: self.show_order,
            panic_handler: self.panic_handler,
            formatter,
        }
    }
}
