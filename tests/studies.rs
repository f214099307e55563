use kitest_study::{
    Error,
    config::StudyConfig,
    formatter::{color::ColorSetting, pretty::PrettyFormatter},
    marker::Marker,
    outcome::TestStatus,
    test::{Test, TestFnHandle, TestMeta},
};
use pretty_assertions::assert_eq;

fn test(name: &'static str, markers: Vec<Marker>, fail: bool) -> Test {
    let func = match fail {
        true => TestFnHandle::from_boxed(|| Err::<(), _>("boom")),
        false => TestFnHandle::from_boxed(|| ()),
    };
    Test::new(
        func,
        TestMeta {
            name: name.into(),
            scope: "studies".into(),
            markers: markers.into(),
            ..TestMeta::default()
        },
    )
}

fn suite(fail_gathering: bool) -> Vec<Test> {
    vec![
        test("test_free", vec![], false),
        test("foo", vec![Marker::pre().name("AI")], false),
        test(
            "gather_info",
            vec![Marker::pre().name("AI").order(5)],
            fail_gathering,
        ),
        test("study_ai", vec![Marker::study().name("AI")], false),
        test("bar", vec![Marker::pre()], false),
        test("study_default", vec![Marker::study().order(1)], false),
    ]
}

fn run(tests: &[Test], args: &[&str]) -> (Vec<(String, TestStatus)>, bool, String) {
    let config =
        StudyConfig::try_from_args(std::iter::once("studies").chain(args.iter().copied())).unwrap();
    let mut output = Vec::new();

    let (outcomes, success) = {
        let report = kitest_study::harness(tests)
            .with_config(&config)
            .unwrap()
            .with_formatter(
                PrettyFormatter::default()
                    .with_target(&mut output)
                    .with_color(ColorSetting::Never),
            )
            .run()
            .unwrap();
        assert!(report.fmt_errors.is_empty());

        let outcomes = report
            .outcomes
            .iter()
            .map(|(name, outcome)| (name.to_string(), outcome.status.clone()))
            .collect();
        (outcomes, report.success())
    };

    (outcomes, success, String::from_utf8(output).unwrap())
}

fn names(outcomes: &[(String, TestStatus)]) -> Vec<&str> {
    outcomes.iter().map(|(name, _)| name.as_str()).collect()
}

#[test]
fn selected_study_runs_after_its_prerequisites() {
    let tests = suite(false);
    let (outcomes, success, output) = run(&tests, &["--runstudy=ai", "--show-order"]);

    assert!(success);
    assert_eq!(
        names(&outcomes),
        ["test_free", "gather_info", "foo", "study_ai"]
    );
    assert!(outcomes.iter().all(|(_, status)| status.passed()));

    let lines: Vec<_> = output.lines().collect();
    assert_eq!(
        lines[..6],
        [
            "+  0 [       ] studies:test_free",
            "+  1 [     AI] studies:gather_info",
            "+  2 [     AI] studies:foo",
            "+  3 [     AI] studies:study_ai",
            "-  4 [default] studies:bar",
            "-  5 [default] studies:study_default",
        ]
    );
    assert!(lines.contains(&"running 4 tests"));
    assert!(!output.contains("test studies:bar"));
    assert!(!output.contains("need --runstudy"));
}

#[test]
fn all_groups_run_in_priority_order() {
    let tests = suite(false);
    let (outcomes, success, _) = run(&tests, &["--runstudy"]);

    assert!(success);
    assert_eq!(
        names(&outcomes),
        ["test_free", "bar", "study_default", "gather_info", "foo", "study_ai"]
    );
}

#[test]
fn failing_prerequisite_skips_the_rest_of_its_chain() {
    let tests = suite(true);
    let (outcomes, success, output) = run(&tests, &["--runstudy=AI"]);

    assert!(!success);
    assert!(outcomes[1].1.failed());
    let expected = TestStatus::ExpectedFailure {
        reason: "previous test failed (gather_info)".into(),
    };
    assert_eq!(outcomes[2].1, expected);
    assert_eq!(outcomes[3].1, expected);
    assert!(output.contains("test studies:study_ai ... xfail, previous test failed (gather_info)"));
    assert!(output.contains("test result: FAILED. 1 passed; 1 failed; 0 ignored; 2 xfailed"));
}

#[test]
fn studies_stay_out_of_plain_runs() {
    let tests = suite(false);
    let (outcomes, success, _) = run(&tests, &[]);

    assert!(success);
    assert_eq!(
        names(&outcomes),
        ["test_free", "foo", "gather_info", "study_ai", "bar", "study_default"]
    );
    assert!(outcomes[1..].iter().all(|(_, status)| status.ignored()));
}

#[test]
fn name_filters_apply_before_grouping() {
    let tests = suite(false);
    let (outcomes, _, output) = run(&tests, &["--runstudy=AI", "study"]);

    assert_eq!(names(&outcomes), ["study_ai"]);
    assert!(output.contains("4 filtered out"));
}

#[test]
fn malformed_markers_are_reported_before_running() {
    let tests = [test("broken", vec![Marker::pre().kwarg("priority", 1_i64)], false)];
    let config = StudyConfig::try_from_args(["studies", "--runstudy"]).unwrap();

    let result = kitest_study::harness(&tests)
        .with_config(&config)
        .unwrap()
        .run();
    let Err(Error::Designation { test, .. }) = result else {
        panic!("expected a designation error");
    };
    assert_eq!(test, "studies:broken");
}

#[test]
fn invalid_selection_expression_is_rejected() {
    let tests = suite(false);
    let config = StudyConfig::try_from_args(["studies", "--runstudy=("]).unwrap();
    assert!(matches!(
        kitest_study::harness(&tests).with_config(&config),
        Err(Error::InvalidSelection { .. })
    ));
}
