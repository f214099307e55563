//! A small suite with two study groups.
//!
//! ```text
//! cargo run --example studies -- --show-order
//! cargo run --example studies -- --runstudy=AI
//! RUST_LOG=kitest_study=debug cargo run --example studies -- --runstudy
//! ```

use std::{process::ExitCode, thread, time::Duration};

use kitest_study::{config::StudyConfig, prelude::*};
use tracing_subscriber::EnvFilter;

fn study(
    name: &'static str,
    marker: Marker,
    f: impl Fn() -> Result<(), String> + Send + Sync + std::panic::RefUnwindSafe + 'static,
) -> Test {
    Test::new(
        TestFnHandle::from_boxed(f),
        TestMeta {
            name: name.into(),
            scope: "demos::studies".into(),
            markers: vec![marker].into(),
            ..TestMeta::default()
        },
    )
}

fn tests() -> Vec<Test> {
    vec![
        Test::new(
            TestFnHandle::from_boxed(|| assert_eq!(1 + 1, 2)),
            TestMeta {
                name: "test_free".into(),
                scope: "demos::studies".into(),
                ..TestMeta::default()
            },
        ),
        study("download_corpus", Marker::pre().name("AI").order(5), || {
            thread::sleep(Duration::from_millis(50));
            Ok(())
        }),
        study("tokenize", Marker::pre().name("AI"), || Ok(())),
        study("train_model", Marker::study().name("AI"), || {
            thread::sleep(Duration::from_millis(200));
            Ok(())
        }),
        study("open_connection", Marker::pre().order(1), || {
            Err("connection refused".to_string())
        }),
        study("load_everything", Marker::study().order(1), || Ok(())),
    ]
}

fn main() -> Result<ExitCode, kitest_study::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let tests = tests();
    let config = StudyConfig::from_env()?;
    let report = kitest_study::harness(&tests).with_config(&config)?.run()?;
    Ok(report.exit_code())
}
