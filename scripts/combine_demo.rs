//! Walks through combining two assertions over shared state and re-running them
//! after the state changes.
//!
//! Settings come from `VERITY_*` environment variables; logging honours `RUST_LOG`.

use std::cell::Cell;
use std::rc::Rc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;
use verity_core::{Assertion, MergePolicy};
use verity_suite::{AssertionBatch, SuiteConfig};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut config = SuiteConfig::from_env()?;
    if std::env::var(verity_suite::ENV_MERGE_POLICY).is_err() {
        config.merge_policy = MergePolicy::Concat;
    }
    info!(suite = %config.name, policy = %config.merge_policy, "Starting combine demo");

    let x = Rc::new(Cell::new(7));
    let over_five: Assertion = {
        let x = Rc::clone(&x);
        (move || x.get() > 5, "Cool cool cool").into()
    };
    let under_ten: Assertion = {
        let x = Rc::clone(&x);
        (move || x.get() < 10, "Well well well").into()
    };
    let combined = over_five.and_with(&under_ten, config.merge_policy);

    report("before", x.get(), &[&over_five, &under_ten, &combined])?;
    x.set(10);
    report("after", x.get(), &[&over_five, &under_ten, &combined])?;

    let batch: AssertionBatch = {
        let mut batch = AssertionBatch::with_config(config);
        batch.add(over_five);
        batch.add(under_ten);
        batch.add(combined);
        batch
    };
    let outcome = batch.exec_all()?;
    match outcome.failure_message() {
        None => info!("Batch passed"),
        Some(message) => info!(index = ?outcome.failed_index, message, "Batch failed"),
    }

    Ok(())
}

fn report(stage: &str, x: i32, assertions: &[&Assertion]) -> Result<()> {
    for assertion in assertions {
        let passed = assertion.execute()?;
        info!(stage, x, passed, message = assertion.message(), "Executed assertion");
    }
    Ok(())
}
