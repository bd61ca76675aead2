//! Wires parsed CLI arguments into a [`BuildConfig`] and drives one build,
//! logging the outcome. The pipeline-level composition point the ambient
//! error-handling stack (§7, §10) refers to: leaf errors from
//! `autoserialize-core` are `thiserror` enums; this layer composes them with
//! `anyhow::Result` and `.context(...)`.

use anyhow::{Context, Result};
use colored::Colorize;

use crate::build_driver::{self, BuildConfig};
use crate::cli::Args;
use crate::filter;

/// Run one full build for the given CLI arguments.
///
/// Per §6: exit code is 0 on any completion, including one that recorded
/// per-unit errors or merge conflicts — those are logged, not propagated as
/// a process failure. Only a configuration problem this function detects
/// before dispatching any work (currently: none beyond what `clap` already
/// enforces for `-M`) returns `Err`.
pub fn run(args: Args) -> Result<()> {
    let front_end = args.front_end();
    let inputs = filter::participating_inputs(&args.inputs);

    if inputs.len() != args.inputs.len() {
        tracing::debug!(
            total = args.inputs.len(),
            participating = inputs.len(),
            "filtered out inputs that do not reference the generated suffix"
        );
    }

    let config = BuildConfig {
        front_end,
        include_dirs: args.include_dirs,
        files_to_parse: inputs,
        main_impl_path: args.main_impl,
        silent: args.silent,
    };

    let report = build_driver::run(&config);
    log_report(&report).context("failed to report build outcome")?;

    Ok(())
}

fn log_report(report: &build_driver::BuildReport) -> Result<()> {
    if report.aggregate_written {
        tracing::info!("aggregate implementation rewritten");
    } else {
        tracing::debug!("no stale units; aggregate left untouched");
    }

    for conflict in &report.conflicts {
        tracing::warn!(%conflict, "merge conflict");
        eprintln!("{} {conflict}", "conflict:".yellow().bold());
    }

    for (unit, errors) in &report.per_unit_errors {
        for error in errors {
            tracing::warn!(unit = %unit.display(), %error, "parse anomaly");
            eprintln!("{} {}: {error}", "anomaly:".red().bold(), unit.display());
        }
    }

    Ok(())
}
