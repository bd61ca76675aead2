//! The top-level build loop: fans per-unit work out across worker threads,
//! merges results under a single mutex, and writes the per-unit headers and
//! the aggregate implementation file (§4.7, §5).

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use autoserialize_core::dump_driver::{self, DumpMode};
use autoserialize_core::{ast_builder, cache, walker, ImplementationGeneratorSet};

use crate::emit;
use crate::freshness::{self, output_path_for};
use crate::merge;
use crate::snippets;

/// Inputs to a full build run (§4.7 "Input").
#[derive(Debug, Clone)]
pub struct BuildConfig {
    pub front_end: PathBuf,
    pub include_dirs: Vec<PathBuf>,
    pub files_to_parse: Vec<PathBuf>,
    pub main_impl_path: PathBuf,
    pub silent: bool,
}

/// What happened while walking one unit, reported back to the shared state.
struct UnitOutcome {
    generators: ImplementationGeneratorSet,
    errors: Vec<String>,
    stale: bool,
}

/// Aggregated outcome of a full build run, surfaced to the CLI for
/// logging purposes. The process exit code depends only on `-M` being
/// present (enforced by argument parsing before a build ever starts), so
/// nothing in this report flips the process's exit status.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub conflicts: Vec<String>,
    pub per_unit_errors: Vec<(PathBuf, Vec<String>)>,
    pub aggregate_written: bool,
}

struct SharedState {
    global: ImplementationGeneratorSet,
    conflicts: Vec<String>,
    per_unit_errors: Vec<(PathBuf, Vec<String>)>,
}

pub fn run(config: &BuildConfig) -> BuildReport {
    let main_output_path = output_path_for(&config.main_impl_path);

    let queue = Mutex::new(VecDeque::from(config.files_to_parse.clone()));
    let shared = Mutex::new(SharedState {
        global: ImplementationGeneratorSet::new(),
        conflicts: Vec::new(),
        per_unit_errors: Vec::new(),
    });
    let any_stale = AtomicBool::new(false);

    // Bounded worker-thread parallelism, fan-out width equal to the host's
    // reported parallelism, one task per input unit (§5).
    let worker_count = std::thread::available_parallelism()
        .map(std::num::NonZeroUsize::get)
        .unwrap_or(1)
        .min(config.files_to_parse.len().max(1));

    std::thread::scope(|scope| {
        for _ in 0..worker_count {
            scope.spawn(|| worker_loop(config, &main_output_path, &queue, &shared, &any_stale));
        }
    });

    let mut state = shared.into_inner().expect("no worker panicked while holding the lock");

    let mut report = BuildReport {
        conflicts: state.conflicts.drain(..).collect(),
        per_unit_errors: state.per_unit_errors.drain(..).collect(),
        aggregate_written: false,
    };

    if any_stale.load(Ordering::Relaxed) {
        let aggregate = emit::render_aggregate(&state.global);
        match std::fs::write(&main_output_path, aggregate) {
            Ok(()) => report.aggregate_written = true,
            Err(source) => {
                tracing::error!(path = %main_output_path.display(), error = %source, "failed to write aggregate output");
            }
        }
    }

    report
}

fn worker_loop(
    config: &BuildConfig,
    main_output_path: &Path,
    queue: &Mutex<VecDeque<PathBuf>>,
    shared: &Mutex<SharedState>,
    any_stale: &AtomicBool,
) {
    loop {
        let unit_path = {
            let mut queue = queue.lock().expect("queue mutex poisoned");
            match queue.pop_front() {
                Some(path) => path,
                None => return,
            }
        };

        let output_path = output_path_for(&unit_path);
        if output_path.as_path() == main_output_path {
            // §4.7 step 1: the main-impl's own `.gen.inl` is assembled
            // separately, after every worker joins.
            continue;
        }

        let outcome = process_unit(config, &unit_path, &output_path);
        if outcome.stale {
            any_stale.store(true, Ordering::Relaxed);
        }

        let mut shared = shared.lock().expect("shared state mutex poisoned");
        merge::merge_into(&mut shared.global, outcome.generators, &mut shared.conflicts);
        if !outcome.errors.is_empty() {
            shared.per_unit_errors.push((unit_path, outcome.errors));
        }
    }
}

/// §4.7 steps 2-5 for a single unit.
fn process_unit(config: &BuildConfig, unit_path: &Path, output_path: &Path) -> UnitOutcome {
    let stale = freshness::is_stale(
        &config.front_end,
        unit_path,
        output_path,
        &config.include_dirs,
        config.silent,
    );

    if stale {
        if let Err(source) = std::fs::write(output_path, snippets::stub_header()) {
            tracing::error!(path = %output_path.display(), error = %source, "failed to write stub header");
        }
    }

    let (generators, errors) = if !stale {
        match cache::load(unit_path) {
            Some(cached) => (cached, Vec::new()),
            None => generate_and_cache(config, unit_path),
        }
    } else {
        generate_and_cache(config, unit_path)
    };

    if stale {
        let rendered = emit::render_unit_header(&generators);
        if let Err(source) = std::fs::write(output_path, rendered) {
            tracing::error!(path = %output_path.display(), error = %source, "failed to write unit header");
        }
    }

    UnitOutcome {
        generators,
        errors,
        stale,
    }
}

fn generate_and_cache(config: &BuildConfig, unit_path: &Path) -> (ImplementationGeneratorSet, Vec<String>) {
    let (generators, errors) = run_pipeline(config, unit_path);
    if let Err(source) = cache::save(unit_path, &generators) {
        tracing::warn!(unit = %unit_path.display(), error = %source, "failed to persist cache entry");
    }
    (generators, errors)
}

/// Dump Driver + AST Builder + Scope Walker, for a cache miss or a stale
/// unit (§4.7 step 4(b)).
fn run_pipeline(config: &BuildConfig, unit_path: &Path) -> (ImplementationGeneratorSet, Vec<String>) {
    let lines = match dump_driver::run(
        &config.front_end.to_string_lossy(),
        unit_path,
        &config.include_dirs,
        DumpMode::AstDump,
        config.silent,
    ) {
        Ok(lines) => lines,
        Err(source) => {
            return (
                ImplementationGeneratorSet::new(),
                vec![format!("front-end failed for {}: {source}", unit_path.display())],
            );
        }
    };

    match ast_builder::build(lines) {
        Some(tree) => walker::walk_unit_collecting_errors(&tree),
        None => (
            ImplementationGeneratorSet::new(),
            vec![format!("front-end produced no usable AST dump for {}", unit_path.display())],
        ),
    }
}
