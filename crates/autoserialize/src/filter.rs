//! Positional-input filtering (§6: "Each positional input is filtered: the
//! file is scanned line-by-line for a substring `.gen.inl`; only files that
//! reference the generated suffix participate.").

use std::io::BufRead;
use std::path::{Path, PathBuf};

/// The marker substring a unit's own source must contain (somewhere in an
/// `#include "...gen.inl"` line, typically) to be considered for generation.
const GENERATED_SUFFIX_MARKER: &str = ".gen.inl";

/// Keep only the inputs whose contents reference [`GENERATED_SUFFIX_MARKER`].
///
/// A file that can't be opened is logged and skipped rather than treated as
/// fatal (§7 "Filesystem" taxonomy): one unreadable input should not abort a
/// build of everything else.
pub fn participating_inputs(inputs: &[PathBuf]) -> Vec<PathBuf> {
    inputs
        .iter()
        .filter(|path| references_generated_suffix(path))
        .cloned()
        .collect()
}

fn references_generated_suffix(path: &Path) -> bool {
    let file = match std::fs::File::open(path) {
        Ok(f) => f,
        Err(source) => {
            tracing::warn!(path = %path.display(), error = %source, "could not read input, skipping");
            return false;
        }
    };
    std::io::BufReader::new(file)
        .lines()
        .map_while(Result::ok)
        .any(|line| line.contains(GENERATED_SUFFIX_MARKER))
}
