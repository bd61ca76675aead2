//! Stat-diffs a unit against its transitive header set to decide whether its
//! generated output needs to be rewritten (§4.7 step 2).

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use autoserialize_core::dump_driver::{self, DumpMode};

/// `<unit>.gen.inl`, the per-unit output path (§4.7 step 1).
pub fn output_path_for(unit_path: &Path) -> PathBuf {
    let mut out = unit_path.as_os_str().to_owned();
    out.push(".gen.inl");
    PathBuf::from(out)
}

fn mtime_or_epoch(path: &Path) -> SystemTime {
    std::fs::metadata(path)
        .and_then(|m| m.modified())
        .unwrap_or(SystemTime::UNIX_EPOCH)
}

/// Whether `unit_path`'s generated output needs to be rewritten.
///
/// The unit is stale if it is itself newer than its output, or if any header
/// in its dependency list (queried from the front-end, ignoring a header
/// equal to `output_path` itself) is newer than the output. A header that
/// doesn't exist on disk is logged and skipped (§4.1, §7 "Filesystem").
pub fn is_stale(
    front_end: &Path,
    unit_path: &Path,
    output_path: &Path,
    include_dirs: &[PathBuf],
    silent: bool,
) -> bool {
    let output_mtime = mtime_or_epoch(output_path);
    let input_mtime = mtime_or_epoch(unit_path);
    if input_mtime > output_mtime {
        return true;
    }

    let lines = match dump_driver::run(
        &front_end.to_string_lossy(),
        unit_path,
        include_dirs,
        DumpMode::HeaderList,
        silent,
    ) {
        Ok(lines) => lines,
        Err(source) => {
            tracing::warn!(unit = %unit_path.display(), error = %source, "could not fetch header list, treating unit as stale");
            return true;
        }
    };

    for header in dump_driver::parse_header_list(&lines) {
        let header_path = PathBuf::from(&header);
        if header_path == output_path {
            continue;
        }
        match std::fs::metadata(&header_path).and_then(|m| m.modified()) {
            Ok(header_mtime) if header_mtime > output_mtime => return true,
            Ok(_) => {}
            Err(_) => {
                tracing::debug!(header = %header, "referenced header does not exist, skipping");
            }
        }
    }

    false
}
