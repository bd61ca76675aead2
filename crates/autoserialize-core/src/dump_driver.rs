//! Spawns the external compiler front-end and yields its output a line at a
//! time (§4.1, §6 "External process interface").

use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{CoreError, CoreResult};

/// A hard per-line cap: lines longer than this are truncated rather than
/// aborting the unit (§4.1).
pub const MAX_LINE_BYTES: usize = 16 * 1024;

/// Which of the two front-end invocations to perform for a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DumpMode {
    /// `-std=c++20 -Xclang -ast-dump -fsyntax-only -fno-color-diagnostics`
    AstDump,
    /// `-std=c++20 -M`
    HeaderList,
}

/// Runs the front-end for `unit_path` in the given `mode` and returns its
/// stdout split into lines (trailing newlines stripped, each line truncated
/// to [`MAX_LINE_BYTES`]). stderr is discarded; a nonzero exit is tolerated
/// since a partial dump may still be usable.
pub fn run(
    front_end: &str,
    unit_path: &Path,
    include_dirs: &[PathBuf],
    mode: DumpMode,
    silent: bool,
) -> CoreResult<Vec<String>> {
    let mut cmd = Command::new(front_end);
    match mode {
        DumpMode::AstDump => {
            cmd.args(["-std=c++20", "-Xclang", "-ast-dump", "-fsyntax-only", "-fno-color-diagnostics"]);
        }
        DumpMode::HeaderList => {
            cmd.args(["-std=c++20", "-M"]);
        }
    }
    for dir in include_dirs {
        cmd.arg("-I").arg(dir);
    }
    cmd.arg(unit_path);
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::null());

    if !silent {
        tracing::debug!(unit = %unit_path.display(), ?mode, "spawning front-end");
    }

    let mut child = cmd.spawn().map_err(CoreError::SpawnError)?;
    let stdout = child.stdout.take().expect("stdout was piped");
    let reader = BufReader::new(stdout);

    let mut lines = Vec::new();
    for raw in reader.lines() {
        let mut line = raw.unwrap_or_default();
        if line.len() > MAX_LINE_BYTES {
            line.truncate(MAX_LINE_BYTES);
        }
        lines.push(line);
    }

    // A nonzero exit is tolerated: the dump gathered so far may still be
    // partially useful (§4.1).
    let _ = child.wait();

    Ok(lines)
}

/// Parses `clang -M` make-rule output into a list of header paths (§4.1).
///
/// The first token (the `.o:` target) is discarded; the remainder is split
/// on embedded spaces as well as newlines, and trailing line-continuation
/// backslashes are stripped.
pub fn parse_header_list(lines: &[String]) -> Vec<String> {
    let mut headers = Vec::new();
    for (i, raw_line) in lines.iter().enumerate() {
        let mut line = raw_line.trim_end().to_string();
        if let Some(stripped) = line.strip_suffix('\\') {
            line = stripped.trim_end().to_string();
        }

        let mut tokens: Vec<&str> = line.split(' ').filter(|t| !t.is_empty()).collect();
        if i == 0 && !tokens.is_empty() {
            // Discard the leading `<target>:` token on the first line.
            tokens.remove(0);
        }
        for token in tokens {
            headers.push(token.to_string());
        }
    }
    headers
}
