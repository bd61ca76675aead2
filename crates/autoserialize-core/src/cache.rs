//! Per-unit on-disk cache of a previously computed generator set (§4.6).
//!
//! The schema mirrors [`ImplementationGeneratorSet`] one-for-one via
//! `serde_json`, matching the field names the original `nlohmann::json`
//! bindings used (see DESIGN.md).

use std::path::{Path, PathBuf};

use crate::model::ImplementationGeneratorSet;

/// Workspace-relative directory the cache lives under.
pub const CACHE_DIR: &str = ".AutoSerialize";

/// Mirror a unit's path into a cache file path under [`CACHE_DIR`].
///
/// Root/prefix components are dropped rather than pushed verbatim: `PathBuf`
/// treats pushing an absolute component as "start over from here", so an
/// absolute `unit_path` would otherwise silently discard the `.AutoSerialize`
/// prefix and mirror the unit at its own absolute location.
pub fn cache_path(unit_path: &Path) -> PathBuf {
    use std::path::Component;

    let mut out = PathBuf::from(CACHE_DIR);
    for component in unit_path.components() {
        match component {
            Component::Normal(part) => out.push(part),
            Component::ParentDir => out.push(".."),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }
    out
}

/// Persist `set` as the cached result for `unit_path`.
pub fn save(unit_path: &Path, set: &ImplementationGeneratorSet) -> std::io::Result<()> {
    let path = cache_path(unit_path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_vec_pretty(set).expect("ImplementationGeneratorSet is always serializable");
    std::fs::write(path, json)
}

/// Load the cached result for `unit_path`, if any.
///
/// A missing file is a clean miss (`Ok(None)`). A file that exists but fails
/// to parse is *also* treated as a miss — logged at `warn` and discarded —
/// per §4.6's cache-corruption addendum; it is never surfaced as an error to
/// the caller, since a stale/corrupt cache must never fail a build.
pub fn load(unit_path: &Path) -> Option<ImplementationGeneratorSet> {
    let path = cache_path(unit_path);
    let bytes = std::fs::read(&path).ok()?;
    match serde_json::from_slice(&bytes) {
        Ok(set) => Some(set),
        Err(source) => {
            tracing::warn!(path = %path.display(), error = %source, "cache file is not valid JSON, treating as a miss");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ImplementationGenerator;
    use std::sync::Mutex;

    /// Guards tests that call `std::env::set_current_dir`, which is
    /// process-wide state: without this, tests in this module running on
    /// separate threads (the default `cargo test` behavior) could race.
    static CWD_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn cache_path_mirrors_unit_path_under_cache_dir() {
        let path = cache_path(Path::new("src/widget.cpp"));
        assert_eq!(path, PathBuf::from(".AutoSerialize/src/widget.cpp"));
    }

    /// An absolute unit path must still land under `.AutoSerialize/`: naively
    /// pushing a root component onto a `PathBuf` resets it to absolute.
    #[test]
    fn cache_path_of_an_absolute_unit_path_stays_under_cache_dir() {
        let path = cache_path(Path::new("/tmp/build/src/widget.cpp"));
        assert_eq!(path, PathBuf::from(".AutoSerialize/tmp/build/src/widget.cpp"));
    }

    #[test]
    fn round_trips_through_a_temp_directory() {
        let _guard = CWD_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let dir = tempfile::tempdir().unwrap();
        let prior = std::env::current_dir().unwrap();
        std::env::set_current_dir(dir.path()).unwrap();

        let mut set = ImplementationGeneratorSet::new();
        set.insert(
            ImplementationGenerator {
                templates_header: String::new(),
                full_type_name: "Point".to_string(),
                serialize_fields_body: "    Serialize(Ser, \"x\", Val.x);\n".to_string(),
                deserialize_fields_body: "    Deserialize(Ser, \"x\", Val.x);\n".to_string(),
            },
            true,
        );

        save(Path::new("unit.cpp"), &set).unwrap();
        let loaded = load(Path::new("unit.cpp")).expect("cache hit");
        assert_eq!(loaded, set);

        std::env::set_current_dir(prior).unwrap();
    }

    #[test]
    fn missing_file_is_a_clean_miss() {
        let _guard = CWD_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let dir = tempfile::tempdir().unwrap();
        let prior = std::env::current_dir().unwrap();
        std::env::set_current_dir(dir.path()).unwrap();

        assert!(load(Path::new("never_written.cpp")).is_none());

        std::env::set_current_dir(prior).unwrap();
    }

    #[test]
    fn corrupt_file_is_treated_as_a_miss_not_an_error() {
        let _guard = CWD_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let dir = tempfile::tempdir().unwrap();
        let prior = std::env::current_dir().unwrap();
        std::env::set_current_dir(dir.path()).unwrap();

        let path = cache_path(Path::new("bad.cpp"));
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, b"not json").unwrap();

        assert!(load(Path::new("bad.cpp")).is_none());

        std::env::set_current_dir(prior).unwrap();
    }
}
