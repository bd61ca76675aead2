//! Argument surface (§6 "CLI surface").
//!
//! Kept in its own module, separate from the run loop, the way readstor
//! separates `cli::args::Args` from `cli::app::App`.

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "autoserialize",
    author,
    version,
    about = "Generates serialize/deserialize routines for reflected record types from a compiler AST dump"
)]
pub struct Args {
    /// The main-impl source whose generated output will be `<path>.gen.inl`.
    #[arg(short = 'M', value_name = "PATH")]
    pub main_impl: PathBuf,

    /// Additional include directory passed to the front-end. Repeatable.
    #[arg(short = 'I', value_name = "DIR")]
    pub include_dirs: Vec<PathBuf>,

    /// Suppress per-unit progress logs.
    #[arg(short = 'S')]
    pub silent: bool,

    /// Input translation unit paths. Unknown flags land here too, per §6
    /// ("unknown flags are treated as positional inputs") since this parser
    /// only recognizes `-M`/`-I`/`-S`.
    #[arg(value_name = "FILE", allow_hyphen_values = true)]
    pub inputs: Vec<PathBuf>,

    /// Path to the external compiler front-end executable. Not part of the
    /// spec's CLI surface (§6 treats the front-end as a fixed external
    /// collaborator); overridable for testing via `AUTOSERIALIZE_FRONTEND`.
    #[arg(skip)]
    pub front_end: Option<PathBuf>,
}

impl Args {
    /// The front-end executable to invoke: an explicit override, then the
    /// `AUTOSERIALIZE_FRONTEND` environment variable, then the conventional
    /// `clang++` name.
    pub fn front_end(&self) -> PathBuf {
        self.front_end
            .clone()
            .or_else(|| std::env::var_os("AUTOSERIALIZE_FRONTEND").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("clang++"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_required_main_impl_and_repeated_include_dirs() {
        let args = Args::parse_from([
            "autoserialize",
            "-M",
            "main.cpp",
            "-I",
            "include",
            "-I",
            "vendor/include",
            "unit_a.cpp",
            "unit_b.cpp",
        ]);
        assert_eq!(args.main_impl, PathBuf::from("main.cpp"));
        assert_eq!(
            args.include_dirs,
            vec![PathBuf::from("include"), PathBuf::from("vendor/include")]
        );
        assert_eq!(
            args.inputs,
            vec![PathBuf::from("unit_a.cpp"), PathBuf::from("unit_b.cpp")]
        );
        assert!(!args.silent);
    }

    #[test]
    fn silent_flag_is_optional_and_order_independent() {
        let args = Args::parse_from(["autoserialize", "-S", "-M", "main.cpp"]);
        assert!(args.silent);
    }

    #[test]
    fn missing_main_impl_is_rejected_by_the_parser() {
        let result = Args::try_parse_from(["autoserialize", "unit.cpp"]);
        assert!(result.is_err());
    }
}
