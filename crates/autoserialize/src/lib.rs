//! Incremental, parallel build driver for AutoSerialize (§2 "Build Driver",
//! §4.7, §5). This crate owns everything the reflection core in
//! `autoserialize-core` does not: the CLI surface, logging, the worker pool,
//! freshness checks, merge/conflict bookkeeping, and final file emission.

pub mod build_driver;
pub mod cli;
pub mod emit;
pub mod filter;
pub mod freshness;
pub mod logging;
pub mod merge;
pub mod pipeline;
pub mod snippets;

pub use build_driver::{BuildConfig, BuildReport};
pub use pipeline::run;
