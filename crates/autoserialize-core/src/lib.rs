//! AST-dump interpretation and code generation core for AutoSerialize.
//!
//! This crate implements the three stages described in the design as "the
//! hard engineering": the tolerant AST-dump interpreter ([`ast`],
//! [`ast_builder`]), the scope-aware name-binding and emission engine
//! ([`scope`], [`template`], [`walker`], [`generator`], [`dispatch`]), and
//! the per-unit cache format ([`cache`]) the incremental build driver in the
//! `autoserialize` binary crate relies on. It does not itself spawn worker
//! threads or own a CLI surface; those live one layer up.

pub mod ast;
pub mod ast_builder;
pub mod cache;
pub mod dispatch;
pub mod dump_driver;
pub mod error;
pub mod generator;
pub mod model;
pub mod scope;
pub mod template;
pub mod walker;

pub use error::{CoreError, CoreResult};
pub use model::{ImplementationGenerator, ImplementationGeneratorSet, UnitResult};
