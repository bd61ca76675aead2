//! Leaf-level error types for the reflection core.
//!
//! Recoverable, per-unit conditions (a malformed field payload, a front-end
//! that refused to spawn) are represented here as a closed `thiserror` enum
//! so call sites can match on variant. A corrupt cache file is deliberately
//! *not* one of these variants — `cache::load` treats it as a plain miss and
//! only logs via `tracing` (§4.6 addendum; see DESIGN.md). Pipeline-level
//! composition happens one layer up, in the CLI crate, using `anyhow`.

use thiserror::Error;

/// Errors raised while walking a single translation unit.
///
/// These never escape the per-unit boundary: the walker converts them into
/// entries on [`crate::model::UnitResult::errors`] and keeps going.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("failed to spawn front-end process: {0}")]
    SpawnError(#[source] std::io::Error),

    #[error("nested templates unsupported for {full_type_name}")]
    NestedTemplatesUnsupported { full_type_name: String },

    #[error("malformed field declaration payload: {payload:?}")]
    MalformedField { payload: String },

    #[error("malformed template parameter payload: {payload:?}")]
    MalformedTemplateParam { payload: String },

    #[error("internal error: expected a template definition but found none")]
    MissingTemplateDefinition,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type CoreResult<T> = Result<T, CoreError>;
