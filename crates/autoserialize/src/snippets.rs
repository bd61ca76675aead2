//! Fixed text fragments concatenated into emitted output (§4.7, §1 "OUT OF
//! SCOPE (external collaborators)").
//!
//! The base primitive/container serializers and the runtime's declaration
//! header are literally-concatenated snippet *files* owned by the runtime
//! serialization library, not generated by this crate. This module stands in
//! for "read those fixed files from disk" with the fixed text itself, since
//! their contents are out of this crate's scope (§1) — the build driver only
//! needs to know where in the emitted output they go.

/// `#include` for the runtime's declaration header, emitted at the top of
/// every per-unit header and the aggregate (§4.7 steps 5, "after all units
/// finish").
pub const RUNTIME_DECLARATIONS_INCLUDE: &str = "#include \"AutoSerialize/Declarations.hpp\"\n";

/// Appended to every per-unit header after its generator bodies (§4.7 step
/// 5): the fixed template-implementations snippet.
pub const TEMPLATE_IMPLEMENTATIONS_SNIPPET: &str =
    "#include \"AutoSerialize/TemplateImplementations.inl\"\n";

/// The fixed base-impl snippet appended to the aggregate (§4.7 "after all
/// units finish"): non-template primitive/container serializers.
pub const BASE_IMPL_SNIPPET: &str = "#include \"AutoSerialize/BaseImpl.inl\"\n";

/// The fixed base-template-impl snippet appended to the aggregate alongside
/// [`BASE_IMPL_SNIPPET`].
pub const BASE_TEMPLATE_IMPL_SNIPPET: &str = "#include \"AutoSerialize/BaseTemplateImpl.inl\"\n";

/// The stub a stale unit's output is overwritten with first (§4.7 step 3),
/// so a concurrent downstream build always sees a syntactically valid,
/// empty header even if generation for that unit later fails.
pub fn stub_header() -> String {
    format!("#pragma once\n{RUNTIME_DECLARATIONS_INCLUDE}")
}
