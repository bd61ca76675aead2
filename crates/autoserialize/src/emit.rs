//! Assembles the per-unit inline header and the aggregate implementation
//! file from a merged [`ImplementationGeneratorSet`] (§4.7 steps 5 and
//! "after all units finish").

use autoserialize_core::generator::{self, GenMode};
use autoserialize_core::ImplementationGeneratorSet;

use crate::snippets;

/// §4.7 step 5: `#pragma once`, the runtime declarations include, then for
/// every generator in `set` (ascending key order): a forward decl if it's a
/// non-template type, otherwise the full `Regular`-mode definition. Finally
/// the fixed template-implementations snippet.
pub fn render_unit_header(set: &ImplementationGeneratorSet) -> String {
    let mut out = String::new();
    out.push_str("#pragma once\n");
    out.push_str(snippets::RUNTIME_DECLARATIONS_INCLUDE);

    for (name, gen) in &set.generators {
        if set.non_template_types.contains(name) {
            out.push_str(&generator::render(gen, GenMode::ForwardDecl));
        } else {
            // Template types are always `inline`, so their full definition
            // is safe to repeat across every unit header that needs it —
            // no include guard (§4.4's guard applies only to non-templates).
            out.push_str(&generator::render(gen, GenMode::Regular));
        }
    }

    out.push_str(snippets::TEMPLATE_IMPLEMENTATIONS_SNIPPET);
    out
}

/// "After all units finish": runtime declarations, forward-decl blocks for
/// every merged generator, the fixed base-impl/base-template-impl snippets,
/// the dynamic-dispatch block, then `Regular`-mode bodies for every merged
/// generator — all in ascending key order (§4.7 "Determinism").
pub fn render_aggregate(global: &ImplementationGeneratorSet) -> String {
    let mut out = String::new();
    out.push_str(snippets::RUNTIME_DECLARATIONS_INCLUDE);

    for gen in global.generators.values() {
        out.push_str(&generator::render(gen, GenMode::ForwardDecl));
    }

    out.push_str(snippets::BASE_IMPL_SNIPPET);
    out.push_str(snippets::BASE_TEMPLATE_IMPL_SNIPPET);

    out.push_str(&autoserialize_core::dispatch::render(&global.non_template_types));

    for (name, gen) in &global.generators {
        let body = generator::render(gen, GenMode::Regular);
        if global.non_template_types.contains(name) {
            out.push_str(&generator::wrap_include_guard(name, &body));
        } else {
            out.push_str(&body);
        }
    }

    out
}
