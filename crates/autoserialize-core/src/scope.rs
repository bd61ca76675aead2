//! Scope bookkeeping carried by the walker as it descends and ascends the
//! AST tree (§3 `ScopeState`).

use fnv::FnvHashMap;

use crate::template::{flatten, Template};

/// The sentinel namespace name that implicitly marks every record beneath
/// it as reflected, without requiring the per-record `AutoReflect` access
/// marker (§4.3, Open Question resolved in DESIGN.md: both are equally
/// sufficient).
pub const AUTO_REFLECT_NAMESPACE: &str = "AutoReflect";

/// The per-record access-specifier marker payload that opts a record in.
pub const AUTO_REFLECT_MARKER_PAYLOAD: &str = "'AutoReflect'";

#[derive(Debug, Default)]
pub struct ScopeState {
    pub template_stack: Vec<Template>,
    pub name_stack: Vec<String>,
    /// Keyed by every enum lookup this walk performs, so a fast-hash
    /// `FnvHashMap` pays off more than the extra dependency costs.
    pub enum_underlying: FnvHashMap<String, String>,
    pub auto_reflect_namespace_depth: u32,
    pub errors: Vec<String>,
}

impl ScopeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// `name_stack.join("::")`, with no template suffix.
    pub fn fully_qualified(&self) -> String {
        self.name_stack.join("::")
    }

    /// `fully_qualified() + flattened_template().render_names()`.
    pub fn full_type_name(&self) -> String {
        format!(
            "{}{}",
            self.fully_qualified(),
            self.flattened_template().render_names()
        )
    }

    pub fn flattened_template(&self) -> Template {
        flatten(self.template_stack.iter())
    }

    /// Whether the current scope implies every enclosed record is reflected
    /// without needing its own marker.
    pub fn in_auto_reflect_namespace(&self) -> bool {
        self.auto_reflect_namespace_depth > 0
    }

    /// Must be called at the very end of a unit's walk (§3 lifecycle
    /// invariant: all stacks empty).
    pub fn assert_torn_down(&self) {
        debug_assert!(self.template_stack.is_empty());
        debug_assert!(self.name_stack.is_empty());
        debug_assert_eq!(self.auto_reflect_namespace_depth, 0);
    }
}
