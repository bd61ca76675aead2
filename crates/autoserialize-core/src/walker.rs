//! Pre-order scope walker and extractor (§4.3).
//!
//! Walks the tree produced by [`crate::ast_builder`], maintaining a
//! [`ScopeState`] and emitting [`ImplementationGenerator`]s into an
//! [`ImplementationGeneratorSet`] as reflected records are found.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ast::{AstNode, TagKind};
use crate::error::CoreError;
use crate::model::{ImplementationGenerator, ImplementationGeneratorSet};
use crate::scope::{ScopeState, AUTO_REFLECT_MARKER_PAYLOAD, AUTO_REFLECT_NAMESPACE};
use crate::template::{Template, TemplateParam};

static CLASS_DEFINITION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"class ([A-Za-z0-9_]+) definition").expect("valid regex"));

static FIELD_DECL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Za-z0-9_]+) '([A-Za-z0-9_:<>, \*&\[\]]+)'").expect("valid regex"));

/// Walk an entire translation unit's tree and return the generators it
/// reflects, discarding any accumulated parse-anomaly errors. Kept for
/// callers (and existing tests) that only care about successful extraction;
/// the build driver uses [`walk_unit_collecting_errors`] instead so those
/// errors reach [`crate::model::UnitResult::errors`] (§7).
pub fn walk_unit(root: &AstNode) -> ImplementationGeneratorSet {
    walk_unit_collecting_errors(root).0
}

/// Walk an entire translation unit's tree, returning both the generators it
/// reflects and any per-unit parse-anomaly errors accumulated along the way
/// (§7: these never escape this boundary — the caller records them on
/// [`crate::model::UnitResult`] and continues).
pub fn walk_unit_collecting_errors(root: &AstNode) -> (ImplementationGeneratorSet, Vec<String>) {
    let mut state = ScopeState::new();
    let mut set = ImplementationGeneratorSet::new();
    walk_scope(root, &mut state, &mut set);
    state.assert_torn_down();
    (set, state.errors)
}

/// Local-name extraction for a `class NAME definition` record payload,
/// rejecting compiler-synthesized (`implicit`) records.
fn class_definition_name(payload: &str) -> Option<&str> {
    if payload.contains("implicit") {
        return None;
    }
    CLASS_DEFINITION
        .captures(payload)
        .map(|c| c.get(1).unwrap().as_str())
}

/// Pre-order descent over one scope node's children (§4.3).
fn walk_scope(node: &AstNode, state: &mut ScopeState, set: &mut ImplementationGeneratorSet) {
    for child in &node.children {
        match child.tag {
            TagKind::NamespaceDecl => enter_namespace(child, state, set),
            TagKind::EnumDecl => record_enum(child, state),
            TagKind::ClassTemplateDecl => enter_class_template(child, state, set),
            TagKind::RecordDecl => {
                if class_definition_name(&child.payload).is_some() {
                    enter_record(child, state, set);
                }
            }
            _ => {}
        }
    }
}

fn enter_namespace(node: &AstNode, state: &mut ScopeState, set: &mut ImplementationGeneratorSet) {
    let local_name = node.payload.split_whitespace().last().unwrap_or("").to_string();
    let is_auto_reflect = local_name == AUTO_REFLECT_NAMESPACE;

    state.name_stack.push(local_name);
    if is_auto_reflect {
        state.auto_reflect_namespace_depth += 1;
    }

    walk_scope(node, state, set);

    if is_auto_reflect {
        state.auto_reflect_namespace_depth -= 1;
    }
    state.name_stack.pop();
}

/// `EnumDecl` whose payload contains `class` and ends with a closing single
/// quote (§4.3). Unscoped enums, or ones with no visible underlying type,
/// are silently ignored.
fn record_enum(node: &AstNode, state: &mut ScopeState) {
    let payload = &node.payload;
    if !payload.ends_with('\'') || !payload.contains("class") {
        return;
    }

    let quote_positions: Vec<usize> = payload
        .char_indices()
        .filter(|(_, c)| *c == '\'')
        .map(|(i, _)| i)
        .collect();
    if quote_positions.len() < 2 {
        return;
    }
    let last = quote_positions[quote_positions.len() - 1];
    let second_last = quote_positions[quote_positions.len() - 2];
    let underlying = &payload[second_last + 1..last];

    let Some(class_pos) = payload.find("class ") else {
        return;
    };
    let after = &payload[class_pos + "class ".len()..];
    let Some(local_name) = after.split_whitespace().next() else {
        return;
    };

    let fully_qualified = state.fully_qualified();
    let key = if fully_qualified.is_empty() {
        local_name.to_string()
    } else {
        format!("{fully_qualified}::{local_name}")
    };
    state.enum_underlying.insert(key, underlying.to_string());
}

fn enter_class_template(node: &AstNode, state: &mut ScopeState, set: &mut ImplementationGeneratorSet) {
    let template = match build_template(node) {
        Ok(t) => t,
        Err(e) => {
            state.errors.push(e.to_string());
            return;
        }
    };

    state.template_stack.push(template);

    match node.children.last() {
        Some(class_node) if class_definition_name(&class_node.payload).is_some() => {
            enter_record(class_node, state, set);
        }
        _ => state.errors.push(CoreError::MissingTemplateDefinition.to_string()),
    }

    state.template_stack.pop();
}

/// Build a [`Template`] from the template-parameter children of a
/// template-bearing node (§4.3.2).
fn build_template(node: &AstNode) -> Result<Template, CoreError> {
    let mut params = Vec::new();
    for child in &node.children {
        if !child.tag.is_template_param() {
            continue;
        }
        let (kind_or_type_name, name) = parse_template_param_payload(&child.payload)?;
        if child.tag == TagKind::TemplateTemplateParmDecl {
            let mut nested = build_template(child)?;
            nested.name = name;
            params.push(TemplateParam::TemplateTemplate {
                params: nested.params,
                name: nested.name,
            });
        } else {
            params.push(TemplateParam::KindOrType {
                kind_or_type_name,
                name,
            });
        }
    }
    Ok(Template {
        params,
        name: String::new(),
    })
}

/// §4.3.2: split on spaces; the last token is the name iff it doesn't begin
/// with a digit; a token immediately before it beginning with `.` marks a
/// pack; the kind/type token sits five positions before the name, adjusted
/// for the pack.
fn parse_template_param_payload(payload: &str) -> Result<(String, String), CoreError> {
    let sections: Vec<&str> = payload.split(' ').collect();
    let malformed = || CoreError::MalformedTemplateParam {
        payload: payload.to_string(),
    };

    let last = *sections.last().ok_or_else(malformed)?;
    let starts_with_digit = last.chars().next().is_some_and(|c| c.is_ascii_digit());
    let (num_vars, name) = if starts_with_digit {
        (0usize, String::new())
    } else {
        (1usize, last.to_string())
    };

    let dot_idx = sections.len().checked_sub(1 + num_vars).ok_or_else(malformed)?;
    let num_dots = usize::from(sections.get(dot_idx).is_some_and(|s| s.starts_with('.')));

    let type_idx = sections
        .len()
        .checked_sub(num_vars + num_dots + 5)
        .ok_or_else(malformed)?;
    let kind_or_type_name = (*sections.get(type_idx).ok_or_else(malformed)?).to_string();

    Ok((kind_or_type_name, name))
}

/// §4.3.1: enter a record, extract its fields, decide whether to emit it.
fn enter_record(node: &AstNode, state: &mut ScopeState, set: &mut ImplementationGeneratorSet) {
    let Some(local_name) = class_definition_name(&node.payload) else {
        return;
    };
    state.name_stack.push(local_name.to_string());

    let flattened = state.flattened_template();
    let templates_header = flattened.render_header(true);
    let full_type_name = state.full_type_name();

    let mut serialize_fields_body = String::new();
    let mut deserialize_fields_body = String::new();
    let mut found_marker = false;

    for child in &node.children {
        match child.tag {
            TagKind::FieldDecl => {
                if let Some((serialize_line, deserialize_line)) =
                    build_field_lines(&child.payload, state)
                {
                    serialize_fields_body.push_str(&serialize_line);
                    deserialize_fields_body.push_str(&deserialize_line);
                } else {
                    state.errors.push(
                        CoreError::MalformedField {
                            payload: child.payload.clone(),
                        }
                        .to_string(),
                    );
                }
            }
            TagKind::AccessPublic | TagKind::AccessPrivate => {
                if child.payload == AUTO_REFLECT_MARKER_PAYLOAD {
                    found_marker = true;
                }
            }
            _ => {}
        }
    }

    walk_scope(node, state, set);

    state.name_stack.pop();

    let nested_templates_error =
        (found_marker || state.in_auto_reflect_namespace()) && state.template_stack.len() > 1;
    if nested_templates_error {
        state.errors.push(
            CoreError::NestedTemplatesUnsupported {
                full_type_name: full_type_name.clone(),
            }
            .to_string(),
        );
    }

    let should_emit = (state.in_auto_reflect_namespace() || found_marker) && !nested_templates_error;
    if should_emit {
        let generator = ImplementationGenerator {
            templates_header,
            full_type_name,
            serialize_fields_body,
            deserialize_fields_body,
        };
        set.insert(generator, state.template_stack.is_empty());
    }
}

/// Builds the `Serialize(...)`/`Deserialize(...)` lines for one field,
/// rewriting enum-typed fields through their recorded underlying type
/// (§4.3.1). Returns `None` if the payload doesn't match `NAME 'TYPE'`.
fn build_field_lines(payload: &str, state: &ScopeState) -> Option<(String, String)> {
    let captures = FIELD_DECL.captures(payload)?;
    let name = captures.get(1)?.as_str();
    let ty = captures.get(2)?.as_str();

    let value_expr = format!("Val.{name}");
    let (serialize_expr, deserialize_target) = match state.enum_underlying.get(ty) {
        Some(underlying) => (
            format!("static_cast<{underlying}>({value_expr})"),
            format!("*reinterpret_cast<{underlying}*>(&{value_expr})"),
        ),
        None => (value_expr.clone(), value_expr),
    };

    let serialize_line = format!("    Serialize(Ser, \"{name}\", {serialize_expr});\n");
    let deserialize_line = format!("    Deserialize(Ser, \"{name}\", {deserialize_target});\n");
    Some((serialize_line, deserialize_line))
}
